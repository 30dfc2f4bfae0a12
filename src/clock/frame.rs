//! On-screen clock layout

use std::fmt;

use super::CalendarTime;
use crate::core::Console;
use crate::present::ScreenDriver;

/// Blank lines written above the header
pub const LEADING_BLANK_LINES: &str = "\n\n\n\n\n\n\n";

pub const HEADER: &str = "This is the current time and date: ";

/// `Date: <day>:<month, 1-based, two digits>:<year>`
pub struct DateLine<'a>(pub &'a CalendarTime);

impl fmt::Display for DateLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(f, "Date: {}:{:02}:{}", t.day, t.month + 1, t.year)
    }
}

/// `Time: <hour>:<minute>:<second, two digits>`
pub struct TimeLine<'a>(pub &'a CalendarTime);

impl fmt::Display for TimeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        write!(f, "Time: {}:{}:{:02}", t.hour, t.minute, t.second)
    }
}

/// Write one clock frame. Each piece is a separate console write, so the
/// screens are redrawn after every line.
pub fn render_frame<D: ScreenDriver>(console: &mut Console<D>, time: &CalendarTime) {
    console.print(LEADING_BLANK_LINES);
    writeln!(console, "{}", HEADER);
    writeln!(console);
    writeln!(console, "{}", DateLine(time));
    writeln!(console, "{}", TimeLine(time));
}
