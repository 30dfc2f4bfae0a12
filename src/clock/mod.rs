//! Calendar time
//!
//! Time sources produce broken-down calendar fields. Months are stored
//! 0-based, as the host calendar API reports them; displays add one.

mod frame;

pub use frame::{render_frame, DateLine, TimeLine, HEADER, LEADING_BLANK_LINES};

use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Broken-down calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarTime {
    pub year: i32,
    /// 0 = January
    pub month: u32,
    /// Day of month, 1-based
    pub day: u32,
    /// 0 = Sunday
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl CalendarTime {
    /// Convert seconds since the UNIX epoch, in UTC. `None` if the instant
    /// is outside the representable range or `millisecond` is not below 1000.
    pub fn from_unix(secs: i64, millisecond: u32) -> Option<Self> {
        if millisecond >= 1000 {
            return None;
        }
        DateTime::<Utc>::from_timestamp(secs, millisecond * 1_000_000).map(|dt| Self::from_datetime(&dt))
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month0(),
            day: dt.day(),
            weekday: dt.weekday().num_days_from_sunday(),
            hour: dt.hour(),
            minute: dt.minute(),
            // a leap second reads as :59
            second: dt.second(),
            millisecond: dt.timestamp_subsec_millis().min(999),
        }
    }
}

/// Something that knows the current calendar time
pub trait TimeSource {
    fn now(&self) -> CalendarTime;
}

/// Wall clock with a fixed offset from UTC
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Offsets must lie strictly within one day either side of UTC
    pub fn new(utc_offset_secs: i64) -> Result<Self> {
        Ok(Self {
            offset: fixed_offset(utc_offset_secs)?,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> CalendarTime {
        CalendarTime::from_datetime(&Utc::now().with_timezone(&self.offset))
    }
}

/// Checked conversion of an offset in seconds east of UTC
pub fn fixed_offset(utc_offset_secs: i64) -> Result<FixedOffset> {
    i32::try_from(utc_offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            Error::Config(format!(
                "utc offset of {} seconds is out of range (must be within one day)",
                utc_offset_secs
            ))
        })
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarTime);

impl TimeSource for FixedClock {
    fn now(&self) -> CalendarTime {
        self.0
    }
}
