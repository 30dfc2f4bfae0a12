//! Console tests
//!
//! End-to-end checks of the text console driving real screen drivers:
//! scrolling, control characters, foreground gating and the clock frame as
//! it appears on both screens.

use dual_clock::app::{ClockApp, Config};
use dual_clock::clock::{render_frame, CalendarTime, FixedClock};
use dual_clock::core::{Console, ScreenId, Snapshot, Surface, BLANK};
use dual_clock::lifecycle::ScriptedHost;
use dual_clock::present::text_mode::CELL_BYTES;
use dual_clock::present::{DriverCall, FrameHeap, Presenter, RecordingDriver, TextModeDriver};

/// Console over TV and DRC surfaces backed by the text-mode driver
fn text_mode_console(tv: (usize, usize), drc: (usize, usize)) -> Console<TextModeDriver> {
    let driver = TextModeDriver::new()
        .with_screen(ScreenId::Tv, tv.0, tv.1)
        .with_screen(ScreenId::Drc, drc.0, drc.1);
    let surfaces = vec![
        Surface::new(ScreenId::Tv, tv.0, tv.1).unwrap(),
        Surface::new(ScreenId::Drc, drc.0, drc.1).unwrap(),
    ];
    let heap = FrameHeap::new((tv.0 * tv.1 + drc.0 * drc.1) * CELL_BYTES);
    Console::new(surfaces, Presenter::new(driver, heap))
}

fn recording_console(screens: &[(ScreenId, usize, usize)]) -> Console<RecordingDriver> {
    let surfaces = screens
        .iter()
        .map(|&(id, rows, cols)| Surface::new(id, rows, cols).unwrap())
        .collect();
    Console::new(surfaces, Presenter::new(RecordingDriver::new(32), FrameHeap::new(1024)))
}

// ============================================================================
// Text buffer behavior
// ============================================================================

#[test]
fn test_overflow_scenario_on_both_screens() {
    let mut console = text_mode_console((3, 4), (3, 4));
    console.acquire_foreground().unwrap();
    console.print("AAAABBBBCCCCX");

    for (index, id) in [ScreenId::Tv, ScreenId::Drc].into_iter().enumerate() {
        let surface = console.surface(index).unwrap();
        assert_eq!(surface.scrolls(), 1);
        assert_eq!(
            console.presenter().driver().front_lines(id).unwrap(),
            vec!["BBBB", "CCCC", "X   "]
        );
    }
}

#[test]
fn test_clear_blanks_everything() {
    let mut console = text_mode_console((3, 4), (2, 4));
    console.acquire_foreground().unwrap();
    console.print("some\ttext\nhere");
    console.clear();

    for surface in console.surfaces() {
        assert_eq!(surface.offset(), 0);
        assert!(surface.cells().iter().all(|&c| c == BLANK));
    }
    assert_eq!(
        console.presenter().driver().front_lines(ScreenId::Drc).unwrap(),
        vec!["    ", "    "]
    );
}

#[test]
fn test_newline_and_tab_arithmetic() {
    let mut console = recording_console(&[(ScreenId::Tv, 27, 80)]);
    console.print("abcde");
    console.print("\t");
    assert_eq!(console.surface(0).unwrap().offset(), 8);

    console.print("\n");
    assert_eq!(console.surface(0).unwrap().offset(), 80);

    write_count(&mut console, 85);
    console.print("\n");
    assert_eq!(console.surface(0).unwrap().offset(), 240);
}

fn write_count(console: &mut Console<RecordingDriver>, n: usize) {
    console.print(&"x".repeat(n));
}

#[test]
fn test_backspace_erases() {
    let mut console = recording_console(&[(ScreenId::Tv, 2, 8)]);
    console.print("abc\x08\x08d");
    assert_eq!(console.surface(0).unwrap().row_text(0).unwrap(), "ad      ");
}

// ============================================================================
// Surface collections of other sizes
// ============================================================================

#[test]
fn test_single_surface() {
    let mut console = recording_console(&[(ScreenId::Drc, 2, 3)]);
    console.acquire_foreground().unwrap();
    console.print("abcdefg");
    assert_eq!(console.surface(0).unwrap().row_text(0).unwrap(), "def");
    assert_eq!(console.presenter().driver().count(|c| matches!(c, DriverCall::FlipBuffers { .. })), 2);
}

#[test]
fn test_three_surfaces_each_presented() {
    let mut console = recording_console(&[
        (ScreenId::Tv, 2, 4),
        (ScreenId::Drc, 3, 4),
        (ScreenId::Tv, 1, 8),
    ]);
    console.acquire_foreground().unwrap();
    let calls = console.presenter_mut().driver_mut().take_calls();
    assert!(!calls.is_empty());

    console.print("hello");
    let driver = console.presenter().driver();
    assert_eq!(driver.count(|c| matches!(c, DriverCall::ClearBuffer { .. })), 3);
    assert_eq!(driver.count(|c| matches!(c, DriverCall::PutText { .. })), 2 + 3 + 1);
    assert_eq!(console.presenter().heap().used(), 96);
    assert_eq!(console.surface(2).unwrap().row_text(0).unwrap(), "hello   ");
}

// ============================================================================
// Foreground gating
// ============================================================================

#[test]
fn test_background_writes_touch_no_hardware() {
    let mut console = recording_console(&[(ScreenId::Tv, 3, 4), (ScreenId::Drc, 3, 4)]);
    console.print("abc");
    console.clear();
    console.redraw();
    assert!(console.presenter().driver().calls().is_empty());
    assert!(console.presenter().buffer(0).is_none());
}

#[test]
fn test_release_then_reacquire_shows_latest_grid() {
    let mut console = text_mode_console((2, 4), (2, 4));
    console.acquire_foreground().unwrap();
    console.print("one");
    console.release_foreground();

    console.clear();
    console.print("two");
    assert_eq!(console.presenter().driver().front_lines(ScreenId::Tv).unwrap()[0], "one ");

    console.acquire_foreground().unwrap();
    assert_eq!(console.presenter().driver().front_lines(ScreenId::Tv).unwrap()[0], "two ");
    assert_eq!(console.presenter().heap().used(), 32);
}

// ============================================================================
// Clock frame
// ============================================================================

#[test]
fn test_clock_frame_on_both_screens() {
    let mut console = text_mode_console((27, 80), (18, 80));
    console.acquire_foreground().unwrap();

    let at = CalendarTime::from_unix(1_704_067_199, 0).unwrap(); // 2023-12-31 23:59:59
    console.clear();
    render_frame(&mut console, &at);

    // Both buffers fill the heap exactly
    assert_eq!(console.presenter().heap().remaining(), 0);

    for id in [ScreenId::Tv, ScreenId::Drc] {
        let lines = console.presenter().driver().front_lines(id).unwrap();
        assert_eq!(lines[7].trim_end(), "This is the current time and date:");
        assert_eq!(lines[9].trim_end(), "Date: 31:12:2023");
        assert_eq!(lines[10].trim_end(), "Time: 23:59:59");
    }
}

#[test]
fn test_app_snapshot_roundtrip() {
    let config = Config {
        interval_ms: 0,
        ..Config::default()
    };
    let host = ScriptedHost::default().with_frame_limit(2);
    let clock = FixedClock(CalendarTime::from_unix(0, 0).unwrap());
    let mut app = ClockApp::init(&config, config.text_mode_driver(), host, clock).unwrap();
    app.run().unwrap();

    let snapshot = app.console().snapshot();
    assert!(snapshot.foreground);
    assert_eq!(snapshot.surfaces[0].lines[9], "Date: 1:01:1970");
    assert_eq!(snapshot.surfaces[1].lines[10], "Time: 0:0:00");

    let restored = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(restored, snapshot);

    let text = app.console().presenter().driver().render();
    assert!(text.starts_with("[tv]\n"));
    assert!(text.contains("[drc]\n"));
}
