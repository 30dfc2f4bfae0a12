//! Application glue module
//!
//! The clock main loop, lifecycle dispatch and configuration.

mod config;

pub use config::{CliArgs, Config, SurfaceConfig};

use std::thread;
use std::time::Duration;

use crate::clock::{render_frame, TimeSource};
use crate::core::Console;
use crate::error::Result;
use crate::lifecycle::{CallbackKind, LifecycleEvent, ProcessHost};
use crate::present::{FrameHeap, Presenter, ScreenDriver};

/// Message written once the host asks the application to exit
pub const EXIT_MESSAGE: &str = "Leaving the app...";

pub struct ClockApp<D, H, T> {
    console: Console<D>,
    host: H,
    clock: T,
    interval: Duration,
    frames: u64,
}

impl<D, H, T> ClockApp<D, H, T>
where
    D: ScreenDriver,
    H: ProcessHost,
    T: TimeSource,
{
    /// Build the surfaces, take the foreground and register the lifecycle
    /// callbacks.
    pub fn init(config: &Config, driver: D, mut host: H, clock: T) -> Result<Self> {
        config.validate()?;
        let surfaces = config.build_surfaces()?;
        let presenter = Presenter::new(driver, FrameHeap::new(config.heap_capacity));
        let mut console = Console::new(surfaces, presenter);

        console.clear();
        console.acquire_foreground()?;

        host.register(CallbackKind::Acquire, config.callback_priority);
        host.register(CallbackKind::Release, config.callback_priority);

        tracing::info!(
            surfaces = console.surfaces().len(),
            interval_ms = config.interval_ms,
            "clock initialized"
        );

        Ok(Self {
            console,
            host,
            clock,
            interval: Duration::from_millis(config.interval_ms),
            frames: 0,
        })
    }

    pub fn console(&self) -> &Console<D> {
        &self.console
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply one host transition
    pub fn handle(&mut self, event: LifecycleEvent) -> Result<()> {
        tracing::debug!(?event, frame = self.frames, "lifecycle event");
        match event {
            LifecycleEvent::Acquire => self.console.acquire_foreground(),
            LifecycleEvent::Release => {
                self.console.release_foreground();
                Ok(())
            }
        }
    }

    /// Clear both consoles and draw the current time
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.console.clear();
        render_frame(&mut self.console, &now);
        self.frames += 1;
    }

    /// Run until the host asks to exit
    pub fn run(&mut self) -> Result<()> {
        self.run_with(|_| Ok(()))
    }

    /// Run until the host asks to exit, calling `on_frame` after each frame
    pub fn run_with<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&Console<D>) -> Result<()>,
    {
        while self.host.is_running() {
            while let Some(event) = self.host.poll() {
                self.handle(event)?;
            }

            self.tick();
            on_frame(&self.console)?;

            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
        Ok(())
    }

    /// Write the exit message, unregister the callbacks and give up the
    /// display. Returns the console for inspection.
    pub fn shutdown(mut self) -> Console<D> {
        writeln!(self.console);
        self.console.print(EXIT_MESSAGE);

        self.host.clear_callbacks();
        self.console.release_foreground();
        tracing::info!(frames = self.frames, "clock shut down");
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{CalendarTime, FixedClock};
    use crate::lifecycle::ScriptedHost;
    use crate::present::{DriverCall, RecordingDriver};

    fn config() -> Config {
        Config {
            interval_ms: 0,
            ..Config::default()
        }
    }

    fn app(script: &str) -> ClockApp<RecordingDriver, ScriptedHost, FixedClock> {
        let host: ScriptedHost = script.parse().unwrap();
        let clock = FixedClock(CalendarTime::from_unix(1_700_000_000, 0).unwrap());
        ClockApp::init(&config(), RecordingDriver::new(1024), host, clock).unwrap()
    }

    #[test]
    fn test_init_registers_callbacks() {
        let app = app("");
        assert!(app.console().is_foreground());
        assert_eq!(
            app.host().registrations(),
            &[(CallbackKind::Acquire, 100), (CallbackKind::Release, 100)]
        );
    }

    #[test]
    fn test_tick_draws_time() {
        let mut app = app("");
        app.tick();
        let s = app.console().surface(1).unwrap();
        assert_eq!(s.row_text(9).unwrap().trim_end(), "Date: 14:11:2023");
        assert_eq!(s.row_text(10).unwrap().trim_end(), "Time: 22:13:20");
        assert_eq!(app.frames(), 1);
    }

    #[test]
    fn test_run_until_exit() {
        let mut app = app("exit@3");
        app.run().unwrap();
        assert_eq!(app.frames(), 3);
    }

    #[test]
    fn test_zero_frame_limit_runs_until_host_exits() {
        let host = "exit@5".parse::<ScriptedHost>().unwrap().with_frame_limit(0);
        let clock = FixedClock(CalendarTime::default());
        let mut app = ClockApp::init(&config(), RecordingDriver::new(1024), host, clock).unwrap();
        app.run().unwrap();
        assert_eq!(app.frames(), 5);
        assert_eq!(app.console().presenter().redraw_count(), 1 + 5 * 6);
    }

    #[test]
    fn test_background_frames_skip_hardware() {
        let mut app = app("release@1,acquire@3,exit@4");
        let mut seen = Vec::new();
        app.run_with(|console| {
            seen.push(console.is_foreground());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![true, false, false, true]);
    }

    #[test]
    fn test_shutdown() {
        let mut app = app("exit@1");
        app.run().unwrap();
        let console = app.shutdown();

        assert!(!console.is_foreground());
        assert_eq!(console.presenter().heap().used(), 0);
        let s = console.surface(0).unwrap();
        assert_eq!(s.row_text(12).unwrap().trim_end(), EXIT_MESSAGE);

        // Exit message reached the screen before release
        let last_put = console
            .presenter()
            .driver()
            .calls()
            .iter()
            .rev()
            .find_map(|call| match call {
                DriverCall::PutText { screen, row: 12, text, .. } if *screen == s.screen() => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_put.trim_end(), EXIT_MESSAGE);
    }

    #[test]
    fn test_acquire_failure_is_reported() {
        let cfg = Config {
            heap_capacity: 16,
            ..config()
        };
        let host = ScriptedHost::default();
        let clock = FixedClock(CalendarTime::default());
        let result = ClockApp::init(&cfg, RecordingDriver::new(1024), host, clock);
        assert!(matches!(result, Err(crate::Error::Allocation { .. })));
    }
}
