//! Text Console
//!
//! Owns the ordered set of surfaces and the presenter that shows them.
//! Every character written goes to every surface; each public mutation
//! ends with exactly one redraw.

use std::fmt::{self, Write as _};

use super::snapshot::{Snapshot, SurfaceSnapshot};
use super::surface::Surface;
use crate::error::Result;
use crate::present::{Presenter, ScreenDriver};

pub struct Console<D> {
    surfaces: Vec<Surface>,
    presenter: Presenter<D>,
}

impl<D: ScreenDriver> Console<D> {
    /// Create a console over `surfaces`. The presenter starts in the
    /// background; call [`Console::acquire_foreground`] to show anything.
    pub fn new(surfaces: Vec<Surface>, presenter: Presenter<D>) -> Self {
        Self {
            surfaces,
            presenter,
        }
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn surface(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter<D> {
        &mut self.presenter
    }

    pub fn is_foreground(&self) -> bool {
        self.presenter.is_foreground()
    }

    /// Blank every surface, home every cursor, redraw
    pub fn clear(&mut self) {
        for surface in &mut self.surfaces {
            surface.clear();
        }
        self.redraw();
    }

    /// Append `text` to every surface, then redraw once
    pub fn print(&mut self, text: &str) {
        for c in text.chars() {
            for surface in &mut self.surfaces {
                surface.write_char(c);
            }
        }
        self.redraw();
    }

    /// Format `args` and append the result to every surface, then redraw
    /// once. If formatting fails nothing is appended.
    ///
    /// Being an inherent `write_fmt`, this is what `write!(console, ...)`
    /// calls.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut text = String::new();
        if text.write_fmt(args).is_err() {
            tracing::warn!("formatting failed, nothing written");
            self.redraw();
            return;
        }
        self.print(&text);
    }

    /// Push the current grids to the screens
    pub fn redraw(&mut self) {
        self.presenter.redraw(&self.surfaces);
    }

    pub fn acquire_foreground(&mut self) -> Result<()> {
        self.presenter.acquire_foreground(&self.surfaces)
    }

    pub fn release_foreground(&mut self) {
        self.presenter.release_foreground();
    }

    /// Capture the console state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            foreground: self.presenter.is_foreground(),
            redraws: self.presenter.redraw_count(),
            surfaces: self.surfaces.iter().map(SurfaceSnapshot::from).collect(),
        }
    }
}
