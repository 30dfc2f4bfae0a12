//! Process lifecycle
//!
//! The host process model grants and revokes display ownership. Callbacks
//! are registered once with a priority; the host then reports pending
//! transitions between iterations of the main loop.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Priority the console registers its callbacks with
pub const CONSOLE_CALLBACK_PRIORITY: u32 = 100;

/// Which lifecycle callback a registration is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Acquire,
    Release,
}

/// A foreground transition delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The application now owns the display
    Acquire,
    /// The application must give the display back
    Release,
}

impl LifecycleEvent {
    fn kind(self) -> CallbackKind {
        match self {
            LifecycleEvent::Acquire => CallbackKind::Acquire,
            LifecycleEvent::Release => CallbackKind::Release,
        }
    }
}

/// Host process-management collaborator
pub trait ProcessHost {
    fn register(&mut self, kind: CallbackKind, priority: u32);

    /// Drop every registration
    fn clear_callbacks(&mut self);

    /// Pump host messages for one loop iteration. Returns false once the
    /// process has been asked to exit.
    fn is_running(&mut self) -> bool;

    /// Next transition for a registered callback, if any
    fn poll(&mut self) -> Option<LifecycleEvent>;
}

/// One step of a lifecycle script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    Event(LifecycleEvent),
    Exit,
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptAction::Event(LifecycleEvent::Acquire) => write!(f, "acquire"),
            ScriptAction::Event(LifecycleEvent::Release) => write!(f, "release"),
            ScriptAction::Exit => write!(f, "exit"),
        }
    }
}

/// A host that replays a fixed list of actions keyed by loop iteration.
///
/// Script syntax is a comma-separated list of `action@frame`, where action
/// is `acquire`, `release` or `exit`, e.g. `release@10,acquire@20,exit@30`.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    /// Pending actions ordered by frame
    script: VecDeque<(u64, ScriptAction)>,
    /// Stop after this many iterations
    frame_limit: Option<u64>,
    frame: u64,
    pending: VecDeque<LifecycleEvent>,
    registered: Vec<(CallbackKind, u32)>,
    exited: bool,
}

impl ScriptedHost {
    pub fn new(mut script: Vec<(u64, ScriptAction)>) -> Self {
        script.sort_by_key(|&(frame, _)| frame);
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    /// Stop after `frames` iterations; 0 leaves the run unbounded
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = (frames > 0).then_some(frames);
        self
    }

    /// Iterations started so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn registrations(&self) -> &[(CallbackKind, u32)] {
        &self.registered
    }

    fn is_registered(&self, kind: CallbackKind) -> bool {
        self.registered.iter().any(|&(k, _)| k == kind)
    }
}

impl FromStr for ScriptedHost {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (action, frame) = item
                .split_once('@')
                .ok_or_else(|| Error::Config(format!("script step '{}' lacks '@frame'", item)))?;
            let action = match action.trim().to_lowercase().as_str() {
                "acquire" => ScriptAction::Event(LifecycleEvent::Acquire),
                "release" => ScriptAction::Event(LifecycleEvent::Release),
                "exit" => ScriptAction::Exit,
                other => return Err(Error::Config(format!("unknown script action '{}'", other))),
            };
            let frame = frame
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("bad frame number in '{}'", item)))?;
            steps.push((frame, action));
        }
        Ok(Self::new(steps))
    }
}

impl ProcessHost for ScriptedHost {
    fn register(&mut self, kind: CallbackKind, priority: u32) {
        tracing::debug!(?kind, priority, "callback registered");
        self.registered.push((kind, priority));
    }

    fn clear_callbacks(&mut self) {
        self.registered.clear();
        self.pending.clear();
    }

    fn is_running(&mut self) -> bool {
        if self.exited {
            return false;
        }
        if self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            self.exited = true;
            return false;
        }

        while let Some(&(at, action)) = self.script.front() {
            if at > self.frame {
                break;
            }
            self.script.pop_front();
            match action {
                ScriptAction::Exit => {
                    self.exited = true;
                    return false;
                }
                ScriptAction::Event(event) if self.is_registered(event.kind()) => {
                    self.pending.push_back(event);
                }
                ScriptAction::Event(event) => {
                    tracing::debug!(?event, "dropped event with no registered callback");
                }
            }
        }

        self.frame += 1;
        true
    }

    fn poll(&mut self) -> Option<LifecycleEvent> {
        self.pending.pop_front()
    }
}
