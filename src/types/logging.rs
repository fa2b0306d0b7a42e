use std::fmt::{self, Display};

use crate::data_structures::ActionList;
use crate::moves::Action;
use crate::state::TrialStatus;
use crate::zobrist_hash::HashValue;

use super::report::Diagnostic;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Load-time analysis finished; `static_nodes` subtrees had their value cached.
    Preprocessed { static_nodes: usize },
    Diagnostic(Diagnostic),
    MoveApplied { mover: u8, actions: ActionList<Action> },
    MoveUndone { mover: u8, actions: ActionList<Action> },
    RepetitionRejected { mover: u8, hash: HashValue },
    ResultDecided(TrialStatus),
}

impl Event {
    pub fn indent_level(&self) -> u8 {
        match self {
            Event::Preprocessed { .. } => 0,
            Event::Diagnostic(..) => 1,
            Event::MoveApplied { .. } => 0,
            Event::MoveUndone { .. } => 0,
            Event::RepetitionRejected { .. } => 1,
            Event::ResultDecided(..) => 0,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Preprocessed { static_nodes } => write!(f, "Preprocessed: {static_nodes} static subtrees cached"),
            Event::Diagnostic(d) => write!(f, "{d}"),
            Event::MoveApplied { mover, actions } => {
                write!(f, "P{mover} applied")?;
                for a in actions {
                    write!(f, " {a:?}")?;
                }
                Ok(())
            }
            Event::MoveUndone { mover, actions } => write!(f, "P{mover} undone ({} actions)", actions.len()),
            Event::RepetitionRejected { mover, hash } => {
                write!(f, "P{mover}: move rejected, repeats state {hash:#x}")
            }
            Event::ResultDecided(status) => write!(f, "Result: {status:?}"),
        }
    }
}

/// In-memory event log. Events are dropped unless `enabled` is set.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    pub enabled: bool,
    pub events: Vec<Event>,
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("enabled", &self.enabled)
            .field("events", &self.events.len())
            .finish()
    }
}

impl EventLog {
    pub fn new(enabled: bool) -> EventLog {
        Self {
            enabled,
            events: vec![],
        }
    }

    #[inline]
    pub fn log(&mut self, event: Event) {
        if self.enabled {
            self.events.push(event)
        }
    }

    /// Like `log`, but only builds the event when logging is enabled.
    #[inline]
    pub fn log_with<F: FnOnce() -> Event>(&mut self, f: F) {
        if self.enabled {
            self.events.push(f())
        }
    }

    pub fn print(&self) {
        for event in &self.events {
            let prefix = " ".repeat(2 * Into::<usize>::into(event.indent_level()));
            println!("{prefix}{event}");
        }
    }

    pub fn filter<T, F: Fn(&Event) -> Option<T>>(&self, f: F) -> Vec<T> {
        let mut res = vec![];
        for e in &self.events {
            if let Some(v) = f(e) {
                res.push(v);
            }
        }
        res
    }
}
