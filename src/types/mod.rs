pub mod concepts;
pub mod enums;
pub mod eval_context_data;
pub mod game_flags;
pub mod logging;
pub mod region;
pub mod report;

pub use concepts::{Concept, Concepts};
pub use enums::*;
pub use eval_context_data::{ContextFields, EvalContext, EvalContextData};
pub use game_flags::{GameFlag, GameFlags};
pub use region::{IntArray, Region};
pub use report::{Diagnostic, DiagnosticKind, Report, Severity};

/// Sentinel for "no site" and undefined integer results.
pub const OFF: i32 = -1;
