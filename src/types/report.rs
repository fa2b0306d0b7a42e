use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// The rule references equipment or configuration the game does not have.
    MissingRequirement,
    /// The rule is guaranteed to fail when evaluated.
    WillCrash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub ludeme: String,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::MissingRequirement => "missing requirement",
            DiagnosticKind::WillCrash => "will crash",
        };
        write!(f, "{:?} ({kind}) in ({}): {}", self.severity, self.ludeme, self.message)
    }
}

/// Diagnostics gathered while validating a compiled game.
/// Validation never stops at the first problem; the loader inspects the whole report.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_requirement<S: Into<String>>(&mut self, ludeme: &str, message: S) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::MissingRequirement,
            ludeme: ludeme.to_string(),
            message: message.into(),
        });
    }

    pub fn add_crash<S: Into<String>>(&mut self, ludeme: &str, message: S) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::WillCrash,
            ludeme: ludeme.to_string(),
            message: message.into(),
        });
    }

    pub fn add_warning<S: Into<String>>(&mut self, ludeme: &str, kind: DiagnosticKind, message: S) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            ludeme: ludeme.to_string(),
            message: message.into(),
        });
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
