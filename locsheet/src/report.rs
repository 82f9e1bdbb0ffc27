//! Run diagnostics.
//!
//! Recoverable anomalies (duplicate keys, prefix conflicts, unbound
//! placeholders in secondary languages, non-primary-language content) are
//! accumulated here while the conversion keeps going. Fatal conditions travel
//! as [`crate::error::Error`] instead.

use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Severity marker for a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// One diagnostic line, rendered as `[Warning] message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Diagnostics collected over one conversion run.
///
/// Owned by the orchestrator and threaded through the phases; nothing here is
/// static or shared between runs.
#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    sheets_processed: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub(crate) fn sheet_processed(&mut self, name: &str) {
        self.sheets_processed.push(name.to_string());
    }

    /// Sheet names that passed column validation, in processing order.
    pub fn sheets_processed(&self) -> &[String] {
        &self.sheets_processed
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    /// Writes all diagnostics to a log stream, one line per diagnostic.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(writer, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let mut report = Report::new();
        report.warn("duplicated Android key: greeting");
        assert_eq!(
            report.diagnostics()[0].to_string(),
            "[Warning] duplicated Android key: greeting"
        );
        assert!(report.has_warnings());
    }

    #[test]
    fn test_error_display() {
        let fatal = Diagnostic {
            severity: Severity::Error,
            message: "reference cycle through `a`".to_string(),
        };
        assert_eq!(fatal.to_string(), "[Error] reference cycle through `a`");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert!(!report.has_warnings());
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn test_write_to() {
        let mut report = Report::new();
        report.warn("first");
        report.warn("second");
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "[Warning] first\n[Warning] second\n");
    }
}
