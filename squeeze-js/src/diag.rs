//! Findings reported while compressing. None of them stop a rewrite.

use crate::loc::Loc;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

pub const CONDITION_ALWAYS_TRUE: &str = "SQ0001";
pub const CONDITION_ALWAYS_FALSE: &str = "SQ0002";
pub const UNREACHABLE_DECLARATION: &str = "SQ0003";
pub const LABEL_REMOVED: &str = "SQ0004";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
  Note,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Loc,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(severity: Severity, code: &'static str, message: impl Into<String>, primary: Loc) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      notes: Vec::new(),
    }
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Loc) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn note(code: &'static str, message: impl Into<String>, primary: Loc) -> Self {
    Self::new(Severity::Note, code, message, primary)
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  /// Single-line rendering. Positions are `[line,col]` when the source text is
  /// known, and the raw byte range otherwise.
  pub fn render(&self, source: Option<&str>) -> String {
    let position = match source {
      Some(source) => {
        let (line, col) = self.primary.line_col(source);
        format!("[{line},{col}]")
      }
      None => format!("[{}..{}]", self.primary.0, self.primary.1),
    };
    let mut out = format!(
      "{}[{}]: {} {}",
      self.severity, self.code, self.message, position
    );
    for note in self.notes.iter() {
      out.push_str("\n  = note: ");
      out.push_str(note);
    }
    out
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.render(None))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render() {
    let diag = Diagnostic::warning(UNREACHABLE_DECLARATION, "Declarations in unreachable code!", Loc(8, 20));
    assert_eq!(
      diag.render(Some("return;\nvar y = f();")),
      "warning[SQ0003]: Declarations in unreachable code! [2,1]"
    );
    assert_eq!(
      diag.with_note("initializer dropped").to_string(),
      "warning[SQ0003]: Declarations in unreachable code! [8..20]\n  = note: initializer dropped"
    );
  }
}
