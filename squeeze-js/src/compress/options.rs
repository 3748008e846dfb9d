use crate::err::SqueezeError;
use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionName {
  /// Join adjacent expression statements with the comma operator.
  Sequences,
  /// Rewrite `a["b"]` as `a.b`.
  Properties,
  /// Drop statements after an unconditional jump.
  DeadCode,
  DropDebugger,
  /// Reserved for rewrites that assume builtins are unmodified. Accepted but
  /// currently unused.
  Unsafe,
  /// Restructure `if` statements and conditional expressions.
  Conditionals,
  /// Flip relational operators when negating (`!(a < b)` becomes `a >= b`),
  /// which is not equivalent when an operand is NaN.
  Comparations,
  /// Fold constant expressions.
  Evaluate,
  Warnings,
}

impl OptionName {
  pub const ALL: [OptionName; 9] = [
    OptionName::Sequences,
    OptionName::Properties,
    OptionName::DeadCode,
    OptionName::DropDebugger,
    OptionName::Unsafe,
    OptionName::Conditionals,
    OptionName::Comparations,
    OptionName::Evaluate,
    OptionName::Warnings,
  ];

  pub const fn as_str(self) -> &'static str {
    match self {
      OptionName::Sequences => "sequences",
      OptionName::Properties => "properties",
      OptionName::DeadCode => "dead_code",
      OptionName::DropDebugger => "drop_debugger",
      OptionName::Unsafe => "unsafe",
      OptionName::Conditionals => "conditionals",
      OptionName::Comparations => "comparations",
      OptionName::Evaluate => "evaluate",
      OptionName::Warnings => "warnings",
    }
  }
}

impl fmt::Display for OptionName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OptionName {
  type Err = SqueezeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OptionName::ALL
      .into_iter()
      .find(|name| name.as_str() == s)
      .ok_or_else(|| SqueezeError::UnknownOption(s.to_string()))
  }
}

/// Resolved option set. Built once per run and never mutated while compressing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressOptions {
  pub sequences: bool,
  pub properties: bool,
  pub dead_code: bool,
  pub drop_debugger: bool,
  #[serde(rename = "unsafe")]
  pub unsafe_: bool,
  pub conditionals: bool,
  pub comparations: bool,
  pub evaluate: bool,
  pub warnings: bool,
}

impl Default for CompressOptions {
  fn default() -> Self {
    CompressOptions::all(true)
  }
}

impl CompressOptions {
  pub fn all(enabled: bool) -> Self {
    CompressOptions {
      sequences: enabled,
      properties: enabled,
      dead_code: enabled,
      drop_debugger: enabled,
      unsafe_: enabled,
      conditionals: enabled,
      comparations: enabled,
      evaluate: enabled,
      warnings: enabled,
    }
  }

  /// Applies `overrides` on top of a table where every option is enabled, or
  /// disabled if `false_by_default` is set.
  pub fn from_overrides(
    overrides: &HashMap<String, bool>,
    false_by_default: bool,
  ) -> Result<Self, SqueezeError> {
    let mut options = CompressOptions::all(!false_by_default);
    for (name, value) in overrides.iter() {
      options.set(name.parse()?, *value);
    }
    Ok(options)
  }

  pub fn with(mut self, name: OptionName, enabled: bool) -> Self {
    self.set(name, enabled);
    self
  }

  pub fn set(&mut self, name: OptionName, enabled: bool) {
    *self.slot(name) = enabled;
  }

  pub fn is_enabled(&self, name: OptionName) -> bool {
    match name {
      OptionName::Sequences => self.sequences,
      OptionName::Properties => self.properties,
      OptionName::DeadCode => self.dead_code,
      OptionName::DropDebugger => self.drop_debugger,
      OptionName::Unsafe => self.unsafe_,
      OptionName::Conditionals => self.conditionals,
      OptionName::Comparations => self.comparations,
      OptionName::Evaluate => self.evaluate,
      OptionName::Warnings => self.warnings,
    }
  }

  fn slot(&mut self, name: OptionName) -> &mut bool {
    match name {
      OptionName::Sequences => &mut self.sequences,
      OptionName::Properties => &mut self.properties,
      OptionName::DeadCode => &mut self.dead_code,
      OptionName::DropDebugger => &mut self.drop_debugger,
      OptionName::Unsafe => &mut self.unsafe_,
      OptionName::Conditionals => &mut self.conditionals,
      OptionName::Comparations => &mut self.comparations,
      OptionName::Evaluate => &mut self.evaluate,
      OptionName::Warnings => &mut self.warnings,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ahash::HashMapExt;

  #[test]
  fn test_defaults_enable_everything() {
    let options = CompressOptions::default();
    assert!(OptionName::ALL.iter().all(|name| options.is_enabled(*name)));
  }

  #[test]
  fn test_overrides_apply_over_defaults() {
    let mut overrides = HashMap::new();
    overrides.insert("dead_code".to_string(), false);
    let options = CompressOptions::from_overrides(&overrides, false).unwrap();
    assert!(!options.dead_code);
    assert!(options.sequences);

    overrides.insert("evaluate".to_string(), true);
    let options = CompressOptions::from_overrides(&overrides, true).unwrap();
    assert!(options.evaluate);
    assert!(!options.sequences);
    assert!(!options.warnings);
  }

  #[test]
  fn test_unknown_option_is_rejected() {
    let mut overrides = HashMap::new();
    overrides.insert("mangle".to_string(), true);
    let err = CompressOptions::from_overrides(&overrides, false).unwrap_err();
    assert_eq!(err.to_string(), "`mangle` is not a supported option");
  }

  #[test]
  fn test_option_names_round_trip() {
    for name in OptionName::ALL {
      assert_eq!(name.as_str().parse::<OptionName>().unwrap(), name);
    }
  }
}
