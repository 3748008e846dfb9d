use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;

#[derive(Debug)]
pub enum SqueezeError {
  Io(io::Error),
  Deserialize(serde_json::Error),
  UnknownOption(String),
}

impl Display for SqueezeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      SqueezeError::Io(err) => write!(f, "I/O error: {err}"),
      SqueezeError::Deserialize(err) => write!(f, "malformed syntax tree: {err}"),
      SqueezeError::UnknownOption(name) => write!(f, "`{name}` is not a supported option"),
    }
  }
}

impl std::error::Error for SqueezeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SqueezeError::Io(err) => Some(err),
      SqueezeError::Deserialize(err) => Some(err),
      SqueezeError::UnknownOption(_) => None,
    }
  }
}

impl From<io::Error> for SqueezeError {
  fn from(value: io::Error) -> Self {
    SqueezeError::Io(value)
  }
}

impl From<serde_json::Error> for SqueezeError {
  fn from(value: serde_json::Error) -> Self {
    SqueezeError::Deserialize(value)
  }
}
