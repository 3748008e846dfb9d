use serde::{Deserialize, Serialize};
use std::cmp::{max, min};

/// A half-open range of UTF-8 byte offsets into the original source.
///
/// Rewrites never invent locations: every node produced by the compressor
/// copies the `Loc` of the node it was derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(self, other: Loc) -> Loc {
    Loc(min(self.0, other.0), max(self.1, other.1))
  }

  /// 1-based line and column of the start offset. Columns count chars, not bytes.
  pub fn line_col(&self, source: &str) -> (usize, usize) {
    let end = min(self.0, source.len());
    let mut line = 1;
    let mut col = 1;
    for c in source
      .char_indices()
      .take_while(|(i, _)| *i < end)
      .map(|(_, c)| c)
    {
      if c == '\n' {
        line += 1;
        col = 1;
      } else {
        col += 1;
      }
    }
    (line, col)
  }
}

#[cfg(test)]
mod tests {
  use super::Loc;

  #[test]
  fn test_extend() {
    assert_eq!(Loc(4, 9).extend(Loc(2, 5)), Loc(2, 9));
  }

  #[test]
  fn test_line_col() {
    let src = "a();\nreturn;\n  x";
    assert_eq!(Loc(0, 1).line_col(src), (1, 1));
    assert_eq!(Loc(5, 11).line_col(src), (2, 1));
    assert_eq!(Loc(15, 16).line_col(src), (3, 3));
    assert_eq!(Loc(500, 501).line_col(src), (3, 4));
  }
}
