use crate::emit::Render;

/// Picks whichever candidate renders shorter. `a` only wins with a strictly
/// shorter rendering, so equal lengths return `b`.
pub fn best_of<R: Render>(a: R, b: R) -> R {
  let a_len = a.render_minified().len();
  let b_len = b.render_minified().len();
  tracing::trace!(a_len, b_len, "comparing candidates");
  if a_len < b_len {
    a
  } else {
    b
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::make::*;
  use crate::loc::Loc;

  #[test]
  fn test_shorter_wins() {
    let short = id(Loc(0, 1), "a");
    let long = id(Loc(2, 5), "abc");
    assert_eq!(best_of(short.clone(), long.clone()).loc, Loc(0, 1));
    assert_eq!(best_of(long, short).loc, Loc(0, 1));
  }

  #[test]
  fn test_tie_returns_second() {
    let first = id(Loc(0, 1), "a");
    let second = id(Loc(4, 5), "b");
    assert_eq!(best_of(first, second).loc, Loc(4, 5));
  }
}
