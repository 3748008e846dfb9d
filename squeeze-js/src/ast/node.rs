use crate::loc::Loc;
use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Formatter};

#[derive(Clone, Drive, DriveMut, Serialize, Deserialize)]
pub struct Node<S: Drive + DriveMut> {
  // Copied from whatever node a rewrite was derived from, never invented.
  #[drive(skip)]
  #[serde(default)]
  pub loc: Loc,
  pub stx: Box<S>,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
    }
  }

  /// Creates a new node with unrelated syntax that inherits this node's location.
  pub fn derive<T: Drive + DriveMut>(&self, stx: T) -> Node<T> {
    Node::new(self.loc, stx)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}
