use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};

use super::node::Node;
use super::stmt::Stmt;

// Shared by function declarations, function expressions and object accessors.
#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct Func {
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub name: String,
}
