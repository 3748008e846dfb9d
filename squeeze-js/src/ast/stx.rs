use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};

use super::node::Node;
use super::stmt::Stmt;

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
