use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};
use serde::{Deserialize, Serialize};

use crate::num::JsNumber;
use crate::operator::OperatorName;

use super::func::Func;
use super::node::Node;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Clone, Debug, Drive, DriveMut, From, Serialize, Deserialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  // Also sequences (`Comma`) and every assignment operator.
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitUndefined(Node<LitUndefinedExpr>),
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct CallExpr {
  // `new callee(...)`.
  #[drive(skip)]
  #[serde(default)]
  pub construct: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ComputedMemberExpr {
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct FuncExpr {
  #[drive(skip)]
  pub name: Option<String>,
  pub func: Node<Func>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct MemberExpr {
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ThisExpr {}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Empty,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitNullExpr {}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub value: String, // Including delimiter slashes and any flags.
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitUndefinedExpr {}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  pub value: ObjMemberValue,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize, Deserialize)]
pub enum ObjMemberValue {
  Prop(Node<Expr>),
  Getter(Node<Func>),
  Setter(Node<Func>),
}
