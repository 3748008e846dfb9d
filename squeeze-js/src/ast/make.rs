//! Shorthand constructors for tree nodes.
//!
//! Every constructor takes the `Loc` the new node should carry; rewrites pass
//! the location of the node being replaced.

use super::expr::{
  BinaryExpr, CallExpr, ComputedMemberExpr, CondExpr, Expr, FuncExpr, IdExpr, LitBoolExpr,
  LitNullExpr, LitNumExpr, LitStrExpr, LitUndefinedExpr, MemberExpr, UnaryExpr,
};
use super::func::{Func, ParamDecl};
use super::node::Node;
use super::stmt::{
  BlockStmt, BreakStmt, ContinueStmt, EmptyStmt, ExprStmt, FuncDecl, IfStmt, LabelStmt,
  ReturnStmt, Stmt, ThrowStmt, VarDecl, VarDeclMode, VarDeclarator,
};
use super::stx::TopLevel;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::operator::OperatorName;

/// Placeholder used with `std::mem::replace` while a child is moved out.
pub fn dummy_expr() -> Node<Expr> {
  lit_undefined(Loc::default())
}

pub fn binary(loc: Loc, operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Binary(Node::new(loc, BinaryExpr {
      operator,
      left,
      right,
    })),
  )
}

pub fn unary(loc: Loc, operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Unary(Node::new(loc, UnaryExpr { operator, argument })),
  )
}

pub fn cond(loc: Loc, test: Node<Expr>, consequent: Node<Expr>, alternate: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Cond(Node::new(loc, CondExpr {
      test,
      consequent,
      alternate,
    })),
  )
}

pub fn call(loc: Loc, callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Call(Node::new(loc, CallExpr {
      construct: false,
      callee,
      arguments,
    })),
  )
}

pub fn member(loc: Loc, left: Node<Expr>, right: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Member(Node::new(loc, MemberExpr {
      left,
      right: right.into(),
    })),
  )
}

pub fn computed_member(loc: Loc, object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::ComputedMember(Node::new(loc, ComputedMemberExpr { object, member })),
  )
}

pub fn func_expr(loc: Loc, name: Option<&str>, parameters: &[&str], body: Vec<Node<Stmt>>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::Func(Node::new(loc, FuncExpr {
      name: name.map(str::to_string),
      func: func(loc, parameters, body),
    })),
  )
}

pub fn id(loc: Loc, name: impl Into<String>) -> Node<Expr> {
  Node::new(loc, Expr::Id(Node::new(loc, IdExpr { name: name.into() })))
}

pub fn lit_bool(loc: Loc, value: bool) -> Node<Expr> {
  Node::new(loc, Expr::LitBool(Node::new(loc, LitBoolExpr { value })))
}

pub fn lit_null(loc: Loc) -> Node<Expr> {
  Node::new(loc, Expr::LitNull(Node::new(loc, LitNullExpr {})))
}

pub fn lit_num(loc: Loc, value: f64) -> Node<Expr> {
  Node::new(
    loc,
    Expr::LitNum(Node::new(loc, LitNumExpr {
      value: JsNumber(value),
    })),
  )
}

pub fn lit_str(loc: Loc, value: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    Expr::LitStr(Node::new(loc, LitStrExpr {
      value: value.into(),
    })),
  )
}

pub fn lit_undefined(loc: Loc) -> Node<Expr> {
  Node::new(loc, Expr::LitUndefined(Node::new(loc, LitUndefinedExpr {})))
}

pub fn func(loc: Loc, parameters: &[&str], body: Vec<Node<Stmt>>) -> Node<Func> {
  Node::new(loc, Func {
    parameters: parameters
      .iter()
      .map(|name| Node::new(loc, ParamDecl {
        name: name.to_string(),
      }))
      .collect(),
    body,
  })
}

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  let loc = expr.loc;
  Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr })))
}

pub fn empty_stmt(loc: Loc) -> Node<Stmt> {
  Node::new(loc, Stmt::Empty(Node::new(loc, EmptyStmt {})))
}

pub fn block(loc: Loc, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  Node::new(loc, Stmt::Block(Node::new(loc, BlockStmt { body })))
}

pub fn if_stmt(loc: Loc, test: Node<Expr>, consequent: Node<Stmt>, alternate: Option<Node<Stmt>>) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::If(Node::new(loc, IfStmt {
      test,
      consequent,
      alternate,
    })),
  )
}

pub fn return_stmt(loc: Loc, value: Option<Node<Expr>>) -> Node<Stmt> {
  Node::new(loc, Stmt::Return(Node::new(loc, ReturnStmt { value })))
}

pub fn throw_stmt(loc: Loc, value: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, Stmt::Throw(Node::new(loc, ThrowStmt { value })))
}

pub fn break_stmt(loc: Loc, label: Option<&str>) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::Break(Node::new(loc, BreakStmt {
      label: label.map(str::to_string),
    })),
  )
}

pub fn continue_stmt(loc: Loc, label: Option<&str>) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::Continue(Node::new(loc, ContinueStmt {
      label: label.map(str::to_string),
    })),
  )
}

pub fn label_stmt(loc: Loc, name: impl Into<String>, statement: Node<Stmt>) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::Label(Node::new(loc, LabelStmt {
      name: name.into(),
      statement,
    })),
  )
}

pub fn var_decl(loc: Loc, mode: VarDeclMode, declarators: Vec<(&str, Option<Node<Expr>>)>) -> Node<Stmt> {
  let declarators = declarators
    .into_iter()
    .map(|(name, initializer)| VarDeclarator {
      name: name.to_string(),
      initializer,
    })
    .collect();
  Node::new(
    loc,
    Stmt::VarDecl(Node::new(loc, VarDecl { mode, declarators })),
  )
}

pub fn func_decl(loc: Loc, name: impl Into<String>, parameters: &[&str], body: Vec<Node<Stmt>>) -> Node<Stmt> {
  Node::new(
    loc,
    Stmt::FunctionDecl(Node::new(loc, FuncDecl {
      name: name.into(),
      function: func(loc, parameters, body),
    })),
  )
}

pub fn top_level(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  let loc = body
    .iter()
    .map(|stmt| stmt.loc)
    .reduce(Loc::extend)
    .unwrap_or_default();
  Node::new(loc, TopLevel { body })
}
