//! Per-node rewrite rules.
//!
//! Children are always rewritten before the rule for their parent runs, and
//! every node with children is on the ancestor stack while they are.

use std::mem::{replace, take};

use derive_visitor::{Drive, Visitor};

use crate::ast::expr::{
  BinaryExpr, ComputedMemberExpr, CondExpr, Expr, LitArrElem, ObjMemberValue,
};
use crate::ast::func::Func;
use crate::ast::make;
use crate::ast::node::Node;
use crate::ast::stmt::{
  BreakStmt, ContinueStmt, EmptyStmt, ForInLhs, ForTripleStmtInit, IfStmt, LabelStmt, Stmt,
  VarDecl,
};
use crate::diag::{Diagnostic, CONDITION_ALWAYS_FALSE, CONDITION_ALWAYS_TRUE, LABEL_REMOVED};
use crate::emit::ends_with_open_if;
use crate::ident::is_plain_identifier;
use crate::loc::Loc;
use crate::operator::OperatorName;

use super::best_of::best_of;
use super::eval::{coerce_to_bool, evaluate, Evaluation};
use super::negate::negate;
use super::predicates::{is_boolean, is_string};
use super::tighten::{
  collect_hoisted, eliminate_spurious_blocks, is_required_block, tighten_body, HoistedDecl,
};
use super::{Ancestor, Compressor, NodeKind};

pub fn squeeze_stmt(stmt: Node<Stmt>, cx: &mut Compressor) -> Node<Stmt> {
  match NodeKind::of_stmt(&stmt.stx) {
    Some(kind) => cx.with_ancestor(Ancestor::new(kind, stmt.loc), |cx| {
      squeeze_stmt_children(stmt, cx)
    }),
    None => squeeze_leaf_stmt(stmt, cx),
  }
}

pub fn squeeze_expr(expr: Node<Expr>, cx: &mut Compressor) -> Node<Expr> {
  match NodeKind::of_expr(&expr.stx) {
    Some(kind) => cx.with_ancestor(Ancestor::new(kind, expr.loc), |cx| {
      squeeze_expr_children(expr, cx)
    }),
    None => expr,
  }
}

fn squeeze_expr_slot(slot: &mut Node<Expr>, cx: &mut Compressor) {
  let expr = replace(slot, make::dummy_expr());
  *slot = squeeze_expr(expr, cx);
}

fn squeeze_stmt_slot(slot: &mut Node<Stmt>, cx: &mut Compressor) {
  let stmt = replace(slot, make::empty_stmt(Loc::default()));
  *slot = squeeze_stmt(stmt, cx);
}

fn squeeze_var_decl(decl: &mut Node<VarDecl>, cx: &mut Compressor) {
  for declarator in decl.stx.declarators.iter_mut() {
    if let Some(init) = &mut declarator.initializer {
      squeeze_expr_slot(init, cx);
    }
  }
}

fn squeeze_func(func: &mut Node<Func>, cx: &mut Compressor) {
  cx.with_ancestor(Ancestor::new(NodeKind::Func, func.loc), |cx| {
    let body = take(&mut func.stx.body);
    func.stx.body = tighten_body(body, cx);
  });
}

fn squeeze_leaf_stmt(stmt: Node<Stmt>, cx: &mut Compressor) -> Node<Stmt> {
  if cx.options().drop_debugger && matches!(stmt.stx.as_ref(), Stmt::Debugger(_)) {
    tracing::debug!(start = stmt.loc.0, "dropped debugger statement");
    return stmt.derive(Stmt::Empty(stmt.derive(EmptyStmt {})));
  }
  stmt
}

fn squeeze_stmt_children(stmt: Node<Stmt>, cx: &mut Compressor) -> Node<Stmt> {
  let Node { loc, stx } = stmt;
  let stx = match *stx {
    Stmt::Block(mut block) => {
      let body = tighten_body(take(&mut block.stx.body), cx);
      match <[Node<Stmt>; 1]>::try_from(body) {
        Ok([only]) if !is_required_block(std::slice::from_ref(&only)) => return only,
        Ok([only]) => block.stx.body = vec![only],
        Err(body) => block.stx.body = body,
      };
      Stmt::Block(block)
    }
    Stmt::DoWhile(mut do_while) => {
      squeeze_stmt_slot(&mut do_while.stx.body, cx);
      squeeze_expr_slot(&mut do_while.stx.condition, cx);
      Stmt::DoWhile(do_while)
    }
    Stmt::Expr(mut expr_stmt) => {
      squeeze_expr_slot(&mut expr_stmt.stx.expr, cx);
      Stmt::Expr(expr_stmt)
    }
    Stmt::ForIn(mut for_in) => {
      match &mut for_in.stx.lhs {
        ForInLhs::Decl(decl) => squeeze_var_decl(decl, cx),
        ForInLhs::Assign(target) => squeeze_expr_slot(target, cx),
      };
      squeeze_expr_slot(&mut for_in.stx.rhs, cx);
      squeeze_stmt_slot(&mut for_in.stx.body, cx);
      Stmt::ForIn(for_in)
    }
    Stmt::ForTriple(mut for_stmt) => {
      match &mut for_stmt.stx.init {
        ForTripleStmtInit::None => {}
        ForTripleStmtInit::Expr(init) => squeeze_expr_slot(init, cx),
        ForTripleStmtInit::Decl(decl) => squeeze_var_decl(decl, cx),
      };
      if let Some(cond) = &mut for_stmt.stx.cond {
        squeeze_expr_slot(cond, cx);
      }
      if let Some(post) = &mut for_stmt.stx.post {
        squeeze_expr_slot(post, cx);
      }
      squeeze_stmt_slot(&mut for_stmt.stx.body, cx);
      Stmt::ForTriple(for_stmt)
    }
    Stmt::FunctionDecl(mut decl) => {
      squeeze_func(&mut decl.stx.function, cx);
      Stmt::FunctionDecl(decl)
    }
    Stmt::If(if_stmt) => {
      let IfStmt {
        test,
        consequent,
        alternate,
      } = *if_stmt.stx;
      let test = squeeze_expr(test, cx);
      let consequent = squeeze_stmt(consequent, cx);
      let alternate = alternate.map(|alt| squeeze_stmt(alt, cx));
      return if cx.options().conditionals {
        optimize_if(loc, test, consequent, alternate, cx)
      } else {
        make_if(loc, test, consequent, alternate)
      };
    }
    Stmt::Label(label) => {
      let label_loc = label.loc;
      let LabelStmt { name, statement } = *label.stx;
      let statement = squeeze_stmt(statement, cx);
      if count_label_refs(&statement, &name) == 0 {
        cx.warn(Diagnostic::note(
          LABEL_REMOVED,
          format!("Label `{name}` removed"),
          loc,
        ));
        return statement;
      }
      Stmt::Label(Node::new(label_loc, LabelStmt { name, statement }))
    }
    Stmt::Return(mut ret) => {
      if let Some(value) = &mut ret.stx.value {
        squeeze_expr_slot(value, cx);
      }
      Stmt::Return(ret)
    }
    Stmt::Switch(mut switch) => {
      squeeze_expr_slot(&mut switch.stx.test, cx);
      for branch in switch.stx.branches.iter_mut() {
        cx.with_ancestor(Ancestor::new(NodeKind::SwitchBranch, branch.loc), |cx| {
          if let Some(case) = &mut branch.stx.case {
            squeeze_expr_slot(case, cx);
          }
          let body = take(&mut branch.stx.body);
          branch.stx.body = tighten_body(body, cx);
        });
      }
      Stmt::Switch(switch)
    }
    Stmt::Throw(mut throw) => {
      squeeze_expr_slot(&mut throw.stx.value, cx);
      Stmt::Throw(throw)
    }
    Stmt::Try(mut try_stmt) => {
      let wrapped = take(&mut try_stmt.stx.wrapped.stx.body);
      try_stmt.stx.wrapped.stx.body = tighten_body(wrapped, cx);
      if let Some(catch) = &mut try_stmt.stx.catch {
        cx.with_ancestor(Ancestor::new(NodeKind::Catch, catch.loc), |cx| {
          let body = take(&mut catch.stx.body);
          catch.stx.body = tighten_body(body, cx);
        });
      }
      if let Some(finally) = &mut try_stmt.stx.finally {
        let body = take(&mut finally.stx.body);
        finally.stx.body = tighten_body(body, cx);
      }
      Stmt::Try(try_stmt)
    }
    Stmt::VarDecl(mut decl) => {
      squeeze_var_decl(&mut decl, cx);
      Stmt::VarDecl(decl)
    }
    Stmt::While(mut while_stmt) => {
      squeeze_expr_slot(&mut while_stmt.stx.condition, cx);
      squeeze_stmt_slot(&mut while_stmt.stx.body, cx);
      Stmt::While(while_stmt)
    }
    Stmt::With(mut with) => {
      squeeze_expr_slot(&mut with.stx.object, cx);
      squeeze_stmt_slot(&mut with.stx.body, cx);
      Stmt::With(with)
    }
    stx @ (Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_)) => stx,
  };
  Node::new(loc, stx)
}

fn fold(expr: Node<Expr>, cx: &Compressor) -> Node<Expr> {
  match evaluate(expr, cx) {
    Evaluation::Folded(literal, value) => {
      tracing::debug!(
        start = literal.loc.0,
        parent = ?cx.ancestor(1).map(|a| a.kind),
        ?value,
        "folded constant"
      );
      literal
    }
    Evaluation::Unchanged(expr) => expr,
  }
}

/// The name for `object.name` if `key` is a string that can be written that way.
fn dot_name(key: &Node<Expr>, cx: &Compressor) -> Option<String> {
  if !cx.options().properties {
    return None;
  }
  match key.stx.as_ref() {
    Expr::LitStr(lit) if is_plain_identifier(&lit.stx.value) => Some(lit.stx.value.clone()),
    _ => None,
  }
}

/// `===` and `!==` behave like `==` and `!=` when both sides have the same type.
fn loosened_equality(binary: &BinaryExpr) -> Option<OperatorName> {
  let loose = match binary.operator {
    OperatorName::StrictEquality => OperatorName::Equality,
    OperatorName::StrictInequality => OperatorName::Inequality,
    _ => return None,
  };
  let same_type = (is_string(&binary.left) && is_string(&binary.right))
    || (is_boolean(&binary.left) && is_boolean(&binary.right));
  same_type.then_some(loose)
}

fn squeeze_expr_children(expr: Node<Expr>, cx: &mut Compressor) -> Node<Expr> {
  let Node { loc, stx } = expr;
  let stx = match *stx {
    Expr::Binary(mut binary) => {
      squeeze_expr_slot(&mut binary.stx.left, cx);
      squeeze_expr_slot(&mut binary.stx.right, cx);
      // Assignments have a target, not a value, on the left.
      if binary.stx.operator.is_assignment() {
        return Node::new(loc, Expr::Binary(binary));
      }
      if cx.options().comparations {
        if let Some(loose) = loosened_equality(&binary.stx) {
          binary.stx.operator = loose;
        }
      }
      return fold(Node::new(loc, Expr::Binary(binary)), cx);
    }
    Expr::Call(mut call) => {
      squeeze_expr_slot(&mut call.stx.callee, cx);
      for arg in call.stx.arguments.iter_mut() {
        squeeze_expr_slot(arg, cx);
      }
      Expr::Call(call)
    }
    Expr::ComputedMember(mut member) => {
      squeeze_expr_slot(&mut member.stx.object, cx);
      squeeze_expr_slot(&mut member.stx.member, cx);
      if let Some(name) = dot_name(&member.stx.member, cx) {
        let ComputedMemberExpr { object, .. } = *member.stx;
        return make::member(loc, object, name);
      }
      Expr::ComputedMember(member)
    }
    Expr::Cond(cond) => {
      let CondExpr {
        test,
        consequent,
        alternate,
      } = *cond.stx;
      let test = squeeze_expr(test, cx);
      let consequent = squeeze_expr(consequent, cx);
      let alternate = squeeze_expr(alternate, cx);
      return if cx.options().conditionals {
        optimize_cond(loc, test, consequent, alternate, cx)
      } else {
        make::cond(loc, test, consequent, alternate)
      };
    }
    Expr::Func(mut func) => {
      squeeze_func(&mut func.stx.func, cx);
      Expr::Func(func)
    }
    Expr::Member(mut member) => {
      squeeze_expr_slot(&mut member.stx.left, cx);
      Expr::Member(member)
    }
    Expr::Unary(mut unary) => {
      squeeze_expr_slot(&mut unary.stx.argument, cx);
      return fold(Node::new(loc, Expr::Unary(unary)), cx);
    }
    Expr::UnaryPostfix(mut unary) => {
      squeeze_expr_slot(&mut unary.stx.argument, cx);
      Expr::UnaryPostfix(unary)
    }
    Expr::LitArr(mut arr) => {
      for elem in arr.stx.elements.iter_mut() {
        if let LitArrElem::Single(value) = elem {
          squeeze_expr_slot(value, cx);
        }
      }
      Expr::LitArr(arr)
    }
    Expr::LitObj(mut obj) => {
      for member in obj.stx.members.iter_mut() {
        match &mut member.stx.value {
          ObjMemberValue::Prop(value) => squeeze_expr_slot(value, cx),
          ObjMemberValue::Getter(func) | ObjMemberValue::Setter(func) => squeeze_func(func, cx),
        }
      }
      Expr::LitObj(obj)
    }
    stx => stx,
  };
  Node::new(loc, stx)
}

/// Offers `negate(test) ? alternate : consequent` in place of the original.
/// The original is passed second so it is kept when both render the same.
pub fn optimize_cond(
  loc: Loc,
  test: Node<Expr>,
  consequent: Node<Expr>,
  alternate: Node<Expr>,
  cx: &Compressor,
) -> Node<Expr> {
  let candidate = make::cond(
    loc,
    negate(test.clone(), cx),
    alternate.clone(),
    consequent.clone(),
  );
  best_of(candidate, make::cond(loc, test, consequent, alternate))
}

/// Builds an `if`, bracing the consequent if it would otherwise take the `else`.
fn make_if(
  loc: Loc,
  test: Node<Expr>,
  consequent: Node<Stmt>,
  alternate: Option<Node<Stmt>>,
) -> Node<Stmt> {
  let consequent = if alternate.is_some() && ends_with_open_if(&consequent) {
    make::block(consequent.loc, vec![consequent])
  } else {
    consequent
  };
  make::if_stmt(loc, test, consequent, alternate)
}

fn into_expr(stmt: Node<Stmt>) -> Result<Node<Expr>, Node<Stmt>> {
  let Node { loc, stx } = stmt;
  match *stx {
    Stmt::Expr(expr_stmt) => Ok(expr_stmt.stx.expr),
    stx => Err(Node::new(loc, stx)),
  }
}

/// `;` or `{}`.
fn is_empty(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::Empty(_) => true,
    Stmt::Block(block) => block.stx.body.is_empty(),
    _ => false,
  }
}

pub fn optimize_if(
  loc: Loc,
  test: Node<Expr>,
  consequent: Node<Stmt>,
  alternate: Option<Node<Stmt>>,
  cx: &mut Compressor,
) -> Node<Stmt> {
  let alternate = alternate.filter(|alt| !is_empty(alt));
  let test = match evaluate(test, cx) {
    Evaluation::Folded(literal, value) => {
      return fold_constant_if(loc, literal, coerce_to_bool(&value), consequent, alternate, cx);
    }
    Evaluation::Unchanged(test) => test,
  };

  match (into_expr(consequent), alternate.map(into_expr)) {
    (Ok(consequent), Some(Ok(alternate))) => {
      make::expr_stmt(optimize_cond(loc, test, consequent, alternate, cx))
    }
    (Ok(consequent), None) => make::expr_stmt(make::binary(
      loc,
      OperatorName::LogicalAnd,
      test,
      consequent,
    )),
    (Err(consequent), Some(Ok(alternate))) if is_empty(&consequent) => make::expr_stmt(
      make::binary(loc, OperatorName::LogicalOr, test, alternate),
    ),
    (Err(consequent), Some(Err(alternate))) if is_empty(&consequent) => {
      make_if(loc, negate(test, cx), alternate, None)
    }
    (consequent, alternate) => make_if(
      loc,
      test,
      restore_stmt(consequent),
      alternate.map(restore_stmt),
    ),
  }
}

fn restore_stmt(stmt: Result<Node<Expr>, Node<Stmt>>) -> Node<Stmt> {
  stmt.map_or_else(|stmt| stmt, make::expr_stmt)
}

/// Replaces an `if` whose test is constant with the branch that runs. `var`s
/// declared in the other branch are kept without initializers, and if it
/// declares a function the `if` is left alone.
fn fold_constant_if(
  loc: Loc,
  test: Node<Expr>,
  truthy: bool,
  consequent: Node<Stmt>,
  alternate: Option<Node<Stmt>>,
  cx: &mut Compressor,
) -> Node<Stmt> {
  let (code, message) = if truthy {
    (CONDITION_ALWAYS_TRUE, "Condition always true")
  } else {
    (CONDITION_ALWAYS_FALSE, "Condition always false")
  };
  cx.warn(Diagnostic::warning(code, message, test.loc));

  let dead = if truthy {
    alternate.as_ref()
  } else {
    Some(&consequent)
  };
  let hoisted = dead.map(collect_hoisted).unwrap_or_default();
  if hoisted.iter().any(|decl| matches!(decl, HoistedDecl::Func(_))) {
    return make_if(loc, test, consequent, alternate);
  }

  let live = if truthy { Some(consequent) } else { alternate };
  let mut body: Vec<Node<Stmt>> = hoisted.into_iter().map(HoistedDecl::into_stmt).collect();
  match live {
    Some(live) if body.is_empty() => live,
    None if body.is_empty() => make::empty_stmt(loc),
    live => {
      body.extend(live);
      let body = eliminate_spurious_blocks(body);
      match <[Node<Stmt>; 1]>::try_from(body) {
        Ok([only]) => only,
        Err(body) => make::block(loc, body),
      }
    }
  }
}

type BreakStmtNode = Node<BreakStmt>;
type ContinueStmtNode = Node<ContinueStmt>;

#[derive(Visitor)]
#[visitor(BreakStmtNode(enter), ContinueStmtNode(enter))]
struct LabelRefCounter<'a> {
  label: &'a str,
  count: usize,
}

impl LabelRefCounter<'_> {
  fn enter_break_stmt_node(&mut self, node: &BreakStmtNode) {
    if node.stx.label.as_deref() == Some(self.label) {
      self.count += 1;
    }
  }

  fn enter_continue_stmt_node(&mut self, node: &ContinueStmtNode) {
    if node.stx.label.as_deref() == Some(self.label) {
      self.count += 1;
    }
  }
}

fn count_label_refs(stmt: &Node<Stmt>, label: &str) -> usize {
  let mut counter = LabelRefCounter { label, count: 0 };
  stmt.drive(&mut counter);
  counter.count
}
