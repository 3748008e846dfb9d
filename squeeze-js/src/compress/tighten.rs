//! Statement-list passes: flattening, dead code elimination and fusion.

use std::mem::{replace, take};

use derive_visitor::{Drive, Visitor};

use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::make;
use crate::ast::node::Node;
use crate::ast::stmt::{ExprStmt, FuncDecl, Stmt, VarDecl, VarDeclMode};
use crate::diag::{Diagnostic, UNREACHABLE_DECLARATION};
use crate::loc::Loc;
use crate::operator::OperatorName;

use super::squeeze::squeeze_stmt;
use super::Compressor;

/// Squeezes every statement, then flattens blocks, drops unreachable code and
/// fuses adjacent expression statements, as enabled.
pub fn tighten_body(stmts: Vec<Node<Stmt>>, cx: &mut Compressor) -> Vec<Node<Stmt>> {
  let span = tracing::debug_span!("tighten", len = stmts.len(), depth = cx.depth());
  let _guard = span.enter();

  let squeezed = stmts.into_iter().map(|stmt| squeeze_stmt(stmt, cx)).collect();
  let mut stmts = eliminate_spurious_blocks(squeezed);
  if cx.options().dead_code {
    stmts = eliminate_dead_code(stmts, cx);
  }
  if cx.options().sequences {
    fuse_sequences(&mut stmts);
  }
  stmts
}

/// A block must stay a block if unwrapping it would change what its
/// declarations are scoped to.
pub(super) fn is_required_block(body: &[Node<Stmt>]) -> bool {
  body.iter().any(|stmt| match stmt.stx.as_ref() {
    Stmt::FunctionDecl(_) => true,
    Stmt::VarDecl(decl) => decl.stx.mode != VarDeclMode::Var,
    _ => false,
  })
}

pub(super) fn eliminate_spurious_blocks(stmts: Vec<Node<Stmt>>) -> Vec<Node<Stmt>> {
  let mut out = Vec::with_capacity(stmts.len());
  for stmt in stmts {
    let Node { loc, stx } = stmt;
    match *stx {
      Stmt::Block(block) if !is_required_block(&block.stx.body) => {
        out.extend(block.stx.body);
      }
      Stmt::Empty(_) => {}
      stx => out.push(Node::new(loc, stx)),
    }
  }
  out
}

fn is_jump(stmt: &Node<Stmt>) -> bool {
  matches!(
    stmt.stx.as_ref(),
    Stmt::Break(_) | Stmt::Continue(_) | Stmt::Return(_) | Stmt::Throw(_)
  )
}

/// A declaration that stays in effect even when the statement holding it never
/// runs.
pub(super) enum HoistedDecl {
  Var(Node<VarDecl>),
  Func(Node<FuncDecl>),
}

impl HoistedDecl {
  pub(super) fn into_stmt(self) -> Node<Stmt> {
    match self {
      HoistedDecl::Var(decl) => Node::new(decl.loc, Stmt::VarDecl(strip_initializers(decl))),
      HoistedDecl::Func(decl) => Node::new(decl.loc, Stmt::FunctionDecl(decl)),
    }
  }
}

type FuncNode = Node<Func>;
type FuncDeclNode = Node<FuncDecl>;
type VarDeclNode = Node<VarDecl>;

#[derive(Default, Visitor)]
#[visitor(FuncNode(enter, exit), FuncDeclNode(enter), VarDeclNode(enter))]
struct HoistedDeclCollector {
  func_depth: usize,
  found: Vec<HoistedDecl>,
}

impl HoistedDeclCollector {
  fn enter_func_node(&mut self, _: &FuncNode) {
    self.func_depth += 1;
  }

  fn exit_func_node(&mut self, _: &FuncNode) {
    self.func_depth -= 1;
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    if self.func_depth == 0 {
      self.found.push(HoistedDecl::Func(node.clone()));
    }
  }

  fn enter_var_decl_node(&mut self, node: &VarDeclNode) {
    if self.func_depth == 0 && node.stx.mode == VarDeclMode::Var {
      self.found.push(HoistedDecl::Var(node.clone()));
    }
  }
}

/// `var` and function declarations in `stmt` outside any nested function, in
/// source order. `let` and `const` are skipped since they are scoped to the
/// block that holds them.
pub(super) fn collect_hoisted(stmt: &Node<Stmt>) -> Vec<HoistedDecl> {
  let mut collector = HoistedDeclCollector::default();
  stmt.drive(&mut collector);
  collector.found
}

/// Drops every initializer. `const` needs one to stay valid, so it gets `void 0`.
pub(super) fn strip_initializers(mut decl: Node<VarDecl>) -> Node<VarDecl> {
  let loc = decl.loc;
  let mode = decl.stx.mode;
  for declarator in decl.stx.declarators.iter_mut() {
    declarator.initializer = match mode {
      VarDeclMode::Const => Some(make::lit_undefined(loc)),
      VarDeclMode::Let | VarDeclMode::Var => None,
    };
  }
  decl
}

fn eliminate_dead_code(stmts: Vec<Node<Stmt>>, cx: &mut Compressor) -> Vec<Node<Stmt>> {
  let mut out = Vec::with_capacity(stmts.len());
  let mut has_quit = false;
  for stmt in stmts {
    if !has_quit {
      has_quit = is_jump(&stmt);
      out.push(stmt);
      continue;
    }
    if let Stmt::FunctionDecl(_) = stmt.stx.as_ref() {
      out.push(stmt);
      continue;
    }
    let hoisted = match stmt.stx.as_ref() {
      // Already in this scope.
      Stmt::VarDecl(decl) => vec![HoistedDecl::Var(decl.clone())],
      _ => collect_hoisted(&stmt),
    };
    for decl in hoisted {
      let (loc, had_initializer) = match &decl {
        HoistedDecl::Var(decl) => (
          decl.loc,
          decl.stx.declarators.iter().any(|d| d.initializer.is_some()),
        ),
        HoistedDecl::Func(decl) => (decl.loc, false),
      };
      let diagnostic = Diagnostic::warning(
        UNREACHABLE_DECLARATION,
        "Declarations in unreachable code!",
        loc,
      );
      cx.warn(if had_initializer {
        diagnostic.with_note("initializers are never evaluated and have been dropped")
      } else {
        diagnostic
      });
      out.push(decl.into_stmt());
    }
    tracing::debug!(start = stmt.loc.0, end = stmt.loc.1, "dropped unreachable statement");
  }
  out
}

/// Joins runs of expression statements into one comma expression, and folds a
/// lone leading expression statement into a final `return`/`throw` value.
///
/// Works in place on the list, which is owned by the current rewrite only.
pub fn fuse_sequences(stmts: &mut Vec<Node<Stmt>>) {
  if stmts.len() < 2 {
    return;
  }
  let last = stmts.len() - 1;
  let mut out: Vec<Node<Stmt>> = Vec::with_capacity(stmts.len());
  for (idx, cur) in take(stmts).into_iter().enumerate() {
    let prev_is_expr = matches!(out.last().map(|prev| prev.stx.as_ref()), Some(Stmt::Expr(_)));
    // Only worth it when the whole list becomes one statement.
    let folds_into_exit = prev_is_expr && out.len() == 1 && idx == last;
    let Node { loc, stx } = cur;
    match *stx {
      Stmt::Expr(cur) if prev_is_expr => {
        let ExprStmt { expr } = *cur.stx;
        if let Some(prev) = out.last_mut() {
          let span = prev.loc.extend(loc);
          prev.loc = span;
          if let Stmt::Expr(prev) = prev.stx.as_mut() {
            prev.loc = span;
            let first = replace(&mut prev.stx.expr, make::dummy_expr());
            prev.stx.expr = make::binary(span, OperatorName::Comma, first, expr);
          }
        }
      }
      Stmt::Return(mut ret) if folds_into_exit && ret.stx.value.is_some() => {
        let mut loc = loc;
        if let Some((prev_loc, first)) = pop_expr(&mut out) {
          loc = prev_loc.extend(loc);
          ret.stx.value = ret.stx.value.take().map(|value| comma(prev_loc, first, value));
        }
        out.push(Node::new(loc, Stmt::Return(ret)));
      }
      Stmt::Throw(mut throw) if folds_into_exit => {
        let mut loc = loc;
        if let Some((prev_loc, first)) = pop_expr(&mut out) {
          loc = prev_loc.extend(loc);
          let value = replace(&mut throw.stx.value, make::dummy_expr());
          throw.stx.value = comma(prev_loc, first, value);
        }
        out.push(Node::new(loc, Stmt::Throw(throw)));
      }
      stx => out.push(Node::new(loc, stx)),
    }
  }
  *stmts = out;
}

fn comma(first_loc: Loc, first: Node<Expr>, value: Node<Expr>) -> Node<Expr> {
  make::binary(first_loc.extend(value.loc), OperatorName::Comma, first, value)
}

fn pop_expr(out: &mut Vec<Node<Stmt>>) -> Option<(Loc, Node<Expr>)> {
  let prev = out.pop()?;
  match *prev.stx {
    Stmt::Expr(expr_stmt) => Some((prev.loc, expr_stmt.stx.expr)),
    stx => {
      out.push(Node::new(prev.loc, stx));
      None
    }
  }
}
