//! The rewrite engine.
//!
//! `squeeze` rewrites one node bottom-up, `tighten` rewrites a statement list,
//! and the remaining modules are the queries and transforms those rules lean on.

use crate::ast::expr::Expr;
use crate::ast::stmt::Stmt;
use crate::diag::Diagnostic;
use crate::loc::Loc;

pub mod best_of;
pub mod eval;
pub mod negate;
pub mod options;
pub mod predicates;
pub mod squeeze;
pub mod tighten;

pub use options::CompressOptions;
pub use options::OptionName;

/// The kind of a node on the ancestor stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
  TopLevel,
  Func,
  SwitchBranch,
  Catch,
  // Statements.
  Block,
  DoWhile,
  ExprStmt,
  ForIn,
  ForTriple,
  If,
  Label,
  Return,
  Switch,
  Throw,
  Try,
  VarDecl,
  While,
  With,
  // Expressions.
  Binary,
  Call,
  ComputedMember,
  Cond,
  LitArr,
  LitObj,
  Member,
  Unary,
  UnaryPostfix,
}

impl NodeKind {
  pub fn of_stmt(stmt: &Stmt) -> Option<NodeKind> {
    Some(match stmt {
      Stmt::Block(_) => NodeKind::Block,
      Stmt::DoWhile(_) => NodeKind::DoWhile,
      Stmt::Expr(_) => NodeKind::ExprStmt,
      Stmt::ForIn(_) => NodeKind::ForIn,
      Stmt::ForTriple(_) => NodeKind::ForTriple,
      Stmt::FunctionDecl(_) => NodeKind::Func,
      Stmt::If(_) => NodeKind::If,
      Stmt::Label(_) => NodeKind::Label,
      Stmt::Return(_) => NodeKind::Return,
      Stmt::Switch(_) => NodeKind::Switch,
      Stmt::Throw(_) => NodeKind::Throw,
      Stmt::Try(_) => NodeKind::Try,
      Stmt::VarDecl(_) => NodeKind::VarDecl,
      Stmt::While(_) => NodeKind::While,
      Stmt::With(_) => NodeKind::With,
      // No children to descend into.
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_) => return None,
    })
  }

  pub fn of_expr(expr: &Expr) -> Option<NodeKind> {
    Some(match expr {
      Expr::Binary(_) => NodeKind::Binary,
      Expr::Call(_) => NodeKind::Call,
      Expr::ComputedMember(_) => NodeKind::ComputedMember,
      Expr::Cond(_) => NodeKind::Cond,
      Expr::Func(_) => NodeKind::Func,
      Expr::LitArr(_) => NodeKind::LitArr,
      Expr::LitObj(_) => NodeKind::LitObj,
      Expr::Member(_) => NodeKind::Member,
      Expr::Unary(_) => NodeKind::Unary,
      Expr::UnaryPostfix(_) => NodeKind::UnaryPostfix,
      Expr::Id(_)
      | Expr::This(_)
      | Expr::LitBool(_)
      | Expr::LitNull(_)
      | Expr::LitNum(_)
      | Expr::LitRegex(_)
      | Expr::LitStr(_)
      | Expr::LitUndefined(_) => return None,
    })
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ancestor {
  pub kind: NodeKind,
  pub loc: Loc,
}

impl Ancestor {
  pub fn new(kind: NodeKind, loc: Loc) -> Self {
    Self { kind, loc }
  }
}

/// State for one rewrite run: the resolved options, the stack of nodes whose
/// children are currently being rewritten, and the diagnostics emitted so far.
pub struct Compressor {
  options: CompressOptions,
  ancestors: Vec<Ancestor>,
  diagnostics: Vec<Diagnostic>,
}

impl Compressor {
  pub fn new(options: CompressOptions) -> Self {
    Self {
      options,
      ancestors: Vec::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn options(&self) -> &CompressOptions {
    &self.options
  }

  pub fn is_enabled(&self, name: OptionName) -> bool {
    self.options.is_enabled(name)
  }

  pub fn push_ancestor(&mut self, ancestor: Ancestor) {
    self.ancestors.push(ancestor);
  }

  pub fn pop_ancestor(&mut self) -> Option<Ancestor> {
    self.ancestors.pop()
  }

  /// Runs `f` with `ancestor` pushed, popping it again afterwards.
  pub fn with_ancestor<T>(&mut self, ancestor: Ancestor, f: impl FnOnce(&mut Self) -> T) -> T {
    self.push_ancestor(ancestor);
    let res = f(self);
    self.pop_ancestor();
    res
  }

  /// The ancestor `depth` levels above the innermost one; 0 is the node whose
  /// children are being rewritten.
  pub fn ancestor(&self, depth: usize) -> Option<&Ancestor> {
    self.ancestors.iter().rev().nth(depth)
  }

  pub fn depth(&self) -> usize {
    self.ancestors.len()
  }

  /// Records a finding. Dropped unless the `warnings` option is on.
  pub fn warn(&mut self, diagnostic: Diagnostic) {
    if !self.options.warnings {
      return;
    }
    tracing::warn!(
      code = diagnostic.code,
      start = diagnostic.primary.0,
      end = diagnostic.primary.1,
      "{}",
      diagnostic.message
    );
    self.diagnostics.push(diagnostic);
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn into_diagnostics(self) -> Vec<Diagnostic> {
    self.diagnostics
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::diag::LABEL_REMOVED;

  #[test]
  fn test_ancestor_stack() {
    let mut cx = Compressor::new(CompressOptions::default());
    assert!(cx.ancestor(0).is_none());
    cx.push_ancestor(Ancestor::new(NodeKind::Func, Loc(0, 10)));
    let inner = cx.with_ancestor(Ancestor::new(NodeKind::Block, Loc(2, 8)), |cx| {
      assert_eq!(cx.depth(), 2);
      assert_eq!(cx.ancestor(1).map(|a| a.kind), Some(NodeKind::Func));
      cx.ancestor(0).copied()
    });
    assert_eq!(inner.map(|a| a.kind), Some(NodeKind::Block));
    assert_eq!(cx.depth(), 1);
    assert_eq!(cx.pop_ancestor().map(|a| a.loc), Some(Loc(0, 10)));
  }

  #[test]
  fn test_warn_respects_option() {
    let diag = Diagnostic::note(LABEL_REMOVED, "Label removed", Loc(0, 1));
    let mut cx = Compressor::new(CompressOptions::default().with(OptionName::Warnings, false));
    cx.warn(diag.clone());
    assert!(cx.diagnostics().is_empty());

    let mut cx = Compressor::new(CompressOptions::default());
    cx.warn(diag.clone());
    assert_eq!(cx.into_diagnostics(), vec![diag]);
  }
}
