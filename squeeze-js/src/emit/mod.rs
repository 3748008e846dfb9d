//! Minified source rendering.
//!
//! The output is not meant to be pretty: it exists so candidate rewrites can
//! be compared by size, and so the CLI can print its result.

mod emitter;
mod escape;
mod expr;
mod stmt;

pub use emitter::Emitter;
pub use escape::quote_string;
pub use expr::render_number;
pub(crate) use stmt::ends_with_open_if;

use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;

pub(crate) struct Printer<'a> {
  out: &'a mut Emitter,
}

/// Anything that can be rendered to minified source text.
pub trait Render {
  fn emit(&self, out: &mut Emitter);

  fn render_minified(&self) -> String {
    let mut out = Emitter::new();
    self.emit(&mut out);
    out.finish()
  }
}

impl Render for Node<Expr> {
  fn emit(&self, out: &mut Emitter) {
    Printer { out }.emit_expr(self);
  }
}

impl Render for Node<Stmt> {
  fn emit(&self, out: &mut Emitter) {
    Printer { out }.emit_stmt(self);
  }
}

impl Render for Node<TopLevel> {
  fn emit(&self, out: &mut Emitter) {
    Printer { out }.emit_stmts(&self.stx.body);
  }
}

pub fn render_minified<R: Render + ?Sized>(node: &R) -> String {
  node.render_minified()
}
