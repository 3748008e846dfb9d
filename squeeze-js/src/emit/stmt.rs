use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::{ForInLhs, ForTripleStmtInit, Stmt, VarDecl};

use super::expr::{contains_in_operator, starts_with_brace_or_function};
use super::Printer;

const ASSIGNMENT_PRECEDENCE: u8 = 3;
const LHS_PRECEDENCE: u8 = 17;

/// Whether the statement, printed as an `if` consequent, would swallow a
/// following `else`.
pub(crate) fn ends_with_open_if(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      None => true,
      Some(alt) => ends_with_open_if(alt),
    },
    Stmt::Label(label) => ends_with_open_if(&label.stx.statement),
    Stmt::While(w) => ends_with_open_if(&w.stx.body),
    Stmt::With(w) => ends_with_open_if(&w.stx.body),
    Stmt::ForTriple(f) => ends_with_open_if(&f.stx.body),
    Stmt::ForIn(f) => ends_with_open_if(&f.stx.body),
    _ => false,
  }
}

impl Printer<'_> {
  pub(super) fn emit_stmts(&mut self, stmts: &[Node<Stmt>]) {
    for stmt in stmts {
      self.emit_stmt(stmt);
    }
  }

  fn emit_block(&mut self, stmts: &[Node<Stmt>]) {
    self.out.write_punct("{");
    self.emit_stmts(stmts);
    self.out.write_punct("}");
  }

  fn emit_paren_expr(&mut self, expr: &Node<Expr>) {
    self.out.write_punct("(");
    self.emit_expr(expr);
    self.out.write_punct(")");
  }

  fn emit_var_decl(&mut self, decl: &Node<VarDecl>, no_in: bool) {
    self.out.write_keyword(decl.stx.mode.keyword());
    for (idx, declarator) in decl.stx.declarators.iter().enumerate() {
      if idx > 0 {
        self.out.write_punct(",");
      }
      self.out.write_identifier(&declarator.name);
      if let Some(init) = &declarator.initializer {
        self.out.write_punct("=");
        if no_in && contains_in_operator(init) {
          self.emit_paren_expr(init);
        } else {
          self.emit_expr_with_min_prec(init, ASSIGNMENT_PRECEDENCE);
        }
      }
    }
  }

  pub(super) fn emit_stmt(&mut self, stmt: &Node<Stmt>) {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.emit_block(&block.stx.body),
      Stmt::Break(b) => {
        self.out.write_keyword("break");
        if let Some(label) = &b.stx.label {
          self.out.write_identifier(label);
        }
        self.out.write_punct(";");
      }
      Stmt::Continue(c) => {
        self.out.write_keyword("continue");
        if let Some(label) = &c.stx.label {
          self.out.write_identifier(label);
        }
        self.out.write_punct(";");
      }
      Stmt::Debugger(_) => {
        self.out.write_keyword("debugger");
        self.out.write_punct(";");
      }
      Stmt::DoWhile(d) => {
        self.out.write_keyword("do");
        self.emit_stmt(&d.stx.body);
        self.out.write_keyword("while");
        self.emit_paren_expr(&d.stx.condition);
        self.out.write_punct(";");
      }
      Stmt::Empty(_) => self.out.write_punct(";"),
      Stmt::Expr(e) => {
        if starts_with_brace_or_function(&e.stx.expr) {
          self.emit_paren_expr(&e.stx.expr);
        } else {
          self.emit_expr(&e.stx.expr);
        }
        self.out.write_punct(";");
      }
      Stmt::ForIn(f) => {
        self.out.write_keyword("for");
        self.out.write_punct("(");
        match &f.stx.lhs {
          ForInLhs::Decl(decl) => self.emit_var_decl(decl, true),
          ForInLhs::Assign(target) => self.emit_expr_with_min_prec(target, LHS_PRECEDENCE),
        }
        self.out.write_keyword("in");
        self.emit_expr(&f.stx.rhs);
        self.out.write_punct(")");
        self.emit_stmt(&f.stx.body);
      }
      Stmt::ForTriple(f) => {
        self.out.write_keyword("for");
        self.out.write_punct("(");
        match &f.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(init) => {
            if contains_in_operator(init) || starts_with_brace_or_function(init) {
              self.emit_paren_expr(init);
            } else {
              self.emit_expr(init);
            }
          }
          ForTripleStmtInit::Decl(decl) => self.emit_var_decl(decl, true),
        }
        self.out.write_punct(";");
        if let Some(cond) = &f.stx.cond {
          self.emit_expr(cond);
        }
        self.out.write_punct(";");
        if let Some(post) = &f.stx.post {
          self.emit_expr(post);
        }
        self.out.write_punct(")");
        self.emit_stmt(&f.stx.body);
      }
      Stmt::FunctionDecl(decl) => {
        self.out.write_keyword("function");
        self.out.write_identifier(&decl.stx.name);
        self.emit_func_signature_and_body(&decl.stx.function);
      }
      Stmt::If(if_stmt) => {
        self.out.write_keyword("if");
        self.emit_paren_expr(&if_stmt.stx.test);
        match &if_stmt.stx.alternate {
          Some(alt) => {
            if ends_with_open_if(&if_stmt.stx.consequent) {
              self.emit_block(std::slice::from_ref(&if_stmt.stx.consequent));
            } else {
              self.emit_stmt(&if_stmt.stx.consequent);
            }
            self.out.write_keyword("else");
            self.emit_stmt(alt);
          }
          None => self.emit_stmt(&if_stmt.stx.consequent),
        }
      }
      Stmt::Label(label) => {
        self.out.write_identifier(&label.stx.name);
        self.out.write_punct(":");
        self.emit_stmt(&label.stx.statement);
      }
      Stmt::Return(r) => {
        self.out.write_keyword("return");
        if let Some(value) = &r.stx.value {
          self.emit_expr(value);
        }
        self.out.write_punct(";");
      }
      Stmt::Switch(s) => {
        self.out.write_keyword("switch");
        self.emit_paren_expr(&s.stx.test);
        self.out.write_punct("{");
        for branch in s.stx.branches.iter() {
          match &branch.stx.case {
            Some(case) => {
              self.out.write_keyword("case");
              self.emit_expr(case);
            }
            None => self.out.write_keyword("default"),
          }
          self.out.write_punct(":");
          self.emit_stmts(&branch.stx.body);
        }
        self.out.write_punct("}");
      }
      Stmt::Throw(t) => {
        self.out.write_keyword("throw");
        self.emit_expr(&t.stx.value);
        self.out.write_punct(";");
      }
      Stmt::Try(t) => {
        self.out.write_keyword("try");
        self.emit_block(&t.stx.wrapped.stx.body);
        if let Some(catch) = &t.stx.catch {
          self.out.write_keyword("catch");
          if let Some(param) = &catch.stx.parameter {
            self.out.write_punct("(");
            self.out.write_identifier(param);
            self.out.write_punct(")");
          }
          self.emit_block(&catch.stx.body);
        }
        if let Some(finally) = &t.stx.finally {
          self.out.write_keyword("finally");
          self.emit_block(&finally.stx.body);
        }
      }
      Stmt::VarDecl(decl) => {
        self.emit_var_decl(decl, false);
        self.out.write_punct(";");
      }
      Stmt::While(w) => {
        self.out.write_keyword("while");
        self.emit_paren_expr(&w.stx.condition);
        self.emit_stmt(&w.stx.body);
      }
      Stmt::With(w) => {
        self.out.write_keyword("with");
        self.emit_paren_expr(&w.stx.object);
        self.emit_stmt(&w.stx.body);
      }
    }
  }
}
