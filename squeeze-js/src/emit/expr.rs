use derive_visitor::{Drive, Visitor};

use crate::ast::expr::{
  BinaryExpr, CallExpr, CondExpr, Expr, FuncExpr, LitArrElem, LitObjExpr, MemberExpr,
  ObjMemberValue, UnaryExpr,
};
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ident::is_plain_identifier;
use crate::num::JsNumber;
use crate::operator::{Associativity, OperatorName, CALL_MEMBER_PRECEDENCE, PRIMARY_PRECEDENCE};

use super::escape::quote_string;
use super::Printer;

const ASSIGNMENT_PRECEDENCE: u8 = 3;
const UNARY_PRECEDENCE: u8 = 16;
const POSTFIX_PRECEDENCE: u8 = 17;
const DIVISION_PRECEDENCE: u8 = 14;

/// Shortest source text for a number. Non-finite values become divisions.
pub fn render_number(value: JsNumber) -> String {
  let v = value.0;
  if v.is_nan() {
    return "0/0".to_string();
  }
  if v.is_infinite() {
    return if v > 0.0 { "1/0" } else { "-1/0" }.to_string();
  }
  if v == 0.0 {
    return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
  }
  let sign = if v < 0.0 { "-" } else { "" };
  let abs = JsNumber(v.abs());
  let mut best = abs.to_string();
  if let Some(frac) = best.strip_prefix("0.") {
    best = format!(".{frac}");
  }
  let (digits, n) = abs.digits_and_exponent();
  let exp = n - digits.len() as i32;
  if exp != 0 {
    let candidate = format!("{digits}e{exp}");
    if candidate.len() < best.len() {
      best = candidate;
    }
  }
  format!("{sign}{best}")
}

fn number_precedence(value: JsNumber) -> u8 {
  let v = value.0;
  if !v.is_finite() {
    DIVISION_PRECEDENCE
  } else if v.is_sign_negative() {
    UNARY_PRECEDENCE
  } else {
    PRIMARY_PRECEDENCE
  }
}

// `1.x` would lex as a malformed number.
fn requires_trailing_dot(rendered: &str) -> bool {
  !rendered.contains(&['.', 'e', 'x'][..])
}

pub(super) fn expr_precedence(expr: &Node<Expr>) -> u8 {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => binary.stx.operator.precedence(),
    Expr::Cond(_) => OperatorName::Conditional.precedence(),
    Expr::Unary(_) | Expr::LitUndefined(_) => UNARY_PRECEDENCE,
    Expr::UnaryPostfix(_) => POSTFIX_PRECEDENCE,
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) => CALL_MEMBER_PRECEDENCE,
    Expr::LitNum(num) => number_precedence(num.stx.value),
    _ => PRIMARY_PRECEDENCE,
  }
}

/// Whether an expression statement starting with this expression would be
/// parsed as a declaration or block instead.
pub(super) fn starts_with_brace_or_function(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Func(_) | Expr::LitObj(_) => true,
    Expr::Binary(binary) => {
      let (left_prec, _) = binary_child_precedences(binary.stx.operator);
      leads_unparenthesized(&binary.stx.left, left_prec)
    }
    Expr::Call(call) => !call.stx.construct && leads_unparenthesized(&call.stx.callee, CALL_MEMBER_PRECEDENCE),
    Expr::ComputedMember(member) => leads_unparenthesized(&member.stx.object, CALL_MEMBER_PRECEDENCE),
    Expr::Member(member) => leads_unparenthesized(&member.stx.left, CALL_MEMBER_PRECEDENCE),
    Expr::Cond(cond) => {
      leads_unparenthesized(&cond.stx.test, OperatorName::Conditional.precedence() + 1)
    }
    Expr::UnaryPostfix(unary) => leads_unparenthesized(&unary.stx.argument, POSTFIX_PRECEDENCE),
    _ => false,
  }
}

fn leads_unparenthesized(child: &Node<Expr>, min_prec: u8) -> bool {
  expr_precedence(child) >= min_prec && starts_with_brace_or_function(child)
}

fn binary_child_precedences(operator: OperatorName) -> (u8, u8) {
  let prec = operator.precedence();
  match operator.associativity() {
    Associativity::Left => (prec, prec + 1),
    Associativity::Right => (prec + 1, prec),
  }
}

// `new a()()` and `new (a())()` differ, so a call anywhere along the callee's
// member chain must be parenthesized.
fn callee_has_call(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Call(_) => true,
    Expr::Member(member) => callee_has_call(&member.stx.left),
    Expr::ComputedMember(member) => callee_has_call(&member.stx.object),
    _ => false,
  }
}

/// Whether the expression contains an `in` operator, which a `for(;;)`
/// initializer cannot hold unparenthesized.
pub(super) fn contains_in_operator(expr: &Node<Expr>) -> bool {
  type BinaryExprNode = Node<BinaryExpr>;

  #[derive(Default, Visitor)]
  #[visitor(BinaryExprNode(enter))]
  struct InFinder {
    found: bool,
  }

  impl InFinder {
    fn enter_binary_expr_node(&mut self, node: &BinaryExprNode) {
      self.found |= node.stx.operator == OperatorName::In;
    }
  }

  let mut finder = InFinder::default();
  expr.drive(&mut finder);
  finder.found
}

impl Printer<'_> {
  pub(super) fn emit_expr(&mut self, expr: &Node<Expr>) {
    self.emit_expr_with_min_prec(expr, 1);
  }

  pub(super) fn emit_expr_with_min_prec(&mut self, expr: &Node<Expr>, min_prec: u8) {
    let needs_parens = expr_precedence(expr) < min_prec;
    if needs_parens {
      self.out.write_punct("(");
    }
    self.emit_expr_no_parens(expr);
    if needs_parens {
      self.out.write_punct(")");
    }
  }

  fn emit_expr_no_parens(&mut self, expr: &Node<Expr>) {
    match expr.stx.as_ref() {
      Expr::Binary(binary) => self.emit_binary(binary),
      Expr::Call(call) => self.emit_call(call),
      Expr::ComputedMember(member) => {
        self.emit_expr_with_min_prec(&member.stx.object, CALL_MEMBER_PRECEDENCE);
        self.out.write_punct("[");
        self.emit_expr(&member.stx.member);
        self.out.write_punct("]");
      }
      Expr::Cond(cond) => self.emit_cond(cond),
      Expr::Func(func) => self.emit_func_expr(func),
      Expr::Id(id) => self.out.write_identifier(&id.stx.name),
      Expr::Member(member) => self.emit_member(member),
      Expr::This(_) => self.out.write_keyword("this"),
      Expr::Unary(unary) => self.emit_unary(unary),
      Expr::UnaryPostfix(unary) => {
        self.emit_expr_with_min_prec(&unary.stx.argument, POSTFIX_PRECEDENCE);
        self.out.write_punct(unary.stx.operator.text());
      }
      Expr::LitArr(arr) => {
        self.out.write_punct("[");
        for (idx, elem) in arr.stx.elements.iter().enumerate() {
          if idx > 0 {
            self.out.write_punct(",");
          }
          if let LitArrElem::Single(value) = elem {
            self.emit_expr_with_min_prec(value, ASSIGNMENT_PRECEDENCE);
          }
        }
        if matches!(arr.stx.elements.last(), Some(LitArrElem::Empty)) {
          self.out.write_punct(",");
        }
        self.out.write_punct("]");
      }
      Expr::LitBool(lit) => self
        .out
        .write_keyword(if lit.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.out.write_keyword("null"),
      Expr::LitNum(lit) => self.emit_number(lit.stx.value),
      Expr::LitObj(obj) => self.emit_object(obj),
      Expr::LitRegex(lit) => self.out.write_regex(&lit.stx.value),
      Expr::LitStr(lit) => self.out.write_quoted(&quote_string(&lit.stx.value)),
      Expr::LitUndefined(_) => {
        self.out.write_keyword("void");
        self.out.write_number("0");
      }
    }
  }

  fn emit_number(&mut self, value: JsNumber) {
    let rendered = render_number(value);
    if let Some(positive) = rendered.strip_prefix('-') {
      self.out.write_punct("-");
      self.emit_number_digits(positive);
    } else {
      self.emit_number_digits(&rendered);
    }
  }

  fn emit_number_digits(&mut self, rendered: &str) {
    match rendered.split_once('/') {
      Some((num, den)) => {
        self.out.write_number(num);
        self.out.write_punct("/");
        self.out.write_number(den);
      }
      None => self.out.write_number(rendered),
    }
  }

  fn emit_binary(&mut self, binary: &Node<BinaryExpr>) {
    let (left_prec, right_prec) = binary_child_precedences(binary.stx.operator);
    self.emit_expr_with_min_prec(&binary.stx.left, left_prec);
    let op = binary.stx.operator;
    match op {
      OperatorName::In | OperatorName::Instanceof => self.out.write_keyword(op.text()),
      _ => self.out.write_punct(op.text()),
    }
    self.emit_expr_with_min_prec(&binary.stx.right, right_prec);
  }

  fn emit_call(&mut self, call: &Node<CallExpr>) {
    if call.stx.construct {
      self.out.write_keyword("new");
      if callee_has_call(&call.stx.callee) {
        self.out.write_punct("(");
        self.emit_expr(&call.stx.callee);
        self.out.write_punct(")");
      } else {
        self.emit_expr_with_min_prec(&call.stx.callee, CALL_MEMBER_PRECEDENCE);
      }
    } else {
      self.emit_expr_with_min_prec(&call.stx.callee, CALL_MEMBER_PRECEDENCE);
    }
    self.out.write_punct("(");
    for (idx, arg) in call.stx.arguments.iter().enumerate() {
      if idx > 0 {
        self.out.write_punct(",");
      }
      self.emit_expr_with_min_prec(arg, ASSIGNMENT_PRECEDENCE);
    }
    self.out.write_punct(")");
  }

  fn emit_member(&mut self, member: &Node<MemberExpr>) {
    match member.stx.left.stx.as_ref() {
      Expr::LitNum(num) if number_precedence(num.stx.value) == PRIMARY_PRECEDENCE => {
        let rendered = render_number(num.stx.value);
        self.out.write_number(&rendered);
        if requires_trailing_dot(&rendered) {
          self.out.write_punct(".");
        }
      }
      _ => self.emit_expr_with_min_prec(&member.stx.left, CALL_MEMBER_PRECEDENCE),
    }
    self.out.write_punct(".");
    self.out.write_identifier(&member.stx.right);
  }

  fn emit_cond(&mut self, cond: &Node<CondExpr>) {
    let prec = OperatorName::Conditional.precedence();
    self.emit_expr_with_min_prec(&cond.stx.test, prec + 1);
    self.out.write_punct("?");
    self.emit_expr_with_min_prec(&cond.stx.consequent, ASSIGNMENT_PRECEDENCE);
    self.out.write_punct(":");
    self.emit_expr_with_min_prec(&cond.stx.alternate, ASSIGNMENT_PRECEDENCE);
  }

  fn emit_unary(&mut self, unary: &Node<UnaryExpr>) {
    let op = unary.stx.operator;
    if op.is_prefix_keyword() {
      self.out.write_keyword(op.text());
    } else {
      self.out.write_punct(op.text());
    }
    self.emit_expr_with_min_prec(&unary.stx.argument, UNARY_PRECEDENCE);
  }

  fn emit_func_expr(&mut self, func: &Node<FuncExpr>) {
    self.out.write_keyword("function");
    if let Some(name) = &func.stx.name {
      self.out.write_identifier(name);
    }
    self.emit_func_signature_and_body(&func.stx.func);
  }

  pub(super) fn emit_func_signature_and_body(&mut self, func: &Node<Func>) {
    self.out.write_punct("(");
    for (idx, param) in func.stx.parameters.iter().enumerate() {
      if idx > 0 {
        self.out.write_punct(",");
      }
      self.out.write_identifier(&param.stx.name);
    }
    self.out.write_punct(")");
    self.out.write_punct("{");
    self.emit_stmts(&func.stx.body);
    self.out.write_punct("}");
  }

  fn emit_object(&mut self, obj: &Node<LitObjExpr>) {
    self.out.write_punct("{");
    for (idx, member) in obj.stx.members.iter().enumerate() {
      if idx > 0 {
        self.out.write_punct(",");
      }
      match &member.stx.value {
        ObjMemberValue::Prop(value) => {
          self.emit_property_key(&member.stx.key);
          self.out.write_punct(":");
          self.emit_expr_with_min_prec(value, ASSIGNMENT_PRECEDENCE);
        }
        ObjMemberValue::Getter(func) => {
          self.out.write_identifier("get");
          self.emit_property_key(&member.stx.key);
          self.emit_func_signature_and_body(func);
        }
        ObjMemberValue::Setter(func) => {
          self.out.write_identifier("set");
          self.emit_property_key(&member.stx.key);
          self.emit_func_signature_and_body(func);
        }
      }
    }
    self.out.write_punct("}");
  }

  fn emit_property_key(&mut self, key: &str) {
    if is_plain_identifier(key) {
      self.out.write_identifier(key);
      return;
    }
    let canonical = key
      .parse::<f64>()
      .ok()
      .filter(|v| v.is_finite() && *v >= 0.0)
      .map(|v| JsNumber(v).to_string());
    if canonical.as_deref() == Some(key) {
      self.out.write_number(key);
    } else {
      self.out.write_quoted(&quote_string(key));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::render_number;
  use crate::num::JsNumber;

  #[test]
  fn test_render_number() {
    let r = |v: f64| render_number(JsNumber(v));
    assert_eq!(r(7.0), "7");
    assert_eq!(r(100.0), "100");
    assert_eq!(r(1000.0), "1e3");
    assert_eq!(r(0.5), ".5");
    assert_eq!(r(-0.25), "-.25");
    assert_eq!(r(0.0001), "1e-4");
    assert_eq!(r(1e21), "1e21");
    assert_eq!(r(-0.0), "-0");
    assert_eq!(r(f64::NAN), "0/0");
    assert_eq!(r(f64::NEG_INFINITY), "-1/0");
  }
}
