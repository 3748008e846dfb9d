use std::cmp::Ordering;
use std::mem::discriminant;

use crate::ast::expr::Expr;
use crate::ast::make;
use crate::ast::node::Node;
use crate::loc::Loc;
use crate::num::JsNumber as JN;
use crate::operator::OperatorName;

use super::Compressor;
use Value::*;

/// A compile-time constant. Every variant has a literal node kind, so a
/// folded value can always be turned back into syntax.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Str(String),
  Num(JN),
  Bool(bool),
  Undefined,
  Null,
}

impl Value {
  pub fn into_literal(self, loc: Loc) -> Node<Expr> {
    match self {
      Str(v) => make::lit_str(loc, v),
      Num(v) => make::lit_num(loc, v.0),
      Bool(v) => make::lit_bool(loc, v),
      Undefined => make::lit_undefined(loc),
      Null => make::lit_null(loc),
    }
  }
}

pub enum Evaluation {
  /// Not a constant; the expression is handed back untouched.
  Unchanged(Node<Expr>),
  /// The literal that replaces the expression, and its value.
  Folded(Node<Expr>, Value),
}

impl Evaluation {
  pub fn into_expr(self) -> Node<Expr> {
    match self {
      Evaluation::Unchanged(expr) => expr,
      Evaluation::Folded(expr, _) => expr,
    }
  }

  pub fn value(&self) -> Option<&Value> {
    match self {
      Evaluation::Unchanged(_) => None,
      Evaluation::Folded(_, value) => Some(value),
    }
  }
}

/// Tries to replace `expr` with the literal it always evaluates to. Does
/// nothing unless the `evaluate` option is on.
pub fn evaluate(expr: Node<Expr>, cx: &Compressor) -> Evaluation {
  if !cx.options().evaluate {
    return Evaluation::Unchanged(expr);
  }
  match fold_value(&expr) {
    Some(value) => {
      let literal = value.clone().into_literal(expr.loc);
      Evaluation::Folded(literal, value)
    }
    None => Evaluation::Unchanged(expr),
  }
}

/// The constant value of `expr`, or `None` if it is not a compile-time constant.
pub fn fold_value(expr: &Node<Expr>) -> Option<Value> {
  match expr.stx.as_ref() {
    Expr::LitStr(lit) => Some(Str(lit.stx.value.clone())),
    Expr::LitNum(lit) => Some(Num(lit.stx.value)),
    Expr::LitBool(lit) => Some(Bool(lit.stx.value)),
    Expr::LitNull(_) => Some(Null),
    Expr::LitUndefined(_) => Some(Undefined),
    Expr::Unary(unary) => {
      let argument = fold_value(&unary.stx.argument)?;
      fold_unary(unary.stx.operator, &argument)
    }
    Expr::Binary(binary) => {
      let left = fold_value(&binary.stx.left)?;
      let right = fold_value(&binary.stx.right)?;
      fold_binary(binary.stx.operator, &left, &right)
    }
    Expr::Cond(cond) => {
      if coerce_to_bool(&fold_value(&cond.stx.test)?) {
        fold_value(&cond.stx.consequent)
      } else {
        fold_value(&cond.stx.alternate)
      }
    }
    _ => None,
  }
}

fn is_js_whitespace(ch: char) -> bool {
  matches!(
    ch,
    '\t'
      | '\n'
      | '\u{b}'
      | '\u{c}'
      | '\r'
      | ' '
      | '\u{a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{2028}'
      | '\u{2029}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}

// Integers past 2^53 would need correctly rounded big-number parsing, so
// those are left unfolded.
fn parse_radix_int(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  }
  let mut value: u64 = 0;
  for ch in digits.chars() {
    let digit = ch.to_digit(radix)?;
    value = value.checked_mul(radix as u64)?.checked_add(digit as u64)?;
    if value > (1 << 53) {
      return None;
    }
  }
  Some(value as f64)
}

/// StringToNumber. `None` only when the result cannot be computed exactly.
pub fn coerce_str_to_num(raw: &str) -> Option<f64> {
  let raw = raw.trim_matches(is_js_whitespace);
  if raw.is_empty() {
    return Some(0.0);
  }
  for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
    if let Some(digits) = raw.strip_prefix(prefix) {
      if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
      }
      return parse_radix_int(digits, radix);
    }
  }
  let (sign, body) = match raw.as_bytes()[0] {
    b'+' => (1.0, &raw[1..]),
    b'-' => (-1.0, &raw[1..]),
    _ => (1.0, raw),
  };
  if body == "Infinity" {
    return Some(sign * f64::INFINITY);
  }
  // Reject what Rust accepts but the language does not (`inf`, `NaN`, `1_0`).
  let valid_chars = body
    .bytes()
    .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
  if !valid_chars || !body.bytes().next().is_some_and(|b| b.is_ascii_digit() || b == b'.') {
    return Some(f64::NAN);
  }
  Some(body.parse::<f64>().map(|v| sign * v).unwrap_or(f64::NAN))
}

pub fn coerce_to_num(v: &Value) -> Option<f64> {
  match v {
    Bool(false) => Some(0.0),
    Bool(true) => Some(1.0),
    Null => Some(0.0),
    Num(v) => Some(v.0),
    Str(v) => coerce_str_to_num(v),
    Undefined => Some(f64::NAN),
  }
}

pub fn coerce_to_str(v: &Value) -> String {
  match v {
    Str(v) => v.clone(),
    Num(v) => v.to_string(),
    Bool(v) => v.to_string(),
    Undefined => "undefined".to_string(),
    Null => "null".to_string(),
  }
}

fn coerce_to_uint32(v: &Value) -> Option<u32> {
  let n = coerce_to_num(v)?;
  if !n.is_finite() || n == 0.0 {
    return Some(0);
  }
  Some(n.trunc().rem_euclid(4294967296.0) as u32)
}

fn coerce_to_int32(v: &Value) -> Option<i32> {
  coerce_to_uint32(v).map(|v| v as i32)
}

pub fn coerce_to_bool(v: &Value) -> bool {
  match v {
    Bool(b) => *b,
    Null | Undefined => false,
    Num(JN(v)) => !v.is_nan() && *v != 0.0,
    Str(v) => !v.is_empty(),
  }
}

/// Abstract relational comparison. `Some(None)` means the operands are
/// unordered (a NaN is involved) and every relational operator yields false.
fn js_cmp(a: &Value, b: &Value) -> Option<Option<Ordering>> {
  match (a, b) {
    // Strings compare by UTF-16 code units, not by code points.
    (Str(a), Str(b)) => Some(Some(a.encode_utf16().cmp(b.encode_utf16()))),
    (a, b) => {
      let a = coerce_to_num(a)?;
      let b = coerce_to_num(b)?;
      Some(a.partial_cmp(&b))
    }
  }
}

fn js_mod(a: f64, b: f64) -> f64 {
  if b == 0.0 || a.is_infinite() {
    f64::NAN
  } else {
    a % b
  }
}

fn js_strict_eq(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Num(v), _) | (_, Num(v)) if v.0.is_nan() => false,
    (a, b) => a == b,
  }
}

fn js_loose_eq(a: &Value, b: &Value) -> Option<bool> {
  if discriminant(a) == discriminant(b) {
    return Some(js_strict_eq(a, b));
  }
  match (a, b) {
    (Null, Undefined) | (Undefined, Null) => Some(true),
    (Num(l), Str(r)) => Some(l.0 == coerce_str_to_num(r)?),
    (Str(l), Num(r)) => Some(coerce_str_to_num(l)? == r.0),
    (Bool(l), r) => js_loose_eq(&Num(JN(*l as u8 as f64)), r),
    (l, Bool(r)) => js_loose_eq(l, &Num(JN(*r as u8 as f64))),
    _ => Some(false),
  }
}

fn num(v: f64) -> Value {
  Num(JN(v))
}

pub fn fold_binary(op: OperatorName, a: &Value, b: &Value) -> Option<Value> {
  use OperatorName::*;
  let shift = |b: &Value| coerce_to_uint32(b).map(|s| s & 0x1f);
  #[rustfmt::skip]
  let res = match op {
    LogicalAnd => if coerce_to_bool(a) { b.clone() } else { a.clone() },
    LogicalOr => if coerce_to_bool(a) { a.clone() } else { b.clone() },
    Addition => match (a, b) {
      (Str(_), _) | (_, Str(_)) => Str(format!("{}{}", coerce_to_str(a), coerce_to_str(b))),
      _ => num(coerce_to_num(a)? + coerce_to_num(b)?),
    },
    Subtraction => num(coerce_to_num(a)? - coerce_to_num(b)?),
    Multiplication => num(coerce_to_num(a)? * coerce_to_num(b)?),
    Division => num(coerce_to_num(a)? / coerce_to_num(b)?),
    Remainder => num(js_mod(coerce_to_num(a)?, coerce_to_num(b)?)),
    BitwiseAnd => num((coerce_to_int32(a)? & coerce_to_int32(b)?) as f64),
    BitwiseOr => num((coerce_to_int32(a)? | coerce_to_int32(b)?) as f64),
    BitwiseXor => num((coerce_to_int32(a)? ^ coerce_to_int32(b)?) as f64),
    BitwiseLeftShift => num(coerce_to_int32(a)?.wrapping_shl(shift(b)?) as f64),
    BitwiseRightShift => num(coerce_to_int32(a)?.wrapping_shr(shift(b)?) as f64),
    BitwiseUnsignedRightShift => num(coerce_to_uint32(a)?.wrapping_shr(shift(b)?) as f64),
    Equality => Bool(js_loose_eq(a, b)?),
    Inequality => Bool(!js_loose_eq(a, b)?),
    StrictEquality => Bool(js_strict_eq(a, b)),
    StrictInequality => Bool(!js_strict_eq(a, b)),
    LessThan => Bool(js_cmp(a, b)?.is_some_and(|c| c.is_lt())),
    LessThanOrEqual => Bool(js_cmp(a, b)?.is_some_and(|c| c.is_le())),
    GreaterThan => Bool(js_cmp(a, b)?.is_some_and(|c| c.is_gt())),
    GreaterThanOrEqual => Bool(js_cmp(a, b)?.is_some_and(|c| c.is_ge())),
    // Both throw when the right operand is a primitive.
    In | Instanceof => return None,
    _ => return None,
  };
  Some(res)
}

pub fn fold_unary(op: OperatorName, a: &Value) -> Option<Value> {
  #[rustfmt::skip]
  let res = match (op, a) {
    (OperatorName::LogicalNot, a) => Bool(!coerce_to_bool(a)),
    (OperatorName::BitwiseNot, a) => num((!coerce_to_int32(a)?) as f64),
    (OperatorName::UnaryNegation, a) => num(-coerce_to_num(a)?),
    (OperatorName::UnaryPlus, a) => num(coerce_to_num(a)?),
    (OperatorName::Void, _) => Undefined,
    (OperatorName::Typeof, Bool(_)) => Str("boolean".into()),
    (OperatorName::Typeof, Null) => Str("object".into()),
    (OperatorName::Typeof, Num(_)) => Str("number".into()),
    (OperatorName::Typeof, Str(_)) => Str("string".into()),
    (OperatorName::Typeof, Undefined) => Str("undefined".into()),
    _ => return None,
  };
  Some(res)
}
