use crate::ast::expr::{BinaryExpr, Expr};
use crate::ast::node::Node;
use crate::operator::OperatorName;

/// Whether the expression always produces a boolean. Conservative: `false`
/// means unknown.
pub fn is_boolean(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::LitBool(_) => true,
    Expr::Unary(unary) => matches!(
      unary.stx.operator,
      OperatorName::LogicalNot | OperatorName::Delete
    ),
    Expr::Binary(binary) => {
      let BinaryExpr { operator, left, right } = binary.stx.as_ref();
      match operator {
        op if op.is_comparison() => true,
        OperatorName::LogicalAnd | OperatorName::LogicalOr => is_boolean(left) && is_boolean(right),
        OperatorName::Assignment | OperatorName::Comma => is_boolean(right),
        _ => false,
      }
    }
    Expr::Cond(cond) => is_boolean(&cond.stx.consequent) && is_boolean(&cond.stx.alternate),
    _ => false,
  }
}

/// Whether the expression always produces a string. Conservative: `false`
/// means unknown.
pub fn is_string(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::LitStr(_) => true,
    Expr::Unary(unary) => unary.stx.operator == OperatorName::Typeof,
    Expr::Binary(binary) => {
      let BinaryExpr { operator, left, right } = binary.stx.as_ref();
      match operator {
        OperatorName::Addition => is_string(left) || is_string(right),
        OperatorName::Assignment => is_string(right),
        _ => false,
      }
    }
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::make::*;
  use crate::loc::Loc;

  fn l() -> Loc {
    Loc::default()
  }

  #[test]
  fn test_is_boolean() {
    let a = || id(l(), "a");
    let b = || id(l(), "b");
    assert!(is_boolean(&lit_bool(l(), false)));
    assert!(is_boolean(&unary(l(), OperatorName::LogicalNot, a())));
    assert!(is_boolean(&binary(l(), OperatorName::In, a(), b())));
    assert!(is_boolean(&binary(l(), OperatorName::Comma, a(), lit_bool(l(), true))));
    assert!(!is_boolean(&binary(l(), OperatorName::LogicalAnd, a(), lit_bool(l(), true))));
    assert!(is_boolean(&binary(
      l(),
      OperatorName::LogicalOr,
      unary(l(), OperatorName::LogicalNot, a()),
      binary(l(), OperatorName::LessThan, a(), b()),
    )));
    assert!(!is_boolean(&binary(l(), OperatorName::AssignmentAddition, a(), lit_bool(l(), true))));
    assert!(!is_boolean(&cond(l(), a(), lit_bool(l(), true), b())));
    assert!(!is_boolean(&a()));
  }

  #[test]
  fn test_is_string() {
    let a = || id(l(), "a");
    assert!(is_string(&lit_str(l(), "")));
    assert!(is_string(&unary(l(), OperatorName::Typeof, a())));
    assert!(is_string(&binary(l(), OperatorName::Addition, a(), lit_str(l(), "x"))));
    assert!(is_string(&binary(l(), OperatorName::Assignment, a(), lit_str(l(), "x"))));
    assert!(!is_string(&binary(l(), OperatorName::Addition, a(), lit_num(l(), 1.0))));
    assert!(!is_string(&binary(l(), OperatorName::Comma, a(), lit_str(l(), "x"))));
  }
}
