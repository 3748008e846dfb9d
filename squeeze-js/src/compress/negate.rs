use crate::ast::expr::{BinaryExpr, CondExpr, Expr, UnaryExpr};
use crate::ast::make;
use crate::ast::node::Node;
use crate::operator::OperatorName;

use super::Compressor;

/// Relational operators only flip when `comparations` is on, since `!(a < b)`
/// and `a >= b` disagree when either side is NaN.
fn flipped_operator(op: OperatorName, cx: &Compressor) -> Option<OperatorName> {
  use OperatorName::*;
  let flipped = match op {
    Equality => Inequality,
    Inequality => Equality,
    StrictEquality => StrictInequality,
    StrictInequality => StrictEquality,
    LessThanOrEqual if cx.options().comparations => GreaterThan,
    LessThan if cx.options().comparations => GreaterThanOrEqual,
    GreaterThanOrEqual if cx.options().comparations => LessThan,
    GreaterThan if cx.options().comparations => LessThanOrEqual,
    _ => return None,
  };
  Some(flipped)
}

/// Returns an expression whose truthiness is the opposite of `expr`'s,
/// avoiding a `!` wrapper where the operator itself can absorb it.
pub fn negate(expr: Node<Expr>, cx: &Compressor) -> Node<Expr> {
  let Node { loc, stx } = expr;
  match *stx {
    Expr::Unary(unary) if unary.stx.operator == OperatorName::LogicalNot => {
      let UnaryExpr { argument, .. } = *unary.stx;
      argument
    }
    Expr::Cond(cond) => {
      let CondExpr {
        test,
        consequent,
        alternate,
      } = *cond.stx;
      make::cond(loc, test, negate(consequent, cx), negate(alternate, cx))
    }
    Expr::Binary(binary) => {
      let BinaryExpr {
        operator,
        left,
        right,
      } = *binary.stx;
      match operator {
        // The left side keeps its side effects; only the result is negated.
        OperatorName::Comma => make::binary(loc, operator, left, negate(right, cx)),
        OperatorName::LogicalAnd => {
          make::binary(loc, OperatorName::LogicalOr, negate(left, cx), negate(right, cx))
        }
        OperatorName::LogicalOr => {
          make::binary(loc, OperatorName::LogicalAnd, negate(left, cx), negate(right, cx))
        }
        op => match flipped_operator(op, cx) {
          Some(flipped) => make::binary(loc, flipped, left, right),
          None => make::unary(loc, OperatorName::LogicalNot, make::binary(loc, op, left, right)),
        },
      }
    }
    stx => make::unary(loc, OperatorName::LogicalNot, Node::new(loc, stx)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::make::*;
  use crate::compress::{CompressOptions, OptionName};
  use crate::emit::render_minified;
  use crate::loc::Loc;

  fn l() -> Loc {
    Loc::default()
  }

  fn negated(expr: Node<Expr>, options: CompressOptions) -> String {
    let cx = Compressor::new(options);
    render_minified(&negate(expr, &cx))
  }

  fn lt() -> Node<Expr> {
    binary(l(), OperatorName::LessThan, id(l(), "a"), id(l(), "b"))
  }

  #[test]
  fn test_comparisons_flip_only_with_comparations() {
    assert_eq!(negated(lt(), CompressOptions::default()), "a>=b");
    assert_eq!(
      negated(lt(), CompressOptions::default().with(OptionName::Comparations, false)),
      "!(a<b)"
    );
    let eq = binary(l(), OperatorName::StrictEquality, id(l(), "a"), lit_null(l()));
    assert_eq!(negated(eq, CompressOptions::all(false)), "a!==null");
  }

  #[test]
  fn test_de_morgan() {
    let expr = binary(
      l(),
      OperatorName::LogicalAnd,
      unary(l(), OperatorName::LogicalNot, id(l(), "a")),
      lt(),
    );
    assert_eq!(negated(expr, CompressOptions::default()), "a||a>=b");
  }

  #[test]
  fn test_sequence_and_conditional() {
    let seq = binary(l(), OperatorName::Comma, call(l(), id(l(), "f"), vec![]), id(l(), "x"));
    assert_eq!(negated(seq, CompressOptions::default()), "f(),!x");
    let ternary = cond(l(), id(l(), "c"), id(l(), "x"), lit_bool(l(), true));
    assert_eq!(negated(ternary, CompressOptions::default()), "c?!x:!true");
  }

  #[test]
  fn test_double_negation_is_stripped() {
    let expr = unary(l(), OperatorName::LogicalNot, call(l(), id(l(), "f"), vec![]));
    assert_eq!(negated(expr, CompressOptions::default()), "f()");
  }
}
