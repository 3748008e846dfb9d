use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Conditional,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  /// Relational and equality operators, plus `in` and `instanceof`.
  pub fn is_comparison(self) -> bool {
    matches!(
      self,
      OperatorName::Equality
        | OperatorName::Inequality
        | OperatorName::StrictEquality
        | OperatorName::StrictInequality
        | OperatorName::LessThan
        | OperatorName::LessThanOrEqual
        | OperatorName::GreaterThan
        | OperatorName::GreaterThanOrEqual
        | OperatorName::In
        | OperatorName::Instanceof
    )
  }

  pub fn is_prefix_keyword(self) -> bool {
    matches!(
      self,
      OperatorName::Delete | OperatorName::Typeof | OperatorName::Void
    )
  }

  pub fn text(self) -> &'static str {
    OPERATORS[&self].text
  }

  pub fn precedence(self) -> u8 {
    OPERATORS[&self].precedence
  }

  pub fn associativity(self) -> Associativity {
    OPERATORS[&self].associativity
  }
}

#[derive(Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub text: &'static str,
  pub precedence: u8,
  pub associativity: Associativity,
}

/// Precedence of member access, calls and `new`.
pub const CALL_MEMBER_PRECEDENCE: u8 = 18;
/// Precedence of atoms: identifiers, literals, parenthesized expressions.
pub const PRIMARY_PRECEDENCE: u8 = 19;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let table = [
    (Comma, ",", 1, Left),
    (Assignment, "=", 3, Right),
    (AssignmentAddition, "+=", 3, Right),
    (AssignmentBitwiseAnd, "&=", 3, Right),
    (AssignmentBitwiseLeftShift, "<<=", 3, Right),
    (AssignmentBitwiseOr, "|=", 3, Right),
    (AssignmentBitwiseRightShift, ">>=", 3, Right),
    (AssignmentBitwiseUnsignedRightShift, ">>>=", 3, Right),
    (AssignmentBitwiseXor, "^=", 3, Right),
    (AssignmentDivision, "/=", 3, Right),
    (AssignmentMultiplication, "*=", 3, Right),
    (AssignmentRemainder, "%=", 3, Right),
    (AssignmentSubtraction, "-=", 3, Right),
    (Conditional, "?", 4, Right),
    (LogicalOr, "||", 5, Left),
    (LogicalAnd, "&&", 6, Left),
    (BitwiseOr, "|", 7, Left),
    (BitwiseXor, "^", 8, Left),
    (BitwiseAnd, "&", 9, Left),
    (Equality, "==", 10, Left),
    (Inequality, "!=", 10, Left),
    (StrictEquality, "===", 10, Left),
    (StrictInequality, "!==", 10, Left),
    (LessThan, "<", 11, Left),
    (LessThanOrEqual, "<=", 11, Left),
    (GreaterThan, ">", 11, Left),
    (GreaterThanOrEqual, ">=", 11, Left),
    (In, "in", 11, Left),
    (Instanceof, "instanceof", 11, Left),
    (BitwiseLeftShift, "<<", 12, Left),
    (BitwiseRightShift, ">>", 12, Left),
    (BitwiseUnsignedRightShift, ">>>", 12, Left),
    (Addition, "+", 13, Left),
    (Subtraction, "-", 13, Left),
    (Multiplication, "*", 14, Left),
    (Division, "/", 14, Left),
    (Remainder, "%", 14, Left),
    (BitwiseNot, "~", 16, Right),
    (Delete, "delete", 16, Right),
    (LogicalNot, "!", 16, Right),
    (PrefixDecrement, "--", 16, Right),
    (PrefixIncrement, "++", 16, Right),
    (Typeof, "typeof", 16, Right),
    (UnaryNegation, "-", 16, Right),
    (UnaryPlus, "+", 16, Right),
    (Void, "void", 16, Right),
    (PostfixDecrement, "--", 17, Left),
    (PostfixIncrement, "++", 17, Left),
  ];
  let mut map = HashMap::<OperatorName, Operator>::new();
  for (name, text, precedence, associativity) in table {
    map.insert(name, Operator { name, text, precedence, associativity });
  }
  map
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_every_operator_has_an_entry() {
    assert_eq!(OPERATORS.len(), 48);
    assert!(OPERATORS.values().all(|op| OPERATORS[&op.name].text == op.text));
  }

  #[test]
  fn test_classification() {
    assert!(OperatorName::AssignmentAddition.is_assignment());
    assert!(!OperatorName::Equality.is_assignment());
    assert!(OperatorName::Instanceof.is_comparison());
    assert!(!OperatorName::LogicalAnd.is_comparison());
    assert!(OperatorName::Multiplication.precedence() > OperatorName::Addition.precedence());
  }
}
