use proptest::prelude::*;
use squeeze_js::ast::expr::Expr;
use squeeze_js::ast::make::*;
use squeeze_js::ast::node::Node;
use squeeze_js::ast::stmt::{Stmt, VarDeclMode};
use squeeze_js::compress::eval::{coerce_to_bool, fold_value};
use squeeze_js::compress::negate::negate;
use squeeze_js::compress::predicates::is_boolean;
use squeeze_js::compress::squeeze::squeeze_expr;
use squeeze_js::compress::Compressor;
use squeeze_js::loc::Loc;
use squeeze_js::operator::OperatorName;
use squeeze_js::{rewrite, CompressOptions, OptionName};

fn l() -> Loc {
  Loc::default()
}

// Relational flips are only equivalent without NaN operands.
fn nan_safe_options() -> CompressOptions {
  CompressOptions::default().with(OptionName::Comparations, false)
}

const BINARY_OPS: &[OperatorName] = &[
  OperatorName::Addition,
  OperatorName::Subtraction,
  OperatorName::Multiplication,
  OperatorName::Division,
  OperatorName::Remainder,
  OperatorName::BitwiseAnd,
  OperatorName::BitwiseOr,
  OperatorName::BitwiseXor,
  OperatorName::BitwiseLeftShift,
  OperatorName::BitwiseRightShift,
  OperatorName::BitwiseUnsignedRightShift,
  OperatorName::Equality,
  OperatorName::Inequality,
  OperatorName::StrictEquality,
  OperatorName::StrictInequality,
  OperatorName::LessThan,
  OperatorName::LessThanOrEqual,
  OperatorName::GreaterThan,
  OperatorName::GreaterThanOrEqual,
  OperatorName::LogicalAnd,
  OperatorName::LogicalOr,
];

const UNARY_OPS: &[OperatorName] = &[
  OperatorName::LogicalNot,
  OperatorName::BitwiseNot,
  OperatorName::UnaryNegation,
  OperatorName::UnaryPlus,
  OperatorName::Typeof,
  OperatorName::Void,
];

fn literal() -> impl Strategy<Value = Node<Expr>> {
  prop_oneof![
    (-20i32..20).prop_map(|v| lit_num(l(), v as f64)),
    prop::sample::select(vec!["", "0", "1", "a", " 2 ", "0x1f", "Infinity"])
      .prop_map(|s| lit_str(l(), s)),
    any::<bool>().prop_map(|v| lit_bool(l(), v)),
    Just(lit_null(l())),
    Just(lit_undefined(l())),
  ]
}

fn constant_expr() -> impl Strategy<Value = Node<Expr>> {
  literal().prop_recursive(4, 32, 3, |inner| {
    prop_oneof![
      (prop::sample::select(BINARY_OPS), inner.clone(), inner.clone())
        .prop_map(|(op, left, right)| binary(l(), op, left, right)),
      (prop::sample::select(UNARY_OPS), inner.clone())
        .prop_map(|(op, argument)| unary(l(), op, argument)),
      (inner.clone(), inner.clone(), inner)
        .prop_map(|(test, consequent, alternate)| cond(l(), test, consequent, alternate)),
    ]
  })
}

fn boolean_expr() -> impl Strategy<Value = Node<Expr>> {
  let leaf = prop_oneof![
    any::<bool>().prop_map(|v| lit_bool(l(), v)),
    name().prop_map(|n| unary(l(), OperatorName::LogicalNot, id(l(), n))),
    (
      prop::sample::select(vec![
        OperatorName::LessThan,
        OperatorName::GreaterThanOrEqual,
        OperatorName::Equality,
        OperatorName::StrictInequality,
        OperatorName::Instanceof,
      ]),
      name(),
      name(),
    )
      .prop_map(|(op, x, y)| binary(l(), op, id(l(), x), id(l(), y))),
  ];
  leaf.prop_recursive(4, 32, 3, |inner| {
    prop_oneof![
      (
        prop::sample::select(vec![OperatorName::LogicalAnd, OperatorName::LogicalOr]),
        inner.clone(),
        inner.clone(),
      )
        .prop_map(|(op, left, right)| binary(l(), op, left, right)),
      (name(), inner.clone(), inner.clone())
        .prop_map(|(n, consequent, alternate)| cond(l(), id(l(), n), consequent, alternate)),
      (name(), inner.clone()).prop_map(|(n, right)| binary(l(), OperatorName::Comma, id(l(), n), right)),
      (name(), inner).prop_map(|(n, right)| binary(l(), OperatorName::Assignment, id(l(), n), right)),
    ]
  })
}

fn name() -> impl Strategy<Value = &'static str> {
  prop::sample::select(vec!["a", "b", "c"])
}

fn test_expr() -> impl Strategy<Value = Node<Expr>> {
  prop_oneof![
    name().prop_map(|n| id(l(), n)),
    name().prop_map(|n| unary(l(), OperatorName::LogicalNot, id(l(), n))),
    (name(), name()).prop_map(|(x, y)| binary(l(), OperatorName::LessThan, id(l(), x), id(l(), y))),
    (name(), name()).prop_map(|(x, y)| binary(l(), OperatorName::Equality, id(l(), x), id(l(), y))),
    (0i32..3).prop_map(|v| lit_num(l(), v as f64)),
  ]
}

fn leaf_stmt() -> impl Strategy<Value = Node<Stmt>> {
  prop_oneof![
    prop::sample::select(vec!["f", "g", "h"])
      .prop_map(|callee| expr_stmt(call(l(), id(l(), callee), vec![]))),
    name().prop_map(|n| return_stmt(l(), Some(id(l(), n)))),
    (name(), 0i32..5, 0i32..5).prop_map(|(n, x, y)| var_decl(l(), VarDeclMode::Var, vec![(
      n,
      Some(binary(
        l(),
        OperatorName::Addition,
        lit_num(l(), x as f64),
        lit_num(l(), y as f64),
      )),
    )])),
    Just(empty_stmt(l())),
  ]
}

fn stmt() -> impl Strategy<Value = Node<Stmt>> {
  leaf_stmt().prop_recursive(3, 24, 4, |inner| {
    prop_oneof![
      prop::collection::vec(inner.clone(), 0..4).prop_map(|body| block(l(), body)),
      (test_expr(), inner.clone(), prop::option::of(inner))
        .prop_map(|(test, consequent, alternate)| if_stmt(l(), test, consequent, alternate)),
    ]
  })
}

fn program() -> impl Strategy<Value = Vec<Node<Stmt>>> {
  prop::collection::vec(stmt(), 1..6)
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn negation_flips_truthiness(expr in constant_expr()) {
    let cx = Compressor::new(nan_safe_options());
    let Some(value) = fold_value(&expr) else {
      return Ok(());
    };
    let negated = fold_value(&negate(expr, &cx));
    prop_assert_eq!(negated.map(|v| coerce_to_bool(&v)), Some(!coerce_to_bool(&value)));
  }

  #[test]
  fn double_negation_stays_boolean(expr in boolean_expr(), comparations in any::<bool>()) {
    prop_assert!(is_boolean(&expr));
    let cx = Compressor::new(CompressOptions::default().with(OptionName::Comparations, comparations));
    let twice = negate(negate(expr, &cx), &cx);
    prop_assert!(is_boolean(&twice));
  }

  #[test]
  fn squeezing_preserves_constant_values(expr in constant_expr()) {
    let mut cx = Compressor::new(nan_safe_options());
    let expected = fold_value(&expr);
    let squeezed = squeeze_expr(expr, &mut cx);
    prop_assert_eq!(fold_value(&squeezed), expected);
  }

  #[test]
  fn rewriting_is_idempotent(body in program()) {
    let options = CompressOptions::default();
    let first = rewrite(top_level(body), &options);
    let once = first.render_minified();
    let twice = rewrite(first.top, &options).render_minified();
    prop_assert_eq!(once, twice);
  }
}
