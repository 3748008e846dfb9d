use squeeze_js::ast::expr::{CallExpr, Expr};
use squeeze_js::ast::make::*;
use squeeze_js::ast::node::Node;
use squeeze_js::ast::stmt::{ForTripleStmt, ForTripleStmtInit, Stmt, VarDecl, VarDeclMode};
use squeeze_js::emit::render_minified;
use squeeze_js::loc::Loc;
use squeeze_js::operator::OperatorName;

fn l() -> Loc {
  Loc::default()
}

fn bin(op: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary(l(), op, left, right)
}

fn construct(callee: Node<Expr>) -> Node<Expr> {
  Node::new(
    l(),
    Expr::Call(Node::new(l(), CallExpr {
      construct: true,
      callee,
      arguments: vec![],
    })),
  )
}

fn for_with_init(init: ForTripleStmtInit) -> Node<Stmt> {
  Node::new(
    l(),
    Stmt::ForTriple(Node::new(l(), ForTripleStmt {
      init,
      cond: None,
      post: None,
      body: empty_stmt(l()),
    })),
  )
}

#[test]
fn operator_precedence_parentheses() {
  let sum = bin(OperatorName::Addition, id(l(), "a"), id(l(), "b"));
  let product = bin(OperatorName::Multiplication, sum, id(l(), "c"));
  assert_eq!(render_minified(&product), "(a+b)*c");

  // Left-associative: only the right operand needs parentheses.
  let left = bin(
    OperatorName::Subtraction,
    bin(OperatorName::Subtraction, id(l(), "a"), id(l(), "b")),
    id(l(), "c"),
  );
  assert_eq!(render_minified(&left), "a-b-c");
  let right = bin(
    OperatorName::Subtraction,
    id(l(), "a"),
    bin(OperatorName::Subtraction, id(l(), "b"), id(l(), "c")),
  );
  assert_eq!(render_minified(&right), "a-(b-c)");

  let not_less = unary(
    l(),
    OperatorName::LogicalNot,
    bin(OperatorName::LessThan, id(l(), "a"), id(l(), "b")),
  );
  assert_eq!(render_minified(&not_less), "!(a<b)");
}

#[test]
fn adjacent_tokens_are_separated() {
  let plus = bin(
    OperatorName::Addition,
    id(l(), "a"),
    unary(l(), OperatorName::UnaryPlus, id(l(), "b")),
  );
  assert_eq!(render_minified(&plus), "a+ +b");

  let minus = bin(OperatorName::Subtraction, id(l(), "a"), lit_num(l(), -1.0));
  assert_eq!(render_minified(&minus), "a- -1");

  let in_expr = bin(OperatorName::In, lit_str(l(), "k"), id(l(), "o"));
  assert_eq!(render_minified(&in_expr), "\"k\"in o");

  let typeof_expr = unary(l(), OperatorName::Typeof, id(l(), "x"));
  assert_eq!(render_minified(&typeof_expr), "typeof x");
}

#[test]
fn numbers_and_members() {
  assert_eq!(render_minified(&member(l(), lit_num(l(), 1.0), "toFixed")), "1..toFixed");
  assert_eq!(render_minified(&member(l(), lit_num(l(), 1.5), "toFixed")), "1.5.toFixed");
  assert_eq!(
    render_minified(&bin(OperatorName::Multiplication, lit_num(l(), 2.0), lit_num(l(), f64::INFINITY))),
    "2*(1/0)"
  );
  assert_eq!(render_minified(&lit_undefined(l())), "void 0");
}

#[test]
fn strings_pick_the_cheaper_quote() {
  assert_eq!(render_minified(&lit_str(l(), "it's")), "\"it's\"");
  assert_eq!(render_minified(&lit_str(l(), "say \"hi\"")), "'say \"hi\"'");
  assert_eq!(render_minified(&lit_str(l(), "a\nb")), "\"a\\nb\"");
}

#[test]
fn new_with_call_in_callee_is_parenthesized() {
  let callee = call(l(), id(l(), "a"), vec![]);
  assert_eq!(render_minified(&construct(callee)), "new(a())()");
  assert_eq!(render_minified(&construct(member(l(), id(l(), "a"), "b"))), "new a.b()");
}

#[test]
fn statements_that_would_parse_differently_are_wrapped() {
  let iife = expr_stmt(call(l(), func_expr(l(), None, &[], vec![]), vec![]));
  assert_eq!(render_minified(&iife), "(function(){}());");

  let in_init = for_with_init(ForTripleStmtInit::Expr(bin(
    OperatorName::In,
    id(l(), "a"),
    id(l(), "b"),
  )));
  assert_eq!(render_minified(&in_init), "for((a in b);;);");

  let decl = Node::new(l(), VarDecl {
    mode: VarDeclMode::Var,
    declarators: vec![squeeze_js::ast::stmt::VarDeclarator {
      name: "x".to_string(),
      initializer: Some(bin(OperatorName::In, id(l(), "a"), id(l(), "b"))),
    }],
  });
  assert_eq!(
    render_minified(&for_with_init(ForTripleStmtInit::Decl(decl))),
    "for(var x=(a in b);;);"
  );
}

#[test]
fn dangling_else_gets_braces() {
  let inner = if_stmt(l(), id(l(), "b"), expr_stmt(id(l(), "x")), None);
  let outer = if_stmt(l(), id(l(), "a"), inner, Some(expr_stmt(id(l(), "y"))));
  assert_eq!(render_minified(&outer), "if(a){if(b)x;}else y;");
}
