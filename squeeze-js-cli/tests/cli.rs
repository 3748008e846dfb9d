use assert_cmd::Command;
use serde_json::Value;
use squeeze_js::ast::make::*;
use squeeze_js::ast::node::Node;
use squeeze_js::ast::stmt::{Stmt, VarDeclMode};
use squeeze_js::loc::Loc;
use std::time::Duration;

fn squeeze_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("squeeze-js")
}

fn l() -> Loc {
  Loc::default()
}

fn call_stmt(name: &str) -> Node<Stmt> {
  expr_stmt(call(l(), id(l(), name), vec![]))
}

fn program_json(body: Vec<Node<Stmt>>) -> Vec<u8> {
  serde_json::to_vec(&top_level(body)).unwrap()
}

fn unreachable_var_program() -> Vec<u8> {
  program_json(vec![func_decl(Loc(0, 40), "f", &[], vec![
    return_stmt(Loc(13, 22), Some(id(Loc(20, 21), "x"))),
    var_decl(Loc(23, 35), VarDeclMode::Var, vec![(
      "y",
      Some(call(Loc(31, 34), id(Loc(31, 32), "g"), vec![])),
    )]),
  ])])
}

#[test]
fn writes_minified_output_to_stdout() {
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(program_json(vec![call_stmt("a"), call_stmt("b")]))
    .assert()
    .success()
    .code(0);

  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a(),b();");
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    String::from_utf8_lossy(&assert.get_output().stderr)
  );
}

#[test]
fn accepts_hand_written_trees_without_locations() {
  let input = r#"{"stx":{"body":[
    {"stx":{"$t":"Expr","stx":{"expr":{"stx":{"$t":"ComputedMember","stx":{
      "object":{"stx":{"$t":"Id","stx":{"name":"a"}}},
      "member":{"stx":{"$t":"LitStr","stx":{"value":"b"}}}
    }}}}}}
  ]}}"#;
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(input)
    .assert()
    .success();
  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a.b;");
}

#[test]
fn diagnostics_go_to_stderr() {
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(unreachable_var_program())
    .assert()
    .success();

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "function f(){return x;var y;}"
  );
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(
    stderr.contains("warning[SQ0003]: Declarations in unreachable code! [23..35]"),
    "unexpected stderr: {stderr}"
  );
}

#[test]
fn json_mode_reports_output_and_diagnostics() {
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--json")
    .write_stdin(unreachable_var_program())
    .assert()
    .success();

  let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
  assert_eq!(json["output"], "function f(){return x;var y;}");
  let diagnostics = json["diagnostics"].as_array().unwrap();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0]["code"], "SQ0003");
  assert_eq!(diagnostics[0]["severity"], "warning");
  assert_eq!(diagnostics[0]["primary"], serde_json::json!([23, 35]));
  assert!(assert.get_output().stderr.is_empty());
}

#[test]
fn disabled_options_are_skipped() {
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--disable")
    .arg("sequences")
    .arg("--disable")
    .arg("warnings")
    .write_stdin(program_json(vec![call_stmt("a"), call_stmt("b")]))
    .assert()
    .success();
  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a();b();");
}

#[test]
fn none_then_enable_turns_on_only_named_options() {
  let body = vec![
    call_stmt("a"),
    call_stmt("b"),
    if_stmt(l(), id(l(), "c"), call_stmt("d"), None),
  ];
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--none")
    .arg("--enable")
    .arg("sequences")
    .write_stdin(program_json(body))
    .assert()
    .success();
  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "a(),b();if(c)d();"
  );
}

#[test]
fn config_file_overrides_defaults() {
  let dir = std::env::temp_dir().join(format!("squeeze-js-cli-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let config = dir.join("config.json");
  std::fs::write(&config, r#"{"sequences": false}"#).unwrap();

  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--config")
    .arg(&config)
    .write_stdin(program_json(vec![call_stmt("a"), call_stmt("b")]))
    .assert()
    .success();
  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a();b();");

  std::fs::write(&config, r#"{"sequence": false}"#).unwrap();
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--config")
    .arg(&config)
    .write_stdin(program_json(vec![call_stmt("a")]))
    .assert()
    .failure()
    .code(2);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("`sequence` is not a supported option"), "unexpected stderr: {stderr}");

  std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unknown_option_flag_is_rejected() {
  squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--enable")
    .arg("mangle")
    .write_stdin(program_json(vec![call_stmt("a")]))
    .assert()
    .failure()
    .code(2);
}

#[test]
fn malformed_tree_is_a_host_error() {
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .write_stdin(r#"{"stx":{"body":[{"stx":{"$t":"Nope"}}]}}"#)
    .assert()
    .failure()
    .code(2);

  assert!(assert.get_output().stdout.is_empty());
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.starts_with("error: malformed syntax tree"), "unexpected stderr: {stderr}");
}

#[test]
fn missing_input_file_is_a_host_error() {
  let missing =
    std::env::temp_dir().join(format!("squeeze-js-cli-missing-{}.json", std::process::id()));
  let assert = squeeze_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(&missing)
    .assert()
    .failure()
    .code(2);

  assert!(assert.get_output().stdout.is_empty());
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.starts_with("error: failed to read"), "unexpected stderr: {stderr}");
  assert!(stderr.contains("I/O error"), "unexpected stderr: {stderr}");
}
