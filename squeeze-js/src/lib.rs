use ast::node::Node;
use ast::stx::TopLevel;
use compress::tighten::tighten_body;
use compress::{Ancestor, Compressor, NodeKind};
use diag::Diagnostic;
use emit::Render;

pub use compress::CompressOptions;
pub use compress::OptionName;
pub use err::SqueezeError;

pub mod ast;
pub mod compress;
pub mod diag;
pub mod emit;
pub mod err;
pub mod ident;
pub mod loc;
pub mod num;
pub mod operator;

/// The result of one rewrite run.
#[derive(Debug)]
pub struct Squeezed {
  pub top: Node<TopLevel>,
  pub diagnostics: Vec<Diagnostic>,
}

impl Squeezed {
  pub fn render_minified(&self) -> String {
    self.top.render_minified()
  }
}

/// Rewrites a whole program into a smaller equivalent one.
///
/// # Arguments
///
/// * `top` - The program to rewrite. It is consumed; the returned tree reuses its nodes.
/// * `options` - Which rewrites are enabled.
///
/// # Examples
///
/// ```
/// use squeeze_js::ast::make::{call, expr_stmt, id, top_level};
/// use squeeze_js::loc::Loc;
/// use squeeze_js::{rewrite, CompressOptions};
///
/// let l = Loc::default();
/// let top = top_level(vec![
///   expr_stmt(call(l, id(l, "a"), vec![])),
///   expr_stmt(call(l, id(l, "b"), vec![])),
/// ]);
/// let squeezed = rewrite(top, &CompressOptions::default());
/// assert_eq!(squeezed.render_minified(), "a(),b();");
/// ```
pub fn rewrite(top: Node<TopLevel>, options: &CompressOptions) -> Squeezed {
  let span = tracing::debug_span!("rewrite", statements = top.stx.body.len());
  let _guard = span.enter();

  let mut cx = Compressor::new(options.clone());
  let Node { loc, stx } = top;
  let TopLevel { body } = *stx;
  let body = cx.with_ancestor(Ancestor::new(NodeKind::TopLevel, loc), |cx| {
    tighten_body(body, cx)
  });
  let diagnostics = cx.into_diagnostics();
  tracing::debug!(diagnostics = diagnostics.len(), "rewrite complete");
  Squeezed {
    top: Node::new(loc, TopLevel { body }),
    diagnostics,
  }
}

/// Parses a JSON-serialized program and rewrites it.
pub fn rewrite_json(json: &[u8], options: &CompressOptions) -> Result<Squeezed, SqueezeError> {
  let top: Node<TopLevel> = serde_json::from_slice(json)?;
  Ok(rewrite(top, options))
}
