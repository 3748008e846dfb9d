use ahash::HashMap;
use clap::Parser;
use serde::Serialize;
use squeeze_js::diag::Diagnostic;
use squeeze_js::{rewrite_json, CompressOptions, OptionName, SqueezeError};
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "squeeze-js", about = "Compress a JSON-serialized JS syntax tree")]
struct Cli {
  /// JSON syntax tree to compress; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Original source text, used to print line and column numbers in diagnostics.
  #[arg(long)]
  source: Option<PathBuf>,

  /// JSON object mapping option names to booleans.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Start with every option disabled instead of enabled.
  #[arg(long)]
  none: bool,

  /// Enable an option; applied after `--config`.
  #[arg(long, value_name = "NAME")]
  enable: Vec<OptionName>,

  /// Disable an option; applied after `--config` and `--enable`.
  #[arg(long, value_name = "NAME")]
  disable: Vec<OptionName>,

  /// Emit `{"output", "diagnostics"}` as JSON instead of minified source.
  #[arg(long)]
  json: bool,

  /// Log rewrite spans and events as JSON to stderr.
  #[arg(long)]
  trace: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
  output: String,
  diagnostics: &'a [Diagnostic],
}

fn exit_with_host_error(message: impl AsRef<str>) -> ! {
  eprintln!("error: {}", message.as_ref());
  process::exit(2);
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .json()
    .with_ansi(false)
    .try_init();
}

fn read_all(path: Option<&PathBuf>) -> Result<Vec<u8>, SqueezeError> {
  let mut data = Vec::new();
  match path {
    Some(p) => File::open(p)?.read_to_end(&mut data)?,
    None => stdin().read_to_end(&mut data)?,
  };
  Ok(data)
}

fn write_all(path: Option<&PathBuf>, data: &[u8]) -> Result<(), SqueezeError> {
  match path {
    Some(p) => File::create(p)?.write_all(data)?,
    None => stdout().write_all(data)?,
  };
  Ok(())
}

fn display_path(path: Option<&PathBuf>, fallback: &str) -> String {
  path
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| fallback.to_string())
}

fn read_or_exit(path: Option<&PathBuf>) -> Vec<u8> {
  read_all(path).unwrap_or_else(|err| {
    exit_with_host_error(format!("failed to read {}: {err}", display_path(path, "<stdin>")))
  })
}

fn resolve_options(args: &Cli) -> CompressOptions {
  let overrides: HashMap<String, bool> = match args.config.as_ref() {
    Some(path) => {
      let raw = read_or_exit(Some(path));
      serde_json::from_slice(&raw).unwrap_or_else(|err| {
        exit_with_host_error(format!("invalid config {}: {err}", path.display()))
      })
    }
    None => HashMap::default(),
  };
  let mut options = CompressOptions::from_overrides(&overrides, args.none)
    .unwrap_or_else(|err| exit_with_host_error(err.to_string()));
  for name in args.enable.iter() {
    options.set(*name, true);
  }
  for name in args.disable.iter() {
    options.set(*name, false);
  }
  options
}

fn main() {
  let args = Cli::parse();
  init_tracing(args.trace);

  let options = resolve_options(&args);
  let input = read_or_exit(args.input.as_ref());
  let source = args.source.as_ref().map(|p| {
    String::from_utf8(read_or_exit(Some(p)))
      .unwrap_or_else(|err| exit_with_host_error(format!("source is not valid UTF-8: {err}")))
  });

  let squeezed = rewrite_json(&input, &options).unwrap_or_else(|err| exit_with_host_error(err.to_string()));
  let minified = squeezed.render_minified();

  let output = if args.json {
    let json = JsonOutput {
      output: minified,
      diagnostics: &squeezed.diagnostics,
    };
    serde_json::to_vec(&json)
      .unwrap_or_else(|err| exit_with_host_error(format!("failed to serialize JSON: {err}")))
  } else {
    for diagnostic in squeezed.diagnostics.iter() {
      eprintln!("{}", diagnostic.render(source.as_deref()));
    }
    minified.into_bytes()
  };

  if let Err(err) = write_all(args.output.as_ref(), &output) {
    exit_with_host_error(format!(
      "failed to write {}: {err}",
      display_path(args.output.as_ref(), "<stdout>")
    ));
  }
}
