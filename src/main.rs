use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walk_sh::{create_builtin_registry, Config, ScriptNode, SliceMode};

#[derive(Parser)]
#[command(name = "walk-sh")]
#[command(about = "Execute a parsed shell statement tree")]
#[command(version)]
struct Cli {
    /// Exit immediately if a statement exits with non-zero status
    #[arg(short = 'e', long = "errexit")]
    errexit: bool,

    /// Print each statement, prefixed with PS4, before running it
    #[arg(short = 'x', long = "xtrace")]
    xtrace: bool,

    /// How the second bound of ${var:offset:length} is read
    #[arg(long = "slice-mode", value_enum)]
    slice_mode: Option<SliceModeArg>,

    /// Set an initial variable (repeatable)
    #[arg(long = "env", value_name = "NAME=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,

    /// TOML file with [options] and [env] tables
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print {"exitCode", "error"} as JSON after the script finishes
    #[arg(long = "json")]
    json: bool,

    /// JSON statement tree to execute (stdin when omitted)
    #[arg(value_name = "TREE_FILE")]
    tree_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SliceModeArg {
    EndIndex,
    Count,
}

impl From<SliceModeArg> for SliceMode {
    fn from(arg: SliceModeArg) -> Self {
        match arg {
            SliceModeArg::EndIndex => SliceMode::EndIndex,
            SliceModeArg::Count => SliceMode::Count,
        }
    }
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(2);
}

fn main() {
    // Diagnostics go to stderr, script output to stdout (respects RUST_LOG)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load(path).unwrap_or_else(|e| fail(e.to_string())),
        None => Config::default(),
    };
    if cli.errexit {
        config.options.exit_on_error = true;
    }
    if cli.xtrace {
        config.options.print_executed = true;
    }
    if let Some(mode) = cli.slice_mode {
        config.options.slice_mode = mode.into();
    }
    config.env.extend(cli.env);

    let source = match cli.tree_file {
        Some(ref file) => std::fs::read_to_string(file)
            .unwrap_or_else(|e| fail(format!("cannot read tree file: {}: {}", file.display(), e))),
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                fail(format!("cannot read stdin: {}", e));
            }
            buf
        }
    };

    let script: ScriptNode = serde_json::from_str(&source)
        .unwrap_or_else(|e| fail(format!("invalid statement tree: {}", e)));
    tracing::debug!(statements = script.statements.len(), "loaded statement tree");

    let mut interpreter = config.into_interpreter(create_builtin_registry());
    let result = interpreter.run(&script);

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "exitCode": result.exit_code,
                "error": result.error.as_ref().map(|e| e.to_string()),
            })
        );
    }

    std::process::exit(result.exit_code);
}
