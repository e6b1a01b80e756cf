//! chaintrace CLI — resolve EVM call traces from the terminal.
//!
//! Usage:
//! ```bash
//! # Summarise a forge/cast trace
//! forge test -vvvv | chaintrace resolve
//!
//! # Full result as JSON, or the reconstructed call tree
//! chaintrace resolve --file trace.txt --json
//! chaintrace resolve --file trace.txt --tree
//!
//! # Look up a selector, or compute one
//! chaintrace lookup --selector 0xa9059cbb
//! chaintrace selector --signature "transfer(address,uint256)"
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chaintrace_core::registry::{lookup_layered, parse_selector, SignatureRegistry};
use chaintrace_core::tree::{build_call_tree, render_tree};
use chaintrace_core::{ResolutionResult, ResolveError, TraceResolver};
use chaintrace_evm::known::{load_registry_json, looks_like_signature};
use chaintrace_evm::{selector_of, EvmTraceResolver, KnownSignatureTable};
use clap::{Parser, Subcommand};
use tracing::debug;

mod config;
mod logging;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "chaintrace",
    about = "Resolve EVM call traces into function signatures and selectors",
    long_about = "
chaintrace reads the tree-rendered call traces printed by EVM tracers and
reports every decodable call with its inferred signature and selector.

ENVIRONMENT VARIABLES:
  CHAINTRACE_CONFIG    Path to a YAML config file
  RUST_LOG             Log filter, overrides the configured level
",
    version
)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true, env = "CHAINTRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: trace | debug | info | warn | error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a trace into call records and a signature catalog
    Resolve {
        /// Trace file; stdin when absent or "-"
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Print the reconstructed call tree
        #[arg(long, conflicts_with = "json")]
        tree: bool,
    },

    /// Look up a selector in the bundled table and an optional signature file
    Lookup {
        /// 4-byte selector, e.g. 0xa9059cbb
        #[arg(long)]
        selector: String,
        /// JSON file of `{ "signature", "selector"? }` entries, checked first
        #[arg(long)]
        signatures: Option<PathBuf>,
    },

    /// Print the selector of a canonical signature
    Selector {
        /// e.g. "transfer(address,uint256)"
        #[arg(long)]
        signature: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.apply_flags(cli.log_level.as_deref(), cli.log_json);
    logging::init_tracing(&config.log);

    match cli.command {
        Commands::Resolve { file, json, tree } => {
            let format = OutputFormat::pick(json, tree, &config);
            cmd_resolve(
                file.as_deref(),
                format,
                std::io::stdin().lock(),
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )
        }
        Commands::Lookup {
            selector,
            signatures,
        } => cmd_lookup(&selector, signatures.as_deref()),
        Commands::Selector { signature } => cmd_selector(&signature),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Summary,
    Json,
    Tree,
}

impl OutputFormat {
    /// Flags first, then the config file. JSON beats tree.
    fn pick(json: bool, tree: bool, config: &CliConfig) -> Self {
        if json {
            Self::Json
        } else if tree {
            Self::Tree
        } else if config.output.json {
            Self::Json
        } else if config.output.tree {
            Self::Tree
        } else {
            Self::Summary
        }
    }
}

/// Read the whole trace from `file`, or from `stdin` when there is no file
/// or it is `-`.
fn read_input(file: Option<&Path>, mut stdin: impl Read) -> Result<Vec<u8>, ResolveError> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read(path).map_err(|e| {
            ResolveError::invalid_input(format!("cannot read '{}': {e}", path.display()))
        }),
        _ => {
            let mut raw = Vec::new();
            stdin
                .read_to_end(&mut raw)
                .map_err(|e| ResolveError::invalid_input(format!("cannot read stdin: {e}")))?;
            Ok(raw)
        }
    }
}

fn cmd_resolve(
    file: Option<&Path>,
    format: OutputFormat,
    stdin: impl Read,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let raw = read_input(file, stdin)?;
    let resolver = EvmTraceResolver::new();
    debug!(format = resolver.format(), bytes = raw.len(), "resolving trace");
    let result = resolver
        .resolve_bytes(&raw)
        .context("trace could not be resolved")?;

    if result.function_signatures.is_empty() {
        writeln!(err, "warning: no function signatures found")?;
    }

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        OutputFormat::Tree => write!(
            out,
            "{}",
            render_tree(&build_call_tree(&result.contract_calls))
        )?,
        OutputFormat::Summary => write!(out, "{}", summary(&result))?,
    }
    Ok(())
}

fn summary(result: &ResolutionResult) -> String {
    let mut out = format!("{result}\n");
    if !result.function_signatures.is_empty() {
        out.push_str("\nFunctions:\n");
        for sig in &result.function_signatures {
            out.push_str(&format!("  {}  {}\n", sig.selector, sig.name));
        }
    }
    if !result.contract_calls.is_empty() {
        out.push_str("\nCalls:\n");
        for call in &result.contract_calls {
            out.push_str(&format!(
                "  {}{} {} {} [{}]\n",
                "  ".repeat(call.depth),
                call.address,
                call.full_signature,
                call.selector,
                call.call_type
            ));
        }
    }
    out
}

fn cmd_lookup(selector: &str, signatures: Option<&Path>) -> Result<()> {
    let bytes = parse_selector(selector).ok_or_else(|| {
        ResolveError::invalid_input(format!("selector must be 4 hex bytes, got {selector:?}"))
    })?;

    let user = match signatures {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read signature file '{}'", path.display()))?;
            Some(
                load_registry_json(&json)
                    .with_context(|| format!("in signature file '{}'", path.display()))?,
            )
        }
        None => None,
    };

    let mut layers: Vec<&dyn SignatureRegistry> = Vec::new();
    if let Some(user) = &user {
        layers.push(user);
    }
    layers.push(&KnownSignatureTable);

    let hits = lookup_layered(&layers, bytes);
    if hits.is_empty() {
        println!("0x{}: unknown selector", hex::encode(bytes));
    }
    for hit in hits {
        println!("{}  {}  ({})", hit.selector_hex(), hit.signature, hit.source);
    }
    Ok(())
}

fn cmd_selector(signature: &str) -> Result<()> {
    let signature = signature.trim();
    if !looks_like_signature(signature) {
        return Err(ResolveError::invalid_input(format!(
            "not a canonical signature: {signature:?}"
        ))
        .into());
    }
    println!("{}  {}", selector_of(signature), signature);
    Ok(())
}
