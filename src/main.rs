//! `cauchy-ec` CLI: a thin developer-facing wrapper around the library's
//! `create`, `encode`, `xor`, and `search` operations.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cauchy_ec::context::Context;
use cauchy_ec::error::Result;
use cauchy_ec::{encode as encode_op, search};

/// Cauchy Reed-Solomon erasure coding core: context builder, encoder, and
/// offline parameter search.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an encoding context for (k, m) and write it to a file.
    Create {
        /// Number of data shards.
        #[arg(long)]
        k: usize,
        /// Number of parity shards.
        #[arg(long)]
        m: usize,
        /// Output path for the serialized context.
        #[arg(long)]
        out: PathBuf,
    },
    /// Encode or reconstruct shards using a previously created context.
    Encode {
        /// Path to a context file produced by `create`.
        #[arg(long)]
        context: PathBuf,
        /// Bitmask of currently-valid shard indices.
        #[arg(long)]
        sources: u32,
        /// Bitmask of shard indices to (re)compute.
        #[arg(long)]
        targets: u32,
        /// Path to the k-shard data buffer (read and written in place).
        #[arg(long)]
        buffer: PathBuf,
        /// Path to the m-shard parity buffer (read and written in place).
        #[arg(long)]
        parity: PathBuf,
    },
    /// XOR one file into another, in place.
    Xor {
        /// Source file to XOR from.
        #[arg(long)]
        source: PathBuf,
        /// Target file to XOR into (read and written in place).
        #[arg(long)]
        target: PathBuf,
    },
    /// Run the offline parameter search and print the resulting table.
    Search,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    match args.command {
        Command::Create { k, m, out } => run_create(k, m, &out),
        Command::Encode {
            context,
            sources,
            targets,
            buffer,
            parity,
        } => run_encode(&context, sources, targets, &buffer, &parity),
        Command::Xor { source, target } => run_xor(&source, &target),
        Command::Search => {
            search::search();
            Ok(())
        }
    }
}

fn run_create(k: usize, m: usize, out: &PathBuf) -> Result<()> {
    let ctx = Context::create(k, m)?;
    let bytes = ctx.to_bytes();
    fs::write(out, &bytes).expect("write context file");
    info!(k, m, bytes = bytes.len(), path = %out.display(), "wrote encoding context");
    Ok(())
}

fn run_encode(
    context_path: &PathBuf,
    sources: u32,
    targets: u32,
    buffer_path: &PathBuf,
    parity_path: &PathBuf,
) -> Result<()> {
    let context_bytes = fs::read(context_path).expect("read context file");
    let ctx = Context::from_bytes(&context_bytes)?;

    let mut buffer = fs::read(buffer_path).expect("read buffer file");
    let mut parity = fs::read(parity_path).expect("read parity file");
    let buffer_size = buffer.len();
    let parity_size = parity.len();

    encode_op::encode(
        &ctx,
        sources,
        targets,
        &mut buffer,
        0,
        buffer_size,
        &mut parity,
        0,
        parity_size,
    )?;

    fs::write(buffer_path, &buffer).expect("write buffer file");
    fs::write(parity_path, &parity).expect("write parity file");
    info!(sources, targets, "encode complete");
    Ok(())
}

fn run_xor(source_path: &PathBuf, target_path: &PathBuf) -> Result<()> {
    let source = fs::read(source_path).expect("read xor source file");
    let mut target = fs::read(target_path).expect("read xor target file");
    let size = source.len().min(target.len());
    encode_op::xor(&source, 0, &mut target, 0, size)?;
    fs::write(target_path, &target).expect("write xor target file");
    info!(bytes = size, "xor complete");
    Ok(())
}

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
