use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lcdgen_cli::{build_generator, generate, load, validate, GenerateOptions, OutputFormat};

/// Grove RGB LCD configuration validator and wiring generator
#[derive(Parser, Debug)]
#[command(name = "lcdgen", version)]
#[command(about = "Validate Grove RGB LCD configuration and generate its wiring code")]
struct Args {
    /// Configuration document (YAML)
    input: PathBuf,

    /// Write generated code here instead of stdout
    #[arg(short, long, env = "LCDGEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, env = "LCDGEN_FORMAT", default_value_t = OutputFormat::Cpp)]
    format: OutputFormat,

    /// Bus variable for devices without `i2c_id`
    #[arg(long, env = "LCDGEN_I2C_BUS", default_value = "i2c_bus")]
    i2c_bus: String,

    /// Validate only; do not generate code
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let document = load(&args.input)?;

    if args.check {
        validate(&build_generator()?, &document)?;
        return Ok(());
    }

    let options = GenerateOptions {
        format: args.format,
        i2c_bus: args.i2c_bus.clone(),
    };
    let rendered = generate(&document, &options)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), "wrote generated code");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lcdgen={level},lcdgen_cli={level},codegen={level},lcd_grove_rgb={level}").into()
    });

    // Generated code goes to stdout, so logs stay on stderr
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();
}
