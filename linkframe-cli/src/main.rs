use anyhow::Result;
use clap::{Parser, Subcommand};
use linkframe_cli::{commands, LinkArgs};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "linkframe")]
#[command(about = "Linkframe - Byte-stuffed framing with CRC or parity checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a file into framed wire bytes
    Pack {
        /// Input file, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output file for the wire stream, or - for stdout
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        link: LinkArgs,
    },

    /// Recover payloads from a possibly damaged wire stream
    Unpack {
        /// Input wire stream, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output file for recovered bytes, or - for stdout
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        link: LinkArgs,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Check every frame in a wire stream
    Verify {
        /// Input wire stream, or - for stdin
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        link: LinkArgs,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr; stdout may carry wire bytes
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Pack {
            input,
            output,
            link,
        } => commands::pack::execute(&input, &output, &link).map(|_| ExitCode::SUCCESS),

        Commands::Unpack {
            input,
            output,
            link,
            stats_only,
        } => commands::unpack::execute(&input, output.as_deref(), &link, stats_only)
            .map(|_| ExitCode::SUCCESS),

        Commands::Verify { input, link } => {
            let summary = commands::verify::execute(&input, &link)?;
            Ok(if summary.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
