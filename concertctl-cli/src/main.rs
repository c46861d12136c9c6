//! concertctl CLI - query and record concerts
//!
//! Opens one connection to the concerts database, runs a single repository
//! operation and prints the result. With no subcommand it describes concert 1
//! (band, venue, and stage introduction).
//!
//! Exit codes: 0 on success, 3 when the database cannot be reached, 1 for
//! any other failure.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use concertctl_core::error::EXIT_FAILURE;
use concertctl_core::{ConcertError, ConcertStore, PgConcertRepository};
use tracing::warn;

mod commands;
mod config;
mod output;
mod tracing_setup;

use commands::{DemoArgs, QueryCommand};
use config::DbArgs;
use output::OutputFormat;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "concertctl",
    author,
    version,
    about = "Query bands, venues, and concerts",
    long_about = "Answer relationship questions about bands, venues, and concerts \
                  (who played where, hometown shows, most frequent bands) and record new concerts."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    db: DbArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Describe one concert: band, venue, and introduction (default)
    Demo(DemoArgs),
    #[command(flatten)]
    Query(QueryCommand),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Demo(DemoArgs::default())
    }
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before parsing so clap's env fallbacks see .env values
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = run(cli).await;
    tracing_setup::shutdown_otel();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Connection failures get their own exit code; everything else is 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ConcertError>())
        .map(ConcertError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

async fn run(cli: Cli) -> Result<()> {
    let format = OutputFormat::from_json_flag(cli.json);

    match cli.command.unwrap_or_default() {
        Commands::Completions(args) => run_completions(args),
        command => {
            let config = cli.db.into_config()?;
            let repo = PgConcertRepository::connect(&config).await?;
            run_and_close(repo, command, format, &mut io::stdout().lock()).await
        }
    }
}

/// Run one command, then close the store on both paths. The command's own
/// error wins over a close failure.
async fn run_and_close<S, W>(
    mut store: S,
    command: Commands,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    S: ConcertStore,
    W: Write,
{
    let result = dispatch(&mut store, command, format, out).await;

    if let Err(err) = store.close().await {
        warn!(error = %err, "failed to close database connection");
    }
    result
}

async fn dispatch<S, W>(store: &mut S, command: Commands, format: OutputFormat, out: &mut W) -> Result<()>
where
    S: ConcertStore + ?Sized,
    W: Write,
{
    match command {
        Commands::Demo(args) => commands::run_demo(store, args, format, out).await,
        Commands::Query(query) => commands::run_query(store, query, format, out).await,
        Commands::Completions(args) => run_completions(args),
    }
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
