mod config;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use uri_scheme_core::{SchemeRegistry, SchemeValidationState};

use config::SchemeConfig;
use output::{OutputFormat, format_records, format_snapshot};

#[derive(Debug, Parser)]
#[command(name = "scheme-check")]
#[command(about = "Validate URI schemes against the scheme registry")]
struct Cli {
    #[command(flatten)]
    registry: RegistryArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RegistryArgs {
    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Comma-separated custom schemes to register (e.g. git,ssh).
    #[arg(long, global = true)]
    custom: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate scheme text.
    Check(CheckArgs),
    /// Extract and validate the scheme of a URI.
    Parse(ParseArgs),
    /// Select a registry scheme by id.
    Select(SelectArgs),
    /// List registered schemes.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Scheme text to validate.
    scheme: String,
    /// Treat an empty scheme as a relative reference.
    #[arg(long)]
    relative: bool,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// URI-like text.
    uri: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SelectArgs {
    /// Registry id of the scheme.
    id: u64,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check(args) => run_check(&cli.registry, args),
        Command::Parse(args) => run_parse(&cli.registry, args),
        Command::Select(args) => run_select(&cli.registry, args),
        Command::List(args) => run_list(&cli.registry, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_check(registry_args: &RegistryArgs, args: CheckArgs) -> Result<(), String> {
    let (config, registry) = load_registry(registry_args)?;
    let mut state = SchemeValidationState::new(Some(registry), None);
    state.set_is_relative_reference(args.relative || config.relative);
    state.set_raw_text(&args.scheme);
    report(&state, args.format)
}

fn run_parse(registry_args: &RegistryArgs, args: ParseArgs) -> Result<(), String> {
    let (_, registry) = load_registry(registry_args)?;
    let state = SchemeValidationState::from_uri(Some(registry), &args.uri);
    report(&state, args.format)
}

fn run_select(registry_args: &RegistryArgs, args: SelectArgs) -> Result<(), String> {
    let (config, registry) = load_registry(registry_args)?;
    let mut state = SchemeValidationState::new(Some(registry), None);
    state.set_is_relative_reference(config.relative);
    state
        .set_selected_id(Some(args.id))
        .map_err(|err| err.to_string())?;
    report(&state, args.format)
}

fn run_list(registry_args: &RegistryArgs, args: ListArgs) -> Result<(), String> {
    let (_, registry) = load_registry(registry_args)?;
    print!("{}", format_records(registry.all(), args.format)?);
    Ok(())
}

/// Prints the state and fails with its error message when invalid.
fn report(state: &SchemeValidationState, format: OutputFormat) -> Result<(), String> {
    print!("{}", format_snapshot(&state.snapshot(), format)?);
    if state.is_valid() {
        Ok(())
    } else {
        Err(state.error_message().to_string())
    }
}

fn load_registry(args: &RegistryArgs) -> Result<(SchemeConfig, SchemeRegistry), String> {
    let mut config = match &args.config {
        Some(path) => SchemeConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => SchemeConfig::default(),
    };
    config
        .custom_schemes
        .extend(parse_csv_list(args.custom.clone()));
    let registry = config.build_registry().map_err(|err| err.to_string())?;
    debug!(
        version = %config.version,
        records = registry.len(),
        "registry ready"
    );
    Ok((config, registry))
}

fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
