//! setup-env - BrowserStack setup step for GitHub Actions
//!
//! Validates the step inputs (`INPUT_*` variables) and exports the
//! `BROWSERSTACK_*` variables later steps consume.
//!
//! ## Commands
//!
//! - `setup`: validate and export (default)
//! - `validate`: validate only
//! - `state`: print the tunnel launcher's input state as JSON

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};

use setup_env_core::{ActionConfig, ActionsInputSource, GithubEnvironment};

#[derive(Parser, Debug)]
#[command(name = "setup-env")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate BrowserStack step inputs and export them to the job environment", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "SETUP_ENV_LOG_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Validate inputs and export BROWSERSTACK_* variables
    Setup {
        /// File later steps read exported variables from
        #[arg(long, env = "GITHUB_ENV")]
        env_file: Option<PathBuf>,
    },

    /// Validate inputs without exporting anything
    Validate,

    /// Print the input state for the BrowserStack Local launcher as JSON
    State {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    setup_env_core::init_tracing(cli.json, level);

    let command = cli.command.unwrap_or(Commands::Setup { env_file: None });
    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            // Annotates the failed step in the workflow run.
            println!("::error::{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Setup { env_file } => cmd_setup(env_file),
        Commands::Validate => cmd_validate(),
        Commands::State { pretty, output } => cmd_state(pretty, output.as_deref()),
    }
}

fn load_config(env: &GithubEnvironment) -> Result<ActionConfig> {
    let source = ActionsInputSource::new(env);
    ActionConfig::from_source(&source, env).context("Action input failed")
}

/// Validate the step inputs and export them for later steps
fn cmd_setup(env_file: Option<PathBuf>) -> Result<()> {
    let mut env = match env_file {
        Some(path) => GithubEnvironment::with_env_file(path),
        None => GithubEnvironment::from_process(),
    };
    let config = load_config(&env)?;
    info!(mode = %config.local_testing_mode(), "action input validated");

    config
        .set_env_variables(&mut env)
        .context("Failed to export environment variables")?;
    Ok(())
}

/// Validate the step inputs only
fn cmd_validate() -> Result<()> {
    let config = load_config(&GithubEnvironment::default())?;
    println!(
        "Inputs valid (local testing: {})",
        config.local_testing_mode()
    );
    Ok(())
}

/// Print the launcher input state as JSON
fn cmd_state(pretty: bool, output: Option<&Path>) -> Result<()> {
    let config = load_config(&GithubEnvironment::default())?;
    let state = config.input_state_for_binary();

    let json = if pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .context(format!("Failed to write input state to {:?}", path))?;
            info!(path = %path.display(), "input state written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_setup() {
        let cli = Cli::try_parse_from(["setup-env"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_setup_env_file_flag() {
        let cli = Cli::try_parse_from(["setup-env", "setup", "--env-file", "/tmp/github_env"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Setup {
                env_file: Some(PathBuf::from("/tmp/github_env"))
            })
        );
    }

    #[test]
    fn test_state_pretty_and_global_flags() {
        let cli = Cli::try_parse_from(["setup-env", "state", "--pretty", "--verbose"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::State {
                pretty: true,
                output: None
            })
        );
        assert!(cli.verbose);
    }

    #[test]
    fn test_state_output_path() {
        let cli = Cli::try_parse_from(["setup-env", "state", "-o", "state.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::State {
                pretty: false,
                output: Some(PathBuf::from("state.json"))
            })
        );
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["setup-env", "deploy"]).is_err());
    }
}
