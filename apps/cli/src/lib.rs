//! # Qrwari CLI Library
//!
//! Command-line front end over `qrwari-core`.
//!
//! ## Module Organization
//! ```text
//! qrwari_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── commands.rs     ◄─── split / detect / qr / bill / config handlers
//! ├── config.rs       ◄─── QrwariConfig (file + environment)
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! ## Output Streams
//! Results go to stdout; logs and errors go to stderr, so
//! `qrwari split dinner.json | jq` keeps working with `RUST_LOG=debug`.

pub mod commands;
pub mod config;
pub mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use qrwari_core::naming::generate_event_name;
use qrwari_core::{IdType, Money};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::QrwariConfig;
use error::{CliError, CliResult};

/// Split a bill and get a PromptPay QR payload for each share.
#[derive(Debug, Parser)]
#[command(name = "qrwari", version, about)]
pub struct Cli {
    /// Config file (default: platform config dir / qrwari.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split an event and print the result as JSON
    Split {
        /// Event JSON file
        event: PathBuf,
    },

    /// Detect the PromptPay id type of an input
    Detect {
        /// Phone number or national id, formatting allowed
        raw: String,
    },

    /// Print a single PromptPay payload
    Qr {
        /// Amount in baht, e.g. 123.45 (static code when omitted)
        #[arg(long)]
        amount: Option<Money>,

        /// PromptPay id (overrides config)
        #[arg(long)]
        promptpay_id: Option<String>,

        /// phone | national_id | tax_id | e_wallet | bank_account
        #[arg(long)]
        id_type: Option<IdType>,
    },

    /// Print a payment payload for every participant, then a summary
    Bill {
        /// Event JSON file
        event: PathBuf,

        /// PromptPay id (overrides config)
        #[arg(long)]
        promptpay_id: Option<String>,
    },

    /// Print a default event name for the current local time
    Name,

    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Store the payee's PromptPay id
    SetPayee {
        promptpay_id: String,
    },
}

/// Parses arguments, runs one subcommand and maps failures to an exit code.
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.code();
            debug!(code = %code, error = ?err, "Command failed");
            eprintln!("error[{}]: {}", code, err);
            ExitCode::from(code.exit_status())
        }
    }
}

/// Runs a parsed command and returns what to print.
pub fn execute(cli: Cli) -> CliResult<String> {
    // set-payee rewrites the stored file, so it must not see env overrides
    // and may run before the file exists
    if let Command::Config {
        action: ConfigAction::SetPayee { promptpay_id },
    } = &cli.command
    {
        return commands::set_payee(promptpay_id, cli.config);
    }

    let config = QrwariConfig::load(cli.config.clone())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Split { event } => commands::split(&read_input(&event)?, &config),
        Command::Detect { raw } => Ok(commands::detect(&raw)),
        Command::Qr {
            amount,
            promptpay_id,
            id_type,
        } => commands::qr(amount, promptpay_id.as_deref(), id_type, &config),
        Command::Bill {
            event,
            promptpay_id,
        } => commands::bill(&read_input(&event)?, promptpay_id.as_deref(), &config),
        Command::Name => Ok(generate_event_name(&chrono::Local::now())),
        Command::Config { action } => match action {
            ConfigAction::Show => commands::show_config(&config),
            ConfigAction::SetPayee { promptpay_id } => {
                commands::set_payee(&promptpay_id, cli.config)
            }
        },
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=qrwari_core=trace` - Show trace for the core crate only
/// - Default: INFO, DEBUG for the qrwari crates (target prefix match)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,qrwari=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_qr_arguments() {
        let cli = Cli::parse_from([
            "qrwari",
            "qr",
            "--amount",
            "123.45",
            "--id-type",
            "bank-account",
            "--promptpay-id",
            "0141234567890",
        ]);

        match cli.command {
            Command::Qr {
                amount,
                promptpay_id,
                id_type,
            } => {
                assert_eq!(amount, Some(Money::from_cents(12345)));
                assert_eq!(promptpay_id.as_deref(), Some("0141234567890"));
                assert_eq!(id_type, Some(IdType::BankAccount));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_amount() {
        assert!(Cli::try_parse_from(["qrwari", "qr", "--amount", "abc"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["qrwari", "detect", "0812345678", "--config", "/tmp/q.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/q.toml")));
    }

    #[test]
    fn test_execute_with_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("qrwari.toml");
        std::fs::write(&config_path, "[payee]\npromptpay_id = \"0812345678\"\n").unwrap();

        let event_path = dir.path().join("event.json");
        std::fs::write(
            &event_path,
            r#"{"participants": [{"id": "a", "name": "A"}], "items": [{"amount": "12.50"}]}"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(config_path),
            command: Command::Bill {
                event: event_path,
                promptpay_id: None,
            },
        };
        let out = execute(cli).unwrap();
        assert!(out.starts_with("A  ฿12.50\n000201010212"));
        assert!(out.ends_with("Total  ฿12.50"));
    }

    #[test]
    fn test_set_payee_creates_fresh_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fresh.toml");

        let cli = Cli::parse_from([
            "qrwari",
            "--config",
            config_path.to_str().unwrap(),
            "config",
            "set-payee",
            "0812345678",
        ]);
        assert_eq!(execute(cli).unwrap(), "Payee set to 0812345678 (phone)");

        let stored = QrwariConfig::load_file(Some(config_path)).unwrap();
        assert_eq!(stored.promptpay_id(), Some("0812345678"));
    }

    #[test]
    fn test_missing_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("qrwari.toml");
        std::fs::write(&config_path, "").unwrap();

        let cli = Cli {
            config: Some(config_path),
            command: Command::Split {
                event: dir.path().join("missing.json"),
            },
        };
        let err = execute(cli).unwrap_err();
        assert_eq!(err.code(), error::ErrorCode::IoError);
    }
}
