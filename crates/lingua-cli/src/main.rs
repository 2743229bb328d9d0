//! Lingua command line entry point

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lingua_config::{Config, ConfigLoader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(author, version, about = "Translate keys and inspect locale catalogs", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding locale data files
    #[arg(long, value_name = "DIR")]
    locales_dir: Option<PathBuf>,

    /// Locale used when none is selected
    #[arg(long, value_name = "LOCALE")]
    default_locale: Option<String>,

    /// Locale consulted for missing locales and keys
    #[arg(long, value_name = "LOCALE")]
    fallback_locale: Option<String>,

    /// Log filter directive
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the translation of a key
    Tr {
        /// Message key
        #[arg(value_name = "KEY")]
        key: String,

        /// Format arguments; numeric ones are passed as numbers
        #[arg(value_name = "ARGS", allow_negative_numbers = true)]
        args: Vec<String>,

        /// Locale to translate into
        #[arg(short = 'L', long)]
        locale: Option<String>,
    },

    /// List compiled locales and their message counts
    Locales,

    /// Report keys missing from each locale
    Check {
        /// Locale whose keys every other locale should define
        #[arg(short, long)]
        reference: Option<String>,
    },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ConfigLoader::load().context("Failed to load configuration")?,
        };

        if let Some(dir) = &self.locales_dir {
            config.i18n.locales_dir = dir.clone();
        }
        if let Some(locale) = &self.default_locale {
            config.i18n.default_locale = Some(locale.clone());
        }
        if let Some(locale) = &self.fallback_locale {
            config.i18n.fallback_locale = Some(locale.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config
            .validate_all()
            .context("Invalid command line options")?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    lingua_common::init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!("Using configuration: {:?}", config);

    let mut i18n = config.build_i18n();
    i18n.locales_init().with_context(|| {
        format!(
            "Failed to load locales from {}",
            config.i18n.locales_dir.display()
        )
    })?;

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Tr { key, args, locale } => {
            commands::translate(&i18n, &mut stdout, &key, &args, locale.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Locales => {
            commands::list_locales(&i18n, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { reference } => {
            let missing = commands::check(&i18n, &mut stdout, reference.as_deref())?;
            Ok(if missing == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
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
    fn test_parse_tr_with_negative_number() {
        let cli = Cli::parse_from([
            "lingua",
            "--locales-dir",
            "lang",
            "tr",
            "-L",
            "de",
            "Delta",
            "-5",
        ]);
        match cli.command {
            Commands::Tr { key, args, locale } => {
                assert_eq!(key, "Delta");
                assert_eq!(args, vec!["-5"]);
                assert_eq!(locale.as_deref(), Some("de"));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.locales_dir, Some(PathBuf::from("lang")));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["lingua", "check", "--reference", "en_US"]);
        assert!(matches!(
            cli.command,
            Commands::Check { reference: Some(ref r) } if r == "en_US"
        ));
    }
}
