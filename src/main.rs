use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, error};
use std::process;

use registration_form::config::{self, Config};
use registration_form::form::{Country, CountryOptions, ValidationSchema};

mod cli;

/// Registration Form - a terminal registration form with live password feedback
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the registration form interactively
    Register {
        /// JSON file with a list of country descriptors ({"name": ...}) to offer
        #[clap(long, value_name = "FILE")]
        countries: Option<String>,

        /// Show passwords in the review step instead of masking them
        #[clap(long)]
        show_passwords: bool,
    },

    /// Validate a JSON object of field values
    Validate {
        /// JSON file mapping field name to value
        #[clap(short, long, value_name = "FILE")]
        file: String,
    },

    /// Show the strength checklist for a password
    Strength {
        /// Password to check
        password: String,
    },

    /// List the form fields and their constraints
    Fields {},
}

fn load_countries(path: Option<&str>, config: &Config) -> Result<CountryOptions> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .context(format!("Failed to read countries file: {}", path))?;
            let countries: Vec<Country> =
                serde_json::from_str(&contents).context("Failed to parse countries file")?;
            Ok(CountryOptions::new(countries))
        }
        None => Ok(CountryOptions::new(config.form.countries.clone())),
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let schema = ValidationSchema::with_min_password_length(config.form.min_password_length);

    match &cli.command {
        Commands::Register { countries, show_passwords } => {
            let options = load_countries(countries.as_deref(), config)?;
            cli::register::register(schema, &options, *show_passwords)
        }
        Commands::Validate { file } => cli::check::validate_file(schema, file),
        Commands::Strength { password } => {
            cli::check::show_strength(password, config.form.min_password_length);
            Ok(())
        }
        Commands::Fields {} => {
            cli::check::list_fields(&schema);
            Ok(())
        }
    }
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize logger; RUST_LOG overrides the verbosity flag
    let default_level = match cli.debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Starting Registration Form");

    match config::load_config(&cli.config) {
        Ok(_) => {
            info!("Configuration loaded successfully");
        }
        Err(err) => {
            error!("Failed to load configuration: {}", err);
            process::exit(1);
        }
    }

    let config = config::get_config();

    if let Err(err) = run(&cli, &config) {
        error!("{:#}", err);
        process::exit(1);
    }
}
