//! sysgps CLI — device flag resolution for the sys_gps HAL.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use manifest::SysgpsManifest;

#[derive(Parser)]
#[command(name = "sysgps", version, about = "Device-conditioned cflags for the sys_gps HAL")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the flags for a device
    Resolve {
        /// Device name (default: $TARGET_DEVICE, then sysgps.toml)
        #[arg(long)]
        device: Option<String>,
        /// Extra rule file, appended after built-in and discovered rules
        #[arg(long = "rules")]
        rules: Vec<PathBuf>,
        /// Skip the built-in rule table
        #[arg(long)]
        no_builtin: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Inspect rule tables
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// List registered module types
    ModuleTypes,
    /// Load a module through the registry and print its properties
    Eval {
        /// Device name (default: $TARGET_DEVICE, then sysgps.toml)
        #[arg(long)]
        device: Option<String>,
        /// Module type to instantiate
        #[arg(long, default_value = sysgps_soong::defaults::MODULE_TYPE)]
        module_type: String,
        /// Module name
        #[arg(long, default_value = "sys_gps_defaults")]
        name: String,
        /// Extra rule file, appended after built-in and discovered rules
        #[arg(long = "rules")]
        rules: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Print the effective rule table
    List {
        /// Extra rule file, appended after built-in and discovered rules
        #[arg(long = "rules")]
        rules: Vec<PathBuf>,
    },
    /// Validate a rule file
    Validate {
        /// Path to a .rules.toml file
        file: PathBuf,
    },
    /// Print a template rule file
    Template,
}

/// Output format for resolved flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One flag per line
    Text,
    /// JSON array
    Json,
    /// Blueprint `cflags` property
    Blueprint,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries flags; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Resolve {
            device,
            rules,
            no_builtin,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let device = manifest::select_device(
                device.as_deref(),
                device_from_env(),
                manifest.as_ref(),
            )?;
            let include_builtin = !no_builtin && manifest.as_ref().map_or(true, |m| m.include_builtin());
            let table = manifest::build_rule_table(project_dir.as_deref(), include_builtin, &rules)?;
            commands::resolve::run(&table, &device, format)
        }

        Commands::Rules { action } => match action {
            RulesAction::List { rules } => {
                let (manifest, project_dir) = load_manifest_optional(&cwd)?;
                let include_builtin = manifest.as_ref().map_or(true, |m| m.include_builtin());
                let table =
                    manifest::build_rule_table(project_dir.as_deref(), include_builtin, &rules)?;
                commands::rules::list(&table)
            }
            RulesAction::Validate { file } => commands::rules::validate(&file),
            RulesAction::Template => commands::rules::template(),
        },

        Commands::ModuleTypes => {
            let types = commands::eval::registered_types(None)?;
            commands::eval::list_types(&types)
        }

        Commands::Eval {
            device,
            module_type,
            name,
            rules,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let device = manifest::select_device(
                device.as_deref(),
                device_from_env(),
                manifest.as_ref(),
            )?;
            let include_builtin = manifest.as_ref().map_or(true, |m| m.include_builtin());
            let table = manifest::build_rule_table(project_dir.as_deref(), include_builtin, &rules)?;
            let types = commands::eval::registered_types(Some(table))?;
            commands::eval::run(&types, &module_type, &name, &device)
        }
    }
}

fn device_from_env() -> Option<String> {
    std::env::var(manifest::DEVICE_ENV).ok()
}

fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<SysgpsManifest>, Option<PathBuf>)> {
    match SysgpsManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
