use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use money_editor::config::{validate_config, Config, ConfigLoader, DEFAULT_CONFIG_FILE};
use money_editor::{parse_hex_u64, process, MoneyEditor, VERSION};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "money-editor", version)]
#[command(about = "Set the money value of a running game through a pointer chain")]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Command,
}

/// Per-run overrides of the `[target]` section
#[derive(Args)]
struct TargetArgs {
    /// Target process name
    #[arg(long, global = true)]
    process: Option<String>,

    /// Module the pointer chain starts from (defaults to the process name)
    #[arg(long, global = true)]
    module: Option<String>,

    /// Offset from the module base to the first pointer, e.g. 0x052A7128
    #[arg(long, global = true, value_parser = parse_offset)]
    base_offset: Option<u64>,

    /// Comma separated chain offsets, e.g. 0x20,0xE60
    #[arg(long, global = true, value_delimiter = ',', value_parser = parse_offset)]
    offsets: Vec<u64>,
}

impl TargetArgs {
    fn apply(self, config: &mut Config) {
        if let Some(process) = self.process {
            config.target.process_name = process;
        }
        if let Some(module) = self.module {
            config.target.module_name = Some(module);
        }
        if let Some(base_offset) = self.base_offset {
            config.target.base_offset = base_offset;
        }
        if !self.offsets.is_empty() {
            config.target.offsets = self.offsets;
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Target(TargetCommand),
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Commands that operate on the target process
#[derive(Subcommand)]
enum TargetCommand {
    /// Attach to the target and report where its module is loaded
    Attach,
    /// Print the current value
    Get {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a new amount (whole units) and verify it
    Set { amount: u64 },
}

fn parse_offset(s: &str) -> Result<u64, String> {
    parse_hex_u64(s).ok_or_else(|| format!("not a hex offset: {}", s))
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("money_editor={}", level)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ConfigLoader::new(&cli.config);

    match cli.command {
        Command::InitConfig { force } => {
            init_tracing(cli.log_level.as_deref().unwrap_or("info"))?;
            init_config(&loader, force)
        }
        Command::Target(command) => {
            let mut config = loader
                .load_or_default()
                .with_context(|| format!("Failed to load {}", loader.path().display()))?;
            cli.target.apply(&mut config);
            if let Some(level) = cli.log_level {
                config.logging.level = level;
            }
            validate_config(&config).context("Invalid configuration")?;
            init_tracing(&config.logging.level)?;
            run(command, &config)
        }
    }
}

fn run(command: TargetCommand, config: &Config) -> Result<()> {
    info!("Money-Editor v{}", VERSION);
    if !process::is_elevated() {
        warn!("Not running elevated; opening the target process may be refused");
    }

    let mut editor = MoneyEditor::from_config(config);
    match command {
        TargetCommand::Attach => {
            let module_base = editor.attach()?;
            let pid = editor.process().map(|p| p.pid()).unwrap_or_default();
            println!(
                "Attached to {} (PID {}), {} loaded at {}",
                config.target.process_name,
                pid,
                config.target.module(),
                module_base
            );
        }
        TargetCommand::Get { json } => {
            let current = editor.current_value()?;
            if json {
                let output = serde_json::json!({
                    "amount": current.value.units(),
                    "raw": current.value.raw(),
                    "address": current.address.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} at {}", current.value, current.address);
            }
        }
        TargetCommand::Set { amount } => {
            let applied = editor.set_value(amount)?;
            println!("Set {} at {}", applied.value, applied.address);
        }
    }

    Ok(())
}

fn init_config(loader: &ConfigLoader, force: bool) -> Result<()> {
    if loader.path().exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            loader.path().display()
        );
    }
    loader.save(&Config::default())?;
    info!("Wrote default configuration to {}", loader.path().display());
    Ok(())
}
