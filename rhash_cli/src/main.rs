use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use rhash_cli::config::{AppConfig, ConfigManager, parse_algorithms};
use rhash_cli::hasher::{FileHasher, Input};
use rhash_cli::output::{self, OutputFormat};
use rhash_cli::terminal;
use rhash_core::{AlgorithmRegistry, AlgorithmSet, Encoding, PrintFlags};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rhash")]
#[command(author, version, about = "Compute hash sums and magnet links", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Use this configuration file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print hash sums of files
    Hash {
        /// Files to hash, `-` or none for standard input
        files: Vec<PathBuf>,

        #[command(flatten)]
        selection: AlgorithmArgs,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Print digests in upper case
        #[arg(long)]
        uppercase: bool,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print magnet links of files
    Magnet {
        /// Files to hash, `-` or none for standard input
        files: Vec<PathBuf>,

        #[command(flatten)]
        selection: AlgorithmArgs,

        /// Print digests in upper case
        #[arg(long)]
        uppercase: bool,
    },

    /// List supported algorithms
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct AlgorithmArgs {
    /// Hash algorithm to use (repeatable, e.g. sha256, tth, ed2k)
    #[arg(short, long = "algorithm", value_name = "ALG")]
    algorithms: Vec<String>,

    /// Use every supported algorithm
    #[arg(long, conflicts_with = "algorithms")]
    all: bool,
}

#[derive(Args)]
#[group(multiple = false)]
struct EncodingArgs {
    /// Print digests as hexadecimal
    #[arg(long)]
    hex: bool,

    /// Print digests as base32
    #[arg(long)]
    base32: bool,

    /// Print digests as base64
    #[arg(long)]
    base64: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hash.algorithms)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., io.chunk_size)
        key: String,

        /// Value to set
        value: String,
    },
}

impl AlgorithmArgs {
    fn resolve(&self, config: &AppConfig) -> Result<AlgorithmSet> {
        if self.all {
            return Ok(AlgorithmSet::ALL);
        }
        if self.algorithms.is_empty() {
            return config.hash.algorithm_set();
        }
        let names: Vec<&str> = self
            .algorithms
            .iter()
            .flat_map(|arg| arg.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        parse_algorithms(&names)
    }
}

impl EncodingArgs {
    /// Command-line encoding overrides the configured one
    fn apply(&self, flags: PrintFlags) -> PrintFlags {
        if self.hex {
            flags.with_encoding(Some(Encoding::Hex))
        } else if self.base32 {
            flags.with_encoding(Some(Encoding::Base32))
        } else if self.base64 {
            flags.with_encoding(Some(Encoding::Base64))
        } else {
            flags
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("rhash_core", log::LevelFilter::Debug)
            .filter_module("rhash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = run(cli) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Hash {
            files,
            selection,
            encoding,
            uppercase,
            no_progress,
            format,
        } => {
            let config = manager.load()?;
            let algorithms = selection.resolve(&config)?;
            let mut flags = encoding.apply(config.output.print_flags());
            if uppercase {
                flags |= PrintFlags::UPPERCASE;
            }
            let use_color = config.output.color_enabled && terminal::stdout_is_terminal();
            let progress = config.output.progress_enabled && !no_progress;
            hash_command(&config, files, algorithms, flags, format, use_color, progress)
        }
        Commands::Magnet {
            files,
            selection,
            uppercase,
        } => {
            let config = manager.load()?;
            let algorithms = selection.resolve(&config)?;
            let mut flags = PrintFlags::FILESIZE;
            if uppercase || config.output.uppercase {
                flags |= PrintFlags::UPPERCASE;
            }
            magnet_command(&config, files, algorithms, flags)
        }
        Commands::List => {
            list_command();
            Ok(())
        }
        Commands::Config { command } => config_command(manager, command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn inputs(files: Vec<PathBuf>) -> Vec<Input> {
    if files.is_empty() {
        vec![Input::Stdin]
    } else {
        files.iter().map(|file| Input::from_arg(file)).collect()
    }
}

fn hash_command(
    config: &AppConfig,
    files: Vec<PathBuf>,
    algorithms: AlgorithmSet,
    flags: PrintFlags,
    format: OutputFormat,
    use_color: bool,
    progress: bool,
) -> Result<()> {
    log::debug!(
        "Hashing with mask {:#x}, flags {:#x}",
        algorithms.bits(),
        flags.bits()
    );
    let mut hasher = FileHasher::new(
        algorithms,
        config.hash.hasher_options(),
        config.io.chunk_size,
        progress,
    )?;
    let formatter = output::create_formatter(format, flags, use_color);

    let mut failures = 0usize;
    for input in inputs(files) {
        match hasher.hash(&input) {
            Ok(result) => println!("{}", formatter.format(&result)?),
            Err(e) => {
                output::print_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} input(s) could not be hashed");
    }
    Ok(())
}

fn magnet_command(
    config: &AppConfig,
    files: Vec<PathBuf>,
    algorithms: AlgorithmSet,
    flags: PrintFlags,
) -> Result<()> {
    let mut hasher =
        FileHasher::new(algorithms, config.hash.hasher_options(), config.io.chunk_size, false)?;

    let mut failures = 0usize;
    for input in inputs(files) {
        match hasher.hash(&input).and_then(|_| hasher.magnet(&input, flags)) {
            Ok(link) => println!("{link}"),
            Err(e) => {
                output::print_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} input(s) could not be hashed");
    }
    Ok(())
}

fn list_command() {
    println!("{:<10} {:<10} {:>5}  {}", "ID", "NAME", "BYTES", "ENCODING");
    for descriptor in AlgorithmRegistry::global().iter() {
        let encoding = if descriptor.base32_default {
            "base32"
        } else {
            "hex"
        };
        println!(
            "{:<10} {:<10} {:>5}  {}",
            format!("{:#07x}", descriptor.id()),
            descriptor.name,
            descriptor.digest_size,
            encoding
        );
    }
}

fn config_command(mut manager: ConfigManager, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = manager.load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .with_context(|| format!("Failed to set {key}"))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
    }
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
