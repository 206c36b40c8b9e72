use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use dfimage::app::Inspector;
use dfimage::config::Config;
use dfimage::core::{DfImageError, ImageReference};
use dfimage::docker::DockerClient;
use dfimage::output::{print_dockerfile, print_json, write_dockerfile, OutputFormat};
use dfimage::utils::{discover_socket, validate_output_path};

/// dfimage extracts a Dockerfile from the specified image name and prints it to STDOUT.
#[derive(Parser, Debug)]
#[command(name = "dfimage")]
#[command(about = "Reconstruct a Dockerfile from a local container image")]
#[command(override_usage = "dfimage --image <image_name:tag> [--socket /path/to/docker.sock]")]
#[command(version)]
struct Cli {
    /// Specify the name of the image you want to inspect.
    #[arg(short, long, value_name = "IMAGE")]
    image: String,

    /// Specify the path to the docker.sock file.
    #[arg(short, long, value_name = "PATH")]
    socket: Option<PathBuf>,

    /// Write the output to this file.
    #[arg(short, long = "outfile", value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Output format for stdout
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        conflicts_with = "outfile"
    )]
    format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<DfImageError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    init_logging(&cli, &config)?;
    info!("Starting dfimage v{}", env!("CARGO_PKG_VERSION"));

    let reference = ImageReference::parse(&cli.image);
    debug!("Looking for {}", reference);

    // Everything that can be checked locally is checked before the engine is contacted
    let (socket, source) = discover_socket(cli.socket.as_deref(), config.docker.socket.as_deref())?;
    debug!("Using socket {} ({:?})", socket.display(), source);

    if let Some(outfile) = &cli.outfile {
        validate_output_path(outfile)?;
    }

    let client = DockerClient::with_socket(&socket, config.docker.timeout_seconds).await?;
    let engine = client.connection_info();
    debug!(
        "Connected to {} (engine {}, API {})",
        engine.host, engine.version, engine.api_version
    );
    let inspector = Inspector::with_config(client, &config);

    let reconstruction = inspector.reconstruct(&reference).await?;

    match &cli.outfile {
        Some(outfile) => {
            write_dockerfile(
                &reconstruction.dockerfile,
                outfile,
                config.output.file_newlines,
            )?;
            println!("File successfully written to {}.", outfile.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match cli.format {
                OutputFormat::Text => print_dockerfile(&reconstruction.dockerfile, &mut out)?,
                OutputFormat::Json => print_json(&reconstruction, &mut out)?,
            }
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let level = if cli.debug {
        "debug"
    } else {
        cli.log_level.as_deref().unwrap_or(&config.logging.level)
    };
    let filter = format!("dfimage={}", level);

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
