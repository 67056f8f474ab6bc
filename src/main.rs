//! funks CLI - duration codec and HTTP client checks

use clap::{Parser, Subcommand};
use colored::Colorize;

use funks::{ClientConfig, Duration, FixSuggestion, FunksError, HttpClient};

#[derive(Parser)]
#[command(name = "funks")]
#[command(about = "funks - Go-style durations and HTTP client settings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a duration and print its canonical form
    Duration {
        /// Duration string ("1h30m"), or a JSON literal with --json
        input: String,

        /// Read INPUT as JSON: a nanosecond count or a quoted string
        #[arg(long)]
        json: bool,
    },

    /// GET a URL with the configured client and print the status
    Fetch {
        url: String,

        /// Request timeout ("5s", "1m")
        #[arg(short, long)]
        timeout: Option<Duration>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,

        /// Maximum in-flight requests per host (0 = unlimited)
        #[arg(long)]
        max_conns: Option<usize>,

        /// Path to a TOML client config
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Duration { input, json } => show_duration(&input, json),
        Commands::Fetch {
            url,
            timeout,
            insecure,
            max_conns,
            config,
        } => fetch(&url, timeout, insecure, max_conns, config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn show_duration(input: &str, json: bool) -> Result<(), FunksError> {
    let duration = if json {
        Duration::from_json_str(input)?
    } else {
        Duration::from_text(input)?
    };

    println!("{}", duration.to_string().green().bold());
    println!("  nanoseconds: {}", duration.as_nanos());
    println!("  json: {}", duration.to_json_value());

    Ok(())
}

async fn fetch(
    url: &str,
    timeout: Option<Duration>,
    insecure: bool,
    max_conns: Option<usize>,
    config_path: Option<&str>,
) -> Result<(), FunksError> {
    let mut config = match config_path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    }
    .with_env()?;

    // CLI overrides
    if let Some(t) = timeout {
        config.timeout = t;
    }
    if insecure {
        config.insecure_skip_verify = true;
    }
    if let Some(n) = max_conns {
        config.max_conns_per_host = n;
    }

    let client = HttpClient::from_config(&config)?;
    let response = client.get(url).await?;

    println!(
        "{} {} {} (timeout {})",
        "→".cyan(),
        response.status().as_u16().to_string().bold(),
        url,
        config.timeout
    );

    Ok(())
}
