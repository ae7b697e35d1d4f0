use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cc_plans_lister::api::CatalogClient;
use cc_plans_lister::config::{self, Config, DEFAULT_OUTPUT_FORMAT};
use cc_plans_lister::get_formatter;
use cc_plans_lister::models::{AddonProvider, ProductInstance};

#[derive(Parser)]
#[command(
    name = "cc-plans-lister",
    author,
    version,
    about = "List Clever Cloud addon providers and application instances with their plans/flavors",
    long_about = r#"cc-plans-lister fetches data from the Clever Cloud API to generate comprehensive
documentation of available addon providers and application instance types with their
respective plans and flavors.

The tool supports multiple output formats: markdown, txt, csv, and pdf.

Authentication is required via the CLEVER_API_TOKEN environment variable (or a .env file).

Examples:
  cc-plans-lister
  cc-plans-lister --format csv --output plans.csv
  cc-plans-lister -f pdf -o plans.pdf
"#
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Output format (markdown, txt, csv, pdf)
    #[arg(long, short = 'f', default_value_t = String::from(DEFAULT_OUTPUT_FORMAT))]
    format: String,
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    output: Option<String>,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable progress output and request logging
    #[arg(long, global = true)]
    silent: bool,
    /// Print each API request as a curl command on stderr
    #[arg(long, global = true)]
    trace_requests: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the version number
    Version,
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout may carry the report itself.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if let Some(Commands::Version) = cli.command {
        println!("cc-plans-lister v{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = run(&cli).await {
        tracing::debug!(error = %e, "run failed");
        eprintln!("{}: {}", yansi::Paint::new("Error").red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    config::load_env_file(cli.env_file.as_deref());
    let cfg = Config::from_env().map_err(|e| format!("failed to load configuration: {}", e))?;
    config::validate_output_format(&cli.format)?;

    let client = CatalogClient::new(cfg)?.with_request_trace(cli.trace_requests && !cli.silent);
    tracing::info!(base_url = client.base_url(), format = %cli.format, "starting catalog export");

    let spinner = progress_spinner(cli.silent);

    let (providers, instances) = fetch_catalog(&client, &spinner).await?;

    let formatter = get_formatter(&cli.format);

    match &cli.output {
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            formatter
                .format(&providers, &instances, &mut out)
                .map_err(|e| format!("failed to format output: {}", e))?;
            out.flush()?;
        }
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("failed to create output file: {}", e))?;
            let mut out = BufWriter::new(file);
            formatter
                .format(&providers, &instances, &mut out)
                .map_err(|e| format!("failed to format output: {}", e))?;
            out.flush()?;

            if !cli.silent {
                eprintln!(
                    "{} {} with {} addon providers and {} application types",
                    yansi::Paint::new("Successfully generated").green(),
                    path,
                    providers.len(),
                    instances.len()
                );
            }
        }
    }

    Ok(())
}

/// Fetch both collections. The spinner is cleared on every path.
async fn fetch_catalog(
    client: &CatalogClient,
    spinner: &ProgressBar,
) -> Result<(Vec<AddonProvider>, Vec<ProductInstance>), String> {
    spinner.set_message("Fetching addon providers from Clever Cloud API...");
    let providers = client
        .get_addon_providers()
        .await
        .map_err(|e| {
            spinner.finish_and_clear();
            format!("failed to fetch addon providers: {}", e)
        })?;

    spinner.set_message("Fetching application instances from Clever Cloud API...");
    let instances = client
        .get_product_instances()
        .await
        .map_err(|e| {
            spinner.finish_and_clear();
            format!("failed to fetch product instances: {}", e)
        })?;
    spinner.finish_and_clear();

    Ok((providers, instances))
}

fn progress_spinner(silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
