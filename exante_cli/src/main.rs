mod commands;
mod frame;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exante_api::{Client, ClientConfig, Credentials, WireFormat, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "exante")]
#[command(about = "Query time series and metadata from the Exante Data API")]
struct Cli {
    /// Account username (usually your e-mail address)
    #[arg(long, env = "EXANTE_USERNAME", default_value = "", global = true)]
    username: String,

    /// Account password
    #[arg(
        long,
        env = "EXANTE_PASSWORD",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    password: String,

    /// API base URL. Do not change unless advised otherwise
    #[arg(long, env = "EXANTE_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Outbound proxy for all requests (only if your network requires one)
    #[arg(long, env = "EXANTE_PROXY", global = true)]
    proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Request body encoding: form (begin/end) or json (bop/eop)
    #[arg(long, env = "EXANTE_WIRE_FORMAT", default_value = "form", global = true)]
    wire_format: WireFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and print the access token
    Token,
    /// Time series for one or more tickers
    Data(commands::data::DataArgs),
    /// When each ticker was last updated
    Updated(commands::TickerArgs),
    /// Descriptive metadata per ticker
    Metadata(commands::metadata::MetadataArgs),
    /// Most recent observation per ticker
    Last(commands::TickerArgs),
    /// Fetch updates, metadata, data, and last values in one run
    All(commands::all::AllArgs),
}

impl Cli {
    fn client(&self) -> Result<Client> {
        let mut config = ClientConfig::default()
            .with_base_url(&self.base_url)
            .with_verify_tls(!self.insecure)
            .with_wire_format(self.wire_format);
        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy);
        }
        let credentials = Credentials::new(self.username.as_str(), self.password.as_str());
        Client::with_config(credentials, config).context("Failed to configure API client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("exante=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = cli.client()?;
    let format = cli.output;

    match &cli.command {
        Commands::Token => commands::token::run(&client).await?,
        Commands::Data(args) => commands::data::run(args, &client, format).await?,
        Commands::Updated(args) => commands::updated::run(args, &client, format).await?,
        Commands::Metadata(args) => commands::metadata::run(args, &client, format).await?,
        Commands::Last(args) => commands::last::run(args, &client, format).await?,
        Commands::All(args) => commands::all::run(args, &client, format).await?,
    }

    Ok(())
}
