use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use fetch_cli::{run_fetch, Config, FetchArgs, RelaySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one endpoint and print its JSON
    Fetch(FetchArgs),
    /// Run the development proxy relay
    Proxy(ProxyArgs),
}

#[derive(Args, Debug)]
struct ProxyArgs {
    /// Origin requests are relayed to
    #[arg(long)]
    upstream: String,

    /// Local path prefix that is stripped before relaying
    #[arg(long)]
    prefix: Option<String>,

    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    #[arg(long)]
    port: Option<u16>,

    /// Upstream timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schema_fetch=info,fetch_cli=info,fetch_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Fetch(args) => {
            let status = run_fetch(args, &config, &mut std::io::stdout(), &mut std::io::stderr()).await?;
            Ok(ExitCode::from(status.code()))
        }
        Command::Proxy(args) => proxy(args, &config).await,
    }
}

async fn proxy(args: ProxyArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let prefix = args.prefix.as_deref().unwrap_or(&config.proxy_prefix);
    let settings = match RelaySettings::new(&args.upstream, prefix) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::from(2));
        }
    };
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.timeout_ms));
    let addr = SocketAddr::new(args.bind, args.port.unwrap_or(config.proxy_port));

    tracing::info!(
        upstream = settings.upstream(),
        prefix = settings.prefix(),
        "Starting development proxy relay"
    );
    let app = fetch_cli::router(settings, timeout)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(ExitCode::SUCCESS)
}
