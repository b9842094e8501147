//! Gateway process entry point

use std::net::SocketAddr;

use clap::Parser;
use dispatcher::{GatewayConfig, Orchestrator};
use shared::logging;
use tokio::signal;

use webserver::{OriginPolicy, WebServer, WebServerError};

const COMPONENT: &str = "webserver";

/// Command line arguments, each also readable from the environment
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Fans one query out to several AI services and aggregates the answers")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for HTTP server
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Comma separated CORS origins; `https://*.domain` matches subdomains
    #[arg(long, env = "ALLOWED_ORIGINS")]
    allowed_origins: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(&args.log_level)?;
    logging::log_startup(COMPONENT, &format!("AI fan-out gateway v{}", env!("CARGO_PKG_VERSION")));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address {}:{}: {}", args.host, args.port, e)))?;

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        services = ?config.service_names(),
        timeout_secs = config.request_timeout.as_secs(),
        "🔧 Gateway configured"
    );
    for adapter in &config.adapters {
        if adapter.credential().is_some() {
            shared::service_info!(adapter.service_name, endpoint = %adapter.endpoint, "🔌 Adapter ready");
        } else {
            shared::service_warn!(adapter.service_name, "⚠️ No API key configured; calls will report a configuration error");
        }
    }

    let orchestrator = Orchestrator::from_config(&config)?;
    let origins = OriginPolicy::from_list(args.allowed_origins.as_deref());
    let server = WebServer::new(orchestrator, origins);

    if let Err(e) = server.run(addr, shutdown_signal()).await {
        logging::log_error(COMPONENT, "HTTP server", &e);
        return Err(e.into());
    }

    logging::log_success(COMPONENT, "Gateway stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(COMPONENT, "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(COMPONENT, "Signal handling", &err);
            std::future::pending::<()>().await
        }
    }
}
