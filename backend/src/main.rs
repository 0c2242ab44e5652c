//! Backend entry point: configuration parsing, tracing, and server bootstrap.

mod server;

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use chairside::inbound::http::health::HealthState;
use chairside::outbound::persistence::{DbPool, PoolConfig};
use server::{InferenceSettings, ServerConfig, StorageSettings};

const INFERENCE_TIMEOUT: Duration = Duration::from_secs(60);
const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "chairside", about = "Barbershop booking and generative content backend")]
struct Cli {
    /// Socket address to bind.
    #[arg(long, env = "CHAIRSIDE_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection string; fixture data is served when absent.
    #[arg(long, env = "CHAIRSIDE_DATABASE_URL")]
    database_url: Option<String>,

    /// Hosted captioning model endpoint.
    #[arg(
        long,
        env = "CHAIRSIDE_INFERENCE_URL",
        default_value = "https://api-inference.huggingface.co/models/Salesforce/blip-image-captioning-base"
    )]
    inference_url: Url,

    /// Bearer credential for the captioning model; caption requests fail
    /// with a configuration error when absent.
    #[arg(long, env = "CHAIRSIDE_INFERENCE_TOKEN")]
    inference_token: Option<String>,

    /// Object storage API root.
    #[arg(long, env = "CHAIRSIDE_STORAGE_URL")]
    storage_url: Option<Url>,

    /// Bearer credential for object storage writes.
    #[arg(long, env = "CHAIRSIDE_STORAGE_TOKEN")]
    storage_token: Option<String>,

    /// Bucket holding raw uploads.
    #[arg(long, env = "CHAIRSIDE_STORAGE_BUCKET", default_value = "posts")]
    storage_bucket: String,

    /// Whether session cookies require HTTPS.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    cookie_secure: bool,

    /// File holding the session signing key material.
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: String,

    /// Allow an ephemeral session key outside debug builds.
    #[arg(
        long,
        env = "SESSION_ALLOW_EPHEMERAL",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    session_allow_ephemeral: bool,
}

fn load_session_key(path: &str, allow_ephemeral: bool) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= 32 => Ok(Key::derive_from(&bytes)),
        Ok(_) => Err(std::io::Error::other(format!(
            "session key at {path} must hold at least 32 bytes"
        ))),
        Err(error) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %path, error = %error, "using ephemeral session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {path}: {error}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let cli = Cli::parse();

    let key = load_session_key(&cli.session_key_file, cli.session_allow_ephemeral)?;
    let mut config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr);

    if let Some(database_url) = cli.database_url {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|error| std::io::Error::other(error.to_string()))?;
        config = config.with_db_pool(pool);
    }

    if let Some(token) = cli.inference_token {
        config = config.with_inference(InferenceSettings {
            endpoint: cli.inference_url,
            token,
            timeout: INFERENCE_TIMEOUT,
        });
    }

    if let (Some(base), Some(token)) = (cli.storage_url, cli.storage_token) {
        config = config.with_storage(StorageSettings {
            base,
            bucket: cli.storage_bucket,
            token,
            timeout: STORAGE_TIMEOUT,
        });
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    server.await
}
