//! Example service reading its configuration from the environment.
//!
//! Run with, for example:
//!
//! ```text
//! SERVER_HTTP_PORT=9000 SERVER_PEERS=a:1,b:2 cargo run --example server_config
//! ```

use std::io::{self, Write};
use std::time::Duration;

use env_config::{EnvConfig, LoadError, Loader};

/// HTTP listener settings.
#[derive(Debug, Default, Clone, PartialEq, EnvConfig)]
pub struct HttpConfig {
    #[env("HOST;default=0.0.0.0")]
    host: String,
    #[env("PORT;default=8080")]
    port: u16,
    #[env("TIMEOUT;default=30s")]
    timeout: Duration,
}

/// Top-level service configuration.
#[derive(Debug, Default, Clone, PartialEq, EnvConfig)]
pub struct ServerConfig {
    #[env("HTTP")]
    http: HttpConfig,
    #[env("PEERS")]
    peers: Vec<String>,
    #[env("DEBUG;default=false")]
    debug: bool,
    #[env("TLS_CERT")]
    tls_cert: Option<String>,
}

fn main() -> Result<(), String> {
    let mut config = ServerConfig::default();
    Loader::new()
        .with_prefix("SERVER")
        .load(&mut config)
        .map_err(|err: LoadError| err.to_string())?;
    let mut stdout = io::stdout().lock();
    write_line(&mut stdout, &format!("{config:#?}"))
}

fn write_line(writer: &mut dyn Write, message: &str) -> Result<(), String> {
    writer
        .write_all(message.as_bytes())
        .map_err(|err| err.to_string())?;
    writer.write_all(b"\n").map_err(|err| err.to_string())
}
