//! OAuth2 access token acquisition for the BigQuery REST API.
//!
//! A token supplied through configuration is used verbatim for the life of
//! the process. Otherwise the token is obtained from the local gcloud
//! installation and re-fetched once it gets close to its one hour expiry.

use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{WarehouseError, WarehouseResult};

/// gcloud tokens live for an hour; refresh well before that.
const GCLOUD_TOKEN_TTL: Duration = Duration::from_secs(45 * 60);

/// A gcloud token and when it was fetched.
pub struct CachedToken {
    value: String,
    fetched_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < GCLOUD_TOKEN_TTL
    }
}

/// Where bearer tokens for warehouse requests come from.
pub enum TokenSource {
    /// A fixed token from configuration.
    Static(String),

    /// Tokens printed by `gcloud auth print-access-token`, cached.
    Gcloud(RwLock<Option<CachedToken>>),
}

impl TokenSource {
    /// Use `access_token` when present and non-empty, gcloud otherwise.
    pub fn from_config(access_token: Option<&str>) -> Self {
        match access_token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Self::Static(token.to_string()),
            None => Self::Gcloud(RwLock::new(None)),
        }
    }

    /// Return a bearer token, fetching a fresh one if needed.
    pub async fn token(&self) -> WarehouseResult<String> {
        let cache = match self {
            Self::Static(token) => return Ok(token.clone()),
            Self::Gcloud(cache) => cache,
        };

        {
            let cached = cache.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = cache.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let value = fetch_gcloud_token().await?;
        *cached = Some(CachedToken {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        info!("Obtained access token from gcloud");
        Ok(value)
    }
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => f.write_str("TokenSource::Static([REDACTED])"),
            Self::Gcloud(_) => f.write_str("TokenSource::Gcloud"),
        }
    }
}

fn gcloud_command() -> Command {
    let mut command = Command::new("gcloud");
    // Killed if the refresh future is dropped (timeout, cancellation).
    command.args(["auth", "print-access-token"]).kill_on_drop(true);
    command
}

async fn fetch_gcloud_token() -> WarehouseResult<String> {
    debug!("Running gcloud auth print-access-token");

    let output = gcloud_command()
        .output()
        .await
        .map_err(|e| WarehouseError::auth(format!("failed to run gcloud: {}", e)))?;

    if !output.status.success() {
        return Err(WarehouseError::auth(format!(
            "gcloud auth print-access-token failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(WarehouseError::auth("gcloud returned an empty access token"));
    }

    Ok(token)
}
