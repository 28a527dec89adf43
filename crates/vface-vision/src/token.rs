//! Access token caching for Google Cloud APIs.
//!
//! Provides a thread-safe, async-aware token cache with:
//! - Refresh margin to avoid token expiry during requests
//! - Single-flight refresh under a write lock
//! - Fallback to the existing token while it is still usable

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{VisionError, VisionResult};

/// Refresh margin: refresh token 60 seconds before expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative token TTL when expiry is unknown (50 minutes).
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// OAuth scope covering Video Intelligence and Vision.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Source of bearer tokens for outgoing requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> VisionResult<String>;

    /// Drop any cached token so the next call fetches a fresh one.
    async fn invalidate(&self) {}
}

/// Fixed token, for local emulators and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> VisionResult<String> {
        Ok(self.0.clone())
    }
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }

    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Service-account token cache.
pub struct TokenCache {
    auth: Arc<dyn TokenProvider>,
    cache: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(auth: Arc<dyn TokenProvider>) -> Self {
        Self {
            auth,
            cache: RwLock::new(None),
        }
    }

    /// Load service-account credentials.
    ///
    /// Uses the key file named by `path_var` when set, otherwise
    /// `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_env(path_var: &str) -> VisionResult<Self> {
        let account = match std::env::var(path_var) {
            Ok(path) if !path.is_empty() => Self::load_key_file(&path)?,
            _ => CustomServiceAccount::from_env()
                .map_err(|e| VisionError::Auth(format!("Failed to load service account: {}", e)))?
                .ok_or_else(|| {
                    VisionError::Config(format!(
                        "Neither {} nor GOOGLE_APPLICATION_CREDENTIALS is set",
                        path_var
                    ))
                })?,
        };

        Ok(Self::new(Arc::new(account)))
    }

    fn load_key_file(path: &str) -> VisionResult<CustomServiceAccount> {
        CustomServiceAccount::from_file(Path::new(path)).map_err(|e| {
            VisionError::Auth(format!("Failed to load service account {}: {}", path, e))
        })
    }

    async fn refresh(&self, cache: &mut Option<CachedToken>) -> VisionResult<String> {
        match self.auth.token(&[CLOUD_PLATFORM_SCOPE]).await {
            Ok(token) => {
                let access_token = token.as_str().to_string();
                let now = Utc::now();
                let exp = token.expires_at();
                let expires_at = if exp > now {
                    match (exp - now).to_std() {
                        Ok(ttl) => Instant::now() + ttl,
                        Err(_) => Instant::now() + TOKEN_DEFAULT_TTL,
                    }
                } else {
                    Instant::now()
                };

                *cache = Some(CachedToken {
                    access_token: access_token.clone(),
                    expires_at,
                });

                debug!("Refreshed Google Cloud access token");
                Ok(access_token)
            }
            Err(e) => {
                if let Some(cached) = cache.as_ref() {
                    if cached.is_usable() {
                        warn!("Token refresh failed, using existing token: {}", e);
                        return Ok(cached.access_token.clone());
                    }
                }
                Err(VisionError::Auth(format!("Failed to obtain access token: {}", e)))
            }
        }
    }
}

#[async_trait]
impl AccessTokenSource for TokenCache {
    async fn access_token(&self) -> VisionResult<String> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed while we waited
        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(cached.access_token.clone());
            }
        }

        self.refresh(&mut cache).await
    }

    async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}
