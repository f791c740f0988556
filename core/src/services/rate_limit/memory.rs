//! Fixed-window rate limiter held in process memory

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use apex_shared::email::mask_email;
use apex_shared::{ActionLimit, RateLimitConfig};

use crate::errors::{AuthError, DomainResult};
use crate::services::otp::Clock;

use super::traits::{RateLimiter, ThrottledAction};

type Key = (ThrottledAction, String);

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    attempts: u32,
}

/// Per-process limiter; each `(action, identifier)` pair gets its own window
///
/// Counters are not shared between processes.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    windows: Mutex<HashMap<Key, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn limit_for(&self, action: ThrottledAction) -> ActionLimit {
        match action {
            ThrottledAction::Login => self.config.login,
            ThrottledAction::VerifyAccount => self.config.verify_account,
            ThrottledAction::ResendVerification => self.config.resend_verification,
            ThrottledAction::RequestPasswordReset => self.config.request_password_reset,
            ThrottledAction::ConfirmPasswordReset => self.config.confirm_password_reset,
        }
    }

    fn window_end(&self, action: ThrottledAction, window: &Window) -> DateTime<Utc> {
        window.started_at + Duration::seconds(self.limit_for(action).window_seconds as i64)
    }

    /// Number of open windows, for tests and diagnostics
    pub async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, action: ThrottledAction, identifier: &str) -> DomainResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let now = self.clock.now();
        let limit = self.limit_for(action);
        let mut windows = self.windows.lock().await;

        // Closed windows are dropped so the map only holds active identifiers
        windows.retain(|(action, _), window| self.window_end(*action, window) > now);

        let window = windows
            .entry((action, identifier.to_string()))
            .or_insert(Window {
                started_at: now,
                attempts: 0,
            });

        if window.attempts >= limit.max_attempts {
            let retry_after_seconds =
                (self.window_end(action, window) - now).num_seconds().max(1) as u64;
            tracing::warn!(
                action = action.as_str(),
                identifier = %mask_email(identifier),
                retry_after_seconds,
                event = "rate_limited",
                "Rate limit exceeded"
            );
            return Err(AuthError::RateLimited { retry_after_seconds }.into());
        }

        window.attempts += 1;
        Ok(())
    }
}
