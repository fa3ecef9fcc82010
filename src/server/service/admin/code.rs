//! One-time admin bootstrap codes.
//!
//! When the application starts without any admin user, a random code is generated and the
//! login link containing it is logged. Whoever logs in through that link within the
//! code's lifetime is granted admin privileges. Codes live only in memory, are single use
//! and are replaced whenever a new one is generated.

use std::{sync::Arc, time::Duration};
use tokio::{sync::RwLock, time::Instant};

use crate::server::util::random::random_alphanumeric;

/// Default lifetime of an admin code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);
/// Length of generated admin codes.
const ADMIN_CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Holds at most one active admin code.
///
/// Cloning shares the underlying code, so the instance stored in `AppState` and the one
/// used at startup see the same state.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    /// Creates a service with no active code and the default 60 second lifetime.
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a new 32-character code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The generated code
    pub async fn generate(&self) -> String {
        let code = random_alphanumeric(ADMIN_CODE_LENGTH);

        *self.code.write().await = Some(AdminCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        code
    }

    /// Checks `input` against the active code and consumes it on success.
    ///
    /// Expired codes are dropped and never validate. A wrong guess leaves the active
    /// code in place.
    ///
    /// # Returns
    /// - `true` - Code matched and has been consumed
    /// - `false` - No active code, code expired, or mismatch
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut code = self.code.write().await;

        match code.as_ref() {
            Some(stored) if stored.is_expired() => {
                *code = None;
                false
            }
            Some(stored) if stored.code == input => {
                *code = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a non-expired code is currently active.
    pub async fn has_valid_code(&self) -> bool {
        self.code
            .read()
            .await
            .as_ref()
            .is_some_and(|stored| !stored.is_expired())
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: 32-character code that is immediately valid
    #[tokio::test]
    async fn generates_valid_code() {
        let service = AdminCodeService::new();
        assert!(!service.has_valid_code().await);

        let code = service.generate().await;

        assert_eq!(code.len(), 32);
        assert!(service.has_valid_code().await);
    }

    /// Expected: first use succeeds, second use fails
    #[tokio::test]
    async fn code_is_single_use() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.validate_and_consume(&code).await);
        assert!(!service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }

    /// Expected: wrong guess fails and keeps the active code
    #[tokio::test]
    async fn wrong_code_keeps_active_code() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(!service.validate_and_consume("wrong_code").await);
        assert!(service.validate_and_consume(&code).await);
    }

    #[tokio::test]
    async fn fails_without_code() {
        let service = AdminCodeService::new();

        assert!(!service.validate_and_consume("any_code").await);
    }

    /// Expected: regenerating invalidates the previous code
    #[tokio::test]
    async fn regenerating_replaces_code() {
        let service = AdminCodeService::new();
        let first = service.generate().await;
        let second = service.generate().await;

        assert!(!service.validate_and_consume(&first).await);
        assert!(service.validate_and_consume(&second).await);
    }

    /// Expected: code stops validating once its lifetime has passed
    #[tokio::test(start_paused = true)]
    async fn code_expires_after_ttl() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        tokio::time::advance(ADMIN_CODE_TTL - Duration::from_secs(1)).await;
        assert!(service.has_valid_code().await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!service.has_valid_code().await);
        assert!(!service.validate_and_consume(&code).await);
    }

    /// Expected: clones share the same code
    #[tokio::test]
    async fn clones_share_state() {
        let service = AdminCodeService::new();
        let clone = service.clone();
        let code = service.generate().await;

        assert!(clone.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }
}
