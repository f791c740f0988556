//! Service container assembled from `AppConfig`
//!
//! Wires repositories, the email sender and the clock into the core services.
//! `in_memory` builds a self-contained container for development and tests;
//! `connect_mysql` builds one backed by MySQL.

use std::sync::Arc;

use apex_core::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryMembershipRepository,
    InMemoryNewsletterRepository, InMemoryOtpRepository, InMemoryTokenRepository,
    MembershipRepository, NewsletterRepository, OtpRepository, TokenRepository,
};
use apex_core::services::{
    AccountService, AuthService, Clock, InMemoryRateLimiter, MembershipService, NewsletterService,
    NotificationSender, OtpService, PasswordHasher, RateLimiter, TokenService, TokenServiceConfig,
};
use apex_shared::AppConfig;

/// Repositories backing an `AppServices` container
pub struct Repositories<A, O, T, M, L> {
    pub accounts: Arc<A>,
    pub otps: Arc<O>,
    pub tokens: Arc<T>,
    pub memberships: Arc<M>,
    pub newsletter: Arc<L>,
}

/// Every core service, sharing one set of repositories
pub struct AppServices<A, O, T, M, L, N>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
    M: MembershipRepository,
    L: NewsletterRepository,
    N: NotificationSender,
{
    pub accounts: Arc<AccountService<A, O, N>>,
    pub auth: Arc<AuthService<A, T>>,
    pub tokens: Arc<TokenService<T>>,
    pub otp: Arc<OtpService<O, N>>,
    pub memberships: Arc<MembershipService<M, A>>,
    pub newsletter: Arc<NewsletterService<L>>,
    /// Throttle shared by login and the OTP operations
    pub rate_limiter: Arc<dyn RateLimiter>,
}

/// Container over the in-memory repositories
pub type InMemoryAppServices<N> = AppServices<
    InMemoryAccountRepository,
    InMemoryOtpRepository,
    InMemoryTokenRepository,
    InMemoryMembershipRepository,
    InMemoryNewsletterRepository,
    N,
>;

impl<A, O, T, M, L, N> AppServices<A, O, T, M, L, N>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
    M: MembershipRepository,
    L: NewsletterRepository,
    N: NotificationSender,
{
    /// Build every service from configuration and the given dependencies
    pub fn build(
        config: &AppConfig,
        repositories: Repositories<A, O, T, M, L>,
        sender: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(
            config.rate_limit.clone(),
            clock.clone(),
        ));

        let otp = Arc::new(OtpService::new(
            repositories.otps,
            sender,
            clock,
            config.otp.clone(),
        ));
        let tokens = Arc::new(TokenService::new(
            repositories.tokens,
            TokenServiceConfig::from(&config.auth.jwt),
        ));

        tracing::info!(
            environment = %config.environment,
            otp_step_seconds = config.otp.step_seconds,
            otp_validity_minutes = config.otp.validity_minutes,
            rate_limiting = config.rate_limit.enabled,
            "Core services initialized"
        );

        Self {
            accounts: Arc::new(AccountService::new(
                repositories.accounts.clone(),
                otp.clone(),
                hasher,
                rate_limiter.clone(),
            )),
            auth: Arc::new(AuthService::new(
                repositories.accounts.clone(),
                tokens.clone(),
                hasher,
                rate_limiter.clone(),
            )),
            tokens,
            otp,
            memberships: Arc::new(MembershipService::new(
                repositories.memberships,
                repositories.accounts,
            )),
            newsletter: Arc::new(NewsletterService::new(repositories.newsletter)),
            rate_limiter,
        }
    }
}

impl<N: NotificationSender> InMemoryAppServices<N> {
    /// Container over fresh in-memory repositories
    pub fn in_memory(config: &AppConfig, sender: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        let repositories = Repositories {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            otps: Arc::new(InMemoryOtpRepository::new()),
            tokens: Arc::new(InMemoryTokenRepository::new()),
            memberships: Arc::new(InMemoryMembershipRepository::new()),
            newsletter: Arc::new(InMemoryNewsletterRepository::new()),
        };
        Self::build(config, repositories, sender, clock)
    }
}

#[cfg(feature = "mysql")]
mod mysql {
    use std::sync::Arc;

    use anyhow::Context;

    use apex_core::services::SystemClock;
    use apex_shared::AppConfig;

    use super::{AppServices, Repositories};
    use crate::database::{
        DatabasePool, MySqlAccountRepository, MySqlMembershipRepository,
        MySqlNewsletterRepository, MySqlOtpRepository, MySqlTokenRepository,
    };
    use crate::email::{create_email_sender, EmailSender};

    /// Container over the MySQL repositories
    pub type MySqlAppServices = AppServices<
        MySqlAccountRepository,
        MySqlOtpRepository,
        MySqlTokenRepository,
        MySqlMembershipRepository,
        MySqlNewsletterRepository,
        EmailSender,
    >;

    impl MySqlAppServices {
        /// Validate the configuration, connect to MySQL, apply migrations and
        /// build every service
        pub async fn connect_mysql(config: &AppConfig) -> anyhow::Result<(Self, DatabasePool)> {
            config.validate().context("invalid configuration")?;

            let db = DatabasePool::new(config.database.clone())
                .await
                .context("connecting to MySQL")?;
            db.run_migrations()
                .await
                .context("applying database migrations")?;

            let pool = db.get_pool().clone();
            let repositories = Repositories {
                accounts: Arc::new(MySqlAccountRepository::new(pool.clone())),
                otps: Arc::new(MySqlOtpRepository::new(pool.clone())),
                tokens: Arc::new(MySqlTokenRepository::new(pool.clone())),
                memberships: Arc::new(MySqlMembershipRepository::new(pool.clone())),
                newsletter: Arc::new(MySqlNewsletterRepository::new(pool)),
            };
            let sender = Arc::new(
                create_email_sender(&config.email).context("creating email sender")?,
            );
            tracing::info!(provider = sender.provider_name(), "Email sender ready");

            let services = Self::build(config, repositories, sender, Arc::new(SystemClock));
            Ok((services, db))
        }
    }
}

#[cfg(feature = "mysql")]
pub use mysql::MySqlAppServices;
