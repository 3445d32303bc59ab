//! SROTS access service.
//!
//! Wires configuration into adapters and handlers, then serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use srots_access::adapters::auth::{Argon2CredentialVerifier, JwtTokenService};
use srots_access::adapters::http::{app_router, AppState};
use srots_access::adapters::memory::InMemoryStore;
use srots_access::adapters::notify::{LoggingNotifier, ResendNotifier};
use srots_access::adapters::postgres::{PostgresAccountStore, PostgresOrderStore};
use srots_access::adapters::razorpay::{MockPaymentProvider, RazorpayConfig, RazorpayPaymentAdapter};
use srots_access::application::handlers::{
    AccountStatsHandler, ActivateDirectHandler, CreateOrderHandler, HandlePaymentWebhookHandler,
    LoginHandler, OrderPricing, RegisterAccountHandler, RenewAccountHandler,
    ToggleRestrictionHandler,
};
use srots_access::config::{AppConfig, DatabaseConfig, EmailConfig, PaymentConfig, ServerConfig};
use srots_access::domain::premium::PaymentWebhookVerifier;
use srots_access::ports::{AccountStore, Notifier, OrderStore, PaymentProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    config.validate()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting SROTS access service"
    );

    let AppConfig {
        server,
        database,
        auth,
        payment,
        email,
    } = config;

    let (accounts, orders) = build_stores(&database).await?;
    let provider = build_payment_provider(&payment)?;
    let notifier = build_notifier(email)?;

    let tokens = Arc::new(JwtTokenService::new(&auth.jwt_secret, auth.token_ttl()));
    let credentials = Arc::new(Argon2CredentialVerifier::new());

    let pricing = OrderPricing {
        amount_minor: payment.premium_amount_minor,
        currency: payment.currency.clone(),
    };
    let provider_timeout = payment.provider_timeout();

    let state = AppState {
        login: Arc::new(LoginHandler::new(
            accounts.clone(),
            credentials.clone(),
            tokens.clone(),
            notifier.clone(),
            auth.credential_timeout(),
        )),
        create_order: Arc::new(CreateOrderHandler::new(
            accounts.clone(),
            orders.clone(),
            provider,
            pricing,
            provider_timeout,
        )),
        activate_direct: Arc::new(ActivateDirectHandler::new(accounts.clone(), notifier.clone())),
        payment_webhook: Arc::new(HandlePaymentWebhookHandler::new(
            PaymentWebhookVerifier::new(payment.webhook_secret),
            orders,
            notifier,
        )),
        register_account: Arc::new(RegisterAccountHandler::new(accounts.clone(), credentials)),
        toggle_restriction: Arc::new(ToggleRestrictionHandler::new(accounts.clone())),
        renew_account: Arc::new(RenewAccountHandler::new(accounts.clone())),
        account_stats: Arc::new(AccountStatsHandler::new(accounts)),
        sessions: tokens,
    };

    let app = app_router(state, server.request_timeout());
    let addr = server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over config.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_stores(
    database: &DatabaseConfig,
) -> anyhow::Result<(Arc<dyn AccountStore>, Arc<dyn OrderStore>)> {
    let Some(url) = database.url() else {
        tracing::warn!("No database URL configured; using in-memory store");
        let store = Arc::new(InMemoryStore::new());
        let accounts: Arc<dyn AccountStore> = store.clone();
        let orders: Arc<dyn OrderStore> = store;
        return Ok((accounts, orders));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(url)
        .await?;
    tracing::info!("Database connection established");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let accounts: Arc<dyn AccountStore> = Arc::new(PostgresAccountStore::new(pool.clone()));
    let orders: Arc<dyn OrderStore> = Arc::new(PostgresOrderStore::new(pool));
    Ok((accounts, orders))
}

fn build_payment_provider(payment: &PaymentConfig) -> anyhow::Result<Arc<dyn PaymentProvider>> {
    match (payment.key_id.as_deref(), payment.key_secret.as_ref()) {
        (Some(key_id), Some(key_secret)) if payment.has_provider_credentials() => {
            let mut razorpay = RazorpayConfig::new(
                key_id,
                SecretString::new(key_secret.expose_secret().clone()),
            );
            if let Some(base_url) = payment.api_base_url.as_deref() {
                razorpay = razorpay.with_base_url(base_url);
            }
            if payment.is_test_mode() {
                tracing::info!("Razorpay running in test mode");
            }
            Ok(Arc::new(RazorpayPaymentAdapter::new(
                razorpay,
                payment.provider_timeout(),
            )?))
        }
        _ => {
            tracing::warn!("No Razorpay credentials configured; using mock payment provider");
            Ok(Arc::new(MockPaymentProvider::new()))
        }
    }
}

fn build_notifier(email: EmailConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    let from = email.from_header();
    let timeout = email.send_timeout();
    match email.resend_api_key {
        Some(key) => Ok(Arc::new(ResendNotifier::new(key, from, timeout)?)),
        None => {
            tracing::warn!("No Resend API key configured; notifications will only be logged");
            Ok(Arc::new(LoggingNotifier))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
