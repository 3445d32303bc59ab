//! Shared wiring for integration tests: in-memory store plus mock adapters.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use secrecy::SecretString;

use srots_access::adapters::auth::{MockCredentialVerifier, MockSessionValidator};
use srots_access::adapters::http::{app_router, AppState};
use srots_access::adapters::memory::InMemoryStore;
use srots_access::adapters::notify::RecordingNotifier;
use srots_access::adapters::razorpay::MockPaymentProvider;
use srots_access::application::handlers::{
    AccountStatsHandler, ActivateDirectHandler, CreateOrderHandler, HandlePaymentWebhookHandler,
    LoginHandler, OrderPricing, RegisterAccountHandler, RenewAccountHandler,
    ToggleRestrictionHandler,
};
use srots_access::domain::account::{Account, NewAccount};
use srots_access::domain::foundation::{AuthenticatedUser, Role, Timestamp};
use srots_access::domain::premium::{sign_payload, PaymentWebhookVerifier};
use srots_access::ports::AccountStore;

pub const WEBHOOK_SECRET: &str = "whsec_integration";
pub const PASSWORD: &str = "correct-horse";
pub const ADMIN_TOKEN: &str = "admin-token";

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub sessions: Arc<MockSessionValidator>,
    pub notifier: Arc<RecordingNotifier>,
    pub provider: Arc<MockPaymentProvider>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let sessions = Arc::new(MockSessionValidator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let provider = Arc::new(MockPaymentProvider::new());
        let credentials = Arc::new(MockCredentialVerifier::new());

        let state = AppState {
            login: Arc::new(LoginHandler::new(
                store.clone(),
                credentials.clone(),
                sessions.clone(),
                notifier.clone(),
                Duration::from_secs(1),
            )),
            create_order: Arc::new(CreateOrderHandler::new(
                store.clone(),
                store.clone(),
                provider.clone(),
                OrderPricing::default(),
                Duration::from_secs(1),
            )),
            activate_direct: Arc::new(ActivateDirectHandler::new(store.clone(), notifier.clone())),
            payment_webhook: Arc::new(HandlePaymentWebhookHandler::new(
                PaymentWebhookVerifier::new(SecretString::new(WEBHOOK_SECRET.to_string())),
                store.clone(),
                notifier.clone(),
            )),
            register_account: Arc::new(RegisterAccountHandler::new(store.clone(), credentials)),
            toggle_restriction: Arc::new(ToggleRestrictionHandler::new(store.clone())),
            renew_account: Arc::new(RenewAccountHandler::new(store.clone())),
            account_stats: Arc::new(AccountStatsHandler::new(store.clone())),
            sessions: sessions.clone(),
        };

        Self {
            store,
            sessions,
            notifier,
            provider,
            state,
        }
    }

    pub fn router(&self) -> Router {
        app_router(self.state.clone(), Duration::from_secs(5))
    }

    /// Inserts an account whose password is [`PASSWORD`].
    pub async fn seed(&self, username: &str, role: Role) -> Account {
        self.seed_in(username, role, None).await
    }

    /// Like [`TestApp::seed`], inside `college_id`.
    pub async fn seed_in(&self, username: &str, role: Role, college_id: Option<&str>) -> Account {
        let account = Account::register(
            NewAccount {
                username: username.to_string(),
                email: format!("{}@college.edu", username),
                full_name: format!("{} Test", username),
                role,
                college_id: college_id.map(str::to_string),
            },
            MockCredentialVerifier::hash_of(PASSWORD),
            Timestamp::now(),
        )
        .unwrap();
        AccountStore::insert(self.store.as_ref(), &account).await.unwrap();
        account
    }

    /// Seeds an admin and registers [`ADMIN_TOKEN`] for it.
    pub async fn seed_admin(&self) -> Account {
        let admin = self.seed("root", Role::Admin).await;
        self.sessions.add_token(
            ADMIN_TOKEN,
            AuthenticatedUser::new(admin.id, admin.username.clone(), admin.role),
        );
        admin
    }

    /// Registers a bearer token for `account` and returns it.
    pub fn token_for(&self, account: &Account) -> String {
        let token = format!("token-{}", account.id);
        self.sessions.add_token(
            token.clone(),
            AuthenticatedUser::new(account.id, account.username.clone(), account.role)
                .with_college(account.college_id.clone()),
        );
        token
    }
}

/// A signed `payment.captured` webhook body for `order_id`.
pub fn captured_webhook(order_id: &str, payment_id: &str) -> (Vec<u8>, String) {
    let body = serde_json::json!({
        "entity": "event",
        "event": "payment.captured",
        "payload": {
            "payment": {
                "entity": { "id": payment_id, "order_id": order_id, "amount": 49900 }
            }
        }
    })
    .to_string()
    .into_bytes();
    let signature = sign_payload(WEBHOOK_SECRET, &body);
    (body, signature)
}
