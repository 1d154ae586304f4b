use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ipdesk_core::applications::{ApplicationService, ApplicationServiceTrait};
use ipdesk_core::child_accounts::{ChildAccountService, ChildAccountServiceTrait};
use ipdesk_core::correspondence::{CorrespondenceService, CorrespondenceServiceTrait};
use ipdesk_core::notes::{NoteService, NoteServiceTrait};
use ipdesk_core::payments::{HttpPaymentGatewayClient, PaymentService, PaymentServiceTrait};
use ipdesk_core::settings::{SettingsService, SettingsServiceTrait};
use ipdesk_core::signatures::{
    HttpSignaturePlatformClient, SignatureService, SignatureServiceTrait,
};
use ipdesk_storage_sqlite::applications::ApplicationRepository;
use ipdesk_storage_sqlite::child_accounts::ChildAccountRepository;
use ipdesk_storage_sqlite::correspondence::CorrespondenceRepository;
use ipdesk_storage_sqlite::notes::NoteRepository;
use ipdesk_storage_sqlite::payments::PaymentRepository;
use ipdesk_storage_sqlite::settings::SettingsRepository;
use ipdesk_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

use crate::config::Config;

pub struct AppState {
    pub application_service: Arc<dyn ApplicationServiceTrait + Send + Sync>,
    pub note_service: Arc<dyn NoteServiceTrait + Send + Sync>,
    pub child_account_service: Arc<dyn ChildAccountServiceTrait + Send + Sync>,
    pub signature_service: Arc<dyn SignatureServiceTrait + Send + Sync>,
    pub payment_service: Arc<dyn PaymentServiceTrait + Send + Sync>,
    pub correspondence_service: Arc<dyn CorrespondenceServiceTrait + Send + Sync>,
    pub settings_service: Arc<dyn SettingsServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("IPDESK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone())?;

    let settings_repo = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let settings_service = Arc::new(SettingsService::new(settings_repo));

    let application_repo = Arc::new(ApplicationRepository::new(pool.clone(), writer.clone()));
    let application_service = Arc::new(ApplicationService::new(
        application_repo.clone(),
        settings_service.clone(),
    ));

    let note_repo = Arc::new(NoteRepository::new(pool.clone(), writer.clone()));
    let note_service = Arc::new(NoteService::new(note_repo));

    let child_account_repo = Arc::new(ChildAccountRepository::new(pool.clone(), writer.clone()));
    let child_account_service = Arc::new(ChildAccountService::new(child_account_repo));

    let signature_client = Arc::new(HttpSignaturePlatformClient::new(
        config.signature_platform_url.clone(),
    )?);
    let signature_service = Arc::new(SignatureService::new(
        application_repo.clone(),
        signature_client,
        settings_service.clone(),
    ));

    let payment_repo = Arc::new(PaymentRepository::new(pool.clone(), writer.clone()));
    let payment_client = Arc::new(HttpPaymentGatewayClient::new(
        config.payment_gateway_url.clone(),
    )?);
    let payment_service = Arc::new(PaymentService::new(
        payment_repo,
        application_repo,
        payment_client,
        settings_service.clone(),
    ));

    let correspondence_repo = Arc::new(CorrespondenceRepository::new(pool.clone(), writer.clone()));
    let correspondence_service = Arc::new(CorrespondenceService::new(correspondence_repo));

    Ok(Arc::new(AppState {
        application_service,
        note_service,
        child_account_service,
        signature_service,
        payment_service,
        correspondence_service,
        settings_service,
        db_path,
    }))
}
