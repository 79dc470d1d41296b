use crate::cli::ServeArgs;
use crate::infra::{
    seed_demo_trainers, AppState, InMemoryNoticeMailer, InMemoryPayoutRepository,
    InMemoryTrainerRepository,
};
use crate::routes::with_backoffice_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use backoffice::config::AppConfig;
use backoffice::error::AppError;
use backoffice::telemetry;
use backoffice::workflows::access::OpenAccess;
use backoffice::workflows::payouts::PayoutService;
use backoffice::workflows::trainers::{NoticeCatalog, TrainerComplianceService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let trainers = Arc::new(InMemoryTrainerRepository::default());
    seed_demo_trainers(&trainers);
    let mailer = Arc::new(InMemoryNoticeMailer::default());
    let catalog = NoticeCatalog::standard(config.notices.portal_url.clone());
    let compliance_service = Arc::new(TrainerComplianceService::new(trainers, mailer, catalog));
    let payout_service = Arc::new(PayoutService::new(Arc::new(
        InMemoryPayoutRepository::default(),
    )));

    let app = with_backoffice_routes(compliance_service, payout_service, Arc::new(OpenAccess))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "back-office workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
