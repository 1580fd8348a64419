use crate::cli::ServeArgs;
use crate::infra::{seed_histories, AppState, InMemoryCandidateRepository};
use crate::routes::with_talent_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::telemetry;
use talent_match::workflows::recommendations::TalentService;
use talent_match::workflows::skills::AssessmentImporter;
use tracing::{info, warn};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let talent_service = Arc::new(TalentService::new(repository, config.scoring));

    if let Some(path) = args.assessments.take() {
        let histories = AssessmentImporter::from_path(&path)?;
        let candidates = histories.len();
        match seed_histories(&talent_service, histories) {
            Ok(assessments) => info!(
                candidates,
                assessments,
                path = %path.display(),
                "seeded candidate store"
            ),
            Err(error) => warn!(%error, "candidate store seeding stopped early"),
        }
    }

    let app = with_talent_routes(talent_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_score = config.scoring.ranking.min_score,
        limit = config.scoring.ranking.limit,
        "talent matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
