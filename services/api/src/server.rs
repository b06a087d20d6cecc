use crate::cli::ServeArgs;
use crate::infra::{assistant_instruction, AppState};
use crate::routes::talent_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::gemini::{GeminiClient, GenerativeModel};
use talent_ai::mock::MockDirectory;
use talent_ai::telemetry;
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

    let model: Option<Arc<dyn GenerativeModel>> = GeminiClient::from_config(&config.gemini)
        .map(|client| {
            let client =
                client.with_system_instruction(assistant_instruction(&config.gemini.organization));
            Arc::new(client) as Arc<dyn GenerativeModel>
        });
    if model.is_none() {
        warn!("GEMINI_API_KEY is not set; AI-backed routes will answer 503");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        model,
        organization: config.gemini.organization.clone(),
        directory: Arc::new(Mutex::new(MockDirectory::from_entropy())),
    };

    let app = talent_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = %config.gemini.model, "talent insights service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
