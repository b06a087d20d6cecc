use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_ai::error::AppError;
use talent_ai::gemini::GenerativeModel;
use talent_ai::mock::MockDirectory;

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
    /// Absent when no generation-API credential is configured; AI-backed
    /// routes then answer with an unavailable state.
    pub model: Option<Arc<dyn GenerativeModel>>,
    pub organization: String,
    pub directory: Arc<Mutex<MockDirectory>>,
}

impl AppState {
    pub(crate) fn model(&self) -> Result<Arc<dyn GenerativeModel>, AppError> {
        self.model.clone().ok_or(AppError::ModelUnavailable)
    }
}

/// Persona sent alongside every chat request.
pub(crate) fn assistant_instruction(organization: &str) -> String {
    format!(
        "You are the {organization} talent assistant. You specialize in talent management, \
         workforce planning, succession strategies, and leadership development. Provide \
         concise, helpful, and professional answers. Be friendly and use the brand name \
         when appropriate."
    )
}
