// HTTP request handlers
use crate::infrastructure::event_stream::sse_from_receiver;
use crate::infrastructure::view_mapper::{dashboard_to_view, DashboardView};
use crate::presentation::app_state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard view
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let snapshot = state.dashboard.snapshot();
    Json(dashboard_to_view(&snapshot, &state.title, state.tz))
}

/// Ask the controller to reload; ignored by the controller if a fetch is in flight
pub async fn reload_dashboard(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.dashboard.reload().await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!("Error requesting reload: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Stream dashboard views as they change
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    sse_from_receiver(state.dashboard.subscribe(), state.title.clone(), state.tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_controller::DashboardHandle;
    use chrono_tz::Tz;

    fn app_state(dashboard: DashboardHandle) -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            dashboard,
            title: "Cluny Street Brewery".to_string(),
            tz: Tz::UTC,
        }))
    }

    #[tokio::test]
    async fn test_reload_on_stopped_controller_is_unavailable() {
        let status = reload_dashboard(app_state(DashboardHandle::stopped())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_dashboard_before_first_load() {
        let Json(view) = get_dashboard(app_state(DashboardHandle::stopped())).await;

        assert_eq!(view.title, "Cluny Street Brewery");
        assert!(view.loading);
        assert!(!view.error);
        assert!(view.chart.is_none());
        assert!(view.latest.is_none());
    }
}
