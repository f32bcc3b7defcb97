// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardHandle;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardHandle,
    pub title: String,
    pub tz: Tz,
}
