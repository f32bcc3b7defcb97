// Dashboard view state and its reducer
use super::chart::{Series, ViewBounds};
use super::sample::Sample;

/// Output of one pass of the series builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuild {
    pub series: [Series; 4],
    pub bounds: ViewBounds,
    pub last_id: i64,
    pub latest: Option<Sample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub series: Vec<Series>,
    pub bounds: ViewBounds,
    pub last_id: i64,
    pub latest: Option<Sample>,
    pub loading: bool,
    pub error: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            bounds: ViewBounds::default(),
            last_id: 0,
            latest: None,
            loading: true,
            error: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ViewEvent {
    Mounted,
    ReloadRequested,
    Loaded(SeriesBuild),
    LoadFailed,
}

pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::Mounted => ViewState {
            loading: true,
            error: false,
            ..state.clone()
        },
        // A reload while a fetch is in flight is dropped.
        ViewEvent::ReloadRequested if state.loading => state.clone(),
        ViewEvent::ReloadRequested => ViewState {
            series: Vec::new(),
            loading: true,
            error: false,
            ..state.clone()
        },
        ViewEvent::Loaded(build) => ViewState {
            series: build.series.into(),
            bounds: build.bounds,
            last_id: build.last_id,
            latest: build.latest,
            loading: false,
            error: false,
        },
        ViewEvent::LoadFailed => ViewState {
            loading: false,
            error: true,
            ..state.clone()
        },
    }
}
