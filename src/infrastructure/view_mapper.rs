// Mapper from the view state to the JSON consumed by the chart front end
use crate::application::series_builder::LABEL_FORMAT;
use crate::application::tick_sampler::pick_ticks;
use crate::domain::chart::{Series, SeriesPoint};
use crate::domain::sample::{Channel, Sample};
use crate::domain::view_state::ViewState;
use chrono_tz::Tz;
use serde::Serialize;

const READING_UNIT: &str = "°C";
const READING_PRECISION: i32 = 2;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    pub loading: bool,
    pub error: bool,
    pub chart: Option<ChartView>,
    pub latest: Option<LatestView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub series: Vec<SeriesView>,
    pub y_range: AxisRange,
    pub tick_values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub id: &'static str,
    pub color: &'static str,
    pub data: Vec<PointView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointView {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestView {
    pub id: i64,
    pub date: String,
    pub tiles: Vec<TileView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub id: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub precision: i32,
}

pub fn dashboard_to_view(state: &ViewState, title: &str, tz: Tz) -> DashboardView {
    DashboardView {
        title: title.to_string(),
        loading: state.loading,
        error: state.error,
        chart: chart_to_view(state),
        latest: state.latest.as_ref().map(|sample| latest_to_view(sample, tz)),
    }
}

fn chart_to_view(state: &ViewState) -> Option<ChartView> {
    let first = state.series.first()?;
    let (min, max) = state.bounds.axis_range();

    Some(ChartView {
        series: state.series.iter().map(series_to_view).collect(),
        y_range: AxisRange { min, max },
        tick_values: pick_ticks(first).map(str::to_string).collect(),
    })
}

fn series_to_view(series: &Series) -> SeriesView {
    SeriesView {
        id: series.channel.name(),
        color: series.channel.color(),
        data: series.data.iter().map(point_to_view).collect(),
    }
}

fn point_to_view(point: &SeriesPoint) -> PointView {
    PointView {
        x: point.x.clone(),
        y: point.y.clone(),
    }
}

fn latest_to_view(sample: &Sample, tz: Tz) -> LatestView {
    let tiles = Channel::ORDER
        .iter()
        .map(|&channel| TileView {
            id: channel.name(),
            title: channel.name(),
            unit: READING_UNIT,
            value: sample.readings.get(channel),
            precision: READING_PRECISION,
        })
        .collect();

    LatestView {
        id: sample.id,
        date: sample.time.with_timezone(&tz).format(LABEL_FORMAT).to_string(),
        tiles,
    }
}
