// Series builder - Reshapes raw samples into the four chart series
use crate::domain::chart::{format_reading, Series, SeriesPoint, ViewBounds};
use crate::domain::sample::{Channel, MalformedSample, RawSample};
use crate::domain::view_state::SeriesBuild;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

pub const LABEL_FORMAT: &str = "%d/%m, %H:%M";

#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    window: Duration,
    tz: Tz,
}

impl SeriesBuilder {
    /// `tz` is used both for labels and for timestamps that carry no offset.
    pub fn new(window: Duration, tz: Tz) -> Self {
        Self { window, tz }
    }

    /// Keep the samples inside the window ending at `now`, dropping consecutive
    /// duplicate timestamps, and fold them into series, bounds and last id.
    ///
    /// The duplicate check compares against the last sample that passed the
    /// window check, starting from `now` itself.
    pub fn build(
        &self,
        samples: &[RawSample],
        prior_bounds: ViewBounds,
        prior_last_id: i64,
        now: DateTime<Utc>,
    ) -> Result<SeriesBuild, MalformedSample> {
        let cutoff = now - self.window;
        let mut prev_time = now;
        let mut bounds = prior_bounds;
        let mut last_id = prior_last_id;
        let mut latest = None;
        let mut series = Channel::ORDER.map(Series::new);

        for raw in samples {
            let time = raw.timestamp(self.tz)?;
            if time < cutoff {
                continue;
            }
            if time == prev_time {
                continue;
            }
            prev_time = time;

            let sample = raw.validate(time)?;
            bounds.widen(sample.readings.average);
            last_id = last_id.max(sample.id);

            let label = time.with_timezone(&self.tz).format(LABEL_FORMAT).to_string();
            for s in series.iter_mut() {
                s.data.push(SeriesPoint {
                    x: label.clone(),
                    y: format_reading(sample.readings.get(s.channel)),
                });
            }

            if sample.id == last_id {
                latest = Some(sample);
            }
        }

        tracing::debug!(
            retained = series[0].data.len(),
            total = samples.len(),
            last_id,
            "built temperature series"
        );

        Ok(SeriesBuild {
            series,
            bounds,
            last_id,
            latest,
        })
    }
}
