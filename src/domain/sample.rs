// Sample domain model - raw readings as served by the temperature source
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A sensor channel, in the order the chart draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Blue,
    Green,
    Yellow,
    Average,
}

impl Channel {
    pub const ORDER: [Channel; 4] = [Channel::Blue, Channel::Green, Channel::Yellow, Channel::Average];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Blue => "Blue",
            Channel::Green => "Green",
            Channel::Yellow => "Yellow",
            Channel::Average => "Average",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Channel::Blue => "royalblue",
            Channel::Green => "forestgreen",
            Channel::Yellow => "gold",
            Channel::Average => "tomato",
        }
    }

    fn field(self) -> &'static str {
        match self {
            Channel::Blue => "temperature_blue",
            Channel::Green => "temperature_green",
            Channel::Yellow => "temperature_yellow",
            Channel::Average => "temperature_average",
        }
    }
}

/// One record of the source's JSON array, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub temperature_average: Option<Value>,
    #[serde(default)]
    pub temperature_blue: Option<Value>,
    #[serde(default)]
    pub temperature_green: Option<Value>,
    #[serde(default)]
    pub temperature_yellow: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Malformation {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a number")]
    NotNumeric(&'static str),
    #[error("unreadable timestamp {0:?}")]
    BadTimestamp(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("sample {id} is malformed: {reason}")]
pub struct MalformedSample {
    pub id: i64,
    pub reason: Malformation,
}

impl RawSample {
    /// Parse `date`; timestamps without an offset are read as local time in `tz`.
    pub fn timestamp(&self, tz: Tz) -> Result<DateTime<Utc>, MalformedSample> {
        let raw = self.date.as_deref().ok_or_else(|| self.malformed(Malformation::MissingField("date")))?;
        parse_timestamp(raw, tz)
            .ok_or_else(|| self.malformed(Malformation::BadTimestamp(raw.to_string())))
    }

    /// Check all four channels and produce a validated sample.
    pub fn validate(&self, time: DateTime<Utc>) -> Result<Sample, MalformedSample> {
        Ok(Sample {
            id: self.id,
            time,
            readings: Readings {
                blue: self.reading(Channel::Blue)?,
                green: self.reading(Channel::Green)?,
                yellow: self.reading(Channel::Yellow)?,
                average: self.reading(Channel::Average)?,
            },
        })
    }

    fn reading(&self, channel: Channel) -> Result<f64, MalformedSample> {
        let value = match channel {
            Channel::Blue => &self.temperature_blue,
            Channel::Green => &self.temperature_green,
            Channel::Yellow => &self.temperature_yellow,
            Channel::Average => &self.temperature_average,
        };
        match value {
            None => Err(self.malformed(Malformation::MissingField(channel.field()))),
            Some(v) => v
                .as_f64()
                .ok_or_else(|| self.malformed(Malformation::NotNumeric(channel.field()))),
        }
    }

    fn malformed(&self, reason: Malformation) -> MalformedSample {
        MalformedSample { id: self.id, reason }
    }
}

fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    // Repeated wall-clock hours resolve to the first occurrence; skipped ones fail.
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|time| time.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub blue: f64,
    pub green: f64,
    pub yellow: f64,
    pub average: f64,
}

impl Readings {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Blue => self.blue,
            Channel::Green => self.green,
            Channel::Yellow => self.yellow,
            Channel::Average => self.average,
        }
    }
}

/// A sample that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: i64,
    pub time: DateTime<Utc>,
    pub readings: Readings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc() -> Tz {
        Tz::UTC
    }

    #[test]
    fn test_parse_source_array() {
        let body = json!([
            {
                "id": 7,
                "date": "2019-05-01T10:30:00.000Z",
                "temperature_average": 19.5,
                "temperature_blue": 19.0,
                "temperature_green": 20,
                "temperature_yellow": 19.5
            }
        ]);
        let samples: Vec<RawSample> = serde_json::from_value(body).unwrap();
        let time = samples[0].timestamp(utc()).unwrap();
        let sample = samples[0].validate(time).unwrap();

        assert_eq!(sample.id, 7);
        assert_eq!(sample.time, Utc.with_ymd_and_hms(2019, 5, 1, 10, 30, 0).unwrap());
        assert_eq!(sample.readings.green, 20.0);
    }

    #[test]
    fn test_naive_timestamp_uses_zone() {
        let summer: RawSample =
            serde_json::from_value(json!({"id": 1, "date": "2019-05-01 12:00:00"})).unwrap();
        let winter: RawSample =
            serde_json::from_value(json!({"id": 2, "date": "2019-01-15T12:00:00"})).unwrap();

        assert_eq!(
            summer.timestamp(Tz::Europe__Berlin).unwrap(),
            Utc.with_ymd_and_hms(2019, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            winter.timestamp(Tz::Europe__Berlin).unwrap(),
            Utc.with_ymd_and_hms(2019, 1, 15, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_naive_timestamp_in_skipped_hour() {
        let raw: RawSample =
            serde_json::from_value(json!({"id": 5, "date": "2019-03-31 02:30:00"})).unwrap();

        assert_eq!(
            raw.timestamp(Tz::Europe__Berlin).unwrap_err().reason,
            Malformation::BadTimestamp("2019-03-31 02:30:00".to_string())
        );
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let raw: RawSample = serde_json::from_value(json!({
            "id": 3,
            "date": "2019-05-01",
            "temperature_average": 19.5,
            "temperature_blue": "warm",
            "temperature_green": 20.0
        }))
        .unwrap();
        let time = raw.timestamp(utc()).unwrap();

        assert_eq!(
            raw.validate(time).unwrap_err(),
            MalformedSample { id: 3, reason: Malformation::NotNumeric("temperature_blue") }
        );

        let raw: RawSample = serde_json::from_value(json!({
            "id": 4,
            "date": "2019-05-01",
            "temperature_average": 19.5,
            "temperature_blue": 19.0,
            "temperature_green": 20.0
        }))
        .unwrap();
        let err = raw.validate(time).unwrap_err();
        assert_eq!(err.reason, Malformation::MissingField("temperature_yellow"));
        assert_eq!(err.to_string(), "sample 4 is malformed: missing field `temperature_yellow`");
    }

    #[test]
    fn test_bad_timestamp() {
        let raw: RawSample =
            serde_json::from_value(json!({"id": 9, "date": "yesterday"})).unwrap();
        assert_eq!(
            raw.timestamp(utc()).unwrap_err().reason,
            Malformation::BadTimestamp("yesterday".to_string())
        );

        let raw: RawSample = serde_json::from_value(json!({"id": 10})).unwrap();
        assert_eq!(raw.timestamp(utc()).unwrap_err().reason, Malformation::MissingField("date"));
    }
}
