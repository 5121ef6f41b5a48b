//! Weather snapshot reader.
//!
//! An external ingest process keeps `wx/summary.json` current. The renderer
//! only needs the `local` section:
//!
//! ```json
//! {
//!   "local": {
//!     "beach": { "temp_f": 71.6, "humidity": 64 },
//!     "dock":  { "temp_f": 70.2, "humidity": 70 }
//!   }
//! }
//! ```
//!
//! The file is read fresh on every render with no retry. A missing or
//! broken file is "no weather this render" and the next request picks up
//! whatever the writer has produced since.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("weather file not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One location's sensor values. Either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Reading {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp_f: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
}

/// Location → reading, as of the moment the file was read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub readings: BTreeMap<String, Reading>,
}

impl WeatherSnapshot {
    /// Parse the snapshot document.
    ///
    /// The document must be valid JSON. Locations whose value is not an
    /// object are skipped rather than failing the whole snapshot.
    pub fn from_json(json: &str) -> Result<Self, WeatherError> {
        let doc: Value = serde_json::from_str(json)?;
        let readings = doc
            .get("local")
            .and_then(Value::as_object)
            .map(|local| {
                local
                    .iter()
                    .filter(|(_, v)| v.is_object())
                    .filter_map(|(name, v)| {
                        Reading::deserialize(v)
                            .ok()
                            .map(|reading| (name.clone(), reading))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self { readings })
    }

    pub fn reading(&self, location: &str) -> Option<&Reading> {
        self.readings.get(location)
    }
}

/// Accept a number or a numeric string; anything else counts as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

/// Reads the weather snapshot from a fixed path.
#[derive(Debug, Clone)]
pub struct WeatherReader {
    path: PathBuf,
}

impl WeatherReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read and parse the snapshot, reporting why it is unavailable.
    pub fn read_snapshot(&self) -> Result<WeatherSnapshot, WeatherError> {
        if !self.path.exists() {
            return Err(WeatherError::Missing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        WeatherSnapshot::from_json(&content)
    }

    /// Read the snapshot; `None` when it is absent, unreadable, or invalid.
    pub fn read(&self) -> Option<WeatherSnapshot> {
        match self.read_snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "weather unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::TestSite;

    fn reader(site: &TestSite) -> WeatherReader {
        WeatherReader::new(site.config().weather_path())
    }

    #[test]
    fn parses_local_readings() {
        let snap = WeatherSnapshot::from_json(
            r#"{"local": {"beach": {"temp_f": 71.6, "humidity": 64}}}"#,
        )
        .unwrap();
        let beach = snap.reading("beach").unwrap();
        assert_eq!(beach.temp_f, Some(71.6));
        assert_eq!(beach.humidity, Some(64.0));
    }

    #[test]
    fn missing_fields_are_none() {
        let snap =
            WeatherSnapshot::from_json(r#"{"local": {"beach": {"temp_f": 50}}}"#).unwrap();
        assert_eq!(snap.reading("beach").unwrap().humidity, None);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let snap = WeatherSnapshot::from_json(
            r#"{"local": {"beach": {"temp_f": " 68.4", "humidity": "n/a"}}}"#,
        )
        .unwrap();
        let beach = snap.reading("beach").unwrap();
        assert_eq!(beach.temp_f, Some(68.4));
        assert_eq!(beach.humidity, None);
    }

    #[test]
    fn non_object_locations_are_skipped() {
        let snap = WeatherSnapshot::from_json(
            r#"{"local": {"updated": "2024-06-01T10:00", "beach": {"temp_f": 70}}}"#,
        )
        .unwrap();
        assert!(snap.reading("updated").is_none());
        assert!(snap.reading("beach").is_some());
    }

    #[test]
    fn document_without_local_is_empty() {
        let snap = WeatherSnapshot::from_json(r#"{"marine": {}}"#).unwrap();
        assert!(snap.readings.is_empty());
        let snap = WeatherSnapshot::from_json("[1, 2]").unwrap();
        assert!(snap.readings.is_empty());
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(
            WeatherSnapshot::from_json("{not json"),
            Err(WeatherError::Json(_))
        ));
    }

    #[test]
    fn read_absent_file_is_none() {
        let site = TestSite::new();
        assert!(reader(&site).read().is_none());
        assert!(matches!(
            reader(&site).read_snapshot(),
            Err(WeatherError::Missing(_))
        ));
    }

    #[test]
    fn read_corrupt_file_is_none() {
        let site = TestSite::new();
        site.write_weather("{\"local\": ");
        assert!(reader(&site).read().is_none());
    }

    #[test]
    fn read_reflects_latest_file_contents() {
        let site = TestSite::new();
        let reader = reader(&site);
        site.write_weather(r#"{"local": {"beach": {"temp_f": 60}}}"#);
        assert_eq!(
            reader.read().unwrap().reading("beach").unwrap().temp_f,
            Some(60.0)
        );

        site.write_weather(r#"{"local": {"beach": {"temp_f": 61}}}"#);
        assert_eq!(
            reader.read().unwrap().reading("beach").unwrap().temp_f,
            Some(61.0)
        );
    }
}
