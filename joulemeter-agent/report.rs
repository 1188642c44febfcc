// Text and JSON rendering of a batch of readings

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::reader::LocationReading;

#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    label: &'a str,
    path: &'a PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    joules: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a LocationReading> for ReportEntry<'a> {
    fn from(reading: &'a LocationReading) -> Self {
        let (vendor, joules, error) = match &reading.result {
            Ok(sample) => (Some(sample.vendor), Some(sample.joules), None),
            Err(e) => (None, None, Some(e.to_string())),
        };

        Self {
            label: &reading.location.label,
            path: &reading.location.path,
            vendor,
            joules,
            error,
        }
    }
}

/// One line per location: `<label>\t<joules> J` or `<label>\terror: <reason>`
pub fn render_text(readings: &[LocationReading]) -> String {
    readings
        .iter()
        .map(|reading| match &reading.result {
            Ok(sample) => format!("{}\t{:.6} J\n", reading.location.label, sample.joules),
            Err(e) => format!("{}\terror: {}\n", reading.location.label, e),
        })
        .collect()
}

pub fn render_json(readings: &[LocationReading]) -> Result<String> {
    let entries: Vec<ReportEntry<'_>> = readings.iter().map(ReportEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

pub fn failed_count(readings: &[LocationReading]) -> usize {
    readings.iter().filter(|r| r.result.is_err()).count()
}
