use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{Error, Metric, Record, SkippedFile};

const EXTENSION: &str = "json";

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

// Fields are optional so that an entry missing one is dropped rather than failing the file.
#[derive(Deserialize, Debug)]
struct Entry {
    #[serde(rename = "dateTime")]
    date_time: Option<Value>,
    value: Option<Value>,
}

#[derive(Debug, Default)]
pub struct SourceData {
    pub records: Vec<Record>,
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub dropped_records: usize,
}

// An unreadable folder or a broken file just contributes no records.
pub fn read_metric(folder: &Path, metric: Metric) -> SourceData {
    let mut data = SourceData::default();

    for path in matching_files(folder, metric.prefix()) {
        match read_file(&path) {
            Ok((records, dropped)) => {
                data.files_read += 1;
                data.dropped_records += dropped;
                data.records.extend(records);
            }
            Err(e) => {
                warn!("{}", e);
                data.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    if data.dropped_records > 0 {
        debug!(
            "{}: dropped {} records with an unusable date or value",
            metric, data.dropped_records
        );
    }

    data
}

pub fn matching_files(folder: &Path, prefix: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list {}: {}", folder.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            let name_matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix));
            let ext_matches = path.extension().is_some_and(|e| e == EXTENSION);
            name_matches && ext_matches
        })
        .sorted()
        .collect()
}

pub fn read_file(path: &Path) -> Result<(Vec<Record>, usize), Error> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<Entry> = serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let total = entries.len();
    let records: Vec<Record> = entries
        .into_iter()
        .filter_map(|entry| {
            let date = entry.date_time.as_ref().and_then(coerce_date)?;
            let value = entry.value.as_ref().and_then(coerce_value)?;
            Some(Record { date, value })
        })
        .collect();
    let dropped = total - records.len();

    Ok((records, dropped))
}

pub fn coerce_date(raw: &Value) -> Option<NaiveDate> {
    let s = raw.as_str()?.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        // Offset-qualified timestamps keep their own wall-clock date.
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

pub fn coerce_value(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
