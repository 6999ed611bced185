use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Steps,
    Calories,
    Distance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    FixedDecimal,
}

// Applied to a daily total once every record for that date has been summed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rounding {
    None,
    // Nearest integer, ties away from zero.
    NearestInteger,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Steps, Metric::Calories, Metric::Distance];

    pub fn prefix(&self) -> &'static str {
        match self {
            Metric::Steps => "steps",
            Metric::Calories => "calories",
            Metric::Distance => "distance",
        }
    }

    pub const fn column(&self) -> &'static str {
        match self {
            Metric::Steps => "Steps",
            Metric::Calories => "Calories Burned",
            Metric::Distance => "Distance",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Metric::Steps => ValueKind::Integer,
            Metric::Calories | Metric::Distance => ValueKind::FixedDecimal,
        }
    }

    pub fn rounding(&self) -> Rounding {
        match self.kind() {
            ValueKind::Integer => Rounding::NearestInteger,
            ValueKind::FixedDecimal => Rounding::None,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DailyTable {
    pub metric: Metric,
    pub rows: BTreeMap<NaiveDate, f64>,
}

impl DailyTable {
    pub fn empty(metric: Metric) -> DailyTable {
        DailyTable {
            metric,
            rows: BTreeMap::new(),
        }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.rows.get(date).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub steps: f64,
    pub calories: f64,
    pub distance: f64,
}

impl MergedRow {
    pub fn new(date: NaiveDate) -> MergedRow {
        MergedRow {
            date,
            steps: 0.0,
            calories: 0.0,
            distance: 0.0,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Steps => self.steps,
            Metric::Calories => self.calories,
            Metric::Distance => self.distance,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Steps => self.steps = value,
            Metric::Calories => self.calories = value,
            Metric::Distance => self.distance = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Cannot write output file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error while writing CSV: `{0}`")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_descriptors() {
        assert_eq!(Metric::Steps.prefix(), "steps");
        assert_eq!(Metric::Calories.column(), "Calories Burned");
        assert_eq!(Metric::Steps.rounding(), Rounding::NearestInteger);
        assert_eq!(Metric::Distance.rounding(), Rounding::None);
        assert_eq!(Metric::Distance.kind(), ValueKind::FixedDecimal);
    }

    #[test]
    fn merged_row_starts_zeroed() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut row = MergedRow::new(date);
        for m in Metric::ALL {
            assert_eq!(row.get(m), 0.0);
        }

        row.set(Metric::Calories, 12.5);
        assert_eq!(row.calories, 12.5);
        assert_eq!(row.get(Metric::Calories), 12.5);
    }

    #[test]
    fn error_messages_name_the_file() {
        let err = Error::Output {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/out.csv"));
    }
}
