use itertools::Itertools;
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::amount::Amount;
use crate::types::{MergedRow, Metric, ValueKind};

// Metric columns as they appear between Date and the placeholders.
pub const METRIC_ORDER: [Metric; 3] = [Metric::Calories, Metric::Steps, Metric::Distance];

// Required by the import but not present in the export; always written as 0.
pub const PLACEHOLDER_COLUMNS: [&str; 6] = [
    "Floors",
    "Minutes Sedentary",
    "Minutes Lightly Active",
    "Minutes Fairly Active",
    "Minutes Very Active",
    "Activity Calories",
];

pub const COLUMNS: [&str; 10] = [
    "Date",
    METRIC_ORDER[0].column(),
    METRIC_ORDER[1].column(),
    METRIC_ORDER[2].column(),
    PLACEHOLDER_COLUMNS[0],
    PLACEHOLDER_COLUMNS[1],
    PLACEHOLDER_COLUMNS[2],
    PLACEHOLDER_COLUMNS[3],
    PLACEHOLDER_COLUMNS[4],
    PLACEHOLDER_COLUMNS[5],
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Cell {
    Integer(i64),
    Decimal(Amount),
}

impl Cell {
    pub fn new(metric: Metric, value: f64) -> Cell {
        match metric.kind() {
            ValueKind::Integer => Cell::Integer(value.round() as i64),
            ValueKind::FixedDecimal => Cell::Decimal(value.into()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Integer(n) => serializer.serialize_i64(*n),
            Cell::Decimal(a) => a.serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    pub date: String,
    pub metrics: [Cell; METRIC_ORDER.len()],
    pub placeholders: [i64; PLACEHOLDER_COLUMNS.len()],
}

// Written as a flat record in COLUMNS order; the header comes from COLUMNS, not from here.
impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut t = serializer.serialize_tuple(COLUMNS.len())?;
        t.serialize_element(&self.date)?;
        for cell in &self.metrics {
            t.serialize_element(cell)?;
        }
        for n in &self.placeholders {
            t.serialize_element(n)?;
        }
        t.end()
    }
}

impl From<&MergedRow> for Output {
    fn from(row: &MergedRow) -> Self {
        Output {
            date: row.date.format("%Y-%m-%d").to_string(),
            metrics: METRIC_ORDER.map(|m| Cell::new(m, row.get(m))),
            placeholders: [0; PLACEHOLDER_COLUMNS.len()],
        }
    }
}

pub fn adapt(rows: &[MergedRow]) -> Vec<Output> {
    sort_by_date(rows.iter().map(Output::from).collect())
}

// Stable, so already sorted input comes back unchanged.
pub fn sort_by_date(rows: Vec<Output>) -> Vec<Output> {
    rows.into_iter()
        .sorted_by(|a, b| a.date.cmp(&b.date))
        .collect()
}
