use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{DailyTable, MergedRow, Metric, Record, Rounding};

// Rounding is applied only in `finish`, to the complete daily total.
#[derive(Debug)]
pub struct Processor {
    metric: Metric,
    totals: BTreeMap<NaiveDate, f64>,
}

impl Processor {
    pub fn new(metric: Metric) -> Processor {
        Processor {
            metric,
            totals: BTreeMap::new(),
        }
    }

    pub fn process_record(&mut self, record: &Record) {
        *self.totals.entry(record.date).or_insert(0.0) += record.value;
    }

    pub fn finish(self) -> DailyTable {
        let rows = match self.metric.rounding() {
            Rounding::None => self.totals,
            Rounding::NearestInteger => self
                .totals
                .into_iter()
                .map(|(date, total)| (date, total.round()))
                .collect(),
        };
        DailyTable {
            metric: self.metric,
            rows,
        }
    }
}

pub fn aggregate<'a, I: IntoIterator<Item = &'a Record>>(metric: Metric, records: I) -> DailyTable {
    let mut p = Processor::new(metric);
    for record in records {
        p.process_record(record);
    }
    p.finish()
}

// Full outer join on date. A metric with no row for a date is left at zero.
pub fn merge(tables: &[DailyTable]) -> Vec<MergedRow> {
    let mut merged: BTreeMap<NaiveDate, MergedRow> = BTreeMap::new();
    for table in tables {
        for (date, value) in &table.rows {
            merged
                .entry(*date)
                .or_insert_with(|| MergedRow::new(*date))
                .set(table.metric, *value);
        }
    }
    merged.into_values().collect()
}
