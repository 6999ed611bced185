use std::path::PathBuf;

use log::info;

use crate::csv_utils;
use crate::processor::{aggregate, merge};
use crate::schema::adapt;
use crate::source::read_metric;
use crate::types::{DailyTable, Error, Metric, SkippedFile};

#[derive(Clone, Debug)]
pub struct ConvertConfig {
    pub source_dir: PathBuf,
    pub output: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricReport {
    pub metric: Metric,
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub dropped_records: usize,
    pub days: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub metrics: Vec<MetricReport>,
    pub rows_written: usize,
}

impl ConversionReport {
    pub fn skipped_files(&self) -> impl Iterator<Item = &SkippedFile> {
        self.metrics.iter().flat_map(|m| m.skipped.iter())
    }
}

// Only a failure to write the output is an error.
pub fn convert(config: &ConvertConfig) -> Result<ConversionReport, Error> {
    let mut tables: Vec<DailyTable> = Vec::with_capacity(Metric::ALL.len());
    let mut metrics = Vec::with_capacity(Metric::ALL.len());

    for metric in Metric::ALL {
        let data = read_metric(&config.source_dir, metric);
        let table = aggregate(metric, &data.records);
        info!(
            "{}: {} records from {} files over {} days",
            metric,
            data.records.len(),
            data.files_read,
            table.len()
        );

        metrics.push(MetricReport {
            metric,
            files_read: data.files_read,
            skipped: data.skipped,
            dropped_records: data.dropped_records,
            days: table.len(),
        });
        tables.push(table);
    }

    let rows = adapt(&merge(&tables));
    csv_utils::write_file(&config.output, &rows)?;

    Ok(ConversionReport {
        output: config.output.clone(),
        metrics,
        rows_written: rows.len(),
    })
}
