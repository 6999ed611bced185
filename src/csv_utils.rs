use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::schema::{Output, COLUMNS};
use crate::types::Error;

pub const SECTION_TITLE: &str = "Activities";

pub fn save<'a, I: IntoIterator<Item = &'a Output>>(
    mut writer: impl Write,
    rows: I,
) -> Result<(), Error> {
    writeln!(writer, "{}", SECTION_TITLE).map_err(|e| Error::Serialization(e.to_string()))?;

    // The header is written by hand so that an export without data still gets one.
    let mut wrt = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if let Err(e) = wrt.write_record(COLUMNS) {
        return Err(Error::Serialization(e.to_string()));
    }
    for row in rows {
        if let Err(e) = wrt.serialize(row) {
            return Err(Error::Serialization(e.to_string()));
        }
    }
    wrt.flush().map_err(|e| Error::Serialization(e.to_string()))
}

pub fn write_file<'a, I: IntoIterator<Item = &'a Output>>(path: &Path, rows: I) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;
    save(BufWriter::new(file), rows)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::schema::adapt;
    use crate::types::MergedRow;

    fn render(rows: &[Output]) -> String {
        let mut buf = Vec::new();
        save(&mut buf, rows).expect("Cannot save");
        String::from_utf8(buf).expect("Invalid utf8")
    }

    #[test]
    fn test_serialize_activities() {
        let rows = adapt(&[
            MergedRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                steps: 10.0,
                calories: 0.0,
                distance: 0.004,
            },
            MergedRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                steps: 4567.0,
                calories: 123.45,
                distance: 2.3,
            },
        ]);

        let expected = r#"Activities
Date,Calories Burned,Steps,Distance,Floors,Minutes Sedentary,Minutes Lightly Active,Minutes Fairly Active,Minutes Very Active,Activity Calories
2024-01-01,123.45,4567,2.30,0,0,0,0,0,0
2024-01-02,0.00,10,0.00,0,0,0,0,0,0
"#;
        assert_eq!(render(&rows), expected);
    }

    #[test]
    fn test_serialize_without_rows_keeps_header() {
        let expected = "Activities\n".to_string() + &COLUMNS.join(",") + "\n";
        assert_eq!(render(&[]), expected);
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are much longer than the header").unwrap();

        let none: Vec<Output> = Vec::new();
        write_file(&path, &none).expect("Cannot write");

        let actual = std::fs::read_to_string(&path).unwrap();
        assert!(actual.starts_with("Activities\nDate,"));
        assert!(!actual.contains("stale"));
    }

    #[test]
    fn test_write_file_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let none: Vec<Output> = Vec::new();
        let actual = write_file(&path, &none);
        assert!(matches!(actual, Err(Error::Output { .. })));
    }
}
