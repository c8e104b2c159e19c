//! Result rendering
//!
//! A routine result (header row plus data rows) is rendered to plain
//! console lines, an aligned table, or a timestamped CSV file under the
//! results directory.

mod csv;
mod table;

pub use csv::write_csv;
pub use table::format_table;

use crate::config::{Settings, DATETIME_FORMAT};
use crate::scrape::{Mode, Row};
use crate::Result;
use chrono::Local;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};

/// How a routine result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table on the console
    Pretty,
    /// CSV file under the results directory
    File,
}

/// Renders the rows with the selected format; `None` means plain
/// space-separated console output.
pub fn write_results(
    rows: &[Row],
    mode: Mode,
    format: Option<OutputFormat>,
    settings: &Settings,
) -> Result<()> {
    match format {
        Some(OutputFormat::Pretty) => print!("{}", format_table(rows)),
        Some(OutputFormat::File) => file_output(rows, mode, settings)?,
        None => default_output(rows),
    }
    Ok(())
}

/// Prints each row as space-separated values.
fn default_output(rows: &[Row]) {
    for row in rows {
        println!("{}", row.join(" "));
    }
}

/// Writes the rows as `<mode>_<timestamp>.csv` under the results
/// directory, creating it when missing.
fn file_output(rows: &[Row], mode: Mode, settings: &Settings) -> Result<()> {
    let results_dir = settings.results_dir();
    std::fs::create_dir_all(&results_dir)?;

    let timestamp = Local::now().format(DATETIME_FORMAT);
    let file_path = results_dir.join(format!("{}_{}.csv", mode.as_str(), timestamp));

    let mut writer = BufWriter::new(File::create(&file_path)?);
    write_csv(&mut writer, rows)?;
    writer.flush()?;

    tracing::info!("results saved to {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAIN_DOC_URL, MAIN_PEP_URL};
    use url::Url;

    fn rows() -> Vec<Row> {
        vec![
            vec!["H1".to_string(), "H2".to_string()],
            vec!["a".to_string(), "b".to_string()],
        ]
    }

    fn settings(base: &std::path::Path) -> Settings {
        Settings::new(
            base.to_path_buf(),
            Url::parse(MAIN_DOC_URL).unwrap(),
            Url::parse(MAIN_PEP_URL).unwrap(),
        )
    }

    #[test]
    fn test_file_output_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());

        file_output(&rows(), Mode::Pep, &settings).unwrap();

        let entries: Vec<_> = std::fs::read_dir(settings.results_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);

        let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pep_"));
        assert!(name.ends_with(".csv"));

        let content = std::fs::read_to_string(&entries[0]).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("H1,H2"));
        assert_eq!(lines.next(), Some("a,b"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_results_file_variant() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());

        write_results(&rows(), Mode::Download, Some(OutputFormat::File), &settings).unwrap();
        assert!(settings.results_dir().exists());
    }
}
