use crate::domain::model::{ExportResult, ExportRow, NumerologyResult, RosterEntry};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::domain::services::{calculate_numerology_data, NumeralGrid};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Reads a `name,dob,gender` roster and writes one grid row per person.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, file_name: &str) -> String {
        format!("{}/{}", self.config.output_path(), file_name)
    }
}

/// Builds the export row for one roster entry; failures keep the identity columns.
pub fn export_row(entry: &RosterEntry) -> ExportRow {
    match calculate_numerology_data(&entry.dob, &entry.gender) {
        Ok(result) => computed_row(entry, &result),
        Err(e) => {
            tracing::warn!("⚠️ Roster entry {:?} rejected: {}", entry.name, e);
            error_row(entry)
        }
    }
}

fn computed_row(entry: &RosterEntry, result: &NumerologyResult) -> ExportRow {
    let grid = NumeralGrid::from_numerals(&result.grid_numerals);
    // Lo Shu order: 4 9 2 / 3 5 7 / 8 1 6
    let cell = |row: usize, col: usize| grid.cell_text(row, col);

    ExportRow {
        name: entry.name.clone(),
        dob: entry.dob.clone(),
        gender: entry.gender.clone(),
        destiny: result.destiny_number.to_string(),
        root: result.root_number.to_string(),
        directional: result.directional_number.to_string(),
        grid_4: cell(0, 0),
        grid_9: cell(0, 1),
        grid_2: cell(0, 2),
        grid_3: cell(1, 0),
        grid_5: cell(1, 1),
        grid_7: cell(1, 2),
        grid_8: cell(2, 0),
        grid_1: cell(2, 1),
        grid_6: cell(2, 2),
    }
}

fn error_row(entry: &RosterEntry) -> ExportRow {
    let error = || ExportRow::ERROR.to_string();
    ExportRow {
        name: entry.name.clone(),
        dob: entry.dob.clone(),
        gender: entry.gender.clone(),
        destiny: error(),
        root: error(),
        directional: error(),
        grid_4: error(),
        grid_9: error(),
        grid_2: error(),
        grid_3: error(),
        grid_5: error(),
        grid_7: error(),
        grid_8: error(),
        grid_1: error(),
        grid_6: error(),
    }
}

fn write_delimited(rows: &[ExportRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    type Record = RosterEntry;
    type Output = ExportResult;

    async fn extract(&self) -> Result<Vec<RosterEntry>> {
        tracing::debug!("Reading roster from: {}", self.config.roster_path());
        let data = self.storage.read_file(self.config.roster_path()).await?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut entries = Vec::new();
        for record in reader.deserialize::<RosterEntry>() {
            entries.push(record?);
        }
        Ok(entries)
    }

    async fn transform(&self, data: Vec<RosterEntry>) -> Result<ExportResult> {
        let rows: Vec<ExportRow> = data.iter().map(export_row).collect();
        let failed = rows.iter().filter(|row| row.is_error()).count();
        if failed > 0 {
            tracing::warn!("⚠️ {} of {} roster entries could not be calculated", failed, rows.len());
        }

        Ok(ExportResult {
            csv_output: write_delimited(&rows, b',')?,
            tsv_output: write_delimited(&rows, b'\t')?,
            json_output: serde_json::to_string_pretty(&rows)?,
            failed,
            rows,
        })
    }

    async fn load(&self, result: ExportResult) -> Result<String> {
        let stem = self.config.file_stem();
        let files: Vec<(String, &str)> = self
            .config
            .output_formats()
            .iter()
            .map(|format| {
                let content = match format.as_str() {
                    "tsv" => result.tsv_output.as_str(),
                    "json" => result.json_output.as_str(),
                    _ => result.csv_output.as_str(),
                };
                (format!("{}.{}", stem, format), content)
            })
            .collect();

        tracing::debug!(
            "Exporting {} rows ({} failed) generated at {}",
            result.rows.len(),
            result.failed,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        if let Some(archive) = self.config.compression_filename() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, content) in &files {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            let path = self.output_file(archive);
            tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), path);
            self.storage.write_file(&path, &zip_data).await?;
            return Ok(path);
        }

        let mut written = Vec::new();
        for (name, content) in &files {
            let path = self.output_file(name);
            self.storage.write_file(&path, content.as_bytes()).await?;
            written.push(path);
        }
        Ok(written.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, dob: &str, gender: &str) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            dob: dob.to_string(),
            gender: gender.to_string(),
        }
    }

    #[test]
    fn test_export_row_columns() {
        let row = export_row(&entry("Asha", "1990-10-28", "Male"));
        assert_eq!(row.destiny, "3");
        assert_eq!(row.root, "1");
        assert_eq!(row.directional, "1");
        // 2 8 1 1 9 9 from the date, destiny 3, root 1, directional 1
        assert_eq!(row.grid_1, "1 1 1 1");
        assert_eq!(row.grid_9, "9 9");
        assert_eq!(row.grid_2, "2");
        assert_eq!(row.grid_8, "8");
        assert_eq!(row.grid_3, "3");
        assert_eq!(row.grid_4, "");
        assert!(!row.is_error());
    }

    #[test]
    fn test_neutral_directional_column() {
        let row = export_row(&entry("Sam", "1990-10-28", "Other"));
        assert_eq!(row.directional, "-");
        assert_eq!(row.grid_1, "1 1 1");
    }

    #[test]
    fn test_rejected_entry_becomes_error_row() {
        let row = export_row(&entry("Broken", "28/10/1990", "Male"));
        assert!(row.is_error());
        assert_eq!(row.name, "Broken");
        assert_eq!(row.dob, "28/10/1990");
        assert_eq!(row.grid_6, "Error");
    }

    #[test]
    fn test_write_delimited_headers() {
        let rows = vec![export_row(&entry("Asha", "1990-10-28", "Male"))];
        let tsv = write_delimited(&rows, b'\t').unwrap();
        let header = tsv.lines().next().unwrap();
        assert_eq!(
            header,
            "Name\tDate of Birth\tGender\tDestiny\tRoot\tDirectional\tGrid 4\tGrid 9\tGrid 2\tGrid 3\tGrid 5\tGrid 7\tGrid 8\tGrid 1\tGrid 6"
        );
    }
}
