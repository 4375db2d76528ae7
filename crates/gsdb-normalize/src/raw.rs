//! Raw table loading.
//!
//! Reads a brand export into [`RawRow`]s without interpreting any value.

use std::io::Read;
use std::path::Path;

use gsdb_core::RawRow;

use crate::error::NormalizeError;

/// Load a brand's raw CSV export.
///
/// The file must be UTF-8 with a header row. Rows shorter than the header
/// are accepted; their missing trailing columns read as `""`.
///
/// # Errors
///
/// Returns [`NormalizeError::Io`] if the file cannot be opened and
/// [`NormalizeError::Csv`] if it is not valid UTF-8 CSV.
pub fn load_raw_table(path: &Path) -> Result<Vec<RawRow>, NormalizeError> {
    let file = std::fs::File::open(path).map_err(|e| NormalizeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rows = read_raw_rows(file).map_err(|e| NormalizeError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded raw table");
    Ok(rows)
}

/// Read raw rows from any CSV source.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] on malformed or non-UTF-8 input.
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
