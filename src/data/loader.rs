use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{CellRef, Channel, ValidatedTrace};

/// Rows of text cells exactly as read from the file.
pub type RawTable = Vec<Vec<String>>;

/// Number of header rows preceding the sample body.
pub const HEADER_ROWS: usize = 2;

const TIME_AXIS_LABEL: &str = "x-axis";
const TIME_UNIT: &str = "second";
const VOLTAGE_UNIT: &str = "Volt";
const MISSING: &str = "<missing>";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} is not a CSV file", .0.display())]
    BadExtension(PathBuf),

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{cell}: expected \"{expected}\" but found \"{found}\"")]
    BadHeader {
        cell: CellRef,
        expected: String,
        found: String,
    },

    #[error("{cell}: '{text}' is not a number")]
    NumericParse { cell: CellRef, text: String },
}

impl LoadError {
    /// True for errors about the file's contents rather than access to it.
    pub fn is_validation(&self) -> bool {
        matches!(self, LoadError::BadHeader { .. } | LoadError::NumericParse { .. })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and validate an oscilloscope CSV export.
///
/// Expected layout:
/// ```text
/// x-axis,1,2,...
/// second,Volt,Volt,...
/// 0.000,0.12,-0.40,...
/// ```
pub fn load(path: &Path) -> Result<ValidatedTrace, LoadError> {
    if !has_csv_extension(path) {
        return Err(LoadError::BadExtension(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let table = read_table(path)?;
    validate_header(&table)?;
    parse_body(&table)
}

fn has_csv_extension(path: &Path) -> bool {
    path.to_string_lossy().to_ascii_lowercase().ends_with(".csv")
}

/// Read the whole file as a grid of text cells. The reader rejects ragged rows.
fn read_table(path: &Path) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

/// Check the two header rows, stopping at the first offending cell.
pub fn validate_header(table: &RawTable) -> Result<(), LoadError> {
    let columns = table.first().map_or(0, |row| row.len());

    expect_cell(table, CellRef::new(0, 0), TIME_AXIS_LABEL)?;
    if columns < 2 {
        // No channel columns at all.
        expect_cell(table, CellRef::new(0, 1), "1")?;
    }
    for i in 1..columns {
        expect_cell(table, CellRef::new(0, i), &i.to_string())?;
    }

    expect_cell(table, CellRef::new(1, 0), TIME_UNIT)?;
    for i in 1..columns {
        expect_cell(table, CellRef::new(1, i), VOLTAGE_UNIT)?;
    }
    Ok(())
}

fn expect_cell(table: &RawTable, cell: CellRef, expected: &str) -> Result<(), LoadError> {
    let found = table.get(cell.row).and_then(|row| row.get(cell.col));
    match found {
        Some(text) if text == expected => Ok(()),
        other => Err(LoadError::BadHeader {
            cell,
            expected: expected.to_string(),
            found: other.map_or(MISSING, |s| s.as_str()).to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

/// Turn the rows after the header into the time axis and channel samples.
/// Assumes `validate_header` already passed.
fn parse_body(table: &RawTable) -> Result<ValidatedTrace, LoadError> {
    let header = &table[0];
    let body = &table[HEADER_ROWS..];

    let mut time = Vec::with_capacity(body.len());
    let mut channels: Vec<Channel> = header[1..]
        .iter()
        .map(|label| Channel {
            label: label.clone(),
            samples: Vec::with_capacity(body.len()),
        })
        .collect();

    for (offset, row) in body.iter().enumerate() {
        let row_no = HEADER_ROWS + offset;
        time.push(parse_cell(row, CellRef::new(row_no, 0))?);
        for (i, channel) in channels.iter_mut().enumerate() {
            channel.samples.push(parse_cell(row, CellRef::new(row_no, i + 1))?);
        }
    }

    Ok(ValidatedTrace { time, channels })
}

fn parse_cell(row: &[String], cell: CellRef) -> Result<f64, LoadError> {
    let text = row.get(cell.col).map_or("", |s| s.as_str());
    text.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::NumericParse {
            cell,
            text: text.to_string(),
        })
}
