//! The tabular source adapter.
//!
//! The conversion core only needs `has_column` and `get`; everything about
//! where the cells come from lives behind the [`Sheet`] trait. The shipped
//! implementation reads one CSV file per sheet, BOM-aware, so spreadsheet
//! exports in UTF-8-with-BOM or UTF-16 work unchanged.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// Recognized column names. Header cells may carry a parenthesized note
/// (e.g. `Android arg (comma separated)`), which is stripped before lookup.
pub mod columns {
    pub const REF_KEY: &str = "Ref Key";

    pub const ANDROID_KEY: &str = "Android";
    pub const ANDROID_FOLDER: &str = "Android folder";
    pub const ANDROID_FILE: &str = "Android file";
    pub const ANDROID_ARG: &str = "Android arg";

    pub const IOS_KEY: &str = "iOS";
    pub const IOS_FILE: &str = "iOS file";
    pub const IOS_ARG: &str = "iOS arg";

    pub const JSON_KEY: &str = "JSON";
    pub const JSON_FILE: &str = "JSON file";

    pub const LANG_JSON_KEY: &str = "Lang JSON";

    pub const PYTHON_KEY: &str = "Python";
    pub const PYTHON_FILE: &str = "Python file";

    pub const XLIFF_KEY: &str = "XLIFF";
}

lazy_static! {
    static ref HEADER_NOTE: Regex = Regex::new(r"\([^()]*\)").unwrap();
}

fn strip_note(header: &str) -> String {
    HEADER_NOTE.replace_all(header, "").trim().to_string()
}

/// Read access to one sheet of the tabular source.
pub trait Sheet {
    fn name(&self) -> &str;

    /// Number of data rows (the header row excluded).
    fn rows(&self) -> usize;

    fn has_column(&self, column: &str) -> bool;

    /// The trimmed cell value, or `None` when the cell (or the column) is
    /// empty or absent.
    fn get(&self, row: usize, column: &str) -> Option<&str>;
}

/// A sheet backed by one CSV file. The first record is the header row.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    name: String,
    columns: HashMap<String, usize>,
    cells: Vec<Vec<String>>,
}

impl CsvSheet {
    /// Reads a sheet from a CSV file; the sheet name is the file stem.
    /// Decoding is BOM-aware (UTF-8 passes through untouched).
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::read_from_with_encoding(path, None)
    }

    /// Like [`CsvSheet::read_from`], but forces the character encoding by
    /// WHATWG label (e.g. `utf-16le`, `big5`) for exports that carry no BOM.
    /// A BOM, when present, still takes precedence.
    pub fn read_from_with_encoding<P: AsRef<Path>>(
        path: P,
        encoding: Option<&str>,
    ) -> Result<Self, Error> {
        let encoding = encoding
            .map(|label| {
                encoding_rs::Encoding::for_label(label.as_bytes())
                    .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
            })
            .transpose()?;
        let name = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(encoding)
            .bom_override(true)
            .build(file);
        Self::from_reader(&name, decoder)
    }

    /// Reads a sheet from any reader of CSV text.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let mut columns = HashMap::new();
        if let Some(header) = records.next() {
            for (index, cell) in header?.iter().enumerate() {
                let column = strip_note(cell);
                if !column.is_empty() {
                    columns.insert(column, index);
                }
            }
        }

        let mut cells = Vec::new();
        for record in records {
            let record = record?;
            cells.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(CsvSheet {
            name: name.to_string(),
            columns,
            cells,
        })
    }

    /// Parses a sheet from a string (used heavily in tests).
    pub fn from_str(name: &str, content: &str) -> Result<Self, Error> {
        Self::from_reader(name, Cursor::new(content))
    }
}

impl Sheet for CsvSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn rows(&self) -> usize {
        self.cells.len()
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = *self.columns.get(column)?;
        let cell = self.cells.get(row)?.get(index)?.as_str();
        if cell.is_empty() { None } else { Some(cell) }
    }
}
