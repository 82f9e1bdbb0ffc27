//! All error types for the locsheet crate.
//!
//! Only structural failures live here; per-entry anomalies that do not stop a
//! conversion are collected as warnings in [`crate::report::Report`].

use thiserror::Error;

use crate::formats::Format;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no usable sheets: {0}")]
    NoUsableSheets(String),

    #[error("unknown encoding label `{0}`")]
    UnknownEncoding(String),

    #[error("back reference `{reference}` not found in language `{language}` at sheet `{sheet}`")]
    UnresolvedReference {
        reference: String,
        language: String,
        sheet: String,
    },

    #[error("reference cycle through `{reference}`")]
    ReferenceCycle { reference: String },

    #[error("sheet `{sheet}`: undefined argument for {format} key `{key}`[{placeholder}]")]
    UndefinedArgument {
        sheet: String,
        format: Format,
        key: String,
        placeholder: String,
    },
}
