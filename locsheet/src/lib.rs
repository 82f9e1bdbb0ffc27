#![forbid(unsafe_code)]
//! Spreadsheet-to-localization exporter for Rust.
//!
//! Converts multi-language CSV sheets into Android `strings.xml`, Apple
//! `.strings`, nested JSON trees, per-language JSON, a Python dict literal,
//! and XLIFF 1.2, all in one pass over the source.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locsheet::{Config, Converter, CsvSheet};
//!
//! let sheets = vec![CsvSheet::read_from("Main.csv")?];
//! let config = Config {
//!     main_lang: "en".to_string(),
//!     langs: vec!["tw".to_string(), "ja".to_string()],
//!     ..Config::default()
//! };
//! let conversion = Converter::new(config).convert(&sheets)?;
//! conversion.report().write_to(std::io::stderr())?;
//! conversion.write_to("output/")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Source model
//!
//! Each sheet row is one localizable message. Localized texts may contain
//! `{{name}}` placeholders, bound to positional format arguments by their
//! order of first occurrence in the main language, and `%ref%` backreferences
//! that splice in another row's text for the same language, resolved
//! transitively.

pub mod binder;
pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod locale;
pub mod pseudo;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod source;
pub mod token;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    converter::{Conversion, Converter},
    error::Error,
    formats::Format,
    report::{Diagnostic, Report, Severity},
    source::{CsvSheet, Sheet},
    types::{Entry, Segment, Target, TokenSeq},
};
