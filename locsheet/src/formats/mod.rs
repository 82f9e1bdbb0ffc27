//! Output format emitters.
//!
//! Each submodule turns rendered entries into the text of one platform file
//! format. The emitters are pure string builders; path layout and file IO
//! stay in the converter.

pub mod android;
pub mod apple;
pub mod json_tree;
pub mod language_json;
pub mod python_dict;
pub mod xliff;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Segment, TokenSeq};

/// The output formats a sheet row can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Android,
    Apple,
    JsonTree,
    LanguageJson,
    PythonDict,
    Xliff,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Android => "android",
            Format::Apple => "ios",
            Format::JsonTree => "json",
            Format::LanguageJson => "lang-json",
            Format::PythonDict => "python",
            Format::Xliff => "xliff",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(Format::Android),
            "ios" => Ok(Format::Apple),
            "json" => Ok(Format::JsonTree),
            "lang-json" => Ok(Format::LanguageJson),
            "python" => Ok(Format::PythonDict),
            "xliff" => Ok(Format::Xliff),
            _ => Err(format!("unknown format: {s}")),
        }
    }
}

/// Renders a resolved sequence with placeholders rewrapped as single-brace
/// `{name}` interpolation slots, the convention of the JSON and Python
/// outputs. Anonymous placeholders are dropped.
pub(crate) fn interpolate(seq: &TokenSeq) -> String {
    let mut out = String::new();
    for segment in seq.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) if name.is_empty() => {}
            Segment::Placeholder(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out
}

/// JSON string-literal escaping without the surrounding quotes.
pub(crate) fn json_escape(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
