//! Run configuration.
//!
//! Sheet selection is resolved by the caller before a conversion starts; the
//! converter never prompts.

use serde::{Deserialize, Serialize};

/// Configuration for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// The authoritative language: its placeholder order defines argument
    /// binding for every other language.
    pub main_lang: String,

    /// Secondary language codes, i.e. the language columns to export besides
    /// the main one.
    #[serde(default)]
    pub langs: Vec<String>,

    /// Sheets to include; empty means every sheet.
    #[serde(default)]
    pub sheets: Vec<String>,

    /// Duplicate the main language into the Apple `Base.lproj` bucket.
    #[serde(default = "default_base_locale")]
    pub base_locale: bool,

    /// Rewrite main-language ASCII letters to mathematical script characters
    /// in the generated resources, a pseudo-localization aid for spotting
    /// unlocalized text in an app. XLIFF documents are exempt.
    #[serde(default)]
    pub cursive_main_lang: bool,
}

fn default_base_locale() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            main_lang: "en".to_string(),
            langs: Vec::new(),
            sheets: Vec::new(),
            base_locale: true,
            cursive_main_lang: false,
        }
    }
}

impl Config {
    /// All languages to process, main language first. A secondary language
    /// equal to the main one is skipped.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_lang.as_str()).chain(
            self.langs
                .iter()
                .map(String::as_str)
                .filter(move |lang| *lang != self.main_lang),
        )
    }

    /// Whether a sheet participates in this run.
    pub fn includes_sheet(&self, name: &str) -> bool {
        self.sheets.is_empty() || self.sheets.iter().any(|s| s == name)
    }
}
