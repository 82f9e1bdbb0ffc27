//! The conversion orchestrator.
//!
//! Phases run strictly in order: load entries from the usable sheets, build
//! the reference map, tokenize every (entry, language) text, then resolve,
//! bind and emit entry by entry. Output documents accumulate in memory and
//! are rendered to file contents at the end, so a fatal error anywhere leaves
//! no partial output behind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    binder::{self, NO_ESCAPE},
    config::Config,
    error::Error,
    formats::{
        self, Format, android, apple, json_tree::JsonTree, language_json::LanguageDocs,
        python_dict, xliff,
    },
    locale::{android_locale, apple_locale},
    pseudo,
    registry::KeyRegistry,
    report::Report,
    resolve::{Resolution, Resolver},
    source::{Sheet, columns},
    token::tokenize,
    types::{Entry, Target, TokenSeq},
};

const ANDROID_DEFAULT_FILE: &str = "strings";
const APPLE_DEFAULT_FILE: &str = "Localizable";
const JSON_DEFAULT_FILE: &str = "i18n";
const PYTHON_DEFAULT_FILE: &str = "strings";

/// A JSON file cell of `*` routes the entry into every named JSON group.
const JSON_WILDCARD: &str = "*";

/// Runs conversions for one configuration.
#[derive(Debug)]
pub struct Converter {
    config: Config,
}

/// The in-memory outcome of a conversion: rendered file contents keyed by
/// output-relative path, plus the accumulated diagnostics.
#[derive(Debug)]
pub struct Conversion {
    files: BTreeMap<PathBuf, String>,
    report: Report,
}

impl Conversion {
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Rendered output files, keyed by path relative to the output root.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_path(), content.as_str()))
    }

    /// Writes every rendered file under `out_dir`, creating directories as
    /// needed.
    pub fn write_to<P: AsRef<Path>>(&self, out_dir: P) -> Result<(), Error> {
        for (relative, content) in &self.files {
            let path = out_dir.as_ref().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Converter { config }
    }

    /// Converts a set of sheets into rendered output files.
    pub fn convert<S: Sheet>(&self, sheets: &[S]) -> Result<Conversion, Error> {
        let mut report = Report::new();
        let (entries, ref_map) = self.load(sheets, &mut report)?;

        let tokenized: Vec<BTreeMap<String, TokenSeq>> = entries
            .iter()
            .map(|entry| {
                entry
                    .texts
                    .iter()
                    .map(|(language, text)| (language.clone(), tokenize(text)))
                    .collect()
            })
            .collect();

        let mut resolver = Resolver::new(&entries, &tokenized, &ref_map);
        let mut registry = KeyRegistry::new();
        let mut out = Outputs::default();
        for index in 0..entries.len() {
            self.emit_entry(
                index,
                &entries,
                &mut resolver,
                &mut registry,
                &mut out,
                &mut report,
            )?;
        }

        let files = out.finalize(&self.config, &mut report)?;
        Ok(Conversion { files, report })
    }

    fn load<S: Sheet>(
        &self,
        sheets: &[S],
        report: &mut Report,
    ) -> Result<(Vec<Entry>, HashMap<String, usize>), Error> {
        let mut entries = Vec::new();
        let mut ref_map = HashMap::new();
        let mut usable = 0;
        for sheet in sheets {
            if !self.config.includes_sheet(sheet.name()) {
                continue;
            }
            if !sheet.has_column(&self.config.main_lang) {
                report.warn(format!(
                    "sheet `{}` has no `{}` column; skipped",
                    sheet.name(),
                    self.config.main_lang
                ));
                continue;
            }
            usable += 1;
            for row in 0..sheet.rows() {
                let entry = self.load_row(sheet, row);
                if entry.is_empty() {
                    continue;
                }
                if let Some(key) = &entry.ref_key {
                    if ref_map.contains_key(key) {
                        report.warn(format!(
                            "duplicated reference key `{key}` at sheet `{}`; first definition wins",
                            sheet.name()
                        ));
                    } else {
                        ref_map.insert(key.clone(), entries.len());
                    }
                }
                entries.push(entry);
            }
            report.sheet_processed(sheet.name());
        }
        if usable == 0 {
            return Err(Error::NoUsableSheets(format!(
                "no sheet has a `{}` column",
                self.config.main_lang
            )));
        }
        Ok((entries, ref_map))
    }

    fn load_row<S: Sheet>(&self, sheet: &S, row: usize) -> Entry {
        let mut entry = Entry::new(sheet.name(), row);
        entry.ref_key = sheet.get(row, columns::REF_KEY).map(str::to_string);
        for language in self.config.languages() {
            if let Some(text) = sheet.get(row, language) {
                entry.texts.insert(language.to_string(), text.to_string());
            }
        }

        // Keyless rows keep their argument lists so referencing rows can
        // inherit them; such targets are never emitted themselves.
        let android_key = sheet.get(row, columns::ANDROID_KEY);
        let android_args = parse_args(sheet.get(row, columns::ANDROID_ARG));
        if android_key.is_some() || !android_args.is_empty() {
            entry.targets.push(Target {
                format: Format::Android,
                key: android_key.unwrap_or_default().to_string(),
                file: sheet.get(row, columns::ANDROID_FILE).map(str::to_string),
                folder: sheet.get(row, columns::ANDROID_FOLDER).map(str::to_string),
                args: android_args,
            });
        }

        let apple_key = sheet.get(row, columns::IOS_KEY);
        let apple_args = parse_args(sheet.get(row, columns::IOS_ARG));
        if apple_key.is_some() || !apple_args.is_empty() {
            entry.targets.push(Target {
                format: Format::Apple,
                key: apple_key.unwrap_or_default().to_string(),
                file: sheet.get(row, columns::IOS_FILE).map(str::to_string),
                folder: None,
                args: apple_args,
            });
        }

        if let Some(key) = sheet.get(row, columns::JSON_KEY) {
            entry.targets.push(Target {
                format: Format::JsonTree,
                key: key.to_string(),
                file: sheet.get(row, columns::JSON_FILE).map(str::to_string),
                folder: None,
                args: Vec::new(),
            });
        }

        if let Some(key) = sheet.get(row, columns::LANG_JSON_KEY) {
            entry.targets.push(Target {
                format: Format::LanguageJson,
                key: key.to_string(),
                file: None,
                folder: None,
                args: Vec::new(),
            });
        }

        if let Some(key) = sheet.get(row, columns::PYTHON_KEY) {
            entry.targets.push(Target {
                format: Format::PythonDict,
                key: key.to_string(),
                file: sheet.get(row, columns::PYTHON_FILE).map(str::to_string),
                folder: None,
                args: Vec::new(),
            });
        }

        if let Some(key) = sheet.get(row, columns::XLIFF_KEY) {
            entry.targets.push(Target {
                format: Format::Xliff,
                key: key.to_string(),
                file: None,
                folder: None,
                args: Vec::new(),
            });
        }

        entry
    }

    fn emit_entry(
        &self,
        index: usize,
        entries: &[Entry],
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let entry = &entries[index];
        if !entry.targets.iter().any(|target| !target.key.is_empty()) {
            return Ok(());
        }

        let main_lang = self.config.main_lang.as_str();
        let main = resolver.resolve(index, main_lang)?;
        if main.tokens.is_blank() {
            report.warn(format!(
                "sheet `{}` row {}: no `{main_lang}` text; only other languages will be emitted",
                entry.sheet,
                entry.row + 1
            ));
        } else if !is_logographic_language(main_lang)
            && contains_logographic(&main.tokens.literal_text())
        {
            report.warn(format!(
                "sheet `{}` row {}: `{main_lang}` text contains non-primary-language content",
                entry.sheet,
                entry.row + 1
            ));
        }
        let indices = binder::placeholder_indices(&main.tokens);

        for target in &entry.targets {
            if target.key.is_empty() {
                continue;
            }
            match target.format {
                Format::Android => self.emit_android(
                    index, entries, target, &main, &indices, resolver, registry, out, report,
                )?,
                Format::Apple => self.emit_apple(
                    index, entries, target, &main, &indices, resolver, registry, out, report,
                )?,
                Format::JsonTree => {
                    self.emit_json_tree(index, target, resolver, registry, out, report)?
                }
                Format::LanguageJson => {
                    self.emit_language_json(index, target, resolver, registry, out, report)?
                }
                Format::PythonDict => {
                    self.emit_python(index, entries, target, resolver, registry, out, report)?
                }
                Format::Xliff => {
                    self.emit_xliff(index, entries, target, &main, resolver, registry, out, report)?
                }
            }
        }
        Ok(())
    }

    /// Resolves one (entry, language) for emission, applying the cursive
    /// pseudo-localization rewrite to main-language literals when configured.
    /// XLIFF content is resolved directly instead; interchange documents
    /// carry the authentic text.
    fn resolve_for_output(
        &self,
        resolver: &mut Resolver<'_>,
        index: usize,
        language: &str,
    ) -> Result<Resolution, Error> {
        let mut resolution = resolver.resolve(index, language)?;
        if self.config.cursive_main_lang && language == self.config.main_lang {
            resolution.tokens = pseudo::cursive_tokens(&resolution.tokens);
        }
        Ok(resolution)
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_android(
        &self,
        index: usize,
        entries: &[Entry],
        target: &Target,
        main: &Resolution,
        indices: &HashMap<String, usize>,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let entry = &entries[index];
        let key = target.key.as_str();
        let folder = normalize_folder(target.folder.as_deref());
        if !registry.register(Format::Android, &folder, key) {
            report.warn(format!(
                "duplicated Android key `{key}` at sheet `{}`",
                entry.sheet
            ));
            return Ok(());
        }

        let args = effective_args(entries, index, &main.refs, Format::Android);
        let binding = binder::bind(indices, &args, &entry.sheet, Format::Android, key)?;
        let file = target
            .file
            .as_deref()
            .unwrap_or(ANDROID_DEFAULT_FILE)
            .to_string();

        for language in self.config.languages() {
            let resolution = self.resolve_for_output(resolver, index, language)?;
            if resolution.tokens.is_blank() {
                continue;
            }
            let (text, unknown) = binder::render_positional(&resolution.tokens, &binding);
            for name in unknown {
                report.warn(format!(
                    "unexpected placeholder `{name}` for Android key `{key}` in language `{language}` at sheet `{}`",
                    entry.sheet
                ));
            }
            if text.is_empty() {
                continue;
            }
            out.android
                .entry((folder.clone(), language.to_string(), file.clone()))
                .or_default()
                .push(key, &text);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_apple(
        &self,
        index: usize,
        entries: &[Entry],
        target: &Target,
        main: &Resolution,
        indices: &HashMap<String, usize>,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let entry = &entries[index];
        let key = target.key.as_str();
        if !registry.register(Format::Apple, "", key) {
            report.warn(format!(
                "duplicated iOS key `{key}` at sheet `{}`",
                entry.sheet
            ));
            return Ok(());
        }

        let args = effective_args(entries, index, &main.refs, Format::Apple);
        let binding = binder::bind(indices, &args, &entry.sheet, Format::Apple, key)?;
        let file = target
            .file
            .as_deref()
            .unwrap_or(APPLE_DEFAULT_FILE)
            .to_string();

        for language in self.config.languages() {
            let resolution = self.resolve_for_output(resolver, index, language)?;
            if resolution.tokens.is_blank() {
                continue;
            }
            let (text, unknown) = binder::render_positional(&resolution.tokens, &binding);
            for name in unknown {
                report.warn(format!(
                    "unexpected placeholder `{name}` for iOS key `{key}` in language `{language}` at sheet `{}`",
                    entry.sheet
                ));
            }
            if text.is_empty() {
                continue;
            }
            out.apple
                .entry((apple_locale(language), file.clone()))
                .or_default()
                .push(key, &text);
            if language == self.config.main_lang && self.config.base_locale {
                out.apple
                    .entry(("Base".to_string(), file.clone()))
                    .or_default()
                    .push(key, &text);
            }
        }
        Ok(())
    }

    fn emit_json_tree(
        &self,
        index: usize,
        target: &Target,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let key = target.key.as_str();
        let parts: Vec<&str> = key.split('.').collect();
        let file = target
            .file
            .as_deref()
            .unwrap_or(JSON_DEFAULT_FILE)
            .to_string();
        if let Some(conflict) = registry.register_path(Format::JsonTree, &file, &parts) {
            report.warn(format!(
                "key conflict ({conflict}) for JSON key `{key}` in `{file}.json`"
            ));
            return Ok(());
        }

        for language in self.config.languages() {
            let resolution = self.resolve_for_output(resolver, index, language)?;
            if resolution.tokens.is_blank() {
                continue;
            }
            let text = formats::interpolate(&resolution.tokens);
            if text.is_empty() {
                continue;
            }
            let mut path = Vec::with_capacity(parts.len() + 1);
            path.push(language);
            path.extend(parts.iter().copied());
            out.json
                .entry(file.clone())
                .or_default()
                .insert(&path, &text);
        }
        Ok(())
    }

    fn emit_language_json(
        &self,
        index: usize,
        target: &Target,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let key = target.key.as_str();
        let parts: Vec<&str> = key.split('.').collect();
        if let Some(conflict) = registry.register_path(Format::LanguageJson, "", &parts) {
            report.warn(format!(
                "key conflict ({conflict}) for per-language JSON key `{key}`"
            ));
            return Ok(());
        }

        for language in self.config.languages() {
            let resolution = self.resolve_for_output(resolver, index, language)?;
            if resolution.tokens.is_blank() {
                continue;
            }
            let text = formats::interpolate(&resolution.tokens);
            if text.is_empty() {
                continue;
            }
            out.lang_json.insert(language, &parts, &text);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_python(
        &self,
        index: usize,
        entries: &[Entry],
        target: &Target,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let entry = &entries[index];
        let key = target.key.as_str();
        let file = target
            .file
            .as_deref()
            .unwrap_or(PYTHON_DEFAULT_FILE)
            .to_string();
        if !registry.register(Format::PythonDict, &file, key) {
            report.warn(format!(
                "duplicated Python key `{key}` at sheet `{}`",
                entry.sheet
            ));
            return Ok(());
        }

        for language in self.config.languages() {
            let resolution = self.resolve_for_output(resolver, index, language)?;
            if resolution.tokens.is_blank() {
                continue;
            }
            let text = formats::interpolate(&resolution.tokens);
            if text.is_empty() {
                continue;
            }
            out.python
                .entry(file.clone())
                .or_default()
                .push(language, key, &text);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_xliff(
        &self,
        index: usize,
        entries: &[Entry],
        target: &Target,
        main: &Resolution,
        resolver: &mut Resolver<'_>,
        registry: &mut KeyRegistry,
        out: &mut Outputs,
        report: &mut Report,
    ) -> Result<(), Error> {
        let entry = &entries[index];
        let key = target.key.as_str();
        if !registry.register(Format::Xliff, "", key) {
            report.warn(format!(
                "duplicated XLIFF key `{key}` at sheet `{}`",
                entry.sheet
            ));
            return Ok(());
        }
        // A unit without source text has nothing to exchange.
        if main.tokens.is_blank() {
            return Ok(());
        }

        let main_lang = self.config.main_lang.as_str();
        let source = xliff::inline_content(&main.tokens);
        for language in self.config.languages().skip(1) {
            let resolution = resolver.resolve(index, language)?;
            // No translation for this language, no unit; a manufactured
            // empty <target> would look like an intentionally blank string.
            if resolution.tokens.is_blank() {
                continue;
            }
            let target_content = xliff::inline_content(&resolution.tokens);
            out.xliff
                .entry(language.to_string())
                .or_insert_with(|| xliff::Document::new(main_lang, language))
                .push(key, source.clone(), target_content);
        }
        Ok(())
    }
}

/// Rendered output documents, grouped the way they will land on disk.
#[derive(Default)]
struct Outputs {
    /// (folder, language, file) -> document.
    android: BTreeMap<(String, String, String), android::Document>,
    /// (locale, file) -> document.
    apple: BTreeMap<(String, String), apple::Document>,
    /// file -> tree; the `*` group is merged into the others at finalize.
    json: BTreeMap<String, JsonTree>,
    lang_json: LanguageDocs,
    /// file -> document.
    python: BTreeMap<String, python_dict::Document>,
    /// language -> document.
    xliff: BTreeMap<String, xliff::Document>,
}

impl Outputs {
    fn finalize(
        mut self,
        config: &Config,
        report: &mut Report,
    ) -> Result<BTreeMap<PathBuf, String>, Error> {
        let mut files = BTreeMap::new();

        for ((folder, language, file), doc) in &self.android {
            if doc.is_empty() {
                continue;
            }
            let suffix = if *language == config.main_lang {
                String::new()
            } else {
                format!("-{}", android_locale(language))
            };
            files.insert(
                PathBuf::from(format!("android-strings/{folder}values{suffix}/{file}.xml")),
                doc.render(),
            );
        }

        for ((locale, file), doc) in &self.apple {
            if doc.is_empty() {
                continue;
            }
            files.insert(
                PathBuf::from(format!("ios-strings/{locale}.lproj/{file}.strings")),
                doc.render(),
            );
        }

        if let Some(wildcard) = self.json.remove(JSON_WILDCARD) {
            if self.json.is_empty() {
                self.json.insert(JSON_DEFAULT_FILE.to_string(), wildcard);
            } else {
                for (file, tree) in self.json.iter_mut() {
                    for path in tree.merge_from(&wildcard) {
                        report.warn(format!(
                            "JSON key `{path}` already defined in `{file}.json`; shared value dropped"
                        ));
                    }
                }
            }
        }
        for (file, tree) in &self.json {
            if tree.is_empty() {
                continue;
            }
            files.insert(PathBuf::from(format!("json/{file}.json")), tree.render()?);
        }

        for (language, text) in self.lang_json.render_all()? {
            files.insert(PathBuf::from(format!("jsons/{language}.json")), text);
        }

        for (file, doc) in &self.python {
            if doc.is_empty() {
                continue;
            }
            files.insert(PathBuf::from(format!("{file}.py")), doc.render());
        }

        for (language, doc) in &self.xliff {
            if doc.is_empty() {
                continue;
            }
            files.insert(
                PathBuf::from(format!("xliff/messages.{language}.xlf")),
                doc.render()?,
            );
        }

        Ok(files)
    }
}

fn parse_args(cell: Option<&str>) -> Vec<String> {
    cell.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Own declared arguments first, then the arguments of every referenced entry
/// in main-language splice order. The `raw` sentinel stops propagation.
fn effective_args(entries: &[Entry], index: usize, refs: &[usize], format: Format) -> Vec<String> {
    let mut args = entries[index]
        .target(format)
        .map(|target| target.args.clone())
        .unwrap_or_default();
    if is_no_escape(&args) {
        return args;
    }
    for &referenced in refs {
        if let Some(target) = entries[referenced].target(format) {
            if !is_no_escape(&target.args) {
                args.extend(target.args.iter().cloned());
            }
        }
    }
    args
}

fn is_no_escape(args: &[String]) -> bool {
    matches!(args, [only] if only == NO_ESCAPE)
}

/// Android folder cells are directory prefixes; normalized to either an empty
/// string or a `dir/` form.
fn normalize_folder(folder: Option<&str>) -> String {
    match folder.map(|f| f.trim_matches('/')) {
        Some(trimmed) if !trimmed.is_empty() => format!("{trimmed}/"),
        _ => String::new(),
    }
}

fn is_logographic_language(code: &str) -> bool {
    matches!(code, "tw" | "cn" | "jp" | "kr" | "ja" | "ko" | "zh")
}

/// CJK ideographs, kana, hangul and fullwidth forms. Used to flag text that
/// likely landed in the wrong language column.
fn contains_logographic(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{3000}'..='\u{303F}'
                | '\u{3040}'..='\u{30FF}'
                | '\u{3400}'..='\u{4DBF}'
                | '\u{4E00}'..='\u{9FFF}'
                | '\u{AC00}'..='\u{D7AF}'
                | '\u{FF00}'..='\u{FFEF}')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(Some("s, d")), vec!["s", "d"]);
        assert_eq!(parse_args(Some("s")), vec!["s"]);
        assert!(parse_args(Some(" , ")).is_empty());
        assert!(parse_args(None).is_empty());
    }

    #[test]
    fn test_normalize_folder() {
        assert_eq!(normalize_folder(None), "");
        assert_eq!(normalize_folder(Some("app")), "app/");
        assert_eq!(normalize_folder(Some("/app/")), "app/");
        assert_eq!(normalize_folder(Some("/")), "");
    }

    #[test]
    fn test_contains_logographic() {
        assert!(contains_logographic("哈囉"));
        assert!(contains_logographic("こんにちは"));
        assert!(contains_logographic("안녕하세요"));
        assert!(!contains_logographic("Hello, world"));
    }

    #[test]
    fn test_effective_args_propagates_in_splice_order() {
        let mut base = Entry::new("Main", 0);
        base.targets.push(Target {
            format: Format::Android,
            key: String::new(),
            file: None,
            folder: None,
            args: vec!["d".to_string()],
        });
        let mut referencing = Entry::new("Main", 1);
        referencing.targets.push(Target {
            format: Format::Android,
            key: "k".to_string(),
            file: None,
            folder: None,
            args: vec!["s".to_string()],
        });
        let entries = vec![base, referencing];
        assert_eq!(
            effective_args(&entries, 1, &[0], Format::Android),
            vec!["s".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn test_effective_args_raw_sentinel_stops_propagation() {
        let mut entry = Entry::new("Main", 0);
        entry.targets.push(Target {
            format: Format::Apple,
            key: "k".to_string(),
            file: None,
            folder: None,
            args: vec![NO_ESCAPE.to_string()],
        });
        let entries = vec![entry];
        assert_eq!(
            effective_args(&entries, 0, &[], Format::Apple),
            vec![NO_ESCAPE.to_string()]
        );
    }
}
