use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use locsheet::{Config, Converter, CsvSheet, Diagnostic, Severity};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert CSV sheets into localization resources.
    Convert {
        /// The CSV sheet files to process; each file stem is its sheet name
        inputs: Vec<PathBuf>,

        /// The directory to write the generated files into
        #[arg(short, long, default_value = "output")]
        out: PathBuf,

        /// The main language column; its placeholder order defines argument
        /// binding everywhere
        #[arg(short, long)]
        main_lang: Option<String>,

        /// A secondary language column to export (repeatable)
        #[arg(short, long = "lang")]
        langs: Vec<String>,

        /// Only process the named sheet (repeatable); default is all sheets
        #[arg(long = "sheet")]
        sheets: Vec<String>,

        /// TOML configuration file; command-line flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not duplicate the main language into Base.lproj
        #[arg(long)]
        no_base: bool,

        /// Rewrite main-language letters to mathematical script characters
        /// (pseudo-localization)
        #[arg(long)]
        cursive: bool,

        /// Force the input character encoding by WHATWG label (e.g.
        /// "utf-16le"); a byte order mark still takes precedence
        #[arg(short, long)]
        encoding: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.commands {
        Commands::Convert {
            inputs,
            out,
            main_lang,
            langs,
            sheets,
            config,
            no_base,
            cursive,
            encoding,
        } => {
            if let Err(e) = run_convert(
                inputs, out, main_lang, langs, sheets, config, no_base, cursive, encoding,
            ) {
                let fatal = Diagnostic {
                    severity: Severity::Error,
                    message: e.to_string(),
                };
                eprintln!("{fatal}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_convert(
    inputs: Vec<PathBuf>,
    out: PathBuf,
    main_lang: Option<String>,
    langs: Vec<String>,
    sheets: Vec<String>,
    config_path: Option<PathBuf>,
    no_base: bool,
    cursive: bool,
    encoding: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if inputs.is_empty() {
        return Err("no input sheets given".into());
    }

    let mut config = match config_path {
        Some(path) => toml::from_str::<Config>(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(main_lang) = main_lang {
        config.main_lang = main_lang;
    }
    if !langs.is_empty() {
        config.langs = langs;
    }
    if !sheets.is_empty() {
        config.sheets = sheets;
    }
    if no_base {
        config.base_locale = false;
    }
    if cursive {
        config.cursive_main_lang = true;
    }

    let mut loaded = Vec::with_capacity(inputs.len());
    for input in &inputs {
        loaded.push(CsvSheet::read_from_with_encoding(input, encoding.as_deref())?);
    }

    let conversion = Converter::new(config).convert(&loaded)?;
    conversion.report().write_to(std::io::stderr())?;
    conversion.write_to(&out)?;

    for sheet in conversion.report().sheets_processed() {
        println!("Processed {sheet}");
    }
    Ok(())
}
