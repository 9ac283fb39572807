use hanzi_pinyin::config;
use hanzi_pinyin::{Args, Converter, Dictionary, JiebaSegmenter, Style};

use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use env_logger::Env;
use itertools::Itertools;
use log::info;

#[derive(Parser)]
#[command(name = "hanzi-pinyin")]
#[command(version)]
#[command(about = "Convert Chinese text to pinyin", long_about = None)]
struct Cli {
    /// Text to convert, each stdin line is converted if omitted
    text: Vec<String>,

    /// Output style: normal, tone, tone2, tone3, initials, first_letter, finals, finals_tone, finals_tone2 or finals_tone3
    #[arg(short, long, default_value = "normal")]
    style: Style,

    /// List every known reading of a character
    #[arg(short = 'e', long)]
    heteronym: bool,

    /// Separator for the slug mode
    #[arg(long, default_value = config::DEFAULT_SEPARATOR)]
    separator: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Default)]
    mode: Mode,

    /// Directory containing pinyin_dict and phrase_dict
    #[arg(short, long, env = config::DICT_DIR_ENV, default_value = config::DEFAULT_DICT_DIR)]
    dict_dir: PathBuf,

    /// Pass characters without a reading through unchanged
    #[arg(long)]
    keep_unknown: bool,

    /// Keep punctuation and whitespace tokens (only useful with --keep-unknown)
    #[arg(long)]
    keep_symbols: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Candidate readings for every character
    All,
    /// Default reading of every character
    Default,
    /// Default readings without heteronym bookkeeping
    Fast,
    /// Default readings joined with the separator
    Slug,
}

fn build_args(cli: &Cli) -> Args {
    let args = Args::new()
        .with_style(cli.style)
        .with_heteronym(cli.heteronym)
        .with_separator(cli.separator.as_str());
    if cli.keep_unknown {
        args.with_fallback(|ch: char| vec![ch.to_string()])
    } else {
        args
    }
}

fn convert_line(
    converter: &Converter,
    args: &Args,
    cli: &Cli,
    line: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cli.mode {
        Mode::All => {
            let result = converter.resolve_all(line, args);
            if cli.json {
                serde_json::to_writer(&mut *out, &result)?;
            } else {
                let text = result.iter().map(|candidates| candidates.join("/")).join(" ");
                write!(out, "{text}")?;
            }
        }
        Mode::Default | Mode::Fast => {
            let result = if cli.mode == Mode::Fast {
                converter.resolve_fast(line, args)
            } else {
                converter.resolve_default(line, args)
            };
            if cli.json {
                serde_json::to_writer(&mut *out, &result)?;
            } else {
                write!(out, "{}", result.join(" "))?;
            }
        }
        Mode::Slug => {
            let slug = converter.slug(line, args);
            if cli.json {
                serde_json::to_writer(&mut *out, &slug)?;
            } else {
                write!(out, "{slug}")?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let dict = Dictionary::from_dir(&cli.dict_dir).with_context(|| {
        format!(
            "Could not load the dictionary from {}",
            cli.dict_dir.display()
        )
    })?;
    let segmenter = if cli.keep_symbols {
        JiebaSegmenter::with_symbols()
    } else {
        JiebaSegmenter::new()
    };
    let converter = Converter::new(dict, segmenter);
    info!(
        "{} characters and {} phrases",
        converter.dictionary().num_chars(),
        converter.dictionary().num_phrases()
    );
    let args = build_args(&cli);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.text.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Could not read from stdin")?;
            convert_line(&converter, &args, &cli, &line, &mut out)?;
        }
    } else {
        convert_line(&converter, &args, &cli, &cli.text.join(" "), &mut out)?;
    }
    out.flush()?;
    Ok(())
}
