//! Per-character and per-phrase reading tables.
//!
//! A [`Dictionary`] is built once, either from the two text tables or entry by entry,
//! and is read-only afterwards. Converters share it through an `Arc`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::config;
use crate::dict_parser::{self, DictLine};
use crate::pinyin::normalize_reading;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{table} table, line {line}: {message}")]
    Parse {
        table: &'static str,
        line: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, DictError>;

#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    /// code point -> readings, the first one is the default
    chars: HashMap<u32, Vec<String>>,
    /// word -> one reading per character
    phrases: HashMap<String, Vec<String>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `pinyin_dict` and `phrase_dict` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::from_files(
            &dir.join(config::CHAR_TABLE_FILE),
            &dir.join(config::PHRASE_TABLE_FILE),
        )
    }

    pub fn from_files(char_table: &Path, phrase_table: &Path) -> Result<Self> {
        let mut dict = Self::new();
        let num_chars = dict.load_char_table(open(char_table)?)?;
        info!(
            "loaded {num_chars} character entries from {}",
            char_table.display()
        );
        let num_phrases = dict.load_phrase_table(open(phrase_table)?)?;
        info!(
            "loaded {num_phrases} phrase entries from {}",
            phrase_table.display()
        );
        Ok(dict)
    }

    /// Reads per-character lines, returns the number of entries added.
    pub fn load_char_table(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut num_entries = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            match dict_parser::parse_char_line(&line) {
                Ok(DictLine::Char(entry)) => {
                    self.chars
                        .insert(entry.code_point, normalize_all(&entry.readings));
                    num_entries += 1;
                }
                Ok(_) => {}
                Err(message) => {
                    return Err(DictError::Parse {
                        table: "character",
                        line: idx + 1,
                        message,
                    });
                }
            }
        }
        Ok(num_entries)
    }

    /// Reads per-phrase lines, returns the number of entries added.
    /// Entries whose reading count does not match the character count are skipped.
    pub fn load_phrase_table(&mut self, reader: impl BufRead) -> Result<usize> {
        let mut num_entries = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            match dict_parser::parse_phrase_line(&line) {
                Ok(DictLine::Phrase(entry)) => {
                    let num_chars = entry.phrase.chars().count();
                    if entry.readings.len() != num_chars {
                        warn!(
                            "phrase table, line {}: {} has {} characters but {} readings, skipped",
                            idx + 1,
                            entry.phrase,
                            num_chars,
                            entry.readings.len()
                        );
                        continue;
                    }
                    let readings = normalize_all(&entry.readings);
                    self.phrases.insert(entry.phrase, readings);
                    num_entries += 1;
                }
                Ok(_) => {}
                Err(message) => {
                    return Err(DictError::Parse {
                        table: "phrase",
                        line: idx + 1,
                        message,
                    });
                }
            }
        }
        Ok(num_entries)
    }

    /// Adds or replaces the readings of `ch`, numeric tones are converted like on load.
    /// An empty list is ignored.
    pub fn insert_char(&mut self, ch: char, readings: Vec<String>) {
        if readings.is_empty() {
            debug!("ignoring empty reading list for {ch}");
            return;
        }
        self.chars.insert(u32::from(ch), normalize_all(readings));
    }

    /// Adds or replaces a phrase entry. The reading count is checked on lookup.
    pub fn insert_phrase(&mut self, phrase: impl Into<String>, readings: Vec<String>) {
        self.phrases.insert(phrase.into(), normalize_all(readings));
    }

    pub fn char_readings(&self, ch: char) -> Option<&[String]> {
        self.chars.get(&u32::from(ch)).map(Vec::as_slice)
    }

    /// Readings of a known phrase, one per character.
    /// An entry with the wrong number of readings counts as unknown.
    pub fn phrase_readings(&self, word: &str) -> Option<&[String]> {
        self.phrases
            .get(word)
            .filter(|readings| readings.len() == word.chars().count())
            .map(Vec::as_slice)
    }

    pub fn num_chars(&self) -> usize {
        self.chars.len()
    }

    pub fn num_phrases(&self) -> usize {
        self.phrases.len()
    }
}

fn normalize_all<S: AsRef<str>>(readings: impl IntoIterator<Item = S>) -> Vec<String> {
    readings
        .into_iter()
        .map(|r| normalize_reading(r.as_ref()))
        .collect_vec()
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| DictError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}
