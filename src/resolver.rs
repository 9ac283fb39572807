//! Candidate readings for the characters of one segmented word.

use log::trace;

use crate::args::Fallback;
use crate::dict::Dictionary;
use crate::style::Style;

/// Candidates for one character position, the default candidate first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'d> {
    /// Raw tonal syllables from the dictionary
    Dict(Vec<&'d str>),
    /// Fallback output, used verbatim
    Fallback(Vec<String>),
}

impl Resolved<'_> {
    pub fn render(&self, style: Style) -> Vec<String> {
        match self {
            Resolved::Dict(readings) => readings.iter().map(|r| style.render(r)).collect(),
            Resolved::Fallback(output) => output.clone(),
        }
    }
}

/// Resolves every character of `word`.
///
/// A known phrase picks the default reading of each of its characters. In heteronym mode
/// the full reading list of the character is still returned, with the phrase reading
/// moved to the front. Characters unknown to the dictionary go to `fallback`, or are
/// left out if there is none.
pub fn resolve_word<'d>(
    dict: &'d Dictionary,
    word: &str,
    heteronym: bool,
    fallback: Option<&dyn Fallback>,
) -> Vec<Resolved<'d>> {
    let phrase = lookup_phrase(dict, word);
    word.chars()
        .enumerate()
        .filter_map(|(idx, ch)| {
            let chosen = phrase.map(|readings| readings[idx].as_str());
            resolve_char(dict, ch, chosen, heteronym, fallback)
        })
        .collect()
}

/// Phrase readings of a word with at least two characters
pub(crate) fn lookup_phrase<'d>(dict: &'d Dictionary, word: &str) -> Option<&'d [String]> {
    if word.chars().nth(1).is_none() {
        return None;
    }
    let readings = dict.phrase_readings(word);
    if readings.is_some() {
        trace!("phrase {word} found");
    }
    readings
}

fn resolve_char<'d>(
    dict: &'d Dictionary,
    ch: char,
    chosen: Option<&'d str>,
    heteronym: bool,
    fallback: Option<&dyn Fallback>,
) -> Option<Resolved<'d>> {
    let known = dict.char_readings(ch);
    let readings = match (chosen, known) {
        (Some(reading), Some(all)) if heteronym => std::iter::once(reading)
            .chain(all.iter().map(String::as_str).filter(|r| *r != reading))
            .collect(),
        (Some(reading), _) => vec![reading],
        (None, Some(all)) if heteronym => all.iter().map(String::as_str).collect(),
        (None, Some(all)) => all.iter().take(1).map(String::as_str).collect(),
        (None, None) => return resolve_fallback(ch, heteronym, fallback?),
    };
    Some(Resolved::Dict(readings))
}

fn resolve_fallback<'d>(
    ch: char,
    heteronym: bool,
    fallback: &dyn Fallback,
) -> Option<Resolved<'d>> {
    let mut output = fallback.fallback(ch);
    if output.is_empty() {
        return None;
    }
    if !heteronym {
        output.truncate(1);
    }
    Some(Resolved::Fallback(output))
}
