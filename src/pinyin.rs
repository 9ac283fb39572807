//! Operations on a single raw pinyin syllable: reading and placing tone marks,
//! stripping them, and splitting a syllable into initial and final.
//!
//! Syllables are expected in lower case as found in the dictionaries. Marks may be
//! precomposed (`ǜ`, `ń`) or a base letter followed by a combining mark (`m̀`).

/// Valid initial clusters, the two-letter ones first so that `zh` wins over `z`.
pub const INITIALS: [&str; 21] = [
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s",
];

/// Tone marks for tones 1 to 4. Entries with two code points have no precomposed form.
const TONE_MARKS: [(char, [&str; 4]); 18] = [
    ('a', ["ā", "á", "ǎ", "à"]),
    ('A', ["Ā", "Á", "Ǎ", "À"]),
    ('e', ["ē", "é", "ě", "è"]),
    ('E', ["Ē", "É", "Ě", "È"]),
    ('ê', ["ê̄", "ế", "ê̌", "ề"]),
    ('Ê', ["Ê̄", "Ế", "Ê̌", "Ề"]),
    ('i', ["ī", "í", "ǐ", "ì"]),
    ('I', ["Ī", "Í", "Ǐ", "Ì"]),
    ('o', ["ō", "ó", "ǒ", "ò"]),
    ('O', ["Ō", "Ó", "Ǒ", "Ò"]),
    ('u', ["ū", "ú", "ǔ", "ù"]),
    ('U', ["Ū", "Ú", "Ǔ", "Ù"]),
    ('ü', ["ǖ", "ǘ", "ǚ", "ǜ"]),
    ('Ü', ["Ǖ", "Ǘ", "Ǚ", "Ǜ"]),
    ('m', ["m̄", "ḿ", "m̌", "m̀"]),
    ('M', ["M̄", "Ḿ", "M̌", "M̀"]),
    ('n', ["n̄", "ń", "ň", "ǹ"]),
    ('N', ["N̄", "Ń", "Ň", "Ǹ"]),
];

const COMBINING_MARKS: [char; 4] = ['\u{0304}', '\u{0301}', '\u{030C}', '\u{0300}'];

fn tone_mark(base: char, tone: u8) -> Option<&'static str> {
    if !(1..=4).contains(&tone) {
        return None;
    }
    TONE_MARKS
        .iter()
        .find(|(b, _)| *b == base)
        .map(|(_, marks)| marks[usize::from(tone - 1)])
}

fn combining_tone(ch: char) -> Option<u8> {
    (1u8..).zip(COMBINING_MARKS).find_map(|(tone, mark)| (mark == ch).then_some(tone))
}

/// Base letter and tone of a precomposed marked letter
fn unmark_char(ch: char) -> Option<(char, u8)> {
    let mut buf = [0; 4];
    let needle: &str = ch.encode_utf8(&mut buf);
    TONE_MARKS.iter().find_map(|(base, marks)| {
        (1u8..)
            .zip(marks)
            .find_map(|(tone, mark)| (*mark == needle).then_some((*base, tone)))
    })
}

fn is_vowel(ch: char) -> bool {
    matches!(
        ch.to_ascii_lowercase(),
        'a' | 'e' | 'i' | 'o' | 'u' | 'v' | 'ü' | 'Ü' | 'ê' | 'Ê'
    )
}

/// Letters of a syllable as (base letter, tone), tone 0 for unmarked letters.
fn letters(syllable: &str) -> Vec<(char, u8)> {
    let mut out = Vec::with_capacity(syllable.len());
    let mut chars = syllable.chars().peekable();
    while let Some(ch) = chars.next() {
        if let Some(tone) = chars.peek().copied().and_then(combining_tone) {
            chars.next();
            out.push((ch, tone));
        } else {
            out.push(unmark_char(ch).unwrap_or((ch, 0)));
        }
    }
    out
}

/// Byte offset of the letter that carries the tone in an unmarked syllable:
/// "a", "e", "ê", the "o" of "ou", otherwise the last vowel, otherwise a syllabic n or m.
fn tone_target(plain: &str) -> Option<usize> {
    // lower casing keeps the byte length of every pinyin letter
    let lower = plain.to_lowercase();
    for cand in ["a", "e", "ê", "ou"] {
        if let Some(idx) = lower.find(cand) {
            return Some(idx);
        }
    }
    if let Some((idx, _)) = lower.char_indices().rev().find(|(_, c)| is_vowel(*c)) {
        return Some(idx);
    }
    lower.find('n').or_else(|| lower.find('m'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Decomposed {
    plain: String,
    tone: u8,
    /// Byte offset in `plain` just past the letter that carried the mark
    mark_end: Option<usize>,
}

fn decompose(syllable: &str) -> Decomposed {
    let mut plain = String::with_capacity(syllable.len());
    let mut marks: Vec<(usize, usize, u8)> = vec![];
    for (base, tone) in letters(syllable) {
        let start = plain.len();
        plain.push(base);
        if tone > 0 {
            marks.push((start, plain.len(), tone));
        }
    }
    let chosen = match marks.as_slice() {
        [] => None,
        [only] => Some(*only),
        [first, ..] => {
            let target = tone_target(&plain);
            marks
                .iter()
                .find(|(start, _, _)| Some(*start) == target)
                .or(Some(first))
                .copied()
        }
    };
    match chosen {
        Some((_, end, tone)) => Decomposed {
            plain,
            tone,
            mark_end: Some(end),
        },
        None => Decomposed {
            plain,
            tone: 0,
            mark_end: None,
        },
    }
}

/// Removes all tone marks. `ü` stays `ü`.
pub fn strip_tone(syllable: &str) -> String {
    decompose(syllable).plain
}

/// Unmarked syllable and its tone, 1 to 4, or 0 for the neutral tone.
pub fn tone_of(syllable: &str) -> (String, u8) {
    let d = decompose(syllable);
    (d.plain, d.tone)
}

/// Unmarked syllable with the tone digit right after the letter that carried the mark
pub fn tone_after_mark(syllable: &str) -> String {
    let Decomposed {
        mut plain,
        tone,
        mark_end,
    } = decompose(syllable);
    if let Some(end) = mark_end {
        plain.insert_str(end, &tone.to_string());
    }
    plain
}

/// Unmarked syllable with the tone digit appended
pub fn tone_at_end(syllable: &str) -> String {
    let (mut plain, tone) = tone_of(syllable);
    if tone > 0 {
        plain.push_str(&tone.to_string());
    }
    plain
}

/// Rewrites combining mark sequences to precomposed letters where Unicode has them.
pub fn normalize_marks(syllable: &str) -> String {
    let mut out = String::with_capacity(syllable.len());
    for (base, tone) in letters(syllable) {
        match tone_mark(base, tone) {
            Some(mark) => out.push_str(mark),
            None if tone > 0 => {
                out.push(base);
                out.push(COMBINING_MARKS[usize::from(tone - 1)]);
            }
            None => out.push(base),
        }
    }
    out
}

/// `ü` spelled as `v`, the ASCII convention of the numeric styles
pub fn to_v(pinyin: &str) -> String {
    pinyin.replace('ü', "v").replace('Ü', "V")
}

/// Byte offset in `syllable` just past its first `count` letters, a letter taking along
/// the combining mark that follows it.
fn letter_offset(syllable: &str, count: usize) -> usize {
    let mut chars = syllable.char_indices().peekable();
    for _ in 0..count {
        if chars.next().is_none() {
            break;
        }
        chars.next_if(|(_, c)| combining_tone(*c).is_some());
    }
    chars.peek().map_or(syllable.len(), |(idx, _)| *idx)
}

/// Replaces the leading `u` of a final, marked or not, by the matching `ü`.
fn umlaut_leading_u(rest: &str) -> String {
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut tail = chars.as_str();
    let tone = match tail.chars().next().and_then(|c| combining_tone(c).map(|t| (c, t))) {
        Some((mark, tone)) => {
            tail = &tail[mark.len_utf8()..];
            tone
        }
        None => unmark_char(first).map_or(0, |(_, tone)| tone),
    };
    format!("{}{}", tone_mark('ü', tone).unwrap_or("ü"), tail)
}

/// Splits a syllable into its initial and final, keeping tone marks on the final.
///
/// `y` and `w` are not initials: `yu…` becomes `ü…`, `yi…` becomes `i…`, any other `y…`
/// becomes `i…`, `wu…` becomes `u…` and any other `w…` becomes `u…`. After `j`, `q` and `x`
/// a written `u` is the sound `ü`. A syllable without a vowel (`ń`, `ḿ`, `hm`) is all final.
/// A mark on the initial itself (`ńa`) is dropped.
pub fn split_initial_final(syllable: &str) -> (&'static str, String) {
    let plain = strip_tone(syllable);
    if !plain.chars().any(is_vowel) {
        return ("", syllable.to_owned());
    }
    let second = plain.chars().nth(1);
    if let Some(rest) = syllable.strip_prefix('y') {
        let fin = match second {
            Some('u') => umlaut_leading_u(rest),
            Some('i') => rest.to_owned(),
            _ => format!("i{rest}"),
        };
        return ("", fin);
    }
    if let Some(rest) = syllable.strip_prefix('w') {
        let fin = match second {
            Some('u') => rest.to_owned(),
            _ => format!("u{rest}"),
        };
        return ("", fin);
    }
    match INITIALS.iter().find(|initial| plain.starts_with(*initial)) {
        Some(&initial) => {
            let rest = &syllable[letter_offset(syllable, initial.len())..];
            if matches!(initial, "j" | "q" | "x") && plain[initial.len()..].starts_with('u') {
                (initial, umlaut_leading_u(rest))
            } else {
                (initial, rest.to_owned())
            }
        }
        None => ("", syllable.to_owned()),
    }
}

/// Converts a numeric tone syllable such as `zhong1` or `lv4` to tone marks.
/// Tone 5 (or 0) and syllables without a digit are returned unmarked.
pub fn mark_from_num(pinyin_num: &str) -> String {
    let pinyin = pinyin_num.replace('v', "ü").replace('V', "Ü");

    // Split off the final char (expected to be the tone number)
    let mut chars = pinyin.chars();
    let Some(last) = chars.next_back() else {
        return String::new();
    };
    let Some(tone) = last.to_digit(10) else {
        return pinyin;
    };
    let base = chars.as_str();
    let tone = u8::try_from(tone).unwrap_or(0);

    let marked = tone_target(base).and_then(|idx| {
        let ch = base[idx..].chars().next()?;
        Some((idx, ch, tone_mark(ch, tone)?))
    });
    match marked {
        Some((idx, ch, mark)) => format!("{}{}{}", &base[..idx], mark, &base[idx + ch.len_utf8()..]),
        None => base.to_owned(),
    }
}

/// Dictionary readings may be written with numeric tones; those are converted to marks.
pub fn normalize_reading(reading: &str) -> String {
    if reading.ends_with(|c: char| c.is_ascii_digit()) {
        mark_from_num(reading)
    } else {
        normalize_marks(reading)
    }
}
