use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pinyin::{
    normalize_marks, split_initial_final, strip_tone, to_v, tone_after_mark, tone_at_end,
};

/// Output mode of a rendered syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// `zhong`
    #[default]
    Normal,
    /// `zhōng`
    Tone,
    /// `zho1ng`
    Tone2,
    /// `zhong1`
    Tone3,
    /// `zh`
    Initials,
    /// `z`
    FirstLetter,
    /// `ong`
    Finals,
    /// `ōng`
    FinalsTone,
    /// `o1ng`
    FinalsTone2,
    /// `ong1`
    FinalsTone3,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("unknown style: {0:?}")]
    Unknown(String),
    #[error("unknown style code: {0}")]
    Code(u8),
}

impl Style {
    pub const ALL: [Style; 10] = [
        Style::Normal,
        Style::Tone,
        Style::Tone2,
        Style::Tone3,
        Style::Initials,
        Style::FirstLetter,
        Style::Finals,
        Style::FinalsTone,
        Style::FinalsTone2,
        Style::FinalsTone3,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Style::Normal => "normal",
            Style::Tone => "tone",
            Style::Tone2 => "tone2",
            Style::Tone3 => "tone3",
            Style::Initials => "initials",
            Style::FirstLetter => "first_letter",
            Style::Finals => "finals",
            Style::FinalsTone => "finals_tone",
            Style::FinalsTone2 => "finals_tone2",
            Style::FinalsTone3 => "finals_tone3",
        }
    }

    /// Renders one raw dictionary syllable (e.g. `zhōng`) in this style.
    ///
    /// All ASCII styles spell `ü` as `v`. Neutral tone syllables never get a digit.
    pub fn render(self, syllable: &str) -> String {
        match self {
            Style::Normal => to_v(&strip_tone(syllable)),
            Style::Tone => normalize_marks(syllable),
            Style::Tone2 => to_v(&tone_after_mark(syllable)),
            Style::Tone3 => to_v(&tone_at_end(syllable)),
            Style::Initials => split_initial_final(syllable).0.to_owned(),
            Style::FirstLetter => Style::Normal
                .render(syllable)
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default(),
            Style::Finals => to_v(&strip_tone(&final_of(syllable))),
            Style::FinalsTone => normalize_marks(&final_of(syllable)),
            Style::FinalsTone2 => to_v(&tone_after_mark(&final_of(syllable))),
            Style::FinalsTone3 => to_v(&tone_at_end(&final_of(syllable))),
        }
    }
}

fn final_of(syllable: &str) -> String {
    split_initial_final(syllable).1
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = StyleError;

    /// Case insensitive, `_` and `-` are ignored: `FIRST_LETTER`, `first-letter` and
    /// `firstletter` all name [`Style::FirstLetter`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Style::ALL
            .into_iter()
            .find(|style| style.name().replace('_', "") == key)
            .ok_or_else(|| StyleError::Unknown(s.to_owned()))
    }
}

/// Numeric codes of the styles as used by older callers
impl TryFrom<u8> for Style {
    type Error = StyleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Style::Normal,
            1 => Style::Tone,
            2 => Style::Tone2,
            3 => Style::Initials,
            4 => Style::FirstLetter,
            5 => Style::Finals,
            6 => Style::FinalsTone,
            7 => Style::FinalsTone2,
            8 => Style::Tone3,
            9 => Style::FinalsTone3,
            _ => return Err(StyleError::Code(code)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_all(syllable: &str) -> Vec<String> {
        Style::ALL.iter().map(|s| s.render(syllable)).collect()
    }

    #[test]
    fn test_render_zhong() {
        assert_eq!(
            render_all("zhōng"),
            ["zhong", "zhōng", "zho1ng", "zhong1", "zh", "z", "ong", "ōng", "o1ng", "ong1"]
        );
    }

    #[test]
    fn test_render_nasal() {
        assert_eq!(
            render_all("ń"),
            ["n", "ń", "n2", "n2", "", "n", "n", "ń", "n2", "n2"]
        );
        assert_eq!(
            render_all("ḿ"),
            ["m", "ḿ", "m2", "m2", "", "m", "m", "ḿ", "m2", "m2"]
        );
    }

    #[test]
    fn test_render_y_w() {
        assert_eq!(Style::Initials.render("ya"), "");
        assert_eq!(Style::Tone2.render("ya"), "ya");
        assert_eq!(Style::Finals.render("ya"), "ia");
        assert_eq!(Style::Finals.render("yuán"), "van");
        assert_eq!(Style::Tone2.render("yuán"), "yua2n");
        assert_eq!(Style::Tone3.render("yuán"), "yuan2");
        assert_eq!(Style::Finals.render("wàn"), "uan");
        assert_eq!(Style::Initials.render("wú"), "");
        assert_eq!(Style::Finals.render("yī"), "i");
    }

    #[test]
    fn test_render_umlaut() {
        assert_eq!(Style::Finals.render("jù"), "v");
        assert_eq!(Style::FinalsTone.render("jù"), "ǜ");
        assert_eq!(Style::FinalsTone2.render("qǔ"), "v3");
        assert_eq!(Style::FinalsTone3.render("xú"), "v2");
        assert_eq!(Style::Tone2.render("lüè"), "lve4");
        assert_eq!(Style::FinalsTone2.render("lüè"), "ve4");
        assert_eq!(Style::Tone.render("lüè"), "lüè");
        assert_eq!(Style::Normal.render("lüè"), "lve");
    }

    #[test]
    fn test_render_marked_initial() {
        assert_eq!(Style::Finals.render("ḿu"), "u");
        assert_eq!(Style::Initials.render("ńa"), "n");
        assert_eq!(Style::FinalsTone3.render("m\u{0300}a"), "a");
    }

    #[test]
    fn test_neutral_tone_has_no_digit() {
        for style in [Style::Tone2, Style::Tone3, Style::FinalsTone2, Style::FinalsTone3] {
            assert!(!style.render("ma").contains(|c: char| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("normal".parse::<Style>(), Ok(Style::Normal));
        assert_eq!("FIRST_LETTER".parse::<Style>(), Ok(Style::FirstLetter));
        assert_eq!("finals-tone2".parse::<Style>(), Ok(Style::FinalsTone2));
        assert_eq!("Tone3".parse::<Style>(), Ok(Style::Tone3));
        assert_eq!(
            "bold".parse::<Style>(),
            Err(StyleError::Unknown("bold".to_owned()))
        );
        for style in Style::ALL {
            assert_eq!(style.to_string().parse::<Style>(), Ok(style));
        }
    }

    #[test]
    fn test_style_codes() {
        assert_eq!(Style::try_from(8), Ok(Style::Tone3));
        assert_eq!(Style::try_from(4), Ok(Style::FirstLetter));
        assert_eq!(Style::try_from(10), Err(StyleError::Code(10)));
    }
}
