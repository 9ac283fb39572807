//! Word segmentation.
//!
//! The converter only needs an ordered list of words covering (parts of) the input.
//! Phrase lookup happens once per word, so the segmentation decides which
//! characters can disambiguate each other.

use std::fmt;
use std::sync::LazyLock;

use jieba_rs::Jieba;
use regex::Regex;

/// Splits text into an ordered sequence of words.
///
/// Words are slices of the input in input order. A segmenter may leave out parts of
/// the text it does not consider words.
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

impl<T: Segmenter + ?Sized> Segmenter for &T {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        (**self).segment(text)
    }
}

impl<T: Segmenter + ?Sized> Segmenter for Box<T> {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        (**self).segment(text)
    }
}

/// Every character is its own word, so no phrase is ever found.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.char_indices()
            .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
            .collect()
    }
}

/// A token counts as a word if it has at least one letter or digit
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]").expect("word token pattern is valid"));

/// Dictionary based segmentation with jieba.
///
/// Unless built with [`JiebaSegmenter::with_symbols`], tokens without any letter or digit
/// (whitespace, punctuation, emoji) are discarded.
pub struct JiebaSegmenter {
    jieba: Jieba,
    keep_symbols: bool,
}

impl JiebaSegmenter {
    pub fn new() -> Self {
        Self::from_jieba(Jieba::new())
    }

    /// Keeps punctuation and whitespace tokens so a fallback gets to see them.
    pub fn with_symbols() -> Self {
        Self {
            keep_symbols: true,
            ..Self::new()
        }
    }

    pub fn from_jieba(jieba: Jieba) -> Self {
        Self {
            jieba,
            keep_symbols: false,
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaSegmenter")
            .field("keep_symbols", &self.keep_symbols)
            .finish_non_exhaustive()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let words = self.jieba.cut(text, true);
        if self.keep_symbols {
            words
        } else {
            words
                .into_iter()
                .filter(|word| WORD_TOKEN.is_match(word))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_segmenter() {
        assert_eq!(CharSegmenter.segment("中国a"), vec!["中", "国", "a"]);
        assert!(CharSegmenter.segment("").is_empty());
    }

    #[test]
    fn test_jieba_keeps_text_order() {
        let segmenter = JiebaSegmenter::new();
        let words = segmenter.segment("我们去银行");
        assert_eq!(words.concat(), "我们去银行");
        assert!(words.contains(&"银行"));
    }

    #[test]
    fn test_jieba_drops_symbols() {
        let segmenter = JiebaSegmenter::new();
        let words = segmenter.segment("中国人👿+（）【】abc");
        assert_eq!(words.concat(), "中国人abc");

        let with_symbols = JiebaSegmenter::with_symbols();
        assert_eq!(with_symbols.segment("中，国").concat(), "中，国");
    }
}
