use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::args::Args;
use crate::dict::{self, Dictionary};
use crate::resolver::{self, Resolved};
use crate::segment::{JiebaSegmenter, Segmenter};

/// Text to pinyin conversion over a shared dictionary and a segmenter.
///
/// Conversions keep no state between calls, a `Converter` can be shared between threads
/// as long as its segmenter can.
#[derive(Debug)]
pub struct Converter<S = JiebaSegmenter> {
    dict: Arc<Dictionary>,
    segmenter: S,
}

impl Converter<JiebaSegmenter> {
    /// Loads the dictionary tables from `dir` and segments with jieba.
    pub fn from_dir(dir: impl AsRef<Path>) -> dict::Result<Self> {
        let dict = Dictionary::from_dir(dir)?;
        Ok(Self::new(dict, JiebaSegmenter::new()))
    }
}

impl<S: Segmenter> Converter<S> {
    pub fn new(dict: impl Into<Arc<Dictionary>>, segmenter: S) -> Self {
        Self {
            dict: dict.into(),
            segmenter,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    fn resolve(&self, text: &str, heteronym: bool, args: &Args) -> Vec<Resolved<'_>> {
        let words = self.segmenter.segment(text);
        debug!("{} words in {:?}", words.len(), text);
        words
            .into_iter()
            .flat_map(|word| resolver::resolve_word(&self.dict, word, heteronym, args.fallback()))
            .collect()
    }

    /// Rendered candidates for every resolved character, in text order.
    /// Each list holds only the default reading unless `args.heteronym` is set.
    pub fn resolve_all(&self, text: &str, args: &Args) -> Vec<Vec<String>> {
        self.resolve(text, args.heteronym, args)
            .iter()
            .map(|resolved| resolved.render(args.style))
            .collect()
    }

    /// The default reading of every resolved character. `args.heteronym` is ignored.
    pub fn resolve_default(&self, text: &str, args: &Args) -> Vec<String> {
        self.resolve(text, false, args)
            .iter()
            .filter_map(|resolved| resolved.render(args.style).into_iter().next())
            .collect()
    }

    /// Same output as [`Converter::resolve_default`], looking up only the default reading
    /// of each character.
    pub fn resolve_fast(&self, text: &str, args: &Args) -> Vec<String> {
        let mut out = vec![];
        for word in self.segmenter.segment(text) {
            let phrase = resolver::lookup_phrase(&self.dict, word);
            for (idx, ch) in word.chars().enumerate() {
                let reading = phrase
                    .map(|readings| readings[idx].as_str())
                    .or_else(|| {
                        self.dict
                            .char_readings(ch)
                            .and_then(|all| all.first())
                            .map(String::as_str)
                    });
                match reading {
                    Some(reading) => out.push(args.style.render(reading)),
                    None => {
                        if let Some(first) = args
                            .fallback()
                            .and_then(|fallback| fallback.fallback(ch).into_iter().next())
                        {
                            out.push(first);
                        }
                    }
                }
            }
        }
        out
    }

    /// Default readings joined with `args.separator`
    pub fn slug(&self, text: &str, args: &Args) -> String {
        self.resolve_default(text, args).join(&args.separator)
    }

    /// [`Converter::resolve_all`] with default options when `args` is `None`
    pub fn convert(&self, text: &str, args: Option<&Args>) -> Vec<Vec<String>> {
        match args {
            Some(args) => self.resolve_all(text, args),
            None => self.resolve_all(text, &Args::default()),
        }
    }

    /// [`Converter::resolve_default`] with default options when `args` is `None`
    pub fn convert_default(&self, text: &str, args: Option<&Args>) -> Vec<String> {
        match args {
            Some(args) => self.resolve_default(text, args),
            None => self.resolve_default(text, &Args::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::CharSegmenter;
    use crate::style::Style;

    fn converter() -> Converter<CharSegmenter> {
        let mut dict = Dictionary::new();
        dict.insert_char('中', vec!["zhōng".to_owned(), "zhòng".to_owned()]);
        dict.insert_char('国', vec!["guó".to_owned()]);
        dict.insert_char('人', vec!["rén".to_owned()]);
        Converter::new(dict, CharSegmenter)
    }

    #[test]
    fn test_resolve_all() {
        let converter = converter();
        let args = Args::new().with_style(Style::Tone);
        assert_eq!(
            converter.resolve_all("中国人", &args),
            vec![vec!["zhōng"], vec!["guó"], vec!["rén"]]
        );
    }

    #[test]
    fn test_default_ignores_heteronym() {
        let converter = converter();
        let args = Args::new().with_heteronym(true);
        assert_eq!(converter.resolve_all("中", &args), vec![vec!["zhong", "zhong"]]);
        assert_eq!(converter.resolve_default("中", &args), vec!["zhong"]);
        assert_eq!(converter.resolve_fast("中", &args), vec!["zhong"]);
    }

    #[test]
    fn test_slug() {
        let converter = converter();
        assert_eq!(converter.slug("中国人", &Args::default()), "zhong-guo-ren");
        assert_eq!(
            converter.slug("中国人", &Args::new().with_separator("")),
            "zhongguoren"
        );
        assert_eq!(converter.slug("abc", &Args::default()), "");
    }

    #[test]
    fn test_shares_the_dictionary() {
        let dict = Arc::new(Dictionary::new());
        let converter = Converter::new(Arc::clone(&dict), CharSegmenter);
        assert!(std::ptr::eq(converter.dictionary(), dict.as_ref()));
    }

    #[test]
    fn test_convert_without_args() {
        let converter = converter();
        assert_eq!(
            converter.convert("中国人", None),
            vec![vec!["zhong"], vec!["guo"], vec!["ren"]]
        );
        assert_eq!(
            converter.convert_default("中国人", None),
            vec!["zhong", "guo", "ren"]
        );
    }

    #[test]
    fn test_shared_between_threads() {
        let converter = converter();
        let args = Args::new()
            .with_style(Style::Tone3)
            .with_fallback(|ch: char| vec![ch.to_string()]);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(
                        converter.resolve_default("中国x", &args),
                        vec!["zhong1", "guo2", "x"]
                    );
                });
            }
        });
    }
}
