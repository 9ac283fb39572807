//! Chinese text to pinyin.
//!
//! ```no_run
//! use hanzi_pinyin::{Args, Converter, Style};
//!
//! let converter = Converter::from_dir("dict")?;
//! let args = Args::new().with_style(Style::Tone);
//! assert_eq!(converter.resolve_default("中国人", &args), ["zhōng", "guó", "rén"]);
//! # Ok::<(), hanzi_pinyin::DictError>(())
//! ```

pub mod args;
pub mod config;
pub mod converter;
pub mod dict;
pub mod dict_parser;
pub mod pinyin;
pub mod resolver;
pub mod segment;
pub mod style;

pub use args::{Args, Fallback};
pub use converter::Converter;
pub use dict::{DictError, Dictionary};
pub use resolver::Resolved;
pub use segment::{CharSegmenter, JiebaSegmenter, Segmenter};
pub use style::{Style, StyleError};
