/// File name of the per-character table inside a dictionary directory
pub const CHAR_TABLE_FILE: &str = "pinyin_dict";
/// File name of the per-phrase table inside a dictionary directory
pub const PHRASE_TABLE_FILE: &str = "phrase_dict";

pub const DICT_DIR_ENV: &str = "HANZI_PINYIN_DICT_DIR";
pub const DEFAULT_DICT_DIR: &str = "dict";

pub const DEFAULT_SEPARATOR: &str = "-";
pub const COMMENT_PREFIX: char = '#';

/// Character table lines look like `U+4E2D: zhōng,zhòng  # 中`
pub const CODE_POINT_PREFIX: &str = "U+";
pub const CHAR_READING_SEP: char = ',';
