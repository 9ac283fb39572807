/*
Format Description

- encoded in utf-8, one entry per line
- lines starting with # are comments, empty lines are ignored
- per-character table, readings separated by commas, optional trailing comment:
  U+4E2D: zhōng,zhòng  # 中
- per-phrase table, one reading per character separated by spaces:
  街号巷哭: jiē hào xiàng kū

The grammar is more or less as follows:

comment_line = "#" ...
char_line = "U+" hex ":" reading {"," reading} ["#" ...]
phrase_line = word ":" reading {" " reading}
hex = hexdigit {hexdigit}
reading = letter {letter}
word = any character except ":" {any character except ":"}

*/

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till1, take_while1},
    character::complete::{char, hex_digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, rest},
    multi::separated_list1,
    sequence::{delimited, preceded},
};

use crate::config;

#[derive(Debug, PartialEq, Eq)]
pub struct CharEntry {
    pub code_point: u32,
    pub readings: Vec<String>,
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PhraseEntry {
    pub phrase: String,
    pub readings: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DictLine {
    Char(CharEntry),
    Phrase(PhraseEntry),
    Comment(String),
    Blank,
}

/// Parses one line of the per-character table.
pub fn parse_char_line(line: &str) -> Result<DictLine, String> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return Ok(DictLine::Blank);
    }
    let line_parser = alt((
        map(parse_comment, DictLine::Comment),
        map(parse_char_entry, DictLine::Char),
    ));
    match all_consuming(line_parser).parse(line) {
        Ok((_remainder, dict_line)) => Ok(dict_line),
        Err(e) => Err(e.to_string()),
    }
}

/// Parses one line of the per-phrase table.
pub fn parse_phrase_line(line: &str) -> Result<DictLine, String> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return Ok(DictLine::Blank);
    }
    let line_parser = alt((
        map(parse_comment, DictLine::Comment),
        map(parse_phrase_entry, DictLine::Phrase),
    ));
    match all_consuming(line_parser).parse(line) {
        Ok((_remainder, dict_line)) => Ok(dict_line),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_comment(comment_line: &str) -> IResult<&str, String> {
    map(preceded(char(config::COMMENT_PREFIX), rest), |c: &str| {
        c.trim().to_owned()
    })
    .parse(comment_line)
}

/// Only Unicode scalar values, surrogates and anything past U+10FFFF are rejected
fn parse_code_point(code: &str) -> IResult<&str, u32> {
    preceded(
        tag(config::CODE_POINT_PREFIX),
        map_res(hex_digit1, |hex: &str| {
            u32::from_str_radix(hex, 16)
                .ok()
                .filter(|code| char::from_u32(*code).is_some())
                .ok_or("not a Unicode scalar value")
        }),
    )
    .parse(code)
}

fn parse_char_readings(reading_list: &str) -> IResult<&str, Vec<&str>> {
    let reading = take_while1(|c: char| {
        c != config::CHAR_READING_SEP && c != config::COMMENT_PREFIX && !c.is_whitespace()
    });
    separated_list1(
        delimited(space0, char(config::CHAR_READING_SEP), space0),
        reading,
    )
    .parse(reading_list)
}

fn parse_char_entry(char_line: &str) -> IResult<&str, CharEntry> {
    let (remainder, (code_point, _, readings, _, comment)) = (
        parse_code_point,
        delimited(space0, char(':'), space0),
        parse_char_readings,
        space0,
        opt(preceded(char(config::COMMENT_PREFIX), rest)),
    )
        .parse(char_line)?;
    Ok((
        remainder,
        CharEntry {
            code_point,
            readings: readings.iter().map(|s| (*s).to_owned()).collect(),
            comment: comment.map(|c: &str| c.trim().to_owned()),
        },
    ))
}

fn parse_phrase_entry(phrase_line: &str) -> IResult<&str, PhraseEntry> {
    let reading = take_till1(|c: char| c.is_whitespace());
    let (remainder, (phrase, _, readings, _)) = (
        take_till1(|c: char| c == ':'),
        preceded(char(':'), space0),
        separated_list1(space1, reading),
        space0,
    )
        .parse(phrase_line)?;
    Ok((
        remainder,
        PhraseEntry {
            phrase: phrase.trim().to_owned(),
            readings: readings.iter().map(|s| (*s).to_owned()).collect(),
        },
    ))
}
