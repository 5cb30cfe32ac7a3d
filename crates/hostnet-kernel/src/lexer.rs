//! Command-line lexer.
//!
//! Splits a command line into words using the logos lexer generator.
//!
//! - Whitespace separates words.
//! - `"..."` quotes with `\"`, `\\`, `\n` and `\t` escapes.
//! - `'...'` quotes literally.
//! - Fragments with no whitespace between them join into one word, so
//!   `a"b c"` is the single word `ab c`.

use logos::Logos;

use crate::error::{Error, Result};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Fragment {
    #[regex(r#"[^ \t\r\n"']+"#)]
    Bare,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,
}

/// One shell word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Some part of the word was quoted.
    pub quoted: bool,
}

impl Word {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Split a command line into words.
pub fn split_words(line: &str) -> Result<Vec<Word>> {
    let mut words: Vec<Word> = Vec::new();
    let mut last_end: Option<usize> = None;

    for (fragment, span) in Fragment::lexer(line).spanned() {
        let raw = &line[span.clone()];
        let fragment = fragment
            .map_err(|_| Error::BadArguments(format!("unterminated quote at column {}", span.start + 1)))?;

        let (text, quoted) = match fragment {
            Fragment::Bare => (raw.to_string(), false),
            Fragment::DoubleQuoted => (unescape(&raw[1..raw.len() - 1]), true),
            Fragment::SingleQuoted => (raw[1..raw.len() - 1].to_string(), true),
        };

        match words.last_mut() {
            Some(word) if last_end == Some(span.start) => {
                word.text.push_str(&text);
                word.quoted |= quoted;
            }
            _ => words.push(Word { text, quoted }),
        }
        last_end = Some(span.end);
    }

    Ok(words)
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<String> {
        split_words(line).unwrap().into_iter().map(|w| w.text).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(texts("mv  a.txt\tb/"), vec!["mv", "a.txt", "b/"]);
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn double_quotes_keep_spaces_and_escapes() {
        let words = split_words(r#"replace f.txt "hello world" "say \"hi\"\n""#).unwrap();
        assert_eq!(words[2], Word::quoted("hello world"));
        assert_eq!(words[3], Word::quoted("say \"hi\"\n"));
        assert!(!words[0].quoted);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(texts(r"echo 'a \n b'"), vec!["echo", r"a \n b"]);
    }

    #[test]
    fn adjacent_fragments_join() {
        let words = split_words(r#"a"b c"'d'"#).unwrap();
        assert_eq!(words, vec![Word::quoted("ab cd")]);
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        assert_eq!(texts(r#"write f.txt """#), vec!["write", "f.txt", ""]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(matches!(split_words(r#"echo "oops"#), Err(Error::BadArguments(_))));
        assert!(matches!(split_words("echo 'oops"), Err(Error::BadArguments(_))));
    }
}
