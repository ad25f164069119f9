//! Query encoding
//!
//! Free text is split into whitespace-separated tokens, an optional keyword
//! (usually a site restriction) is placed in front, every token is
//! percent-encoded on its own and the result is joined with a literal `+`.
//! Keeping `+` unescaped makes multi-word searches readable in the address bar.

use std::fmt;

/// Separator placed between encoded tokens
pub const TOKEN_SEPARATOR: char = '+';

/// Raw user input for a single invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    keyword: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyword: None,
        }
    }

    /// Attach a leading keyword. Blank keywords are ignored.
    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// True when the text carries no token at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn encode(&self) -> EncodedQuery {
        encode(&self.text, self.keyword.as_deref())
    }
}

/// Percent-encoded tokens in source order, keyword first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedQuery {
    tokens: Vec<String>,
}

impl EncodedQuery {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for EncodedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                write!(f, "{TOKEN_SEPARATOR}")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// Encode `text`, optionally prefixed by `keyword`.
pub fn encode(text: &str, keyword: Option<&str>) -> EncodedQuery {
    let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

    let tokens = keyword
        .into_iter()
        .chain(text.split_whitespace())
        .map(|token| urlencoding::encode(token).into_owned())
        .collect();

    EncodedQuery { tokens }
}
