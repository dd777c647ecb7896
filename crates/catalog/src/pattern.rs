//! Negatable selectors for service types and service names.
//!
//! A selector follows the grammar `["!"] ( "/" regex "/" | literal )`. A
//! leading `!` negates the match, a body wrapped in slashes is a regular
//! expression, anything else is matched literally. Both forms must match the
//! whole candidate, never a substring. Placeholders in the selector are
//! expanded before the grammar is applied, so `!/${EXCLUDE,.*-test}/` can be
//! steered from the environment.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use vcapenv_core::{Error, KeyLookup, Result, SELECTOR_NEGATION, SELECTOR_REGEX_DELIMITER};

use crate::placeholder::resolve_placeholders;

/// A compiled selector with an optional negation flag.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
    pattern: String,
    negated: bool,
}

impl PatternMatcher {
    /// Expand placeholders in `selector` against `lookup`, then compile it.
    pub fn parse<L>(selector: &str, lookup: &L) -> Result<Self>
    where
        L: KeyLookup + ?Sized,
    {
        Self::compile(&resolve_placeholders(selector, lookup))
    }

    /// Compile `selector` as written, without placeholder expansion.
    pub fn compile(selector: &str) -> Result<Self> {
        let (negated, body) = match selector.strip_prefix(SELECTOR_NEGATION) {
            Some(rest) => (true, rest),
            None => (false, selector),
        };

        let pattern = match regex_body(body) {
            Some(inner) => inner.to_string(),
            None => regex::escape(body),
        };

        let regex =
            anchored(&pattern).map_err(|source| Error::invalid_selector(selector, source))?;

        Ok(Self {
            regex,
            pattern,
            negated,
        })
    }

    /// Return a copy of this matcher with the negation flag flipped.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Full match of `candidate`, inverted when the selector is negated.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate) != self.negated
    }

    /// Like [`PatternMatcher::matches`], treating an absent candidate as one
    /// that matches nothing: only a negated selector accepts it.
    #[must_use]
    pub fn matches_opt(&self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(candidate) => self.matches(candidate),
            None => self.negated,
        }
    }
}

/// The text between the delimiters when `body` has the `/regex/` form.
fn regex_body(body: &str) -> Option<&str> {
    body.strip_prefix(SELECTOR_REGEX_DELIMITER)?
        .strip_suffix(SELECTOR_REGEX_DELIMITER)
}

impl FromStr for PatternMatcher {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.pattern)?;
        if self.negated {
            f.write_str(" negated")?;
        }
        Ok(())
    }
}

/// Compile `pattern` as a full match.
///
/// Under `(?x)` a trailing `# comment` would swallow the closing anchor, so
/// that form is retried with a newline ending the comment. Outside verbose
/// mode the first attempt already succeeds or fails on its own.
fn anchored(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$")).or_else(|error| {
        Regex::new(&format!("^(?:{pattern}\n)$")).map_err(|_| error)
    })
}
