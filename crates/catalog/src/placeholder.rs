//! Placeholder expansion for `${KEY}` and `${KEY,default}` tokens.
//!
//! Tokens are resolved left to right against a [`KeyLookup`]. A token whose key
//! is undefined falls back to its inline default, which is itself expanded
//! first. Without a default the token reproduces itself, so an unresolved
//! `${KEY}` stays visible instead of silently becoming empty. Values returned by
//! the lookup are inserted verbatim and never rescanned.

use std::collections::HashMap;

use vcapenv_core::{KeyLookup, PLACEHOLDER_DEFAULT_SEPARATOR, PLACEHOLDER_END, PLACEHOLDER_START};

/// Expand every placeholder in `value`.
///
/// Never fails: unterminated tokens are copied through unchanged and undefined
/// keys fall back to their default (or to the token itself).
pub fn resolve_placeholders<L>(value: &str, lookup: &L) -> String
where
    L: KeyLookup + ?Sized,
{
    let mut seen = HashMap::new();
    expand(value, lookup, &mut seen)
}

/// Whether `value` contains a complete `${...}` token.
pub fn contains_placeholder(value: &str) -> bool {
    value
        .find(PLACEHOLDER_START)
        .is_some_and(|start| value[start..].contains(PLACEHOLDER_END))
}

fn expand<L>(value: &str, lookup: &L, seen: &mut HashMap<String, Option<String>>) -> String
where
    L: KeyLookup + ?Sized,
{
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find(PLACEHOLDER_START) {
        let body_start = start + PLACEHOLDER_START.len();
        let Some(end) = rest[start..].find(PLACEHOLDER_END).map(|pos| start + pos) else {
            break;
        };
        let body = &rest[body_start..end];

        result.push_str(&rest[..start]);

        let (key, default) = match body.split_once(PLACEHOLDER_DEFAULT_SEPARATOR) {
            Some((key, default)) if !default.is_empty() => (key, expand(default, lookup, seen)),
            _ => (body, format!("{PLACEHOLDER_START}{body}{PLACEHOLDER_END}")),
        };

        let resolved = seen
            .entry(key.to_string())
            .or_insert_with(|| lookup.lookup(key))
            .clone();
        match resolved {
            Some(value) => {
                tracing::trace!(key, "placeholder resolved from lookup");
                result.push_str(&value);
            }
            None => result.push_str(&default),
        }

        rest = &rest[end + PLACEHOLDER_END.len_utf8()..];
    }

    result.push_str(rest);
    result
}
