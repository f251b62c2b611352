//! Locating translatable messages inside file contents
//!
//! Templates mark a message by wrapping its source-language text in a
//! gettext call:
//!
//! ```text
//! <h1>{{ _("Hello World") }}</h1>
//! <a href="/about">{{ _('About us') }}</a>
//! ```
//!
//! During translation the whole marker is replaced by the catalog entry for
//! the message key, so for `fr` the heading becomes
//! `<h1>Bonjour tout le monde</h1>`.
//!
//! Other marker conventions plug in through [`MessageExtractor`].

use crate::error::{Error, Result};
use regex::Regex;
use std::ops::Range;

/// Default marker: `{{ _("key") }}` or `{{ _('key') }}`
pub const DEFAULT_PATTERN: &str = r#"\{\{\s*_\(\s*(?:"([^"]*)"|'([^']*)')\s*\)\s*\}\}"#;

/// A message marker found in a text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMatch<'t> {
    /// Byte range of the whole marker, replaced on substitution
    pub range: Range<usize>,
    /// The message key inside the marker
    pub key: &'t str,
}

/// Strategy for finding message markers
pub trait MessageExtractor: Send + Sync {
    /// All markers in `text`, in order of appearance and non-overlapping
    fn find_messages<'t>(&self, text: &'t str) -> Vec<MessageMatch<'t>>;
}

/// Regex based extractor
///
/// The message key is the first capture group that participated in the
/// match, or the whole match when the pattern has no groups.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            Error::configuration(format!("Invalid message pattern '{}': {}", pattern, e))
        })?;
        Ok(PatternExtractor { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        PatternExtractor {
            regex: Regex::new(DEFAULT_PATTERN).expect("default message pattern compiles"),
        }
    }
}

impl MessageExtractor for PatternExtractor {
    fn find_messages<'t>(&self, text: &'t str) -> Vec<MessageMatch<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let key = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .unwrap_or(whole)
                    .as_str();
                Some(MessageMatch {
                    range: whole.range(),
                    key,
                })
            })
            .collect()
    }
}

/// Replace every marker found by `extractor` with `lookup(key)`
///
/// Text outside the markers is copied unchanged.
pub fn substitute<'t, F, R>(
    text: &'t str,
    extractor: &dyn MessageExtractor,
    mut lookup: F,
) -> String
where
    F: FnMut(&'t str) -> R,
    R: AsRef<str>,
{
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for found in extractor.find_messages(text) {
        result.push_str(&text[last..found.range.start]);
        result.push_str(lookup(found.key).as_ref());
        last = found.range.end;
    }
    result.push_str(&text[last..]);
    result
}
