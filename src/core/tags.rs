//! Tag Normalizer: turns a noisy candidate pool into marketplace-compliant tags
//!
//! Rules, in order: clean → shorten → pair single words with a title neighbor →
//! title-case + dedup → pad with title bigrams → truncate to the tag limit.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::config::TagConfig;

lazy_static! {
    /// Word tokens in a title
    static ref RE_WORD: Regex = Regex::new(r"\w+").unwrap();

    /// Anything that is neither a word character nor whitespace
    static ref RE_PUNCT: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Normalizes candidate tag pools against a listing title
#[derive(Debug, Clone, Default)]
pub struct TagNormalizer {
    config: TagConfig,
}

impl TagNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TagConfig) -> Self {
        Self { config }
    }

    /// Normalize `raw_tags` using `title` as the adjacency and padding pool
    pub fn normalize<S: AsRef<str>>(&self, raw_tags: &[S], title: &str) -> Vec<String> {
        let title_words = tokenize(title);
        let mut accepted = TagSet::new(self.config.max_tags);

        for raw in raw_tags {
            if accepted.is_full() {
                break;
            }
            let Some(tag) = self.clean(raw.as_ref()) else {
                continue;
            };
            let tag = self.pair_with_title(tag, &title_words);
            accepted.offer(title_case(&tag), self.config.max_tag_chars);
        }

        let from_pool = accepted.len();

        // Shortfall: pad with consecutive title bigrams in order
        for pair in title_words.windows(2) {
            if accepted.is_full() {
                break;
            }
            let phrase = title_case(&format!("{} {}", pair[0], pair[1]));
            accepted.offer(phrase, self.config.max_tag_chars);
        }

        let tags = accepted.into_vec();
        debug!(
            raw = raw_tags.len(),
            from_pool,
            padded = tags.len() - from_pool,
            "Normalized tags"
        );
        tags
    }

    /// Strip punctuation, collapse whitespace and enforce the length rule
    fn clean(&self, raw: &str) -> Option<String> {
        let stripped = RE_PUNCT.replace_all(raw.trim(), "");
        let words: Vec<&str> = stripped.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }

        let joined = words.join(" ");
        if char_len(&joined) <= self.config.max_tag_chars {
            return Some(joined);
        }

        shorten(words, self.config.max_tag_chars, self.config.min_truncated_chars)
    }

    /// Single-word tags found in the title become a two-word phrase with their
    /// neighbor (preceding word preferred). Anything else is returned unchanged.
    /// A pair over the length limit is still returned; the tag set rejects it.
    fn pair_with_title(&self, tag: String, title_words: &[String]) -> String {
        if tag.contains(' ') {
            return tag;
        }

        let lower = tag.to_lowercase();
        let Some(idx) = title_words.iter().position(|w| *w == lower) else {
            return tag;
        };

        if idx > 0 {
            format!("{} {}", title_words[idx - 1], tag)
        } else if let Some(next) = title_words.get(idx + 1) {
            format!("{} {}", tag, next)
        } else {
            tag
        }
    }
}

/// Normalize with the default marketplace limits
pub fn normalize_tags<S: AsRef<str>>(raw_tags: &[S], title: &str) -> Vec<String> {
    TagNormalizer::new().normalize(raw_tags, title)
}

/// Lower-cased word tokens of `text`
pub fn tokenize(text: &str) -> Vec<String> {
    RE_WORD
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drop trailing words until the phrase fits; reject it if it cannot fit or
/// ends up too short to be useful
fn shorten(mut words: Vec<&str>, max_chars: usize, min_chars: usize) -> Option<String> {
    while words.len() > 1 && char_len(&words.join(" ")) > max_chars {
        words.pop();
    }
    let phrase = words.join(" ");
    let len = char_len(&phrase);
    (len <= max_chars && len >= min_chars).then_some(phrase)
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Ordered, case-insensitively unique, bounded tag list
struct TagSet {
    tags: Vec<String>,
    seen: HashSet<String>,
    limit: usize,
}

impl TagSet {
    fn new(limit: usize) -> Self {
        Self {
            tags: Vec::with_capacity(limit),
            seen: HashSet::new(),
            limit,
        }
    }

    fn offer(&mut self, tag: String, max_chars: usize) -> bool {
        if self.is_full() || tag.is_empty() || char_len(&tag) > max_chars {
            return false;
        }
        if !self.seen.insert(tag.to_lowercase()) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    fn is_full(&self) -> bool {
        self.tags.len() >= self.limit
    }

    fn len(&self) -> usize {
        self.tags.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

// =============================================================================
// TESTS
// =============================================================================
