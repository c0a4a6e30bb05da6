//! Word frequency over product names

use std::collections::HashMap;

use crate::domain::constants::analysis::{DEFAULT_TOP_WORDS, MAX_IGNORED_TOKEN_CHARS, STOP_WORDS};
use crate::domain::product::ProductRecord;
use crate::domain::statistics::{FrequencyTable, WordCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyAnalyzer {
    top_n: usize,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_WORDS)
    }
}

impl FrequencyAnalyzer {
    pub const fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Whether a lower-cased token counts as a content word
    pub fn is_content_word(token: &str) -> bool {
        token.chars().count() > MAX_IGNORED_TOKEN_CHARS && !STOP_WORDS.contains(&token)
    }

    /// The most frequent content words across all record names.
    ///
    /// Names are lower-cased and split on whitespace. Ties keep the order in
    /// which words first appeared.
    pub fn top_words(&self, records: &[ProductRecord]) -> FrequencyTable {
        // word -> (count, first position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut position = 0usize;

        for record in records {
            let name = record.name.to_lowercase();
            for token in name.split_whitespace().filter(|token| Self::is_content_word(token)) {
                counts
                    .entry(token.to_string())
                    .and_modify(|(count, _)| *count += 1)
                    .or_insert((1, position));
                position += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.top_n)
            .map(|(word, count, _)| WordCount { word, count })
            .collect()
    }
}
