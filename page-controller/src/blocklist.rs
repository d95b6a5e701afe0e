use crate::surface::BlocklistTag;
use tracing::debug;

pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered, duplicate-free list of keywords excluded from analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlocklistStore {
    words: Vec<String>,
}

impl BlocklistStore {
    pub fn new<I, W>(defaults: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut store = Self::default();
        for word in defaults {
            store.add(word.as_ref());
        }
        store
    }

    /// Returns `true` when the normalized word was appended.
    pub fn add(&mut self, raw: &str) -> bool {
        let word = normalize_keyword(raw);
        if word.is_empty() || self.contains(&word) {
            debug!("Ignoring blocklist entry '{}'", raw);
            return false;
        }
        debug!("Blocking keyword '{}'", word);
        self.words.push(word);
        true
    }

    /// Removes an exact match. Absent words are not an error.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|existing| existing != word);
        before != self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|existing| existing == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.words.clone()
    }

    pub fn tags(&self) -> Vec<BlocklistTag> {
        self.words
            .iter()
            .map(|word| BlocklistTag {
                label: word.clone(),
                remove_word: word.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
