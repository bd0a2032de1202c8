use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Word counts that remember the order in which each word was first seen.
///
/// Ordering matters only for ties: `most_common` sorts by count and keeps
/// first-seen order among equal counts. Equality ignores ordering.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub frequency: u64,
}

impl WordFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    pub fn add_count(&mut self, word: &str, count: u64) {
        match self.index.get(word) {
            Some(&position) => self.entries[position].1 += count,
            None => {
                self.index.insert(word.to_owned(), self.entries.len());
                self.entries.push((word.to_owned(), count));
            }
        }
    }

    /// Sums `other` into `self`; words new to `self` are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: &WordFrequencies) {
        for (word, count) in &other.entries {
            self.add_count(word, *count);
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.index
            .get(word)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        // stable sort keeps first-seen order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(n)
            .map(|(word, count)| WordCount {
                word: word.clone(),
                frequency: *count,
            })
            .collect()
    }
}

impl PartialEq for WordFrequencies {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(word, count)| other.get(word) == count)
    }
}

impl Eq for WordFrequencies {}

impl<'a> FromIterator<(&'a str, u64)> for WordFrequencies {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut frequencies = WordFrequencies::new();
        for (word, count) in iter {
            frequencies.add_count(word, count);
        }
        frequencies
    }
}

impl<'a> FromIterator<&'a str> for WordFrequencies {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut frequencies = WordFrequencies::new();
        for word in iter {
            frequencies.add(word);
        }
        frequencies
    }
}

impl Serialize for WordFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(word, count)| (word, count)))
    }
}

struct WordFrequenciesVisitor;

impl<'de> Visitor<'de> for WordFrequenciesVisitor {
    type Value = WordFrequencies;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of words to non-negative counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut frequencies = WordFrequencies::new();
        while let Some((word, count)) = access.next_entry::<String, u64>()? {
            frequencies.add_count(&word, count);
        }
        Ok(frequencies)
    }
}

impl<'de> Deserialize<'de> for WordFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WordFrequenciesVisitor)
    }
}
