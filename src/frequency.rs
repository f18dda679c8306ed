use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{CodingError, Result};

/// Occurrence counts per character, kept in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, u64)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `character`.
    pub fn record(&mut self, character: char) {
        match self.index.get(&character) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(character, self.entries.len());
                self.entries.push((character, 1));
            }
        }
    }

    pub fn get(&self, character: char) -> Option<u64> {
        self.index.get(&character).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, freq)| freq).sum()
    }

    /// Iterates `(character, frequency)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (character, freq) in iter {
            match table.index.get(&character) {
                Some(&slot) => table.entries[slot].1 += freq,
                None => {
                    table.index.insert(character, table.entries.len());
                    table.entries.push((character, freq));
                }
            }
        }
        table
    }
}

/// Scans `text` and counts every distinct character.
pub fn analyze(text: &str) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for character in text.chars() {
        table.record(character);
    }

    if table.is_empty() {
        return Err(CodingError::EmptyInput);
    }

    debug!(
        "Analyzed {} characters, {} distinct.",
        table.total(),
        table.len()
    );
    for (character, freq) in table.iter() {
        trace!("Frequency of {:?}: {}", character, freq);
    }

    Ok(table)
}

/// Shannon entropy of the distribution, in bits per symbol.
pub fn entropy_from_freq(freq: &FrequencyTable) -> f64 {
    let total = freq.total();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_occurrence_order() {
        let table = analyze("aabbbc").unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![('a', 2), ('b', 3), ('c', 1)]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn order_follows_first_occurrence_not_value() {
        let table = analyze("zyxzz").unwrap();
        let order: Vec<char> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!['z', 'y', 'x']);
        assert_eq!(table.get('z'), Some(3));
        assert_eq!(table.get('q'), None);
    }

    #[test]
    fn counts_code_points_not_bytes() {
        let table = analyze("żółw ż").unwrap();
        assert_eq!(table.get('ż'), Some(2));
        assert_eq!(table.get('ó'), Some(1));
        assert_eq!(table.get(' '), Some(1));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn empty_text_is_an_error() {
        assert_eq!(analyze(""), Err(CodingError::EmptyInput));
    }

    #[test]
    fn entropy_of_uniform_and_single() {
        let uniform = analyze("abcd").unwrap();
        assert!((entropy_from_freq(&uniform) - 2.0).abs() < 1e-9);

        let single = analyze("aaaa").unwrap();
        assert_eq!(entropy_from_freq(&single), 0.0);
    }

    #[test]
    fn collects_and_merges_pairs() {
        let table: FrequencyTable = vec![('a', 2), ('b', 1), ('a', 3)].into_iter().collect();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![('a', 5), ('b', 1)]);
    }
}
