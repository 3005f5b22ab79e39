use std::collections::BTreeMap;

use tracing::debug;

/// Occurrence count for every distinct symbol of a text.
///
/// Backed by a `BTreeMap` so iteration is in ascending symbol order, which the
/// tree builder relies on for a deterministic seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, usize>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let counts = text.chars().fold(BTreeMap::new(), |mut acc, ch| {
            *acc.entry(ch).or_insert(0) += 1;
            acc
        });

        debug!(distinct = counts.len(), "counted symbol frequencies");
        FrequencyTable { counts }
    }

    /// Builds a table from explicit `(symbol, count)` pairs. Zero counts are
    /// dropped; repeated symbols accumulate.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, usize)>,
    {
        let mut counts = BTreeMap::new();
        for (symbol, count) in pairs.into_iter().filter(|&(_, c)| c > 0) {
            *counts.entry(symbol).or_insert(0) += count;
        }
        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: char) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the input length in symbols.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counts_mixed() {
        let table = FrequencyTable::from_text("aaabbc");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get('a'), Some(3));
        assert_eq!(table.get('b'), Some(2));
        assert_eq!(table.get('c'), Some(1));
        assert_eq!(table.get('z'), None);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_empty_text() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_iter_is_symbol_ordered() {
        let table = FrequencyTable::from_text("zebra");
        let symbols: Vec<char> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec!['a', 'b', 'e', 'r', 'z']);
    }

    #[test]
    fn test_multibyte_symbols_count_once() {
        let table = FrequencyTable::from_text("ééa");
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_from_counts_skips_zero_and_merges() {
        let table = FrequencyTable::from_counts([('x', 0), ('y', 2), ('y', 3)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('y'), Some(5));
    }
}
