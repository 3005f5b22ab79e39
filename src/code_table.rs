use std::collections::HashMap;

use tracing::debug;

use crate::bit_vec::BitVec;
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Symbol -> root path bits ('0' left, '1' right).
///
/// Entries keep the depth-first, left-before-right order they were discovered
/// in, which is the order any listing of the table uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<(char, BitVec)>,
    index: HashMap<char, usize>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut entries = Vec::new();

        if let HuffNode::Leaf { symbol, .. } = tree.root() {
            // root-to-itself path is empty; "1" by convention
            entries.push((*symbol, BitVec::from_iter([true])));
        } else {
            let mut stack: Vec<(&HuffNode, BitVec)> = vec![(tree.root(), BitVec::new())];
            while let Some((node, path)) = stack.pop() {
                match node {
                    HuffNode::Leaf { symbol, .. } => entries.push((*symbol, path)),
                    HuffNode::Internal { left, right, .. } => {
                        let mut right_path = path.clone();
                        right_path.push_bit(true);
                        let mut left_path = path;
                        left_path.push_bit(false);

                        stack.push((right.as_ref(), right_path));
                        stack.push((left.as_ref(), left_path));
                    }
                }
            }
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (symbol, _))| (*symbol, i))
            .collect();
        let table = CodeTable { entries, index };

        debug!(
            symbols = table.len(),
            max_code_length = table.max_code_length(),
            "generated code table"
        );
        debug_assert!(table.is_prefix_free());
        table
    }

    pub fn get(&self, symbol: char) -> Option<&BitVec> {
        self.index.get(&symbol).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &BitVec)> + '_ {
        self.entries.iter().map(|(symbol, code)| (*symbol, code))
    }

    pub fn max_code_length(&self) -> usize {
        self.entries.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// No code is a prefix of another. Quadratic; meant for checks, not hot paths.
    pub fn is_prefix_free(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, (_, a))| {
            self.entries
                .iter()
                .enumerate()
                .all(|(j, (_, b))| i == j || !a.is_prefix_of(b))
        })
    }

    /// Bits needed to encode a text with these frequencies.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, BitVec::len))
            .sum()
    }
}
