use std::cmp::Ordering;
use std::fmt::Write;

use tracing::{debug, error, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::{HeapErr, MinHeap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: char,
    },
    Internal {
        weight: usize,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: char, weight: usize) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// `a` was extracted first and becomes the left ('0') child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry: ordered by weight, then by arrival so equal weights leave the
/// queue first-in-first-out.
#[derive(Debug)]
struct Queued {
    arrival: u64,
    node: HuffNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .weight()
            .cmp(&other.node.weight())
            .then(self.arrival.cmp(&other.arrival))
    }
}

/// Which edge led to a node during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Root,
    Left,
    Right,
}

/// One step of a depth-first, left-before-right walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a HuffNode,
    pub depth: usize,
    pub side: Side,
}

/// Pre-order walk driven by an explicit stack, so tree height never touches
/// the call stack.
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        if let HuffNode::Internal { left, right, .. } = visit.node {
            // right first so left pops first
            self.stack.push(Visit {
                node: right,
                depth: visit.depth + 1,
                side: Side::Right,
            });
            self.stack.push(Visit {
                node: left,
                depth: visit.depth + 1,
                side: Side::Left,
            });
        }
        Some(visit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree for `text`, or `None` when there is nothing to code.
    pub fn from_text(text: &str) -> Result<Option<Self>> {
        let frequencies = FrequencyTable::from_text(text);
        if frequencies.is_empty() {
            return Ok(None);
        }
        HuffmanTree::from_frequencies(&frequencies).map(Some)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let seeds: Vec<Queued> = frequencies
            .iter()
            .enumerate()
            .map(|(arrival, (symbol, count))| Queued {
                arrival: arrival as u64,
                node: HuffNode::new(symbol, count),
            })
            .collect();
        let next_arrival = seeds.len() as u64;

        let heap = MinHeap::build(seeds);
        let tree = HuffmanTree::build_from_heap(heap, next_arrival).map_err(|e| {
            error!(error = %e, "heap failure while building huffman tree");
            HuffmanError::InvariantViolation(format!("tree construction failed: {e}"))
        })?;

        debug!(
            leaves = frequencies.len(),
            height = tree.height(),
            weight = tree.total_weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    fn build_from_heap(mut heap: MinHeap<Queued>, mut next_arrival: u64) -> std::result::Result<Self, HeapErr> {
        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            trace!(left = x.node.weight(), right = y.node.weight(), "merging nodes");

            heap.insert(Queued {
                arrival: next_arrival,
                node: HuffNode::merge(x.node, y.node),
            });
            next_arrival += 1;
        }

        let root = heap.into_single()?.node;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Degenerate tree of a one-symbol alphabet.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Visit {
                node: &self.root,
                depth: 0,
                side: Side::Root,
            }],
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.walk().filter(|v| v.node.is_leaf()).count()
    }

    /// Edges on the longest root-to-leaf path; 0 for a single leaf.
    pub fn height(&self) -> usize {
        self.walk().map(|v| v.depth).max().unwrap_or(0)
    }

    pub fn total_weight(&self) -> usize {
        self.root.weight()
    }

    /// Sum over leaves of `depth * weight`, the quantity Huffman minimises.
    pub fn weighted_path_length(&self) -> usize {
        self.walk()
            .filter(|v| v.node.is_leaf())
            .map(|v| v.depth * v.node.weight())
            .sum()
    }

    pub fn render_structure(&self) -> String {
        let mut out = String::from("Huffman Tree Structure:\n");
        for visit in self.walk() {
            let indent = "  ".repeat(visit.depth);
            let label = match visit.side {
                Side::Root => "root",
                Side::Left => "L",
                Side::Right => "R",
            };
            // writing to a String cannot fail
            let _ = match visit.node {
                HuffNode::Leaf { symbol, weight } => writeln!(
                    out,
                    "{}{}-> Leaf: {:?} [weight: {}]",
                    indent, label, symbol, weight
                ),
                HuffNode::Internal { weight, .. } => {
                    writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight)
                }
            };
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf_depths(tree: &HuffmanTree) -> Vec<(char, usize)> {
        let mut depths: Vec<(char, usize)> = tree
            .walk()
            .filter_map(|v| match v.node {
                HuffNode::Leaf { symbol, .. } => Some((*symbol, v.depth)),
                _ => None,
            })
            .collect();
        depths.sort();
        depths
    }

    #[test]
    fn test_single_symbol_is_bare_leaf() {
        let tree = HuffmanTree::from_text("aaaa").unwrap().unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.root(), &HuffNode::new('a', 4));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.weighted_path_length(), 0);
    }

    #[test]
    fn test_empty_text_builds_nothing() {
        assert!(HuffmanTree::from_text("").unwrap().is_none());
        assert!(matches!(
            HuffmanTree::from_frequencies(&FrequencyTable::default()),
            Err(HuffmanError::EmptyInput)
        ));
    }

    #[test]
    fn test_mixed_frequencies() {
        // c:1 + b:2 merge first, then a:3 joins the weight-3 subtree
        let tree = HuffmanTree::from_text("aaabbc").unwrap().unwrap();
        assert_eq!(tree.total_weight(), 6);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(leaf_depths(&tree), vec![('a', 1), ('b', 2), ('c', 2)]);
        assert_eq!(tree.weighted_path_length(), 3 + 4 + 2);
    }

    #[test]
    fn test_internal_weight_is_sum_of_children() {
        let tree = HuffmanTree::from_text("the quick brown fox jumps over the lazy dog").unwrap().unwrap();
        for visit in tree.walk() {
            if let HuffNode::Internal { weight, left, right } = visit.node {
                assert_eq!(*weight, left.weight() + right.weight());
            }
        }
    }

    #[test]
    fn test_equal_weights_tie_break_fifo() {
        // all weight 1; a,b merge first, then c,d, then the two pairs
        let tree = HuffmanTree::from_text("abcd").unwrap().unwrap();
        let symbols: Vec<char> = tree
            .walk()
            .filter_map(|v| match v.node {
                HuffNode::Leaf { symbol, .. } => Some(*symbol),
                _ => None,
            })
            .collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'd']);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let text = "abracadabra alakazam";
        let first = HuffmanTree::from_text(text).unwrap();
        let second = HuffmanTree::from_text(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_skewed_weights_deep_tree() {
        // fibonacci weights produce a maximally unbalanced tree
        let fib = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];
        let frequencies =
            FrequencyTable::from_counts(fib.iter().enumerate().map(|(i, &w)| ((b'a' + i as u8) as char, w)));
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        assert_eq!(tree.height(), fib.len() - 1);
    }

    #[test]
    fn test_render_structure() {
        let tree = HuffmanTree::from_text("aab").unwrap().unwrap();
        let rendered = tree.render_structure();
        assert_eq!(
            rendered,
            "Huffman Tree Structure:\n\
             root-> Internal [weight: 3]\n\
             \x20 L-> Leaf: 'b' [weight: 1]\n\
             \x20 R-> Leaf: 'a' [weight: 2]\n"
        );
    }
}
