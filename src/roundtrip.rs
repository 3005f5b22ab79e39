use serde::Serialize;
use tracing::{debug, error};

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman_codec::HuffmanCodec;
use crate::hufftree::HuffmanTree;

/// Everything one count -> build -> encode -> decode pass produces.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub original: String,
    pub frequencies: FrequencyTable,
    pub tree: Option<HuffmanTree>,
    pub code_table: Option<CodeTable>,
    pub encoded: BitVec,
    pub decoded: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CodeEntry {
    pub symbol: char,
    pub frequency: usize,
    pub code: String,
}

/// Serializable view of a [`RoundTrip`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub original: String,
    pub original_bits: usize,
    pub codes: Vec<CodeEntry>,
    pub encoded: String,
    pub encoded_bits: usize,
    pub compression_ratio: Option<f64>,
    pub decoded: String,
}

/// Counts, builds, encodes and decodes `text`, verifying the decode.
///
/// Empty text is not an error: it yields an empty table, no tree and empty
/// encoded/decoded outputs.
pub fn huffman_roundtrip(text: &str) -> Result<RoundTrip> {
    let frequencies = FrequencyTable::from_text(text);
    if frequencies.is_empty() {
        debug!("empty input, skipping tree construction");
        return Ok(RoundTrip {
            original: String::new(),
            frequencies,
            tree: None,
            code_table: None,
            encoded: BitVec::new(),
            decoded: String::new(),
        });
    }

    let codec = HuffmanCodec::new(HuffmanTree::from_frequencies(&frequencies)?);
    let encoded = codec.encode(text)?;
    let decoded = codec.decode(&encoded)?;

    if decoded != text {
        error!(original = text, decoded = %decoded, "round trip mismatch");
        return Err(HuffmanError::InvariantViolation(
            "decoded text differs from input".to_string(),
        ));
    }

    let (tree, code_table) = codec.into_parts();
    Ok(RoundTrip {
        original: text.to_string(),
        frequencies,
        tree: Some(tree),
        code_table: Some(code_table),
        encoded,
        decoded,
    })
}

impl RoundTrip {
    /// Input size at 8 bits per UTF-8 byte.
    pub fn original_bits(&self) -> usize {
        self.original.len() * 8
    }

    pub fn encoded_bits(&self) -> usize {
        self.encoded.len()
    }

    /// encoded / original, or `None` for empty input.
    pub fn compression_ratio(&self) -> Option<f64> {
        match self.original_bits() {
            0 => None,
            original => Some(self.encoded_bits() as f64 / original as f64),
        }
    }

    pub fn summary(&self) -> Summary {
        let codes = self
            .code_table
            .iter()
            .flat_map(|table| table.iter())
            .map(|(symbol, code)| CodeEntry {
                symbol,
                frequency: self.frequencies.get(symbol).unwrap_or(0),
                code: code.to_string(),
            })
            .collect();

        Summary {
            original: self.original.clone(),
            original_bits: self.original_bits(),
            codes,
            encoded: self.encoded.to_string(),
            encoded_bits: self.encoded_bits(),
            compression_ratio: self.compression_ratio(),
            decoded: self.decoded.clone(),
        }
    }
}
