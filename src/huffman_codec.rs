use tracing::{debug, trace};

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// A tree together with the code table derived from it. Encoding and decoding
/// always go through the same tree instance.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = CodeTable::from_tree(&tree);
        HuffmanCodec { tree, encode_table }
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn into_parts(self) -> (HuffmanTree, CodeTable) {
        (self.tree, self.encode_table)
    }

    pub fn encode(&self, text: &str) -> Result<BitVec> {
        let mut bit_vec = BitVec::with_capacity(text.len() * self.encode_table.max_code_length());
        for symbol in text.chars() {
            let code = self
                .encode_table
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol(symbol))?;
            bit_vec.extend_from(code);
        }
        debug!(symbols = text.chars().count(), bits = bit_vec.len(), "encoded text");
        Ok(bit_vec)
    }

    pub fn decode(&self, bits: &BitVec) -> Result<String> {
        let decoded = match self.tree.root() {
            HuffNode::Leaf { symbol, weight } => Self::decode_single_leaf(*symbol, *weight, bits)?,
            root @ HuffNode::Internal { .. } => Self::decode_walk(root, bits)?,
        };
        debug!(bits = bits.len(), symbols = decoded.chars().count(), "decoded bit-string");
        Ok(decoded)
    }

    /// Every symbol encodes to "1", so the content carries no structure: replay
    /// the leaf `weight` times once the string is confirmed to be exactly that.
    fn decode_single_leaf(symbol: char, weight: usize, bits: &BitVec) -> Result<String> {
        if bits.len() != weight {
            return Err(HuffmanError::MalformedInput {
                position: bits.len().min(weight),
                reason: format!("expected {} bits for single-symbol tree, got {}", weight, bits.len()),
            });
        }
        if let Some(position) = bits.iter().position(|bit| !bit) {
            return Err(HuffmanError::MalformedInput {
                position,
                reason: "single-symbol tree only emits '1' bits".to_string(),
            });
        }
        Ok(std::iter::repeat(symbol).take(weight).collect())
    }

    fn decode_walk(root: &HuffNode, bits: &BitVec) -> Result<String> {
        let mut result = String::new();
        let mut bit_index = 0;
        let mut current_node = root;

        loop {
            match current_node {
                HuffNode::Leaf { symbol, .. } => {
                    trace!(symbol = ?symbol, bit_index, "emitting symbol");
                    result.push(*symbol);
                    if bit_index == bits.len() {
                        break;
                    }
                    current_node = root;
                }
                HuffNode::Internal { left, right, .. } => {
                    let Some(bit) = bits.get(bit_index) else {
                        // also reached for an empty string: nothing was ever emitted
                        if bit_index == 0 {
                            break;
                        }
                        return Err(HuffmanError::MalformedInput {
                            position: bit_index,
                            reason: "ran out of bits mid-code".to_string(),
                        });
                    };
                    bit_index += 1;
                    current_node = if bit { right.as_ref() } else { left.as_ref() };
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn codec(text: &str) -> HuffmanCodec {
        HuffmanCodec::new(HuffmanTree::from_text(text).unwrap().unwrap())
    }

    #[test]
    fn test_single_symbol_roundtrip() {
        let codec = codec("aaaa");
        let encoded = codec.encode("aaaa").unwrap();
        assert_eq!(encoded.to_string(), "1111");
        assert_eq!(codec.decode(&encoded).unwrap(), "aaaa");
    }

    #[test]
    fn test_single_symbol_rejects_wrong_length_or_zero() {
        let codec = codec("aaaa");
        assert!(matches!(
            codec.decode(&"111".parse().unwrap()),
            Err(HuffmanError::MalformedInput { .. })
        ));
        assert!(matches!(
            codec.decode(&"1101".parse().unwrap()),
            Err(HuffmanError::MalformedInput { position: 2, .. })
        ));
    }

    #[test]
    fn test_mixed_roundtrip() {
        let codec = codec("aaabbc");
        let encoded = codec.encode("aaabbc").unwrap();
        assert_eq!(encoded.to_string(), "000111110");
        assert_eq!(codec.decode(&encoded).unwrap(), "aaabbc");
    }

    #[test]
    fn test_encode_other_text_with_same_codec() {
        let codec = codec("aaabbc");
        let encoded = codec.encode("cab").unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), "cab");
    }

    #[test]
    fn test_unknown_symbol() {
        let codec = codec("aaabbc");
        assert!(matches!(codec.encode("abz"), Err(HuffmanError::UnknownSymbol('z'))));
    }

    #[test]
    fn test_truncated_code_is_malformed() {
        // 'c' is "10"; cut the final bit
        let codec = codec("aaabbc");
        match codec.decode(&"0001".parse().unwrap()) {
            Err(HuffmanError::MalformedInput { position, .. }) => assert_eq!(position, 4),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_bits_decode_to_empty() {
        let pair = codec("ab");
        assert_eq!(pair.decode(&BitVec::new()).unwrap(), "");
        assert!(codec("a").decode(&BitVec::new()).is_err());
    }
}
