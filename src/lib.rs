//! # huffman_roundtrip
//!
//! Builds a Huffman code for the characters of a text, encodes the text into a
//! logical bit-string and decodes it back with the same tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_roundtrip::huffman_roundtrip;
//!
//! let rt = huffman_roundtrip("aaabbc")?;
//! assert_eq!(rt.decoded, "aaabbc");
//! assert_eq!(rt.encoded_bits(), 9);
//!
//! for (symbol, code) in rt.code_table.iter().flat_map(|t| t.iter()) {
//!     println!("{symbol:?} {code}");
//! }
//! # Ok::<(), huffman_roundtrip::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod code_table;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod roundtrip;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use roundtrip::{huffman_roundtrip, RoundTrip, Summary};
