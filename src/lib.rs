//! # huffman_text
//!
//! Builds a prefix-free binary code for the characters of a text and uses it
//! to turn the text into a bit sequence and back.
//!
//! ```rust
//! use huffman_text::{analyze, build_huffman_tree, decode, encode};
//!
//! let text = "aabbbc";
//! let frequencies = analyze(text)?;
//! let tree = build_huffman_tree(&frequencies)?;
//! let bits = encode(&tree, tree.leaves(), text)?;
//! assert_eq!(decode(&tree, &bits)?, text);
//! # Ok::<(), huffman_text::CodingError>(())
//! ```

pub mod coder;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod min_heap;

use log::debug;

pub use coder::{bits_to_string, build_code_table, code_for, decode, encode, parse_bits, CodeTable};
pub use error::{CodingError, Result};
pub use frequency::{analyze, entropy_from_freq, FrequencyTable};
pub use huffman::{build_huffman_tree, HuffmanTree, LeafIndex, Node, NodeId};
pub use min_heap::MinHeap;

/// Everything one run of the pipeline produces for a text.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    pub bits: Vec<bool>,
    pub decoded: String,
}

impl Compressed {
    /// Encoded bits per input character.
    pub fn average_code_length(&self) -> f64 {
        self.bits.len() as f64 / self.frequencies.total() as f64
    }
}

/// Runs analysis, tree building, encoding and decoding over `text`.
pub fn compress_text(text: &str) -> Result<Compressed> {
    let frequencies = analyze(text)?;
    let tree = build_huffman_tree(&frequencies)?;
    debug!("Tree invariants hold: {}", tree.check_invariants());

    let codes = build_code_table(&tree)?;
    let bits = encode(&tree, tree.leaves(), text)?;
    let decoded = decode(&tree, &bits)?;

    Ok(Compressed {
        frequencies,
        tree,
        codes,
        bits,
        decoded,
    })
}
