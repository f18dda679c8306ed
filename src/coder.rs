//! Turning text into bits and back.
//!
//! A `true` bit selects the left child, `false` the right one. A tree made of
//! a single leaf has no branches, so each occurrence of its character is
//! written as one placeholder `1` bit and every bit read back yields that
//! character.

use std::collections::HashMap;

use log::{debug, error, trace};

use crate::error::{CodingError, Result};
use crate::huffman::{HuffmanTree, LeafIndex, Node, NodeId};

/// Printable code per character, e.g. `'a' => "01"`.
pub type CodeTable = HashMap<char, String>;

/// Bit emitted per character when the root itself is a leaf.
pub const SINGLE_LEAF_PLACEHOLDER: bool = true;

/// Root-to-leaf path of `leaf`, found by climbing parent links and reversing.
/// The root's own code is empty.
pub fn code_for(tree: &HuffmanTree, leaf: NodeId) -> Vec<bool> {
    let mut code = Vec::new();
    let mut current = leaf;

    while let Some(parent) = tree.node(current).and_then(Node::parent) {
        let is_left = matches!(
            tree.node(parent),
            Some(Node::Internal { left, .. }) if *left == current
        );
        code.push(is_left);
        current = parent;
    }

    code.reverse();
    code
}

/// Looks up the leaf for `character`, rejecting ids that do not name a leaf
/// carrying that character in this tree.
fn leaf_code(tree: &HuffmanTree, leaves: &LeafIndex, character: char) -> Result<Vec<bool>> {
    let id = *leaves
        .get(&character)
        .ok_or(CodingError::UnknownCharacter(character))?;

    match tree.node(id) {
        Some(Node::Leaf { character: c, .. }) if *c == character => {
            if tree.is_single_leaf() {
                Ok(vec![SINGLE_LEAF_PLACEHOLDER])
            } else {
                Ok(code_for(tree, id))
            }
        }
        _ => Err(CodingError::UnknownCharacter(character)),
    }
}

pub fn build_code_table(tree: &HuffmanTree) -> Result<CodeTable> {
    let mut table = CodeTable::with_capacity(tree.leaves().len());
    for &character in tree.leaves().keys() {
        let code = bits_to_string(&leaf_code(tree, tree.leaves(), character)?);
        trace!("Assigning code to {:?} : '{}'", character, code);
        table.insert(character, code);
    }
    Ok(table)
}

/// Concatenates the code of every character of `text`, in text order.
pub fn encode(tree: &HuffmanTree, leaves: &LeafIndex, text: &str) -> Result<Vec<bool>> {
    debug!("Starting text encoding...");

    let mut cache: HashMap<char, Vec<bool>> = HashMap::new();
    let mut bits = Vec::new();

    for character in text.chars() {
        if let Some(code) = cache.get(&character) {
            bits.extend_from_slice(code);
            continue;
        }
        let code = leaf_code(tree, leaves, character).inspect_err(|e| {
            error!("Symbol {:?} found in text but not in code map: {}", character, e);
        })?;
        bits.extend_from_slice(&code);
        cache.insert(character, code);
    }

    debug!("Encoded {} characters into {} bits.", text.chars().count(), bits.len());
    Ok(bits)
}

/// Walks the tree from the root for each character until `bits` runs out.
pub fn decode(tree: &HuffmanTree, bits: &[bool]) -> Result<String> {
    debug!("Starting bitstream decoding of {} bits...", bits.len());

    if let Node::Leaf { character, .. } = tree.root_node() {
        return Ok(std::iter::repeat_n(*character, bits.len()).collect());
    }

    let mut result = String::new();
    let mut current = tree.root();

    for (consumed, &bit) in bits.iter().enumerate() {
        let Some((left, right)) = tree.node(current).and_then(Node::children) else {
            unreachable!("decoding restarts at the root after every leaf");
        };
        current = if bit { left } else { right };

        if let Some(Node::Leaf { character, .. }) = tree.node(current) {
            trace!("Decoded {:?} after {} bits.", character, consumed + 1);
            result.push(*character);
            current = tree.root();
        }
    }

    if current != tree.root() {
        error!("Bitstream ended inside a code.");
        return Err(CodingError::TruncatedStream {
            consumed: bits.len(),
        });
    }

    debug!("Final decoded text size: {} characters.", result.chars().count());
    Ok(result)
}

pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

pub fn parse_bits(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .map(|c| match c {
            '1' => Ok(true),
            '0' => Ok(false),
            other => Err(CodingError::InvalidBit(other)),
        })
        .collect()
}
