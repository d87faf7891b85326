//! Document structure extraction -- rebuilds the page/line hierarchy from the
//! flat accumulated block collection and flattens it to ordered text.

use std::collections::HashMap;

use crate::types::{Block, BlockType};

/// Ordered page/line structure reconstructed from one job's blocks.
///
/// Derived, never stored; lives for one extraction call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Document pages in accumulated order
    pub pages: Vec<DocumentPage>,
}

/// One reconstructed page: its line texts in relationship order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentPage {
    /// Ordered line texts of this page
    pub lines: Vec<String>,
}

impl ExtractedDocument {
    /// Total number of lines across all pages
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Flatten to the artifact body: every line of every page, page order
    /// then line order, joined with a single newline. Zero lines yields the
    /// empty string.
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reconstruct the page/line hierarchy from an accumulated block collection.
///
/// PAGE blocks, in accumulated order, become document pages; each page's
/// child LINE blocks, in relationship order, become its lines. A LINE's text
/// is its own `Text` when present, otherwise its child WORD texts joined with
/// single spaces. Unknown block types and dangling child ids are skipped.
/// Pure and deterministic: the same input always yields the same document.
pub fn extract_document(blocks: &[Block]) -> ExtractedDocument {
    let by_id: HashMap<&str, &Block> = blocks.iter().map(|b| (b.id.as_str(), b)).collect();

    let pages = blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Page)
        .map(|page| DocumentPage {
            lines: page
                .child_ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()))
                .filter(|child| child.block_type == BlockType::Line)
                .filter_map(|line| line_text(line, &by_id))
                .collect(),
        })
        .collect();

    ExtractedDocument { pages }
}

/// Text of one LINE block: pre-joined text when the service provided it,
/// otherwise the child WORD texts joined with spaces. A line with neither
/// yields nothing.
fn line_text(line: &Block, by_id: &HashMap<&str, &Block>) -> Option<String> {
    if let Some(text) = &line.text {
        return Some(text.clone());
    }

    let words: Vec<&str> = line
        .child_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .filter(|child| child.block_type == BlockType::Word)
        .filter_map(|word| word.text.as_deref())
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
