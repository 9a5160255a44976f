use super::Verse;
use crate::structure::{NodeKind, VerseStructure};
use crate::span::TokenSpan;
use std::collections::HashMap;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ...
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

struct IncludedNode {
    /// Index in the structure the node came from
    index: usize,
    span: TokenSpan,
    label: String,
    parent: Option<usize>,
    show_parent: bool,
}

/// Renders a verse with the spans of its structure nodes underneath.
///
/// ```text
/// εν  αρχη  ην  ο  λογοσ.
/// ╰──────────────────────╯clause(main) 0.95
/// ╰─────╯phrase(PP) 0.90
/// ```
pub struct VerseDisplay<'a> {
    verse: &'a Verse,
    include_nodes: Vec<IncludedNode>,
}

// 0,  1,     2,   3,  4       - token positions
// εν  αρχη  ην  ο  λογοσ.
// ╰──────────────────────╯[A] clause(main) 0.95
//               ╰──────╯phrase(NP) 0.85 Subj=0.75
//                 └─parent─>[A]
impl<'a> std::fmt::Display for VerseDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();
        let mut opening_line = String::new();
        for (i, token) in self.verse.tokens().iter().enumerate() {
            if i > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(token.surface());
            opening_line.push_str(token.after().trim());
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        let node_labels = self.build_node_labels();

        for node in self.include_nodes.iter() {
            let (Some(&start_char_idx), Some(&end_char_idx)) = (
                token_idx_to_start_display_char_idx.get(node.span.start),
                token_idx_to_end_display_char_idx.get(node.span.end),
            ) else {
                continue;
            };

            f.write_char('\n')?;
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }
            if char_len > 1 {
                f.write_char('╯')?;
            }

            if let Some(label) = node_labels.get(&node.index) {
                write!(f, "{} ", label)?;
            }
            f.write_str(&node.label)?;

            if let (true, Some(parent)) = (node.show_parent, node.parent) {
                f.write_char('\n')?;
                for _ in 0..start_char_idx + 2 {
                    f.write_char(' ')?;
                }
                let target = match node_labels.get(&parent) {
                    Some(label) => label.clone(),
                    None => "[?]".to_string(),
                };
                write!(f, "└─parent─>{}", target)?;
            }
        }

        Ok(())
    }
}

impl<'a> VerseDisplay<'a> {
    pub fn new(verse: &'a Verse) -> Self {
        VerseDisplay {
            verse,
            include_nodes: Vec::new(),
        }
    }

    /// Labels like "[A]", "[B]" for included nodes that are a parent of
    /// another included node, ordered by span then index.
    fn build_node_labels(&self) -> HashMap<usize, String> {
        let included: HashMap<usize, TokenSpan> = self
            .include_nodes
            .iter()
            .map(|node| (node.index, node.span))
            .collect();

        let mut targets: Vec<(TokenSpan, usize)> = self
            .include_nodes
            .iter()
            .filter(|node| node.show_parent)
            .filter_map(|node| node.parent)
            .filter_map(|parent| included.get(&parent).map(|span| (*span, parent)))
            .collect();
        targets.sort();
        targets.dedup();

        targets
            .into_iter()
            .enumerate()
            .map(|(i, (_, index))| (index, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    fn include_where(
        &mut self,
        structure: &VerseStructure,
        show_parent: bool,
        keep: impl Fn(NodeKind) -> bool,
    ) {
        for (index, node) in structure.nodes().iter().enumerate() {
            if !keep(node.kind) {
                continue;
            }
            self.include_nodes.push(IncludedNode {
                index,
                span: node.span,
                label: node.label(),
                parent: node.parent,
                show_parent,
            });
        }
    }

    /// Include every node of the structure, in structure order.
    pub fn include_structure(&mut self, structure: &VerseStructure) {
        self.include_where(structure, false, |_| true);
    }

    /// Include only nodes of one kind.
    pub fn include_kind(&mut self, structure: &VerseStructure, kind: NodeKind) {
        self.include_where(structure, false, |k| k == kind);
    }

    /// Include every node along with an arrow to its parent.
    pub fn include_with_parents(&mut self, structure: &VerseStructure) {
        self.include_where(structure, true, |_| true);
    }

    /// Takes self
    pub fn with_structure(mut self, structure: &VerseStructure) -> Self {
        self.include_structure(structure);
        self
    }

    /// Takes self
    pub fn with_kind(mut self, structure: &VerseStructure, kind: NodeKind) -> Self {
        self.include_kind(structure, kind);
        self
    }

    /// Takes self, renders parent arrows
    pub fn with_parents(mut self, structure: &VerseStructure) -> Self {
        self.include_with_parents(structure);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_base26_label() {
        assert_eq!(index_to_base26_label(0), "A");
        assert_eq!(index_to_base26_label(25), "Z");
        assert_eq!(index_to_base26_label(26), "AA");
        assert_eq!(index_to_base26_label(51), "AZ");
        assert_eq!(index_to_base26_label(702), "AAA");
    }
}
