use crate::errors::{StructureError, StructureResult};
use layered_verse::{ReferenceTree, Scored, StructureNode, StructureSource, TokenSpan, VerseStructure};
use layered_verse_align::AlignmentRecord;

/// Copies the reference tree onto the target verse through an exact
/// alignment.
///
/// Node kinds, labels and parent links are kept as they are; spans are
/// renumbered through the alignment. Every copied node has confidence `1.0`
/// and source [`StructureSource::Direct`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Transplanter;

impl Transplanter {
    pub fn new() -> Self {
        Transplanter
    }

    /// Fails with [`StructureError::NotBijective`] unless the alignment is a
    /// strict order-preserving bijection.
    pub fn transplant(&self, tree: &ReferenceTree, record: &AlignmentRecord) -> StructureResult<VerseStructure> {
        if !record.is_bijection() {
            return Err(StructureError::NotBijective {
                matched: record.matched_count(),
                target_len: record.target_len(),
                reference_len: record.reference_len(),
            });
        }

        let reverse = record.reverse_map();
        let mut index_map: Vec<Option<usize>> = vec![None; tree.len()];
        let mut copied: Vec<(usize, StructureNode)> = Vec::with_capacity(tree.len());

        for (reference_index, node) in tree.nodes().iter().enumerate() {
            let mapped: Option<Vec<usize>> = node
                .span
                .positions()
                .map(|r| reverse.get(r).copied().flatten())
                .collect();
            let Some(span) = mapped.as_deref().and_then(TokenSpan::from_positions) else {
                tracing::warn!(
                    node = reference_index,
                    span = %node.span,
                    "reference node does not map onto target tokens; skipped"
                );
                continue;
            };

            let labels = &node.labels;
            let mut target = StructureNode::new(node.kind, span, 1.0, StructureSource::Direct);
            target.typ = labels.typ.clone();
            target.rule = labels.rule.clone();
            target.clause_type = labels.clause_type.clone();
            target.relation = labels.relation.clone().map(Scored::transplanted);

            index_map[reference_index] = Some(copied.len());
            copied.push((reference_index, target));
        }

        let nodes = copied
            .into_iter()
            .map(|(reference_index, mut target)| {
                target.parent = tree.nodes()[reference_index]
                    .parent
                    .and_then(|parent| index_map.get(parent).copied().flatten());
                target
            })
            .collect();

        Ok(VerseStructure::from_nodes(nodes))
    }
}
