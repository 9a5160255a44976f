use crate::{StructureError, Transplanter};
use layered_verse::{
    NodeKind, NodeLabels, ReferenceNode, ReferenceTree, ScoreSource, StructureSource, TokenSpan,
};
use layered_verse_align::AlignmentRecord;

fn labels(typ: Option<&str>, rule: Option<&str>, relation: Option<&str>, clause_type: Option<&str>) -> NodeLabels {
    NodeLabels {
        typ: typ.map(str::to_string),
        rule: rule.map(str::to_string),
        relation: relation.map(str::to_string),
        clause_type: clause_type.map(str::to_string),
    }
}

/// clause [0..4] > phrase [0..1] > wg [0..1], clause > phrase [2..4]
fn reference_tree() -> ReferenceTree {
    ReferenceTree::new(vec![
        ReferenceNode::new(NodeKind::Clause, TokenSpan::new(0, 4))
            .with_labels(labels(None, Some("Conj"), None, Some("main"))),
        ReferenceNode::new(NodeKind::Phrase, TokenSpan::new(0, 1))
            .with_parent(0)
            .with_labels(labels(Some("NP"), None, Some("Subj"), None)),
        ReferenceNode::new(NodeKind::WordGroup, TokenSpan::new(0, 1))
            .with_parent(1)
            .with_labels(labels(None, Some("DetNP"), None, None)),
        ReferenceNode::new(NodeKind::Phrase, TokenSpan::new(2, 4))
            .with_parent(0)
            .with_labels(labels(Some("VP"), None, Some("Pred"), None)),
    ])
}

fn identity(len: usize) -> AlignmentRecord {
    AlignmentRecord::from_map((0..len).map(Some).collect(), len).unwrap()
}

#[test]
fn test_bijection_copies_tree() {
    let tree = reference_tree();
    let structure = Transplanter::new().transplant(&tree, &identity(5)).unwrap();

    insta::assert_debug_snapshot!(structure.nodes(), @r###"
    [
        [0..4] clause(main) 1.00 direct,
        [0..1] phrase(NP) 1.00 Subj=1.00 direct ^0,
        [0..1] wg(DetNP) 1.00 direct ^1,
        [2..4] phrase(VP) 1.00 Pred=1.00 direct ^0,
    ]
    "###);

    for (index, node) in structure.nodes().iter().enumerate() {
        assert_eq!(node.confidence, 1.0);
        assert_eq!(node.source, StructureSource::Direct);
        assert_eq!(node.kind, tree.nodes()[index].kind);
        assert_eq!(structure.depth(index), tree.depth(index));
    }
    assert_eq!(structure.get(0).and_then(|n| n.rule.as_deref()), Some("Conj"));

    let relation = structure.get(1).and_then(|n| n.relation.as_ref()).unwrap();
    assert!(relation.is_certain());
    assert_eq!(relation.source, ScoreSource::Transplanted);
}

#[test]
fn test_partial_alignment_is_rejected() {
    let record = AlignmentRecord::from_map(vec![Some(0), None, Some(2)], 3).unwrap();
    let err = Transplanter::new().transplant(&reference_tree(), &record).unwrap_err();
    assert_eq!(
        err,
        StructureError::NotBijective {
            matched: 2,
            target_len: 3,
            reference_len: 3,
        }
    );
}

#[test]
fn test_length_mismatch_is_rejected() {
    let record = AlignmentRecord::from_map(vec![Some(0), Some(1)], 3).unwrap();
    assert!(matches!(
        Transplanter::new().transplant(&reference_tree(), &record),
        Err(StructureError::NotBijective { .. })
    ));
}

#[test]
fn test_unmappable_node_is_skipped_and_parents_renumbered() {
    // the second phrase reaches past the aligned tokens
    let tree = ReferenceTree::new(vec![
        ReferenceNode::new(NodeKind::Clause, TokenSpan::new(0, 1)),
        ReferenceNode::new(NodeKind::Phrase, TokenSpan::new(1, 6)).with_parent(0),
        ReferenceNode::new(NodeKind::Phrase, TokenSpan::new(0, 0)).with_parent(0),
        ReferenceNode::new(NodeKind::WordGroup, TokenSpan::new(2, 3)).with_parent(1),
    ]);
    let structure = Transplanter::new().transplant(&tree, &identity(2)).unwrap();

    insta::assert_debug_snapshot!(structure.nodes(), @r###"
    [
        [0..1] clause 1.00 direct,
        [0..0] phrase 1.00 direct ^0,
    ]
    "###);
}

#[test]
fn test_empty_tree() {
    let structure = Transplanter::new()
        .transplant(&ReferenceTree::default(), &identity(3))
        .unwrap();
    assert!(structure.is_empty());
}
