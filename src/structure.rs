//! Clause, phrase and word-group nodes.
//!
//! Nodes of one verse live in a [`VerseStructure`] arena and point at their
//! parent by index. Spans are in verse-local token positions; global ids are
//! only assigned when verses are merged into a node graph.

use crate::scored::Scored;
use crate::span::TokenSpan;
use crate::verse::Verse;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "clause")]
    Clause,
    #[serde(rename = "phrase")]
    Phrase,
    #[serde(rename = "wg")]
    WordGroup,
}

impl NodeKind {
    pub fn code(&self) -> &'static str {
        match self {
            NodeKind::Clause => "clause",
            NodeKind::Phrase => "phrase",
            NodeKind::WordGroup => "wg",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Provenance of a structure node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureSource {
    /// Copied from the reference tree through an exact alignment
    Direct,
    /// Partially matched verse
    Inferred,
    /// Built by heuristic rules from token tags
    Generated,
}

impl StructureSource {
    pub fn code(&self) -> &'static str {
        match self {
            StructureSource::Direct => "direct",
            StructureSource::Inferred => "inferred",
            StructureSource::Generated => "generated",
        }
    }
}

/// Free-form labels carried by reference nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLabels {
    /// Phrase or word-group type, e.g. `NP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Syntactic function, e.g. `Subj`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<String>,
}

/// One node of the reference corpus tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceNode {
    pub kind: NodeKind,
    pub span: TokenSpan,
    /// Index of the parent node within the same tree
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub labels: NodeLabels,
}

impl ReferenceNode {
    pub fn new(kind: NodeKind, span: TokenSpan) -> Self {
        Self {
            kind,
            span,
            parent: None,
            labels: NodeLabels::default(),
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_labels(mut self, labels: NodeLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// The structure of one reference verse. Read-only once built.
///
/// The tree is taken as given: nothing here checks that parent pointers are
/// in range or acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTree {
    nodes: Vec<ReferenceNode>,
}

impl ReferenceTree {
    pub fn new(nodes: Vec<ReferenceNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ReferenceNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of ancestors of a node, or `None` for a bad index or a cycle.
    pub fn depth(&self, index: usize) -> Option<usize> {
        depth_of(index, self.nodes.len(), |i| self.nodes.get(i).map(|n| n.parent))
    }
}

/// A reference verse: its tagged tokens and its tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceVerse {
    pub verse: Verse,
    pub tree: ReferenceTree,
}

impl ReferenceVerse {
    pub fn new(verse: Verse, tree: ReferenceTree) -> Self {
        Self { verse, tree }
    }
}

/// A clause, phrase or word group over a contiguous run of target tokens.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    pub kind: NodeKind,
    pub span: TokenSpan,
    /// Index of the parent node within the same [`VerseStructure`]
    pub parent: Option<usize>,
    pub typ: Option<String>,
    pub rule: Option<String>,
    pub clause_type: Option<String>,
    pub relation: Option<Scored<String>>,
    pub confidence: f64,
    pub source: StructureSource,
}

impl StructureNode {
    pub fn new(kind: NodeKind, span: TokenSpan, confidence: f64, source: StructureSource) -> Self {
        Self {
            kind,
            span,
            parent: None,
            typ: None,
            rule: None,
            clause_type: None,
            relation: None,
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.typ = Some(typ.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_clause_type(mut self, clause_type: impl Into<String>) -> Self {
        self.clause_type = Some(clause_type.into());
        self
    }

    pub fn with_relation(mut self, relation: Scored<String>) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Compact one-line description, e.g. `phrase(NP) 0.85 Subj=0.75`.
    pub fn label(&self) -> String {
        let descriptor = match self.kind {
            NodeKind::Clause => self.clause_type.as_ref().or(self.typ.as_ref()),
            NodeKind::Phrase => self.typ.as_ref().or(self.rule.as_ref()),
            NodeKind::WordGroup => self.rule.as_ref().or(self.typ.as_ref()),
        };
        let mut label = match descriptor {
            Some(d) => format!("{}({}) {:.2}", self.kind.code(), d, self.confidence),
            None => format!("{} {:.2}", self.kind.code(), self.confidence),
        };
        if let Some(relation) = &self.relation {
            label.push_str(&format!(" {}={:.2}", relation.value, relation.confidence));
        }
        label
    }
}

impl fmt::Debug for StructureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.span, self.label(), self.source.code())?;
        if let Some(parent) = self.parent {
            write!(f, " ^{}", parent)?;
        }
        Ok(())
    }
}

/// All structure nodes of one target verse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerseStructure {
    nodes: Vec<StructureNode>,
}

impl VerseStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap nodes whose parent indices already refer to this list.
    pub fn from_nodes(nodes: Vec<StructureNode>) -> Self {
        Self { nodes }
    }

    /// Append a node and return its index.
    pub fn push(&mut self, node: StructureNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[StructureNode] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&StructureNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indices of the direct children of `index`, in insertion order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == Some(index))
            .map(|(i, _)| i)
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &StructureNode> + '_ {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// Number of ancestors of a node, or `None` for a bad index or a cycle.
    pub fn depth(&self, index: usize) -> Option<usize> {
        depth_of(index, self.nodes.len(), |i| self.nodes.get(i).map(|n| n.parent))
    }
}

fn depth_of(index: usize, len: usize, parent_of: impl Fn(usize) -> Option<Option<usize>>) -> Option<usize> {
    let mut current = parent_of(index)?;
    let mut depth = 0;
    while let Some(parent) = current {
        depth += 1;
        if depth > len {
            return None;
        }
        current = parent_of(parent)?;
    }
    Some(depth)
}
