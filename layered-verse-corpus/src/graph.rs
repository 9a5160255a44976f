//! Unified node graph with corpus-wide ids.
//!
//! Ids start at 1 and every node type owns one contiguous range, allocated in
//! this order: word slots, verses, chapters, books, clauses, phrases, word
//! groups. Within a range, nodes follow corpus order. The only writer is
//! [`NodeGraphBuilder::build`], which runs after all verses are processed.

use crate::errors::{PipelineError, PipelineResult};
use crate::pipeline::VerseOutcome;
use layered_verse::{NodeKind, PartOfSpeech, StructureNode, StructureSource, VerseRef};
use layered_verse_align::AlignmentClass;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "word")]
    Word,
    #[serde(rename = "verse")]
    Verse,
    #[serde(rename = "chapter")]
    Chapter,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "clause")]
    Clause,
    #[serde(rename = "phrase")]
    Phrase,
    #[serde(rename = "wg")]
    WordGroup,
}

impl NodeType {
    /// Id allocation order.
    pub const ALL: [NodeType; 7] = [
        NodeType::Word,
        NodeType::Verse,
        NodeType::Chapter,
        NodeType::Book,
        NodeType::Clause,
        NodeType::Phrase,
        NodeType::WordGroup,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            NodeType::Word => "word",
            NodeType::Verse => "verse",
            NodeType::Chapter => "chapter",
            NodeType::Book => "book",
            NodeType::Clause => "clause",
            NodeType::Phrase => "phrase",
            NodeType::WordGroup => "wg",
        }
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, NodeType::Clause | NodeType::Phrase | NodeType::WordGroup)
    }
}

impl From<NodeKind> for NodeType {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Clause => NodeType::Clause,
            NodeKind::Phrase => NodeType::Phrase,
            NodeKind::WordGroup => NodeType::WordGroup,
        }
    }
}

/// Per-type features. Only the fields that apply to a node's type are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<PartOfSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_source: Option<StructureSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub node_type: NodeType,
    pub parent: Option<NodeId>,
    /// First and last word slot covered, inclusive. `None` for containers
    /// without words.
    pub slots: Option<(NodeId, NodeId)>,
    /// Owning verse; `None` for chapters and books.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<VerseRef>,
    #[serde(default)]
    pub features: NodeFeatures,
}

impl GraphNode {
    fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            parent: None,
            slots: None,
            verse: None,
            features: NodeFeatures::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: Vec<GraphNode>,
}

impl NodeGraph {
    /// Nodes are expected in id order.
    pub fn from_nodes(nodes: Vec<GraphNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        match id.checked_sub(1).and_then(|i| self.nodes.get(i)) {
            Some(node) if node.id == id => Some(node),
            _ => self.nodes.iter().find(|n| n.id == id),
        }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.iter().filter(move |n| n.parent == Some(id))
    }

    pub fn of_type(&self, node_type: NodeType) -> impl Iterator<Item = &GraphNode> + '_ {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Id range owned by a node type, or `None` if it has no nodes.
    pub fn range(&self, node_type: NodeType) -> Option<RangeInclusive<NodeId>> {
        let mut ids = self.of_type(node_type).map(|n| n.id);
        let first = ids.next()?;
        let last = ids.last().unwrap_or(first);
        Some(first..=last)
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::Export { message: e.to_string() })
    }

    pub fn write_json(&self, path: &Path) -> PipelineResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| PipelineError::Export {
            message: format!("{}: {}", path.display(), e),
        })
    }
}

/// Single-writer id allocation over processed verses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeGraphBuilder;

impl NodeGraphBuilder {
    pub fn new() -> Self {
        NodeGraphBuilder
    }

    pub fn build(&self, outcomes: &[VerseOutcome]) -> NodeGraph {
        let mut books: Vec<&str> = Vec::new();
        let mut chapters: Vec<(&str, u32)> = Vec::new();
        for outcome in outcomes {
            let reference = outcome.verse.reference();
            if !books.contains(&reference.book.as_str()) {
                books.push(reference.book.as_str());
            }
            if !chapters.contains(&(reference.book.as_str(), reference.chapter)) {
                chapters.push((reference.book.as_str(), reference.chapter));
            }
        }
        let structure_count =
            |kind: NodeKind| -> usize { outcomes.iter().map(|o| o.structure.of_kind(kind).count()).sum() };

        let mut next = 1;
        let mut allocate = |count: usize| {
            let base = next;
            next += count;
            base
        };
        let slot_base = allocate(outcomes.iter().map(|o| o.verse.len()).sum());
        let verse_base = allocate(outcomes.len());
        let chapter_base = allocate(chapters.len());
        let book_base = allocate(books.len());
        let mut cursors = STRUCTURE_KINDS.map(|kind| allocate(structure_count(kind)));

        let mut words = Vec::new();
        let mut verses = Vec::with_capacity(outcomes.len());
        let mut structure: HashMap<NodeKind, Vec<GraphNode>> = HashMap::new();
        let mut slot = slot_base;

        for (offset, outcome) in outcomes.iter().enumerate() {
            let reference = outcome.verse.reference();
            let verse_id = verse_base + offset;
            let chapter_id = chapter_base + position_of(&chapters, &(reference.book.as_str(), reference.chapter));
            let first_slot = slot;

            for token in outcome.verse.tokens() {
                let mut node = GraphNode::new(slot, NodeType::Word);
                node.parent = Some(verse_id);
                node.slots = Some((slot, slot));
                node.verse = Some(reference.clone());
                node.features.surface = Some(token.surface().to_string());
                node.features.after = Some(token.after().to_string());
                node.features.lemma = Some(token.lemma().to_string());
                node.features.pos = Some(token.pos());
                words.push(node);
                slot += 1;
            }

            let mut verse = GraphNode::new(verse_id, NodeType::Verse);
            verse.parent = Some(chapter_id);
            verse.slots = (slot > first_slot).then(|| (first_slot, slot - 1));
            verse.verse = Some(reference.clone());
            verse.features.alignment = Some(outcome.class);
            verse.features.completeness = Some(outcome.alignment.completeness());
            verses.push(verse);

            let ids: Vec<NodeId> = outcome
                .structure
                .nodes()
                .iter()
                .map(|node| {
                    let cursor = &mut cursors[kind_index(node.kind)];
                    *cursor += 1;
                    *cursor - 1
                })
                .collect();

            for (index, (node, &id)) in outcome.structure.nodes().iter().zip(&ids).enumerate() {
                let parent = match node.parent {
                    None => verse_id,
                    Some(parent) => match ids.get(parent) {
                        Some(&id) => id,
                        None => {
                            tracing::warn!(verse = %reference, node = index, parent, "dangling parent, attached to verse");
                            verse_id
                        }
                    },
                };
                let graph_node = structure_node(id, node, parent, first_slot, reference);
                structure.entry(node.kind).or_default().push(graph_node);
            }
        }

        let chapter_nodes = chapters.iter().enumerate().map(|(offset, &(book, chapter))| {
            let mut node = GraphNode::new(chapter_base + offset, NodeType::Chapter);
            node.parent = Some(book_base + position_of(&books, &book));
            node.slots = covering(verses.iter().filter(|v| {
                v.verse.as_ref().map_or(false, |r| r.book == book && r.chapter == chapter)
            }));
            node.features.book = Some(book.to_string());
            node.features.chapter = Some(chapter);
            node
        });
        let chapter_nodes: Vec<GraphNode> = chapter_nodes.collect();

        let book_nodes: Vec<GraphNode> = books
            .iter()
            .enumerate()
            .map(|(offset, &book)| {
                let mut node = GraphNode::new(book_base + offset, NodeType::Book);
                node.slots = covering(chapter_nodes.iter().filter(|c| c.features.book.as_deref() == Some(book)));
                node.features.book = Some(book.to_string());
                node
            })
            .collect();

        let mut nodes = words;
        nodes.extend(verses);
        nodes.extend(chapter_nodes);
        nodes.extend(book_nodes);
        for kind in STRUCTURE_KINDS {
            nodes.extend(structure.remove(&kind).unwrap_or_default());
        }

        tracing::debug!(nodes = nodes.len(), "built node graph");
        NodeGraph::from_nodes(nodes)
    }
}

const STRUCTURE_KINDS: [NodeKind; 3] = [NodeKind::Clause, NodeKind::Phrase, NodeKind::WordGroup];

fn kind_index(kind: NodeKind) -> usize {
    match kind {
        NodeKind::Clause => 0,
        NodeKind::Phrase => 1,
        NodeKind::WordGroup => 2,
    }
}

fn position_of<T: PartialEq>(items: &[T], item: &T) -> usize {
    items.iter().position(|i| i == item).unwrap_or(0)
}

fn covering<'a>(nodes: impl Iterator<Item = &'a GraphNode>) -> Option<(NodeId, NodeId)> {
    nodes.filter_map(|n| n.slots).fold(None, |acc, (start, end)| match acc {
        None => Some((start, end)),
        Some((s, e)) => Some((s.min(start), e.max(end))),
    })
}

fn structure_node(
    id: NodeId,
    node: &StructureNode,
    parent: NodeId,
    first_slot: NodeId,
    reference: &VerseRef,
) -> GraphNode {
    let mut graph_node = GraphNode::new(id, node.kind.into());
    graph_node.parent = Some(parent);
    graph_node.slots = Some((first_slot + node.span.start, first_slot + node.span.end));
    graph_node.verse = Some(reference.clone());

    let features = &mut graph_node.features;
    features.typ = node.typ.clone();
    features.rule = node.rule.clone();
    features.clause_type = node.clause_type.clone();
    features.relation = node.relation.as_ref().map(|r| r.value.clone());
    features.relation_confidence = node.relation.as_ref().map(|r| r.confidence);
    features.confidence = Some(node.confidence);
    features.structure_source = Some(node.source);
    graph_node
}
