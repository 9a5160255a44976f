use crate::graph::{GraphNode, NodeGraph, NodeId, NodeType};
use crate::pipeline::PipelineRun;
use layered_verse::{Verse, VerseRef, VerseStructure};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    /// Span bounds are reversed.
    EmptySpan,
    SpanOutsideVerse { verse_len: usize },
    ChildEscapesParent { parent: usize },
    DanglingParent { parent: usize },
    ParentInOtherVerse { parent: usize },
    /// The node's parent chain never reaches a root.
    Cycle,
}

/// One integrity defect.
///
/// `node` is a structure-node index for per-verse checks and a graph node id
/// for graph checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityFinding {
    pub verse: Option<VerseRef>,
    pub node: usize,
    pub kind: FindingKind,
}

impl fmt::Display for IntegrityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verse) = &self.verse {
            write!(f, "{} ", verse)?;
        }
        write!(f, "node {}: ", self.node)?;
        match self.kind {
            FindingKind::EmptySpan => write!(f, "empty span"),
            FindingKind::SpanOutsideVerse { verse_len } => write!(f, "span outside verse of {} words", verse_len),
            FindingKind::ChildEscapesParent { parent } => write!(f, "span escapes parent {}", parent),
            FindingKind::DanglingParent { parent } => write!(f, "parent {} does not exist", parent),
            FindingKind::ParentInOtherVerse { parent } => write!(f, "parent {} belongs to another verse", parent),
            FindingKind::Cycle => write!(f, "parent chain has a cycle"),
        }
    }
}

/// Reports structural defects. Never repairs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityValidator;

impl IntegrityValidator {
    pub fn new() -> Self {
        IntegrityValidator
    }

    pub fn check_structure(&self, verse: &Verse, structure: &VerseStructure) -> Vec<IntegrityFinding> {
        let reference = verse.reference();
        let nodes = structure.nodes();
        let mut findings = Vec::new();
        let mut report = |node: usize, kind: FindingKind| {
            findings.push(IntegrityFinding {
                verse: Some(reference.clone()),
                node,
                kind,
            })
        };

        for (index, node) in nodes.iter().enumerate() {
            if node.span.is_empty() {
                report(index, FindingKind::EmptySpan);
            } else if node.span.end >= verse.len() {
                report(index, FindingKind::SpanOutsideVerse { verse_len: verse.len() });
            }

            let Some(parent) = node.parent else {
                continue;
            };
            match nodes.get(parent) {
                None => report(index, FindingKind::DanglingParent { parent }),
                Some(parent_node) if !parent_node.span.contains_span(&node.span) => {
                    report(index, FindingKind::ChildEscapesParent { parent })
                }
                Some(_) => {}
            }
            if has_cycle(index, nodes.len(), |i| nodes.get(i).map(|n| n.parent)) {
                report(index, FindingKind::Cycle);
            }
        }
        findings
    }

    /// Per-verse checks over every outcome of a run.
    pub fn check_run(&self, run: &PipelineRun) -> Vec<IntegrityFinding> {
        let findings: Vec<_> = run
            .outcomes()
            .iter()
            .flat_map(|o| self.check_structure(&o.verse, &o.structure))
            .collect();
        for finding in &findings {
            tracing::warn!(%finding, "integrity defect");
        }
        findings
    }

    pub fn check_graph(&self, graph: &NodeGraph) -> Vec<IntegrityFinding> {
        let verse_nodes: HashMap<&VerseRef, &GraphNode> = graph
            .of_type(NodeType::Verse)
            .filter_map(|n| n.verse.as_ref().map(|r| (r, n)))
            .collect();
        let mut findings = Vec::new();

        for node in graph.nodes() {
            let mut report = |kind: FindingKind| {
                findings.push(IntegrityFinding {
                    verse: node.verse.clone(),
                    node: node.id,
                    kind,
                })
            };

            if let Some((start, end)) = node.slots {
                if start > end {
                    report(FindingKind::EmptySpan);
                }
                if node.node_type == NodeType::Word || node.node_type.is_structure() {
                    let owner = node.verse.as_ref().and_then(|r| verse_nodes.get(r));
                    if let Some((first, last)) = owner.and_then(|v| v.slots) {
                        if start < first || end > last {
                            report(FindingKind::SpanOutsideVerse {
                                verse_len: last - first + 1,
                            });
                        }
                    }
                }
            }

            let Some(parent) = node.parent else {
                continue;
            };
            let Some(parent_node) = graph.node(parent) else {
                report(FindingKind::DanglingParent { parent });
                continue;
            };
            let crosses_verse = parent_node.verse.is_some() && parent_node.verse != node.verse;
            if crosses_verse {
                report(FindingKind::ParentInOtherVerse { parent });
            }
            if let (Some((start, end)), Some((parent_start, parent_end))) = (node.slots, parent_node.slots) {
                if start < parent_start || end > parent_end {
                    report(FindingKind::ChildEscapesParent { parent });
                }
            }
            if has_cycle(node.id, graph.len(), |id| graph.node(id).map(|n| n.parent)) {
                report(FindingKind::Cycle);
            }
        }
        findings
    }
}

/// Follows parent links from `start`. A missing node ends the walk without a
/// cycle; more than `len` steps means one.
fn has_cycle(start: NodeId, len: usize, parent_of: impl Fn(usize) -> Option<Option<usize>>) -> bool {
    let mut current = parent_of(start).flatten();
    let mut steps = 0;
    while let Some(id) = current {
        steps += 1;
        if steps > len {
            return true;
        }
        current = parent_of(id).flatten();
    }
    false
}
