//! Reply and mention interaction graph.
//!
//! An edge `u -> v` means "u replied to or mentioned v". The graph is a
//! multigraph: every qualifying reply or mention adds its own edge, so
//! repeated interactions show up as parallel edges. [`weighted_edges`]
//! folds them into one weighted edge per ordered pair.
//!
//! [`weighted_edges`]: InteractionGraph::weighted_edges
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chatlens::core::graph::InteractionGraph;
//! use chatlens::core::participants::ParticipantIndex;
//! use chatlens::core::store::MessageStore;
//!
//! let store = MessageStore::new(vec![
//!     Message::new(1, "hello").with_sender("A", "Alice"),
//!     Message::new(2, "hi @A").with_sender("B", "Bob").with_reply_to(1),
//!     Message::new(3, "@B welcome").with_sender("A", "Alice"),
//! ]);
//! let index = ParticipantIndex::build(store.messages());
//! let graph = InteractionGraph::build(&store, &index);
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.weighted_edges()[0].weight, 2);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::participants::ParticipantIndex;
use crate::core::store::MessageStore;
use crate::message::PeerId;

static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("mention pattern is valid"));

/// Why an edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Reply,
    Mention,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionKind::Reply => write!(f, "reply"),
            InteractionKind::Mention => write!(f, "mention"),
        }
    }
}

/// One interaction, as stored in the multigraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub from: PeerId,
    pub to: PeerId,
    pub kind: InteractionKind,
}

/// All interactions between one ordered pair of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub from: PeerId,
    pub to: PeerId,
    pub weight: usize,
    pub replies: usize,
    pub mentions: usize,
}

/// A labeled node for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: PeerId,
    pub label: String,
}

/// Nodes labeled with display names plus the multi-edge list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Directed multigraph of who interacts with whom.
#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    graph: DiGraph<PeerId, InteractionKind>,
    node_index: HashMap<PeerId, NodeIndex>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of a batch.
    ///
    /// For every message with a sender:
    /// - the sender becomes a node
    /// - a resolvable reply adds `sender -> replied-to sender`
    /// - each `@token` that resolves to a participant adds `sender -> participant`
    pub fn build(store: &MessageStore, index: &ParticipantIndex) -> Self {
        let mut graph = Self::new();

        for msg in store.iter() {
            let Some(sender) = msg.from_id() else {
                continue;
            };
            graph.add_node(sender);

            if let Some(original) = store.reply_target(msg).and_then(|m| m.from_id()) {
                graph.add_edge(sender, original, InteractionKind::Reply);
            }

            let text = msg.text_content();
            for token in mention_tokens(&text) {
                if let Some(mentioned) = index.resolve_mention(token) {
                    graph.add_edge(sender, mentioned, InteractionKind::Mention);
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built interaction graph"
        );
        graph
    }

    /// Adds a node if it isn't there yet.
    pub fn add_node(&mut self, id: &PeerId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id.clone(), idx);
        idx
    }

    /// Adds one interaction. Parallel edges are kept.
    pub fn add_edge(&mut self, from: &PeerId, to: &PeerId, kind: InteractionKind) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.add_edge(a, b, kind);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &PeerId) -> bool {
        self.node_index.contains_key(id)
    }

    /// Node ids in the order they were added.
    pub fn nodes(&self) -> Vec<&PeerId> {
        self.graph.node_weights().collect()
    }

    /// Every interaction in insertion order.
    pub fn multi_edges(&self) -> Vec<EdgeView> {
        self.graph
            .edge_references()
            .map(|e| EdgeView {
                from: self.graph[e.source()].clone(),
                to: self.graph[e.target()].clone(),
                kind: *e.weight(),
            })
            .collect()
    }

    /// One edge per ordered pair, in order of the pair's first interaction.
    pub fn weighted_edges(&self) -> Vec<WeightedEdge> {
        let mut positions: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
        let mut edges: Vec<WeightedEdge> = Vec::new();

        for e in self.graph.edge_references() {
            let key = (e.source(), e.target());
            let pos = *positions.entry(key).or_insert_with(|| {
                edges.push(WeightedEdge {
                    from: self.graph[e.source()].clone(),
                    to: self.graph[e.target()].clone(),
                    weight: 0,
                    replies: 0,
                    mentions: 0,
                });
                edges.len() - 1
            });
            let edge = &mut edges[pos];
            edge.weight += 1;
            match e.weight() {
                InteractionKind::Reply => edge.replies += 1,
                InteractionKind::Mention => edge.mentions += 1,
            }
        }

        edges
    }

    /// Distinct participants `id` replied to or mentioned.
    pub fn targets_of(&self, id: &PeerId) -> Vec<&PeerId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Distinct participants who replied to or mentioned `id`.
    pub fn sources_of(&self, id: &PeerId) -> Vec<&PeerId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &PeerId, dir: Direction) -> Vec<&PeerId> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };
        // petgraph yields neighbors newest edge first.
        let mut all: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        all.reverse();
        let mut seen: Vec<NodeIndex> = Vec::with_capacity(all.len());
        for n in all {
            if !seen.contains(&n) {
                seen.push(n);
            }
        }
        seen.into_iter().map(|n| &self.graph[n]).collect()
    }

    /// Nodes labeled with display names, plus the multi-edge list.
    pub fn view(&self, index: &ParticipantIndex) -> GraphView {
        GraphView {
            nodes: self
                .graph
                .node_weights()
                .map(|id| NodeView {
                    id: id.clone(),
                    label: index.name_of(id).to_string(),
                })
                .collect(),
            edges: self.multi_edges(),
        }
    }
}

/// Mention tokens (without `@`) in order of appearance.
pub fn mention_tokens(text: &str) -> Vec<&str> {
    MENTION_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
