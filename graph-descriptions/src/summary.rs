//! Windowed aggregation of graph elements.
//!
//! A [`Summary`] is exclusively owned by one aggregation task: updates come
//! in over a channel, snapshots go out over a channel, and the value itself
//! is never shared across tasks, so no internal synchronization is needed.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::element::{Edge, GraphElement, Node};
use crate::gaffer::{GafferElement, TimestampSet};

/// Per-key observation state: how many times the key was seen since the
/// last reset, and the distinct seconds at which it was seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct State {
    count: u64,
    seconds: BTreeSet<i64>,
}

impl State {
    fn observe(&mut self, tm: DateTime<Utc>) {
        self.count += 1;
        self.seconds.insert(tm.timestamp());
    }
}

/// Accumulates repeated element observations into counters and temporal
/// presence sets, keyed by element identity.
#[derive(Debug, Default)]
pub struct Summary {
    nodes: HashMap<Node, State>,
    edges: HashMap<Edge, State>,
}

impl Summary {
    pub fn new() -> Self {
        Summary::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Records one observation of `element` at second resolution. Repeats
    /// within the same second collapse to a single presence entry.
    pub fn update(&mut self, element: &GraphElement, tm: DateTime<Utc>) {
        match element {
            GraphElement::Node(node) => {
                self.nodes.entry(node.clone()).or_default().observe(tm);
            }
            GraphElement::Edge(edge) => {
                self.edges.entry(edge.clone()).or_default().observe(tm);
            }
        }
    }

    /// Exports every key as a wire element carrying its count and the
    /// hour-bucketed presence set. Iteration order is unspecified.
    pub fn snapshot(&self) -> Vec<GafferElement> {
        let mut elements = Vec::with_capacity(self.len());

        for (node, state) in &self.nodes {
            elements.push(GafferElement::entity(
                node.name.clone(),
                node.group.as_str(),
                state.count,
                TimestampSet::hours(state.seconds.iter().copied()),
            ));
        }

        for (edge, state) in &self.edges {
            elements.push(GafferElement::edge(
                edge.source.clone(),
                edge.destination.clone(),
                edge.group.as_str(),
                state.count,
                TimestampSet::hours(state.seconds.iter().copied()),
            ));
        }

        elements
    }

    /// Discards all accumulated state. Only the exclusive owner may call
    /// this, between flushes; never concurrently with `update`.
    pub fn reset(&mut self) {
        self.nodes = HashMap::new();
        self.edges = HashMap::new();
    }
}
