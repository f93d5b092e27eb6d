use crate::error::{Error, Result, Warning};
use crate::geom::Vec2;
use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// A topic as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub prereqs: Vec<String>,
}

impl TopicNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            prereqs: Vec::new(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prereqs<I, S>(mut self, prereqs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prereqs = prereqs.into_iter().map(Into::into).collect();
        self
    }
}

/// A directed edge as drawn by the renderer. Only used for crossing checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEdge {
    pub from: String,
    pub to: String,
}

impl TopicEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub label: String,
    /// Arena indices, in declaration order.
    pub children: IndexSet<usize>,
    pub prereqs: IndexSet<usize>,
    pub level: Option<u32>,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Signs (`1.0` / `-1.0`) of `pos` at placement time.
    pub initial_sign: Vec2,
}

impl GraphNode {
    fn new(label: String) -> Self {
        Self {
            label,
            children: IndexSet::new(),
            prereqs: IndexSet::new(),
            level: None,
            pos: Vec2::zeros(),
            vel: Vec2::zeros(),
            initial_sign: Vec2::new(1.0, 1.0),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.level.is_some()
    }

    /// Children first, then prerequisites, without duplicates.
    pub fn neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        self.children
            .iter()
            .copied()
            .chain(
                self.prereqs
                    .iter()
                    .copied()
                    .filter(move |p| !self.children.contains(p)),
            )
    }

    pub fn ring_radius(&self, ring_unit: f64) -> f64 {
        f64::from(self.level.unwrap_or(0)) * ring_unit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

/// Owned arena of nodes plus the drawn edges.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub root: usize,
    id_to_idx: FxHashMap<String, usize>,
    /// Per node: indices it attracts (children and prerequisites).
    attraction: Vec<FxHashSet<usize>>,
}

impl Graph {
    /// Builds the arena. Relation labels that name no node are dropped and reported.
    pub fn build(
        topics: &[TopicNode],
        edges: &[TopicEdge],
        root: &str,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self> {
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(topics.len());
        let mut id_to_idx: FxHashMap<String, usize> = FxHashMap::default();
        id_to_idx.reserve(topics.len());

        for (idx, t) in topics.iter().enumerate() {
            if id_to_idx.insert(t.label.clone(), idx).is_some() {
                return Err(Error::DuplicateLabel {
                    label: t.label.clone(),
                });
            }
            nodes.push(GraphNode::new(t.label.clone()));
        }

        let Some(&root_idx) = id_to_idx.get(root) else {
            return Err(Error::UnknownRoot {
                label: root.to_string(),
            });
        };

        for (idx, t) in topics.iter().enumerate() {
            let children = resolve_relations(&t.label, idx, &t.children, &id_to_idx, warnings);
            let prereqs = resolve_relations(&t.label, idx, &t.prereqs, &id_to_idx, warnings);
            nodes[idx].children = children;
            nodes[idx].prereqs = prereqs;
        }

        let mut graph_edges: Vec<GraphEdge> = Vec::with_capacity(edges.len());
        for e in edges {
            let (Some(&from), Some(&to)) = (
                id_to_idx.get(e.from.as_str()),
                id_to_idx.get(e.to.as_str()),
            ) else {
                return Err(Error::MissingEndpoint {
                    from: e.from.clone(),
                    to: e.to.clone(),
                });
            };
            graph_edges.push(GraphEdge { from, to });
        }

        let attraction = nodes
            .iter()
            .map(|n| n.neighbors().collect::<FxHashSet<usize>>())
            .collect();

        Ok(Self {
            nodes,
            edges: graph_edges,
            root: root_idx,
            id_to_idx,
            attraction,
        })
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.id_to_idx.get(label).copied()
    }

    pub fn node(&self, label: &str) -> Option<&GraphNode> {
        self.index_of(label).map(|idx| &self.nodes[idx])
    }

    pub fn attracts(&self, n: usize, m: usize) -> bool {
        self.attraction[n].contains(&m)
    }

    /// Placed, non-root nodes in arena order: the ones relaxation moves.
    pub fn movable(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&idx| idx != self.root && self.nodes[idx].is_placed())
    }

    /// Segments of every edge whose endpoints are both placed.
    pub fn placed_segments(&self) -> Vec<(Vec2, Vec2)> {
        self.edges
            .iter()
            .filter(|e| self.nodes[e.from].is_placed() && self.nodes[e.to].is_placed())
            .map(|e| (self.nodes[e.from].pos, self.nodes[e.to].pos))
            .collect()
    }
}

fn resolve_relations(
    from: &str,
    self_idx: usize,
    labels: &[String],
    id_to_idx: &FxHashMap<String, usize>,
    warnings: &mut Vec<Warning>,
) -> IndexSet<usize> {
    let mut out: IndexSet<usize> = IndexSet::with_capacity(labels.len());
    for label in labels {
        match id_to_idx.get(label.as_str()) {
            Some(&idx) if idx != self_idx => {
                out.insert(idx);
            }
            Some(_) => {}
            None => {
                tracing::warn!(from, to = %label, "dropping relation to unknown node");
                warnings.push(Warning::DanglingRelation {
                    from: from.to_string(),
                    to: label.clone(),
                });
            }
        }
    }
    out
}
