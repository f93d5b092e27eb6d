use crate::config::LayoutConfig;
use crate::error::{Result, Warning};
use crate::geom::count_crossings;
use crate::graph::{Graph, TopicEdge, TopicNode};
use crate::placement::Placer;
use crate::relax::{self, RelaxationOutcome};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    pub iterations: usize,
    pub outcome: RelaxationOutcome,
    pub max_velocity_sq: f64,
    /// Crossings among the supplied edges right after placement.
    pub placement_crossings: usize,
    /// Crossings among the supplied edges in the returned layout.
    pub final_crossings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub positions: BTreeMap<String, NodePosition>,
    pub warnings: Vec<Warning>,
    pub stats: LayoutStats,
}

/// One layout run: owns the graph from ingest to emission.
#[derive(Debug)]
pub struct LayoutSession {
    graph: Graph,
    cfg: LayoutConfig,
    warnings: Vec<Warning>,
    degenerate_pairs: FxHashSet<(usize, usize)>,
    iterations: usize,
    outcome: Option<RelaxationOutcome>,
    placement_crossings: usize,
    placed: bool,
}

impl LayoutSession {
    /// Validates the config and builds the graph. Fails on an unknown root, duplicate labels or
    /// edges naming unknown nodes.
    pub fn new(
        nodes: &[TopicNode],
        edges: &[TopicEdge],
        root: &str,
        cfg: LayoutConfig,
    ) -> Result<Self> {
        cfg.validate()?;
        let mut warnings = Vec::new();
        let graph = Graph::build(nodes, edges, root, &mut warnings)?;
        Ok(Self {
            graph,
            cfg,
            warnings,
            degenerate_pairs: FxHashSet::default(),
            iterations: 0,
            outcome: None,
            placement_crossings: 0,
            placed: false,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Places the root and every node reachable from it. Subsequent calls do nothing.
    pub fn place(&mut self) {
        if self.placed {
            return;
        }
        self.placed = true;

        Placer::new(&self.graph, &self.cfg, &mut self.warnings).place_from_root(&mut self.graph);

        for node in &self.graph.nodes {
            if !node.is_placed() {
                tracing::warn!(label = %node.label, "node unreachable from root");
                self.warnings.push(Warning::UnreachableNode {
                    label: node.label.clone(),
                });
            }
        }

        self.placement_crossings = self.crossings();
        tracing::debug!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            crossings = self.placement_crossings,
            "placement finished"
        );
    }

    /// One relaxation step. Places first if needed.
    pub fn step(&mut self) {
        self.place();
        for (a, b) in relax::step(&mut self.graph, &self.cfg) {
            if self.degenerate_pairs.insert((a, b)) {
                let a = self.graph.nodes[a].label.clone();
                let b = self.graph.nodes[b].label.clone();
                tracing::warn!(%a, %b, iteration = self.iterations, "coincident nodes");
                self.warnings.push(Warning::DegenerateDistance { a, b });
            }
        }
        self.iterations += 1;
        tracing::trace!(
            iteration = self.iterations,
            max_velocity_sq = relax::max_velocity_sq(&self.graph),
            "relaxation step"
        );
    }

    pub fn is_steady(&self) -> bool {
        relax::is_steady(&self.graph, self.cfg.steady_threshold)
    }

    /// Steps until steady or until `max_iterations` steps have run in total.
    pub fn relax(&mut self) -> RelaxationOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        self.place();

        let outcome = if self.graph.movable().next().is_none() {
            RelaxationOutcome::Steady
        } else {
            let mut outcome = RelaxationOutcome::IterationCapReached;
            while self.iterations < self.cfg.max_iterations {
                self.step();
                if self.is_steady() {
                    outcome = RelaxationOutcome::Steady;
                    break;
                }
            }
            outcome
        };

        if outcome == RelaxationOutcome::IterationCapReached {
            let max_velocity_sq = relax::max_velocity_sq(&self.graph);
            tracing::warn!(
                iterations = self.iterations,
                max_velocity_sq,
                "relaxation hit the iteration cap"
            );
            self.warnings.push(Warning::NonConvergence {
                iterations: self.iterations,
                max_velocity_sq,
            });
        }
        tracing::debug!(iterations = self.iterations, ?outcome, "relaxation finished");

        self.outcome = Some(outcome);
        outcome
    }

    /// Emits positions of every placed node. Relaxation is not run; the outcome reports
    /// `Steady` only if the current state already is.
    pub fn finish(mut self) -> Layout {
        self.place();
        let outcome = self.outcome.unwrap_or(if self.is_steady() {
            RelaxationOutcome::Steady
        } else {
            RelaxationOutcome::IterationCapReached
        });

        let stats = LayoutStats {
            iterations: self.iterations,
            outcome,
            max_velocity_sq: relax::max_velocity_sq(&self.graph),
            placement_crossings: self.placement_crossings,
            final_crossings: self.crossings(),
        };

        let positions = self
            .graph
            .nodes
            .iter()
            .filter_map(|n| {
                let level = n.level?;
                Some((
                    n.label.clone(),
                    NodePosition {
                        x: n.pos.x,
                        y: n.pos.y,
                        level,
                    },
                ))
            })
            .collect();

        Layout {
            positions,
            warnings: self.warnings,
            stats,
        }
    }

    fn crossings(&self) -> usize {
        count_crossings(&self.graph.placed_segments(), self.cfg.orientation_epsilon)
    }
}

/// Builds, places and relaxes in one call.
pub fn compute_layout(
    nodes: &[TopicNode],
    edges: &[TopicEdge],
    root: &str,
    cfg: LayoutConfig,
) -> Result<Layout> {
    let mut session = LayoutSession::new(nodes, edges, root, cfg)?;
    session.relax();
    Ok(session.finish())
}

/// Builds and places without relaxing.
pub fn place_only(
    nodes: &[TopicNode],
    edges: &[TopicEdge],
    root: &str,
    cfg: LayoutConfig,
) -> Result<Layout> {
    let mut session = LayoutSession::new(nodes, edges, root, cfg)?;
    session.place();
    Ok(session.finish())
}
