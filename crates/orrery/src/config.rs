use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default collinearity tolerance used by the crossing checks during placement.
pub const ORIENTATION_EPSILON: f64 = 1e-9;

/// How a relaxation step reads the positions of the other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateOrder {
    /// Nodes are updated in place, in arena order; later nodes see earlier nodes' new positions.
    #[default]
    Sequential,
    /// Every force reads the positions captured at the start of the step.
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Distance between consecutive rings.
    pub ring_unit: f64,
    /// Spring constant between related nodes.
    pub k_attr: f64,
    /// Inverse-cube repulsion constant between every pair of nodes.
    pub k_rep: f64,
    /// Constant vertical push away from the horizontal axis.
    pub k_vert: f64,
    /// Velocity decay applied every step, in `[0, 1]`.
    pub damping: f64,
    /// A node is at rest when its squared speed is at or below this value.
    pub steady_threshold: f64,
    pub dt: f64,
    /// Longest distance a node may travel in one step, before it is put back on its ring.
    pub max_displacement: f64,
    pub max_iterations: usize,
    /// Seed for placement sampling. `0` is treated as `1`.
    pub random_seed: u64,
    pub max_placement_attempts: usize,
    /// Collinearity tolerance for the orientation predicate. `0.0` means exact zero.
    pub orientation_epsilon: f64,
    /// Below this distance repulsion stops growing.
    pub min_distance: f64,
    pub update_order: UpdateOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ring_unit: 60.0,
            k_attr: 0.05,
            k_rep: 1e6,
            k_vert: 50.0,
            damping: 0.6,
            steady_threshold: 0.01,
            dt: 0.1,
            max_displacement: 10.0,
            max_iterations: 1000,
            random_seed: 0,
            max_placement_attempts: 100,
            orientation_epsilon: ORIENTATION_EPSILON,
            min_distance: 1.0,
            update_order: UpdateOrder::Sequential,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        positive("ringUnit", self.ring_unit)?;
        positive("dt", self.dt)?;
        positive("maxDisplacement", self.max_displacement)?;
        positive("minDistance", self.min_distance)?;
        non_negative("kAttr", self.k_attr)?;
        non_negative("kRep", self.k_rep)?;
        non_negative("kVert", self.k_vert)?;
        non_negative("steadyThreshold", self.steady_threshold)?;
        non_negative("orientationEpsilon", self.orientation_epsilon)?;
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidConfig {
                field: "damping",
                reason: "must be within [0, 1]",
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidConfig {
                field: "maxPlacementAttempts",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: "must be finite and greater than zero",
        })
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: "must be finite and not negative",
        })
    }
}
