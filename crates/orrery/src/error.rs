use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("root node not found: {label}")]
    UnknownRoot { label: String },

    #[error("duplicate node label: {label}")]
    DuplicateLabel { label: String },

    #[error("graph contains an edge with a missing endpoint: {from} -> {to}")]
    MissingEndpoint { from: String, to: String },

    #[error("invalid layout config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable conditions surfaced next to a successful layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// Never reached from the root through children/prerequisite relations; left out of the
    /// output.
    UnreachableNode { label: String },
    /// No non-crossing ring position was found; the candidate with the fewest crossings was
    /// kept.
    PlacementExhausted {
        label: String,
        attempts: usize,
        crossings: usize,
    },
    /// Two nodes coincided exactly during relaxation and repulsion was capped.
    DegenerateDistance { a: String, b: String },
    /// The iteration cap was reached before steady state.
    NonConvergence {
        iterations: usize,
        #[serde(rename = "maxVelocitySq")]
        max_velocity_sq: f64,
    },
    /// A child/prerequisite label that names no node.
    DanglingRelation { from: String, to: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnreachableNode { label } => {
                write!(f, "node `{label}` is not reachable from the root")
            }
            Warning::PlacementExhausted {
                label,
                attempts,
                crossings,
            } => write!(
                f,
                "no crossing-free position for `{label}` after {attempts} attempts; kept one with {crossings} crossing(s)"
            ),
            Warning::DegenerateDistance { a, b } => {
                write!(f, "nodes `{a}` and `{b}` coincide; repulsion capped")
            }
            Warning::NonConvergence {
                iterations,
                max_velocity_sq,
            } => write!(
                f,
                "no steady state after {iterations} iterations (max squared velocity {max_velocity_sq})"
            ),
            Warning::DanglingRelation { from, to } => {
                write!(f, "`{from}` refers to unknown node `{to}`")
            }
        }
    }
}
