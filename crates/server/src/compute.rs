//! The arithmetic dispatch carried inside sealed payloads.

use serde::{Deserialize, Serialize};

/// Supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Mul,
    Avg,
}

/// The decrypted request payload: `{"op": ..., "a": ..., "b": ...}`.
///
/// Missing operands default to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputeRequest {
    pub op: Op,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
}

/// Apply `op` to the operands.
pub fn apply(op: Op, a: f64, b: f64) -> f64 {
    match op {
        Op::Add => a + b,
        Op::Mul => a * b,
        Op::Avg => (a + b) / 2.0,
    }
}
