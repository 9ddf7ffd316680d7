//! Simulation runner and result recording.

use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{SimError, SimResult};

/// Options for a recorded run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOptions {
    /// Number of steps to take
    pub steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            record_every: 1,
        }
    }
}

/// Node voltage history of a run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimRecord {
    /// Node names in registry order; columns of each snapshot
    pub nodes: Vec<String>,
    /// Time points (seconds) the snapshots were solved at
    pub t: Vec<f64>,
    /// Voltage snapshots, one entry per node
    pub voltages: Vec<Vec<f64>>,
}

impl SimRecord {
    /// Voltage history of one node.
    pub fn series(&self, node: &str) -> Option<Vec<f64>> {
        let col = self.nodes.iter().position(|n| n == node)?;
        Some(self.voltages.iter().map(|v| v[col]).collect())
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Step `circuit` `opts.steps` times, recording node voltages.
///
/// A snapshot is taken after every `record_every`-th step and after the last
/// one. Nothing is recorded before the first step, since no solution exists
/// yet. The first failing step aborts the run.
pub fn run(circuit: &mut Circuit, opts: &RunOptions) -> SimResult<SimRecord> {
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut record = SimRecord {
        nodes: circuit
            .nodes()
            .iter()
            .map(|(_, n)| n.name().to_owned())
            .collect(),
        ..SimRecord::default()
    };

    for step in 1..=opts.steps {
        circuit.step()?;

        if step % opts.record_every == 0 || step == opts.steps {
            record.t.push(circuit.last_time());
            record
                .voltages
                .push(circuit.nodes().iter().map(|(_, n)| n.voltage()).collect());
        }
    }

    debug!(
        steps = opts.steps,
        recorded = record.len(),
        t_end = circuit.last_time(),
        "run complete"
    );
    Ok(record)
}
