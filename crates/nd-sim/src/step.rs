//! Stepping state machine.

use nalgebra::DVector;
use nd_elements::{StampContext, StampProvider};
use nd_graph::IndexMap;
use nd_solver::{LinearSolution, MnaSystem, assemble, solve_with_config};
use tracing::{debug, info_span, trace};

use crate::circuit::Circuit;
use crate::error::SimResult;

/// Lifecycle of a [`Circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimState {
    /// Indices and matrices are not valid (no rebuild yet, or the last one failed).
    Uninitialized,
    /// Indices and matrices match the topology; no solution for them yet.
    Ready,
    /// At least one step has been solved since the last topology change.
    Stepped,
}

impl Circuit {
    /// Advance the simulation by one time step.
    ///
    /// Reindexes, reassembles against the previous-step voltages, solves and
    /// writes the node voltages back, then advances time. On the first step
    /// after construction or [`Circuit::reset`] the solved voltages (or zero,
    /// with `zero_initial_voltage`) also become the previous voltages. On
    /// error no node voltage or time value is modified and the circuit is
    /// left [`SimState::Uninitialized`].
    pub fn step(&mut self) -> SimResult<()> {
        let span = info_span!("step", t = self.current_time);
        let _enter = span.enter();

        let solution = match self.rebuild().and_then(|()| self.solve()) {
            Ok(solution) => solution,
            Err(e) => {
                debug!(error = %e, "step failed");
                self.invalidate();
                return Err(e);
            }
        };

        self.write_back(&solution.x);
        self.solution = solution.x;
        self.status = Some(solution.status);
        self.first_step = false;
        self.last_time = self.current_time;
        self.current_time += self.config.time_step;
        self.state = SimState::Stepped;
        Ok(())
    }

    /// Return to the start: every node voltage and previous voltage is
    /// zeroed, both times go to 0 and the next step is treated as the first.
    pub fn reset(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.clear_voltages();
        }
        self.current_time = 0.0;
        self.last_time = 0.0;
        self.first_step = true;
        self.solution = DVector::zeros(0);
        self.status = None;
        self.refresh();
    }

    /// Rebuild after a topology change, recording failure in the state
    /// rather than returning it.
    pub(crate) fn refresh(&mut self) {
        match self.rebuild() {
            Ok(()) => self.state = SimState::Ready,
            Err(e) => {
                debug!(error = %e, "circuit not ready");
                self.invalidate();
            }
        }
    }

    /// Reindex and reassemble. Nothing is stored unless both succeed.
    fn rebuild(&mut self) -> SimResult<()> {
        let index = IndexMap::allocate(
            &mut self.nodes,
            self.elements
                .iter()
                .filter(|e| e.has_branch())
                .map(|e| e.name()),
        )?;
        let ctx = StampContext::new(&self.nodes, &index, self.config.time_step);
        let system = assemble(&self.elements, &ctx)?;

        debug!(dimension = system.dimension(), "rebuilt system");
        self.index = index;
        self.system = system;
        Ok(())
    }

    fn solve(&self) -> SimResult<LinearSolution> {
        Ok(solve_with_config(
            &self.system.lhs,
            &self.system.rhs,
            &self.solver,
        )?)
    }

    fn invalidate(&mut self) {
        self.nodes.clear_indices();
        self.index = IndexMap::default();
        self.system = MnaSystem::default();
        self.state = SimState::Uninitialized;
    }

    fn write_back(&mut self, x: &DVector<f64>) {
        let zero_initial = self.first_step && self.config.zero_initial_voltage;

        if let Some(gnd) = self.index.reference().and_then(|id| self.nodes.get_mut(id)) {
            gnd.clear_voltages();
        }

        for (i, &id) in self.index.node_ids().iter().enumerate().skip(1) {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let solved = if zero_initial { 0.0 } else { x[i - 1] };
            if self.first_step {
                node.set_voltage(solved);
                node.commit_previous();
            } else {
                node.commit_previous();
                node.set_voltage(solved);
            }
            trace!(node = node.name(), voltage = node.voltage(), "node voltage");
        }
    }
}
