//! Feedback pipeline orchestration.
//!
//! Chains N machines in a cycle: each machine's outputs become the next
//! machine's inputs, round-robin from machine 0, until every machine has
//! halted. Each machine is pre-seeded with a distinct phase value as its
//! first input; the signal then circulates through the rotation.
//!
//! The driver relies on the machine suspension contract: a machine that
//! blocks mid-program keeps its position in the rotation and resumes from
//! exactly where it suspended once the next signal batch arrives.

use crate::audit::{audit, ActionCategory, AuditEntry, Outcome, Severity};
use crate::core::{MachineError, MachineResult, Word};
use crate::machine::{Machine, MachineConfig};

/// Round-robin feedback driver over a set of phase-seeded machines.
pub struct Pipeline {
    machines: Vec<Machine>,
}

impl Pipeline {
    /// Build one machine per phase value, each seeded with its phase as
    /// first input, all from copies of the same image.
    pub fn new(image: &[Word], phases: &[Word]) -> Self {
        Self::with_config(image, phases, MachineConfig::default())
    }

    /// Build a pipeline whose machines share a custom configuration.
    pub fn with_config(image: &[Word], phases: &[Word], config: MachineConfig) -> Self {
        let machines = phases
            .iter()
            .map(|&phase| Machine::with_config(image, &[phase], config.clone()))
            .collect();
        Self { machines }
    }

    /// Number of machines still in the rotation.
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// True when every machine has left the rotation.
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Drive the feedback loop to completion and return the last signal
    /// value emitted before the final machine halted.
    ///
    /// Machines that halt are removed from the rotation; a machine that
    /// fails is retired the same way (and the failure audited), per the
    /// rule that a deterministic failure must never be re-driven.
    pub fn run(&mut self, initial_signal: Word) -> MachineResult<Word> {
        let mut signal = vec![initial_signal];
        let mut last = initial_signal;
        let mut idx = 0;
        let mut starved = 0;

        while !self.machines.is_empty() {
            // A full rotation of blocked machines with no signal in
            // flight can never recover.
            if signal.is_empty() {
                starved += 1;
                if starved > self.machines.len() {
                    return Err(MachineError::PipelineStalled {
                        machines: self.machines.len(),
                    });
                }
            } else {
                starved = 0;
            }

            self.machines[idx].feed(&signal);

            match self.machines[idx].run() {
                Ok(result) => {
                    signal = result.outputs;
                    if let Some(&value) = signal.last() {
                        last = value;
                    }
                    if result.status.is_halted() {
                        starved = 0;
                        self.machines.remove(idx);
                        if self.machines.is_empty() {
                            break;
                        }
                        idx %= self.machines.len();
                    } else {
                        idx = (idx + 1) % self.machines.len();
                    }
                }
                Err(err) => {
                    // Equivalent to an unexpected halt: retire the
                    // machine, keep the remaining rotation going.
                    audit(
                        AuditEntry::new("RETIRE", "Machine", idx.to_string(), err.to_string())
                            .with_category(ActionCategory::Pipeline)
                            .with_severity(Severity::Warning)
                            .with_outcome(Outcome::Failure),
                    );
                    signal = Vec::new();
                    starved = 0;
                    self.machines.remove(idx);
                    if self.machines.is_empty() {
                        break;
                    }
                    idx %= self.machines.len();
                }
            }
        }

        Ok(last)
    }

    /// Drive a single non-feedback pass: each machine in order receives
    /// the current signal batch and runs until it halts or blocks; its
    /// outputs feed the next machine once. Returns the last value the
    /// final machine emitted.
    pub fn run_once(&mut self, initial_signal: Word) -> MachineResult<Word> {
        let mut signal = vec![initial_signal];
        let mut last = initial_signal;

        for machine in &mut self.machines {
            machine.feed(&signal);
            let result = machine.run()?;
            signal = result.outputs;
            if let Some(&value) = signal.last() {
                last = value;
            }
        }

        Ok(last)
    }
}
