//! Packet-switched network orchestration with an idle watchdog.
//!
//! N machines addressed `0..N-1` exchange two-word packets through the
//! orchestrator. Each machine is pre-seeded with its own address; per
//! round every machine receives at most one queued packet (or the `-1`
//! sentinel when its queue is empty), runs until it blocks or halts, and
//! has its outputs partitioned into `(dest, x, y)` triples and routed.
//!
//! One destination is reserved: packets addressed to the monitor are
//! retained rather than delivered. When a round opens with every packet
//! queue empty, the watchdog breaks the deadlock by handing the retained
//! monitor packet to machine 0. Two consecutive idle-triggered deliveries
//! carrying the same y terminate the network with that y; there is no
//! other terminating condition.

use std::collections::VecDeque;

use crate::audit::{audit, ActionCategory, AuditEntry, Outcome, Severity};
use crate::core::{MachineError, MachineResult, Word};
use crate::machine::{Machine, MachineConfig};

/// Sentinel delivered to a machine whose packet queue is empty.
pub const NO_PACKET_SENTINEL: Word = -1;

/// Default reserved monitor address.
pub const DEFAULT_MONITOR_ADDRESS: Word = 255;

/// A routed two-word payload. The destination is consumed during
/// routing; queued packets are addressed implicitly by their queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub x: Word,
    pub y: Word,
}

/// Configuration for the network driver.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Reserved destination whose packets are retained, not delivered.
    pub monitor_address: Word,
    /// Configuration shared by every machine in the network.
    pub machine: MachineConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            monitor_address: DEFAULT_MONITOR_ADDRESS,
            machine: MachineConfig::default(),
        }
    }
}

/// The packet switch driving N addressed machines.
pub struct Network {
    machines: Vec<Machine>,
    in_service: Vec<bool>,
    queues: Vec<VecDeque<Packet>>,
    monitor: Option<Packet>,
    last_idle_y: Option<Word>,
    rounds: u64,
    config: NetworkConfig,
}

impl Network {
    /// Build `n` machines from copies of the same image, machine `i`
    /// seeded with `i` as its first input.
    pub fn new(image: &[Word], n: usize) -> Self {
        Self::with_config(image, n, NetworkConfig::default())
    }

    /// Build a network with a custom configuration.
    pub fn with_config(image: &[Word], n: usize, config: NetworkConfig) -> Self {
        let machines = (0..n)
            .map(|addr| Machine::with_config(image, &[addr as Word], config.machine.clone()))
            .collect();
        Self {
            machines,
            in_service: vec![true; n],
            queues: (0..n).map(|_| VecDeque::new()).collect(),
            monitor: None,
            last_idle_y: None,
            rounds: 0,
            config,
        }
    }

    /// The currently retained monitor packet, if any.
    pub fn monitor_packet(&self) -> Option<Packet> {
        self.monitor
    }

    /// Rounds driven so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Run rounds until a packet reaches the monitor address, returning
    /// its y value.
    pub fn run_until_monitor(&mut self) -> MachineResult<Word> {
        loop {
            self.ensure_live()?;
            self.round()?;
            if let Some(packet) = self.monitor {
                return Ok(packet.y);
            }
        }
    }

    /// Run rounds until two consecutive idle-triggered monitor
    /// deliveries carry the same y, returning that y.
    pub fn run_until_idle_repeat(&mut self) -> MachineResult<Word> {
        loop {
            if self.idle() {
                if let Some(packet) = self.monitor {
                    if self.last_idle_y == Some(packet.y) {
                        return Ok(packet.y);
                    }
                    self.last_idle_y = Some(packet.y);
                    // Hand the retained packet straight to machine 0,
                    // bypassing normal per-round delivery.
                    self.machines[0].feed(&[packet.x, packet.y]);
                    audit(
                        AuditEntry::new(
                            "IDLE-DELIVER",
                            "Network",
                            "0",
                            "Idle deadlock broken with retained monitor packet",
                        )
                        .with_category(ActionCategory::Network)
                        .with_meta("y", packet.y.to_string()),
                    );
                } else {
                    self.ensure_live()?;
                }
            } else if self.in_service.iter().all(|&live| !live) {
                // Undelivered packets remain, but every machine that
                // could receive one is retired.
                return Err(MachineError::NetworkStalled { machines: self.machines.len() });
            }
            self.round()?;
        }
    }

    /// True when no packet awaits delivery anywhere in the network.
    fn idle(&self) -> bool {
        self.queues.iter().all(|queue| queue.is_empty())
    }

    /// Guard against a network that can never make progress again.
    fn ensure_live(&self) -> MachineResult<()> {
        if self.in_service.iter().any(|&live| live) {
            Ok(())
        } else {
            Err(MachineError::NetworkStalled { machines: self.machines.len() })
        }
    }

    /// Drive one full round: deliver, run and route every machine still
    /// in service, in address order.
    fn round(&mut self) -> MachineResult<()> {
        self.rounds += 1;

        for addr in 0..self.machines.len() {
            if !self.in_service[addr] {
                continue;
            }

            match self.queues[addr].pop_front() {
                Some(packet) => self.machines[addr].feed(&[packet.x, packet.y]),
                None => self.machines[addr].feed(&[NO_PACKET_SENTINEL]),
            }

            match self.machines[addr].run() {
                Ok(result) => {
                    self.route(&result.outputs)?;
                    if result.status.is_halted() {
                        self.retire(addr, "machine halted", Severity::Info);
                    }
                }
                Err(err) => {
                    // Deterministic failure: treat as an unexpected halt
                    // and never drive this machine again.
                    self.retire(addr, &err.to_string(), Severity::Error);
                }
            }
        }

        Ok(())
    }

    /// Partition one run's outputs into packet triples and route them.
    fn route(&mut self, outputs: &[Word]) -> MachineResult<()> {
        for triple in outputs.chunks_exact(3) {
            let (dest, packet) = (triple[0], Packet { x: triple[1], y: triple[2] });

            if dest >= 0 && (dest as usize) < self.machines.len() {
                self.queues[dest as usize].push_back(packet);
            } else if dest == self.config.monitor_address {
                self.monitor = Some(packet);
            } else {
                return Err(MachineError::UnroutableDestination {
                    dest,
                    machines: self.machines.len(),
                });
            }
        }
        Ok(())
    }

    /// Take a machine out of service.
    fn retire(&mut self, addr: usize, reason: &str, severity: Severity) {
        self.in_service[addr] = false;
        let outcome = match severity {
            Severity::Info => Outcome::Success,
            _ => Outcome::Failure,
        };
        audit(
            AuditEntry::new("RETIRE", "Machine", addr.to_string(), reason)
                .with_category(ActionCategory::Network)
                .with_severity(severity)
                .with_outcome(outcome),
        );
    }
}
