// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Machine (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod machine;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Orchestration (depends on core, machine)
// ═══════════════════════════════════════════════════════════════════════════
pub mod network;
pub mod pipeline;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: Runtime (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod loader;

// ═══════════════════════════════════════════════════════════════════════════
// Cross-cutting
// ═══════════════════════════════════════════════════════════════════════════
pub mod audit;

// Re-export the primary surface at the crate root
pub use crate::core::{
    Address, ErrorCategory, InputQueue, MachineError, MachineResult, Memory, MemoryOperation,
    Word, DEFAULT_ADDRESS_CEILING,
};
pub use machine::decode::{Instruction, Mode, Opcode};
pub use machine::{Machine, MachineConfig, MachineStatus, RunResult};
pub use network::{
    Network, NetworkConfig, Packet, DEFAULT_MONITOR_ADDRESS, NO_PACKET_SENTINEL,
};
pub use pipeline::Pipeline;
pub use loader::{load_image, parse_image};
