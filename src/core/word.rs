//! Machine word and address types for the switchyard virtual machine.
//!
//! These are separated out to break circular dependencies between core
//! modules.

/// A machine word. Program text, memory cells, inputs, outputs and packet
/// fields are all signed 64-bit words.
pub type Word = i64;

/// A resolved, non-negative memory index.
pub type Address = usize;

/// Default ceiling on the materialized address space (16 Mi cells).
///
/// The address space grows lazily and is unbounded in principle; the
/// ceiling bounds it in practice so a defective program cannot exhaust
/// host memory through a single stray write.
pub const DEFAULT_ADDRESS_CEILING: usize = 1 << 24;
