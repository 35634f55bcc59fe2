//! Error types for the switchyard virtual machine.
//!
//! This module provides the unified error hierarchy for the crate,
//! enabling precise error handling and diagnostics.
//!
//! # Error Categories
//!
//! - **Decode Errors**: The instruction word at the instruction pointer
//!   cannot be turned into an instruction (unknown opcode, unknown mode
//!   digit, missing trailing operand words)
//! - **Operand Errors**: A decoded operand cannot be resolved (negative
//!   address, write through an immediate operand, ceiling breach)
//! - **Limit Errors**: The defensive per-run step ceiling was hit
//! - **Route Errors**: A network packet names an impossible destination
//! - **Parse / I/O Errors**: Loader-layer failures, outside the machine
//!
//! Decode and operand errors are fatal to the machine that raised them:
//! execution is deterministic, so the same error recurs given the same
//! state and retrying is never useful. Orchestrators retire a failed
//! machine and do not drive it again.

use std::fmt;
use super::word::{Address, Word};

/// The memory access that raised an error, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOperation {
    Read,
    Write,
    Peek,
    Poke,
    Jump,
}

impl fmt::Display for MemoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryOperation::Read => write!(f, "read"),
            MemoryOperation::Write => write!(f, "write"),
            MemoryOperation::Peek => write!(f, "peek"),
            MemoryOperation::Poke => write!(f, "poke"),
            MemoryOperation::Jump => write!(f, "jump"),
        }
    }
}

/// Comprehensive error type for switchyard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    // ═══════════════════════════════════════════════════════════════════
    // Decode Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Instruction word whose low two digits select no known operation.
    UnknownOpcode {
        word: Word,
        ip: Address,
    },

    /// Parameter-mode digit outside {0, 1, 2}.
    InvalidParameterMode {
        digit: Word,
        word: Word,
        ip: Address,
    },

    /// The decoded opcode declares more operand words than remain in the
    /// materialized image.
    TruncatedInstruction {
        opcode: &'static str,
        required: usize,
        available: usize,
        ip: Address,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Operand Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Resolved address is negative.
    NegativeAddress {
        addr: Word,
        operation: MemoryOperation,
    },

    /// Resolved address lies beyond the configured address ceiling.
    AddressBeyondCeiling {
        addr: Address,
        ceiling: Address,
        operation: MemoryOperation,
    },

    /// An immediate-mode operand was used as a write target.
    ImmediateWriteTarget {
        ip: Address,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Limit Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Per-run step ceiling exceeded (runaway-program protection).
    StepLimitExceeded {
        limit: u64,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Route Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Packet destination outside the machine range that is not the
    /// monitor address.
    UnroutableDestination {
        dest: Word,
        machines: usize,
    },

    /// Every machine has been retired and no monitor packet is retained,
    /// so no round can ever make progress again.
    NetworkStalled {
        machines: usize,
    },

    /// A full pipeline rotation passed with every machine blocked, no
    /// signal circulating and nothing emitted.
    PipelineStalled {
        machines: usize,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Parse Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A field of the program text is not a decimal word.
    InvalidWord {
        text: String,
        index: usize,
    },

    /// The program text contains no words at all.
    EmptyImage,

    // ═══════════════════════════════════════════════════════════════════
    // I/O Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Failed to read a program file.
    Io {
        path: String,
        message: String,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Decode Errors
            MachineError::UnknownOpcode { word, ip } => {
                write!(f, "[ip {}] Unknown opcode in instruction word {}", ip, word)
            }
            MachineError::InvalidParameterMode { digit, word, ip } => {
                write!(f, "[ip {}] Invalid parameter mode {} in instruction word {}",
                       ip, digit, word)
            }
            MachineError::TruncatedInstruction { opcode, required, available, ip } => {
                write!(f, "[ip {}] Truncated {} instruction: requires {} operand words, \
                           but only {} remain in the image",
                       ip, opcode, required, available)
            }

            // Operand Errors
            MachineError::NegativeAddress { addr, operation } => {
                write!(f, "Negative address {} in memory {}", addr, operation)
            }
            MachineError::AddressBeyondCeiling { addr, ceiling, operation } => {
                write!(f, "Address {} beyond ceiling {} in memory {}", addr, ceiling, operation)
            }
            MachineError::ImmediateWriteTarget { ip } => {
                write!(f, "[ip {}] Immediate-mode operand used as a write target", ip)
            }

            // Limit Errors
            MachineError::StepLimitExceeded { limit } => {
                write!(f, "Step limit exceeded: {} steps in one run", limit)
            }

            // Route Errors
            MachineError::UnroutableDestination { dest, machines } => {
                write!(f, "Unroutable packet destination {} (machines: 0..{})", dest, machines)
            }
            MachineError::NetworkStalled { machines } => {
                write!(f, "Network stalled: all {} machines retired, no monitor packet retained",
                       machines)
            }
            MachineError::PipelineStalled { machines } => {
                write!(f, "Pipeline stalled: all {} machines blocked with no signal in flight",
                       machines)
            }

            // Parse Errors
            MachineError::InvalidWord { text, index } => {
                write!(f, "Invalid program word '{}' at field {}", text, index)
            }
            MachineError::EmptyImage => {
                write!(f, "Program text contains no words")
            }

            // I/O Errors
            MachineError::Io { path, message } => {
                write!(f, "I/O error reading '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for MachineError {}

impl MachineError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MachineError::UnknownOpcode { .. } |
            MachineError::InvalidParameterMode { .. } |
            MachineError::TruncatedInstruction { .. } => ErrorCategory::Decode,

            MachineError::NegativeAddress { .. } |
            MachineError::AddressBeyondCeiling { .. } |
            MachineError::ImmediateWriteTarget { .. } => ErrorCategory::Operand,

            MachineError::StepLimitExceeded { .. } => ErrorCategory::Limit,

            MachineError::UnroutableDestination { .. } |
            MachineError::NetworkStalled { .. } |
            MachineError::PipelineStalled { .. } => ErrorCategory::Route,

            MachineError::InvalidWord { .. } |
            MachineError::EmptyImage => ErrorCategory::Parse,

            MachineError::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            // Decode: 1000-1999
            MachineError::UnknownOpcode { .. } => 1001,
            MachineError::InvalidParameterMode { .. } => 1002,
            MachineError::TruncatedInstruction { .. } => 1003,

            // Operand: 2000-2999
            MachineError::NegativeAddress { .. } => 2001,
            MachineError::AddressBeyondCeiling { .. } => 2002,
            MachineError::ImmediateWriteTarget { .. } => 2003,

            // Limit: 3000-3999
            MachineError::StepLimitExceeded { .. } => 3001,

            // Route: 4000-4999
            MachineError::UnroutableDestination { .. } => 4001,
            MachineError::NetworkStalled { .. } => 4002,
            MachineError::PipelineStalled { .. } => 4003,

            // Parse: 5000-5999
            MachineError::InvalidWord { .. } => 5001,
            MachineError::EmptyImage => 5002,

            // I/O: 6000-6999
            MachineError::Io { .. } => 6001,
        }
    }

    /// Whether this error condemns the machine that raised it.
    ///
    /// Decode, operand and limit errors indicate a defect in the loaded
    /// program or in the orchestrator; the machine must not be resumed.
    pub fn is_fatal_to_machine(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Decode | ErrorCategory::Operand | ErrorCategory::Limit
        )
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Decode,
    Operand,
    Limit,
    Route,
    Parse,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Decode => write!(f, "decode"),
            ErrorCategory::Operand => write!(f, "operand"),
            ErrorCategory::Limit => write!(f, "limit"),
            ErrorCategory::Route => write!(f, "route"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Result type alias for switchyard operations.
pub type MachineResult<T> = Result<T, MachineError>;
