//! Structured audit logging for switchyard.
//!
//! Provides immutable, append-only audit logging for the machine
//! orchestrators and the CLI driver. Entries follow a WHO/WHAT/WHEN/
//! OUTCOME pattern and are written as structured text or JSON Lines.
//!
//! # Modules
//!
//! - `entry`: Core audit entry types (AuditEntry, Severity, Outcome,
//!   ActionCategory)
//! - `logger`: Thread-safe file logger with severity filtering
//! - `global`: Global singleton logger for application-wide use

mod entry;
mod global;
mod logger;

// Core entry types
pub use entry::{ActionCategory, AuditEntry, Outcome, Severity};

// Logger types
pub use logger::{AuditConfig, AuditFormat, AuditLogger};

// Global logger functions
pub use global::{
    audit, audit_error, audit_info, audit_warn, global_logger, init_global_logger,
    init_stdout_logger,
};

/// Escape a string for JSON.
pub(crate) fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
