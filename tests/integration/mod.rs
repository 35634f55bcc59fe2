//! Cross-component integration tests.
//!
//! - **machine**: execution engine, addressing modes, suspension contract
//! - **pipeline**: feedback pipeline orchestration
//! - **network**: packet network orchestration and idle watchdog

pub mod machine;
pub mod pipeline;
