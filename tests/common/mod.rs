//! Shared test utilities for switchyard integration tests.
//!
//! This module provides:
//! - Machine construction and execution helpers
//! - Assertion helpers for run results
//! - Canonical program images used across the suite
//!
//! ## AAA Pattern
//!
//! All tests follow the Arrange-Act-Assert pattern:
//! - Arrange: Set up program images and machines
//! - Act: Execute the operation under test
//! - Assert: Verify the expected outcome

use switchyard::*;

// =============================================================================
// Execution Helpers
// =============================================================================

/// Run a machine built from `image` and `inputs` until it halts.
///
/// # Panics
/// Panics if the run fails or the machine does not halt, which is
/// appropriate for test code.
pub fn run_to_halt(image: &[Word], inputs: &[Word]) -> (Machine, RunResult) {
    let mut machine = Machine::new(image, inputs);
    let result = machine.run().expect("machine run failed");
    assert_eq!(
        result.status,
        MachineStatus::Halted,
        "machine did not halt: {:?}",
        result
    );
    (machine, result)
}

/// Run a machine to halt and return only its outputs.
pub fn outputs(image: &[Word], inputs: &[Word]) -> Vec<Word> {
    run_to_halt(image, inputs).1.outputs
}

/// Run a machine to halt and return the single value it emitted.
pub fn single_output(image: &[Word], inputs: &[Word]) -> Word {
    let emitted = outputs(image, inputs);
    assert_eq!(emitted.len(), 1, "expected one output, got {:?}", emitted);
    emitted[0]
}

// =============================================================================
// Assertion Helpers
// =============================================================================

/// Assert that a run left the machine blocked on input.
pub fn assert_blocked(result: &RunResult) {
    assert_eq!(
        result.status,
        MachineStatus::BlockedOnInput,
        "expected BlockedOnInput, got {:?}",
        result.status
    );
}

/// Assert that a memory cell holds the expected value.
pub fn assert_cell(machine: &Machine, addr: Word, expected: Word) {
    let actual = machine.peek(addr).expect("peek failed");
    assert_eq!(
        actual, expected,
        "memory[{}] = {}, expected {}",
        addr, actual, expected
    );
}

// =============================================================================
// Canonical Programs
// =============================================================================

/// Collection of canonical program images for various scenarios.
pub mod programs {
    use switchyard::Word;

    /// Multiplies cell 4 by an immediate 3, turning it into a Halt.
    /// Exercises mode defaulting: modes (Position, Immediate, Position).
    pub const MODE_MIX: &[Word] = &[1002, 4, 3, 4, 33];

    /// Emits its own sixteen words, in order, then halts.
    pub const QUINE: &[Word] = &[
        109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
    ];

    /// Emits 34915192 squared, a 16-digit product.
    pub const BIG_SQUARE: &[Word] = &[1102, 34915192, 34915192, 7, 4, 7, 99, 0];

    /// Emits a large immediate untouched.
    pub const BIG_IMMEDIATE: &[Word] = &[104, 1125899906842624, 99];

    /// Emits 1 when the input equals 8 (position mode), else 0.
    pub const EQ_EIGHT_POSITION: &[Word] = &[3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];

    /// Emits 1 when the input is less than 8 (position mode), else 0.
    pub const LT_EIGHT_POSITION: &[Word] = &[3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];

    /// Emits 1 when the input equals 8 (immediate mode), else 0.
    pub const EQ_EIGHT_IMMEDIATE: &[Word] = &[3, 3, 1108, -1, 8, 3, 4, 3, 99];

    /// Emits 0 for a zero input, 1 otherwise (position-mode jumps).
    pub const JUMP_POSITION: &[Word] = &[
        3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9,
    ];

    /// Emits 0 for a zero input, 1 otherwise (immediate-mode jumps).
    pub const JUMP_IMMEDIATE: &[Word] = &[3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];

    /// Emits 999/1000/1001 for inputs below/equal to/above 8.
    pub const AROUND_EIGHT: &[Word] = &[
        3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98,
        0, 0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1,
        20, 4, 20, 1105, 1, 46, 98, 99,
    ];

    // ─── Amplifier chains (single pass) ───

    /// Best signal 43210 with phases 4,3,2,1,0.
    pub const AMPLIFIER_ONCE_A: &[Word] = &[
        3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0,
    ];

    /// Best signal 54321 with phases 0,1,2,3,4.
    pub const AMPLIFIER_ONCE_B: &[Word] = &[
        3, 23, 3, 24, 1002, 24, 10, 24, 1002, 23, -1, 23, 101, 5, 23, 23, 1, 24, 23, 23,
        4, 23, 99, 0, 0,
    ];

    /// Best signal 65210 with phases 1,0,4,3,2.
    pub const AMPLIFIER_ONCE_C: &[Word] = &[
        3, 31, 3, 32, 1002, 32, 10, 32, 1001, 31, -2, 31, 1007, 31, 0, 33, 1002, 33, 7, 33,
        1, 33, 31, 31, 1, 32, 31, 31, 4, 31, 99, 0, 0, 0,
    ];

    // ─── Amplifier chains (feedback loop) ───

    /// Final signal 139629729 with phases 9,8,7,6,5.
    pub const AMPLIFIER_LOOP_A: &[Word] = &[
        3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28,
        -1, 28, 1005, 28, 6, 99, 0, 0, 5,
    ];

    /// Final signal 18216 with phases 9,7,8,5,6.
    pub const AMPLIFIER_LOOP_B: &[Word] = &[
        3, 52, 1001, 52, -5, 52, 3, 53, 1, 52, 56, 54, 1007, 54, 5, 55, 1005, 55, 26, 1001,
        54, -5, 54, 1105, 1, 12, 1, 53, 54, 53, 1008, 54, 0, 55, 1001, 55, 1, 55, 2, 53,
        55, 53, 4, 53, 1001, 56, -1, 56, 1005, 56, 6, 99, 0, 0, 0, 0, 10,
    ];

    // ─── Network programs ───

    /// Machine 0 sends one packet (255, 7, 42) to the monitor; every
    /// machine then settles into consuming sentinels. No unsolicited
    /// traffic thereafter.
    pub const ONE_SHOT_MONITOR: &[Word] = &[
        3, 50,
        1005, 50, 11,
        104, 255, 104, 7, 104, 42,
        3, 51,
        1105, 1, 11,
    ];

    /// Machine 0 sends (5, 37) to machine 1; machine 1 skips sentinels,
    /// then forwards the received pair to the monitor.
    pub const FORWARD_THROUGH: &[Word] = &[
        3, 90,                  //  0: own address
        1005, 90, 14,           //  2: receivers jump ahead
        104, 1, 104, 5, 104, 37, //  5: send (1, 5, 37)
        1105, 1, 31,            // 11: sender goes quiet
        3, 91,                  // 14: read a value
        1008, 91, -1, 92,       // 16: sentinel?
        1005, 92, 14,           // 20: yes: read again
        3, 93,                  // 23: no: it was x, read y
        104, 255,               // 25: forward to the monitor
        4, 91,
        4, 93,
        3, 94,                  // 31: quiet loop
        1105, 1, 31,
    ];
}
