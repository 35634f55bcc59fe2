//! Integration tests for the virtual machine.
//!
//! These tests verify:
//! - Parameter-mode decoding and defaulting
//! - Relative-base addressing
//! - The suspend-on-empty-input contract
//! - Large-value arithmetic
//! - Decode and operand failure paths

#![cfg(test)]

use crate::common::*;
use crate::common::programs;

use switchyard::*;

// =============================================================================
// Addressing Modes
// =============================================================================

mod addressing {
    use super::*;

    #[test]
    fn mode_digits_default_to_position() {
        // Arrange & Act: mem[4] = mem[4] * 3 via (Position, Immediate)
        let (machine, _) = run_to_halt(programs::MODE_MIX, &[]);

        // Assert: the output cell became the Halt that ended the run
        assert_cell(&machine, 4, 99);
        assert_eq!(machine.peek(0).unwrap(), 1002);
    }

    #[test]
    fn relative_offset_zero_resolves_to_the_base() {
        // Arrange: shift the base by 7, then store the input through a
        // Relative operand with raw offset 0
        let image: &[Word] = &[109, 7, 203, 0, 99];
        let mut machine = Machine::new(image, &[55]);

        // Act
        let result = machine.run().unwrap();

        // Assert: the write landed at address exactly relative_base
        assert_eq!(result.status, MachineStatus::Halted);
        assert_eq!(machine.relative_base(), 7);
        assert_cell(&machine, 7, 55);
    }

    #[test]
    fn negative_relative_offsets_reach_below_the_base() {
        // The quine reads backwards from the moving base
        let emitted = outputs(programs::QUINE, &[]);
        assert_eq!(emitted, programs::QUINE.to_vec());
    }
}

// =============================================================================
// Arithmetic & Comparison
// =============================================================================

mod arithmetic {
    use super::*;

    #[test]
    fn add_and_multiply_chain() {
        // Classic gravity-assist image: ends with mem[0] = 3500
        let image: &[Word] = &[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
        let (machine, _) = run_to_halt(image, &[]);
        assert_cell(&machine, 0, 3500);
    }

    #[test]
    fn sixteen_digit_product() {
        let value = single_output(programs::BIG_SQUARE, &[]);
        assert_eq!(value, 34915192 * 34915192);
        assert_eq!(value.to_string().len(), 16);
    }

    #[test]
    fn large_immediate_passes_through() {
        assert_eq!(single_output(programs::BIG_IMMEDIATE, &[]), 1125899906842624);
    }

    #[test]
    fn equality_test_position_mode() {
        assert_eq!(single_output(programs::EQ_EIGHT_POSITION, &[8]), 1);
        assert_eq!(single_output(programs::EQ_EIGHT_POSITION, &[9]), 0);
    }

    #[test]
    fn less_than_test_position_mode() {
        assert_eq!(single_output(programs::LT_EIGHT_POSITION, &[7]), 1);
        assert_eq!(single_output(programs::LT_EIGHT_POSITION, &[8]), 0);
    }

    #[test]
    fn equality_test_immediate_mode() {
        assert_eq!(single_output(programs::EQ_EIGHT_IMMEDIATE, &[8]), 1);
        assert_eq!(single_output(programs::EQ_EIGHT_IMMEDIATE, &[-3]), 0);
    }
}

// =============================================================================
// Jumps
// =============================================================================

mod jumps {
    use super::*;

    #[test]
    fn jump_tests_distinguish_zero() {
        assert_eq!(single_output(programs::JUMP_POSITION, &[0]), 0);
        assert_eq!(single_output(programs::JUMP_POSITION, &[4]), 1);
        assert_eq!(single_output(programs::JUMP_IMMEDIATE, &[0]), 0);
        assert_eq!(single_output(programs::JUMP_IMMEDIATE, &[-7]), 1);
    }

    #[test]
    fn three_way_comparison_around_eight() {
        assert_eq!(single_output(programs::AROUND_EIGHT, &[3]), 999);
        assert_eq!(single_output(programs::AROUND_EIGHT, &[8]), 1000);
        assert_eq!(single_output(programs::AROUND_EIGHT, &[500]), 1001);
    }
}

// =============================================================================
// Suspension Contract
// =============================================================================

mod suspension {
    use super::*;

    #[test]
    fn blocked_run_is_idempotent() {
        // Arrange: an Input with nothing queued
        let mut machine = Machine::new(&[3, 0, 99], &[]);

        // Act
        let first = machine.run().unwrap();
        let ip = machine.ip();
        let base = machine.relative_base();
        let again = machine.run().unwrap();

        // Assert: no progress, no outputs, no state drift
        assert_blocked(&first);
        assert_blocked(&again);
        assert!(again.outputs.is_empty());
        assert_eq!(again.steps, 0);
        assert_eq!(machine.ip(), ip);
        assert_eq!(machine.relative_base(), base);
    }

    #[test]
    fn resume_continues_from_the_suspension_point() {
        // Echoes two inputs, blocking between them when starved
        let image: &[Word] = &[3, 20, 4, 20, 3, 21, 4, 21, 99];
        let mut machine = Machine::new(image, &[11]);

        let first = machine.run().unwrap();
        assert_blocked(&first);
        assert_eq!(first.outputs, vec![11]);

        machine.feed(&[22]);
        let second = machine.run().unwrap();
        assert_eq!(second.status, MachineStatus::Halted);
        // Output buffer is per-call, not cumulative
        assert_eq!(second.outputs, vec![22]);
    }

    #[test]
    fn inputs_are_consumed_fifo() {
        let image: &[Word] = &[3, 20, 3, 21, 4, 20, 4, 21, 99];
        let (_, result) = run_to_halt(image, &[1, 2]);
        assert_eq!(result.outputs, vec![1, 2]);
    }
}

// =============================================================================
// Failure Paths
// =============================================================================

mod failures {
    use super::*;

    #[test]
    fn unknown_opcode_is_a_decode_error() {
        let mut machine = Machine::new(&[98, 0, 0], &[]);
        let err = machine.run().unwrap_err();
        assert!(matches!(err, MachineError::UnknownOpcode { word: 98, ip: 0 }));
        assert_eq!(err.category(), ErrorCategory::Decode);
    }

    #[test]
    fn truncated_instruction_is_a_decode_error() {
        let mut machine = Machine::new(&[1101, 1, 1], &[]);
        let err = machine.run().unwrap_err();
        assert!(matches!(
            err,
            MachineError::TruncatedInstruction { required: 3, available: 2, ip: 0, .. }
        ));
    }

    #[test]
    fn negative_write_address_is_an_operand_error() {
        let mut machine = Machine::new(&[3, -1, 99], &[5]);
        let err = machine.run().unwrap_err();
        assert!(matches!(
            err,
            MachineError::NegativeAddress { addr: -1, .. }
        ));
        assert_eq!(err.category(), ErrorCategory::Operand);
    }

    #[test]
    fn negative_read_address_is_an_operand_error() {
        // OUT through a Position operand pointing at -2
        let mut machine = Machine::new(&[4, -2, 99], &[]);
        let err = machine.run().unwrap_err();
        assert!(matches!(err, MachineError::NegativeAddress { addr: -2, .. }));
    }

    #[test]
    fn immediate_write_target_is_an_operand_error() {
        // ADD with an immediate third operand
        let mut machine = Machine::new(&[11101, 1, 1, 0, 99], &[]);
        let err = machine.run().unwrap_err();
        assert!(matches!(err, MachineError::ImmediateWriteTarget { ip: 0 }));
    }

    #[test]
    fn runaway_loop_hits_the_step_ceiling() {
        let config = MachineConfig { max_steps: 10_000, ..Default::default() };
        let mut machine = Machine::with_config(&[1105, 1, 0], &[], config);
        let err = machine.run().unwrap_err();
        assert!(matches!(err, MachineError::StepLimitExceeded { limit: 10_000 }));
        assert_eq!(err.category(), ErrorCategory::Limit);
    }
}
