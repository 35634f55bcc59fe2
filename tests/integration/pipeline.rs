//! Integration tests for feedback pipeline orchestration.

#![cfg(test)]

use crate::common::programs;

use switchyard::*;

// =============================================================================
// Single-Pass Chains
// =============================================================================

mod single_pass {
    use super::*;

    #[test]
    fn amplifier_chain_a() {
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_ONCE_A, &[4, 3, 2, 1, 0]);
        assert_eq!(pipeline.run_once(0).unwrap(), 43210);
    }

    #[test]
    fn amplifier_chain_b() {
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_ONCE_B, &[0, 1, 2, 3, 4]);
        assert_eq!(pipeline.run_once(0).unwrap(), 54321);
    }

    #[test]
    fn amplifier_chain_c() {
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_ONCE_C, &[1, 0, 4, 3, 2]);
        assert_eq!(pipeline.run_once(0).unwrap(), 65210);
    }
}

// =============================================================================
// Feedback Loops
// =============================================================================

mod feedback {
    use super::*;

    #[test]
    fn looping_amplifiers_a() {
        // Arrange: five machines seeded with phases 9..5
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_LOOP_A, &[9, 8, 7, 6, 5]);

        // Act & Assert: signal circulates until every machine halts
        assert_eq!(pipeline.run(0).unwrap(), 139629729);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn looping_amplifiers_b() {
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_LOOP_B, &[9, 7, 8, 5, 6]);
        assert_eq!(pipeline.run(0).unwrap(), 18216);
    }

    #[test]
    fn machines_resume_across_rotations() {
        // The looping amplifier blocks once per circuit; a full run
        // therefore exercises the resume-in-place contract many times.
        // Identical phases make the expected flow easy to confirm by a
        // second run with a fresh pipeline.
        let first = Pipeline::new(programs::AMPLIFIER_LOOP_A, &[9, 8, 7, 6, 5])
            .run(0)
            .unwrap();
        let second = Pipeline::new(programs::AMPLIFIER_LOOP_A, &[9, 8, 7, 6, 5])
            .run(0)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_machine_feedback_terminates() {
        // One amplifier feeding itself: each of its five passes emits
        // 2 * signal + (9 - 4), so 0 -> 5 -> 15 -> 35 -> 75 -> 155
        let mut pipeline = Pipeline::new(programs::AMPLIFIER_LOOP_A, &[9]);
        let answer = pipeline.run(0).unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(answer, 155);
    }
}
