//! Property-based tests for the execution engine.
//!
//! These tests use proptest to check determinism, halt closure and reset fidelity over
//! randomly generated input tapes.

use proptest::prelude::*;
use turing_engine::{Configuration, ProgramManager, Tape, TuringMachine};

fn machine_with_tape(name: &str, tape: &str, cursor: i64) -> TuringMachine {
    let definition = ProgramManager::get_program_by_name(name).unwrap();
    let mut machine = TuringMachine::new(definition).unwrap();
    let initial_state = machine.initial_state().to_string();

    machine
        .set_initial_configuration(Configuration::new(
            initial_state,
            Tape::new(tape.chars(), 0).unwrap(),
            cursor,
        ))
        .unwrap();
    machine
}

prop_compose! {
    fn binary_number()(bits in prop::collection::vec(prop::bool::ANY, 1..16)) -> String {
        bits.into_iter().map(|bit| if bit { '1' } else { '0' }).collect()
    }
}

proptest! {
    #[test]
    fn runs_are_deterministic(input in binary_number()) {
        let mut machine = machine_with_tape("Binary complement", &input, 0);

        let first = machine.run_until_halt().unwrap();
        machine.reset();
        let second = machine.run_until_halt().unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn only_the_last_step_halts(input in binary_number()) {
        let mut machine = machine_with_tape("Binary complement", &input, 0);

        let records = machine.run_until_halt().unwrap();
        let (last, rest) = records.split_last().unwrap();

        prop_assert!(last.is_halt());
        prop_assert!(rest.iter().all(|record| !record.is_halt()));
        prop_assert_eq!(records.len(), 2 * input.len() + 2);
    }

    #[test]
    fn complement_flips_every_bit(input in binary_number()) {
        let mut machine = machine_with_tape("Binary complement", &input, 0);

        let records = machine.run_until_halt().unwrap();
        let expected: String = input
            .chars()
            .map(|bit| if bit == '1' { '0' } else { '1' })
            .collect();

        prop_assert_eq!(records.last().unwrap().configuration.tape().content(), expected);
    }

    #[test]
    fn successor_adds_one_mark(marks in 0usize..24) {
        let mut machine = machine_with_tape("Unary successor", &"|".repeat(marks), 0);

        let records = machine.run_until_halt().unwrap();
        let last = &records.last().unwrap().configuration;

        prop_assert_eq!(last.tape().content(), "|".repeat(marks + 1));
        prop_assert_eq!(last.cursor(), marks as i64);
        prop_assert_eq!(last.state(), "q1");
    }

    #[test]
    fn reset_restores_initial_configuration(input in binary_number(), steps in 0usize..8) {
        let mut machine = machine_with_tape("Binary complement", &input, 0);
        let initial = machine.initial_configuration().clone();

        for _ in 0..steps {
            machine.step().unwrap();
        }
        machine.reset();

        prop_assert_eq!(machine.configuration(), &initial);
        prop_assert_eq!(machine.configuration().tape().content(), input);
        prop_assert_eq!(machine.step_count(), 0);
    }
}
