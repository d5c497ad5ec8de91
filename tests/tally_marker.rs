//! End-to-end run of the tally marker machine, built in code.

use turing_engine::{
    Action, Configuration, DefinitionError, MachineDefinition, Quadruple, Tape, TuringMachine,
    TuringMachineError,
};

fn tally_marker() -> MachineDefinition {
    use Action::{Halt, Left, Right, Write};

    let rules = vec![
        Quadruple::new("q0", '*', Left, "q1"),
        Quadruple::new("q0", '|', Left, "q0"),
        Quadruple::new("q1", '*', Left, "q2"),
        Quadruple::new("q1", '|', Left, "q1"),
        Quadruple::new("q2", '*', Left, "q2"),
        Quadruple::new("q2", '|', Write('*'), "q3"),
        Quadruple::new("q3", '*', Left, "q4"),
        Quadruple::new("q3", '|', Write('|'), "q3"),
        Quadruple::new("q4", '*', Halt, "q4"),
        Quadruple::new("q4", '|', Right, "q5"),
        Quadruple::new("q5", '*', Right, "q5"),
        Quadruple::new("q5", '|', Write('*'), "q6"),
        Quadruple::new("q6", '*', Right, "q7"),
        Quadruple::new("q6", '|', Write('|'), "q6"),
        Quadruple::new("q7", '*', Write('|'), "q8"),
        Quadruple::new("q7", '|', Left, "q2"),
        Quadruple::new("q8", '*', Write('*'), "q8"),
        Quadruple::new("q8", '|', Halt, "q8"),
    ];

    MachineDefinition::from_quadruples(
        (0..9).map(|i| format!("q{i}")),
        ["*", "|"],
        rules,
        "q0",
        Configuration::new("q0", Tape::new("*||*|*".chars(), 0).unwrap(), 5),
    )
}

#[test]
fn test_tally_marker_runs_to_halt() {
    let mut machine = TuringMachine::new(tally_marker()).unwrap();

    let records = machine.run_until_halt().unwrap();

    assert_eq!(records.len(), 12);
    let last = records.last().unwrap();
    assert_eq!(last.instruction.action(), Action::Halt);
    assert_eq!(last.instruction.state(), "q8");
    assert_eq!(last.configuration.state(), "q8");
    assert_eq!(last.configuration.cursor(), 5);
    assert_eq!(last.configuration.tape().content(), "*|***|");
}

#[test]
fn test_tally_marker_trace() {
    let mut machine = TuringMachine::new(tally_marker()).unwrap();

    let records = machine.run_until_halt().unwrap();
    let steps: Vec<(&str, i64, String)> = records
        .iter()
        .map(|record| {
            (
                record.configuration.state(),
                record.configuration.cursor(),
                record.configuration.tape().content(),
            )
        })
        .collect();

    assert_eq!(
        steps,
        vec![
            ("q1", 4, "*||*|*".to_string()),
            ("q1", 3, "*||*|*".to_string()),
            ("q2", 2, "*||*|*".to_string()),
            ("q3", 2, "*|**|*".to_string()),
            ("q4", 1, "*|**|*".to_string()),
            ("q5", 2, "*|**|*".to_string()),
            ("q5", 3, "*|**|*".to_string()),
            ("q5", 4, "*|**|*".to_string()),
            ("q6", 4, "*|****".to_string()),
            ("q7", 5, "*|****".to_string()),
            ("q8", 5, "*|***|".to_string()),
            ("q8", 5, "*|***|".to_string()),
        ]
    );
}

#[test]
fn test_only_last_record_halts() {
    let mut machine = TuringMachine::new(tally_marker()).unwrap();

    let records = machine.run_until_halt().unwrap();
    let (last, rest) = records.split_last().unwrap();

    assert!(last.is_halt());
    assert!(rest.iter().all(|record| !record.is_halt()));
}

#[test]
fn test_runs_are_identical_after_reset() {
    let mut machine = TuringMachine::new(tally_marker()).unwrap();

    let first = machine.run_until_halt().unwrap();
    machine.reset();
    let second = machine.run_until_halt().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reset_after_partial_run() {
    let mut machine = TuringMachine::new(tally_marker()).unwrap();

    for _ in 0..7 {
        machine.step().unwrap();
    }
    assert_eq!(machine.configuration().tape().content(), "*|**|*");

    machine.reset();

    assert_eq!(machine.configuration().state(), "q0");
    assert_eq!(machine.configuration().cursor(), 5);
    assert_eq!(machine.configuration().tape().content(), "*||*|*");
    assert_eq!(machine.configuration(), machine.initial_configuration());
}

#[test]
fn test_initial_configuration_is_captured_at_construction() {
    let mut definition = tally_marker();
    let machine = TuringMachine::new(definition.clone()).unwrap();

    // Changing the definition afterwards does not reach the engine
    definition.initial_configuration = Configuration::new("q0", Tape::new("|".chars(), 0).unwrap(), 0);

    assert_eq!(machine.initial_configuration().tape().content(), "*||*|*");
}

#[test]
fn test_construction_rejections() {
    let mut wide = tally_marker();
    wide.alphabet.insert("**".to_string());
    assert_eq!(
        TuringMachine::new(wide).unwrap_err(),
        TuringMachineError::Definition(DefinitionError::InvalidSymbol("**".to_string()))
    );

    let mut stateless = tally_marker();
    stateless.states.clear();
    assert_eq!(
        TuringMachine::new(stateless).unwrap_err(),
        TuringMachineError::Definition(DefinitionError::EmptyStates)
    );

    let mut unbalanced = tally_marker();
    unbalanced.instructions.pop();
    assert_eq!(
        TuringMachine::new(unbalanced).unwrap_err(),
        TuringMachineError::Definition(DefinitionError::RuleCountMismatch {
            instructions: 17,
            transitions: 18,
        })
    );

    let mut misplaced = tally_marker();
    misplaced.initial_configuration =
        Configuration::new("q4", Tape::new("*||*|*".chars(), 0).unwrap(), 5);
    assert_eq!(
        TuringMachine::new(misplaced).unwrap_err(),
        TuringMachineError::Definition(DefinitionError::InitialConfigurationState {
            expected: "q0".to_string(),
            found: "q4".to_string(),
        })
    );
}

#[test]
fn test_builtin_matches_code_definition() {
    let builtin = turing_engine::ProgramManager::get_program_by_name("Tally marker").unwrap();
    let mut from_text = TuringMachine::new(builtin).unwrap();
    let mut from_code = TuringMachine::new(tally_marker()).unwrap();

    assert_eq!(
        from_text.run_until_halt().unwrap(),
        from_code.run_until_halt().unwrap()
    );
}
