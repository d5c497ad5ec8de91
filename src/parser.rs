//! This module provides the parser for the `.tm` machine notation, utilizing the `pest` crate.
//! It defines the grammar in `grammar.pest` and functions to turn a source into a validated
//! `MachineDefinition`.

use crate::{
    analyzer::validate,
    configuration::Configuration,
    definition::MachineDefinition,
    rules::{Action, Quadruple},
    tape::{Tape, TapePolicy},
    types::{Symbol, TuringMachineError, DEFAULT_BLANK_SYMBOL, MAX_PROGRAM_SIZE},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Position, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the machine notation defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineParser;

/// Parses the given input string into a `MachineDefinition`.
///
/// This is the main entry point for parsing machine notation. The parsed definition is
/// validated before being returned, so it is guaranteed to build an engine.
///
/// # Arguments
///
/// * `input` - A string slice containing the machine notation.
///
/// # Returns
///
/// * `Ok(MachineDefinition)` if the input is successfully parsed and validated.
/// * `Err(TuringMachineError::ParseError)` if there are any syntax errors.
/// * `Err(TuringMachineError::ValidationError)` if a required section is missing.
/// * `Err(TuringMachineError::Definition)` if the machine itself is malformed.
pub fn parse(input: &str) -> Result<MachineDefinition, TuringMachineError> {
    if input.len() > MAX_PROGRAM_SIZE {
        return Err(TuringMachineError::ValidationError(format!(
            "Program is {} bytes, the limit is {} bytes",
            input.len(),
            MAX_PROGRAM_SIZE
        )));
    }

    let input = input.trim();
    let root = MachineParser::parse(Rule::program, input)
        .map_err(|e| TuringMachineError::ParseError(Box::new(e)))?
        .next()
        .ok_or_else(|| {
            position_error("Empty program", Position::from_start(input))
        })?;

    let definition = parse_program(root)?;

    validate(&definition)?;

    Ok(definition)
}

/// Parses the top-level sections of a program from a `Pair<Rule::program>`.
fn parse_program(pair: Pair<Rule>) -> Result<MachineDefinition, TuringMachineError> {
    let mut name: Option<String> = None;
    let mut states: Option<Vec<String>> = None;
    let mut alphabet: Option<Vec<String>> = None;
    let mut blank: Option<Symbol> = None;
    let mut initial_state: Option<String> = None;
    let mut mode: Option<TapePolicy> = None;
    let mut tape: Option<Vec<Symbol>> = None;
    let mut offset: Option<i64> = None;
    let mut cursor: Option<i64> = None;
    let mut rules: Option<Vec<Quadruple>> = None;
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        let span = p.as_span();
        let kind = p.as_rule();

        check_unique_rule(kind, span, &mut seen)?;

        match kind {
            Rule::name => name = Some(p.into_inner().as_str().trim().to_string()),
            Rule::states => states = Some(p.into_inner().map(|s| s.as_str().into()).collect()),
            Rule::alphabet => alphabet = Some(p.into_inner().map(|s| parse_token(s.as_str())).collect()),
            Rule::blank => blank = Some(parse_symbol(p.into_inner().as_str())),
            Rule::initial => initial_state = Some(p.into_inner().as_str().into()),
            Rule::mode => mode = Some(parse_mode(p)),
            Rule::tape => tape = Some(p.into_inner().map(|s| parse_symbol(s.as_str())).collect()),
            Rule::offset => offset = Some(parse_integer(p)?),
            Rule::cursor => cursor = Some(parse_integer(p)?),
            Rule::rules => rules = Some(parse_rules(p)?),
            _ => {} // EOI
        }
    }

    // Handle mandatory checks
    let name = check_required_rule(name, "name")?;
    let states = check_required_rule(states, "states")?;
    let alphabet = check_required_rule(alphabet, "alphabet")?;
    let symbols = check_required_rule(tape, "tape")?;
    let rules = check_required_rule(rules, "rules")?;

    // The first rule's state is the initial state unless one is declared
    let initial_state = match initial_state {
        Some(state) => state,
        None => rules
            .first()
            .map(|rule| rule.state.clone())
            .ok_or_else(|| TuringMachineError::ValidationError("No rules defined".into()))?,
    };

    let tape = Tape::new(symbols, offset.unwrap_or(0))?
        .with_blank(blank.unwrap_or(DEFAULT_BLANK_SYMBOL))
        .with_policy(mode.unwrap_or_default());
    let configuration = Configuration::new(initial_state.as_str(), tape, cursor.unwrap_or(0));

    Ok(MachineDefinition::from_quadruples(
        states,
        alphabet,
        rules,
        initial_state,
        configuration,
    )
    .with_name(name))
}

/// Parses the rules section, rejecting a `(state, symbol)` key that appears twice.
fn parse_rules(pair: Pair<Rule>) -> Result<Vec<Quadruple>, TuringMachineError> {
    let mut rules = Vec::new();
    let mut keys = HashSet::new();

    for rule_pair in pair.into_inner() {
        let span = rule_pair.as_span();
        let rule = parse_rule(rule_pair)?;

        if !keys.insert((rule.state.clone(), rule.symbol)) {
            return Err(parse_error(
                &format!(
                    "Duplicate rule for state {} and symbol '{}'",
                    rule.state, rule.symbol
                ),
                span,
            ));
        }

        rules.push(rule);
    }

    Ok(rules)
}

/// Parses a single `state, symbol -> action, next_state` rule.
fn parse_rule(pair: Pair<Rule>) -> Result<Quadruple, TuringMachineError> {
    let span = pair.as_span();
    let parts: Vec<Pair<Rule>> = pair.into_inner().collect();

    let [state, symbol, action, next_state] = parts.as_slice() else {
        return Err(parse_error("Malformed rule", span));
    };

    Ok(Quadruple::new(
        state.as_str(),
        parse_symbol(symbol.as_str()),
        parse_action(action.clone())?,
        next_state.as_str(),
    ))
}

/// Parses an action: `L`/`<`, `R`/`>`, `H`, or a quoted symbol to write.
fn parse_action(pair: Pair<Rule>) -> Result<Action, TuringMachineError> {
    let span = pair.as_span();
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| parse_error("Missing action", span))?;

    match inner.as_rule() {
        Rule::left => Ok(Action::Left),
        Rule::right => Ok(Action::Right),
        Rule::halt => Ok(Action::Halt),
        Rule::write => Ok(Action::Write(parse_symbol(inner.as_str()))),
        _ => Err(parse_error(
            &format!("Unsupported action: {}", inner.as_str()),
            span,
        )),
    }
}

fn parse_mode(pair: Pair<Rule>) -> TapePolicy {
    match pair.into_inner().next().map(|p| p.as_rule()) {
        Some(Rule::bounded) => TapePolicy::Bounded,
        _ => TapePolicy::Unbounded,
    }
}

fn parse_integer(pair: Pair<Rule>) -> Result<i64, TuringMachineError> {
    let span = pair.as_span();
    let value = pair.into_inner().as_str();

    value
        .parse::<i64>()
        .map_err(|e| parse_error(&format!("Invalid integer {value}: {e}"), span))
}

/// Parses a single character symbol from a string, handling quoted and unquoted symbols.
fn parse_symbol(input: &str) -> Symbol {
    let unquoted = input
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(input);

    unquoted.chars().next().unwrap_or(DEFAULT_BLANK_SYMBOL)
}

/// Parses an alphabet entry, which may be longer than one character.
fn parse_token(input: &str) -> String {
    input
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(input)
        .to_string()
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

fn position_error(msg: &str, position: Position) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_pos(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        position,
    )))
}

/// Checks if a given section has already been declared.
fn check_unique_rule(
    kind: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), TuringMachineError> {
    if kind == Rule::EOI {
        return Ok(());
    }

    if !seen.insert(kind) {
        return Err(parse_error(
            &format!("Duplicate \"{kind:?}:\" declaration"),
            span,
        ));
    }

    Ok(())
}

/// Checks if a required section is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, name: &str) -> Result<T, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing '{name}' section")))
}
