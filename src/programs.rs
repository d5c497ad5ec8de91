use crate::definition::MachineDefinition;
use crate::types::TuringMachineError;
use tracing::warn;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/tally-marker.tm"),
    include_str!("../programs/unary-successor.tm"),
    include_str!("../programs/binary-complement.tm"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<MachineDefinition> = PROGRAM_TEXTS
        .iter()
        .enumerate()
        .filter_map(|(index, text)| match crate::parser::parse(text) {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!(index, error = %e, "Failed to parse built-in program");
                None
            }
        })
        .collect();
}

/// Access to the built-in machine definitions.
pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<MachineDefinition, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<MachineDefinition, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS
            .iter()
            .map(|definition| definition.name.clone())
            .collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let definition = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: definition.name.clone(),
            initial_state: definition.initial_state.clone(),
            initial_tape: definition.initial_configuration.tape().content(),
            state_count: definition.states.len(),
            rule_count: definition.instructions.len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, definition)| definition.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Get the source text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAM_TEXTS.get(index).copied().ok_or_else(|| {
            TuringMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub rule_count: usize,
}
