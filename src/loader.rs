//! This module provides the `ProgramLoader` struct, responsible for reading machine definitions
//! written in the `.tm` notation from files and strings.

use crate::definition::MachineDefinition;
use crate::parser::parse;
use crate::types::TuringMachineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The file extension of machine notation files.
pub const PROGRAM_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading machine definitions.
/// It provides methods to load definitions from individual files, from string content,
/// and to discover and load all `.tm` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.tm` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is successfully read, parsed and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * Any error returned by [`parse`] if the content is not a valid machine.
    pub fn load_program(path: &Path) -> Result<MachineDefinition, TuringMachineError> {
        debug!(path = %path.display(), "Loading program");

        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine definition from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<MachineDefinition, TuringMachineError> {
        parse(content)
    }

    /// Loads every `.tm` file from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each loaded file yields either
    /// its path and definition, or the error that prevented loading it.
    pub fn load_programs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => Some(Err(TuringMachineError::FileError(format!(
                        "Failed to load program from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect();

        // Directory order is platform dependent
        results.sort_by_key(|result| match result {
            Ok((path, _)) => Some(path.clone()),
            Err(_) => None,
        });

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID: &str =
        "name: Test Program\nstates: q0\nalphabet: a\ntape: a\nrules:\n  q0, a -> H, q0";

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let definition = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(definition.name, "Test Program");
        assert_eq!(definition.initial_configuration.tape().content(), "a");
        assert_eq!(definition.instructions.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        let result = ProgramLoader::load_program(&dir.path().join("missing.tm"));

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a valid program").unwrap();

        let result = ProgramLoader::load_program(&file_path);
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        let mut valid_file = File::create(dir.path().join("valid.tm")).unwrap();
        valid_file.write_all(VALID.as_bytes()).unwrap();

        let mut invalid_file = File::create(dir.path().join("invalid.tm")).unwrap();
        invalid_file
            .write_all(b"This is not a valid program")
            .unwrap();

        // Create a non-.tm file that should be ignored
        let mut ignored_file = File::create(dir.path().join("ignored.txt")).unwrap();
        ignored_file
            .write_all(b"This file should be ignored")
            .unwrap();

        let results = ProgramLoader::load_programs(dir.path());

        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_programs_from_missing_directory() {
        let dir = tempdir().unwrap();

        let results = ProgramLoader::load_programs(&dir.path().join("nowhere"));

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
