//! This module provides the `InputLoader` struct, responsible for reading batches of machine
//! inputs from files and strings.

use crate::types::SimulatorError;
use std::fs;
use std::path::Path;

/// Lines starting with this character are comments.
const COMMENT_PREFIX: char = ';';

/// `InputLoader` reads machine inputs, one per line.
///
/// Blank lines and lines starting with `;` are skipped. Each remaining line is kept as
/// written (apart from surrounding whitespace); normalization happens when a
/// [`crate::Simulator`] is built from it.
pub struct InputLoader;

impl InputLoader {
    /// Loads every input listed in the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` with the inputs in file order.
    /// * `Err(SimulatorError::FileError)` if the file cannot be read.
    pub fn load_inputs(path: &Path) -> Result<Vec<String>, SimulatorError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SimulatorError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(Self::load_inputs_from_string(&content))
    }

    /// Splits `content` into inputs, one per non-comment, non-blank line.
    pub fn load_inputs_from_string(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_inputs_from_string() {
        let content = "; operands\n101 # 011\n\n  011#101  \n;101#\n101#";

        let inputs = InputLoader::load_inputs_from_string(content);
        assert_eq!(inputs, vec!["101 # 011", "011#101", "101#"]);
    }

    #[test]
    fn test_load_inputs_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("inputs.txt");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"101#011\n101#101\n").unwrap();

        let inputs = InputLoader::load_inputs(&file_path).unwrap();
        assert_eq!(inputs, vec!["101#011", "101#101"]);
    }

    #[test]
    fn test_load_inputs_missing_file() {
        let dir = tempdir().unwrap();
        let result = InputLoader::load_inputs(&dir.path().join("missing.txt"));

        assert!(matches!(result, Err(SimulatorError::FileError(_))));
    }
}
