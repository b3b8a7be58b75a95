pub use self::records::{Extractor, ExtractorBuilder};

mod records;

use std::fs;

/// Reads a whole file into memory as a vector of lines.
/// Exits the program with exit code 1 if the file cannot be read.
pub fn read_lines(path: &str) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => text.lines().map(String::from).collect(),
        Err(error) => {
            error!("Could not open {}: {}", path, error);
            std::process::exit(1);
        }
    }
}
