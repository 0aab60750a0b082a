use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - The path `-` reads standard input instead
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
    let mut contents = String::new();
    if filename.as_ref() == Path::new("-") {
        io::stdin().read_to_string(&mut contents)?;
    } else {
        File::open(filename)?.read_to_string(&mut contents)?;
    }
    Ok(contents.lines().map(str::to_owned).collect())
}

/// How a line of text is split into gram elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Unit {
    /// One element per character.
    Chars,
    /// One element per whitespace-separated word.
    Words,
}

impl Unit {
    /// Splits `line` into elements.
    ///
    /// Example:
    /// `"my cat"` → `["m", "y", " ", "c", "a", "t"]` (chars)
    /// `"my cat"` → `["my", "cat"]` (words)
    pub(crate) fn segment(self, line: &str) -> Vec<String> {
        match self {
            Unit::Chars => line.chars().map(String::from).collect(),
            Unit::Words => line.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Joins elements back into display text.
    pub(crate) fn join(self, gram: &[String]) -> String {
        match self {
            Unit::Chars => gram.concat(),
            Unit::Words => gram.join(" "),
        }
    }
}
