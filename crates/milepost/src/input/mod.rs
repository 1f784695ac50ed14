use std::{error::Error, fmt::Display, io, str::FromStr};

pub mod cities;
pub mod graph_file;

#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    /// A line that does not fit the expected layout; `line` is 1-based.
    Syntax { line: usize, reason: String },
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read input: {}", err),
            Self::Syntax { line, reason } => write!(f, "line {}: {}", line, reason),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn syntax(line: usize, reason: String) -> ParseError {
    ParseError::Syntax { line, reason }
}

fn parse_number<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, ParseError> {
    token
        .trim()
        .parse()
        .map_err(|_| syntax(line, format!("'{}' is not a valid {}", token.trim(), what)))
}
