use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Newick syntax error
    ParseError {
        message: String,
        /// 1-based
        line: usize,
        /// 1-based
        column: usize,
        snippet: String,
    },
    /// The input held no tree at all
    Empty,
    /// Invalid structural operation, e.g. unrooting a cherry
    LogicError(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParseError {
                message,
                line,
                column,
                snippet,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}:\n{}\nSnippet: \"{}\"",
                    line, column, message, snippet
                )
            }
            TreeError::Empty => write!(f, "No tree found in input"),
            TreeError::LogicError(msg) => write!(f, "Tree logic error: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<String> for TreeError {
    fn from(msg: String) -> Self {
        TreeError::LogicError(msg)
    }
}
