use thiserror::Error;

/// Condition that made the tokenizer give up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Quoted literal opened with the given quote character was never closed
    UnterminatedQuote(char),
    UnterminatedBlockComment,
    /// Dollar-quoted literal opened with the given tag (e.g. `$body$`) was never closed
    UnterminatedDollarQuote(String),
    /// Bracket group ended by a statement boundary before its closing character
    UnterminatedGroup(char),
    /// `DELIMITER` directive without delimiter text on the same line
    MissingDelimiter,
    UnexpectedCharacter,
    /// Bracket groups nested deeper than the configured limit
    NestingTooDeep(usize),
}

impl std::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorKind::UnterminatedQuote(quote) => write!(f, "expected end quote [{quote}]"),
            SyntaxErrorKind::UnterminatedBlockComment => write!(f, "expected end of block-comment"),
            SyntaxErrorKind::UnterminatedDollarQuote(tag) => {
                write!(f, "expected end-delimiter of dollar-quoted string: {tag}")
            }
            SyntaxErrorKind::UnterminatedGroup(closing) => {
                write!(f, "expected token or group end: {closing}")
            }
            SyntaxErrorKind::MissingDelimiter => write!(f, "expected delimiter character(s)"),
            SyntaxErrorKind::UnexpectedCharacter => write!(f, "expected SQL token"),
            SyntaxErrorKind::NestingTooDeep(max) => {
                write!(f, "expected bracket nesting of at most {max} levels")
            }
        }
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

/// Main error type for the sqlsplit library
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("unexpected input: {kind}, at: {offset}, got: {}", describe_found(.found))]
    Syntax {
        kind: SyntaxErrorKind,
        offset: usize,
        found: Option<char>,
    },
    // The variants below come only from loading scripts/options and from option validation
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl SplitError {
    pub fn new_syntax(kind: SyntaxErrorKind, offset: usize, found: Option<char>) -> Self {
        SplitError::Syntax {
            kind,
            offset,
            found,
        }
    }

    /// The syntax condition, if this is a tokenizer failure
    pub fn syntax_kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            SplitError::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Byte offset of a tokenizer failure
    pub fn offset(&self) -> Option<usize> {
        match self {
            SplitError::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Type alias for Results using SplitError
pub type Result<T> = std::result::Result<T, SplitError>;
