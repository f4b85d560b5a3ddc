//! Split MySQL and PostgreSQL scripts into individual statements.
//!
//! Statement delimiters inside string literals, quoted identifiers, comments,
//! dollar-quoted bodies and bracketed expressions are left alone, and MySQL client
//! `DELIMITER` directives are honoured.

pub mod options;
pub mod result;
pub mod splitter;
pub mod token;
pub mod tokenizer;

// Re-export types for convenience
pub use options::SplitOptions;
pub use result::{Result, SplitError, SyntaxErrorKind};
pub use splitter::{split, split_file, split_with_options};
pub use token::{Statement, Token};
pub use tokenizer::{tokenize, tokenize_with_options};
