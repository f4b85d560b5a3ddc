use serde::{Deserialize, Serialize};

/// A lexical token of a SQL statement.
///
/// Serializes to the plain nested-sequence shape: an atom becomes a JSON string,
/// a group becomes a JSON array of its children (opening and closing bracket included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    /// Verbatim substring of the input (word, whitespace, operator run, comment, literal, placeholder)
    Atom(String),
    /// Bracketed sequence; the first element is the opening bracket, the last the closing one
    Group(Vec<Token>),
}

/// Ordered top-level tokens between two delimiter boundaries
pub type Statement = Vec<Token>;

impl Token {
    pub fn atom(text: impl Into<String>) -> Self {
        Token::Atom(text.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Token::Atom(text) => Some(text),
            Token::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Token]> {
        match self {
            Token::Atom(_) => None,
            Token::Group(tokens) => Some(tokens),
        }
    }

    /// Line (`--`) or block (`/*`) comment atom. Groups are never comments.
    pub fn is_comment(&self) -> bool {
        match self {
            Token::Atom(text) => text.starts_with("--") || text.starts_with("/*"),
            Token::Group(_) => false,
        }
    }

    /// Depth-first concatenation of all atoms
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        match self {
            Token::Atom(text) => out.push_str(text),
            Token::Group(tokens) => {
                for token in tokens {
                    token.write_text(out);
                }
            }
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Atom(text) => f.write_str(text),
            Token::Group(tokens) => tokens.iter().try_for_each(|t| write!(f, "{t}")),
        }
    }
}

/// Flatten a statement's token tree into its source text
pub fn flatten(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_text(&mut out);
    }
    out
}

/// Remove comment atoms at every nesting level
pub fn strip_comments(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| !token.is_comment())
        .map(|token| match token {
            Token::Atom(text) => Token::Atom(text.clone()),
            Token::Group(children) => Token::Group(strip_comments(children)),
        })
        .collect()
}
