//! Recursive-descent tokenizer for MySQL and PostgreSQL scripts.
//!
//! The input is scanned once, left to right, into statements. Each statement is a list of
//! [`Token`]s, where bracketed expressions become nested groups. Quoting, escaping, comments,
//! dollar-quoted bodies and the active statement delimiter are respected, so a delimiter
//! inside any of those never ends a statement.

use crate::{
    options::SplitOptions,
    result::{Result, SyntaxErrorKind},
    token::{Statement, Token},
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

pub mod scanner;

use scanner::Scanner;

// Regexes compiled once as lazy statics; all anchored at the cursor
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").unwrap());
static LINE_COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--[^\r\n]*").unwrap());
static SESSION_VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\w+").unwrap());
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:\w+").unwrap());
static DOLLAR_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\w*\$").unwrap());
static DIRECTIVE_SPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]+").unwrap());
static DIRECTIVE_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\r\n]*[\r\n]*").unwrap());

const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '.', ',', '!', '=', '^', '|', '&', '<', '>', ':', '@', '%', '~', '#',
];

const DELIMITER_DIRECTIVE: &str = "DELIMITER";

fn closing_bracket(opening: char) -> Option<char> {
    match opening {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

/// Tokenize SQL text into statements using the default options.
///
/// Malformed input is the only failure: the error is always `SplitError::Syntax`.
pub fn tokenize(input: &str) -> Result<Vec<Statement>> {
    tokenize_with_options(input, &SplitOptions::default())
}

/// Tokenize SQL text into statements.
///
/// Besides `SplitError::Syntax`, fails with `SplitError::InvalidOptions` for options that
/// do not pass `SplitOptions::validate`.
pub fn tokenize_with_options(input: &str, options: &SplitOptions) -> Result<Vec<Statement>> {
    Tokenizer::new(input, options)?.statements()
}

/// Single-use tokenizer state: the cursor and the delimiter currently in effect
#[derive(Debug)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    delimiter: String,
    directive_enabled: bool,
    max_depth: usize,
}

impl<'a> Tokenizer<'a> {
    /// Fails with `SplitError::InvalidOptions` when the options cannot drive a scan
    pub fn new(input: &'a str, options: &SplitOptions) -> Result<Self> {
        options.validate()?;
        Ok(Tokenizer {
            scanner: Scanner::new(input),
            delimiter: options.delimiter.clone(),
            directive_enabled: options.delimiter_directive,
            max_depth: options.max_depth,
        })
    }

    /// Consume the whole input. Statements without tokens are dropped.
    pub fn statements(mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();

        loop {
            self.scanner.consume(&WHITESPACE_REGEX);

            if self.scanner.is_eof() {
                break;
            }

            let statement = self.statement()?;
            if !statement.is_empty() {
                trace!(
                    index = statements.len(),
                    tokens = statement.len(),
                    "statement tokenized"
                );
                statements.push(statement);
            }
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Statement> {
        let mut tokens = Vec::new();

        while let Some(token) = self.token(0)? {
            if self.directive_enabled && is_delimiter_directive(&token) {
                // The directive is client syntax, not part of the statement
                self.delimiter_directive()?;
                continue;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Read the rest of the directive line as the new delimiter
    fn delimiter_directive(&mut self) -> Result<()> {
        self.scanner.consume(&DIRECTIVE_SPACES_REGEX);

        let start = self.scanner.offset();
        let delimiter = self
            .scanner
            .consume(&DIRECTIVE_LINE_REGEX)
            .unwrap_or_default()
            .trim();

        if delimiter.is_empty() {
            return Err(self
                .scanner
                .fail_at(SyntaxErrorKind::MissingDelimiter, start));
        }

        debug!(offset = start, delimiter, "statement delimiter changed");
        self.delimiter = delimiter.to_string();
        Ok(())
    }

    /// Next token, or `None` at a statement boundary (active delimiter or end of input).
    /// Rules are tried in order and the first match wins.
    fn token(&mut self, depth: usize) -> Result<Option<Token>> {
        if self.scanner.consume_exact(&self.delimiter).is_some() {
            return Ok(None);
        }

        if let Some(word) = self.scanner.consume(&WORD_REGEX) {
            return Ok(Some(Token::atom(word)));
        }

        if let Some(space) = self.scanner.consume(&WHITESPACE_REGEX) {
            return Ok(Some(Token::atom(space)));
        }

        if let Some(comment) = self.comment()? {
            return Ok(Some(Token::atom(comment)));
        }

        if let Some(variable) = self.scanner.consume(&SESSION_VARIABLE_REGEX) {
            return Ok(Some(Token::atom(variable)));
        }

        if let Some(placeholder) = self.scanner.consume(&PLACEHOLDER_REGEX) {
            return Ok(Some(Token::atom(placeholder)));
        }

        if let Some(operator) = self.operator_run() {
            return Ok(Some(Token::atom(operator)));
        }

        // Only reachable once a DELIMITER directive moved the delimiter away from ';'
        if let Some(semicolon) = self.scanner.consume_exact(";") {
            return Ok(Some(Token::atom(semicolon)));
        }

        if let Some(quoted) = self.quoted()? {
            return Ok(Some(Token::atom(quoted)));
        }

        if let Some(group) = self.grouped(depth)? {
            return Ok(Some(Token::Group(group)));
        }

        if let Some(body) = self.dollar_quoted()? {
            return Ok(Some(Token::atom(body)));
        }

        if self.scanner.is_eof() {
            return Ok(None);
        }

        Err(self.scanner.fail(SyntaxErrorKind::UnexpectedCharacter))
    }

    fn comment(&mut self) -> Result<Option<&'a str>> {
        if let Some(line) = self.scanner.consume(&LINE_COMMENT_REGEX) {
            return Ok(Some(line));
        }

        if !self.scanner.is("/*") {
            return Ok(None);
        }

        match self.scanner.rest()[2..].find("*/") {
            Some(end) => Ok(Some(self.scanner.advance(end + 4))),
            None => Err(self.scanner.fail(SyntaxErrorKind::UnterminatedBlockComment)),
        }
    }

    /// Greedy run of operator characters. The run stops where a comment or the active
    /// delimiter begins, so `=--` and `END//` keep their comment and delimiter.
    fn operator_run(&mut self) -> Option<&'a str> {
        let start = self.scanner.offset();

        while let Some(c) = self.scanner.peek() {
            if !OPERATOR_CHARS.contains(&c) || self.at_boundary() {
                break;
            }
            self.scanner.advance(c.len_utf8());
        }

        (self.scanner.offset() > start).then(|| self.scanner.since(start))
    }

    fn at_boundary(&self) -> bool {
        self.scanner.is("--") || self.scanner.is("/*") || self.scanner.is(&self.delimiter)
    }

    /// Quoted literal; a backslash escapes exactly the next character, copied verbatim
    fn quoted(&mut self) -> Result<Option<&'a str>> {
        let quote = match self.scanner.peek() {
            Some(c @ ('`' | '\'' | '"')) => c,
            _ => return Ok(None),
        };

        let start = self.scanner.offset();
        self.scanner.advance(1);

        loop {
            match self.scanner.peek() {
                Some('\\') => {
                    self.scanner.advance(1);
                    if self.scanner.bump().is_none() {
                        break;
                    }
                }
                Some(c) if c == quote => {
                    self.scanner.advance(1);
                    return Ok(Some(self.scanner.since(start)));
                }
                Some(c) => {
                    self.scanner.advance(c.len_utf8());
                }
                None => break,
            }
        }

        Err(self
            .scanner
            .fail_at(SyntaxErrorKind::UnterminatedQuote(quote), start))
    }

    /// Bracketed group; the closing bracket is the group's last element
    fn grouped(&mut self, depth: usize) -> Result<Option<Vec<Token>>> {
        let Some(closing) = self.scanner.peek().and_then(closing_bracket) else {
            return Ok(None);
        };

        if depth >= self.max_depth {
            return Err(self
                .scanner
                .fail(SyntaxErrorKind::NestingTooDeep(self.max_depth)));
        }

        let mut tokens = vec![Token::atom(self.scanner.advance(1))];

        loop {
            if self.scanner.peek() == Some(closing) {
                tokens.push(Token::atom(self.scanner.advance(1)));
                return Ok(Some(tokens));
            }

            let boundary = self.scanner.offset();
            match self.token(depth + 1)? {
                Some(token) => tokens.push(token),
                None => {
                    return Err(self
                        .scanner
                        .fail_at(SyntaxErrorKind::UnterminatedGroup(closing), boundary));
                }
            }
        }
    }

    /// PostgreSQL dollar-quoted literal: `$tag$ ... $tag$`
    fn dollar_quoted(&mut self) -> Result<Option<&'a str>> {
        let start = self.scanner.offset();
        let Some(tag) = self.scanner.consume(&DOLLAR_TAG_REGEX) else {
            return Ok(None);
        };

        match self.scanner.rest().find(tag) {
            Some(end) => {
                self.scanner.advance(end + tag.len());
                Ok(Some(self.scanner.since(start)))
            }
            None => Err(self.scanner.fail_at(
                SyntaxErrorKind::UnterminatedDollarQuote(tag.to_string()),
                start,
            )),
        }
    }
}

fn is_delimiter_directive(token: &Token) -> bool {
    token
        .as_atom()
        .is_some_and(|word| word.eq_ignore_ascii_case(DELIMITER_DIRECTIVE))
}
