use crate::{
    options::SplitOptions,
    result::Result,
    token::{self, Statement},
    tokenizer,
};
use std::fs;
use tracing::debug;

/// Split multi-statement SQL into individual trimmed statements.
///
/// With `strip_comments`, comment atoms are removed at every nesting level before the
/// statements are flattened; statements left empty are dropped.
///
/// The only failure is malformed input, reported as `SplitError::Syntax`.
pub fn split(sql: &str, strip_comments: bool) -> Result<Vec<String>> {
    let options = SplitOptions::default().with_strip_comments(strip_comments);
    split_with_options(sql, &options)
}

/// Split multi-statement SQL using explicit options.
///
/// Invalid options fail with `SplitError::InvalidOptions`; otherwise only
/// `SplitError::Syntax` is returned.
pub fn split_with_options(sql: &str, options: &SplitOptions) -> Result<Vec<String>> {
    let statements = tokenizer::tokenize_with_options(sql, options)?;
    let result = join_statements(&statements, options.strip_comments);

    debug!(
        statements = result.len(),
        strip_comments = options.strip_comments,
        "split sql"
    );
    Ok(result)
}

/// Read a UTF-8 SQL script from disk and split it.
///
/// Convenience for callers that load scripts themselves; adds `SplitError::Io` to the
/// failures of [`split_with_options`].
pub fn split_file(path: &str, options: &SplitOptions) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    split_with_options(&content, options)
}

fn join_statements(statements: &[Statement], strip_comments: bool) -> Vec<String> {
    statements
        .iter()
        .map(|statement| {
            if strip_comments {
                token::flatten(&token::strip_comments(statement))
            } else {
                token::flatten(statement)
            }
        })
        .filter_map(|sql| {
            let trimmed = sql.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}
