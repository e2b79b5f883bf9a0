//! Splitting of a command line into its argument vector.

use crate::error::ShellError;

/// Characters that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

const INITIAL_CAPACITY: usize = 64;

/// Returns true if `ch` separates tokens.
pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    Start,
    ReadingWord(usize), // byte offset where the word began
}

/// Splits `line` into an ordered vector of non-empty tokens.
///
/// Runs of delimiters collapse into one split point and leading or trailing
/// delimiters produce nothing, so a blank line yields an empty vector. The
/// tokens are slices of `line` and cannot outlive it.
///
/// # Errors
/// [`ShellError::Allocation`] if the token array cannot grow.
pub fn split_into_tokens(line: &str) -> Result<Vec<&str>, ShellError> {
    let mut tokens = Vec::new();
    tokens.try_reserve_exact(INITIAL_CAPACITY)?;
    let mut state = TokenizerState::Start;

    for (pos, ch) in line.char_indices() {
        match (state, is_delimiter(ch)) {
            (TokenizerState::Start, true) => {}
            (TokenizerState::Start, false) => state = TokenizerState::ReadingWord(pos),
            (TokenizerState::ReadingWord(start), true) => {
                push_token(&mut tokens, &line[start..pos])?;
                state = TokenizerState::Start;
            }
            (TokenizerState::ReadingWord(_), false) => {}
        }
    }

    if let TokenizerState::ReadingWord(start) = state {
        push_token(&mut tokens, &line[start..])?;
    }

    Ok(tokens)
}

/// Appends a token, doubling the array's capacity when it is full.
fn push_token<'a>(tokens: &mut Vec<&'a str>, token: &'a str) -> Result<(), ShellError> {
    if tokens.len() == tokens.capacity() {
        tokens.try_reserve_exact(tokens.capacity().max(1))?;
    }
    tokens.push(token);
    Ok(())
}
