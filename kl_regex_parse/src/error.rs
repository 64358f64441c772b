/**
 * Errors of the regex front-end.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the regular expression is empty")]
    EmptyExpression,
    #[error("'.' is the concatenation operator and can not appear in the input (token {index})")]
    ReservedOperator { index: usize },
    #[error("unsupported character {character:?} (token {index})")]
    UnsupportedCharacter { character: char, index: usize },
    #[error("')' without a matching '(' (token {index})")]
    UnbalancedGroupClose { index: usize },
    #[error("{count} '(' never closed")]
    UnclosedGroup { count: usize },
}
