/**
 * All of the regex token data-structures.
 */

use std::fmt;

/// The binary and unary operators of the regex language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Alternation,
    Concat,
    Star,
}

impl Operator {
    /// Binding strength used by the infix-to-postfix conversion. Every
    /// operator is left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Alternation => 1,
            Operator::Concat => 2,
            Operator::Star => 3,
        }
    }

    /// The number of operands the operator consumes.
    pub fn arity(self) -> usize {
        match self {
            Operator::Star => 1,
            Operator::Alternation | Operator::Concat => 2,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Alternation => '|',
            Operator::Concat => '.',
            Operator::Star => '*',
        }
    }
}

/// A single classified character of the regex source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(char),
    Operator(Operator),
    GroupOpen,
    GroupClose,
    /// Something the tokenizer saw but the language has no use for. These are
    /// rejected by the postfix conversion.
    Invalid(char),
}

impl Token {
    /// True for tokens that can end an operand (a concatenation may follow).
    pub fn is_right_boundary(&self) -> bool {
        match self {
            Token::Literal(_) | Token::GroupClose | Token::Operator(Operator::Star) => true,
            _ => false,
        }
    }

    /// True for tokens that can begin an operand (a concatenation may precede).
    pub fn is_left_boundary(&self) -> bool {
        match self {
            Token::Literal(_) | Token::GroupOpen => true,
            _ => false,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Token::Literal(c) | Token::Invalid(c) => *c,
            Token::Operator(op) => op.as_char(),
            Token::GroupOpen => '(',
            Token::GroupClose => ')',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Renders a token sequence as a space-separated string, like `a b . *`.
pub fn to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}

/**
 * The set of characters that count as symbols.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    digits: bool,
}

impl Alphabet {
    /// Lowercase ASCII letters only.
    pub fn lowercase() -> Self {
        Self{ digits: false }
    }

    /// Lowercase ASCII letters and ASCII digits.
    pub fn lowercase_and_digits() -> Self {
        Self{ digits: true }
    }

    pub fn allows_digits(&self) -> bool {
        self.digits
    }

    pub fn is_symbol(&self, c: char) -> bool {
        c.is_ascii_lowercase() || (self.digits && c.is_ascii_digit())
    }

    /// Every symbol of the alphabet, in ascending order.
    pub fn symbols(&self) -> Vec<char> {
        let mut result: Vec<char> = Vec::new();
        if self.digits {
            result.extend('0'..='9');
        }
        result.extend('a'..='z');
        result
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase_and_digits()
    }
}

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn precedences_are_ordered() {
        assert!(Operator::Alternation.precedence() < Operator::Concat.precedence());
        assert!(Operator::Concat.precedence() < Operator::Star.precedence());
    }

    #[test]
    fn boundaries() {
        assert!(Token::Literal('a').is_right_boundary());
        assert!(Token::GroupClose.is_right_boundary());
        assert!(Token::Operator(Operator::Star).is_right_boundary());
        assert!(!Token::Operator(Operator::Alternation).is_right_boundary());
        assert!(!Token::GroupOpen.is_right_boundary());

        assert!(Token::Literal('a').is_left_boundary());
        assert!(Token::GroupOpen.is_left_boundary());
        assert!(!Token::GroupClose.is_left_boundary());
        assert!(!Token::Operator(Operator::Star).is_left_boundary());
        assert!(!Token::Invalid('.').is_left_boundary());
    }

    #[test]
    fn alphabet_digits() {
        assert!(Alphabet::default().is_symbol('7'));
        assert!(!Alphabet::lowercase().is_symbol('7'));
        assert!(!Alphabet::default().is_symbol('A'));
        assert_eq!(Alphabet::lowercase().symbols().len(), 26);
        assert_eq!(Alphabet::default().symbols().len(), 36);
    }

    #[test]
    fn display_sequence() {
        let tokens = [
            Token::Literal('a'),
            Token::Literal('b'),
            Token::Operator(Operator::Concat),
            Token::Operator(Operator::Star),
        ];
        assert_eq!(to_string(&tokens), "a b . *");
    }
}
