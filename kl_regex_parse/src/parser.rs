/**
 * Turns a regex string into a postfix token sequence.
 */

use log::{debug, trace};
use crate::error::ParseError;
use crate::token::{Alphabet, Operator, Token};

/*
 * The conversion happens in three passes:
 *
 *  source  ::= tokenize               ::= "(ab)*"   -> ( a b ) *
 *  tokens  ::= insert_concatenation   ::= ( a b ) * -> ( a . b ) *
 *  infix   ::= to_postfix             ::= ( a . b ) * -> a b . *
 *
 * Only the last pass can fail. Operator arity is not checked here, a dangling
 * operator is found by whoever evaluates the postfix sequence.
 */

/// The output of every pass, kept for callers that want to show the steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub tokens: Vec<Token>,
    pub with_concatenation: Vec<Token>,
    pub postfix: Vec<Token>,
}

/**
 * Actual parsing.
 */

pub fn parse(source: &str, alphabet: &Alphabet) -> Result<Vec<Token>, ParseError> {
    parse_traced(source, alphabet).map(|p| p.postfix)
}

pub fn parse_traced(source: &str, alphabet: &Alphabet) -> Result<Parsed, ParseError> {
    let tokens = tokenize(source, alphabet);
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    // Report bad characters against the user's own token positions
    for (index, token) in tokens.iter().enumerate() {
        if let Token::Invalid(c) = token {
            return Err(invalid_token(index, *c));
        }
    }

    let with_concatenation = insert_concatenation(&tokens);
    let postfix = to_postfix(&with_concatenation)?;
    debug!("parsed {:?} into {} postfix tokens", source, postfix.len());

    Ok(Parsed{ tokens, with_concatenation, postfix })
}

/// Splits the source into single-character tokens, skipping whitespace.
/// Characters the alphabet does not know become `Token::Invalid`.
pub fn tokenize(source: &str, alphabet: &Alphabet) -> Vec<Token> {
    source.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| classify(c, alphabet))
        .collect()
}

fn classify(c: char, alphabet: &Alphabet) -> Token {
    match c {
        '|' => Token::Operator(Operator::Alternation),
        '*' => Token::Operator(Operator::Star),
        '(' => Token::GroupOpen,
        ')' => Token::GroupClose,
        // '.' is only ever produced by insert_concatenation
        c if alphabet.is_symbol(c) => Token::Literal(c),
        c => Token::Invalid(c),
    }
}

/// Makes the implicit concatenations explicit: `ab` becomes `a.b`.
pub fn insert_concatenation(tokens: &[Token]) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        result.push(*token);
        if let Some(next) = tokens.get(i + 1) {
            if token.is_right_boundary() && next.is_left_boundary() {
                result.push(Token::Operator(Operator::Concat));
            }
        }
    }
    result
}

/// Shunting-yard conversion of an infix token sequence. Error indices refer
/// to positions in `tokens`.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stk: Vec<(usize, Token)> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(_) => output.push(*token),

            Token::GroupOpen => stk.push((index, *token)),

            Token::GroupClose => {
                loop {
                    match stk.pop() {
                        Some((_, Token::GroupOpen)) => break,
                        Some((_, op)) => output.push(op),
                        None => return Err(ParseError::UnbalancedGroupClose{ index }),
                    }
                }
            },

            Token::Operator(incoming) => {
                while let Some((_, Token::Operator(top))) = stk.last() {
                    if top.precedence() >= incoming.precedence() {
                        output.push(Token::Operator(*top));
                        stk.pop();
                    }
                    else {
                        break;
                    }
                }
                stk.push((index, *token));
            },

            Token::Invalid(c) => return Err(invalid_token(index, *c)),
        }
        trace!("postfix step {}: {:?}, output has {} tokens", index, token, output.len());
    }

    let unclosed = stk.iter().filter(|(_, t)| *t == Token::GroupOpen).count();
    if unclosed > 0 {
        return Err(ParseError::UnclosedGroup{ count: unclosed });
    }
    while let Some((_, op)) = stk.pop() {
        output.push(op);
    }
    Ok(output)
}

fn invalid_token(index: usize, character: char) -> ParseError {
    if character == '.' {
        ParseError::ReservedOperator{ index }
    }
    else {
        ParseError::UnsupportedCharacter{ character, index }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod regex_parser_tests {
    use super::*;
    use crate::token::to_string;

    /**
     * Helpers to construct results.
     */

    fn lit(c: char) -> Token {
        Token::Literal(c)
    }

    fn cat() -> Token {
        Token::Operator(Operator::Concat)
    }

    fn alt() -> Token {
        Token::Operator(Operator::Alternation)
    }

    fn star() -> Token {
        Token::Operator(Operator::Star)
    }

    fn postfix_of(source: &str) -> String {
        to_string(&parse(source, &Alphabet::default()).unwrap())
    }

    /**
     * Actual tests.
     */

    #[test]
    fn tokenize_group_star() {
        assert_eq!(tokenize("(ab)*", &Alphabet::default()),
            vec![Token::GroupOpen, lit('a'), lit('b'), Token::GroupClose, star()]);
    }

    #[test]
    fn tokenize_skips_whitespace() {
        assert_eq!(tokenize(" a |\tb\n", &Alphabet::default()), vec![lit('a'), alt(), lit('b')]);
    }

    #[test]
    fn tokenize_marks_unknown() {
        let alphabet = Alphabet::lowercase();
        assert_eq!(tokenize("a.B1", &alphabet),
            vec![lit('a'), Token::Invalid('.'), Token::Invalid('B'), Token::Invalid('1')]);
    }

    #[test]
    fn concat_between_symbols() {
        let tokens = tokenize("abc", &Alphabet::default());
        assert_eq!(insert_concatenation(&tokens), vec![lit('a'), cat(), lit('b'), cat(), lit('c')]);
    }

    #[test]
    fn concat_group_star() {
        let tokens = tokenize("(ab)*", &Alphabet::default());
        assert_eq!(insert_concatenation(&tokens),
            vec![Token::GroupOpen, lit('a'), cat(), lit('b'), Token::GroupClose, star()]);
    }

    #[test]
    fn concat_after_star_and_group() {
        let tokens = tokenize("a*(b)c", &Alphabet::default());
        assert_eq!(to_string(&insert_concatenation(&tokens)), "a * . ( b ) . c");
    }

    #[test]
    fn no_concat_around_alternation() {
        let tokens = tokenize("a|(b)", &Alphabet::default());
        assert_eq!(insert_concatenation(&tokens), tokens);
    }

    #[test]
    fn postfix_group_star() {
        assert_eq!(postfix_of("(ab)*"), "a b . *");
    }

    #[test]
    fn postfix_left_associative() {
        assert_eq!(postfix_of("a|b|c"), "a b | c |");
        assert_eq!(postfix_of("abc"), "a b . c .");
    }

    #[test]
    fn postfix_precedence() {
        assert_eq!(postfix_of("ab|c"), "a b . c |");
        assert_eq!(postfix_of("a|bc"), "a b c . |");
        assert_eq!(postfix_of("ab*"), "a b * .");
        assert_eq!(postfix_of("a(b|c)*d"), "a b c | * . d .");
    }

    #[test]
    fn postfix_digits() {
        assert_eq!(postfix_of("a1"), "a 1 .");
    }

    #[test]
    fn traced_steps() {
        let parsed = parse_traced("(ab)*", &Alphabet::default()).unwrap();
        assert_eq!(to_string(&parsed.tokens), "( a b ) *");
        assert_eq!(to_string(&parsed.with_concatenation), "( a . b ) *");
        assert_eq!(to_string(&parsed.postfix), "a b . *");
    }

    #[test]
    fn dangling_operator_is_not_a_parse_error() {
        assert_eq!(parse("a|", &Alphabet::default()), Ok(vec![lit('a'), alt()]));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(parse("", &Alphabet::default()), Err(ParseError::EmptyExpression));
        assert_eq!(parse(" \t ", &Alphabet::default()), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn literal_dot_is_rejected() {
        assert_eq!(parse("a.b", &Alphabet::default()), Err(ParseError::ReservedOperator{ index: 1 }));
    }

    #[test]
    fn unsupported_characters() {
        assert_eq!(parse("aB", &Alphabet::default()),
            Err(ParseError::UnsupportedCharacter{ character: 'B', index: 1 }));
        assert_eq!(parse("a1", &Alphabet::lowercase()),
            Err(ParseError::UnsupportedCharacter{ character: '1', index: 1 }));
    }

    #[test]
    fn unbalanced_groups() {
        assert_eq!(parse("a)", &Alphabet::default()), Err(ParseError::UnbalancedGroupClose{ index: 1 }));
        assert_eq!(parse("((a)", &Alphabet::default()), Err(ParseError::UnclosedGroup{ count: 1 }));
    }
}
