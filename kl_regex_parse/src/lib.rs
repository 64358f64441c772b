/**
 * Front-end of the regex pipeline: tokenization, explicit concatenation and
 * infix-to-postfix conversion.
 */

extern crate log;
extern crate thiserror;

mod error;
mod parser;
mod token;

pub use error::ParseError;
pub use parser::{insert_concatenation, parse, parse_traced, to_postfix, tokenize, Parsed};
pub use token::{to_string, Alphabet, Operator, Token};
