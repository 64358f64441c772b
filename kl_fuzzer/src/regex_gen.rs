/**
 * Regex generation strategies.
 */

use crate::rnd::*;

pub trait RegexGenStrategy {
    fn generate(&self) -> String;
}

/**
 * Random well-formed regex over a charset, built as a random syntax tree of
 * bounded depth.
 */

pub struct RandomRegexGenerator {
    depth: usize,
    charset: String,
}

impl RandomRegexGenerator {
    pub fn with_depth_and_charset(depth: usize, charset: &str) -> Self {
        Self{ depth, charset: charset.into() }
    }

    fn node(&self, depth: usize) -> String {
        if depth == 0 || chance(1, 4) {
            return rand_char(&self.charset).to_string();
        }
        match rand_range(&(0..3)) {
            0 => format!("{}{}", self.node(depth - 1), self.node(depth - 1)),
            1 => format!("({}|{})", self.node(depth - 1), self.node(depth - 1)),
            _ => {
                let sub = self.node(depth - 1);
                if sub.chars().count() == 1 {
                    format!("{}*", sub)
                }
                else {
                    format!("({})*", sub)
                }
            },
        }
    }
}

impl RegexGenStrategy for RandomRegexGenerator {
    fn generate(&self) -> String {
        self.node(self.depth)
    }
}

/**
 * Edit strategies, these turn a regex into something that is likely
 * malformed. The pipeline has to reject those without panicking.
 */

pub trait EditStrategy {
    fn edit(&self, src: &str) -> String;
}

/// Inserts an operator or a parenthesis at a random position.
pub struct InsertOperator;

impl EditStrategy for InsertOperator {
    fn edit(&self, src: &str) -> String {
        let mut chars: Vec<char> = src.chars().collect();
        let offs = rand_range(&(0..(chars.len() + 1)));
        chars.insert(offs, rand_char("|*().  "));
        chars.into_iter().collect()
    }
}

/// Erases a random range.
pub struct EraseRange;

impl EditStrategy for EraseRange {
    fn edit(&self, src: &str) -> String {
        let chars: Vec<char> = src.chars().collect();
        let min = rand_range(&(0..(chars.len() + 1)));
        let max = rand_range(&(min..(chars.len() + 1)));
        chars[..min].iter().chain(chars[max..].iter()).collect()
    }
}

/// Chooses from a collection of strategies and uses that.
pub struct RandomEdit {
    strats: Vec<Box<dyn EditStrategy>>,
}

impl RandomEdit {
    pub fn new() -> Self {
        Self{ strats: Vec::new() }
    }

    pub fn add<E>(&mut self, e: E) where E : EditStrategy + 'static {
        self.strats.push(Box::new(e));
    }
}

impl EditStrategy for RandomEdit {
    fn edit(&self, src: &str) -> String {
        sample(&self.strats).edit(src)
    }
}
