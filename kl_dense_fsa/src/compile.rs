/**
 * Drives a regex through every stage: postfix, NFA, DFA and optionally PDA.
 */

use std::fmt;
use log::debug;
use thiserror::Error;
use kl_regex_parse::{parse_traced, Alphabet, ParseError, Token};
use crate::nfa::{self, BuildError, StateAllocator};
use crate::dfa;
use crate::pda::{self, PdaError, SymbolActions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub alphabet: Alphabet,
    /// When set, a PDA is derived from every DFA.
    pub stack_actions: Option<SymbolActions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Thompson,
    Pda,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parse => write!(f, "parsing"),
            Stage::Thompson => write!(f, "NFA construction"),
            Stage::Pda => write!(f, "PDA derivation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Pda(#[from] PdaError),
}

impl CompileError {
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Parse(_) => Stage::Parse,
            CompileError::Build(_) => Stage::Thompson,
            CompileError::Pda(_) => Stage::Pda,
        }
    }
}

/// Every intermediate result of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub with_concatenation: Vec<Token>,
    pub postfix: Vec<Token>,
    pub nfa: nfa::Automaton,
    pub dfa: dfa::Automaton,
    pub pda: Option<pda::Automaton>,
}

/// Owns the state allocator, so compilations through one compiler never see
/// each other's identifiers and independent compilers never share one.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: Config,
    states: StateAllocator,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Self{ config, states: StateAllocator::new() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn compile(&mut self, source: &str) -> Result<Compilation, CompileError> {
        let parsed = parse_traced(source, &self.config.alphabet)?;

        self.states.reset();
        let nfa = nfa::Automaton::from_postfix(&parsed.postfix, &mut self.states)?;
        let dfa = dfa::Automaton::from_nfa(&nfa);
        let pda = match &self.config.stack_actions {
            Some(actions) => Some(pda::Automaton::from_dfa(&dfa, actions)?),
            None => None,
        };
        debug!("compiled {:?}: {} NFA states, {} DFA states", source, nfa.states().len(), dfa.state_count());

        Ok(Compilation{
            tokens: parsed.tokens,
            with_concatenation: parsed.with_concatenation,
            postfix: parsed.postfix,
            nfa,
            dfa,
            pda,
        })
    }
}

/// One-off compilation with a fresh compiler.
pub fn compile(source: &str, config: &Config) -> Result<Compilation, CompileError> {
    Compiler::new(config.clone()).compile(source)
}
