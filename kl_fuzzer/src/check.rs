/**
 * Differential check of one regex: the NFA and the DFA built from it have to
 * agree on every string up to a length bound.
 */

use anyhow::{bail, Result};
use kl_dense_fsa::{Compiler, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Compiled, and this many strings were compared.
    Agreed(usize),
    Rejected(Stage),
}

/// Every string over `alphabet` with at most `max_len` characters.
pub fn strings_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut result = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_len {
        let next: Vec<String> = last.iter()
            .flat_map(|prefix| alphabet.iter().map(move |c| format!("{}{}", prefix, c)))
            .collect();
        result.extend(next.iter().cloned());
        last = next;
    }
    result
}

pub fn check(compiler: &mut Compiler, source: &str, max_len: usize) -> Result<Outcome> {
    let c = match compiler.compile(source) {
        Ok(c) => c,
        Err(err) => return Ok(Outcome::Rejected(err.stage())),
    };

    let states = c.nfa.states();
    for t in c.nfa.transitions() {
        if !states.contains(&t.from) || !states.contains(&t.to) {
            bail!("{:?}: NFA transition {} -> {} leaves the automaton", source, t.from, t.to);
        }
    }
    if c.dfa.states().any(|s| s.is_empty()) {
        bail!("{:?}: DFA contains the empty subset", source);
    }

    let alphabet: Vec<char> = c.nfa.alphabet().into_iter().collect();
    let inputs = strings_up_to(&alphabet, max_len);
    for s in &inputs {
        let by_nfa = c.nfa.accepts(s);
        let by_dfa = c.dfa.accepts(s);
        if by_nfa != by_dfa {
            bail!("{:?}: NFA says {} but DFA says {} on {:?}", source, by_nfa, by_dfa, s);
        }
    }
    Ok(Outcome::Agreed(inputs.len()))
}

#[cfg(test)]
mod check_tests {
    use super::*;
    use kl_dense_fsa::Config;

    #[test]
    fn enumeration_size() {
        assert_eq!(strings_up_to(&['a', 'b'], 3).len(), 1 + 2 + 4 + 8);
        assert_eq!(strings_up_to(&[], 3), vec![String::new()]);
    }

    #[test]
    fn agreed_and_rejected() {
        let mut compiler = Compiler::new(Config::default());
        assert_eq!(check(&mut compiler, "(a|b)*", 2).unwrap(), Outcome::Agreed(7));
        assert_eq!(check(&mut compiler, "a||", 2).unwrap(), Outcome::Rejected(Stage::Thompson));
        assert_eq!(check(&mut compiler, "a)", 2).unwrap(), Outcome::Rejected(Stage::Parse));
    }
}
