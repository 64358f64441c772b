/**
 * Deterministic finite automaton, determinized from an NFA with the subset
 * construction.
 */

use std::collections::BTreeSet;
use std::fmt;
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use crate::nfa::{self, Automaton as NFA};

/// A DFA state. It is named by the NFA states it stands for, the name is both
/// its identity and its label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subset(BTreeSet<nfa::State>);

impl Subset {
    pub fn contains(&self, state: &nfa::State) -> bool {
        self.0.contains(state)
    }

    pub fn iter(&self) -> impl Iterator<Item = &nfa::State> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeSet<nfa::State>> for Subset {
    fn from(states: BTreeSet<nfa::State>) -> Self {
        Subset(states)
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Subset,
    pub to: Subset,
    pub symbol: char,
}

/// The automaton is partial: the empty subset is never turned into a state,
/// so a missing transition means rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    // Discovery order, the start state is always the first entry
    states: IndexSet<Subset>,
    accepting: BTreeSet<usize>,
    transitions: IndexMap<(usize, char), usize>,
}

impl Automaton {
    pub fn start(&self) -> &Subset {
        &self.states[0]
    }

    pub fn states(&self) -> impl Iterator<Item = &Subset> {
        self.states.iter()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn accepting(&self) -> impl Iterator<Item = &Subset> {
        self.accepting.iter().map(move |i| &self.states[*i])
    }

    pub fn is_accepting(&self, state: &Subset) -> bool {
        match self.states.get_index_of(state) {
            Some(i) => self.accepting.contains(&i),
            None => false,
        }
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.iter()
            .map(|((from, symbol), to)| Transition{
                from: self.states[*from].clone(),
                to: self.states[*to].clone(),
                symbol: *symbol,
            })
            .collect()
    }

    pub fn next(&self, from: &Subset, symbol: char) -> Option<&Subset> {
        let from = self.states.get_index_of(from)?;
        self.transitions.get(&(from, symbol)).map(|to| &self.states[*to])
    }

    /// The symbols that label at least one transition, in ascending order.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transitions.keys().map(|(_, c)| *c).collect()
    }

    pub fn accepts(&self, input: &str) -> bool {
        let mut state = 0;
        for c in input.chars() {
            match self.transitions.get(&(state, c)) {
                Some(next) => state = *next,
                None => return false,
            }
        }
        self.accepting.contains(&state)
    }
}

/**
 * Determinization.
 */

impl Automaton {
    pub fn from_nfa(nfa: &NFA) -> Self {
        let alphabet = nfa.alphabet();
        let mut dfa = Self{
            states: IndexSet::new(),
            accepting: BTreeSet::new(),
            transitions: IndexMap::new(),
        };

        // We need the start state's mapping
        let mut stk = Vec::new();
        {
            let mut start = BTreeSet::new();
            start.insert(nfa.start);
            let start_states = Subset(nfa.epsilon_closure(&start));
            let (index, _) = dfa.add_state(start_states, nfa.accept);
            stk.push(index);
        }

        while let Some(current) = stk.pop() {
            for symbol in &alphabet {
                let reached = nfa.epsilon_closure(&nfa.move_on(&dfa.states[current].0, *symbol));
                if reached.is_empty() {
                    continue;
                }

                let (next, is_new) = dfa.add_state(Subset(reached), nfa.accept);
                if is_new {
                    trace!("discovered {} on '{}'", dfa.states[next], symbol);
                    stk.push(next);
                }
                dfa.transitions.insert((current, *symbol), next);
            }
        }

        debug!("determinized NFA into {} states and {} transitions",
            dfa.states.len(), dfa.transitions.len());
        dfa
    }

    fn add_state(&mut self, subset: Subset, nfa_accept: nfa::State) -> (usize, bool) {
        let accepting = subset.contains(&nfa_accept);
        let (index, is_new) = self.states.insert_full(subset);
        if is_new && accepting {
            self.accepting.insert(index);
        }
        (index, is_new)
    }
}

#[cfg(test)]
mod dfa_tests {
    use super::*;
    use crate::nfa::StateAllocator;
    use kl_regex_parse::{parse, Alphabet};

    fn determinize(rx: &str) -> Automaton {
        let postfix = parse(rx, &Alphabet::default()).unwrap();
        let nfa = NFA::from_postfix(&postfix, &mut StateAllocator::new()).unwrap();
        Automaton::from_nfa(&nfa)
    }

    #[test]
    fn star_start_is_accepting() {
        let dfa = determinize("a*");
        assert!(dfa.is_accepting(dfa.start()));
        assert_eq!(dfa.start().to_string(), "{q0,q2,q3}");
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("aaaa"));
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn alternative_has_two_branches() {
        let dfa = determinize("a|b");
        assert_eq!(dfa.state_count(), 3);
        assert!(!dfa.is_accepting(dfa.start()));

        let from_start: Vec<Transition> = dfa.transitions().into_iter()
            .filter(|t| &t.from == dfa.start())
            .collect();
        assert_eq!(from_start.len(), 2);
        assert_ne!(from_start[0].to, from_start[1].to);
        assert_eq!(dfa.accepting().count(), 2);
    }

    #[test]
    fn group_star_names() {
        let dfa = determinize("(ab)*");
        let names: Vec<String> = dfa.states().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["{q0,q4,q5}", "{q1,q2}", "{q0,q3,q5}"]);

        let after_a = dfa.next(dfa.start(), 'a').unwrap();
        assert_eq!(after_a.to_string(), "{q1,q2}");
        assert!(dfa.next(dfa.start(), 'b').is_none());
        let after_ab = dfa.next(after_a, 'b').unwrap();
        assert!(dfa.is_accepting(after_ab));
        // "aba" goes back to the already named subset
        assert_eq!(dfa.next(after_ab, 'a'), Some(after_a));
    }

    #[test]
    fn subsets_are_not_repeated() {
        let dfa = determinize("(a|b)*abb");
        let unique: BTreeSet<&Subset> = dfa.states().collect();
        assert_eq!(unique.len(), dfa.state_count());
        assert!(dfa.accepts("abb"));
        assert!(dfa.accepts("babaabb"));
        assert!(!dfa.accepts("abba"));
    }

    #[test]
    fn transitions_are_deterministic() {
        let dfa = determinize("(a|ab)(c|bcd)");
        let mut seen = BTreeSet::new();
        for t in dfa.transitions() {
            assert!(seen.insert((t.from.clone(), t.symbol)));
        }
    }

    #[test]
    fn no_symbol_transitions() {
        let nfa = NFA::from_parts(nfa::State::new(0), nfa::State::new(1), Vec::new());
        let dfa = Automaton::from_nfa(&nfa);
        assert_eq!(dfa.state_count(), 1);
        assert_eq!(dfa.start().to_string(), "{q0}");
        assert!(dfa.transitions().is_empty());
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn accepting_through_epsilons_only() {
        let nfa = NFA::from_parts(nfa::State::new(0), nfa::State::new(1), vec![
            nfa::Transition{ from: nfa::State::new(0), to: nfa::State::new(1), label: nfa::Label::Epsilon },
        ]);
        let dfa = Automaton::from_nfa(&nfa);
        assert_eq!(dfa.state_count(), 1);
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }
}
