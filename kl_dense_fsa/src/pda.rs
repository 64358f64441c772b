/**
 * Pushdown automaton skeleton derived from a DFA.
 *
 * Every input symbol is given a stack action by the caller. The DFA's
 * transitions are kept, but pushing symbols push a marker, popping symbols
 * need a marker on top, and pass-through symbols jump straight to the accept
 * state with the bottom marker on top. The result is only meaningful for
 * alphabets that follow such a convention (a^n b^n with `a` pushing and `b`
 * popping is the usual example), it is NOT language-equivalent to the DFA
 * in general.
 */

use std::collections::BTreeMap;
use std::fmt;
use log::debug;
use thiserror::Error;
use crate::dfa::{self, Subset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackAction {
    Push,
    Pop,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StackSymbol {
    /// Initializes the stack.
    Bottom,
    Marker,
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackSymbol::Bottom => write!(f, "Z"),
            StackSymbol::Marker => write!(f, "X"),
        }
    }
}

/// Which stack action each input symbol performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolActions {
    actions: BTreeMap<char, StackAction>,
}

impl SymbolActions {
    pub fn new() -> Self {
        Self{ actions: BTreeMap::new() }
    }

    /// `a` pushes and `b` pops, anything else is unsupported.
    pub fn balanced_ab() -> Self {
        Self::new()
            .with('a', StackAction::Push)
            .with('b', StackAction::Pop)
    }

    pub fn with(mut self, symbol: char, action: StackAction) -> Self {
        self.set(symbol, action);
        self
    }

    pub fn set(&mut self, symbol: char, action: StackAction) {
        self.actions.insert(symbol, action);
    }

    pub fn action(&self, symbol: char) -> Option<StackAction> {
        self.actions.get(&symbol).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, StackAction)> + '_ {
        self.actions.iter().map(|(c, a)| (*c, *a))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PdaError {
    #[error("no stack action is configured for symbol '{0}'")]
    UnsupportedSymbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Start,
    Dfa(Subset),
    Accept,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => write!(f, "start"),
            State::Dfa(subset) => write!(f, "{}", subset),
            State::Accept => write!(f, "accept"),
        }
    }
}

/// `None` in any of the three fields stands for epsilon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: State,
    pub to: State,
    pub input: Option<char>,
    pub pop: Option<StackSymbol>,
    pub push: Option<StackSymbol>,
}

impl Transition {
    /// Renders as `input, pop → push`.
    pub fn label(&self) -> String {
        fn or_epsilon<T: fmt::Display>(v: &Option<T>) -> String {
            match v {
                Some(v) => v.to_string(),
                None => "ε".into(),
            }
        }
        format!("{}, {} → {}", or_epsilon(&self.input), or_epsilon(&self.pop), or_epsilon(&self.push))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    start: State,
    accepting: Vec<State>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl Automaton {
    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn accepting(&self) -> &[State] {
        &self.accepting
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }
}

/**
 * Derivation.
 */

impl Automaton {
    pub fn from_dfa(dfa: &dfa::Automaton, actions: &SymbolActions) -> Result<Self, PdaError> {
        let mut states = Vec::with_capacity(dfa.state_count() + 2);
        states.push(State::Start);
        states.extend(dfa.states().cloned().map(State::Dfa));
        states.push(State::Accept);

        let mut transitions = vec![Transition{
            from: State::Start,
            to: State::Dfa(dfa.start().clone()),
            input: None,
            pop: None,
            push: Some(StackSymbol::Bottom),
        }];

        for dfa::Transition{ from, to, symbol } in dfa.transitions() {
            let action = actions.action(symbol).ok_or(PdaError::UnsupportedSymbol(symbol))?;
            let input = Some(symbol);
            let transition = match action {
                StackAction::Push => Transition{
                    from: State::Dfa(from), to: State::Dfa(to), input,
                    pop: None, push: Some(StackSymbol::Marker),
                },
                StackAction::Pop => Transition{
                    from: State::Dfa(from), to: State::Dfa(to), input,
                    pop: Some(StackSymbol::Marker), push: None,
                },
                StackAction::PassThrough => Transition{
                    from: State::Dfa(from), to: State::Accept, input,
                    pop: Some(StackSymbol::Bottom), push: Some(StackSymbol::Bottom),
                },
            };
            transitions.push(transition);
        }

        // Accepting DFA states may finish once only the bottom marker is left
        for subset in dfa.accepting() {
            transitions.push(Transition{
                from: State::Dfa(subset.clone()),
                to: State::Accept,
                input: None,
                pop: Some(StackSymbol::Bottom),
                push: Some(StackSymbol::Bottom),
            });
        }

        debug!("derived PDA with {} states and {} transitions", states.len(), transitions.len());
        Ok(Self{ start: State::Start, accepting: vec![State::Accept], states, transitions })
    }

    /// Searches every configuration reachable on the input. The stack only
    /// grows while input is consumed, so the search is finite.
    pub fn accepts(&self, input: &str) -> bool {
        let input: Vec<char> = input.chars().collect();
        let mut stk: Vec<(&State, usize, Vec<StackSymbol>)> = vec![(&self.start, 0, Vec::new())];

        while let Some((state, pos, stack)) = stk.pop() {
            if self.is_accepting(state) && pos == input.len() {
                return true;
            }

            for t in self.transitions.iter().filter(|t| &t.from == state) {
                let next_pos = match t.input {
                    None => pos,
                    Some(c) if input.get(pos) == Some(&c) => pos + 1,
                    Some(_) => continue,
                };
                let mut next_stack = stack.clone();
                if let Some(expected) = t.pop {
                    if next_stack.pop() != Some(expected) {
                        continue;
                    }
                }
                if let Some(pushed) = t.push {
                    next_stack.push(pushed);
                }
                stk.push((&t.to, next_pos, next_stack));
            }
        }

        false
    }
}
