/**
 * Nondeterministic finite automaton with epsilon-transitions, built from a
 * postfix token sequence.
 */

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use log::{debug, trace};
use thiserror::Error;
use kl_regex_parse::{Operator, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

impl State {
    pub fn new(index: usize) -> Self {
        State(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Hands out fresh state identifiers. One allocator belongs to one
/// compilation and has to be reset before the next one starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateAllocator {
    state_counter: usize,
}

impl StateAllocator {
    pub fn new() -> Self {
        Self{ state_counter: 0 }
    }

    pub fn reset(&mut self) {
        self.state_counter = 0;
    }

    pub fn unique_state(&mut self) -> State {
        let state = State(self.state_counter);
        self.state_counter += 1;
        state
    }

    /// How many states were handed out since the last reset.
    pub fn allocated(&self) -> usize {
        self.state_counter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: State,
    pub to: State,
    pub label: Label,
}

impl Transition {
    fn epsilon(from: State, to: State) -> Self {
        Self{ from, to, label: Label::Epsilon }
    }
}

/// Malformed postfix input. Any of these aborts the construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("operator '{operator}' is missing an operand (postfix token {index})")]
    MissingOperand { operator: char, index: usize },
    #[error("'{token}' can not appear in a postfix sequence (postfix token {index})")]
    UnexpectedToken { token: char, index: usize },
    #[error("the expression does not describe any automaton")]
    NoFragment,
    #[error("{count} sub-automata are left without an operator joining them")]
    DanglingFragments { count: usize },
}

/// An automaton under construction. Fragments own their transitions, merging
/// two fragments moves both lists into the result.
#[derive(Debug)]
struct Fragment {
    start: State,
    end: State,
    transitions: Vec<Transition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub start: State,
    pub accept: State,
    transitions: Vec<Transition>,
    epsilon: BTreeMap<State, BTreeSet<State>>,
    on_symbol: BTreeMap<(State, char), BTreeSet<State>>,
}

impl Automaton {
    /// Assembles an automaton from already built parts. Every transition
    /// endpoint is taken to be a state of the automaton.
    pub fn from_parts(start: State, accept: State, transitions: Vec<Transition>) -> Self {
        let mut epsilon: BTreeMap<State, BTreeSet<State>> = BTreeMap::new();
        let mut on_symbol: BTreeMap<(State, char), BTreeSet<State>> = BTreeMap::new();
        for t in &transitions {
            match t.label {
                Label::Epsilon => { epsilon.entry(t.from).or_default().insert(t.to); },
                Label::Symbol(c) => { on_symbol.entry((t.from, c)).or_default().insert(t.to); },
            }
        }
        Self{ start, accept, transitions, epsilon, on_symbol }
    }

    /// All transitions in the order the construction produced them.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn states(&self) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        result.insert(self.start);
        result.insert(self.accept);
        for t in &self.transitions {
            result.insert(t.from);
            result.insert(t.to);
        }
        result
    }

    /// The distinct non-epsilon labels, in ascending order.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.on_symbol.keys().map(|(_, c)| *c).collect()
    }

    pub fn epsilon_closure(&self, states: &BTreeSet<State>) -> BTreeSet<State> {
        let mut result = states.clone();
        let mut stk: Vec<State> = states.iter().cloned().collect();

        while let Some(top) = stk.pop() {
            if let Some(nexts) = self.epsilon.get(&top) {
                for s in nexts {
                    if result.insert(*s) {
                        stk.push(*s);
                    }
                }
            }
        }

        result
    }

    /// The states reachable from `states` by exactly one `symbol` transition.
    pub fn move_on(&self, states: &BTreeSet<State>, symbol: char) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        for s in states {
            if let Some(nexts) = self.on_symbol.get(&(*s, symbol)) {
                result.extend(nexts.iter().cloned());
            }
        }
        result
    }

    /// Simulates the automaton on the whole input.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = BTreeSet::new();
        current.insert(self.start);
        current = self.epsilon_closure(&current);

        for c in input.chars() {
            current = self.epsilon_closure(&self.move_on(&current, c));
            if current.is_empty() {
                return false;
            }
        }

        current.contains(&self.accept)
    }
}

/**
 * Thompson's-construction.
 */

impl Automaton {
    /// Evaluates the postfix sequence on a stack of fragments. Exactly one
    /// fragment has to remain at the end, it becomes the automaton.
    pub fn from_postfix(postfix: &[Token], states: &mut StateAllocator) -> Result<Self, BuildError> {
        let mut stk: Vec<Fragment> = Vec::new();

        for (index, token) in postfix.iter().enumerate() {
            let fragment = match token {
                Token::Literal(ch) => thompson_construct_literal(states, *ch),

                Token::Operator(op @ Operator::Concat) => {
                    let second = pop_operand(&mut stk, *op, index)?;
                    let first = pop_operand(&mut stk, *op, index)?;
                    thompson_construct_sequence(first, second)
                },

                Token::Operator(op @ Operator::Alternation) => {
                    let second = pop_operand(&mut stk, *op, index)?;
                    let first = pop_operand(&mut stk, *op, index)?;
                    thompson_construct_alternative(states, first, second)
                },

                Token::Operator(op @ Operator::Star) => {
                    let subnode = pop_operand(&mut stk, *op, index)?;
                    thompson_construct_star(states, subnode)
                },

                other => return Err(BuildError::UnexpectedToken{ token: other.as_char(), index }),
            };
            trace!("{}: fragment {} -> {} with {} transitions",
                token, fragment.start, fragment.end, fragment.transitions.len());
            stk.push(fragment);
        }

        if stk.len() > 1 {
            return Err(BuildError::DanglingFragments{ count: stk.len() });
        }
        let Fragment{ start, end, transitions } = stk.pop().ok_or(BuildError::NoFragment)?;
        debug!("built NFA with {} states and {} transitions", states.allocated(), transitions.len());

        Ok(Self::from_parts(start, end, transitions))
    }
}

fn pop_operand(stk: &mut Vec<Fragment>, operator: Operator, index: usize) -> Result<Fragment, BuildError> {
    stk.pop().ok_or(BuildError::MissingOperand{ operator: operator.as_char(), index })
}

fn thompson_construct_literal(states: &mut StateAllocator, ch: char) -> Fragment {
    let start = states.unique_state();
    let end = states.unique_state();

    let transitions = vec![Transition{ from: start, to: end, label: Label::Symbol(ch) }];

    Fragment{ start, end, transitions }
}

fn thompson_construct_sequence(left: Fragment, right: Fragment) -> Fragment {
    let mut transitions = left.transitions;
    transitions.push(Transition::epsilon(left.end, right.start));
    transitions.extend(right.transitions);

    Fragment{ start: left.start, end: right.end, transitions }
}

fn thompson_construct_alternative(states: &mut StateAllocator,
    left: Fragment, right: Fragment) -> Fragment {

    let start = states.unique_state();
    let end = states.unique_state();

    let mut transitions = Vec::with_capacity(4 + left.transitions.len() + right.transitions.len());
    transitions.push(Transition::epsilon(start, left.start));
    transitions.push(Transition::epsilon(start, right.start));
    transitions.push(Transition::epsilon(left.end, end));
    transitions.push(Transition::epsilon(right.end, end));
    transitions.extend(left.transitions);
    transitions.extend(right.transitions);

    Fragment{ start, end, transitions }
}

fn thompson_construct_star(states: &mut StateAllocator, subnode: Fragment) -> Fragment {
    let start = states.unique_state();
    let end = states.unique_state();

    let mut transitions = Vec::with_capacity(4 + subnode.transitions.len());
    transitions.push(Transition::epsilon(start, subnode.start));
    // Zero repetitions
    transitions.push(Transition::epsilon(start, end));
    // Repeat
    transitions.push(Transition::epsilon(subnode.end, subnode.start));
    transitions.push(Transition::epsilon(subnode.end, end));
    transitions.extend(subnode.transitions);

    Fragment{ start, end, transitions }
}
