/**
 * Flat node and edge descriptors, the input of whatever renderer draws the
 * automata. Layout is entirely the renderer's business.
 */

use serde::Serialize;
use crate::{dfa, nfa, pda};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub start: bool,
    pub accept: bool,
}

impl Node {
    fn new(id: String, start: bool, accept: bool) -> Self {
        let label = if accept {
            format!("ACCEPT\n{}", id)
        }
        else if start {
            format!("START\n{}", id)
        }
        else {
            id.clone()
        };
        Self{ id, label, start, accept }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

pub trait ToGraph {
    fn to_graph(&self) -> Graph;
}

impl ToGraph for nfa::Automaton {
    fn to_graph(&self) -> Graph {
        let nodes = self.states().into_iter()
            .map(|s| Node::new(s.to_string(), s == self.start, s == self.accept))
            .collect();
        let edges = self.transitions().iter()
            .map(|t| Edge{
                source: t.from.to_string(),
                target: t.to.to_string(),
                label: t.label.to_string(),
            })
            .collect();
        Graph{ nodes, edges }
    }
}

impl ToGraph for dfa::Automaton {
    fn to_graph(&self) -> Graph {
        let nodes = self.states()
            .map(|s| Node::new(s.to_string(), s == self.start(), self.is_accepting(s)))
            .collect();
        let edges = self.transitions().into_iter()
            .map(|t| Edge{
                source: t.from.to_string(),
                target: t.to.to_string(),
                label: t.symbol.to_string(),
            })
            .collect();
        Graph{ nodes, edges }
    }
}

impl ToGraph for pda::Automaton {
    fn to_graph(&self) -> Graph {
        let nodes = self.states().iter()
            .map(|s| Node::new(s.to_string(), s == self.start(), self.is_accepting(s)))
            .collect();
        let edges = self.transitions().iter()
            .map(|t| Edge{
                source: t.from.to_string(),
                target: t.to.to_string(),
                label: t.label(),
            })
            .collect();
        Graph{ nodes, edges }
    }
}
