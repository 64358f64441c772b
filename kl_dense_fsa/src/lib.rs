
pub extern crate kl_regex_parse;
extern crate indexmap;
extern crate log;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

pub mod nfa;
pub mod dfa;
pub mod pda;
pub mod graph;
mod compile;

pub use compile::{compile, Compilation, CompileError, Compiler, Config, Stage};
pub use graph::{Graph, ToGraph};
