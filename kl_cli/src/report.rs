/**
 * Printing a compilation, either as a readable trace or as JSON graph
 * descriptors for a renderer.
 */

use std::io::Write;
use anyhow::Result;
use serde::Serialize;
use kl_dense_fsa::{Compilation, Graph, ToGraph};
use kl_dense_fsa::kl_regex_parse::to_string;

#[derive(Serialize)]
struct Report<'a> {
    regex: &'a str,
    postfix: String,
    nfa: Graph,
    dfa: Graph,
    pda: Option<Graph>,
}

pub fn write_json<W: Write>(out: &mut W, source: &str, c: &Compilation) -> Result<()> {
    let report = Report{
        regex: source,
        postfix: to_string(&c.postfix),
        nfa: c.nfa.to_graph(),
        dfa: c.dfa.to_graph(),
        pda: c.pda.as_ref().map(|p| p.to_graph()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_text<W: Write>(out: &mut W, source: &str, c: &Compilation) -> Result<()> {
    writeln!(out, "Regex: {}", source)?;
    writeln!(out, "Tokens: {}", to_string(&c.tokens))?;
    writeln!(out, "With concatenation: {}", to_string(&c.with_concatenation))?;
    writeln!(out, "Postfix: {}", to_string(&c.postfix))?;

    writeln!(out, "NFA: start {}, accept {}, {} transitions",
        c.nfa.start, c.nfa.accept, c.nfa.transitions().len())?;
    for t in c.nfa.transitions() {
        writeln!(out, "  {} -{}-> {}", t.from, t.label, t.to)?;
    }

    let accepting: Vec<String> = c.dfa.accepting().map(|s| s.to_string()).collect();
    writeln!(out, "DFA: start {}, accepting [{}], {} states",
        c.dfa.start(), accepting.join(", "), c.dfa.state_count())?;
    for t in c.dfa.transitions() {
        writeln!(out, "  {} -{}-> {}", t.from, t.symbol, t.to)?;
    }

    if let Some(pda) = &c.pda {
        let accepting: Vec<String> = pda.accepting().iter().map(|s| s.to_string()).collect();
        writeln!(out, "PDA: start {}, accepting [{}], {} states",
            pda.start(), accepting.join(", "), pda.states().len())?;
        for t in pda.transitions() {
            writeln!(out, "  {} -[{}]-> {}", t.from, t.label(), t.to)?;
        }
    }
    Ok(())
}
