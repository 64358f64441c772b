/**
 * Command-line options and the pipeline configuration built from them.
 */

use anyhow::{bail, Result};
use clap::{ArgEnum, Parser};
use kl_dense_fsa::Config;
use kl_dense_fsa::kl_regex_parse::Alphabet;
use kl_dense_fsa::pda::{StackAction, SymbolActions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[clap(name = "kl_cli")]
#[clap(version, about = "Compiles a regular expression into an NFA, a DFA and a PDA")]
pub struct Options {
    /// The regular expression. One is read from every stdin line when missing.
    pub regex: Option<String>,

    /// Only lowercase letters are symbols, digits are rejected.
    #[clap(long)]
    pub no_digits: bool,

    /// Derive a PDA. Without --push/--pop/--pass 'a' pushes and 'b' pops.
    #[clap(long)]
    pub pda: bool,

    /// Symbols that push a stack marker.
    #[clap(long, value_name = "SYMBOLS", default_value = "")]
    pub push: String,

    /// Symbols that pop a stack marker.
    #[clap(long, value_name = "SYMBOLS", default_value = "")]
    pub pop: String,

    /// Symbols that jump to the accepting state with an empty stack.
    #[clap(long, value_name = "SYMBOLS", default_value = "")]
    pub pass: String,

    #[clap(long, arg_enum, default_value = "text")]
    pub format: Format,
}

impl Options {
    pub fn config(&self) -> Result<Config> {
        let alphabet = if self.no_digits {
            Alphabet::lowercase()
        }
        else {
            Alphabet::lowercase_and_digits()
        };

        let mut actions = SymbolActions::new();
        let groups = [
            (&self.push, StackAction::Push),
            (&self.pop, StackAction::Pop),
            (&self.pass, StackAction::PassThrough),
        ];
        for (symbols, action) in groups.iter() {
            for c in symbols.chars() {
                if !alphabet.is_symbol(c) {
                    bail!("'{}' is not a symbol of the alphabet", c);
                }
                if let Some(existing) = actions.action(c) {
                    bail!("'{}' is given both {:?} and {:?}", c, existing, action);
                }
                actions.set(c, *action);
            }
        }

        let stack_actions = if !actions.is_empty() {
            Some(actions)
        }
        else if self.pda {
            Some(SymbolActions::balanced_ab())
        }
        else {
            None
        };

        Ok(Config{ alphabet, stack_actions })
    }
}

#[cfg(test)]
mod options_tests {
    use super::*;

    fn options(args: &[&str]) -> Options {
        Options::parse_from(std::iter::once("kl_cli").chain(args.iter().cloned()))
    }

    #[test]
    fn defaults() {
        let config = options(&["ab"]).config().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn pda_defaults_to_balanced_ab() {
        let config = options(&["--pda", "ab"]).config().unwrap();
        assert_eq!(config.stack_actions, Some(SymbolActions::balanced_ab()));
    }

    #[test]
    fn explicit_actions() {
        let config = options(&["--push", "xy", "--pop", "z", "--pass", "c"]).config().unwrap();
        let actions = config.stack_actions.unwrap();
        assert_eq!(actions.action('x'), Some(StackAction::Push));
        assert_eq!(actions.action('y'), Some(StackAction::Push));
        assert_eq!(actions.action('z'), Some(StackAction::Pop));
        assert_eq!(actions.action('c'), Some(StackAction::PassThrough));
        assert_eq!(actions.action('a'), None);
    }

    #[test]
    fn conflicting_actions() {
        assert!(options(&["--push", "a", "--pop", "a"]).config().is_err());
        assert!(options(&["--no-digits", "--push", "1"]).config().is_err());
    }

    #[test]
    fn json_format() {
        assert_eq!(options(&["--format", "json"]).format, Format::Json);
    }
}
