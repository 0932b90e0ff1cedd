//! `fec completions` command - shell completion scripts for fec
//!
//! The script covers every fec subcommand (`list`, `pass`, `fail`, `reset`,
//! `convert` and the rest) along with their flags, and completes inventory
//! paths as files.
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(fec completions bash)
//!
//! # Zsh - add to ~/.zshrc
//! source <(fec completions zsh)
//!
//! # Fish
//! fec completions fish > ~/.config/fish/completions/fec.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io::{self, Write};

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    write_script(args.shell, &mut io::stdout());
    Ok(())
}

fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "fec", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_names_fec_subcommands() {
        let mut out = Vec::new();
        write_script(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("fec"));
        for sub in ["pass", "fail", "reset", "convert"] {
            assert!(script.contains(sub), "{}", sub);
        }
    }
}
