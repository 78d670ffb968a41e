//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "appgen";

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    match args.shell {
        Shell::Bash => write(shells::Bash, &mut io::stdout()),
        Shell::Zsh => write(shells::Zsh, &mut io::stdout()),
        Shell::Fish => write(shells::Fish, &mut io::stdout()),
        Shell::PowerShell => write(shells::PowerShell, &mut io::stdout()),
        Shell::Elvish => write(shells::Elvish, &mut io::stdout()),
    }
    Ok(())
}

fn write<G: Generator>(generator: G, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(generator, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_names_the_binary_and_subcommands() {
        let mut buf = Vec::new();
        write(shells::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains(BIN_NAME));
        assert!(script.contains("model"));
    }
}
