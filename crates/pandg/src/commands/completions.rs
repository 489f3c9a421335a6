//! Shell completion scripts.

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::CliError;

pub fn handle(args: &CompletionsArgs) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    write_completions(args.shell, &mut out);
    Ok(())
}

fn write_completions(shell: clap_complete::Shell, out: &mut impl std::io::Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_owned();
    clap_complete::generate(shell, &mut cmd, bin, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fish_script_covers_subcommands() {
        let mut buf = Vec::new();
        write_completions(clap_complete::Shell::Fish, &mut buf);
        let script = String::from_utf8(buf).expect("utf-8 script");
        assert!(script.contains("device-groups"), "{script}");
        assert!(script.contains("colors"), "{script}");
    }
}
