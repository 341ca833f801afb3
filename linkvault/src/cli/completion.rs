// src/cli/completion.rs
use crate::cli::args::Cli;
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Generates shell completion scripts for the specified shell and prints to stdout.
///
/// # Arguments
///
/// * `shell` - The name of the shell to generate completions for: "bash", "zsh", or "fish"
///
/// # Returns
///
/// Returns Ok(()) on success, or an error if generation fails
///
/// # Examples
///
/// ```bash
/// linkvault completion bash > ~/.bash_completion.d/linkvault
/// eval "$(linkvault completion bash)"
/// ```
#[instrument(level = "debug")]
pub fn generate_completion(shell: &str) -> io::Result<()> {
    write_completion(shell, &mut io::stdout())
}

/// Like [`generate_completion`], writing into `out`
pub fn write_completion<W: Write>(shell: &str, out: &mut W) -> io::Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell.to_lowercase().as_str() {
        "bash" => {
            debug!("Generating bash completion");
            generate(Bash, &mut cmd, bin_name, out);
            Ok(())
        }
        "zsh" => {
            debug!("Generating zsh completion");
            generate(Zsh, &mut cmd, bin_name, out);
            Ok(())
        }
        "fish" => {
            debug!("Generating fish completion");
            generate(Fish, &mut cmd, bin_name, out);
            Ok(())
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                shell
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bash", "COMPREPLY")]
    #[case("zsh", "#compdef linkvault")]
    #[case("fish", "complete -c linkvault")]
    fn given_supported_shell_when_generating_then_script_mentions_binary(
        #[case] shell: &str,
        #[case] marker: &str,
    ) {
        let mut buffer = Vec::new();

        write_completion(shell, &mut buffer).unwrap();

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.contains(marker), "{} script lacks {}", shell, marker);
        assert!(content.contains("validate"));
    }

    #[test]
    fn given_unknown_shell_when_generating_then_invalid_input() {
        let result = write_completion("powershell-ish", &mut Vec::new());

        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("Unsupported shell"));
    }
}
