use anyhow::{bail, Result};

use super::Command;

impl Command {
    /// Parse a command from a raw input string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim_start();
        if input.trim_end().is_empty() {
            bail!("No command entered. Type 'help' for a list of commands.");
        }

        // Exactly one separator after the command word; everything past it is `rest`.
        let (cmd, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
        let cmd = cmd.to_lowercase();
        let arg = Some(rest.trim()).filter(|s| !s.is_empty());

        match cmd.as_str() {
            // The label is passed through untouched: case and every space
            // are for the validator to judge.
            "claim" | "register" => Ok(Command::Claim {
                label: rest.to_string(),
            }),

            "whoami" | "me" => no_args(Command::Whoami, arg, "whoami"),

            "status" => no_args(Command::Status, arg, "status"),

            "disconnect" | "logout" => no_args(Command::Disconnect, arg, "disconnect"),

            "help" | "?" => Ok(Command::Help {
                command: arg.map(|s| s.to_lowercase()),
            }),

            "exit" | "quit" | "q" => Ok(Command::Exit),

            other => bail!("Unknown command: '{other}'. Type 'help' for a list of commands."),
        }
    }
}

fn no_args(command: Command, arg: Option<&str>, name: &str) -> Result<Command> {
    match arg {
        Some(extra) => bail!("'{name}' takes no arguments (got '{extra}')."),
        None => Ok(command),
    }
}
