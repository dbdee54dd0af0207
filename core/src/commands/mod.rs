/// Command definitions and parsing for the claim REPL and one-shot mode.
mod execute;
mod help;
mod parse;

pub use help::help_text;

use crate::config::ClaimConfig;
use crate::validate::validate_label;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Claim a subdomain: claim <name>. An empty label is kept so
    /// validation reports it the same way the GUI does.
    Claim { label: String },
    /// Show the connected account and its ENS identity
    Whoami,
    /// Show chain id, block height and endpoints
    Status,
    /// Revoke the wallet connection
    Disconnect,
    /// Print help
    Help { command: Option<String> },
    /// Exit the REPL
    Exit,
}

impl Command {
    /// Returns a confirmation prompt if this command should ask before executing.
    /// Labels that will fail validation skip the prompt and go straight to the error.
    pub fn confirmation_prompt(&self, config: &ClaimConfig) -> Option<String> {
        match self {
            Command::Claim { label } if validate_label(label).is_ok() => {
                Some(format!("Claim {}?", config.full_name(label)))
            }
            Command::Disconnect => Some("Disconnect the wallet?".to_string()),
            _ => None,
        }
    }
}
