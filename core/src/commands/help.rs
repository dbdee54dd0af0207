#[must_use]
pub fn help_text(command: Option<&str>) -> String {
    match command {
        Some("claim") | Some("register") => {
            "claim <name>\n  Register <name>.test.eth for the connected account.\n  Requires a Lil Noun in the wallet. Lowercase, no spaces.\n  The wallet asks you to approve the transaction, then the\n  claim waits until it is mined.\n  Example: claim alice\n  Alias: register".to_string()
        }
        Some("whoami") | Some("me") => {
            "whoami\n  Show the connected address, its ENS name and avatar.\n  Alias: me".to_string()
        }
        Some("status") => {
            "status\n  Show chain id, latest block, and the wallet and read endpoints.".to_string()
        }
        Some("disconnect") | Some("logout") => {
            "disconnect\n  Revoke this app's access in the wallet.\n  The next command that needs an account connects again.\n  Alias: logout".to_string()
        }
        Some("help") => "help [command]\n  Show help for all commands or a specific one.".to_string(),
        Some("exit") | Some("quit") | Some("q") => {
            "exit\n  Leave the REPL.\n  Aliases: quit, q".to_string()
        }
        Some(other) => format!("Unknown command: '{other}'. Type 'help' for a list."),
        None => {
            "Available commands:\n\
             \n\
             \x20 claim <name>     Claim <name>.test.eth\n\
             \x20 whoami           Show the connected account\n\
             \x20 status           Show chain status\n\
             \x20 disconnect       Disconnect the wallet\n\
             \x20 help [cmd]       Show help for a command\n\
             \x20 exit             Exit\n\
             \n\
             Type 'help <command>' for detailed help on a specific command."
                .to_string()
        }
    }
}
