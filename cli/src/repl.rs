use crate::Cli;
/// REPL shell: Reedline-based interactive claim session.
use anyhow::Result;
use reedline::{DefaultCompleter, DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use subclaim_core::commands::Command;
use subclaim_core::display::short_address;
use subclaim_core::{ClaimSession, Identity};

pub async fn run_repl(cli: &Cli) -> Result<()> {
    println!("subclaim v{}", env!("CARGO_PKG_VERSION"));

    let service = cli.service()?;
    let mut session = ClaimSession::new(service.config().clone());
    println!("Wallet: {}", service.config().wallet_url);
    println!();

    println!("Connecting to wallet...");
    let mut prompt = match service.connect().await {
        Ok(identity) => {
            println!("Connected as {}", identity_label(&identity));
            build_prompt(Some(&identity))
        }
        Err(e) => {
            eprintln!("Could not connect: {e}");
            eprintln!("Unlock your wallet, then use 'whoami' to retry.");
            build_prompt(None)
        }
    };
    println!("Type 'help' for a list of commands.");
    println!();

    let commands: Vec<String> = vec![
        "claim".into(),
        "register".into(),
        "whoami".into(),
        "me".into(),
        "status".into(),
        "disconnect".into(),
        "logout".into(),
        "help".into(),
        "exit".into(),
        "quit".into(),
        "q".into(),
    ];
    let completer = Box::new(DefaultCompleter::new(commands));
    let mut line_editor = Reedline::create().with_completer(completer);

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.trim().is_empty() {
                    continue;
                }

                match Command::parse(&line) {
                    Ok(Command::Exit) => {
                        println!("Goodbye.");
                        break;
                    }
                    Ok(Command::Whoami) => match service.connect().await {
                        Ok(identity) => {
                            println!("{}", subclaim_core::display::format_identity(&identity));
                            prompt = build_prompt(Some(&identity));
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    },
                    Ok(cmd) => {
                        if let Some(prompt_msg) = cmd.confirmation_prompt(service.config()) {
                            if !prompt_confirm(&prompt_msg) {
                                println!("Cancelled.");
                                continue;
                            }
                        }
                        let result = cmd
                            .execute(&service, &mut session, false, &mut |line: &str| {
                                println!("{line}")
                            })
                            .await;
                        match result {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{output}");
                                }
                            }
                            Err(e) => {
                                eprintln!("Error: {e}");
                            }
                        }
                        if cmd == Command::Disconnect {
                            prompt = build_prompt(None);
                        }
                    }
                    Err(e) => {
                        eprintln!("{e}");
                    }
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("Goodbye.");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        }
    }

    Ok(())
}

fn identity_label(identity: &Identity) -> String {
    match &identity.ens_name {
        Some(name) => format!("{name} ({})", short_address(&identity.address)),
        None => identity.address.to_checksum(None),
    }
}

fn build_prompt(identity: Option<&Identity>) -> DefaultPrompt {
    let label = match identity {
        Some(identity) => match &identity.ens_name {
            Some(name) => format!("[subclaim {name}]"),
            None => format!("[subclaim {}]", short_address(&identity.address)),
        },
        None => "[subclaim]".to_string(),
    };
    DefaultPrompt::new(DefaultPromptSegment::Basic(label), DefaultPromptSegment::Empty)
}

fn prompt_confirm(prompt: &str) -> bool {
    use std::io::Write;
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush().ok();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).is_ok() && input.trim().eq_ignore_ascii_case("y")
}
