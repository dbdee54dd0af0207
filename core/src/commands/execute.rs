use anyhow::{bail, Result};

use super::help::help_text;
use super::Command;
use crate::display;
use crate::network::ChainBackend;
use crate::service::ClaimService;
use crate::session::{ClaimSession, SubmitOutcome};
use crate::validate::MAX_LABEL_LEN;

impl Command {
    /// Execute a command and return the output string.
    ///
    /// `progress` receives interim text output (the transaction link while a
    /// claim is being mined). It is never called in JSON mode.
    pub async fn execute<B: ChainBackend>(
        &self,
        service: &ClaimService<B>,
        session: &mut ClaimSession,
        json_output: bool,
        progress: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        match self {
            Command::Claim { label } => {
                claim(service, session, label, json_output, progress).await
            }

            Command::Whoami => {
                let identity = service.connect().await?;
                if json_output {
                    Ok(display::format_identity_json(&identity))
                } else {
                    Ok(display::format_identity(&identity))
                }
            }

            Command::Status => {
                let status = service.status().await?;
                if json_output {
                    Ok(display::format_status_json(&status))
                } else {
                    Ok(display::format_status(&status))
                }
            }

            Command::Disconnect => {
                service.disconnect().await?;
                session.reset();
                if json_output {
                    Ok(serde_json::json!({ "disconnected": true }).to_string())
                } else {
                    Ok("Disconnected.".to_string())
                }
            }

            Command::Help { command } => Ok(help_text(command.as_deref())),

            Command::Exit => Ok(String::new()),
        }
    }
}

/// Run one claim attempt to completion: validate, submit through the wallet,
/// then wait for the receipt. Outcomes land in the session's notifications.
async fn claim<B: ChainBackend>(
    service: &ClaimService<B>,
    session: &mut ClaimSession,
    label: &str,
    json_output: bool,
    progress: &mut (dyn FnMut(&str) + Send),
) -> Result<String> {
    if session.is_registered() {
        let name = session
            .attempt()
            .map(|a| session.config().full_name(&a.label))
            .unwrap_or_default();
        bail!("{name} is already registered in this session.");
    }
    if !session.set_input(label) {
        bail!("Name is too long (max {MAX_LABEL_LEN} characters).");
    }

    match session.submit() {
        SubmitOutcome::Ignored => bail!("A claim is already in progress."),
        SubmitOutcome::Rejected(_) => {}
        SubmitOutcome::Proceed(call) => {
            if !json_output {
                progress("Confirm the transaction in your wallet...");
            }
            let result = service.submit(&call, label).await;
            session.submission_finished(result);

            if let Some(tx_hash) = session.tx_hash() {
                if !json_output {
                    progress(&format!(
                        "Transaction sent: {}\nWaiting for confirmation...",
                        session.config().explorer_tx_url(&tx_hash)
                    ));
                }
                let receipt = service.wait_for_receipt(tx_hash).await;
                session.receipt_received(&receipt);
            }
        }
    }

    let notifications = session.drain_notifications();
    if json_output {
        Ok(display::format_claim_json(
            &session.config().full_name(label),
            session.attempt().and_then(|a| a.tx_hash),
            session.is_registered(),
            &notifications,
        ))
    } else {
        Ok(display::format_notifications(&notifications))
    }
}
