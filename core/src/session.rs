//! Claim view state: the one owned container for input, phase, and the
//! notifications waiting to be shown.

use std::collections::VecDeque;

use alloy_primitives::TxHash;
use tracing::{debug, info};

use crate::config::ClaimConfig;
use crate::contract::{claim_call, ContractCall};
use crate::error::{ClaimError, ValidationError};
use crate::network::Receipt;
use crate::notify::{self, AnalyticsEvent, Notification, REGISTERED_MESSAGE};
use crate::validate::{validate_label, MAX_LABEL_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    AwaitingConfirmation { tx_hash: TxHash },
    /// Terminal for the session.
    Registered { tx_hash: TxHash },
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Validating => write!(f, "validating"),
            Phase::Submitting => write!(f, "submitting"),
            Phase::AwaitingConfirmation { .. } => write!(f, "awaiting confirmation"),
            Phase::Registered { .. } => write!(f, "registered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Pending,
    Succeeded,
    Failed,
}

/// The name being claimed and what the chain has said about it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimAttempt {
    pub label: String,
    pub tx_hash: Option<TxHash>,
    pub status: ReceiptStatus,
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An attempt is already in flight, or the name is registered.
    Ignored,
    Rejected(ValidationError),
    /// Validated; hand this call to the wallet.
    Proceed(ContractCall),
}

pub struct ClaimSession {
    config: ClaimConfig,
    input: String,
    phase: Phase,
    attempt: Option<ClaimAttempt>,
    notifications: VecDeque<Notification>,
    events: Vec<AnalyticsEvent>,
}

impl ClaimSession {
    pub fn new(config: ClaimConfig) -> Self {
        Self {
            config,
            input: String::new(),
            phase: Phase::Idle,
            attempt: None,
            notifications: VecDeque::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClaimConfig {
        &self.config
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn attempt(&self) -> Option<&ClaimAttempt> {
        self.attempt.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.phase, Phase::Registered { .. })
    }

    /// Input is editable only while nothing is in flight and nothing is registered.
    pub fn input_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// A submission or confirmation is still outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.phase,
            Phase::Validating | Phase::Submitting | Phase::AwaitingConfirmation { .. }
        )
    }

    /// Start over for a new wallet session. Refused while an attempt is in
    /// flight, so its late results still land on the attempt they belong to.
    pub fn reset(&mut self) -> bool {
        if self.is_in_flight() {
            debug!(phase = %self.phase, "session kept: attempt in flight");
            return false;
        }
        *self = Self::new(self.config.clone());
        true
    }

    /// Hash of the submitted transaction, once there is one.
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self.phase {
            Phase::AwaitingConfirmation { tx_hash } | Phase::Registered { tx_hash } => {
                Some(tx_hash)
            }
            _ => None,
        }
    }

    /// Replace the input text. Returns `false` when the edit was refused.
    pub fn set_input(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if !self.input_enabled() || value.chars().count() > MAX_LABEL_LEN {
            return false;
        }
        self.input = value;
        true
    }

    /// Validate the current input and, if it passes, bind it into the claim call.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.phase != Phase::Idle {
            debug!(phase = %self.phase, "submit ignored");
            return SubmitOutcome::Ignored;
        }

        self.phase = Phase::Validating;
        if let Err(e) = validate_label(&self.input) {
            self.phase = Phase::Idle;
            self.push(Notification::from(&ClaimError::from(e.clone())));
            return SubmitOutcome::Rejected(e);
        }

        self.phase = Phase::Submitting;
        self.attempt = Some(ClaimAttempt {
            label: self.input.clone(),
            tx_hash: None,
            status: ReceiptStatus::Pending,
        });
        info!(label = %self.input, "claim submitted to wallet");
        SubmitOutcome::Proceed(claim_call(&self.config, &self.input))
    }

    /// Record what the wallet did with the call.
    pub fn submission_finished(&mut self, result: Result<TxHash, ClaimError>) {
        if self.phase != Phase::Submitting {
            debug!(phase = %self.phase, "stale submission result dropped");
            return;
        }
        match result {
            Ok(tx_hash) => {
                if let Some(attempt) = self.attempt.as_mut() {
                    attempt.tx_hash = Some(tx_hash);
                }
                self.phase = Phase::AwaitingConfirmation { tx_hash };
                info!(%tx_hash, "awaiting confirmation");
            }
            Err(e) => {
                self.attempt = None;
                self.phase = Phase::Idle;
                self.push(Notification::from(&e));
            }
        }
    }

    /// Translate a receipt into registered / not registered. Receipts for
    /// other transactions, or after registration, change nothing.
    pub fn receipt_received(&mut self, receipt: &Receipt) -> Option<AnalyticsEvent> {
        let Phase::AwaitingConfirmation { tx_hash } = self.phase else {
            debug!(phase = %self.phase, tx_hash = %receipt.tx_hash, "receipt ignored");
            return None;
        };
        if tx_hash != receipt.tx_hash {
            debug!(expected = %tx_hash, got = %receipt.tx_hash, "receipt for another transaction");
            return None;
        }

        let event = if receipt.succeeded() {
            if let Some(attempt) = self.attempt.as_mut() {
                attempt.status = ReceiptStatus::Succeeded;
            }
            self.phase = Phase::Registered { tx_hash };
            self.push(Notification::success(REGISTERED_MESSAGE));
            AnalyticsEvent::ClaimSuccess
        } else {
            if let Some(attempt) = self.attempt.as_mut() {
                attempt.status = ReceiptStatus::Failed;
            }
            self.phase = Phase::Idle;
            self.push(Notification::from(&ClaimError::ReceiptFailed));
            AnalyticsEvent::ClaimFail
        };
        notify::record(event);
        self.events.push(event);
        Some(event)
    }

    /// Take every notification queued since the last call, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn analytics_events(&self) -> &[AnalyticsEvent] {
        &self.events
    }

    fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }
}
