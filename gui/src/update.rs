use std::time::Instant;

use iced::widget::image;
use iced::Task;
use subclaim_core::network::ens;
use subclaim_core::{Phase, SubmitOutcome};

use crate::messages::Message;
use crate::state::Screen;
use crate::App;

impl App {
    // -- Update --

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // -- Connection --
            Message::Connect => {
                let Some(service) = self.service.clone() else {
                    return Task::none();
                };
                self.connecting = true;
                self.connect_error = None;
                Task::perform(async move { service.connect().await }, |r| {
                    Message::Connected(r.map_err(|e| e.to_string()))
                })
            }

            Message::Connected(result) => {
                self.connecting = false;
                match result {
                    Ok(identity) => {
                        tracing::info!(address = %identity.address, ens = ?identity.ens_name, "wallet connected");
                        let avatar_url = identity.avatar_url.clone();
                        self.identity = Some(identity);
                        self.screen = Screen::Claim;
                        if let Some(url) = avatar_url {
                            return Task::perform(
                                async move { ens::fetch_avatar(&url).await },
                                |r| Message::AvatarLoaded(r.map_err(|e| e.to_string())),
                            );
                        }
                    }
                    Err(e) => self.connect_error = Some(e),
                }
                Task::none()
            }

            Message::AvatarLoaded(result) => {
                match result {
                    Ok(bytes) => self.avatar = Some(image::Handle::from_bytes(bytes)),
                    // Placeholder stays.
                    Err(e) => tracing::debug!(error = %e, "avatar download failed"),
                }
                Task::none()
            }

            Message::Disconnect => {
                let Some(service) = self.service.clone() else {
                    return Task::none();
                };
                Task::perform(async move { service.disconnect().await }, |r| {
                    Message::Disconnected(r.map_err(|e| e.to_string()))
                })
            }

            Message::Disconnected(result) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "wallet did not revoke permissions");
                }
                self.identity = None;
                self.avatar = None;
                self.confetti.stop();
                // An attempt in flight keeps its session until its result arrives.
                if !self.session.reset() {
                    tracing::info!(phase = %self.session.phase(), "claim still in flight");
                }
                self.screen = Screen::Connect;
                Task::none()
            }

            Message::CopyAddress => {
                if let Some(identity) = &self.identity {
                    if let Some(cb) = &mut self.clipboard {
                        if let Err(e) = cb.set_text(identity.address.to_checksum(None)) {
                            tracing::warn!(error = %e, "copy failed");
                        }
                    }
                }
                Task::none()
            }

            // -- Claim form --
            Message::InputChanged(value) => {
                self.session.set_input(value);
                Task::none()
            }

            Message::Submit => {
                let Some(service) = self.service.clone() else {
                    return Task::none();
                };
                match self.session.submit() {
                    SubmitOutcome::Proceed(call) => {
                        let label = self.session.input().to_string();
                        Task::perform(
                            async move { service.submit(&call, &label).await },
                            Message::Submitted,
                        )
                    }
                    SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => {
                        self.show_notifications();
                        Task::none()
                    }
                }
            }

            Message::Submitted(result) => {
                self.session.submission_finished(result);
                self.show_notifications();
                match (self.session.phase(), self.service.clone()) {
                    (Phase::AwaitingConfirmation { tx_hash }, Some(service)) => Task::perform(
                        async move { service.wait_for_receipt(tx_hash).await },
                        Message::ReceiptArrived,
                    ),
                    _ => Task::none(),
                }
            }

            Message::ReceiptArrived(receipt) => {
                self.session.receipt_received(&receipt);
                self.show_notifications();
                if self.session.is_registered() {
                    self.confetti.start();
                }
                Task::none()
            }

            Message::OpenTransaction => {
                if let Some(tx_hash) = self.session.tx_hash() {
                    let url = self.session.config().explorer_tx_url(&tx_hash);
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(error = %e, %url, "could not open browser");
                    }
                }
                Task::none()
            }

            // -- Toasts and animation --
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }

            Message::Tick(now) => {
                let dt = self
                    .last_tick
                    .map(|last| now.saturating_duration_since(last).as_secs_f32())
                    .unwrap_or(0.0)
                    .min(0.1);
                self.last_tick = Some(now);
                self.toasts.expire(now);
                self.confetti.advance(dt);
                Task::none()
            }
        }
    }

    /// Move queued session notifications onto the toast stack.
    fn show_notifications(&mut self) {
        let now = Instant::now();
        for notification in self.session.drain_notifications() {
            self.toasts.push(notification, now);
        }
    }
}
