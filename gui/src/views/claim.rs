use crate::messages::Message;
use crate::{styles, App, MUTED, PRIMARY};
use iced::widget::{button, column, container, image, row, text, text_input, Space};
use iced::{Element, Fill, Length};
use subclaim_core::display::short_address;
use subclaim_core::{Phase, MAX_LABEL_LEN};

const AVATAR_SIZE: f32 = 28.0;

impl App {
    pub(crate) fn view_claim(&self) -> Element<'_, Message> {
        let header = row![Space::new().width(Fill), self.view_identity_chip()]
            .align_y(iced::Alignment::Center);

        let config = self.session.config();
        let title = text(format!("{} subdomain claim", config.parent_domain))
            .size(28)
            .font(styles::BOLD);
        let hint = text(format!(
            "One name per {}. Lowercase letters, no spaces, up to {MAX_LABEL_LEN} characters.",
            config.token.label
        ))
        .size(13)
        .color(MUTED);

        let mut input = text_input("name", self.session.input())
            .size(16)
            .padding(12)
            .width(Fill);
        if self.session.input_enabled() {
            input = input
                .on_input(Message::InputChanged)
                .on_submit(Message::Submit);
        }
        let suffix = container(text(format!(".{}", config.parent_domain)).size(16))
            .padding(12)
            .style(styles::suffix);
        let field = row![input, suffix].spacing(6).align_y(iced::Alignment::Center);

        let mut claim = button(text(self.claim_label()).size(15))
            .padding([12, 24])
            .width(Fill)
            .style(styles::btn_primary);
        if self.session.phase() == Phase::Idle {
            claim = claim.on_press(Message::Submit);
        }

        let mut form = column![title, hint, Space::new().height(8), field, claim].spacing(12);

        if let Some(tx_hash) = self.session.tx_hash() {
            let status = if self.session.is_registered() {
                format!("{} is yours.", config.full_name(self.registered_label()))
            } else {
                format!("Transaction {} pending.", short_hash(&tx_hash.to_string()))
            };
            form = form.push(
                row![
                    text(status).size(13).color(MUTED),
                    Space::new().width(Fill),
                    button(text("View transaction ↗").size(13))
                        .style(styles::btn_ghost)
                        .on_press(Message::OpenTransaction),
                ]
                .align_y(iced::Alignment::Center),
            );
        }

        let card = container(form)
            .padding(28)
            .max_width(520)
            .style(styles::card);

        column![
            header,
            container(card).center_x(Fill).center_y(Fill),
        ]
        .padding(20)
        .into()
    }

    fn claim_label(&self) -> &'static str {
        match self.session.phase() {
            Phase::Idle => "Claim",
            Phase::Validating | Phase::Submitting => "Confirm in your wallet...",
            Phase::AwaitingConfirmation { .. } => "Registering...",
            Phase::Registered { .. } => "Registered",
        }
    }

    fn registered_label(&self) -> &str {
        self.session
            .attempt()
            .map(|a| a.label.as_str())
            .unwrap_or_default()
    }

    fn view_identity_chip(&self) -> Element<'_, Message> {
        let Some(identity) = &self.identity else {
            return Space::new().into();
        };

        let avatar: Element<'_, Message> = match &self.avatar {
            Some(handle) => image(handle.clone())
                .width(Length::Fixed(AVATAR_SIZE))
                .height(Length::Fixed(AVATAR_SIZE))
                .into(),
            None => container(Space::new())
                .width(Length::Fixed(AVATAR_SIZE))
                .height(Length::Fixed(AVATAR_SIZE))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(PRIMARY)),
                    border: iced::Border {
                        radius: (AVATAR_SIZE / 2.0).into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .into(),
        };

        let name = match &identity.ens_name {
            Some(name) => column![
                text(name.as_str()).size(13).font(styles::BOLD),
                text(short_address(&identity.address)).size(11).color(MUTED),
            ],
            None => column![text(short_address(&identity.address)).size(13)],
        };

        let chip = row![
            avatar,
            name,
            button(text("Copy").size(12))
                .padding([4, 8])
                .style(styles::btn_ghost)
                .on_press(Message::CopyAddress),
            button(text("Disconnect").size(12))
                .padding([4, 8])
                .style(styles::btn_secondary)
                .on_press(Message::Disconnect),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center);

        container(chip)
            .padding([6, 12])
            .style(styles::pill)
            .into()
    }
}

/// `0x1234…abcd` for a 0x-prefixed hash.
fn short_hash(hash: &str) -> String {
    if hash.len() <= 14 {
        return hash.to_string();
    }
    format!("{}…{}", &hash[..6], &hash[hash.len() - 4..])
}
