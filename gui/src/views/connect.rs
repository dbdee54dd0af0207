use crate::messages::Message;
use crate::{styles, App, MUTED};
use iced::widget::{button, column, container, text, Space};
use iced::{Element, Fill};

impl App {
    pub(crate) fn view_connect(&self) -> Element<'_, Message> {
        let title = text("test.eth subdomain claim").size(28).font(styles::BOLD);
        let blurb = text(format!(
            "Connect your wallet to claim a name under {}. You need to hold a {}.",
            self.session.config().parent_domain,
            self.session.config().token.label,
        ))
        .size(14)
        .color(MUTED);

        let mut col = column![title, blurb, Space::new().height(12)]
            .spacing(8)
            .max_width(420);

        if let Some(err) = &self.startup_error {
            col = col.push(text(err.as_str()).size(13).color(styles::DANGER));
            return centered(col.into());
        }

        let label = if self.connecting {
            "Waiting for wallet..."
        } else {
            "Connect wallet"
        };
        let mut connect = button(text(label).size(15))
            .padding([12, 24])
            .style(styles::btn_primary);
        if !self.connecting {
            connect = connect.on_press(Message::Connect);
        }
        col = col.push(connect);

        let endpoint = text(format!("Wallet endpoint: {}", self.session.config().wallet_url))
            .size(12)
            .color(MUTED);
        col = col.push(endpoint);

        if let Some(err) = &self.connect_error {
            col = col.push(text(err.as_str()).size(13).color(styles::DANGER));
        }

        centered(col.into())
    }
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .center_x(Fill)
        .center_y(Fill)
        .padding(20)
        .into()
}
