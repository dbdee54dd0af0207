use crate::messages::Message;
use crate::{styles, App};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, column, container, row, text};
use iced::{Element, Fill, Length};
use subclaim_core::Level;

const WIDTH: f32 = 320.0;
const WIDE_WIDTH: f32 = 520.0;

impl App {
    /// Bottom-centre stack of notifications, newest at the bottom.
    pub(crate) fn view_toasts(&self) -> Element<'_, Message> {
        let mut stack = column![].spacing(8).align_x(Horizontal::Center);

        for toast in self.toasts.iter() {
            let n = &toast.notification;
            let icon = match n.level {
                Level::Success => text("✔").color(styles::ACCENT),
                Level::Error => text("✘").color(styles::DANGER),
            };
            let width = if n.wide { WIDE_WIDTH } else { WIDTH };
            let body = row![
                icon.size(14),
                text(n.message.as_str()).size(14).width(Fill),
                button(text("×").size(14))
                    .padding([0, 6])
                    .style(styles::btn_ghost)
                    .on_press(Message::DismissToast(toast.id)),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center);

            stack = stack.push(
                container(body)
                    .padding([10, 14])
                    .width(Length::Fixed(width))
                    .style(styles::toast(n.level)),
            );
        }

        container(stack)
            .width(Fill)
            .height(Fill)
            .padding(24)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Bottom)
            .into()
    }
}
