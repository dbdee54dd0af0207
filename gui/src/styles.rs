use iced::font::Weight;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Font, Shadow, Vector};
use subclaim_core::Level;

use crate::{ACTIVE, BORDER, MUTED, PRIMARY, SURFACE};

// -- Additional palette --

pub const ACCENT: Color = Color::from_rgb(0.204, 0.780, 0.349); // #34c759
pub const DANGER: Color = Color::from_rgb(0.937, 0.267, 0.267); // #ef4444
pub const WARNING: Color = Color::from_rgb(0.984, 0.749, 0.141); // #fbbf24
const PRIMARY_HOVER: Color = Color::from_rgb(0.973, 0.380, 0.573); // #f86192
const PRIMARY_PRESSED: Color = Color::from_rgb(0.820, 0.220, 0.420); // #d1386b
const DISABLED_BG: Color = Color::from_rgb(0.165, 0.165, 0.200);

// -- Fonts --

pub const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Default::default()
    }
}

fn outlined(color: Color, radius: f32) -> Border {
    Border {
        color,
        width: 1.0,
        radius: radius.into(),
    }
}

// -- Container styles --

pub fn card(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SURFACE)),
        border: outlined(BORDER, 16.0),
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 10.0,
        },
        ..Default::default()
    }
}

/// Identity chip in the header.
pub fn pill(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ACTIVE)),
        border: outlined(BORDER, 24.0),
        ..Default::default()
    }
}

/// Read-only suffix glued to the right of the name input.
pub fn suffix(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ACTIVE)),
        text_color: Some(MUTED),
        border: outlined(BORDER, 8.0),
        ..Default::default()
    }
}

pub fn toast(level: Level) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| {
        let accent = match level {
            Level::Success => ACCENT,
            Level::Error => DANGER,
        };
        container::Style {
            background: Some(Background::Color(SURFACE)),
            text_color: Some(Color::WHITE),
            border: outlined(accent, 10.0),
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            ..Default::default()
        }
    }
}

// -- Button styles --

pub fn btn_primary(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        text_color: Color::WHITE,
        border: rounded(10.0),
        ..Default::default()
    };

    match status {
        button::Status::Active => button::Style {
            background: Some(Background::Color(PRIMARY)),
            ..base
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(PRIMARY_HOVER)),
            shadow: Shadow {
                color: Color { a: 0.35, ..PRIMARY },
                offset: Vector::new(0.0, 3.0),
                blur_radius: 10.0,
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(PRIMARY_PRESSED)),
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(DISABLED_BG)),
            text_color: Color::from_rgba(1.0, 1.0, 1.0, 0.45),
            ..base
        },
    }
}

pub fn btn_secondary(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        text_color: Color::from_rgb(0.86, 0.86, 0.90),
        border: outlined(BORDER, 10.0),
        ..Default::default()
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(ACTIVE)),
            text_color: Color::WHITE,
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: Color::from_rgba(1.0, 1.0, 1.0, 0.3),
            ..base
        },
    }
}

/// Borderless text button, used for links and the chip actions.
pub fn btn_ghost(_theme: &iced::Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.06))),
            text_color: Color::WHITE,
            border: rounded(8.0),
            ..Default::default()
        },
        _ => button::Style {
            text_color: MUTED,
            border: rounded(8.0),
            ..Default::default()
        },
    }
}
