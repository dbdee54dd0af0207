mod confetti;
mod messages;
mod state;
mod styles;
mod toasts;
mod update;
mod views;

use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::theme::Palette;
use iced::widget::{canvas, image, stack};
use iced::{Color, Element, Fill, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use subclaim_core::{ClaimConfig, ClaimService, ClaimSession, Identity, RpcBackend};

use confetti::Confetti;
use messages::Message;
use state::{LaunchOptions, Screen};
use toasts::Toasts;

// Dark palette with the Lil Nouns pink as primary
const BG:      Color = Color::from_rgb(0.067, 0.063, 0.082); // #111015
const SURFACE: Color = Color::from_rgb(0.110, 0.106, 0.133); // #1c1b22
const BORDER:  Color = Color::from_rgb(0.227, 0.220, 0.267); // #3a3844
const ACTIVE:  Color = Color::from_rgb(0.149, 0.141, 0.180); // #26242e
const MUTED:   Color = Color::from_rgb(0.545, 0.533, 0.604); // #8b889a
const PRIMARY: Color = Color::from_rgb(0.910, 0.278, 0.486); // #e8477c

const CONFETTI_FRAME: Duration = Duration::from_millis(33);
const TOAST_CHECK: Duration = Duration::from_millis(250);

fn main() -> iced::Result {
    let options = LaunchOptions::from_env();
    init_logging(options.verbose);

    iced::application(move || App::new(options.clone()), App::update, App::view)
        .title("test.eth subdomain claim")
        .theme(App::theme)
        .subscription(App::subscription)
        .window_size((720.0, 560.0))
        .run()
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// -- App state --

struct App {
    screen: Screen,
    /// `None` when the configuration could not be loaded; the connect screen
    /// shows `startup_error` instead.
    service: Option<Arc<ClaimService<RpcBackend>>>,
    startup_error: Option<String>,
    session: ClaimSession,

    // Identity chip
    identity: Option<Identity>,
    avatar: Option<image::Handle>,
    clipboard: Option<arboard::Clipboard>,

    // UI state
    connecting: bool,
    connect_error: Option<String>,
    toasts: Toasts,
    confetti: Confetti,
    last_tick: Option<Instant>,

    // Cached theme (avoids re-allocating every frame)
    theme: Theme,
}

impl App {
    fn new(options: LaunchOptions) -> (Self, Task<Message>) {
        let (service, config, startup_error) = match build_service(&options) {
            Ok(service) => {
                let config = service.config().clone();
                (Some(Arc::new(service)), config, None)
            }
            Err(e) => {
                tracing::error!(error = %e, "startup configuration failed");
                (None, ClaimConfig::default(), Some(format!("{e:#}")))
            }
        };

        let clipboard = match arboard::Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                None
            }
        };

        let app = Self {
            screen: Screen::Connect,
            service,
            startup_error,
            session: ClaimSession::new(config),
            identity: None,
            avatar: None,
            clipboard,
            connecting: false,
            connect_error: None,
            toasts: Toasts::default(),
            confetti: Confetti::new(),
            last_tick: None,
            theme: Theme::custom(
                "subclaim".to_string(),
                Palette {
                    background: BG,
                    text: Color::from_rgb(0.965, 0.961, 0.976),
                    primary: PRIMARY,
                    success: styles::ACCENT,
                    warning: styles::WARNING,
                    danger: styles::DANGER,
                },
            ),
        };
        (app, Task::none())
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    /// Animation frames while confetti runs, a slower tick while toasts are up.
    fn subscription(&self) -> Subscription<Message> {
        if self.confetti.is_running() {
            iced::time::every(CONFETTI_FRAME).map(Message::Tick)
        } else if !self.toasts.is_empty() {
            iced::time::every(TOAST_CHECK).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    // -- Views --

    fn view(&self) -> Element<'_, Message> {
        let page = match self.screen {
            Screen::Connect => self.view_connect(),
            Screen::Claim => self.view_claim(),
        };

        let mut layers = stack![page].width(Fill).height(Fill);
        if self.confetti.is_running() {
            layers = layers.push(canvas(&self.confetti).width(Fill).height(Fill));
        }
        layers.push(self.view_toasts()).into()
    }
}

fn build_service(options: &LaunchOptions) -> anyhow::Result<ClaimService<RpcBackend>> {
    let mut config = ClaimConfig::load(options.config.as_deref())?;
    if let Some(url) = &options.wallet_url {
        config.wallet_url = url.clone();
    }
    if let Some(url) = &options.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    let backend = RpcBackend::new(&config, options.insecure)?;
    Ok(ClaimService::new(backend, config))
}
