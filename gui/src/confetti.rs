use crate::styles::{ACCENT, DANGER, WARNING};
use crate::PRIMARY;
use iced::widget::canvas;
use iced::{mouse, Color, Point, Size, Theme};

// -- Celebration confetti (canvas) --

const PIECES: usize = 120;
const PALETTE: [Color; 4] = [PRIMARY, ACCENT, WARNING, DANGER];

#[derive(Debug, Clone, PartialEq)]
struct Piece {
    /// Position as a fraction of the canvas; `y` starts above the top edge.
    x: f32,
    y: f32,
    /// Canvas heights per second.
    fall: f32,
    /// Horizontal sway amplitude, fraction of width.
    sway: f32,
    phase: f32,
    spin: f32,
    size: f32,
    color: usize,
}

impl Piece {
    fn random() -> Self {
        let r = || rand::random::<f32>();
        Self {
            x: r(),
            y: -r(),
            fall: 0.12 + r() * 0.18,
            sway: 0.005 + r() * 0.02,
            phase: r() * std::f32::consts::TAU,
            spin: 2.0 + r() * 6.0,
            size: 5.0 + r() * 5.0,
            color: (r() * PALETTE.len() as f32) as usize % PALETTE.len(),
        }
    }
}

/// Falling confetti, looping until stopped.
pub(crate) struct Confetti {
    pieces: Vec<Piece>,
    cache: canvas::Cache,
}

impl Confetti {
    pub(crate) fn new() -> Self {
        Self {
            pieces: Vec::new(),
            cache: canvas::Cache::default(),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub(crate) fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.pieces = (0..PIECES).map(|_| Piece::random()).collect();
        self.cache.clear();
    }

    pub(crate) fn stop(&mut self) {
        self.pieces.clear();
        self.cache.clear();
    }

    /// Move every piece forward by `dt` seconds. Pieces leaving the bottom
    /// re-enter from the top.
    pub(crate) fn advance(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        for p in &mut self.pieces {
            p.y += p.fall * dt;
            p.phase += p.spin * dt;
            if p.y > 1.05 {
                p.y -= 1.1;
                p.x = rand::random::<f32>();
            }
        }
        self.cache.clear();
    }
}

impl<Message> canvas::Program<Message> for Confetti {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let size = frame.size();
            for p in &self.pieces {
                // Flip effect: width follows the spin phase.
                let w = p.size * p.phase.cos().abs().max(0.15);
                let h = p.size * 0.6;
                let x = (p.x + p.sway * p.phase.sin()) * size.width;
                let y = p.y * size.height;
                frame.fill_rectangle(
                    Point::new(x - w / 2.0, y - h / 2.0),
                    Size::new(w, h),
                    PALETTE[p.color],
                );
            }
        });

        vec![geometry]
    }
}
