//! Best-effort celebration effect fired when a problem is marked done.
//!
//! The effect is an overlay particle burst drawn on top of the current view.
//! The glyph capability is resolved lazily on first use and cached for the
//! session: a unicode glyph set is tried first, then a plain ASCII set, and
//! if neither is usable the effect is permanently skipped for the session.
//! Nothing here ever propagates an error to the toggle path.

use rand::Rng;
use ratatui::layout::Rect;
use ratatui::prelude::*;

use crate::theme::{AMBER_WARNING, CYAN_PRIMARY, GREEN_SUCCESS, RED_ERROR, TEXT_PRIMARY};

/// Default particle count for a burst
pub const PARTICLE_COUNT: usize = 120;
/// Default spread of launch angles, in degrees
pub const SPREAD_DEGREES: f32 = 200.0;
/// Burst origin as a fraction of the drawing area (x, y)
pub const ORIGIN: (f32, f32) = (0.5, 0.8);

/// Ticks a particle stays alive
const PARTICLE_LIFETIME: u16 = 40;
/// Downward acceleration per tick
const GRAVITY: f32 = 0.06;

const PALETTE: [Color; 5] = [
    CYAN_PRIMARY,
    GREEN_SUCCESS,
    AMBER_WARNING,
    RED_ERROR,
    TEXT_PRIMARY,
];

const UNICODE_GLYPHS: [char; 4] = ['●', '◆', '▲', '★'];
const ASCII_GLYPHS: [char; 4] = ['*', '+', 'o', '.'];

/// Glyph source for the effect, tried in order until one is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSet {
    Unicode,
    Ascii,
}

impl GlyphSet {
    fn glyphs(&self) -> &'static [char] {
        match self {
            GlyphSet::Unicode => &UNICODE_GLYPHS,
            GlyphSet::Ascii => &ASCII_GLYPHS,
        }
    }
}

/// Capability resolution state. Transitions are one-way:
/// Unresolved -> Resolving -> Available | Unavailable.
/// Unavailable is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityState {
    Unresolved,
    Resolving,
    Available(GlyphSet),
    Unavailable,
}

#[derive(Debug, Clone)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    glyph: char,
    color: Color,
    life: u16,
}

pub struct Celebration {
    state: CapabilityState,
    reduced_motion: bool,
    particles: Vec<Particle>,
}

impl Celebration {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: CapabilityState::Unresolved,
            reduced_motion,
            particles: Vec::new(),
        }
    }

    pub fn state(&self) -> CapabilityState {
        self.state
    }

    /// Fire a burst over the given area. Best-effort: respects reduced
    /// motion, resolves the glyph capability lazily, and silently skips when
    /// no capability is available.
    pub fn play(&mut self, area: Rect) {
        if self.reduced_motion {
            tracing::info!("reduced motion is enabled; celebration suppressed");
            return;
        }
        let Some(glyph_set) = self.resolve() else {
            return;
        };
        self.spawn_burst(area, glyph_set, PARTICLE_COUNT, SPREAD_DEGREES, ORIGIN);
    }

    /// Resolve the glyph capability, caching the result for the session
    fn resolve(&mut self) -> Option<GlyphSet> {
        match self.state {
            CapabilityState::Available(set) => return Some(set),
            CapabilityState::Unavailable => return None,
            CapabilityState::Unresolved => {}
            // resolve() runs synchronously, so Resolving is never observed
            // here; it exists so the transition order is explicit
            CapabilityState::Resolving => {}
        }

        self.state = CapabilityState::Resolving;
        for candidate in [GlyphSet::Unicode, GlyphSet::Ascii] {
            if glyph_set_usable(candidate) {
                self.state = CapabilityState::Available(candidate);
                return Some(candidate);
            }
        }
        tracing::warn!("no usable glyph set for celebration effect; disabled for this session");
        self.state = CapabilityState::Unavailable;
        None
    }

    fn spawn_burst(
        &mut self,
        area: Rect,
        glyph_set: GlyphSet,
        count: usize,
        spread_degrees: f32,
        origin: (f32, f32),
    ) {
        let glyphs = glyph_set.glyphs();
        let ox = area.x as f32 + area.width as f32 * origin.0;
        let oy = area.y as f32 + area.height as f32 * origin.1;
        let spread = spread_degrees.to_radians();
        let mut rng = rand::rng();

        for _ in 0..count {
            // Launch upward within the spread fan
            let jitter = if spread > 0.0 {
                rng.random_range(-spread / 2.0..spread / 2.0)
            } else {
                0.0
            };
            let angle = -std::f32::consts::FRAC_PI_2 + jitter;
            let speed: f32 = rng.random_range(0.4..1.6);
            self.particles.push(Particle {
                x: ox,
                y: oy,
                vx: angle.cos() * speed * 2.0, // terminal cells are taller than wide
                vy: angle.sin() * speed,
                glyph: glyphs[rng.random_range(0..glyphs.len())],
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                life: PARTICLE_LIFETIME,
            });
        }
    }

    /// Advance particle physics one animation frame
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Draw live particles over whatever is already in the buffer
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();
        for p in &self.particles {
            let x = p.x.round();
            let y = p.y.round();
            if x < area.x as f32 || y < area.y as f32 {
                continue;
            }
            let (x, y) = (x as u16, y as u16);
            if x >= area.x + area.width || y >= area.y + area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(p.glyph);
                cell.set_fg(p.color);
            }
        }
    }
}

/// Whether a glyph set can be used on the current terminal
fn glyph_set_usable(set: GlyphSet) -> bool {
    match set {
        GlyphSet::Unicode => {
            // Unicode glyphs need a UTF-8 locale
            ["LC_ALL", "LC_CTYPE", "LANG"].iter().any(|var| {
                std::env::var(var)
                    .map(|v| v.to_lowercase().contains("utf"))
                    .unwrap_or(false)
            })
        }
        GlyphSet::Ascii => {
            // ASCII works on anything that is a real terminal
            std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
        }
    }
}
