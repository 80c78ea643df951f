//! EFIS rendering: artificial horizon, pitch ladder, plane symbol,
//! roll scale, compass heading and the invalid-solution warning.
//!
//! This module only displays an attitude solution, it never computes
//! one. All overlay symbology is drawn with [`Color::Invert`] so it
//! stays visible over both sky and ground.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::ahrs::Attitude;
use crate::gfx::{clip_line, Color, FrameBuffer, MAX_X, MAX_Y};
use crate::rotate::rotate;
use crate::trig::{self, from_deg, to_deg};

// ── Layout constants ──────────────────────────────────────────────────────────

/// Horizontal screen center.
pub const CENTER_X: i16 = crate::gfx::WIDTH / 2;
/// Vertical screen center.
pub const CENTER_Y: i16 = crate::gfx::HEIGHT / 2;
/// Pitch display scale.
pub const PIX_PER_DEG: i16 = 2;
/// Radius of the plane-symbol circle.
const PLANE_RADIUS: i16 = 3;
/// Frames the invalid warning stays up after the last bad solution.
const INVALID_HOLD_FRAMES: u8 = 15;

// ── Horizon geometry ──────────────────────────────────────────────────────────

/// Which surface the horizon polygon paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Surface {
    Sky,
    Ground,
}

/// The clipped horizon polygon. The two horizon endpoints always come
/// first; any following points are viewport corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HorizonShape {
    Line([(i16, i16); 2]),
    Triangle([(i16, i16); 3]),
    Quad([(i16, i16); 4]),
}

/// The horizon line in screen coordinates, clipped to the viewport.
///
/// Starts as a horizontal line offset by the pitch in pixels, rotated
/// by roll, translated to screen center. `None` when the line misses
/// the viewport entirely (pitch near straight up or down).
pub fn horizon_line(
    pitch: i16,
    roll_sin: i16,
    roll_cos: i16,
) -> Option<((i16, i16), (i16, i16))> {
    let dy = -to_deg((pitch as i32 * PIX_PER_DEG as i32) as i16);
    let (x0, y0) = rotate(-128, dy, roll_sin, roll_cos);
    let (x1, y1) = rotate(128, dy, roll_sin, roll_cos);
    clip_line(
        x0 + CENTER_X,
        y0 + CENTER_Y,
        x1 + CENTER_X,
        y1 + CENTER_Y,
    )
}

/// Classify the viewport corners against the horizon line and build
/// the polygon to paint.
///
/// The side-of-line cross product is inverted relative to the textbook
/// form because screen y grows upward here while the roll sense is
/// clockwise-positive. Corners exactly on the line are excluded (the
/// horizon endpoints already cover them). The side with fewer corners
/// is painted; a tie goes to the sky.
pub fn horizon_points(p0: (i16, i16), p1: (i16, i16)) -> (HorizonShape, Surface) {
    let (x0, y0) = p0;
    let (x1, y1) = p1;
    let side = |x: i16, y: i16| -> i32 {
        (y - y0) as i32 * (x1 - x0) as i32 - (x - x0) as i32 * (y1 - y0) as i32
    };

    let mut sky: Vec<(i16, i16), 4> = Vec::new();
    let mut ground: Vec<(i16, i16), 4> = Vec::new();
    for corner in [(0, 0), (MAX_X, 0), (MAX_X, MAX_Y), (0, MAX_Y)] {
        let d = side(corner.0, corner.1);
        if d > 0 {
            let _ = sky.push(corner);
        } else if d < 0 {
            let _ = ground.push(corner);
        }
    }

    let (list, surface) = if sky.len() <= ground.len() {
        (sky, Surface::Sky)
    } else {
        (ground, Surface::Ground)
    };

    let shape = match list.len() {
        0 => HorizonShape::Line([p0, p1]),
        1 => HorizonShape::Triangle([p0, p1, list[0]]),
        // The corner pair is emitted in reverse scan order; the quad
        // decomposition relies on it.
        _ => HorizonShape::Quad([p0, p1, list[1], list[0]]),
    };
    (shape, surface)
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Full-screen EFIS renderer.
///
/// Holds the only piece of cross-frame state, the invalid-warning
/// countdown; everything else is recomputed per frame.
pub struct Efis {
    invalid_frames: u8,
}

impl Default for Efis {
    fn default() -> Self {
        Self::new()
    }
}

impl Efis {
    pub const fn new() -> Self {
        Self { invalid_frames: 0 }
    }

    /// Render one complete frame for the given attitude solution.
    pub fn draw(&mut self, fb: &mut FrameBuffer, attitude: &Attitude) {
        let roll_sin = trig::sin(attitude.roll);
        let roll_cos = trig::cos(attitude.roll);

        Self::draw_horizon(fb, attitude.pitch, roll_sin, roll_cos);
        Self::draw_plane(fb);
        Self::draw_pitch_ladder(fb, attitude.pitch, roll_sin, roll_cos);
        Self::draw_roll_scale(fb, attitude.roll);
        Self::draw_compass(fb, attitude.yaw);
        self.draw_invalid(fb, attitude.valid);
    }

    /// Paint the artificial horizon: sky white, ground black.
    pub fn draw_horizon(fb: &mut FrameBuffer, pitch: i16, roll_sin: i16, roll_cos: i16) {
        let clipped = horizon_line(pitch, roll_sin, roll_cos);

        // Off-screen or single-point horizon: whole screen is one
        // surface, picked by the pitch sign.
        let degenerate = match clipped {
            None => true,
            Some((p0, p1)) => p0 == p1,
        };
        if degenerate {
            let color = if pitch >= 0 {
                fb.set();
                Color::Black
            } else {
                fb.clear();
                Color::White
            };
            if let Some((p0, _)) = clipped {
                fb.point(p0.0, p0.1, color);
            }
            return;
        }

        let (p0, p1) = match clipped {
            Some(pair) => pair,
            None => return,
        };
        let (shape, surface) = horizon_points(p0, p1);
        let color = match surface {
            Surface::Sky => {
                fb.clear();
                Color::White
            }
            Surface::Ground => {
                fb.set();
                Color::Black
            }
        };

        match shape {
            HorizonShape::Line([a, b]) => fb.line(a.0, a.1, b.0, b.1, color),
            HorizonShape::Triangle([a, b, c]) => {
                fb.triangle_fill(a.0, a.1, b.0, b.1, c.0, c.1, color)
            }
            HorizonShape::Quad(points) => Self::draw_quad(fb, &points, color),
        }
    }

    /// Paint a 4-point horizon polygon as an axis-aligned rectangle
    /// plus one flat-vertical-side triangle.
    ///
    /// `points` is `[h0, h1, c2, c3]` from [`horizon_points`]: the two
    /// horizon endpoints then the two corners, which share either a
    /// column (left/right edge) or a row (bottom/top edge).
    fn draw_quad(fb: &mut FrameBuffer, points: &[(i16, i16); 4], color: Color) {
        let [h0, h1, c2, c3] = *points;

        if c2.0 == c3.0 {
            // Corners stacked on the left or right edge.
            if c2.0 == 0 {
                let (peak, other) = if h0.0 > h1.0 { (h0, h1) } else { (h1, h0) };
                fb.rect_fill(0, 0, other.0, MAX_Y, color);
                fb.triangle_fill_fvs(other.0, 0, MAX_Y, peak.0, peak.1, color);
            } else {
                let (peak, other) = if h0.0 < h1.0 { (h0, h1) } else { (h1, h0) };
                fb.rect_fill(other.0, 0, MAX_X, MAX_Y, color);
                fb.triangle_fill_fvs(other.0, 0, MAX_Y, peak.0, peak.1, color);
            }
        } else {
            // Corners side by side on the bottom or top edge.
            if c2.1 == 0 {
                let (peak, other) = if h0.1 > h1.1 { (h0, h1) } else { (h1, h0) };
                fb.rect_fill(0, 0, MAX_X, other.1, color);
                fb.triangle_fill_fvs(peak.0, peak.1, other.1, other.0, other.1, color);
            } else {
                let (peak, other) = if h0.1 < h1.1 { (h0, h1) } else { (h1, h0) };
                fb.rect_fill(0, other.1, MAX_X, MAX_Y, color);
                fb.triangle_fill_fvs(peak.0, peak.1, other.1, other.0, other.1, color);
            }
        }
    }

    /// Fixed aircraft symbol: circle, tail, two wing stubs.
    pub fn draw_plane(fb: &mut FrameBuffer) {
        fb.circle(CENTER_X, CENTER_Y, PLANE_RADIUS as u8, Color::Invert);
        fb.vline(
            CENTER_X,
            CENTER_Y + PLANE_RADIUS + 1,
            CENTER_Y + PLANE_RADIUS + 6,
            Color::Invert,
        );
        fb.hline(
            CENTER_X - PLANE_RADIUS - 6,
            CENTER_X - PLANE_RADIUS - 1,
            CENTER_Y,
            Color::Invert,
        );
        fb.hline(
            CENTER_X + PLANE_RADIUS + 1,
            CENTER_X + PLANE_RADIUS + 6,
            CENTER_Y,
            Color::Invert,
        );
    }

    /// Pitch ladder: a line every 10 display units within 25 of the
    /// current pitch, long ticks at multiples of 20, all parallel to
    /// the horizon. The 0 line is the horizon itself and is skipped.
    pub fn draw_pitch_ladder(fb: &mut FrameBuffer, pitch: i16, roll_sin: i16, roll_cos: i16) {
        let disp = to_deg((pitch as i32 * PIX_PER_DEG as i32) as i16);
        let mut mark = (disp + 25) / 10 * 10;
        let min = (disp - 25) / 10 * 10;

        while mark >= min {
            if mark != 0 {
                let half: i16 = if mark % 20 != 0 { 10 } else { 30 };
                let y = mark - disp;
                let (x0, y0) = rotate(-half, y, roll_sin, roll_cos);
                let (x1, y1) = rotate(half, y, roll_sin, roll_cos);
                fb.line(
                    x0 + CENTER_X,
                    y0 + CENTER_Y,
                    x1 + CENTER_X,
                    y1 + CENTER_Y,
                    Color::Invert,
                );
            }
            mark -= 10;
        }
    }

    /// Roll scale: pointer triangle plus tick marks, long ticks at
    /// 0/30/60/90 degrees, short ones between.
    pub fn draw_roll_scale(fb: &mut FrameBuffer, roll: i16) {
        fb.triangle_fill(
            CENTER_X - 3,
            CENTER_Y + 16,
            CENTER_X + 3,
            CENTER_Y + 16,
            CENTER_X,
            CENTER_Y + 20,
            Color::Invert,
        );

        const TICKS: [(i16, i16); 13] = [
            (-90, 10),
            (-60, 10),
            (-45, 5),
            (-30, 10),
            (-20, 5),
            (-10, 5),
            (0, 10),
            (10, 5),
            (20, 5),
            (30, 10),
            (45, 5),
            (60, 10),
            (90, 10),
        ];
        for (deg, length) in TICKS {
            Self::draw_roll_tick(fb, from_deg(deg) + roll, length);
        }
    }

    /// One roll tick: a radial line above the plane symbol, rotated
    /// about screen center.
    fn draw_roll_tick(fb: &mut FrameBuffer, theta: i16, length: i16) {
        let s = trig::sin(theta);
        let c = trig::cos(theta);
        let (x0, y0) = rotate(0, CENTER_Y - 10, s, c);
        let (x1, y1) = rotate(0, CENTER_Y - 10 + length - 1, s, c);
        fb.line(
            x0 + CENTER_X,
            y0 + CENTER_Y,
            x1 + CENTER_X,
            y1 + CENTER_Y,
            Color::Invert,
        );
    }

    /// Compass readout: zero-padded 3-digit heading on a black strip,
    /// bottom center.
    pub fn draw_compass(fb: &mut FrameBuffer, yaw: i16) {
        let degrees = (to_deg(yaw) as i32).rem_euclid(360);

        let mut label: String<4> = String::new();
        // Writing 3 digits into a 4-byte string cannot fail.
        let _ = write!(label, "{degrees:03}");

        fb.rect_fill(CENTER_X - 8, 0, CENTER_X + 14, 10, Color::Black);
        fb.text(7, (CENTER_X - 6) as u8, Color::White, &label);
    }

    /// Invalid-attitude warning: two crossed-out inverted blocks.
    ///
    /// Any invalid solution re-arms the countdown so even a one-frame
    /// glitch stays visible for a while instead of flickering.
    pub fn draw_invalid(&mut self, fb: &mut FrameBuffer, valid: bool) {
        if !valid {
            self.invalid_frames = INVALID_HOLD_FRAMES;
        }
        if self.invalid_frames == 0 {
            return;
        }

        // The X lines re-invert pixels inside the block, so they read
        // as normal video against the inverted background.
        fb.rect_fill(5, 5, 25, MAX_Y - 5, Color::Invert);
        fb.line(5, 5, 25, MAX_Y - 5, Color::Invert);
        fb.line(25, 5, 5, MAX_Y - 5, Color::Invert);

        fb.rect_fill(MAX_X - 25, 5, MAX_X - 5, MAX_Y - 5, Color::Invert);
        fb.line(MAX_X - 25, 5, MAX_X - 5, MAX_Y - 5, Color::Invert);
        fb.line(MAX_X - 5, 5, MAX_X - 25, MAX_Y - 5, Color::Invert);

        self.invalid_frames -= 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
