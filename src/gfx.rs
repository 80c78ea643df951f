//! 1-bpp raster engine for a 128x64 column-major frame buffer.
//!
//! The logical coordinate system has its origin in the lower left
//! corner with +y up; the packed buffer runs top-left to bottom-right,
//! eight rows per byte, column within page. That sign flip and the
//! page/bit packing live entirely inside the addressing helpers here,
//! so callers only ever see pixel coordinates.
//!
//! Every drawing operation is total: coordinates off the buffer are
//! clipped or ignored, never an error. Primitives paint each pixel of
//! a shape exactly once, which makes [`Color::Invert`] an involution
//! (drawing the same shape twice restores the buffer).

use crate::font::{FONT_6X8, GLYPH_WIDTH};
use crate::trig::y_intercept;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Frame width in pixels.
pub const WIDTH: i16 = 128;
/// Frame height in pixels.
pub const HEIGHT: i16 = 64;
/// Largest on-buffer x coordinate.
pub const MAX_X: i16 = WIDTH - 1;
/// Largest on-buffer y coordinate.
pub const MAX_Y: i16 = HEIGHT - 1;
/// Packed buffer size in bytes.
pub const FRAME_SIZE: usize = (WIDTH as usize) * (HEIGHT as usize) / 8;

/// Text grid: 8 lines of 21 characters.
pub const TEXT_LINES: u8 = 8;

// Cohen-Sutherland region codes.
pub const CLIP_TOP: u8 = 0b1000;
pub const CLIP_BOTTOM: u8 = 0b0100;
pub const CLIP_RIGHT: u8 = 0b0010;
pub const CLIP_LEFT: u8 = 0b0001;

/// Pixel paint mode.
///
/// `Overwrite` replaces the whole destination byte and only makes
/// sense for page-aligned text cells; the shape primitives treat it
/// as `White`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    White,
    Black,
    Invert,
    Overwrite,
}

// ── Clipping ──────────────────────────────────────────────────────────────────

/// Cohen-Sutherland region code of a point relative to the frame.
pub fn outcode(x: i16, y: i16) -> u8 {
    let mut code = 0;
    if x < 0 {
        code |= CLIP_LEFT;
    } else if x > MAX_X {
        code |= CLIP_RIGHT;
    }
    if y < 0 {
        code |= CLIP_BOTTOM;
    } else if y > MAX_Y {
        code |= CLIP_TOP;
    }
    code
}

/// Clip a segment to the frame with the Cohen-Sutherland method.
///
/// Returns the clipped endpoints, or `None` when the segment lies
/// entirely outside. Endpoint order is preserved.
pub fn clip_line(
    mut x0: i16,
    mut y0: i16,
    mut x1: i16,
    mut y1: i16,
) -> Option<((i16, i16), (i16, i16))> {
    let mut c0 = outcode(x0, y0);
    let mut c1 = outcode(x1, y1);

    loop {
        if c0 | c1 == 0 {
            return Some(((x0, y0), (x1, y1)));
        }
        if c0 & c1 != 0 {
            return None;
        }

        // Push the outside endpoint onto the violated edge.
        let c = if c0 != 0 { c0 } else { c1 };
        let (x, y);
        if c & CLIP_TOP != 0 {
            x = x0 + ((x1 - x0) as i32 * (MAX_Y - y0) as i32 / (y1 - y0) as i32) as i16;
            y = MAX_Y;
        } else if c & CLIP_BOTTOM != 0 {
            x = x0 + ((x1 - x0) as i32 * (0 - y0) as i32 / (y1 - y0) as i32) as i16;
            y = 0;
        } else if c & CLIP_RIGHT != 0 {
            y = y0 + ((y1 - y0) as i32 * (MAX_X - x0) as i32 / (x1 - x0) as i32) as i16;
            x = MAX_X;
        } else {
            y = y0 + ((y1 - y0) as i32 * (0 - x0) as i32 / (x1 - x0) as i32) as i16;
            x = 0;
        }

        if c == c0 {
            x0 = x;
            y0 = y;
            c0 = outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            c1 = outcode(x1, y1);
        }
    }
}

// ── Frame buffer ──────────────────────────────────────────────────────────────

/// Owned 128x64 1-bpp bitmap.
pub struct FrameBuffer {
    buf: [u8; FRAME_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// An all-black frame.
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_SIZE],
        }
    }

    /// The packed buffer, ready for a page-addressed display transport.
    pub fn bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.buf
    }

    // Packing: byte index = page + x*8, page 0 the top band, bit 0 the
    // top row within a band.

    fn index(x: u8, y: u8) -> usize {
        (7 - (y >> 3)) as usize + (x as usize) * 8
    }

    fn mask(y: u8) -> u8 {
        0x80 >> (y & 7)
    }

    fn apply(&mut self, idx: usize, mask: u8, color: Color) {
        match color {
            Color::White | Color::Overwrite => self.buf[idx] |= mask,
            Color::Black => self.buf[idx] &= !mask,
            Color::Invert => self.buf[idx] ^= mask,
        }
    }

    // ── Whole-buffer operations ──

    pub fn clear(&mut self) {
        self.buf = [0x00; FRAME_SIZE];
    }

    pub fn set(&mut self) {
        self.buf = [0xFF; FRAME_SIZE];
    }

    pub fn invert(&mut self) {
        for byte in self.buf.iter_mut() {
            *byte = !*byte;
        }
    }

    // ── Points ──

    /// Read one pixel; off-buffer reads as unset.
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        if outcode(x, y) != 0 {
            return false;
        }
        self.buf[Self::index(x as u8, y as u8)] & Self::mask(y as u8) != 0
    }

    /// Paint one pixel; silently ignores off-buffer coordinates.
    pub fn point(&mut self, x: i16, y: i16, color: Color) {
        if outcode(x, y) != 0 {
            return;
        }
        self.apply(Self::index(x as u8, y as u8), Self::mask(y as u8), color);
    }

    // ── Axis-aligned lines ──

    /// Vertical line from `y0` to `y1` inclusive, either order, clipped.
    pub fn vline(&mut self, x: i16, y0: i16, y1: i16, color: Color) {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if x < 0 || x > MAX_X || hi < 0 || lo > MAX_Y {
            return;
        }
        self.vline_raw(x as u8, lo.max(0) as u8, hi.min(MAX_Y) as u8, color);
    }

    /// Unclipped vertical span; requires `y0 <= y1` and both on-buffer.
    ///
    /// Touches each affected byte once: partial-byte masks at the span
    /// ends, whole bytes between.
    pub fn vline_raw(&mut self, x: u8, y0: u8, y1: u8, color: Color) {
        let top_page = 7 - (y1 >> 3);
        let bot_page = 7 - (y0 >> 3);
        let top_brush = 0xFFu8 << (7 - (y1 & 7));
        let bot_brush = 0xFFu8 >> (y0 & 7);

        let mut idx = top_page as usize + (x as usize) * 8;
        if top_page == bot_page {
            self.apply(idx, top_brush & bot_brush, color);
            return;
        }

        let end = bot_page as usize + (x as usize) * 8;
        self.apply(idx, top_brush, color);
        idx += 1;
        while idx < end {
            match color {
                Color::White | Color::Overwrite => self.buf[idx] = 0xFF,
                Color::Black => self.buf[idx] = 0x00,
                Color::Invert => self.buf[idx] = !self.buf[idx],
            }
            idx += 1;
        }
        self.apply(end, bot_brush, color);
    }

    /// Horizontal line from `x0` to `x1` inclusive, either order, clipped.
    pub fn hline(&mut self, x0: i16, x1: i16, y: i16, color: Color) {
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        if y < 0 || y > MAX_Y || hi < 0 || lo > MAX_X {
            return;
        }
        self.hline_raw(lo.max(0) as u8, hi.min(MAX_X) as u8, y as u8, color);
    }

    /// Unclipped horizontal span; requires `x0 <= x1` and both on-buffer.
    pub fn hline_raw(&mut self, x0: u8, x1: u8, y: u8, color: Color) {
        let mask = Self::mask(y);
        let mut idx = Self::index(x0, y);
        for _ in x0..=x1 {
            self.apply(idx, mask, color);
            idx += 8;
        }
    }

    // ── Arbitrary lines ──

    /// 1-pixel line between two points, pre-clipped to the frame.
    pub fn line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        if x0 == x1 {
            self.vline(x0, y0, y1, color);
            return;
        }
        if y0 == y1 {
            self.hline(x0, x1, y0, color);
            return;
        }
        if let Some(((ax, ay), (bx, by))) = clip_line(x0, y0, x1, y1) {
            self.bresenham(ax, ay, bx, by, color, false);
        }
    }

    /// All-octant Bresenham. `skip_last` leaves the final endpoint
    /// unpainted so chained segments stay Invert-safe at the joints.
    fn bresenham(&mut self, mut x0: i16, mut y0: i16, x1: i16, y1: i16, color: Color, skip_last: bool) {
        let dx = (x1 as i32 - x0 as i32).abs();
        let dy = -(y1 as i32 - y0 as i32).abs();
        let sx: i16 = if x0 < x1 { 1 } else { -1 };
        let sy: i16 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x0 == x1 && y0 == y1 {
                if !skip_last {
                    self.point(x0, y0, color);
                }
                return;
            }
            self.point(x0, y0, color);
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    // ── Rectangles ──

    /// Rectangle outline between two opposite corners.
    ///
    /// Each corner pixel is painted exactly once.
    pub fn rect(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        let (xl, xr) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (yb, yt) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        if xl == xr {
            self.vline(xl, yb, yt, color);
            return;
        }
        if yb == yt {
            self.hline(xl, xr, yb, color);
            return;
        }

        self.hline(xl, xr, yb, color);
        self.hline(xl, xr, yt, color);
        if yt - yb >= 2 {
            self.vline(xl, yb + 1, yt - 1, color);
            self.vline(xr, yb + 1, yt - 1, color);
        }
    }

    /// Filled rectangle between two opposite corners, clipped.
    pub fn rect_fill(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        let (xl, xr) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (yb, yt) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if xr < 0 || xl > MAX_X || yt < 0 || yb > MAX_Y {
            return;
        }
        self.rect_fill_raw(
            xl.max(0) as u8,
            yb.max(0) as u8,
            xr.min(MAX_X) as u8,
            yt.min(MAX_Y) as u8,
            color,
        );
    }

    /// Unclipped filled rectangle; requires `x0 <= x1`, `y0 <= y1`,
    /// all on-buffer.
    pub fn rect_fill_raw(&mut self, x0: u8, y0: u8, x1: u8, y1: u8, color: Color) {
        for x in x0..=x1 {
            self.vline_raw(x, y0, y1, color);
        }
    }

    // ── Ellipses ──

    /// Ellipse outline, midpoint algorithm with 4-way symmetric plot.
    ///
    /// Pixels on the symmetry axes are emitted once, so Invert nets a
    /// single toggle everywhere.
    pub fn ellipse(&mut self, xc: i16, yc: i16, xr: u8, yr: u8, color: Color) {
        let a = xr as i32;
        let b = yr as i32;

        let mut x = -a;
        let mut y = 0i32;
        let mut dx = (1 + 2 * x) * b * b;
        let mut dy = x * x;
        let mut err = dx + dy;

        loop {
            let px = x as i16;
            let py = y as i16;
            self.point(xc - px, yc + py, color);
            if px != 0 {
                self.point(xc + px, yc + py, color);
            }
            if py != 0 {
                self.point(xc - px, yc - py, color);
                if px != 0 {
                    self.point(xc + px, yc - py, color);
                }
            }

            let e2 = 2 * err;
            if e2 >= dx {
                x += 1;
                dx += 2 * b * b;
                err += dx;
            }
            if e2 <= dy {
                y += 1;
                dy += 2 * a * a;
                err += dy;
            }
            if x > 0 {
                break;
            }
        }

        // Finish the blunt tips of tall ellipses.
        y += 1;
        while y <= b {
            self.point(xc, yc + y as i16, color);
            self.point(xc, yc - y as i16, color);
            y += 1;
        }
    }

    /// Circle outline.
    pub fn circle(&mut self, xc: i16, yc: i16, r: u8, color: Color) {
        self.ellipse(xc, yc, r, r, color);
    }

    // ── Triangles ──

    /// Triangle outline; each edge drawn half-open so the vertices are
    /// painted exactly once.
    pub fn triangle(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: Color) {
        self.bresenham(x0, y0, x1, y1, color, true);
        self.bresenham(x1, y1, x2, y2, color, true);
        self.bresenham(x2, y2, x0, y0, color, true);
    }

    /// Filled triangle, any vertex order.
    ///
    /// Sorted by x and split at the middle vertex into two triangles
    /// with a flat vertical side; the split column is filled by only
    /// one of the halves.
    pub fn triangle_fill(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, x2: i16, y2: i16, color: Color) {
        let mut v = [(x0, y0), (x1, y1), (x2, y2)];
        if v[0].0 > v[1].0 {
            v.swap(0, 1);
        }
        if v[1].0 > v[2].0 {
            v.swap(1, 2);
        }
        if v[0].0 > v[1].0 {
            v.swap(0, 1);
        }
        let (a, b, c) = (v[0], v[1], v[2]);

        if a.0 == c.0 {
            // Degenerate: all three vertices share a column.
            let lo = a.1.min(b.1).min(c.1);
            let hi = a.1.max(b.1).max(c.1);
            self.vline(a.0, lo, hi, color);
        } else if a.0 == b.0 {
            self.fvs_columns(a.0, a.1, b.1, c.0, c.1, color, false);
        } else if b.0 == c.0 {
            self.fvs_columns(b.0, b.1, c.1, a.0, a.1, color, false);
        } else {
            let ys = y_intercept(a.0, a.1, c.0, c.1, b.0);
            self.fvs_columns(b.0, b.1, ys, a.0, a.1, color, false);
            self.fvs_columns(b.0, b.1, ys, c.0, c.1, color, true);
        }
    }

    /// Filled triangle with a flat vertical side at `xs` (spanning
    /// `ys0..=ys1`) and its peak at `(xp, yp)`.
    pub fn triangle_fill_fvs(&mut self, xs: i16, ys0: i16, ys1: i16, xp: i16, yp: i16, color: Color) {
        self.fvs_columns(xs, ys0, ys1, xp, yp, color, false);
    }

    /// Column-by-column fill between the two side-to-peak edges.
    /// `skip_side` leaves the `xs` column to the adjoining half.
    fn fvs_columns(&mut self, xs: i16, ys0: i16, ys1: i16, xp: i16, yp: i16, color: Color, skip_side: bool) {
        if xs == xp {
            if !skip_side {
                let lo = ys0.min(ys1).min(yp);
                let hi = ys0.max(ys1).max(yp);
                self.vline(xs, lo, hi, color);
            }
            return;
        }

        let step: i16 = if xp > xs { 1 } else { -1 };
        let mut x = if skip_side { xs + step } else { xs };
        loop {
            let ya = y_intercept(xs, ys0, xp, yp, x);
            let yb = y_intercept(xs, ys1, xp, yp, x);
            self.vline(x, ya, yb, color);
            if x == xp {
                return;
            }
            x += step;
        }
    }

    // ── Text ──

    /// Draw one 6x8 character cell at text line `line` (0 = top) and
    /// pixel column `column`.
    pub fn glyph(&mut self, line: u8, column: u8, ch: u8, color: Color) {
        if line >= TEXT_LINES || column as i16 > MAX_X {
            return;
        }
        let glyph = match ch {
            0x20..=0x7F => &FONT_6X8[(ch - 0x20) as usize],
            _ => &FONT_6X8[0],
        };
        for (i, &bits) in glyph.iter().enumerate() {
            let x = column as usize + i;
            if x as i16 > MAX_X {
                return;
            }
            let idx = line as usize + x * 8;
            match color {
                Color::White => self.buf[idx] |= bits,
                Color::Black => self.buf[idx] &= !bits,
                Color::Invert => self.buf[idx] ^= bits,
                Color::Overwrite => self.buf[idx] = bits,
            }
        }
    }

    /// Draw a string starting at text line `line`, pixel column
    /// `column`. Wraps at the right edge; `'\n'` moves down a line and
    /// `'\r'` returns to column zero. Drawing stops below the last line.
    pub fn text(&mut self, line: u8, column: u8, color: Color, s: &str) {
        if line >= TEXT_LINES {
            return;
        }
        let mut line = line;
        let mut col = column as i16;
        for ch in s.bytes() {
            match ch {
                b'\n' => line += 1,
                b'\r' => col = 0,
                _ => {
                    if col + GLYPH_WIDTH as i16 > WIDTH {
                        col = 0;
                        line += 1;
                    }
                    if line >= TEXT_LINES {
                        return;
                    }
                    self.glyph(line, col as u8, ch, color);
                    col += GLYPH_WIDTH as i16;
                }
            }
            if line >= TEXT_LINES {
                return;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> u32 {
        fb.bytes().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn packing_matches_display_layout() {
        let mut fb = FrameBuffer::new();
        // Top-left pixel is bit 0 of byte 0.
        fb.point(0, 63, Color::White);
        assert_eq!(fb.bytes()[0], 0x01);
        fb.clear();
        // Bottom of the top band is bit 7.
        fb.point(0, 56, Color::White);
        assert_eq!(fb.bytes()[0], 0x80);
        fb.clear();
        // Bottom-left pixel: page 7 of column 0.
        fb.point(0, 0, Color::White);
        assert_eq!(fb.bytes()[7], 0x80);
        fb.clear();
        // Column stride is 8 bytes.
        fb.point(1, 63, Color::White);
        assert_eq!(fb.bytes()[8], 0x01);
    }

    #[test]
    fn point_off_buffer_is_noop() {
        let mut fb = FrameBuffer::new();
        for &(x, y) in &[(-1, 0), (0, -1), (128, 0), (0, 64), (-5, 70)] {
            fb.point(x, y, Color::White);
        }
        assert_eq!(lit(&fb), 0);
        assert!(!fb.pixel(-1, 0));
    }

    #[test]
    fn point_colors() {
        let mut fb = FrameBuffer::new();
        fb.point(10, 10, Color::White);
        assert!(fb.pixel(10, 10));
        fb.point(10, 10, Color::Invert);
        assert!(!fb.pixel(10, 10));
        fb.set();
        fb.point(10, 10, Color::Black);
        assert!(!fb.pixel(10, 10));
        assert_eq!(lit(&fb), WIDTH as u32 * HEIGHT as u32 - 1);
    }

    #[test]
    fn vline_brushes_across_pages() {
        let mut fb = FrameBuffer::new();
        fb.vline(0, 5, 20, Color::White);
        // y 16..=20 in page 5, y 8..=15 full page 6, y 5..=7 in page 7.
        assert_eq!(fb.bytes()[5], 0xF8);
        assert_eq!(fb.bytes()[6], 0xFF);
        assert_eq!(fb.bytes()[7], 0x07);
        assert_eq!(fb.bytes()[4], 0x00);
        assert_eq!(lit(&fb), 16);
        // Every pixel of the span and nothing adjacent.
        for y in 0..HEIGHT {
            assert_eq!(fb.pixel(0, y), (5..=20).contains(&y), "y={y}");
        }
    }

    #[test]
    fn vline_single_byte_span() {
        let mut fb = FrameBuffer::new();
        fb.vline(3, 9, 14, Color::White);
        assert_eq!(lit(&fb), 6);
        for y in 0..HEIGHT {
            assert_eq!(fb.pixel(3, y), (9..=14).contains(&y), "y={y}");
        }
    }

    #[test]
    fn vline_clips_and_reorders() {
        let mut fb = FrameBuffer::new();
        fb.vline(2, 70, -10, Color::White);
        assert_eq!(lit(&fb), HEIGHT as u32);
        fb.clear();
        fb.vline(-1, 0, 63, Color::White);
        fb.vline(128, 0, 63, Color::White);
        fb.vline(0, 70, 90, Color::White);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn hline_spans_columns() {
        let mut fb = FrameBuffer::new();
        fb.hline(120, -4, 40, Color::White);
        for x in 0..WIDTH {
            assert_eq!(fb.pixel(x, 40), x <= 120, "x={x}");
        }
        assert_eq!(lit(&fb), 121);
    }

    #[test]
    fn line_degenerates_to_axis_lines() {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        a.line(5, 10, 5, 30, Color::White);
        b.vline(5, 10, 30, Color::White);
        assert_eq!(a.bytes(), b.bytes());
        a.clear();
        b.clear();
        a.line(5, 10, 25, 10, Color::White);
        b.hline(5, 25, 10, Color::White);
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn diagonal_line_endpoints_and_count() {
        let mut fb = FrameBuffer::new();
        fb.line(0, 0, 20, 20, Color::White);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(20, 20));
        // A 45 degree line lights one pixel per column.
        assert_eq!(lit(&fb), 21);
    }

    #[test]
    fn clip_line_cases() {
        // Crossing horizontally: clipped to the full width.
        assert_eq!(
            clip_line(-10, 32, 137, 32),
            Some(((0, 32), (127, 32)))
        );
        // Fully inside: unchanged.
        assert_eq!(clip_line(3, 4, 10, 8), Some(((3, 4), (10, 8))));
        // Fully outside one edge.
        assert_eq!(clip_line(-5, 0, -1, 63), None);
        assert_eq!(clip_line(0, 70, 127, 65), None);
        // Diagonal through a corner region but missing the frame.
        assert_eq!(clip_line(-10, 60, 3, 80), None);
    }

    #[test]
    fn outcode_regions() {
        assert_eq!(outcode(64, 32), 0);
        assert_eq!(outcode(-1, 32), CLIP_LEFT);
        assert_eq!(outcode(128, 64), CLIP_RIGHT | CLIP_TOP);
        assert_eq!(outcode(5, -2), CLIP_BOTTOM);
    }

    #[test]
    fn rect_outline_paints_perimeter_once() {
        let mut fb = FrameBuffer::new();
        fb.rect(2, 2, 10, 8, Color::White);
        // 9x7 rectangle: 2*9 + 2*7 - 4 corner dedups.
        assert_eq!(lit(&fb), 28);
        fb.rect(2, 2, 10, 8, Color::Invert);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn rect_fill_area() {
        let mut fb = FrameBuffer::new();
        fb.rect_fill(10, 60, 3, 20, Color::White);
        assert_eq!(lit(&fb), 8 * 41);
        assert!(fb.pixel(3, 20) && fb.pixel(10, 60));
        assert!(!fb.pixel(2, 20) && !fb.pixel(11, 60));
        // Off-screen portions are clipped away.
        fb.clear();
        fb.rect_fill(-10, -10, 0, 0, Color::White);
        assert_eq!(lit(&fb), 1);
    }

    #[test]
    fn circle_invert_is_involution() {
        for r in 0..=12u8 {
            let mut fb = FrameBuffer::new();
            fb.circle(64, 32, r, Color::Invert);
            assert!(lit(&fb) > 0 || r == 0);
            if r == 0 {
                assert_eq!(lit(&fb), 1);
            }
            fb.circle(64, 32, r, Color::Invert);
            assert_eq!(lit(&fb), 0, "r={r}");
        }
    }

    #[test]
    fn ellipse_touches_extremes() {
        let mut fb = FrameBuffer::new();
        fb.ellipse(64, 32, 10, 5, Color::White);
        assert!(fb.pixel(54, 32) && fb.pixel(74, 32));
        assert!(fb.pixel(64, 27) && fb.pixel(64, 37));
        assert!(!fb.pixel(64, 32));
    }

    #[test]
    fn circle_clips_at_edges() {
        let mut fb = FrameBuffer::new();
        fb.circle(0, 0, 10, Color::White);
        assert!(fb.pixel(10, 0) && fb.pixel(0, 10));
        assert_ne!(lit(&fb), 0);
    }

    #[test]
    fn triangle_fill_covers_interior_once() {
        let mut fb = FrameBuffer::new();
        fb.triangle_fill(10, 10, 30, 40, 50, 15, Color::White);
        // Centroid area is inside.
        assert!(fb.pixel(30, 20));
        assert!(fb.pixel(10, 10) && fb.pixel(30, 40) && fb.pixel(50, 15));
        assert!(!fb.pixel(9, 10) && !fb.pixel(51, 15));
        fb.triangle_fill(10, 10, 30, 40, 50, 15, Color::Invert);
        fb.triangle_fill(10, 10, 30, 40, 50, 15, Color::Invert);
        // The split column was filled exactly once per pass.
        let mut reference = FrameBuffer::new();
        reference.triangle_fill(10, 10, 30, 40, 50, 15, Color::White);
        assert_eq!(fb.bytes(), reference.bytes());
    }

    #[test]
    fn triangle_fill_vertical_side() {
        let mut fb = FrameBuffer::new();
        // Right triangle with its vertical side at x = 5.
        fb.triangle_fill(5, 0, 5, 10, 15, 5, Color::White);
        assert!(fb.pixel(5, 0) && fb.pixel(5, 10) && fb.pixel(15, 5));
        assert!(fb.pixel(10, 5));
        assert!(!fb.pixel(16, 5));
        fb.triangle_fill(5, 0, 5, 10, 15, 5, Color::Invert);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn triangle_fill_degenerate_column() {
        let mut fb = FrameBuffer::new();
        fb.triangle_fill(7, 3, 7, 12, 7, 8, Color::White);
        assert_eq!(lit(&fb), 10);
    }

    #[test]
    fn triangle_fvs_matches_fill() {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        a.triangle_fill_fvs(20, 10, 30, 40, 20, Color::White);
        b.triangle_fill(20, 10, 20, 30, 40, 20, Color::White);
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn triangle_outline_invert_safe() {
        let mut fb = FrameBuffer::new();
        fb.triangle(10, 10, 30, 40, 50, 15, Color::Invert);
        fb.triangle(10, 10, 30, 40, 50, 15, Color::Invert);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn glyph_blits_page_aligned() {
        let mut fb = FrameBuffer::new();
        fb.glyph(0, 0, b'0', Color::White);
        let expect = [0x3E, 0x51, 0x49, 0x45, 0x3E, 0x00];
        for (i, &bits) in expect.iter().enumerate() {
            assert_eq!(fb.bytes()[i * 8], bits, "column {i}");
        }
    }

    #[test]
    fn glyph_overwrite_replaces_cell() {
        let mut fb = FrameBuffer::new();
        fb.set();
        fb.glyph(2, 6, b'1', Color::Overwrite);
        // Cell bytes equal the font data, neighbors stay set.
        assert_eq!(fb.bytes()[2 + 6 * 8], 0x00);
        assert_eq!(fb.bytes()[2 + 7 * 8], 0x42);
        assert_eq!(fb.bytes()[2 + 5 * 8], 0xFF);
        assert_eq!(fb.bytes()[1 + 6 * 8], 0xFF);
    }

    #[test]
    fn text_wraps_and_honors_controls() {
        let mut fb = FrameBuffer::new();
        fb.text(0, 120, Color::White, "AB");
        // 'A' fits on line 0, 'B' wraps to line 1 column 0.
        assert_eq!(fb.bytes()[120 * 8], 0x7E);
        assert_eq!(fb.bytes()[1], 0x7F);

        fb.clear();
        fb.text(3, 0, Color::White, "\n\rX");
        assert_eq!(fb.bytes()[4], 0x63);
    }

    #[test]
    fn text_below_last_line_is_noop() {
        let mut fb = FrameBuffer::new();
        fb.text(TEXT_LINES, 0, Color::White, "A");
        fb.text(255, 0, Color::Invert, "\nB");
        fb.text(7, 0, Color::White, "\nC");
        assert_eq!(lit(&fb), 0);
    }
}
