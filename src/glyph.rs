//! Seven-segment glyphs rendered as inline SVG.
//!
//! Release numbers are drawn as segment-display digits. Each digit is an
//! `<svg>` with all seven segments present; segments belonging to the digit
//! use the "on" colour, the rest a dimmed "off" colour. Keeping every
//! segment in the output gives every glyph the same footprint so numbers in
//! neighbouring cards line up.
//!
//! ## Segments
//!
//! ```text
//!    AAA
//!   F   B
//!   F   B
//!    GGG
//!   E   C
//!   E   C
//!    DDD
//! ```
//!
//! ## Geometry
//!
//! With box width `W`, height `H`, thickness `t`, margin `m` and horizontal
//! inset `hi`, the vertical segment length is `vLen = (H - 3m - 2t) / 2`:
//!
//! | segment | x | y | width | height |
//! |---|---|---|---|---|
//! | A | m + hi | m | W - 2m - 2hi | t |
//! | G | m + hi | H/2 - t/2 | W - 2m - 2hi | t |
//! | D | m + hi | H - m - t | W - 2m - 2hi | t |
//! | F | m | m + t | t | vLen |
//! | E | m | m + 2t + vLen | t | vLen |
//! | B | W - m - t | m + t | t | vLen |
//! | C | W - m - t | m + 2t + vLen | t | vLen |
//!
//! Every rectangle is then shrunk by the inner padding on all four sides and
//! drawn with corner radius `t/2`.

use maud::{Markup, html};

/// One of the seven display segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// SVG paint order: horizontals first, then the left and right pairs.
    pub const DRAW_ORDER: [Segment; 7] = [
        Segment::A,
        Segment::G,
        Segment::D,
        Segment::F,
        Segment::E,
        Segment::B,
        Segment::C,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of lit segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentSet(u8);

impl SegmentSet {
    pub fn from_segments(segments: &[Segment]) -> Self {
        SegmentSet(segments.iter().fold(0, |bits, s| bits | s.bit()))
    }

    /// Segments lit for a decimal digit. Anything other than `'0'..='9'`
    /// lights nothing.
    pub fn for_digit(digit: char) -> Self {
        use Segment::*;
        let on: &[Segment] = match digit {
            '0' => &[A, B, C, D, E, F],
            '1' => &[B, C],
            '2' => &[A, B, G, E, D],
            '3' => &[A, B, C, D, G],
            '4' => &[F, G, B, C],
            '5' => &[A, F, G, C, D],
            '6' => &[A, F, G, E, C, D],
            '7' => &[A, B, C],
            '8' => &[A, B, C, D, E, F, G],
            '9' => &[A, B, C, D, F, G],
            _ => &[],
        };
        SegmentSet::from_segments(on)
    }

    pub fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lit segments in `A..=G` order.
    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

/// An axis-aligned rounded rectangle in glyph user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
}

/// Fixed glyph dimensions, in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphGeometry {
    pub width: u32,
    pub height: u32,
    /// Segment stroke thickness.
    pub thickness: u32,
    /// Distance from the box edge to the outer segments.
    pub margin: u32,
    /// Inset applied to each segment so neighbours never touch.
    pub padding: u32,
    /// Extra horizontal inset for A, G and D, making the bars shorter than
    /// the span of the vertical pairs.
    pub h_inset: u32,
}

impl Default for GlyphGeometry {
    fn default() -> Self {
        Self {
            width: 36,
            height: 64,
            thickness: 8,
            margin: 4,
            padding: 1,
            h_inset: 4,
        }
    }
}

impl GlyphGeometry {
    /// Length of each vertical half-segment (F, E, B, C).
    pub fn vertical_len(&self) -> u32 {
        self.height
            .saturating_sub(3 * self.margin + 2 * self.thickness)
            / 2
    }

    /// Unpadded bounding box of a segment.
    pub fn segment_box(&self, segment: Segment) -> SegmentRect {
        let (w, h, t, m) = (self.width, self.height, self.thickness, self.margin);
        let v_len = self.vertical_len();
        let bar_x = m + self.h_inset;
        let bar_w = w.saturating_sub(2 * m + 2 * self.h_inset);
        let upper_y = m + t;
        let lower_y = m + t + v_len + t;
        let right_x = w.saturating_sub(m + t);

        let (x, y, width, height) = match segment {
            Segment::A => (bar_x, m, bar_w, t),
            Segment::G => (bar_x, (h / 2).saturating_sub(t / 2), bar_w, t),
            Segment::D => (bar_x, h.saturating_sub(m + t), bar_w, t),
            Segment::F => (m, upper_y, t, v_len),
            Segment::E => (m, lower_y, t, v_len),
            Segment::B => (right_x, upper_y, t, v_len),
            Segment::C => (right_x, lower_y, t, v_len),
        };
        SegmentRect {
            x,
            y,
            width,
            height,
            radius: t / 2,
        }
    }

    /// Drawn rectangle of a segment: the box shrunk by `padding` per side.
    pub fn segment_rect(&self, segment: Segment) -> SegmentRect {
        let b = self.segment_box(segment);
        let p = self.padding;
        SegmentRect {
            x: b.x + p,
            y: b.y + p,
            width: b.width.saturating_sub(2 * p),
            height: b.height.saturating_sub(2 * p),
            radius: b.radius,
        }
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Renders digits and digit strings as seven-segment SVG.
#[derive(Debug, Clone)]
pub struct GlyphRenderer {
    geometry: GlyphGeometry,
    on_color: String,
    off_color: String,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ON_COLOR, DEFAULT_OFF_COLOR)
    }
}

pub const DEFAULT_ON_COLOR: &str = "#a18922ff";
pub const DEFAULT_OFF_COLOR: &str = "#a18a2234";

impl GlyphRenderer {
    pub fn new(on_color: &str, off_color: &str) -> Self {
        Self {
            geometry: GlyphGeometry::default(),
            on_color: on_color.to_string(),
            off_color: off_color.to_string(),
        }
    }

    /// One digit as a standalone `<svg>`.
    pub fn render_digit(&self, digit: char) -> Markup {
        let lit = SegmentSet::for_digit(digit);
        let g = &self.geometry;
        html! {
            svg.seven-seg-digit viewBox=(g.view_box()) aria-hidden="true" {
                @for segment in Segment::DRAW_ORDER {
                    @let r = g.segment_rect(segment);
                    @let fill = if lit.contains(segment) { &self.on_color } else { &self.off_color };
                    rect x=(r.x) y=(r.y) width=(r.width) height=(r.height)
                        rx=(r.radius) ry=(r.radius) fill=(fill) {}
                }
            }
        }
    }

    /// A digit string as a row of glyphs, labelled with the input text.
    pub fn render_number(&self, text: &str) -> Markup {
        html! {
            span.seven-seg role="img" aria-label=(text) {
                @for c in text.chars() {
                    (self.render_digit(c))
                }
            }
        }
    }
}
