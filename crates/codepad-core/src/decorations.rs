//! Layered highlight decorations.
//!
//! Every highlight the core produces (current line, hover, search matches, the current match,
//! user line colors) is a [`Decoration`] living in one of a fixed set of [`DecorationLayer`]s.
//! The [`DecorationCompositor`] flattens the layers in paint-priority order and hands the result
//! to the host through a single [`HighlightSink::set_highlights`] call per
//! [`apply`](DecorationCompositor::apply).
//!
//! Callers follow a "clear, rebuild, apply once" discipline: any number of
//! [`add`](DecorationCompositor::add) / [`clear_layer`](DecorationCompositor::clear_layer) calls,
//! then exactly one `apply`. The host never sees a partially rebuilt layer set.

use crate::theme::Color;
use std::ops::Range;

/// Highlight layers, lowest to highest paint priority.
///
/// Decorations of a later layer are painted on top of earlier ones, so the current match stays
/// distinguishable even though it is also part of [`DecorationLayer::SearchMatches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecorationLayer {
    /// Host/user-defined decorations (line colors).
    Custom,
    /// Current line (editable) or hovered line (read-only).
    CurrentLine,
    /// All search matches.
    SearchMatches,
    /// The current search match.
    CurrentMatch,
}

impl DecorationLayer {
    /// All layers in ascending paint priority.
    pub const ALL: [Self; 4] = [
        Self::Custom,
        Self::CurrentLine,
        Self::SearchMatches,
        Self::CurrentMatch,
    ];

    /// Paint priority (0 = bottom).
    pub const fn priority(self) -> usize {
        self as usize
    }
}

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationRange {
    /// Range start offset (inclusive), in `char`s from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in `char`s from the start of the document.
    pub end: usize,
}

impl DecorationRange {
    /// Create a new decoration range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<Range<usize>> for DecorationRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A single highlight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoration {
    /// Anchor range in character offsets.
    pub range: DecorationRange,
    /// Background color.
    pub color: Color,
    /// If `true`, the background spans the full width of the line(s) touched by `range`.
    pub full_line_width: bool,
}

impl Decoration {
    /// Create a decoration.
    pub fn new(range: impl Into<DecorationRange>, color: Color, full_line_width: bool) -> Self {
        Self {
            range: range.into(),
            color,
            full_line_width,
        }
    }
}

/// Host-side "set visible highlights" primitive.
///
/// Each call replaces the full highlight set atomically from the host's perspective.
pub trait HighlightSink {
    /// Replace all visible highlights with `highlights` (already in paint order).
    fn set_highlights(&mut self, highlights: &[Decoration]);
}

impl<F> HighlightSink for F
where
    F: FnMut(&[Decoration]),
{
    fn set_highlights(&mut self, highlights: &[Decoration]) {
        self(highlights)
    }
}

/// One decoration list per [`DecorationLayer`], composited on [`apply`](Self::apply).
#[derive(Debug, Clone, Default)]
pub struct DecorationCompositor {
    layers: [Vec<Decoration>; 4],
}

impl DecorationCompositor {
    /// Create an empty compositor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoration to `layer`. Duplicates are kept.
    pub fn add(
        &mut self,
        layer: DecorationLayer,
        range: impl Into<DecorationRange>,
        color: Color,
        full_line_width: bool,
    ) {
        self.layers[layer.priority()].push(Decoration::new(range, color, full_line_width));
    }

    /// Remove every decoration of `layer`.
    pub fn clear_layer(&mut self, layer: DecorationLayer) {
        self.layers[layer.priority()].clear();
    }

    /// Remove every decoration of every layer.
    pub fn clear_all(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Decorations of `layer`, in insertion order.
    pub fn layer(&self, layer: DecorationLayer) -> &[Decoration] {
        &self.layers[layer.priority()]
    }

    /// Number of decorations in `layer`.
    pub fn layer_len(&self, layer: DecorationLayer) -> usize {
        self.layers[layer.priority()].len()
    }

    /// `true` if `layer` (or, with `None`, any layer) holds decorations.
    pub fn has_decorations(&self, layer: Option<DecorationLayer>) -> bool {
        match layer {
            Some(layer) => !self.layers[layer.priority()].is_empty(),
            None => self.layers.iter().any(|l| !l.is_empty()),
        }
    }

    /// Flatten all layers in ascending paint priority.
    pub fn composed(&self) -> Vec<Decoration> {
        let total = self.layers.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for layer in DecorationLayer::ALL {
            out.extend_from_slice(&self.layers[layer.priority()]);
        }
        out
    }

    /// Hand the composed list to the host in exactly one call.
    pub fn apply<S>(&self, sink: &mut S)
    where
        S: HighlightSink + ?Sized,
    {
        sink.set_highlights(&self.composed());
    }
}
