// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for axis fitting.
//!
//! Axis layout in `VizIR` depends on how wide tick labels render: a vertical axis
//! claims the width of its longest label, and a horizontal axis rotates its
//! labels until they stop overlapping. Glyph shaping stays downstream, so the
//! axis code only depends on the tiny [`TextMeasurer`] interface defined here.
//!
//! The crate is `no_std` (with `alloc` for owned family names) and has no
//! dependencies, so canvas-backed, shaping-backed and heuristic measurers can all
//! implement the same trait.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

/// A single-line text measurement interface.
pub trait TextMeasurer {
    /// Measure `text` as one line rendered with `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Font selection for tick labels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in surface units (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a sans-serif, normal weight style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Returns a CSS `font` shorthand, e.g. `"normal 400 12px sans-serif"`.
    ///
    /// Canvas-style measurers take this form directly.
    #[must_use]
    pub fn to_css_font(&self) -> String {
        format!(
            "{} {} {}px {}",
            self.font_style.as_css(),
            self.font_weight.0,
            self.font_size,
            self.font_family.as_css_family()
        )
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// CSS `serif`.
    Serif,
    /// CSS `sans-serif`.
    SansSerif,
    /// CSS `monospace`.
    Monospace,
    /// A named family (e.g. `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the family as used in a CSS font declaration.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style numeric font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// `400`.
    pub const NORMAL: Self = Self(400);
    /// `700`.
    pub const BOLD: Self = Self(700);
}

/// CSS-style font style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
    /// Slanted upright glyphs.
    Oblique,
}

impl FontStyle {
    /// Returns the CSS keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty string.
    pub const ZERO: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Returns the widest advance among `texts` rendered with `style`.
///
/// An empty iterator (or only empty strings) yields `0.0`.
pub fn longest_advance<'a, M, I>(measurer: &M, style: &TextStyle, texts: I) -> f64
where
    M: TextMeasurer + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| measurer.measure(t, style).advance_width)
        .fold(0.0_f64, f64::max)
}

/// A heuristic measurer for layout before real fonts are available.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::ZERO;
        }
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

/// A measurer where every `char` advances by the same fixed width.
///
/// The width ignores the font size, which makes label extents exact and easy to
/// reason about (monospace terminals, tests).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per `char`.
    pub advance: f64,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer with the given per-char advance.
    #[must_use]
    pub fn new(advance: f64) -> Self {
        Self {
            advance: advance.max(0.0),
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::ZERO;
        }
        TextMetrics {
            advance_width: self.advance * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn css_font_matches_canvas_shorthand() {
        let style = TextStyle::new(12.0)
            .with_family(FontFamily::Named(Arc::from("Helvetica Neue")))
            .with_style(FontStyle::Italic);
        assert_eq!(style.to_css_font(), "italic 400 12px Helvetica Neue");
    }

    #[test]
    fn longest_advance_picks_widest_label() {
        let m = FixedAdvanceMeasurer::new(7.0);
        let style = TextStyle::default();
        let w = longest_advance(&m, &style, ["1", "100", "10"]);
        assert!((w - 21.0).abs() < 1e-9);
    }

    #[test]
    fn longest_advance_of_nothing_is_zero() {
        let m = HeuristicTextMeasurer;
        let style = TextStyle::default();
        assert_eq!(longest_advance(&m, &style, ["", ""]), 0.0);
        assert_eq!(longest_advance(&m, &style, core::iter::empty()), 0.0);
    }
}
