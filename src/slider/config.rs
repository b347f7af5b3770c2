//! Cosmetic configuration for the range slider.

use bevy::prelude::*;

/// How the value labels are presented above the thumbs.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// Bare text centered above each thumb.
    #[default]
    Plain,
    /// Text over a filled badge.
    Overlay,
}

/// Styling for a range slider. None of it affects the value logic.
#[derive(Component, Clone, Debug)]
pub struct RangeSliderStyle {
    // Colors
    /// Color of the whole track.
    pub track_color: Color,
    /// Color of the selected sub-range.
    pub highlight_color: Color,
    /// Color of the label text.
    pub text_color: Color,
    /// Fill of a thumb drawn without an image.
    pub thumb_color: Color,
    /// Color of the decoration dots along the track.
    pub tick_color: Color,
    /// Badge fill behind overlay labels.
    pub badge_color: Color,

    // Typography
    /// Label font. `None` uses the default font.
    pub font: Option<Handle<Font>>,
    /// Label font size.
    pub font_size: f32,
    /// Decimal places shown in labels.
    pub label_precision: usize,
    pub label_style: LabelStyle,
}

impl Default for RangeSliderStyle {
    fn default() -> Self {
        Self {
            // Colors
            track_color: Color::srgba(0.9, 0.9, 0.9, 1.0),
            highlight_color: Color::srgba(244.0 / 255.0, 83.0 / 255.0, 154.0 / 255.0, 1.0),
            text_color: Color::BLACK,
            thumb_color: Color::WHITE,
            tick_color: Color::WHITE,
            badge_color: Color::srgba(0.15, 0.15, 0.15, 0.85),

            // Typography
            font: None,
            font_size: 12.0,
            label_precision: 2,
            label_style: LabelStyle::Plain,
        }
    }
}

impl RangeSliderStyle {
    /// Formats a value for a thumb label.
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.label_precision)
    }

    /// Fill behind a label: the badge for overlay labels, nothing for plain ones.
    pub fn label_badge_color(&self) -> Color {
        match self.label_style {
            LabelStyle::Plain => Color::NONE,
            LabelStyle::Overlay => self.badge_color,
        }
    }

    /// Text font for labels.
    pub fn text_font(&self) -> TextFont {
        TextFont {
            font: self.font.clone().unwrap_or_default(),
            font_size: self.font_size,
            ..default()
        }
    }
}
