//! Renderer-facing snapshot of a range slider and the draw hook renderers implement.
//!
//! The core never draws. After every mutation a [`RenderFrame`] is captured
//! from the model and handed to a [`DrawHook`]. The two label presentations
//! are separate renderers over the same frame.

use bevy::math::{Rect, Vec2};
use bevy::prelude::Color;

use super::config::RangeSliderStyle;
use super::drag::DragController;
use super::model::{RangeModel, Thumb, TRACK_THICKNESS};

/// Everything needed to draw one thumb and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbFrame {
    pub thumb: Thumb,
    pub value: f64,
    pub rect: Rect,
    /// Whether this thumb owns the current gesture.
    pub highlighted: bool,
    pub label: String,
    pub label_anchor: Vec2,
}

/// Plain geometric and textual data describing the slider's current look.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub track: Rect,
    pub highlight: Rect,
    pub ticks: Vec<Vec2>,
    pub tick_diameter: f32,
    pub lower: ThumbFrame,
    pub upper: ThumbFrame,
}

impl RenderFrame {
    /// Captures the current model state.
    pub fn capture(
        model: &RangeModel,
        controller: &DragController,
        style: &RangeSliderStyle,
    ) -> Self {
        let thumb_frame = |thumb: Thumb| {
            let value = model.value(thumb);
            ThumbFrame {
                thumb,
                value,
                rect: model.thumb_rect(thumb),
                highlighted: controller.active_thumb() == Some(thumb),
                label: style.format_value(value),
                label_anchor: model.label_anchor(thumb),
            }
        };

        Self {
            track: model.track_rect(),
            highlight: model.highlight_rect(),
            ticks: model.tick_centers(),
            tick_diameter: TRACK_THICKNESS,
            lower: thumb_frame(Thumb::Lower),
            upper: thumb_frame(Thumb::Upper),
        }
    }

    pub fn thumb(&self, thumb: Thumb) -> &ThumbFrame {
        match thumb {
            Thumb::Lower => &self.lower,
            Thumb::Upper => &self.upper,
        }
    }

    pub fn thumbs(&self) -> [&ThumbFrame; 2] {
        [&self.lower, &self.upper]
    }

    /// Bounding box of a tick dot.
    pub fn tick_rect(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, Vec2::splat(self.tick_diameter))
    }

    /// Box a label of the given font size is laid out in, centered on its anchor.
    pub fn label_rect(&self, thumb: Thumb, font_size: f32) -> Rect {
        let frame = self.thumb(thumb);
        let size = Vec2::new(frame.rect.width() * 3.0, font_size * 1.5);
        Rect::from_center_size(frame.label_anchor, size)
    }
}

/// Receives a freshly captured frame whenever the slider changes.
pub trait DrawHook {
    fn draw(&mut self, frame: &RenderFrame, style: &RangeSliderStyle);
}

/// A backend-neutral drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    FillEllipse { rect: Rect, color: Color },
    Thumb { thumb: Thumb, rect: Rect, highlighted: bool },
    Text {
        text: String,
        center: Vec2,
        color: Color,
        font_size: f32,
    },
}

fn push_track_and_thumbs(commands: &mut Vec<DrawCommand>, frame: &RenderFrame, style: &RangeSliderStyle) {
    commands.push(DrawCommand::FillRect {
        rect: frame.track,
        color: style.track_color,
    });
    commands.push(DrawCommand::FillRect {
        rect: frame.highlight,
        color: style.highlight_color,
    });
    commands.extend(frame.ticks.iter().map(|&center| DrawCommand::FillEllipse {
        rect: frame.tick_rect(center),
        color: style.tick_color,
    }));
    commands.extend(frame.thumbs().into_iter().map(|thumb| DrawCommand::Thumb {
        thumb: thumb.thumb,
        rect: thumb.rect,
        highlighted: thumb.highlighted,
    }));
}

/// Display-list renderer with bare text labels.
#[derive(Default, Debug)]
pub struct PlainLabelRenderer {
    pub commands: Vec<DrawCommand>,
}

impl DrawHook for PlainLabelRenderer {
    fn draw(&mut self, frame: &RenderFrame, style: &RangeSliderStyle) {
        self.commands.clear();
        push_track_and_thumbs(&mut self.commands, frame, style);
        for thumb in frame.thumbs() {
            self.commands.push(DrawCommand::Text {
                text: thumb.label.clone(),
                center: thumb.label_anchor,
                color: style.text_color,
                font_size: style.font_size,
            });
        }
    }
}

/// Display-list renderer drawing each label over a badge.
#[derive(Default, Debug)]
pub struct OverlayLabelRenderer {
    pub commands: Vec<DrawCommand>,
}

impl DrawHook for OverlayLabelRenderer {
    fn draw(&mut self, frame: &RenderFrame, style: &RangeSliderStyle) {
        self.commands.clear();
        push_track_and_thumbs(&mut self.commands, frame, style);
        for thumb in frame.thumbs() {
            self.commands.push(DrawCommand::FillRect {
                rect: frame.label_rect(thumb.thumb, style.font_size),
                color: style.badge_color,
            });
            self.commands.push(DrawCommand::Text {
                text: thumb.label.clone(),
                center: thumb.label_anchor,
                color: style.text_color,
                font_size: style.font_size,
            });
        }
    }
}
