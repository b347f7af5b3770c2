//! Range slider widget.
//!
//! A horizontal track with two draggable thumbs selecting a sub-range of a
//! continuous numeric range. The value logic lives in [`model`] and [`drag`]
//! and knows nothing about drawing; [`widget`] hosts it in Bevy UI.

pub mod config;
pub mod drag;
pub mod model;
pub mod render;
pub mod widget;

pub use config::{LabelStyle, RangeSliderStyle};
pub use drag::{DragController, DragState, RangeChanged};
pub use model::{RangeError, RangeModel, Thumb, TrackGeometry};
pub use render::{
    DrawCommand, DrawHook, OverlayLabelRenderer, PlainLabelRenderer, RenderFrame, ThumbFrame,
};
pub use widget::{
    spawn_range_slider, RangeSlider, RangeSliderChanged, RangeSliderPlugin, RangeSliderProps,
    RangeSliderSet, RangeSliderThumbImage, SliderPart,
};
