//! A dual-thumb range slider for Bevy UI.
//!
//! The value model and drag state machine are plain Rust and can drive any
//! renderer through [`slider::DrawHook`].

pub mod slider;

// Re-export the main plugin for convenience
pub use slider::{RangeModel, RangeSlider, RangeSliderChanged, RangeSliderPlugin, RangeSliderProps};
