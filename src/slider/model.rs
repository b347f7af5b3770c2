//! Value model for the range slider.
//!
//! Holds the numeric range, the two selected values and the track geometry
//! needed to convert between value-space and widget-local pixel-space.
//! Pixel coordinates are widget-local with y growing downward.

use bevy::log::warn;
use bevy::math::{Rect, Vec2};
use thiserror::Error;

/// Height of the visible track band.
pub const TRACK_THICKNESS: f32 = 5.0;
/// Distance between the bottom of the track band and the bottom of the widget.
pub const TRACK_BOTTOM_INSET: f32 = 3.0;
/// Vertical space between the bottom of a thumb and the top of the track band.
pub const THUMB_TRACK_SPACING: f32 = 7.0;
/// Vertical offset of a label's center above its thumb.
pub const LABEL_OFFSET: f32 = 10.0;
/// Number of intervals between the decoration dots along the track.
pub const TICK_INTERVALS: usize = 10;

/// Errors raised by the range model.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    /// The requested bounds do not satisfy `minimum < maximum`.
    #[error("range slider bounds must satisfy minimum < maximum (got {minimum} and {maximum})")]
    InvalidBounds { minimum: f64, maximum: f64 },
}

/// One of the two draggable thumbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Thumb {
    Lower,
    Upper,
}

/// Layout inputs owned by the host and pushed into the model on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    /// Width of the widget, i.e. the full track length.
    pub length: f32,
    /// Height of the widget.
    pub height: f32,
    /// Width of one thumb (the handle size).
    pub handle_width: f32,
    /// Height of one thumb.
    pub handle_height: f32,
    /// Extra horizontal inset on both ends of the track.
    pub padding: f32,
}

impl TrackGeometry {
    /// Default widget height.
    pub const DEFAULT_HEIGHT: f32 = 73.0;
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            length: 300.0,
            height: Self::DEFAULT_HEIGHT,
            handle_width: 25.0,
            handle_height: 30.0,
            padding: 10.0,
        }
    }
}

/// Numeric state of a range slider.
///
/// `minimum <= lower_value <= upper_value <= maximum` holds after every
/// mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeModel {
    minimum: f64,
    maximum: f64,
    lower_value: f64,
    upper_value: f64,
    geometry: TrackGeometry,
    gap_override: Option<f64>,
}

/// Two-sided clamp. Unlike [`f64::clamp`] this does not panic when
/// `low > high`; `high` wins.
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.max(low).min(high)
}

fn check_bounds(minimum: f64, maximum: f64) -> Result<(), RangeError> {
    // Written negated so NaN is rejected too.
    if !(minimum < maximum) {
        return Err(RangeError::InvalidBounds { minimum, maximum });
    }
    Ok(())
}

impl Default for RangeModel {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
            lower_value: 0.0,
            upper_value: 1.0,
            geometry: TrackGeometry::default(),
            gap_override: None,
        }
    }
}

impl RangeModel {
    /// Creates a model spanning `[minimum, maximum]` with both thumbs at the ends.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self, RangeError> {
        check_bounds(minimum, maximum)?;
        Ok(Self {
            minimum,
            maximum,
            lower_value: minimum,
            upper_value: maximum,
            ..Default::default()
        })
    }

    /// Builder: replaces the track geometry.
    pub fn with_geometry(mut self, geometry: TrackGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Builder: assigns both values, upper first so the lower value is
    /// resolved against the new upper value.
    pub fn with_values(mut self, lower: f64, upper: f64) -> Self {
        self.set_upper_value(upper);
        self.set_lower_value(lower);
        self
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn lower_value(&self) -> f64 {
        self.lower_value
    }

    pub fn upper_value(&self) -> f64 {
        self.upper_value
    }

    /// Current value of the given thumb.
    pub fn value(&self, thumb: Thumb) -> f64 {
        match thumb {
            Thumb::Lower => self.lower_value,
            Thumb::Upper => self.upper_value,
        }
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Width of the value range.
    pub fn span(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// Minimum value-space distance between the two thumbs.
    ///
    /// Derived from one thumb's width measured against the full track length,
    /// unless overridden with [`RangeModel::set_minimum_gap`].
    pub fn minimum_gap_value(&self) -> f64 {
        if let Some(gap) = self.gap_override {
            return gap;
        }
        if self.geometry.length <= 0.0 {
            return 0.0;
        }
        f64::from(self.geometry.handle_width) * self.span() / f64::from(self.geometry.length)
    }

    /// Overrides the derived gap. `None` restores the derived value.
    ///
    /// Like geometry updates, this does not move the thumbs; the new gap
    /// applies from the next value assignment on.
    pub fn set_minimum_gap(&mut self, gap: Option<f64>) {
        self.gap_override = gap.map(|g| g.max(0.0));
    }

    /// Whether the gap does not fit inside the range, in which case both
    /// thumbs sit on the midpoint.
    pub fn is_collapsed(&self) -> bool {
        self.minimum_gap_value() > self.span()
    }

    fn midpoint(&self) -> f64 {
        self.minimum + self.span() / 2.0
    }

    /// Stores `max(minimum, min(value, upper - gap))`. Over-drag saturates.
    pub fn set_lower_value(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("Ignoring non-finite lower value {value}");
            return;
        }
        if self.is_collapsed() {
            self.collapse();
            return;
        }
        let gap = self.minimum_gap_value();
        self.lower_value = clamp(value, self.minimum, self.upper_value - gap).max(self.minimum);
    }

    /// Stores `min(maximum, max(value, lower + gap))`. Over-drag saturates.
    pub fn set_upper_value(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("Ignoring non-finite upper value {value}");
            return;
        }
        if self.is_collapsed() {
            self.collapse();
            return;
        }
        let gap = self.minimum_gap_value();
        self.upper_value = clamp(value, self.lower_value + gap, self.maximum);
    }

    /// Assigns a value to the given thumb.
    pub fn set_value(&mut self, thumb: Thumb, value: f64) {
        match thumb {
            Thumb::Lower => self.set_lower_value(value),
            Thumb::Upper => self.set_upper_value(value),
        }
    }

    fn collapse(&mut self) {
        let mid = clamp(self.midpoint(), self.minimum, self.maximum);
        self.lower_value = mid;
        self.upper_value = mid;
    }

    /// Replaces the bounds.
    ///
    /// An upper value sitting on the old maximum follows the new maximum.
    /// Both values are then re-clamped into the new range, upper first.
    pub fn set_bounds(&mut self, minimum: f64, maximum: f64) -> Result<(), RangeError> {
        check_bounds(minimum, maximum)?;
        let upper_pinned = self.upper_value == self.maximum;
        self.minimum = minimum;
        self.maximum = maximum;
        if upper_pinned {
            self.upper_value = maximum;
        }
        self.resolve();
        Ok(())
    }

    /// Replaces the minimum, keeping the maximum.
    pub fn set_minimum(&mut self, minimum: f64) -> Result<(), RangeError> {
        self.set_bounds(minimum, self.maximum)
    }

    /// Replaces the maximum, keeping the minimum.
    pub fn set_maximum(&mut self, maximum: f64) -> Result<(), RangeError> {
        self.set_bounds(self.minimum, maximum)
    }

    /// Re-establishes the ordering and gap invariants after a bounds change.
    fn resolve(&mut self) {
        if self.is_collapsed() {
            self.collapse();
            return;
        }
        let gap = self.minimum_gap_value();
        self.upper_value = clamp(self.upper_value, self.minimum + gap, self.maximum);
        // `upper - gap` can round below the minimum when upper sits on `minimum + gap`.
        self.lower_value = clamp(self.lower_value, self.minimum, self.upper_value - gap).max(self.minimum);
    }

    /// Updates the track length and handle size. Values are left untouched.
    pub fn set_track_geometry(&mut self, length: f32, handle_size: f32) {
        self.geometry.length = length;
        self.geometry.handle_width = handle_size;
    }

    /// Replaces all layout inputs. Values are left untouched.
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    /// Pixel width the thumb centers travel across.
    fn usable_length(&self) -> f32 {
        self.geometry.length - self.geometry.handle_width - self.geometry.padding * 2.0
    }

    /// Offset of the first thumb center from the left edge.
    fn track_inset(&self) -> f32 {
        self.geometry.handle_width / 2.0 + self.geometry.padding
    }

    /// Horizontal pixel offset of the thumb center representing `value`.
    pub fn position_for_value(&self, value: f64) -> f32 {
        let fraction = (value - self.minimum) / self.span();
        (f64::from(self.usable_length()) * fraction) as f32 + self.track_inset()
    }

    /// Inverse of [`RangeModel::position_for_value`].
    pub fn value_for_position(&self, position: f32) -> f64 {
        let usable = f64::from(self.usable_length());
        if usable <= 0.0 {
            return self.minimum;
        }
        let fraction = f64::from(position - self.track_inset()) / usable;
        self.minimum + fraction * self.span()
    }

    /// Value change corresponding to a horizontal pointer movement.
    ///
    /// The divisor is the track length minus one handle width, mirroring the
    /// half handle reserved at each end by the position mapping.
    pub fn value_delta_for_pixels(&self, delta_pixels: f32) -> f64 {
        let divisor = f64::from(self.geometry.length - self.geometry.handle_width);
        if divisor <= 0.0 {
            return 0.0;
        }
        f64::from(delta_pixels) * self.span() / divisor
    }

    /// Top edge of the track band.
    fn track_top(&self) -> f32 {
        self.geometry.height - TRACK_THICKNESS - TRACK_BOTTOM_INSET
    }

    /// Visible part of the track band.
    pub fn track_rect(&self) -> Rect {
        let top = self.track_top();
        Rect::new(
            self.track_inset(),
            top,
            self.track_inset() + self.usable_length(),
            top + TRACK_THICKNESS,
        )
    }

    /// Part of the track between the two thumb centers.
    pub fn highlight_rect(&self) -> Rect {
        let top = self.track_top();
        Rect::new(
            self.position_for_value(self.lower_value),
            top,
            self.position_for_value(self.upper_value),
            top + TRACK_THICKNESS,
        )
    }

    /// Frame of a thumb, sitting above the track band.
    pub fn thumb_rect(&self, thumb: Thumb) -> Rect {
        let center = self.position_for_value(self.value(thumb));
        let bottom = self.track_top() - THUMB_TRACK_SPACING;
        let half = self.geometry.handle_width / 2.0;
        Rect::new(
            center - half,
            bottom - self.geometry.handle_height,
            center + half,
            bottom,
        )
    }

    /// Area that claims a pointer-down for a thumb: the thumb's column from
    /// the thumb's top down through the track band.
    pub fn hit_rect(&self, thumb: Thumb) -> Rect {
        let thumb_rect = self.thumb_rect(thumb);
        Rect::new(
            thumb_rect.min.x,
            thumb_rect.min.y,
            thumb_rect.max.x,
            self.track_top() + TRACK_THICKNESS,
        )
    }

    /// Center point of a thumb's value label.
    pub fn label_anchor(&self, thumb: Thumb) -> Vec2 {
        let rect = self.thumb_rect(thumb);
        Vec2::new(rect.center().x, rect.min.y - LABEL_OFFSET)
    }

    /// Centers of the decoration dots spread evenly along the visible track.
    pub fn tick_centers(&self) -> Vec<Vec2> {
        let track = self.track_rect();
        let spacing = track.width() / TICK_INTERVALS as f32;
        (0..=TICK_INTERVALS)
            .map(|i| Vec2::new(track.min.x + spacing * i as f32, track.center().y))
            .collect()
    }
}
