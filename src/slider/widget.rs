//! Bevy UI host for the range slider.
//!
//! The slider root node carries a [`RangeSlider`] component and receives the
//! picking events; its children are purely visual and ignore picking.
//! - Press on a thumb claims the gesture, anywhere else lets it propagate
//! - Drag moves the claimed thumb and triggers [`RangeSliderChanged`]
//! - Release, drag end and cancel release the thumb

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ecs::observer::On;
use bevy::picking::Pickable;
use bevy::picking::events::{Cancel, Drag, DragEnd, Pointer, Press, Release};
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::ui::{ComputedNode, UiGlobalTransform};

use super::config::RangeSliderStyle;
use super::drag::{DragController, RangeChanged};
use super::model::{RangeError, RangeModel, TICK_INTERVALS, Thumb, TrackGeometry};
use super::render::{DrawHook, RenderFrame};

/// Props for spawning a range slider.
pub struct RangeSliderProps {
    pub minimum: f64,
    pub maximum: f64,
    pub lower_value: f64,
    pub upper_value: f64,
    /// Width of the slider node. The track length follows the laid out size.
    pub width: Val,
    pub height: f32,
    /// Size of one thumb. Replaced by the image size once a thumb image loads.
    pub thumb_size: Vec2,
    pub thumb_image: Option<Handle<Image>>,
    pub style: RangeSliderStyle,
}

impl Default for RangeSliderProps {
    fn default() -> Self {
        let geometry = TrackGeometry::default();
        Self {
            minimum: 0.0,
            maximum: 1.0,
            lower_value: 0.0,
            upper_value: 1.0,
            width: Percent(100.0),
            height: geometry.height,
            thumb_size: Vec2::new(geometry.handle_width, geometry.handle_height),
            thumb_image: None,
            style: RangeSliderStyle::default(),
        }
    }
}

/// A range slider: value model plus gesture state.
#[derive(Component, Clone, Debug, Default)]
#[require(RangeSliderStyle)]
pub struct RangeSlider {
    model: RangeModel,
    controller: DragController,
}

impl RangeSlider {
    pub fn new(model: RangeModel) -> Self {
        Self {
            model,
            controller: DragController::new(),
        }
    }

    pub fn model(&self) -> &RangeModel {
        &self.model
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn lower_value(&self) -> f64 {
        self.model.lower_value()
    }

    pub fn upper_value(&self) -> f64 {
        self.model.upper_value()
    }

    pub fn set_lower_value(&mut self, value: f64) {
        self.model.set_lower_value(value);
    }

    pub fn set_upper_value(&mut self, value: f64) {
        self.model.set_upper_value(value);
    }

    pub fn set_bounds(&mut self, minimum: f64, maximum: f64) -> Result<(), RangeError> {
        self.model.set_bounds(minimum, maximum)
    }

    pub fn set_minimum(&mut self, minimum: f64) -> Result<(), RangeError> {
        self.model.set_minimum(minimum)
    }

    pub fn set_maximum(&mut self, maximum: f64) -> Result<(), RangeError> {
        self.model.set_maximum(maximum)
    }

    /// Captures the current look for a renderer.
    pub fn frame(&self, style: &RangeSliderStyle) -> RenderFrame {
        RenderFrame::capture(&self.model, &self.controller, style)
    }
}

/// Image drawn for both thumbs. Its size becomes the thumb size once loaded.
#[derive(Component, Clone, Debug)]
pub struct RangeSliderThumbImage(pub Handle<Image>);

/// Visual child of a range slider, positioned from the render frame.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderPart {
    Track,
    Highlight,
    Tick(usize),
    Thumb(Thumb),
    /// Label container; its text child shows the value.
    Label(Thumb),
}

/// Event triggered after every drag step on a range slider.
#[derive(Event, Clone, Debug)]
pub struct RangeSliderChanged {
    /// The slider entity.
    pub source: Entity,
    pub lower: f64,
    pub upper: f64,
}

impl RangeSliderChanged {
    fn new(source: Entity, change: RangeChanged) -> Self {
        Self {
            source,
            lower: change.lower,
            upper: change.upper,
        }
    }
}

/// Spawns a range slider under `parent` and returns the slider entity.
pub fn spawn_range_slider(
    parent: &mut ChildSpawnerCommands<'_>,
    props: RangeSliderProps,
) -> Result<Entity, RangeError> {
    let geometry = TrackGeometry {
        height: props.height,
        handle_width: props.thumb_size.x,
        handle_height: props.thumb_size.y,
        ..default()
    };
    let model = RangeModel::new(props.minimum, props.maximum)?
        .with_geometry(geometry)
        .with_values(props.lower_value, props.upper_value);
    let slider = RangeSlider::new(model);
    let frame = slider.frame(&props.style);
    let style = props.style;
    let mut renderer = UiNodeRenderer::default();
    renderer.draw(&frame, &style);

    let mut root = parent.spawn((
        Node {
            width: props.width,
            height: Px(props.height),
            position_type: PositionType::Relative,
            ..default()
        },
        slider,
        style.clone(),
    ));
    if let Some(image) = &props.thumb_image {
        root.insert(RangeSliderThumbImage(image.clone()));
    }

    root.with_children(|children| {
        let decorations = [SliderPart::Track, SliderPart::Highlight]
            .into_iter()
            .chain((0..=TICK_INTERVALS).map(SliderPart::Tick));
        for part in decorations {
            children.spawn((
                part,
                renderer.node(part, part_node()),
                BackgroundColor(renderer.fill(part)),
                Pickable::IGNORE,
            ));
        }
        for thumb in [Thumb::Lower, Thumb::Upper] {
            let part = SliderPart::Thumb(thumb);
            let mut thumb_node = children.spawn((part, renderer.node(part, part_node()), Pickable::IGNORE));
            match &props.thumb_image {
                Some(image) => thumb_node.insert(ImageNode::new(image.clone())),
                None => thumb_node.insert(BackgroundColor(renderer.fill(part))),
            };

            let part = SliderPart::Label(thumb);
            let label_node = Node {
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..part_node()
            };
            children
                .spawn((
                    part,
                    renderer.node(part, label_node),
                    BackgroundColor(renderer.fill(part)),
                    Pickable::IGNORE,
                ))
                .with_children(|label| {
                    label.spawn((
                        Text::new(frame.thumb(thumb).label.clone()),
                        style.text_font(),
                        TextColor(style.text_color),
                        Pickable::IGNORE,
                    ));
                });
        }
    });

    let entity = root.id();
    debug!("Spawned range slider {entity:?}");
    Ok(entity)
}

fn part_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        ..default()
    }
}

/// Converts a pointer position in window coordinates to slider-local pixels.
fn local_position(
    pointer: Vec2,
    computed: &ComputedNode,
    transform: &UiGlobalTransform,
) -> Option<Vec2> {
    let scale = computed.inverse_scale_factor();
    let normalized = computed.normalize_point(*transform, pointer / scale)?;
    Some((normalized + Vec2::splat(0.5)) * computed.size() * scale)
}

// Observer: pointer down, hit-test the thumbs
fn range_slider_on_press(
    mut press: On<Pointer<Press>>,
    mut q_slider: Query<(&mut RangeSlider, &ComputedNode, &UiGlobalTransform)>,
) {
    let Ok((mut slider, computed, transform)) = q_slider.get_mut(press.entity) else {
        return;
    };
    let Some(position) = local_position(press.pointer_location.position, computed, transform) else {
        return;
    };

    let slider = &mut *slider;
    if slider.controller.pointer_down(&slider.model, position) {
        // Only a claimed gesture stops here; misses reach the host.
        press.propagate(false);
    }
}

// Observer: pointer move while a thumb is held
fn range_slider_on_drag(
    mut drag: On<Pointer<Drag>>,
    mut q_slider: Query<(&mut RangeSlider, &ComputedNode, &UiGlobalTransform)>,
    mut commands: Commands,
) {
    let Ok((mut slider, computed, transform)) = q_slider.get_mut(drag.entity) else {
        return;
    };
    if !slider.controller.is_dragging() {
        return;
    }
    drag.propagate(false);

    let Some(position) = local_position(drag.pointer_location.position, computed, transform) else {
        return;
    };

    let slider = &mut *slider;
    if let Some(change) = slider.controller.pointer_move(&mut slider.model, position) {
        commands.trigger(RangeSliderChanged::new(drag.entity, change));
    }
}

fn release(slider: &mut Mut<RangeSlider>) {
    // Avoid flagging a change when nothing was held.
    if slider.controller.is_dragging() {
        slider.controller.pointer_up();
    }
}

// Observer: pointer up over the slider
fn range_slider_on_release(
    release_event: On<Pointer<Release>>,
    mut q_slider: Query<&mut RangeSlider>,
) {
    if let Ok(mut slider) = q_slider.get_mut(release_event.entity) {
        release(&mut slider);
    }
}

// Observer: drag ended, possibly away from the slider
fn range_slider_on_drag_end(mut drag_end: On<Pointer<DragEnd>>, mut q_slider: Query<&mut RangeSlider>) {
    if let Ok(mut slider) = q_slider.get_mut(drag_end.entity) {
        if slider.controller.is_dragging() {
            drag_end.propagate(false);
        }
        release(&mut slider);
    }
}

// Observer: gesture cancelled by the platform
fn range_slider_on_cancel(cancel: On<Pointer<Cancel>>, mut q_slider: Query<&mut RangeSlider>) {
    if let Ok(mut slider) = q_slider.get_mut(cancel.entity)
        && slider.controller.is_dragging()
    {
        slider.controller.cancel();
    }
}

/// System: push the laid out node size into the model.
pub fn sync_range_slider_geometry(
    mut q_slider: Query<(&mut RangeSlider, &ComputedNode), Changed<ComputedNode>>,
) {
    for (mut slider, computed) in &mut q_slider {
        let size = computed.size() * computed.inverse_scale_factor();
        if size.x <= 0.0 {
            continue;
        }
        let mut geometry = slider.model.geometry();
        geometry.length = size.x;
        geometry.height = size.y;
        if geometry != slider.model.geometry() {
            slider.model.set_geometry(geometry);
        }
    }
}

/// System: adopt the thumb image size once the image is available.
pub fn sync_thumb_image_size(
    mut q_slider: Query<(&mut RangeSlider, &RangeSliderThumbImage)>,
    images: Res<Assets<Image>>,
) {
    for (mut slider, thumb_image) in &mut q_slider {
        let Some(image) = images.get(&thumb_image.0) else {
            continue;
        };
        let size = image.size_f32();
        let mut geometry = slider.model.geometry();
        if geometry.handle_width == size.x && geometry.handle_height == size.y {
            continue;
        }
        geometry.handle_width = size.x;
        geometry.handle_height = size.y;
        slider.model.set_geometry(geometry);
    }
}

/// Draw hook that records where each slider part goes and how it is filled.
#[derive(Default)]
struct UiNodeRenderer {
    placements: Vec<(SliderPart, Rect, Color)>,
    labels: Vec<(Thumb, String)>,
}

impl UiNodeRenderer {
    fn placement(&self, part: SliderPart) -> Option<(Rect, Color)> {
        self.placements
            .iter()
            .find_map(|&(p, rect, fill)| (p == part).then_some((rect, fill)))
    }

    fn fill(&self, part: SliderPart) -> Color {
        self.placement(part).map_or(Color::NONE, |(_, fill)| fill)
    }

    /// `node` positioned where `part` goes.
    fn node(&self, part: SliderPart, mut node: Node) -> Node {
        if let Some((rect, _)) = self.placement(part) {
            place(&mut node, rect);
        }
        node
    }

    fn label(&self, thumb: Thumb) -> Option<&str> {
        self.labels
            .iter()
            .find_map(|(t, text)| (*t == thumb).then_some(text.as_str()))
    }
}

impl DrawHook for UiNodeRenderer {
    fn draw(&mut self, frame: &RenderFrame, style: &RangeSliderStyle) {
        self.placements.clear();
        self.labels.clear();
        self.placements
            .push((SliderPart::Track, frame.track, style.track_color));
        self.placements
            .push((SliderPart::Highlight, frame.highlight, style.highlight_color));
        for (i, &center) in frame.ticks.iter().enumerate() {
            self.placements
                .push((SliderPart::Tick(i), frame.tick_rect(center), style.tick_color));
        }
        for thumb in frame.thumbs() {
            self.placements
                .push((SliderPart::Thumb(thumb.thumb), thumb.rect, style.thumb_color));
            self.placements.push((
                SliderPart::Label(thumb.thumb),
                frame.label_rect(thumb.thumb, style.font_size),
                style.label_badge_color(),
            ));
            self.labels.push((thumb.thumb, thumb.label.clone()));
        }
    }
}

fn place(node: &mut Node, rect: Rect) {
    node.left = Px(rect.min.x);
    node.top = Px(rect.min.y);
    node.width = Px(rect.width());
    node.height = Px(rect.height());
}

/// System: lay out the visual children from the slider's current frame.
///
/// Fills, text color and font are re-applied only when the style changed.
pub fn sync_range_slider_parts(
    q_slider: Query<
        (&RangeSlider, Ref<RangeSliderStyle>, &Children),
        Or<(Changed<RangeSlider>, Changed<RangeSliderStyle>)>,
    >,
    mut q_part: Query<(
        &SliderPart,
        &mut Node,
        Option<&mut BackgroundColor>,
        Has<ImageNode>,
        Option<&Children>,
    )>,
    mut q_text: Query<(&mut Text, &mut TextColor, &mut TextFont)>,
) {
    let mut renderer = UiNodeRenderer::default();
    for (slider, style, children) in &q_slider {
        let restyle = style.is_changed();
        renderer.draw(&slider.frame(&style), &style);

        for child in children.iter() {
            let Ok((part, mut node, background, has_image, part_children)) = q_part.get_mut(child)
            else {
                continue;
            };
            let Some((rect, fill)) = renderer.placement(*part) else {
                continue;
            };
            place(&mut node, rect);
            if restyle
                && !has_image
                && let Some(mut background) = background
            {
                background.0 = fill;
            }

            let SliderPart::Label(thumb) = *part else {
                continue;
            };
            let Some(label) = renderer.label(thumb) else {
                continue;
            };
            for text_entity in part_children.into_iter().flat_map(|c| c.iter()) {
                if let Ok((mut text, mut color, mut font)) = q_text.get_mut(text_entity) {
                    text.0 = label.to_string();
                    if restyle {
                        color.0 = style.text_color;
                        *font = style.text_font();
                    }
                }
            }
        }
    }
}

/// System sets for ordering range slider systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeSliderSet {
    /// Push layout and image sizes into the models.
    Geometry,
    /// Reposition visual children.
    Render,
}

/// Plugin that adds the range slider observers and sync systems.
pub struct RangeSliderPlugin;

impl Plugin for RangeSliderPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (RangeSliderSet::Geometry, RangeSliderSet::Render).chain(),
        )
        // Gesture handling
        .add_observer(range_slider_on_press)
        .add_observer(range_slider_on_drag)
        .add_observer(range_slider_on_release)
        .add_observer(range_slider_on_drag_end)
        .add_observer(range_slider_on_cancel)
        // Layout
        .add_systems(
            Update,
            (
                (sync_range_slider_geometry, sync_thumb_image_size)
                    .in_set(RangeSliderSet::Geometry),
                sync_range_slider_parts.in_set(RangeSliderSet::Render),
            ),
        );
    }
}
