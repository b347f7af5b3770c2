//! Demonstrates the range slider.
//!
//! Spawns two sliders, one per label style, and logs every value change.

use bevy::prelude::*;
use bevy::ui::Val::*;
use range_slider::slider::{LabelStyle, RangeSliderStyle, spawn_range_slider};
use range_slider::{RangeSliderChanged, RangeSliderPlugin, RangeSliderProps};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(RangeSliderPlugin)
        .add_systems(Startup, setup)
        .add_observer(log_range_change)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands
        .spawn(Node {
            width: Percent(100.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Px(20.0)),
            row_gap: Px(40.0),
            margin: UiRect::top(Px(100.0)),
            ..default()
        })
        .with_children(|root| {
            let sliders = [
                RangeSliderProps {
                    minimum: 0.0,
                    maximum: 100.0,
                    lower_value: 20.0,
                    upper_value: 80.0,
                    ..default()
                },
                RangeSliderProps {
                    minimum: -1.0,
                    maximum: 1.0,
                    lower_value: -0.5,
                    upper_value: 0.5,
                    style: RangeSliderStyle {
                        text_color: Color::WHITE,
                        label_style: LabelStyle::Overlay,
                        ..default()
                    },
                    ..default()
                },
            ];
            for props in sliders {
                if let Err(err) = spawn_range_slider(root, props) {
                    warn!("Skipping range slider: {err}");
                }
            }
        });
}

fn log_range_change(change: On<RangeSliderChanged>) {
    info!(
        "Range slider {:?} value changed: ({}, {})",
        change.source, change.lower, change.upper
    );
}
