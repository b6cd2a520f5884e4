//! On-screen controls legend.
//!
//! A translucent panel in the bottom-left corner lists the key bindings.
//! Pressing [`LEGEND_TOGGLE_KEY`] hides or shows it.

use bevy::prelude::*;

use crate::input::CONTROLS_LEGEND;

/// Key that shows or hides the legend.
pub const LEGEND_TOGGLE_KEY: KeyCode = KeyCode::KeyH;

/// Root node of the legend panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControlsLegend;

/// Spawns the legend panel, visible.
pub fn spawn_legend_system(mut commands: Commands) {
    let title = TextFont::from_font_size(14.0);
    let row = TextFont::from_font_size(13.0);
    let hint = TextFont::from_font_size(11.0);

    commands
        .spawn((
            Name::new("ControlsLegend"),
            ControlsLegend,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Px(24.0),
                padding: UiRect::axes(Val::Px(22.0), Val::Px(18.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                min_width: Val::Px(200.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.04, 0.04, 0.12, 0.7)),
            Visibility::Visible,
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Controls  [H]"),
                title,
                TextColor(Color::WHITE),
            ));
            for (label, _, description) in CONTROLS_LEGEND {
                panel.spawn((
                    Text::new(format!("{label:<6} {description}")),
                    row.clone(),
                    TextColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
                ));
            }
            panel.spawn((
                Text::new("Shift + WASD to run, W+A or W+D for diagonals"),
                hint,
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.4)),
            ));
        });
}

/// Flips the legend between visible and hidden on [`LEGEND_TOGGLE_KEY`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn toggle_legend_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut legends: Query<&mut Visibility, With<ControlsLegend>>,
) {
    if !keys.just_pressed(LEGEND_TOGGLE_KEY) {
        return;
    }
    for mut visibility in &mut legends {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            Visibility::Visible | Visibility::Inherited => Visibility::Hidden,
        };
    }
}
