//! Headless Bevy app helpers.
use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use promenade::sim_sync::{ParkPlugin, ParkSettings, ParkSyncError};
use promenade::PresentationPlugin;

/// Builds an app with the park and presentation plugins and no window.
///
/// Every `update` advances the clock by exactly `frame`. Key presses made
/// through [`press`] and [`release`] are seen by exactly one update, the way
/// Bevy's input plugin would report them.
pub fn headless_app(settings: ParkSettings, frame: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    app.insert_resource(settings);
    install_error_observer(&mut app);
    app.add_plugins((ParkPlugin, PresentationPlugin));
    app.add_systems(Last, clear_key_edges);
    app
}

fn clear_key_edges(mut input: ResMut<ButtonInput<KeyCode>>) {
    input.clear();
}

/// Starts holding `key` from the next update on.
pub fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

/// Releases `key` on the next update.
pub fn release(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Park errors captured during tests, as display strings.
#[derive(Resource, Default, Debug)]
pub struct CapturedErrors(pub Vec<String>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<ParkSyncError>, mut errors: ResMut<CapturedErrors>) {
    errors.0.push(event.event().to_string());
}

/// Installs the error-capturing observer and resource on the provided app.
pub fn install_error_observer(app: &mut App) {
    app.insert_resource(CapturedErrors::default());
    app.world_mut().add_observer(record_error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_records_triggered_error() {
        let mut app = App::new();
        install_error_observer(&mut app);
        app.world_mut().trigger(ParkSyncError {
            detail: "probe".to_owned(),
        });
        assert_eq!(app.world().resource::<CapturedErrors>().0.len(), 1);
    }
}
