//! Systems driving the player's survival needs.
use bevy::{ecs::system::SystemParam, prelude::*};

use crate::{
    core::plugin::SimulationClock,
    player::{
        components::Player,
        config::NeedsConfig,
        events::{
            NeedsChangedEvent, PlayerDamagedEvent, PlayerDiedEvent, PlayerStimulusEvent, Stimulus,
        },
        needs::{Damageable, NeedKind, NeedsUpdate, PlayerNeeds},
    },
};

/// Outbound messages produced by needs updates.
#[derive(SystemParam)]
pub struct NeedsOutputs<'w> {
    changed_writer: MessageWriter<'w, NeedsChangedEvent>,
    damaged_writer: MessageWriter<'w, PlayerDamagedEvent>,
    died_writer: MessageWriter<'w, PlayerDiedEvent>,
}

impl NeedsOutputs<'_> {
    fn publish(&mut self, update: NeedsUpdate, damage: Option<i32>) {
        self.changed_writer.write(NeedsChangedEvent {
            percentages: update.percentages,
        });

        if update.damaged {
            self.damaged_writer.write(PlayerDamagedEvent {
                amount: damage.unwrap_or_default(),
                health: update.percentages.health,
            });
        }

        if update.died {
            info!("Player is dead");
            self.died_writer.write(PlayerDiedEvent);
        }
    }
}

/// Spawns the player with initialised needs and publishes the starting bar values.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<NeedsConfig>,
    mut changed_writer: MessageWriter<NeedsChangedEvent>,
) {
    let mut needs = PlayerNeeds::new(&config);
    if let Some(warning) = needs.initialize() {
        warn!("{}", warning);
    }
    info!(
        "Player spawned: health {:.0}, hunger {:.0}, thirst {:.0}, sleep {:.0}",
        needs.need(NeedKind::Health).current(),
        needs.need(NeedKind::Hunger).current(),
        needs.need(NeedKind::Thirst).current(),
        needs.need(NeedKind::Sleep).current()
    );

    changed_writer.write(NeedsChangedEvent {
        percentages: needs.percentages(),
    });
    commands.spawn((Player, needs, Name::new("Player")));
}

/// Applies queued stimuli (food, water, healing, sleep, damage) to the player.
pub fn apply_player_stimuli(
    mut stimuli: MessageReader<PlayerStimulusEvent>,
    mut query: Query<&mut PlayerNeeds, With<Player>>,
    mut outputs: NeedsOutputs,
) {
    let Ok(mut needs) = query.single_mut() else {
        // Drain so stale stimuli are not applied to a player spawned later.
        stimuli.clear();
        return;
    };

    for event in stimuli.read() {
        let (update, damage) = match event.stimulus {
            Stimulus::Heal(amount) => (needs.heal(amount), None),
            Stimulus::Eat(amount) => (needs.eat(amount), None),
            Stimulus::Drink(amount) => (needs.drink(amount), None),
            Stimulus::Sleep(amount) => (needs.sleep_for(amount), None),
            Stimulus::Damage(amount) => (needs.take_physical_damage(amount), Some(amount)),
        };

        match update {
            Some(update) => {
                debug!("Applied {:?} to player", event.stimulus);
                outputs.publish(update, damage);
            }
            None => debug!("Ignored {:?}: player is dead", event.stimulus),
        }
    }
}

/// Advances needs decay using the scaled simulation delta.
pub fn tick_player_needs(
    clock: Res<SimulationClock>,
    mut query: Query<&mut PlayerNeeds, With<Player>>,
    mut outputs: NeedsOutputs,
) {
    let delta = clock.delta_seconds();
    for mut needs in query.iter_mut() {
        if let Some(update) = needs.tick(delta) {
            outputs.publish(update, None);
        }
    }
}

/// Number-row hotkeys for exercising the needs loop by hand.
pub fn handle_debug_stimulus_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<NeedsConfig>,
    mut writer: MessageWriter<PlayerStimulusEvent>,
) {
    let amounts = &config.debug_keys;
    let bindings = [
        (KeyCode::Digit1, Stimulus::Eat(amounts.eat)),
        (KeyCode::Digit2, Stimulus::Drink(amounts.drink)),
        (KeyCode::Digit3, Stimulus::Heal(amounts.heal)),
        (KeyCode::Digit4, Stimulus::Sleep(amounts.rest)),
        (KeyCode::Digit5, Stimulus::Damage(amounts.damage)),
    ];

    for (key, stimulus) in bindings {
        if keyboard.just_pressed(key) {
            writer.write(PlayerStimulusEvent::new(stimulus));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::player::config::NeedConfig;

    #[derive(Resource, Default)]
    struct Recorded {
        changed: usize,
        damaged: Vec<i32>,
        died: usize,
    }

    fn record_messages(
        mut changed: MessageReader<NeedsChangedEvent>,
        mut damaged: MessageReader<PlayerDamagedEvent>,
        mut died: MessageReader<PlayerDiedEvent>,
        mut recorded: ResMut<Recorded>,
    ) {
        recorded.changed += changed.read().count();
        recorded
            .damaged
            .extend(damaged.read().map(|event| event.amount));
        recorded.died += died.read().count();
    }

    fn test_config() -> NeedsConfig {
        NeedsConfig {
            health: NeedConfig {
                max_value: 100.0,
                start_value: 5.0,
                regen_rate: 0.0,
                decay_rate: 0.0,
            },
            hunger: NeedConfig {
                max_value: 100.0,
                start_value: 0.0,
                regen_rate: 0.0,
                decay_rate: 10.0,
            },
            ..NeedsConfig::default()
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(test_config())
            .insert_resource(SimulationClock::default())
            .init_resource::<Recorded>()
            .add_message::<PlayerStimulusEvent>()
            .add_message::<NeedsChangedEvent>()
            .add_message::<PlayerDamagedEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    apply_player_stimuli,
                    tick_player_needs.after(apply_player_stimuli),
                    record_messages.after(tick_player_needs),
                ),
            );
        app
    }

    fn player_needs(app: &mut App) -> PlayerNeeds {
        let mut query = app.world_mut().query::<&PlayerNeeds>();
        query
            .single(app.world())
            .expect("player should exist")
            .clone()
    }

    #[test]
    fn spawn_initialises_needs() {
        let mut app = test_app();
        app.update();

        let needs = player_needs(&mut app);
        assert_eq!(needs.need(NeedKind::Health).current(), 5.0);
        assert_eq!(needs.need(NeedKind::Hunger).current(), 100.0);
        assert!(app.world().resource::<Recorded>().changed >= 1);
    }

    #[test]
    fn tick_uses_scaled_clock_delta() {
        let mut app = test_app();
        app.update();

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(1));
        app.update();

        let needs = player_needs(&mut app);
        assert!((needs.need(NeedKind::Hunger).current() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn damage_stimulus_kills_once() {
        let mut app = test_app();
        app.update();

        app.world_mut()
            .write_message(PlayerStimulusEvent::new(Stimulus::Damage(10)));
        app.update();

        {
            let recorded = app.world().resource::<Recorded>();
            assert_eq!(recorded.damaged, vec![10]);
            assert_eq!(recorded.died, 1);
        }
        let needs = player_needs(&mut app);
        assert!(needs.is_dead());
        assert_eq!(needs.need(NeedKind::Health).current(), 0.0);

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(1));
        app.world_mut()
            .write_message(PlayerStimulusEvent::new(Stimulus::Damage(10)));
        app.update();

        let recorded = app.world().resource::<Recorded>();
        assert_eq!(recorded.damaged, vec![10]);
        assert_eq!(recorded.died, 1);
    }

    #[test]
    fn food_stimulus_refills_hunger() {
        let mut app = test_app();
        app.update();

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(5));
        app.update();
        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::ZERO);
        app.world_mut()
            .write_message(PlayerStimulusEvent::new(Stimulus::Eat(30.0)));
        app.update();

        let needs = player_needs(&mut app);
        assert!((needs.need(NeedKind::Hunger).current() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn debug_keys_write_stimuli() {
        let mut app = App::new();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Digit2);
        keyboard.press(KeyCode::Digit5);

        #[derive(Resource, Default)]
        struct Seen(Vec<Stimulus>);

        fn collect(mut reader: MessageReader<PlayerStimulusEvent>, mut seen: ResMut<Seen>) {
            seen.0.extend(reader.read().map(|event| event.stimulus));
        }

        app.insert_resource(keyboard)
            .insert_resource(NeedsConfig::default())
            .init_resource::<Seen>()
            .add_message::<PlayerStimulusEvent>()
            .add_systems(Update, (handle_debug_stimulus_keys, collect).chain());
        app.update();

        let seen = &app.world().resource::<Seen>().0;
        assert_eq!(seen, &vec![Stimulus::Drink(25.0), Stimulus::Damage(10)]);
    }
}
