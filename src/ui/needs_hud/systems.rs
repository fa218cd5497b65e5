// src/ui/needs_hud/systems.rs
//
// Systems for spawning and refreshing the needs HUD.

use bevy::prelude::*;

use crate::player::{
    events::{NeedsChangedEvent, PlayerDamagedEvent, PlayerDiedEvent},
    needs::NeedKind,
};
use crate::world::time::DayNightClock;

use super::components::{
    bar_color, ClockLabel, DamageFlash, DeathBanner, NeedBarFill, NeedsHudSettings,
};

const PANEL_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.8);
const TRACK_COLOR: Color = Color::srgba(0.2, 0.2, 0.22, 0.9);
const TEXT_COLOR: Color = Color::WHITE;
const FLASH_COLOR: Color = Color::srgb(0.8, 0.05, 0.05);
const DEATH_TEXT_COLOR: Color = Color::srgb(0.9, 0.15, 0.15);

/// Spawns the bar panel, the damage overlay, and the hidden death banner.
pub fn spawn_needs_hud(mut commands: Commands, settings: Res<NeedsHudSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(settings.margin),
                left: Val::Px(settings.margin),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Name::new("Needs HUD"),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.label_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                ClockLabel,
            ));

            for kind in NeedKind::ALL {
                panel.spawn((
                    Text::new(kind.label()),
                    TextFont {
                        font_size: settings.label_font_size,
                        ..default()
                    },
                    TextColor(TEXT_COLOR),
                ));

                panel
                    .spawn((
                        Node {
                            width: Val::Px(settings.bar_width),
                            height: Val::Px(settings.bar_height),
                            ..default()
                        },
                        BackgroundColor(TRACK_COLOR),
                    ))
                    .with_children(|track| {
                        track.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(bar_color(kind)),
                            NeedBarFill { kind },
                        ));
                    });
            }
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(FLASH_COLOR.with_alpha(0.0)),
        DamageFlash::new(settings.flash_seconds),
        Name::new("Damage Flash"),
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            DeathBanner,
            Name::new("Death Banner"),
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new("You died"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(DEATH_TEXT_COLOR),
            ));
        });
}

/// Resizes each bar fill to the latest percentage.
pub fn update_need_bars(
    mut events: MessageReader<NeedsChangedEvent>,
    mut bars: Query<(&NeedBarFill, &mut Node)>,
) {
    let Some(latest) = events.read().last() else {
        return;
    };

    for (bar, mut node) in bars.iter_mut() {
        let fraction = latest.percentages.get(bar.kind).clamp(0.0, 1.0);
        node.width = Val::Percent(fraction * 100.0);
    }
}

/// Restarts the red overlay whenever the player is hurt.
pub fn trigger_damage_flash(
    mut events: MessageReader<PlayerDamagedEvent>,
    mut flashes: Query<&mut DamageFlash>,
) {
    let Some(hit) = events.read().last() else {
        return;
    };
    debug!(
        "Player took {} damage ({:.0}% health left)",
        hit.amount,
        hit.health * 100.0
    );

    for mut flash in flashes.iter_mut() {
        flash.trigger();
    }
}

/// Fades the damage overlay out in real time.
pub fn fade_damage_flash(
    time: Res<Time>,
    settings: Res<NeedsHudSettings>,
    mut flashes: Query<(&mut DamageFlash, &mut BackgroundColor)>,
) {
    for (mut flash, mut background) in flashes.iter_mut() {
        flash.tick(time.delta());
        background.0 = FLASH_COLOR.with_alpha(flash.alpha() * settings.flash_max_alpha);
    }
}

/// Reveals the death banner.
pub fn show_death_banner(
    mut events: MessageReader<PlayerDiedEvent>,
    mut banners: Query<&mut Visibility, With<DeathBanner>>,
) {
    if events.read().next().is_none() {
        return;
    }
    for mut visibility in banners.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

/// Writes the current day and clock time into the HUD label.
pub fn update_clock_label(
    clock: Res<DayNightClock>,
    mut labels: Query<&mut Text, With<ClockLabel>>,
) {
    let label = format_clock(clock.day_count(), clock.time_of_day());
    for mut text in labels.iter_mut() {
        if text.0 != label {
            text.0.clone_from(&label);
        }
    }
}

/// Formats a day fraction as `Day N  HH:MM` on a 24-hour clock.
pub fn format_clock(day_count: u64, time_of_day: f32) -> String {
    let minutes = (time_of_day.clamp(0.0, 1.0) * 24.0 * 60.0).floor() as u32 % (24 * 60);
    format!(
        "Day {}  {:02}:{:02}",
        day_count + 1,
        minutes / 60,
        minutes % 60
    )
}
