//! UI plugin - sidebar with the start button, score, session message and an
//! on-screen direction pad.

use bevy::prelude::*;

use crate::game::{
    BUTTON_COLOR, BUTTON_DISABLED_COLOR, BUTTON_HOVER_COLOR, ControlButton, Direction, Flash,
    GameConfig, GridLayout, MESSAGE_COLOR, MessageText, SIDEBAR_COLOR, ScoreText, Sidebar,
    StartButton, StartRequested, SteerRequested,
};
use crate::session::Session;

/// Plugin for the sidebar and its input wiring.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StartRequested>()
            .add_message::<SteerRequested>()
            .add_systems(Startup, setup_sidebar)
            .add_systems(
                Update,
                (
                    keyboard_start,
                    start_button_press,
                    control_button_press,
                    resize_sidebar,
                    paint_buttons,
                    update_score_text,
                    update_message_text,
                )
                    .chain(),
            );
    }
}

/// Spawns the sidebar on the right of the board.
fn setup_sidebar(mut commands: Commands, layout: Res<GridLayout>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Px(layout.sidebar_width),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(20.0),
                ..default()
            },
            BackgroundColor(SIDEBAR_COLOR),
            Sidebar,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("SNAKE"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgba(0.3, 1.0, 0.3, 1.0)),
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(10.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    StartButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Start"),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });

            parent.spawn((
                Text::new("0"),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(MESSAGE_COLOR),
                MessageText,
            ));

            // Direction pad: up, then left/right, then down.
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|pad| {
                    spawn_control_button(pad, Direction::Up);
                    pad.spawn(Node {
                        column_gap: Val::Px(50.0),
                        ..default()
                    })
                    .with_children(|row| {
                        spawn_control_button(row, Direction::Left);
                        spawn_control_button(row, Direction::Right);
                    });
                    spawn_control_button(pad, Direction::Down);
                });
        });
}

fn spawn_control_button(parent: &mut ChildSpawnerCommands, direction: Direction) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(48.0),
                height: Val::Px(48.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            ControlButton(direction),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(direction.arrow()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// System to request a start from the keyboard.
fn keyboard_start(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut start_writer: MessageWriter<StartRequested>,
) {
    if keyboard_input.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        start_writer.write(StartRequested);
    }
}

fn start_button_press(
    buttons: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    session: Res<Session>,
    mut start_writer: MessageWriter<StartRequested>,
) {
    // The button is disabled while a session runs.
    if session.is_running() {
        return;
    }
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        start_writer.write(StartRequested);
    }
}

fn control_button_press(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut steer_writer: MessageWriter<SteerRequested>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            steer_writer.write(SteerRequested(button.0));
        }
    }
}

/// System to keep the sidebar as wide as the space the board leaves.
fn resize_sidebar(layout: Res<GridLayout>, mut sidebars: Query<&mut Node, With<Sidebar>>) {
    if !layout.is_changed() {
        return;
    }
    for mut node in sidebars.iter_mut() {
        node.width = Val::Px(layout.sidebar_width);
    }
}

fn paint_buttons(
    session: Res<Session>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor, Has<StartButton>), With<Button>>,
) {
    for (interaction, mut color, is_start) in buttons.iter_mut() {
        let next = if is_start && session.is_running() {
            BUTTON_DISABLED_COLOR
        } else if *interaction == Interaction::None {
            BUTTON_COLOR
        } else {
            BUTTON_HOVER_COLOR
        };
        if color.0 != next {
            color.0 = next;
        }
    }
}

/// System to update the score display.
fn update_score_text(session: Res<Session>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = query.single_mut() {
        *text = Text::from(session.score.to_string());
    }
}

/// System to show the session message, blinking while the flash runs.
fn update_message_text(
    session: Res<Session>,
    flash: Res<Flash>,
    config: Res<GameConfig>,
    mut query: Query<(&mut Text, &mut TextColor), With<MessageText>>,
) {
    let Ok((mut text, mut color)) = query.single_mut() else {
        return;
    };
    if text.0 != session.message {
        *text = Text::from(session.message.clone());
    }
    let alpha = if flash.is_active() && !flash.is_lit(config.flash_blink) {
        0.2
    } else {
        1.0
    };
    color.0 = MESSAGE_COLOR.with_alpha(alpha);
}
