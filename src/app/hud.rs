//! Menu, game over screen and in-game distance display

use egui::{Align2, Color32, RichText, Vec2};

use crate::sim::{FrameSnapshot, GameState, MenuAction};

const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
const BUTTON_SPACING: f32 = 50.0;

/// Button label for an action; the sound toggle shows the current setting
pub fn action_label(action: MenuAction, sound_enabled: bool) -> String {
    match action {
        MenuAction::StartGame => "Start".to_string(),
        MenuAction::ToggleSound if sound_enabled => "Sound: On".to_string(),
        MenuAction::ToggleSound => "Sound: Off".to_string(),
        MenuAction::ReturnToMenu => "Menu".to_string(),
        MenuAction::Exit => "Exit".to_string(),
    }
}

/// Buttons shown for a game state, top to bottom
pub fn actions_for(state: GameState) -> &'static [MenuAction] {
    match state {
        GameState::Menu => &[
            MenuAction::StartGame,
            MenuAction::ToggleSound,
            MenuAction::Exit,
        ],
        GameState::GameOver => &[MenuAction::ReturnToMenu, MenuAction::Exit],
        GameState::Playing => &[],
    }
}

/// Text of the distance readout
pub fn distance_text(snapshot: &FrameSnapshot) -> String {
    format!("Distance: {}", snapshot.distance())
}

/// Draws the UI for the current state and returns the action clicked, if any
pub fn render(ctx: &egui::Context, snapshot: &FrameSnapshot) -> Option<MenuAction> {
    match snapshot.state {
        GameState::Playing => {
            egui::Area::new(egui::Id::new("hud_distance"))
                .anchor(Align2::LEFT_TOP, [10.0, 10.0])
                .show(ctx, |ui| {
                    ui.label(
                        RichText::new(distance_text(snapshot))
                            .size(32.0)
                            .color(Color32::WHITE),
                    );
                });
            None
        }
        GameState::Menu => button_column(ctx, snapshot, None),
        GameState::GameOver => {
            let heading = |ui: &mut egui::Ui| {
                ui.label(
                    RichText::new("Game Over")
                        .size(64.0)
                        .color(Color32::from_rgb(255, 0, 0)),
                );
                ui.label(
                    RichText::new(distance_text(snapshot))
                        .size(32.0)
                        .color(Color32::WHITE),
                );
            };
            button_column(ctx, snapshot, Some(&heading))
        }
    }
}

fn button_column(
    ctx: &egui::Context,
    snapshot: &FrameSnapshot,
    heading: Option<&dyn Fn(&mut egui::Ui)>,
) -> Option<MenuAction> {
    let mut clicked = None;

    egui::Area::new(egui::Id::new("menu_buttons"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(heading) = heading {
                    heading(ui);
                    ui.add_space(BUTTON_SPACING / 2.0);
                }

                for &action in actions_for(snapshot.state) {
                    let label = RichText::new(action_label(action, snapshot.sound_enabled))
                        .size(28.0)
                        .color(Color32::BLACK);
                    let button = egui::Button::new(label).fill(button_color(action));
                    if ui.add_sized(BUTTON_SIZE, button).clicked() {
                        clicked = Some(action);
                    }
                    ui.add_space(BUTTON_SPACING);
                }
            });
        });

    clicked
}

fn button_color(action: MenuAction) -> Color32 {
    match action {
        MenuAction::StartGame => Color32::from_rgb(120, 200, 120),
        MenuAction::ToggleSound => Color32::from_rgb(120, 170, 230),
        MenuAction::ReturnToMenu => Color32::from_rgb(230, 200, 110),
        MenuAction::Exit => Color32::from_rgb(230, 120, 120),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameConfig, Session};

    #[test]
    fn test_menu_offers_three_actions() {
        assert_eq!(
            actions_for(GameState::Menu),
            &[
                MenuAction::StartGame,
                MenuAction::ToggleSound,
                MenuAction::Exit
            ]
        );
        assert!(actions_for(GameState::GameOver).contains(&MenuAction::Exit));
        assert!(actions_for(GameState::Playing).is_empty());
    }

    #[test]
    fn test_sound_label_tracks_state() {
        assert_eq!(action_label(MenuAction::ToggleSound, true), "Sound: On");
        assert_eq!(action_label(MenuAction::ToggleSound, false), "Sound: Off");
    }

    #[test]
    fn test_distance_text_truncates() {
        let mut session = Session::new(GameConfig::default().with_seed(1));
        session.transition_to(GameState::Playing);
        session.update(0.1, Default::default());

        // 0.1 * 1200 / 32 = 3.75
        assert_eq!(distance_text(&session.snapshot()), "Distance: 3");
    }
}
