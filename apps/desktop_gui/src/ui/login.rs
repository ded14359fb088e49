use eframe::egui;

use super::app::FeedbackApp;
use crate::controller::model::{AuthMode, UiAction};

fn login_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
    password: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(hint)
        .password(password)
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 30.0], edit)
}

impl FeedbackApp {
    pub(crate) fn show_login_screen(&mut self, ctx: &egui::Context, blocked: bool) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.12).clamp(18.0, 90.0));

            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(320.0, 440.0));
                ui.add_enabled_ui(!blocked, |ui| {
                    let mode = self.model().login.mode;
                    ui.heading(match mode {
                        AuthMode::SignIn => "Sign in",
                        AuthMode::SignUp => "Create account",
                    });
                    ui.weak("Feedback is kept separately for every account.");
                    ui.add_space(8.0);

                    let form = &mut self.model_mut().login;
                    let mut responses = Vec::new();
                    if mode == AuthMode::SignUp {
                        responses.push(login_text_field(
                            ui,
                            "login_name",
                            "Name",
                            "Ada Lovelace",
                            &mut form.name,
                            false,
                        ));
                    }
                    responses.push(login_text_field(
                        ui,
                        "login_email",
                        "Email",
                        "you@example.com",
                        &mut form.email,
                        false,
                    ));
                    responses.push(login_text_field(
                        ui,
                        "login_password",
                        "Password",
                        "at least 6 characters",
                        &mut form.password,
                        true,
                    ));
                    if mode == AuthMode::SignUp {
                        responses.push(login_text_field(
                            ui,
                            "login_confirm_password",
                            "Confirm password",
                            "repeat password",
                            &mut form.confirm_password,
                            true,
                        ));
                    }

                    let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter_pressed && responses.iter().any(|r| r.lost_focus()) {
                        action = Some(UiAction::SubmitCredentials);
                    }

                    ui.add_space(10.0);
                    let label = match mode {
                        AuthMode::SignIn => "Sign in",
                        AuthMode::SignUp => "Sign up",
                    };
                    let button = egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(egui::vec2(ui.available_width(), 36.0));
                    if ui.add(button).clicked() {
                        action = Some(UiAction::SubmitCredentials);
                    }

                    let toggle = match mode {
                        AuthMode::SignIn => "Don't have an account? Sign up",
                        AuthMode::SignUp => "Already have an account? Sign in",
                    };
                    if ui.link(toggle).clicked() {
                        action = Some(UiAction::ToggleAuthMode);
                    }
                    if ui.link("Continue without an account").clicked() {
                        action = Some(UiAction::ContinueAnonymously);
                    }

                    if !self.status().is_empty() {
                        ui.add_space(6.0);
                        ui.small(egui::RichText::new(self.status()).weak());
                    }
                });
            });
        });

        if let Some(action) = action {
            self.act(action);
        }
    }
}
