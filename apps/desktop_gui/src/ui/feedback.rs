use client_core::LoadState;
use eframe::egui;
use shared::view::{PageView, SortOrder};

use super::app::FeedbackApp;
use crate::controller::model::UiAction;

impl FeedbackApp {
    pub(crate) fn show_feedback_screen(&mut self, ctx: &egui::Context, blocked: bool) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("feedback_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Feedback");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add_enabled(!blocked, egui::Button::new("Sign out")).clicked() {
                        actions.push(UiAction::SignOut);
                    }
                    let who = self
                        .model()
                        .identity()
                        .map(|identity| identity.label().to_string())
                        .unwrap_or_else(|| "Anonymous".to_string());
                    ui.weak(who);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                if self.model().load_state() != LoadState::Ready {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading feedback...");
                    });
                    return;
                }

                self.show_composer(ui, &mut actions);
                ui.separator();
                let view = self.model().board().view();
                show_controls(ui, view.filter(), view.sort(), &mut actions);
                ui.add_space(6.0);
                show_page(ui, &self.model().page(), view.filter(), &mut actions);
            });
        });

        for action in actions {
            self.act(action);
        }
    }

    fn show_composer(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let draft = &mut self.model_mut().draft;
        let response = ui.add(
            egui::TextEdit::multiline(draft)
                .id_salt("feedback_draft")
                .hint_text("Write your feedback here")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        let ctrl_enter = response.has_focus()
            && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            if ui.button("Submit").clicked() || ctrl_enter {
                actions.push(UiAction::SubmitFeedback);
            }
            ui.weak("Ctrl+Enter to submit");
        });
    }
}

fn show_controls(ui: &mut egui::Ui, filter: &str, sort: SortOrder, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label("Filter");
        let mut filter_buf = filter.to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut filter_buf)
                .id_salt("feedback_filter")
                .hint_text("Search feedback")
                .desired_width(220.0),
        );
        if response.changed() {
            actions.push(UiAction::FilterEdited(filter_buf));
        }

        ui.label("Sort");
        let mut selected = sort;
        egui::ComboBox::from_id_salt("feedback_sort")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for order in SortOrder::ALL {
                    ui.selectable_value(&mut selected, order, order.label());
                }
            });
        if selected != sort {
            actions.push(UiAction::SortSelected(selected));
        }
    });
}

fn show_page(ui: &mut egui::Ui, page: &PageView, filter: &str, actions: &mut Vec<UiAction>) {
    if page.is_collection_empty() {
        ui.weak("No feedback submitted yet");
        return;
    }
    if page.is_empty() {
        ui.weak(format!("No feedback matches '{filter}'"));
        return;
    }

    let list_height = (ui.available_height() - 40.0).max(80.0);
    egui::ScrollArea::vertical()
        .max_height(list_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for entry in &page.entries {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(format!("#{}", entry.position)).strong());
                        ui.label(entry.item.as_str());
                    });
                });
            }
        });

    if page.show_pagination() {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(page.has_previous(), egui::Button::new("Previous"))
                .clicked()
            {
                actions.push(UiAction::PreviousPage);
            }
            ui.label(format!("Page {} of {}", page.page, page.total_pages));
            if ui
                .add_enabled(page.has_next(), egui::Button::new("Next"))
                .clicked()
            {
                actions.push(UiAction::NextPage);
            }
        });
    }
}
