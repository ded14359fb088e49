use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{NoticeKind, UiEvent},
    model::{AppModel, Screen, UiAction},
    orchestration::dispatch_backend_command,
};

pub struct FeedbackApp {
    model: AppModel,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    /// Pass in which the current notice was first drawn. Enter only dismisses
    /// it in a later pass, so the keystroke that raised it cannot close it.
    notice_opened_pass: Option<u64>,
}

impl FeedbackApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, page_size: usize) -> Self {
        Self {
            model: AppModel::new(page_size),
            cmd_tx,
            ui_rx,
            status: String::new(),
            notice_opened_pass: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.handle_event(event);
        }
    }

    pub(crate) fn act(&mut self, action: UiAction) {
        self.notice_opened_pass = None;
        if let Some(cmd) = self.model.apply(action) {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }

    pub(crate) fn model(&self) -> &AppModel {
        &self.model
    }

    pub(crate) fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.model.notice() else {
            return;
        };

        let accent = match notice.kind() {
            NoticeKind::Success => egui::Color32::from_rgb(67, 181, 129),
            NoticeKind::Warning => egui::Color32::from_rgb(240, 177, 50),
        };
        let title = notice.title().to_string();
        let message = notice.message().to_string();

        let pass = ctx.cumulative_pass_nr();
        let opened = *self.notice_opened_pass.get_or_insert(pass);
        let enter = pass > opened && ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let mut dismissed = enter;
        egui::Window::new(egui::RichText::new(&title).color(accent).strong())
            .id(egui::Id::new("notice_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.act(UiAction::DismissNotice);
        }
    }
}

impl eframe::App for FeedbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let blocked = self.model.notice().is_some();
        match self.model.screen() {
            Screen::Login => self.show_login_screen(ctx, blocked),
            Screen::Feedback => self.show_feedback_screen(ctx, blocked),
        }
        self.show_notice(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
