//! UI state for the desktop GUI and the transitions driven by user actions and backend events.

use client_core::{sign_in, sign_up, FeedbackBoard, LoadState, SignUpRequest};
use shared::{
    domain::{PartitionKey, UserIdentity},
    error::FeedbackError,
    view::{PageView, SortOrder},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{Notice, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl LoginForm {
    fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ToggleAuthMode,
    SubmitCredentials,
    ContinueAnonymously,
    SignOut,
    SubmitFeedback,
    FilterEdited(String),
    SortSelected(SortOrder),
    NextPage,
    PreviousPage,
    DismissNotice,
}

pub struct AppModel {
    screen: Screen,
    pub login: LoginForm,
    pub draft: String,
    identity: Option<UserIdentity>,
    partition: PartitionKey,
    board: FeedbackBoard,
    load_state: LoadState,
    notice: Option<Notice>,
}

impl AppModel {
    pub fn new(page_size: usize) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginForm::default(),
            draft: String::new(),
            identity: None,
            partition: PartitionKey::anonymous(),
            board: FeedbackBoard::new(page_size),
            load_state: LoadState::SignedOut,
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn board(&self) -> &FeedbackBoard {
        &self.board
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn page(&self) -> PageView {
        self.board.render()
    }

    /// Applies a user action; the returned command, if any, must reach the backend worker.
    pub fn apply(&mut self, action: UiAction) -> Option<BackendCommand> {
        match action {
            UiAction::ToggleAuthMode => {
                self.login.mode = match self.login.mode {
                    AuthMode::SignIn => AuthMode::SignUp,
                    AuthMode::SignUp => AuthMode::SignIn,
                };
                self.login.clear_secrets();
                None
            }
            UiAction::SubmitCredentials => self.submit_credentials(),
            UiAction::ContinueAnonymously => Some(self.open(None)),
            UiAction::SignOut => {
                tracing::info!(partition = %self.partition, "signed out");
                self.identity = None;
                self.partition = PartitionKey::anonymous();
                self.board.clear();
                self.draft.clear();
                self.load_state = LoadState::SignedOut;
                self.screen = Screen::Login;
                self.login.clear_secrets();
                None
            }
            UiAction::SubmitFeedback => self.submit_feedback(),
            UiAction::FilterEdited(filter) => {
                self.board.set_filter(filter);
                None
            }
            UiAction::SortSelected(sort) => {
                self.board.set_sort(sort);
                None
            }
            UiAction::NextPage => {
                self.board.next_page();
                None
            }
            UiAction::PreviousPage => {
                self.board.previous_page();
                None
            }
            UiAction::DismissNotice => {
                self.notice = None;
                None
            }
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Loaded { partition, items } => {
                if partition != self.partition || self.load_state != LoadState::Loading {
                    tracing::debug!(%partition, current = %self.partition, "ignoring stale load");
                    return;
                }
                tracing::info!(%partition, count = items.len(), "feedback loaded");
                self.board.replace_items(items);
                self.load_state = LoadState::Ready;
            }
        }
    }

    fn submit_credentials(&mut self) -> Option<BackendCommand> {
        let result = match self.login.mode {
            AuthMode::SignIn => sign_in(&self.login.email, &self.login.password),
            AuthMode::SignUp => sign_up(&SignUpRequest {
                name: self.login.name.clone(),
                email: self.login.email.clone(),
                password: self.login.password.clone(),
                confirm_password: self.login.confirm_password.clone(),
            }),
        };

        match result {
            Ok(identity) => {
                if self.login.mode == AuthMode::SignUp {
                    self.notice = Some(Notice::success(
                        "Welcome!",
                        format!("Account created for {}.", identity.label()),
                    ));
                }
                self.login = LoginForm {
                    mode: self.login.mode,
                    ..LoginForm::default()
                };
                Some(self.open(Some(identity)))
            }
            Err(err) => {
                tracing::debug!(kind = ?err.kind, "authentication rejected");
                self.login.clear_secrets();
                self.notice = Some(Notice::from_error(&FeedbackError::Auth(err)));
                None
            }
        }
    }

    fn open(&mut self, identity: Option<UserIdentity>) -> BackendCommand {
        self.partition = PartitionKey::for_identity(identity.as_ref());
        self.identity = identity;
        self.board.clear();
        self.draft.clear();
        self.load_state = LoadState::Loading;
        self.screen = Screen::Feedback;
        tracing::info!(partition = %self.partition, "loading feedback");
        BackendCommand::Load {
            partition: self.partition.clone(),
        }
    }

    fn submit_feedback(&mut self) -> Option<BackendCommand> {
        if self.load_state != LoadState::Ready {
            self.notice = Some(Notice::from_error(&FeedbackError::NotReady));
            return None;
        }

        match self.board.submit(&self.draft) {
            Ok(_) => {
                self.draft.clear();
                self.notice = Some(Notice::success(
                    "Feedback Submitted",
                    "Feedback submitted successfully!",
                ));
                Some(BackendCommand::Save {
                    partition: self.partition.clone(),
                    items: self.board.items().to_vec(),
                })
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err));
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
