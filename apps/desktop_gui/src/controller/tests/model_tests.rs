use super::{AppModel, AuthMode, Screen, UiAction};
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{NoticeKind, UiEvent};
use client_core::LoadState;
use shared::{
    domain::{FeedbackItem, PartitionKey},
    view::SortOrder,
};

fn items(values: &[&str]) -> Vec<FeedbackItem> {
    values
        .iter()
        .map(|value| FeedbackItem::parse(value).expect("item"))
        .collect()
}

fn signed_in(email: &str) -> (AppModel, PartitionKey) {
    let mut model = AppModel::new(5);
    model.login.email = email.to_string();
    model.login.password = "password".to_string();
    let cmd = model.apply(UiAction::SubmitCredentials);
    let partition = match cmd {
        Some(BackendCommand::Load { partition }) => partition,
        other => panic!("expected load command, got {other:?}"),
    };
    (model, partition)
}

fn ready(email: &str, stored: &[&str]) -> AppModel {
    let (mut model, partition) = signed_in(email);
    model.handle_event(UiEvent::Loaded {
        partition,
        items: items(stored),
    });
    model
}

#[test]
fn sign_in_moves_to_loading_feedback_screen() {
    let (model, partition) = signed_in("Alice@Example.com");
    assert_eq!(model.screen(), Screen::Feedback);
    assert_eq!(model.load_state(), LoadState::Loading);
    assert_eq!(partition.as_str(), "feedback:alice@example.com");
    assert!(model.login.password.is_empty());
}

#[test]
fn rejected_sign_in_shows_notice_and_stays_on_login() {
    let mut model = AppModel::new(5);
    model.login.email = "a@b.co".to_string();
    model.login.password = "abc".to_string();
    assert!(model.apply(UiAction::SubmitCredentials).is_none());
    assert_eq!(model.screen(), Screen::Login);
    let notice = model.notice().expect("notice");
    assert_eq!(notice.kind(), NoticeKind::Warning);
    assert_eq!(notice.title(), "Login failed");
}

#[test]
fn sign_up_greets_by_name() {
    let mut model = AppModel::new(5);
    model.apply(UiAction::ToggleAuthMode);
    assert_eq!(model.login.mode, AuthMode::SignUp);
    model.login.name = "Ada".to_string();
    model.login.email = "ada@example.com".to_string();
    model.login.password = "secret1".to_string();
    model.login.confirm_password = "secret1".to_string();

    assert!(matches!(
        model.apply(UiAction::SubmitCredentials),
        Some(BackendCommand::Load { .. })
    ));
    let notice = model.notice().expect("notice");
    assert_eq!(notice.kind(), NoticeKind::Success);
    assert_eq!(notice.message(), "Account created for Ada.");
    assert_eq!(model.identity().map(|identity| identity.label()), Some("Ada"));
}

#[test]
fn load_result_replaces_board_and_marks_ready() {
    let model = ready("a@b.co", &["one", "two"]);
    assert_eq!(model.load_state(), LoadState::Ready);
    assert_eq!(model.board().len(), 2);
}

#[test]
fn stale_load_for_previous_partition_is_ignored() {
    let (mut model, first) = signed_in("first@example.com");
    model.apply(UiAction::SignOut);
    let (mut model, second) = {
        model.login.email = "second@example.com".to_string();
        model.login.password = "password".to_string();
        let cmd = model.apply(UiAction::SubmitCredentials);
        match cmd {
            Some(BackendCommand::Load { partition }) => (model, partition),
            other => panic!("expected load command, got {other:?}"),
        }
    };

    model.handle_event(UiEvent::Loaded {
        partition: first,
        items: items(&["not mine"]),
    });
    assert_eq!(model.load_state(), LoadState::Loading);
    assert!(model.board().is_empty());

    model.handle_event(UiEvent::Loaded {
        partition: second,
        items: items(&["mine"]),
    });
    assert_eq!(model.board().items(), items(&["mine"]).as_slice());
}

#[test]
fn submit_before_load_is_rejected() {
    let (mut model, _) = signed_in("a@b.co");
    model.draft = "early".to_string();
    assert!(model.apply(UiAction::SubmitFeedback).is_none());
    assert_eq!(model.notice().map(|notice| notice.title()), Some("Please wait"));
    assert_eq!(model.draft, "early");
}

#[test]
fn submit_saves_whole_collection_and_clears_draft() {
    let mut model = ready("a@b.co", &["first"]);
    model.draft = "  second  ".to_string();
    match model.apply(UiAction::SubmitFeedback) {
        Some(BackendCommand::Save { partition, items: saved }) => {
            assert_eq!(partition.as_str(), "feedback:a@b.co");
            assert_eq!(saved, items(&["first", "second"]));
        }
        other => panic!("expected save command, got {other:?}"),
    }
    assert!(model.draft.is_empty());
    assert_eq!(
        model.notice().map(|notice| notice.message()),
        Some("Feedback submitted successfully!")
    );
}

#[test]
fn blank_submit_keeps_draft_and_warns() {
    let mut model = ready("a@b.co", &[]);
    model.draft = "   ".to_string();
    assert!(model.apply(UiAction::SubmitFeedback).is_none());
    assert_eq!(model.draft, "   ");
    assert!(model.board().is_empty());
    let notice = model.notice().expect("notice");
    assert_eq!(notice.title(), "Empty Feedback");
    assert_eq!(notice.message(), "Please enter your feedback before submitting.");

    model.apply(UiAction::DismissNotice);
    assert!(model.notice().is_none());
}

#[test]
fn filter_sort_and_paging_drive_the_rendered_page() {
    let mut model = ready("a@b.co", &["a1", "a2", "a3", "a4", "a5", "a6", "b"]);
    model.apply(UiAction::NextPage);
    assert_eq!(model.page().page, 2);

    model.apply(UiAction::FilterEdited("a".to_string()));
    let page = model.page();
    assert_eq!(page.page, 1);
    assert_eq!(page.filtered_count, 6);

    model.apply(UiAction::SortSelected(SortOrder::Alphabetical));
    let first: Vec<_> = model.page().items().map(|item| item.as_str().to_string()).collect();
    assert_eq!(first, vec!["a1", "a2", "a3", "a4", "a5"]);

    model.apply(UiAction::PreviousPage);
    assert_eq!(model.page().page, 1);
}

#[test]
fn sign_out_forgets_feedback_without_backend_command() {
    let mut model = ready("a@b.co", &["kept in store"]);
    assert!(model.apply(UiAction::SignOut).is_none());
    assert_eq!(model.screen(), Screen::Login);
    assert_eq!(model.load_state(), LoadState::SignedOut);
    assert!(model.board().is_empty());
    assert!(model.identity().is_none());
}

#[test]
fn anonymous_session_uses_anonymous_partition() {
    let mut model = AppModel::new(5);
    match model.apply(UiAction::ContinueAnonymously) {
        Some(BackendCommand::Load { partition }) => assert!(partition.is_anonymous()),
        other => panic!("expected load command, got {other:?}"),
    }
}
