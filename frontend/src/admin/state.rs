use crate::error::{ChannelError, ThumbnailError};
use crate::models::{Category, Video, SENTINEL_VIDEO_ID};
use std::collections::HashMap;
use std::rc::Rc;
use yew::prelude::*;

/// Videos that appear in the management grid.
pub fn visible_videos(videos: Vec<Video>) -> Vec<Video> {
    videos
        .into_iter()
        .filter(|v| v.id != SENTINEL_VIDEO_ID)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoForm {
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub category: Category,
    pub is_live: bool,
}

/// The local file picked for upload. The file itself stays with the input
/// element; only what the view needs is kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: f64,
    pub preview_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminState {
    pub loading: bool,
    pub submitting: bool,
    pub dialog_open: bool,
    pub videos: Vec<Video>,
    pub uploaded: HashMap<i64, String>,
    pub form: VideoForm,
    pub file: Option<SelectedFile>,
    pub notices: Vec<Notice>,
    next_notice: u32,
}

pub enum FormField {
    Title(String),
    Artist(String),
    Category(Category),
    Live(bool),
}

pub enum AdminAction {
    LoadStarted,
    Loaded {
        videos: Vec<Video>,
        uploaded: HashMap<i64, String>,
    },
    LoadFailed(ChannelError),
    OpenDialog,
    CloseDialog,
    Edit(FormField),
    FileSelected(SelectedFile),
    FileRejected(ChannelError),
    /// Duration read from the file previewed at `preview_url`.
    DurationProbed {
        preview_url: String,
        duration: String,
    },
    SubmitStarted,
    SubmitSucceeded {
        id: i64,
        preview_url: String,
        thumbnail_warning: Option<ThumbnailError>,
    },
    SubmitFailed(ChannelError),
    ToggleFailed(ChannelError),
    Dismiss(u32),
}

impl AdminState {
    pub fn mounting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn notify(&mut self, kind: NoticeKind, title: &str, message: impl Into<String>) {
        self.next_notice += 1;
        self.notices.push(Notice {
            id: self.next_notice,
            kind,
            title: title.to_string(),
            message: message.into(),
        });
    }

    fn fail(&mut self, error: &ChannelError) {
        self.notify(NoticeKind::Error, "Error", error.user_message());
    }
}

impl Reducible for AdminState {
    type Action = AdminAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AdminAction::LoadStarted => next.loading = true,
            AdminAction::Loaded { videos, uploaded } => {
                next.videos = visible_videos(videos);
                next.uploaded = uploaded;
                next.loading = false;
            }
            AdminAction::LoadFailed(e) => {
                next.loading = false;
                next.notify(NoticeKind::Error, "Error", format!("Could not load videos. {}", e.user_message()));
            }
            AdminAction::OpenDialog => next.dialog_open = true,
            AdminAction::CloseDialog => next.dialog_open = false,
            AdminAction::Edit(field) => match field {
                FormField::Title(v) => next.form.title = v,
                FormField::Artist(v) => next.form.artist = v,
                FormField::Category(v) => next.form.category = v,
                FormField::Live(v) => next.form.is_live = v,
            },
            AdminAction::FileSelected(file) => {
                next.file = Some(file);
                next.form.duration.clear();
            }
            AdminAction::FileRejected(e) => next.fail(&e),
            AdminAction::DurationProbed {
                preview_url,
                duration,
            } => {
                // Durations read for a replaced or already submitted file are stale.
                if next.file.as_ref().map(|f| &f.preview_url) == Some(&preview_url) {
                    next.form.duration = duration;
                }
            }
            AdminAction::SubmitStarted => next.submitting = true,
            AdminAction::SubmitSucceeded {
                id,
                preview_url,
                thumbnail_warning,
            } => {
                next.uploaded.insert(id, preview_url);
                next.submitting = false;
                next.dialog_open = false;
                next.form = VideoForm::default();
                next.file = None;
                next.notify(NoticeKind::Success, "Done!", "The video was added to the channel");
                if let Some(w) = thumbnail_warning {
                    next.notify(
                        NoticeKind::Warning,
                        "No thumbnail",
                        format!("A placeholder image was used ({w})"),
                    );
                }
            }
            AdminAction::SubmitFailed(e) => {
                next.submitting = false;
                next.fail(&e);
            }
            AdminAction::ToggleFailed(e) => next.fail(&e),
            AdminAction::Dismiss(id) => next.notices.retain(|n| n.id != id),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: i64) -> Video {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("v{id}") })).unwrap()
    }

    fn reduce(state: AdminState, action: AdminAction) -> AdminState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn selected() -> SelectedFile {
        SelectedFile {
            name: "clip.mp4".into(),
            size: 1024.0,
            preview_url: "blob:http://localhost/clip".into(),
        }
    }

    #[test]
    fn sentinel_record_is_hidden() {
        let state = reduce(
            AdminState::mounting(),
            AdminAction::Loaded {
                videos: vec![video(1), video(SENTINEL_VIDEO_ID), video(2)],
                uploaded: HashMap::new(),
            },
        );
        let ids: Vec<i64> = state.videos.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!state.loading);
    }

    #[test]
    fn rejected_file_leaves_preview_empty() {
        let state = reduce(
            AdminState::default(),
            AdminAction::FileRejected(ChannelError::InvalidFileType("text/plain".into())),
        );
        assert!(state.file.is_none());
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, NoticeKind::Error);
        assert!(state.notices[0].message.contains("text/plain"));
    }

    #[test]
    fn probed_duration_fills_the_form() {
        let state = reduce(AdminState::default(), AdminAction::FileSelected(selected()));
        let state = reduce(
            state,
            AdminAction::DurationProbed {
                preview_url: "blob:http://localhost/clip".into(),
                duration: "2:05".into(),
            },
        );
        assert_eq!(state.form.duration, "2:05");
        assert_eq!(state.file.unwrap().name, "clip.mp4");
    }

    #[test]
    fn duration_of_replaced_file_is_ignored() {
        let first = selected();
        let second = SelectedFile {
            name: "other.mp4".into(),
            size: 2048.0,
            preview_url: "blob:http://localhost/other".into(),
        };
        let state = reduce(AdminState::default(), AdminAction::FileSelected(first.clone()));
        let state = reduce(state, AdminAction::FileSelected(second));
        let state = reduce(
            state,
            AdminAction::DurationProbed {
                preview_url: first.preview_url,
                duration: "59:59".into(),
            },
        );
        assert_eq!(state.form.duration, "");
        assert_eq!(state.file.unwrap().name, "other.mp4");
    }

    #[test]
    fn late_duration_does_not_touch_reset_form() {
        let state = reduce(AdminState::default(), AdminAction::FileSelected(selected()));
        let state = reduce(
            state,
            AdminAction::SubmitSucceeded {
                id: 7,
                preview_url: "blob:http://localhost/clip".into(),
                thumbnail_warning: None,
            },
        );
        let state = reduce(
            state,
            AdminAction::DurationProbed {
                preview_url: "blob:http://localhost/clip".into(),
                duration: "2:05".into(),
            },
        );
        assert_eq!(state.form, VideoForm::default());
    }

    #[test]
    fn success_closes_dialog_and_resets_form() {
        let mut state = reduce(AdminState::default(), AdminAction::OpenDialog);
        for field in [
            FormField::Title("Summer Vibes".into()),
            FormField::Artist("DJ Energy".into()),
            FormField::Category(Category::Electronic),
            FormField::Live(true),
        ] {
            state = reduce(state, AdminAction::Edit(field));
        }
        state = reduce(state, AdminAction::FileSelected(selected()));
        state = reduce(state, AdminAction::SubmitStarted);
        assert!(state.submitting);

        let state = reduce(
            state,
            AdminAction::SubmitSucceeded {
                id: 42,
                preview_url: "blob:http://localhost/clip".into(),
                thumbnail_warning: None,
            },
        );
        assert!(!state.dialog_open);
        assert!(!state.submitting);
        assert_eq!(state.form, VideoForm::default());
        assert_eq!(state.form.category, Category::Pop);
        assert!(state.file.is_none());
        assert_eq!(state.uploaded.get(&42).map(String::as_str), Some("blob:http://localhost/clip"));
        assert_eq!(state.notices.last().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn thumbnail_fallback_adds_warning() {
        let state = reduce(
            AdminState::default(),
            AdminAction::SubmitSucceeded {
                id: 1,
                preview_url: "blob:x".into(),
                thumbnail_warning: Some(ThumbnailError::NoDecodedFrame),
            },
        );
        let kinds: Vec<NoticeKind> = state.notices.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Success, NoticeKind::Warning]);
    }

    #[test]
    fn failure_keeps_dialog_and_form() {
        let state = reduce(AdminState::default(), AdminAction::OpenDialog);
        let state = reduce(state, AdminAction::Edit(FormField::Title("keep me".into())));
        let state = reduce(state, AdminAction::SubmitStarted);
        let state = reduce(
            state,
            AdminAction::SubmitFailed(ChannelError::Network("offline".into())),
        );
        assert!(state.dialog_open);
        assert!(!state.submitting);
        assert_eq!(state.form.title, "keep me");
        assert_eq!(state.notices[0].message, "The server could not be reached, try again");
    }

    #[test]
    fn notices_are_dismissed_by_id() {
        let state = reduce(AdminState::default(), AdminAction::FileRejected(ChannelError::FileRequired));
        let state = reduce(state, AdminAction::FileRejected(ChannelError::FileRequired));
        let first = state.notices[0].id;
        let state = reduce(state, AdminAction::Dismiss(first));
        assert_eq!(state.notices.len(), 1);
        assert_ne!(state.notices[0].id, first);
    }
}
