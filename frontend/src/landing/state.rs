use crate::models::{first_live, Playlist, PlaylistDetail, Video};
use std::cmp::Reverse;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveTab {
    #[default]
    All,
    Popular,
    New,
}

impl ArchiveTab {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchiveTab::All => "All",
            ArchiveTab::Popular => "Popular",
            ArchiveTab::New => "New",
        }
    }

    pub fn all_variants() -> [Self; 3] {
        [ArchiveTab::All, ArchiveTab::Popular, ArchiveTab::New]
    }
}

/// Orders the archive grid for a tab. Records without views or a creation
/// date go last; ties keep the endpoint order.
pub fn arrange_archive(videos: &[Video], tab: ArchiveTab) -> Vec<Video> {
    let mut out = videos.to_vec();
    match tab {
        ArchiveTab::All => {}
        ArchiveTab::Popular => out.sort_by_key(|v| Reverse(v.views.map(|n| n.saturating_add(1).max(1)).unwrap_or(0))),
        ArchiveTab::New => out.sort_by(|a, b| match (&a.created_at, &b.created_at) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
    }
    out
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandingState {
    pub loading: bool,
    pub videos: Vec<Video>,
    pub playlists: Vec<Playlist>,
    pub selected: Option<Video>,
    pub tab: ArchiveTab,
    pub open_playlist: Option<PlaylistDetail>,
    pub playlist_error: Option<String>,
}

impl LandingState {
    pub fn mounting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Videos shown in the archive grid right now.
    pub fn archive(&self) -> Vec<Video> {
        let source = match &self.open_playlist {
            Some(detail) => &detail.videos,
            None => &self.videos,
        };
        arrange_archive(source, self.tab)
    }

    /// The hero is showing a live record.
    pub fn is_broadcasting(&self) -> bool {
        self.selected.as_ref().is_some_and(|v| v.is_live)
    }
}

pub enum LandingAction {
    Loaded {
        videos: Vec<Video>,
        playlists: Vec<Playlist>,
    },
    LoadFailed,
    Select(Video),
    SwitchTab(ArchiveTab),
    PlaylistOpened(PlaylistDetail),
    PlaylistFailed(String),
    ClearPlaylist,
}

impl Reducible for LandingState {
    type Action = LandingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LandingAction::Loaded { videos, playlists } => {
                next.selected = first_live(&videos).cloned();
                next.videos = videos;
                next.playlists = playlists;
                next.loading = false;
            }
            LandingAction::LoadFailed => {
                next.videos.clear();
                next.playlists.clear();
                next.selected = None;
                next.loading = false;
            }
            LandingAction::Select(video) => next.selected = Some(video),
            LandingAction::SwitchTab(tab) => next.tab = tab,
            LandingAction::PlaylistOpened(detail) => {
                next.open_playlist = Some(detail);
                next.playlist_error = None;
            }
            LandingAction::PlaylistFailed(msg) => next.playlist_error = Some(msg),
            LandingAction::ClearPlaylist => {
                next.open_playlist = None;
                next.playlist_error = None;
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: i64, live: bool) -> Video {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Track {id}"),
            "artist": format!("Artist {id}"),
            "is_live": live,
        }))
        .unwrap()
    }

    fn reduce(state: LandingState, action: LandingAction) -> LandingState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn live_record_becomes_initial_selection() {
        let state = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![video(1, false), video(2, true), video(3, false)],
                playlists: vec![],
            },
        );
        assert!(!state.loading);
        assert_eq!(state.selected.as_ref().map(|v| v.id), Some(2));
    }

    #[test]
    fn no_live_record_means_no_broadcast() {
        let state = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![video(1, false)],
                playlists: vec![],
            },
        );
        assert!(!state.is_broadcasting());
    }

    #[test]
    fn empty_endpoints_render_empty_states() {
        let state = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![],
                playlists: vec![],
            },
        );
        assert!(!state.is_broadcasting());
        assert!(state.archive().is_empty());
        assert!(state.playlists.is_empty());
    }

    #[test]
    fn failed_load_falls_back_to_empty() {
        let state = reduce(LandingState::mounting(), LandingAction::LoadFailed);
        assert!(!state.loading);
        assert!(!state.is_broadcasting());
        assert!(state.archive().is_empty());
    }

    #[test]
    fn selecting_an_item_replaces_the_hero() {
        let loaded = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![video(1, true), video(2, false)],
                playlists: vec![],
            },
        );
        let picked = loaded.archive()[1].clone();
        let state = reduce(loaded, LandingAction::Select(picked));
        assert!(!state.is_broadcasting());
        let selected = state.selected.unwrap();
        assert_eq!(selected.title, "Track 2");
        assert_eq!(selected.artist, "Artist 2");
    }

    #[test]
    fn picking_an_archive_item_does_not_go_on_air() {
        let state = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![video(1, false), video(2, false)],
                playlists: vec![],
            },
        );
        let state = reduce(state, LandingAction::Select(video(2, false)));
        assert!(state.selected.is_some());
        assert!(!state.is_broadcasting());

        let state = reduce(state, LandingAction::Select(video(3, true)));
        assert!(state.is_broadcasting());
    }

    #[test]
    fn popular_tab_handles_extreme_view_counts() {
        let mut top = video(1, false);
        top.views = Some(i64::MAX);
        let mut low = video(2, false);
        low.views = Some(-5);
        let mut zero = video(3, false);
        zero.views = Some(0);
        let unknown = video(4, false);
        let videos = vec![unknown, low, zero, top];

        let ids: Vec<i64> = arrange_archive(&videos, ArchiveTab::Popular)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn tabs_order_the_archive() {
        let mut a = video(1, false);
        a.views = Some(10);
        a.created_at = Some("2025-01-03 00:00:00".into());
        let mut b = video(2, false);
        b.views = None;
        b.created_at = Some("2025-02-01 00:00:00".into());
        let mut c = video(3, false);
        c.views = Some(500);
        let videos = vec![a, b, c];

        let ids = |tab| arrange_archive(&videos, tab).iter().map(|v| v.id).collect::<Vec<_>>();
        assert_eq!(ids(ArchiveTab::All), vec![1, 2, 3]);
        assert_eq!(ids(ArchiveTab::Popular), vec![3, 1, 2]);
        assert_eq!(ids(ArchiveTab::New), vec![2, 1, 3]);
    }

    #[test]
    fn open_playlist_restricts_archive_until_cleared() {
        let loaded = reduce(
            LandingState::mounting(),
            LandingAction::Loaded {
                videos: vec![video(1, false), video(2, false), video(3, false)],
                playlists: vec![],
            },
        );
        let detail: PlaylistDetail = serde_json::from_value(serde_json::json!({
            "id": 9, "name": "Рок", "video_count": 1, "videos": [{"id": 3}]
        }))
        .unwrap();
        let filtered = reduce(loaded, LandingAction::PlaylistOpened(detail));
        assert_eq!(filtered.archive().len(), 1);

        let all = reduce(filtered, LandingAction::ClearPlaylist);
        assert_eq!(all.archive().len(), 3);
    }
}
