use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Record id that the admin grid never shows.
pub const SENTINEL_VIDEO_ID: i64 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Pop,
    Rock,
    Electronic,
    HipHop,
    Jazz,
    Other(String),
}

impl Category {
    /// Value stored by the videos endpoint.
    pub fn wire_value(&self) -> &str {
        match self {
            Category::Pop => "Поп",
            Category::Rock => "Рок",
            Category::Electronic => "Электроника",
            Category::HipHop => "Хип-хоп",
            Category::Jazz => "Джаз",
            Category::Other(s) => s,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Category::Pop => "Pop",
            Category::Rock => "Rock",
            Category::Electronic => "Electronic",
            Category::HipHop => "Hip-hop",
            Category::Jazz => "Jazz",
            Category::Other(s) => s,
        }
    }

    pub fn all_variants() -> Vec<Self> {
        vec![
            Category::Pop,
            Category::Rock,
            Category::Electronic,
            Category::HipHop,
            Category::Jazz,
        ]
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Поп" => Category::Pop,
            "Рок" => Category::Rock,
            "Электроника" => Category::Electronic,
            "Хип-хоп" => Category::HipHop,
            "Джаз" => Category::Jazz,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.wire_value().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// The endpoints return `null` for columns that were never filled.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Video {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_live: bool,
    #[serde(default)]
    pub views: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of a create (POST) or update (PUT) request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub artist: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub category: Category,
    pub is_live: bool,
}

impl From<&Video> for NewVideo {
    fn from(v: &Video) -> Self {
        Self {
            id: Some(v.id),
            title: v.title.clone(),
            artist: v.artist.clone(),
            video_url: v.video_url.clone(),
            thumbnail_url: v.thumbnail_url.clone(),
            duration: v.duration.clone(),
            category: v.category.clone(),
            is_live: v.is_live,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Playlist {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_count: i64,
}

/// A single playlist with its videos in playlist order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    #[serde(default)]
    pub videos: Vec<Video>,
}

pub fn first_live(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|v| v.is_live)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_row() {
        let json = r#"{
            "id": 7, "title": "City Lights", "artist": "Metro Band",
            "video_url": null, "thumbnail_url": "https://img/7.jpg",
            "duration": "3:28", "category": "Рок", "views": 3100000,
            "is_live": true, "created_at": "2025-01-02 10:00:00"
        }"#;
        let v: Video = serde_json::from_str(json).unwrap();
        assert_eq!(v.id, 7);
        assert_eq!(v.video_url, "");
        assert_eq!(v.category, Category::Rock);
        assert!(v.is_live);
        assert_eq!(v.views, Some(3_100_000));
    }

    #[test]
    fn unknown_category_is_preserved() {
        let v: Video =
            serde_json::from_str(r#"{"id": 1, "category": "Классика"}"#).unwrap();
        assert_eq!(v.category, Category::Other("Классика".into()));
        let out = serde_json::to_value(NewVideo::from(&v)).unwrap();
        assert_eq!(out["category"], "Классика");
    }

    #[test]
    fn new_video_omits_missing_id() {
        let body = NewVideo {
            id: None,
            title: "t".into(),
            artist: "a".into(),
            video_url: "blob:x".into(),
            thumbnail_url: "data:image/jpeg;base64,".into(),
            duration: "2:05".into(),
            category: Category::Jazz,
            is_live: false,
        };
        let out = serde_json::to_value(&body).unwrap();
        assert!(out.get("id").is_none());
        assert_eq!(out["category"], "Джаз");
    }

    #[test]
    fn playlist_count_uses_video_count() {
        let p: Playlist = serde_json::from_str(
            r#"{"id": 1, "name": "Хиты 2025", "icon": "Flame", "color": "bg-primary", "video_count": 24}"#,
        )
        .unwrap();
        assert_eq!(p.video_count, 24);

        let missing: Playlist = serde_json::from_str(r#"{"id": 2, "name": "Рок"}"#).unwrap();
        assert_eq!(missing.video_count, 0);
    }

    #[test]
    fn playlist_detail_keeps_count_and_videos_apart() {
        let d: PlaylistDetail = serde_json::from_str(
            r#"{"id": 3, "name": "Поп", "icon": "Music", "color": "bg-accent",
                "video_count": 1, "videos": [{"id": 5, "title": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(d.playlist.video_count, 1);
        assert_eq!(d.videos.len(), 1);
        assert_eq!(d.videos[0].id, 5);
    }

    #[test]
    fn first_live_picks_the_first_flagged() {
        let mut a: Video = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let mut b = a.clone();
        b.id = 2;
        b.is_live = true;
        let mut c = b.clone();
        c.id = 3;
        assert_eq!(first_live(&[a.clone(), b, c]).map(|v| v.id), Some(2));
        a.is_live = false;
        assert!(first_live(&[a]).is_none());
    }
}
