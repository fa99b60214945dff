use crate::env_variable_utils::ChannelConfig;
use crate::error::{ChannelError, ChannelResult};
use crate::models::{NewVideo, Playlist, PlaylistDetail, Video};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// The two remote functions the views talk to.
#[allow(async_fn_in_trait)]
pub trait VideoBackend {
    async fn list_videos(&self) -> ChannelResult<Vec<Video>>;
    async fn list_playlists(&self) -> ChannelResult<Vec<Playlist>>;
    async fn playlist_detail(&self, id: i64) -> ChannelResult<Option<PlaylistDetail>>;
    async fn create_video(&self, video: &NewVideo) -> ChannelResult<Video>;
    async fn update_video(&self, video: &NewVideo) -> ChannelResult<Video>;
}

/// Fetches both collections at once. Either failure fails the whole load.
pub async fn load_catalog<B: VideoBackend>(backend: &B) -> ChannelResult<(Vec<Video>, Vec<Playlist>)> {
    futures::future::try_join(backend.list_videos(), backend.list_playlists()).await
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackend {
    videos_url: String,
    playlists_url: String,
}

impl HttpBackend {
    pub fn new(videos_url: impl Into<String>, playlists_url: impl Into<String>) -> Self {
        Self {
            videos_url: videos_url.into(),
            playlists_url: playlists_url.into(),
        }
    }

    pub fn from_config(config: &ChannelConfig) -> Self {
        Self::new(&config.videos_api_url, &config.playlists_api_url)
    }
}

fn by_id_url(base: &str, id: i64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}id={id}")
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ChannelResult<T> {
    if response.ok() {
        response.json::<T>().await.map_err(ChannelError::from)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("Request to {} failed: HTTP {status} - {body}", response.url());
        Err(ChannelError::Http { status, body })
    }
}

impl VideoBackend for HttpBackend {
    async fn list_videos(&self) -> ChannelResult<Vec<Video>> {
        let response = Request::get(&self.videos_url).send().await?;
        // `null` is a valid empty answer
        let videos: Option<Vec<Video>> = read_json(response).await?;
        Ok(videos.unwrap_or_default())
    }

    async fn list_playlists(&self) -> ChannelResult<Vec<Playlist>> {
        let response = Request::get(&self.playlists_url).send().await?;
        let playlists: Option<Vec<Playlist>> = read_json(response).await?;
        Ok(playlists.unwrap_or_default())
    }

    async fn playlist_detail(&self, id: i64) -> ChannelResult<Option<PlaylistDetail>> {
        let url = by_id_url(&self.playlists_url, id);
        let response = Request::get(&url).send().await?;
        read_json(response).await
    }

    async fn create_video(&self, video: &NewVideo) -> ChannelResult<Video> {
        let response = Request::post(&self.videos_url)
            .json(video)
            .map_err(|e| ChannelError::Network(format!("Request error: {e}")))?
            .send()
            .await?;
        let created: Video = read_json(response).await?;
        log::info!("Created video {} \"{}\"", created.id, created.title);
        Ok(created)
    }

    async fn update_video(&self, video: &NewVideo) -> ChannelResult<Video> {
        let response = Request::put(&self.videos_url)
            .json(video)
            .map_err(|e| ChannelError::Network(format!("Request error: {e}")))?
            .send()
            .await?;
        // The endpoint answers `null` when the id does not exist.
        let updated: Option<Video> = read_json(response).await?;
        updated.ok_or_else(|| ChannelError::Http {
            status: 404,
            body: format!("video {:?} not found", video.id),
        })
    }
}
