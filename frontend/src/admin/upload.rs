use crate::admin::state::{visible_videos, SelectedFile, VideoForm};
use crate::api::VideoBackend;
use crate::error::{ChannelError, ChannelResult, ThumbnailError};
use crate::media::{thumbnail_or_placeholder, FrameGrabber};
use crate::models::{NewVideo, Video};
use crate::storage::{KeyValueStore, UploadCache};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub created: Video,
    pub preview_url: String,
    pub thumbnail_warning: Option<ThumbnailError>,
}

/// Fetches the management list and the previews still valid for it.
pub async fn load_admin_videos<B, S>(
    backend: &B,
    cache: &UploadCache<S>,
    now_ms: i64,
) -> ChannelResult<(Vec<Video>, HashMap<i64, String>)>
where
    B: VideoBackend,
    S: KeyValueStore,
{
    let videos = visible_videos(backend.list_videos().await?);
    let ids: Vec<i64> = videos.iter().map(|v| v.id).collect();
    let uploaded = cache.load(&ids, now_ms);
    Ok((videos, uploaded))
}

/// Creates the record for the selected file.
///
/// Nothing is sent when no file is selected. A failed frame grab does not
/// stop the upload, the placeholder is sent and the reason is returned.
pub async fn submit_video<B, G, S>(
    backend: &B,
    grabber: &G,
    cache: &UploadCache<S>,
    form: &VideoForm,
    file: Option<&SelectedFile>,
    now_ms: i64,
) -> ChannelResult<SubmitOutcome>
where
    B: VideoBackend,
    G: FrameGrabber,
    S: KeyValueStore,
{
    let file = file.ok_or(ChannelError::FileRequired)?;

    let (thumbnail_url, thumbnail_warning) =
        thumbnail_or_placeholder(grabber.grab(&file.preview_url).await);
    if let Some(w) = &thumbnail_warning {
        log::warn!("Thumbnail for {} not captured: {w}", file.name);
    }

    let body = NewVideo {
        id: None,
        title: form.title.trim().to_string(),
        artist: form.artist.trim().to_string(),
        video_url: file.preview_url.clone(),
        thumbnail_url,
        duration: form.duration.clone(),
        category: form.category.clone(),
        is_live: form.is_live,
    };
    let created = backend.create_video(&body).await?;

    // The record exists now; a cache miss only costs the inline preview.
    if let Err(e) = cache.remember(created.id, &file.preview_url, now_ms) {
        log::warn!("Could not cache preview for video {}: {e}", created.id);
    }

    Ok(SubmitOutcome {
        created,
        preview_url: file.preview_url.clone(),
        thumbnail_warning,
    })
}

/// Flips the live flag of one record.
pub async fn toggle_live<B: VideoBackend>(backend: &B, video: &Video) -> ChannelResult<Video> {
    let mut body = NewVideo::from(video);
    body.is_live = !video.is_live;
    let updated = backend.update_video(&body).await?;
    log::info!("Video {} live={}", updated.id, updated.is_live);
    Ok(updated)
}

/// Flips the live flag, then re-fetches the management list. The PUT answer
/// carries fewer fields than a listed record, so the grid is rebuilt from the
/// list instead.
pub async fn toggle_live_and_reload<B, S>(
    backend: &B,
    cache: &UploadCache<S>,
    video: &Video,
    now_ms: i64,
) -> ChannelResult<(Vec<Video>, HashMap<i64, String>)>
where
    B: VideoBackend,
    S: KeyValueStore,
{
    toggle_live(backend, video).await?;
    load_admin_videos(backend, cache, now_ms).await
}
