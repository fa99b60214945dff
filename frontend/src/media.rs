use crate::error::{ChannelError, ChannelResult, ThumbnailError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, CanvasRenderingContext2d, EventTarget, File, HtmlCanvasElement, HtmlVideoElement, Url,
};

pub const THUMBNAIL_MIME: &str = "image/jpeg";
pub const THUMBNAIL_QUALITY: f64 = 0.7;

/// Used when no frame could be captured.
pub const PLACEHOLDER_THUMBNAIL: &str = "data:image/svg+xml;utf8,\
<svg xmlns='http://www.w3.org/2000/svg' width='640' height='360' viewBox='0 0 640 360'>\
<rect width='640' height='360' fill='%23111827'/>\
<polygon points='280,130 280,230 370,180' fill='%236b7280'/></svg>";

// HTMLMediaElement.readyState
const HAVE_METADATA: u16 = 1;
const HAVE_CURRENT_DATA: u16 = 2;

const TIMEOUT_MARKER: &str = "__media_timeout__";

/// Only `video/*` files are accepted by the upload form.
pub fn admit_video_mime(mime: &str) -> ChannelResult<()> {
    if mime.starts_with("video/") {
        Ok(())
    } else {
        Err(ChannelError::InvalidFileType(mime.to_string()))
    }
}

/// Placeholder plus the typed failure when capture did not work.
pub fn thumbnail_or_placeholder(
    captured: Result<String, ThumbnailError>,
) -> (String, Option<ThumbnailError>) {
    match captured {
        Ok(data_url) => (data_url, None),
        Err(e) => (PLACEHOLDER_THUMBNAIL.to_string(), Some(e)),
    }
}

/// Produces a still image for a video URL.
#[allow(async_fn_in_trait)]
pub trait FrameGrabber {
    async fn grab(&self, video_url: &str) -> Result<String, ThumbnailError>;
}

pub fn create_object_url(file: &File) -> ChannelResult<String> {
    Url::create_object_url_with_blob(file)
        .map_err(|e| ChannelError::MediaProbe(format!("object URL: {e:?}")))
}

pub fn revoke_object_url(url: &str) {
    if url.starts_with("blob:") {
        let _ = Url::revoke_object_url(url);
    }
}

enum Wait {
    Fired,
    TimedOut,
}

/// Resolves on `event`, on the element's `error` event (as `Err`), or after
/// `timeout_ms`.
async fn wait_for_event(target: &EventTarget, event: &str, timeout_ms: u32) -> Result<Wait, JsValue> {
    let mut executor = |resolve: js_sys::Function, reject: js_sys::Function| {
        let _ = target.add_event_listener_with_callback(event, &resolve);
        let _ = target.add_event_listener_with_callback("error", &reject);
        if let Some(w) = window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_1(
                &resolve,
                i32::try_from(timeout_ms).unwrap_or(i32::MAX),
                &JsValue::from_str(TIMEOUT_MARKER),
            );
        }
    };
    let value = JsFuture::from(js_sys::Promise::new(&mut executor)).await?;
    if value.as_string().as_deref() == Some(TIMEOUT_MARKER) {
        Ok(Wait::TimedOut)
    } else {
        Ok(Wait::Fired)
    }
}

fn detached_video() -> Result<HtmlVideoElement, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?
        .create_element("video")?
        .dyn_into::<HtmlVideoElement>()
        .map_err(JsValue::from)
}

/// Reads the duration of a local file in seconds. Uses its own object URL
/// and releases it before returning.
pub async fn probe_duration(file: &File, timeout_ms: u32) -> ChannelResult<f64> {
    let url = create_object_url(file)?;
    let result = probe_url_duration(&url, timeout_ms).await;
    revoke_object_url(&url);
    result
}

async fn probe_url_duration(url: &str, timeout_ms: u32) -> ChannelResult<f64> {
    let probe = |e: JsValue| ChannelError::MediaProbe(format!("{e:?}"));
    let video = detached_video().map_err(probe)?;
    video.set_preload("metadata");
    video.set_src(url);

    if video.ready_state() < HAVE_METADATA {
        match wait_for_event(&video, "loadedmetadata", timeout_ms).await.map_err(probe)? {
            Wait::Fired => {}
            Wait::TimedOut => {
                return Err(ChannelError::MediaProbe(format!(
                    "no metadata after {timeout_ms} ms"
                )))
            }
        }
    }
    Ok(video.duration())
}

/// Grabs the first decoded frame of a video through a canvas.
pub struct CanvasFrameGrabber {
    pub timeout_ms: u32,
}

impl CanvasFrameGrabber {
    fn draw(video: &HtmlVideoElement) -> Result<String, ThumbnailError> {
        let canvas_err = |e: JsValue| ThumbnailError::Canvas(format!("{e:?}"));
        let (width, height) = (video.video_width(), video.video_height());
        if width == 0 || height == 0 {
            return Err(ThumbnailError::NoDecodedFrame);
        }

        let canvas = window()
            .and_then(|w| w.document())
            .ok_or_else(|| ThumbnailError::Canvas("no document".into()))?
            .create_element("canvas")
            .map_err(canvas_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ThumbnailError::Canvas("not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(canvas_err)?
            .ok_or_else(|| ThumbnailError::Canvas("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ThumbnailError::Canvas("2d context unavailable".into()))?;
        ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
            .map_err(canvas_err)?;

        canvas
            .to_data_url_with_type_and_encoder_options(
                THUMBNAIL_MIME,
                &JsValue::from_f64(THUMBNAIL_QUALITY),
            )
            .map_err(canvas_err)
    }
}

impl FrameGrabber for CanvasFrameGrabber {
    async fn grab(&self, video_url: &str) -> Result<String, ThumbnailError> {
        let video =
            detached_video().map_err(|e| ThumbnailError::Canvas(format!("{e:?}")))?;
        video.set_muted(true);
        video.set_preload("auto");
        video.set_src(video_url);

        if video.ready_state() < HAVE_CURRENT_DATA {
            match wait_for_event(&video, "loadeddata", self.timeout_ms).await {
                Ok(Wait::Fired) => {}
                Ok(Wait::TimedOut) => return Err(ThumbnailError::Timeout(self.timeout_ms)),
                Err(_) => return Err(ThumbnailError::NoDecodedFrame),
            }
        }
        let result = Self::draw(&video);
        let _ = video.remove_attribute("src");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_video_mime_types_are_admitted() {
        assert!(admit_video_mime("video/mp4").is_ok());
        assert!(admit_video_mime("video/webm").is_ok());
        assert_eq!(
            admit_video_mime("image/png"),
            Err(ChannelError::InvalidFileType("image/png".into()))
        );
        assert!(admit_video_mime("").is_err());
    }

    #[test]
    fn failed_capture_falls_back_with_reason() {
        let (url, err) = thumbnail_or_placeholder(Err(ThumbnailError::Timeout(500)));
        assert_eq!(url, PLACEHOLDER_THUMBNAIL);
        assert_eq!(err, Some(ThumbnailError::Timeout(500)));

        let (url, err) = thumbnail_or_placeholder(Ok("data:image/jpeg;base64,AAA".into()));
        assert_eq!(url, "data:image/jpeg;base64,AAA");
        assert!(err.is_none());
    }
}
