use crate::admin::components::{AdminLayout, Dialog, Notices, UploadForm, VideoCard};
use crate::admin::state::{AdminAction, AdminState, FormField, SelectedFile};
use crate::admin::upload::{load_admin_videos, submit_video, toggle_live_and_reload};
use crate::api::HttpBackend;
use crate::env_variable_utils::CONFIG;
use crate::media::{
    admit_video_mime, create_object_url, probe_duration, revoke_object_url, CanvasFrameGrabber,
};
use crate::models::{Category, Video};
use crate::storage::{current_session_id, BrowserStorage, UploadCache};
use crate::utils::format_duration;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub mod components;
pub mod state;
pub mod upload;

fn upload_cache() -> UploadCache<BrowserStorage> {
    UploadCache::new(
        BrowserStorage::local(),
        current_session_id(),
        CONFIG.upload_cache_ttl_hours,
    )
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn reload(state: UseReducerHandle<AdminState>) {
    state.dispatch(AdminAction::LoadStarted);
    let backend = HttpBackend::from_config(&CONFIG);
    match load_admin_videos(&backend, &upload_cache(), now_ms()).await {
        Ok((videos, uploaded)) => {
            log::debug!("Loaded {} videos, {} cached previews", videos.len(), uploaded.len());
            state.dispatch(AdminAction::Loaded { videos, uploaded });
        }
        Err(e) => {
            log::error!("Failed to load videos: {e}");
            state.dispatch(AdminAction::LoadFailed(e));
        }
    }
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let state = use_reducer(AdminState::mounting);

    // Load videos on component mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(reload(state));
            || ()
        });
    }

    let edit = |make: fn(String) -> FormField| {
        let state = state.clone();
        Callback::from(move |value: String| state.dispatch(AdminAction::Edit(make(value))))
    };
    let on_title = edit(FormField::Title);
    let on_artist = edit(FormField::Artist);
    let on_category = {
        let state = state.clone();
        Callback::from(move |c: Category| state.dispatch(AdminAction::Edit(FormField::Category(c))))
    };
    let on_live = {
        let state = state.clone();
        Callback::from(move |live: bool| state.dispatch(AdminAction::Edit(FormField::Live(live))))
    };

    let on_file = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            if let Err(err) = admit_video_mime(&file.type_()) {
                log::warn!("Rejected {} ({})", file.name(), file.type_());
                input.set_value("");
                state.dispatch(AdminAction::FileRejected(err));
                return;
            }

            // A preview that was never submitted is not referenced anywhere else.
            if let Some(previous) = &state.file {
                revoke_object_url(&previous.preview_url);
            }

            let preview_url = match create_object_url(&file) {
                Ok(url) => url,
                Err(err) => {
                    log::error!("{err}");
                    state.dispatch(AdminAction::FileRejected(err));
                    return;
                }
            };
            let probed_for = preview_url.clone();
            state.dispatch(AdminAction::FileSelected(SelectedFile {
                name: file.name(),
                size: file.size(),
                preview_url,
            }));

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match probe_duration(&file, CONFIG.media_timeout_ms).await {
                    Ok(seconds) => state.dispatch(AdminAction::DurationProbed {
                        preview_url: probed_for,
                        duration: format_duration(seconds),
                    }),
                    Err(e) => log::warn!("Duration of {} unknown: {e}", file.name()),
                }
            });
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if state.submitting {
                return;
            }

            let form = state.form.clone();
            let file = state.file.clone();
            let state = state.clone();
            state.dispatch(AdminAction::SubmitStarted);

            wasm_bindgen_futures::spawn_local(async move {
                let backend = HttpBackend::from_config(&CONFIG);
                let grabber = CanvasFrameGrabber {
                    timeout_ms: CONFIG.media_timeout_ms,
                };
                let cache = upload_cache();
                match submit_video(&backend, &grabber, &cache, &form, file.as_ref(), now_ms()).await {
                    Ok(outcome) => {
                        state.dispatch(AdminAction::SubmitSucceeded {
                            id: outcome.created.id,
                            preview_url: outcome.preview_url,
                            thumbnail_warning: outcome.thumbnail_warning,
                        });
                        reload(state).await;
                    }
                    Err(e) => {
                        if e.is_user_input() {
                            log::warn!("Submission refused: {e}");
                        } else {
                            log::error!("Failed to add video: {e}");
                        }
                        state.dispatch(AdminAction::SubmitFailed(e));
                    }
                }
            });
        })
    };

    let on_toggle_live = {
        let state = state.clone();
        Callback::from(move |video: Video| {
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let backend = HttpBackend::from_config(&CONFIG);
                match toggle_live_and_reload(&backend, &upload_cache(), &video, now_ms()).await {
                    Ok((videos, uploaded)) => state.dispatch(AdminAction::Loaded { videos, uploaded }),
                    Err(e) => {
                        log::error!("Failed to update video {}: {e}", video.id);
                        state.dispatch(AdminAction::ToggleFailed(e));
                    }
                }
            });
        })
    };

    let on_open = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(AdminAction::OpenDialog))
    };
    let on_cancel = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(AdminAction::CloseDialog))
    };
    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |id: u32| state.dispatch(AdminAction::Dismiss(id)))
    };

    html! {
        <AdminLayout title="Admin Panel">
            <div class="flex justify-between items-center mb-8">
                <div>
                    <h2 class="text-2xl font-semibold text-gray-800">{"Video content"}</h2>
                    <p class="text-gray-500">{format!("Total videos: {}", state.videos.len())}</p>
                </div>
                <button onclick={on_open.clone()} class="bg-blue-600 text-white px-6 py-2 rounded hover:bg-blue-700">
                    {"Add video"}
                </button>
            </div>

            <Dialog title="Add a new video" open={state.dialog_open}>
                <UploadForm
                    form={state.form.clone()}
                    file={state.file.clone()}
                    submitting={state.submitting}
                    {on_title}
                    {on_artist}
                    {on_category}
                    {on_live}
                    {on_file}
                    {on_submit}
                    {on_cancel}
                />
            </Dialog>

            {
                if state.loading && state.videos.is_empty() {
                    html! {
                        <div class="text-center py-8">
                            <p>{"Loading videos..."}</p>
                        </div>
                    }
                } else if state.videos.is_empty() {
                    html! {
                        <div class="text-center py-16">
                            <h3 class="text-2xl font-bold text-gray-800 mb-2">{"No videos yet"}</h3>
                            <p class="text-gray-500 mb-6">{"Add the first video to your channel"}</p>
                            <button onclick={on_open} class="bg-blue-600 text-white px-6 py-2 rounded hover:bg-blue-700">
                                {"Add video"}
                            </button>
                        </div>
                    }
                } else {
                    html! {
                        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {
                                state.videos.iter().map(|video| html! {
                                    <VideoCard
                                        key={video.id}
                                        video={video.clone()}
                                        preview_url={state.uploaded.get(&video.id).cloned()}
                                        on_toggle_live={on_toggle_live.clone()}
                                    />
                                }).collect::<Html>()
                            }
                        </div>
                    }
                }
            }

            <Notices notices={state.notices.clone()} {on_dismiss} />
        </AdminLayout>
    }
}
