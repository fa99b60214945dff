use crate::api::{load_catalog, HttpBackend, VideoBackend};
use crate::env_variable_utils::CONFIG;
use crate::landing::components::{ArchiveTabs, HeroPlayer, PlaylistPanel, VideoGrid};
use crate::landing::state::{ArchiveTab, LandingAction, LandingState};
use crate::models::Video;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod state;

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    let state = use_reducer(LandingState::mounting);

    // Load videos and playlists on component mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let backend = HttpBackend::from_config(&CONFIG);
                match load_catalog(&backend).await {
                    Ok((videos, playlists)) => {
                        log::debug!("Loaded {} videos, {} playlists", videos.len(), playlists.len());
                        state.dispatch(LandingAction::Loaded { videos, playlists });
                    }
                    Err(e) => {
                        log::error!("Failed to load channel data: {e}");
                        state.dispatch(LandingAction::LoadFailed);
                    }
                }
            });
            || ()
        });
    }

    let on_select = {
        let state = state.clone();
        Callback::from(move |video: Video| state.dispatch(LandingAction::Select(video)))
    };

    let on_tab = {
        let state = state.clone();
        Callback::from(move |tab: ArchiveTab| state.dispatch(LandingAction::SwitchTab(tab)))
    };

    let on_open_playlist = {
        let state = state.clone();
        Callback::from(move |id: i64| {
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let backend = HttpBackend::from_config(&CONFIG);
                match backend.playlist_detail(id).await {
                    Ok(Some(detail)) => state.dispatch(LandingAction::PlaylistOpened(detail)),
                    Ok(None) => state.dispatch(LandingAction::PlaylistFailed(
                        "This playlist no longer exists".to_string(),
                    )),
                    Err(e) => {
                        log::error!("Failed to load playlist {id}: {e}");
                        state.dispatch(LandingAction::PlaylistFailed(e.user_message()));
                    }
                }
            });
        })
    };

    let on_clear_playlist = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(LandingAction::ClearPlaylist))
    };

    let archive = state.archive();
    let active_playlist = state.open_playlist.as_ref().map(|d| d.playlist.id);
    let archive_title = state
        .open_playlist
        .as_ref()
        .map(|d| d.playlist.name.clone())
        .unwrap_or_else(|| "Video archive".to_string());

    html! {
        <div class="min-h-screen bg-gray-800">
            <header class="border-b border-gray-700 bg-gray-900 sticky top-0 z-50">
                <div class="max-w-6xl mx-auto px-4 py-4 flex justify-between items-center">
                    <div class="flex items-center gap-3">
                        <h1 class="text-2xl font-bold text-white tracking-tight">{&CONFIG.app_name}</h1>
                        if state.is_broadcasting() {
                            <span class="bg-red-600 text-white text-xs font-bold px-2 py-1 rounded">{"ON AIR"}</span>
                        }
                    </div>
                    <Link<Route> to={Route::Admin} classes="text-blue-400 hover:underline">
                        {"Admin Panel"}
                    </Link<Route>>
                </div>
            </header>

            <main class="max-w-6xl mx-auto px-4 py-8">
                <div class="grid lg:grid-cols-3 gap-8 mb-12">
                    <div class="lg:col-span-2">
                        {
                            if state.loading {
                                html! {
                                    <div class="aspect-video bg-gray-900 rounded-lg flex items-center justify-center">
                                        <p class="text-gray-400">{"Loading..."}</p>
                                    </div>
                                }
                            } else {
                                html! { <HeroPlayer video={state.selected.clone()} /> }
                            }
                        }
                    </div>
                    <PlaylistPanel
                        playlists={state.playlists.clone()}
                        active={active_playlist}
                        on_open={on_open_playlist}
                        on_clear={on_clear_playlist}
                    />
                </div>

                <section>
                    <div class="flex items-center justify-between mb-6">
                        <h2 class="text-3xl font-bold text-white">{archive_title}</h2>
                        <ArchiveTabs current={state.tab} on_change={on_tab} />
                    </div>
                    {
                        if let Some(msg) = &state.playlist_error {
                            html! { <p class="text-red-400 mb-4">{ msg }</p> }
                        } else {
                            html! {}
                        }
                    }
                    <VideoGrid
                        videos={archive}
                        selected={state.selected.as_ref().map(|v| v.id)}
                        on_select={on_select}
                    />
                </section>
            </main>

            <footer class="border-t border-gray-700 mt-16 py-8 text-center text-gray-500">
                <p>{format!("© {} {}", chrono::Utc::now().format("%Y"), CONFIG.app_name)}</p>
            </footer>
        </div>
    }
}
