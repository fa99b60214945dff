use crate::landing::state::ArchiveTab;
use crate::models::{Playlist, Video};
use crate::utils::format_views;
use yew::prelude::*;

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "Flame" => "🔥",
        "Guitar" => "🎸",
        "Music" => "🎵",
        "Zap" => "⚡",
        "Radio" => "📻",
        "Mic" => "🎤",
        _ => "♪",
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroPlayerProps {
    pub video: Option<Video>,
}

#[function_component(HeroPlayer)]
pub fn hero_player(props: &HeroPlayerProps) -> Html {
    match &props.video {
        Some(video) => html! {
            <div class="rounded-lg overflow-hidden border-2 border-red-500/40 bg-gray-900">
                <div class="aspect-video bg-black relative">
                    // keyed so a new selection replaces the element
                    <video
                        key={video.id}
                        src={video.video_url.clone()}
                        poster={video.thumbnail_url.clone()}
                        class="w-full h-full"
                        controls={true}
                    />
                    if video.is_live {
                        <span class="absolute top-3 left-3 bg-red-600 text-white px-3 py-1 rounded text-sm font-bold">
                            {"● LIVE"}
                        </span>
                    }
                </div>
                <div class="p-6">
                    <h3 class="text-2xl font-bold text-white mb-1">{&video.title}</h3>
                    <p class="text-gray-400 mb-2">{&video.artist}</p>
                    <div class="flex gap-3 text-xs text-gray-400">
                        <span>{&video.duration}</span>
                        <span class="bg-blue-600/20 text-blue-300 px-2 rounded">{video.category.display_name()}</span>
                    </div>
                </div>
            </div>
        },
        None => html! {
            <div class="rounded-lg overflow-hidden border-2 border-gray-600 bg-gray-900">
                <div class="aspect-video flex items-center justify-center">
                    <div class="text-center">
                        <p class="text-3xl font-bold text-gray-300 mb-2">{"No active broadcast"}</p>
                        <p class="text-gray-500">{"Pick a video from the archive below"}</p>
                    </div>
                </div>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct PlaylistPanelProps {
    pub playlists: Vec<Playlist>,
    pub active: Option<i64>,
    pub on_open: Callback<i64>,
    pub on_clear: Callback<MouseEvent>,
}

#[function_component(PlaylistPanel)]
pub fn playlist_panel(props: &PlaylistPanelProps) -> Html {
    html! {
        <div class="bg-gray-900 rounded-lg p-6">
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-xl font-bold text-white">{"Playlists"}</h3>
                if props.active.is_some() {
                    <button onclick={props.on_clear.clone()} class="text-sm text-blue-400 hover:underline">
                        {"Show all"}
                    </button>
                }
            </div>
            if props.playlists.is_empty() {
                <p class="text-gray-500 text-sm">{"No playlists yet"}</p>
            }
            <div class="space-y-3">
                {
                    props.playlists.iter().map(|playlist| {
                        let id = playlist.id;
                        let on_open = props.on_open.clone();
                        let ring = if props.active == Some(id) { "ring-2 ring-blue-500" } else { "" };
                        html! {
                            <div
                                key={id}
                                onclick={Callback::from(move |_| on_open.emit(id))}
                                class={classes!("p-4", "rounded", "bg-gray-800", "cursor-pointer", "hover:bg-gray-700", ring)}
                            >
                                <div class="flex items-center gap-3">
                                    <div class={classes!("p-2", "rounded-lg", playlist.color.clone())}>
                                        {icon_glyph(&playlist.icon)}
                                    </div>
                                    <div class="flex-1">
                                        <h4 class="font-semibold text-white">{&playlist.name}</h4>
                                        <p class="text-sm text-gray-400">{format!("{} videos", playlist.video_count)}</p>
                                    </div>
                                    <span class="text-gray-500">{"›"}</span>
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ArchiveTabsProps {
    pub current: ArchiveTab,
    pub on_change: Callback<ArchiveTab>,
}

#[function_component(ArchiveTabs)]
pub fn archive_tabs(props: &ArchiveTabsProps) -> Html {
    html! {
        <div class="flex gap-1 bg-gray-800 rounded p-1">
            {
                ArchiveTab::all_variants().into_iter().map(|tab| {
                    let on_change = props.on_change.clone();
                    let style = if tab == props.current {
                        "bg-blue-600 text-white"
                    } else {
                        "text-gray-300 hover:bg-gray-700"
                    };
                    html! {
                        <button
                            onclick={Callback::from(move |_| on_change.emit(tab))}
                            class={classes!("px-3", "py-1", "rounded", "text-sm", style)}
                        >
                            {tab.display_name()}
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub videos: Vec<Video>,
    pub selected: Option<i64>,
    pub on_select: Callback<Video>,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    if props.videos.is_empty() {
        return html! {
            <div class="text-center py-16 text-gray-400">
                <p class="text-2xl font-bold mb-2">{"The archive is empty"}</p>
                <p>{"New videos will show up here"}</p>
            </div>
        };
    }

    html! {
        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
            {
                props.videos.iter().map(|video| {
                    let on_select = props.on_select.clone();
                    let picked = video.clone();
                    let border = if props.selected == Some(video.id) {
                        "border-blue-500"
                    } else {
                        "border-transparent"
                    };
                    html! {
                        <div
                            key={video.id}
                            onclick={Callback::from(move |_| on_select.emit(picked.clone()))}
                            class={classes!("bg-gray-900", "rounded-lg", "overflow-hidden", "cursor-pointer", "border-2", "hover:border-blue-400", border)}
                        >
                            <div class="relative aspect-video bg-black">
                                <img src={video.thumbnail_url.clone()} alt={video.title.clone()} class="w-full h-full object-cover" />
                                <span class="absolute bottom-2 right-2 bg-black/80 text-white text-xs px-2 py-1 rounded">
                                    {&video.duration}
                                </span>
                            </div>
                            <div class="p-4">
                                <h3 class="font-bold text-lg text-white truncate">{&video.title}</h3>
                                <p class="text-sm text-gray-400 mb-2">{&video.artist}</p>
                                <p class="text-xs text-gray-500">
                                    {video.views.map(|v| format!("{} views", format_views(v))).unwrap_or_default()}
                                </p>
                            </div>
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
