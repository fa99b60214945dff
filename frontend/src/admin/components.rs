use crate::admin::state::{Notice, NoticeKind, SelectedFile, VideoForm};
use crate::models::{Category, Video};
use crate::router::Route;
use crate::utils::format_iso8601_date;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticesProps {
    pub notices: Vec<Notice>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(Notices)]
pub fn notices(props: &NoticesProps) -> Html {
    html! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 w-80">
            {
                props.notices.iter().map(|notice| {
                    let id = notice.id;
                    let on_dismiss = props.on_dismiss.clone();
                    let style = match notice.kind {
                        NoticeKind::Success => "bg-green-100 border-green-400 text-green-800",
                        NoticeKind::Warning => "bg-yellow-100 border-yellow-400 text-yellow-800",
                        NoticeKind::Error => "bg-red-100 border-red-400 text-red-700",
                    };
                    html! {
                        <div
                            key={id}
                            onclick={Callback::from(move |_| on_dismiss.emit(id))}
                            class={classes!("border", "px-4", "py-3", "rounded", "shadow", "cursor-pointer", style)}
                        >
                            <p class="font-bold">{&notice.title}</p>
                            <p class="text-sm">{&notice.message}</p>
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    pub children: Children,
    pub title: String,
}

#[function_component(AdminLayout)]
pub fn admin_layout(props: &AdminLayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-gray-700 p-4">
            <div class="max-w-6xl mx-auto">
                <div class="bg-white rounded-lg shadow-lg p-8">
                    <div class="flex justify-between items-center mb-6">
                        <h1 class="text-3xl font-bold text-gray-800">
                            {&props.title}
                        </h1>
                        <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                            {"← Back to the channel"}
                        </Link<Route>>
                    </div>
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: Video,
    pub preview_url: Option<String>,
    pub on_toggle_live: Callback<Video>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let video = &props.video;
    let on_toggle = {
        let on_toggle_live = props.on_toggle_live.clone();
        let video = video.clone();
        Callback::from(move |_| on_toggle_live.emit(video.clone()))
    };

    html! {
        <div class="border border-gray-300 rounded-lg overflow-hidden">
            <div class="relative aspect-video bg-black">
                {
                    match &props.preview_url {
                        Some(url) => html! {
                            <video src={url.clone()} class="w-full h-full object-cover" controls={true} />
                        },
                        None => html! {
                            <img src={video.thumbnail_url.clone()} alt={video.title.clone()} class="w-full h-full object-cover" />
                        },
                    }
                }
                if video.is_live {
                    <span class="absolute top-2 right-2 bg-red-500 text-white px-2 py-1 rounded text-xs font-bold">
                        {"LIVE"}
                    </span>
                }
            </div>
            <div class="p-4">
                <h3 class="font-bold text-lg text-gray-800 mb-1">{&video.title}</h3>
                <p class="text-sm text-gray-500 mb-2">{&video.artist}</p>
                <div class="flex items-center justify-between text-xs text-gray-500 mb-3">
                    <span>{&video.duration}</span>
                    <span class="bg-blue-100 text-blue-700 px-2 py-1 rounded">{video.category.display_name()}</span>
                </div>
                <div class="flex items-center justify-between">
                    <span class="text-xs text-gray-400">
                        {video.created_at.as_deref().map(format_iso8601_date).unwrap_or_default()}
                    </span>
                    <button onclick={on_toggle} class="text-sm text-blue-600 hover:text-blue-900">
                        {if video.is_live { "Stop live" } else { "Go live" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadFormProps {
    pub form: VideoForm,
    pub file: Option<SelectedFile>,
    pub submitting: bool,
    pub on_title: Callback<String>,
    pub on_artist: Callback<String>,
    pub on_category: Callback<Category>,
    pub on_live: Callback<bool>,
    pub on_file: Callback<Event>,
    pub on_submit: Callback<SubmitEvent>,
    pub on_cancel: Callback<MouseEvent>,
}

#[function_component(UploadForm)]
pub fn upload_form(props: &UploadFormProps) -> Html {
    let on_title = {
        let cb = props.on_title.clone();
        Callback::from(move |e: InputEvent| cb.emit(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_artist = {
        let cb = props.on_artist.clone();
        Callback::from(move |e: InputEvent| cb.emit(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_category = {
        let cb = props.on_category.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            cb.emit(Category::from(value));
        })
    };
    let on_live = {
        let cb = props.on_live.clone();
        Callback::from(move |e: Event| cb.emit(e.target_unchecked_into::<HtmlInputElement>().checked()))
    };

    let input_class = "w-full p-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-blue-500";

    html! {
        <form onsubmit={props.on_submit.clone()} class="space-y-4">
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <label for="title" class="block text-gray-700 text-sm font-bold mb-1">{"Track title"}</label>
                    <input id="title" class={input_class} required={true}
                        value={props.form.title.clone()} oninput={on_title} />
                </div>
                <div>
                    <label for="artist" class="block text-gray-700 text-sm font-bold mb-1">{"Artist"}</label>
                    <input id="artist" class={input_class} required={true}
                        value={props.form.artist.clone()} oninput={on_artist} />
                </div>
            </div>

            <div>
                <label for="video_file" class="block text-gray-700 text-sm font-bold mb-1">{"Video file"}</label>
                <div class="border-2 border-dashed border-gray-300 rounded-lg p-6 text-center hover:border-blue-500">
                    <input id="video_file" type="file" accept="video/*" class="hidden" onchange={props.on_file.clone()} />
                    <label for="video_file" class="cursor-pointer">
                        {
                            match &props.file {
                                Some(file) => html! {
                                    <div class="space-y-2">
                                        <video src={file.preview_url.clone()} class="w-full max-h-48 rounded" controls={true} />
                                        <p class="text-sm text-gray-500">{format!("{} ({:.1} MB)", file.name, file.size / 1_048_576.0)}</p>
                                    </div>
                                },
                                None => html! {
                                    <p class="text-sm text-gray-500">{"Click to choose a video"}</p>
                                },
                            }
                        }
                    </label>
                </div>
            </div>

            <div class="grid grid-cols-2 gap-4">
                <div>
                    <label for="duration" class="block text-gray-700 text-sm font-bold mb-1">{"Duration"}</label>
                    <input id="duration" class={input_class} readonly={true}
                        placeholder="Detected automatically" value={props.form.duration.clone()} />
                </div>
                <div>
                    <label for="category" class="block text-gray-700 text-sm font-bold mb-1">{"Category"}</label>
                    <select id="category" class={input_class} onchange={on_category}>
                        {
                            Category::all_variants().into_iter().map(|c| {
                                let selected = c == props.form.category;
                                html! {
                                    <option value={c.wire_value().to_string()} selected={selected}>{c.display_name()}</option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                </div>
            </div>

            <label class="inline-flex items-center">
                <input id="is_live" type="checkbox" class="h-4 w-4" checked={props.form.is_live} onchange={on_live} />
                <span class="ml-2 text-gray-700">{"Show on the live broadcast"}</span>
            </label>

            <div class="flex gap-3 pt-4">
                <button type="submit" disabled={props.submitting}
                    class="flex-1 bg-blue-600 text-white p-3 rounded hover:bg-blue-700 disabled:opacity-50">
                    {if props.submitting { "Uploading..." } else { "Add video" }}
                </button>
                <button type="button" onclick={props.on_cancel.clone()}
                    class="px-6 border border-gray-300 rounded hover:bg-gray-100">
                    {"Cancel"}
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct DialogProps {
    pub children: Children,
    pub title: String,
    pub open: bool,
}

#[function_component(Dialog)]
pub fn dialog(props: &DialogProps) -> Html {
    if !props.open {
        return html! {};
    }
    html! {
        <div class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center p-4">
            <div class="bg-white rounded-lg shadow-lg p-6 w-full max-w-2xl max-h-full overflow-y-auto">
                <h2 class="text-2xl font-semibold text-gray-800 mb-4">{&props.title}</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}
