mod admin;
mod api;
mod env_variable_utils;
mod error;
mod landing;
mod logging;
mod media;
mod models;
mod router;
mod storage;
mod utils;

use crate::env_variable_utils::CONFIG;
use crate::router::{switch, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    logging::init(CONFIG.debug_mode);

    log::info!(
        "NAME: \"{}\", VIDEOS: \"{}\", PLAYLISTS: \"{}\", DEBUG: \"{}\"",
        CONFIG.app_name,
        CONFIG.videos_api_url,
        CONFIG.playlists_api_url,
        CONFIG.debug_mode
    );

    yew::Renderer::<App>::new().render();
}
