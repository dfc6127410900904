use std::rc::Rc;

use wasm_bindgen::prelude::*;

use app::{AppShell, CurrentUser, Services};
use marubatsu_protocol::PlayerId;
use remote::{HttpGameService, WebSocketChannel};

mod app;
mod remote;

/// WebSocket endpoint derived from the page origin when the host page
/// does not provide one
fn default_events_url() -> String {
    let location = gloo::utils::window().location();
    let scheme = match location.protocol().as_deref() {
        Ok("https:") => "wss",
        _ => "ws",
    };
    let host = location.host().unwrap_or_else(|_| "localhost".to_owned());
    format!("{}://{}/events", scheme, host)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::document;

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    console_log::init_with_level(log::Level::Debug).expect("Error initializing logger");

    let root = document()
        .get_element_by_id("marubatsu")
        .expect("Could not find id=\"marubatsu\" element");

    let attr = |name: &str| root.get_attribute(name);
    let user = CurrentUser {
        id: PlayerId(attr("data-user-id").unwrap_or_default()),
        name: attr("data-user-name").unwrap_or_else(|| "Player".to_owned()),
    };
    let api_base = attr("data-api-base").unwrap_or_else(|| "/api".to_owned());
    let events_url = attr("data-events-url").unwrap_or_else(default_events_url);
    log::debug!("api base: {}, events: {}", api_base, events_url);

    let services = Services {
        api: Rc::new(HttpGameService::new(api_base)),
        channel: Rc::new(WebSocketChannel::new(events_url)),
    };

    log::debug!("App started");
    yew::Renderer::<AppShell>::with_root_and_props(root, app::AppProps { user, services })
        .render();
}
