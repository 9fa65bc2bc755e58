use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod diagnostics;
mod playback;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#8257e5" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Podcastr" }

        document::Link { rel: "preconnect", href: "https://fonts.gstatic.com" }
        document::Link {
            rel: "stylesheet",
            href: "https://fonts.googleapis.com/css2?family=Inter:wght@500;600&family=Lexend:wght@500;600&display=swap",
        }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
