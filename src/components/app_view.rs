//! Routes of the application.

use crate::components::views::{EpisodeView, HomeView};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/episode/:id")]
        EpisodeView { id: String },
}

const SITE_NAME: &str = "Podcastr";

/// Document title of the listing page.
pub fn home_title() -> String {
    format!("Home - {SITE_NAME}")
}

/// Document title of an episode page, led by the episode's own title.
pub fn episode_title(title: &str) -> String {
    format!("{title} | {SITE_NAME}")
}
