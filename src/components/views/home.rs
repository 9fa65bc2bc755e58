use crate::api::*;
use crate::components::{home_title, AppView, Icon, PlayerController};
use dioxus::prelude::*;
use std::rc::Rc;

#[component]
pub fn HomeView() -> Element {
    let page = use_resource(move || async move { site_loader().home_page().await });

    rsx! {
        document::Title { "{home_title()}" }

        div { class: "home-page",
            {
                match page() {
                    Some(Ok(data)) => rsx! {
                        EpisodeSections { data }
                    },
                    Some(Err(err)) => rsx! {
                        div { class: "page-status page-status--error",
                            p { "Não foi possível carregar os episódios." }
                            small { "{err}" }
                        }
                    },
                    None => rsx! {
                        div { class: "page-status",
                            Icon { name: "loader".to_string(), class: "icon icon--large".to_string() }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn EpisodeSections(data: HomePageData) -> Element {
    let player = use_context::<PlayerController>();
    let episode_list: Rc<[Episode]> = data.episode_list();
    let latest_count = data.latest_episodes.len();

    rsx! {
        section { class: "latest-episodes",
            h2 { "Últimos lançamentos" }
            ul {
                for (index, episode) in data.latest_episodes.iter().cloned().enumerate() {
                    li { key: "{episode.id}",
                        img {
                            src: "{episode.thumbnail}",
                            alt: "{episode.title}",
                            width: "192",
                            height: "192",
                        }
                        div { class: "episode-details",
                            Link { to: AppView::EpisodeView { id: episode.id.clone() }, "{episode.title}" }
                            p { "{episode.members}" }
                            span { "{episode.published_at}" }
                            span { "{episode.duration_as_string}" }
                        }
                        button {
                            r#type: "button",
                            class: "play-button",
                            aria_label: "Tocar episódio",
                            onclick: {
                                let episode_list = episode_list.clone();
                                move |_| player.play_list(episode_list.clone(), index)
                            },
                            Icon { name: "play".to_string(), class: "icon".to_string() }
                        }
                    }
                }
            }
        }

        section { class: "all-episodes",
            h2 { "Todos os episódios" }
            table { style: "border-spacing: 0;",
                thead {
                    tr {
                        th {}
                        th { "Podcast" }
                        th { "Integrantes" }
                        th { "Data" }
                        th { "Duração" }
                        th {}
                    }
                }
                tbody {
                    for (index, episode) in data.all_episodes.iter().cloned().enumerate() {
                        tr { key: "{episode.id}",
                            td { style: "width: 72px;",
                                img {
                                    src: "{episode.thumbnail}",
                                    alt: "{episode.title}",
                                    width: "120",
                                    height: "120",
                                }
                            }
                            td {
                                Link { to: AppView::EpisodeView { id: episode.id.clone() }, "{episode.title}" }
                            }
                            td { "{episode.members}" }
                            td { style: "width: 100px;", "{episode.published_at}" }
                            td { "{episode.duration_as_string}" }
                            td {
                                button {
                                    r#type: "button",
                                    class: "play-button",
                                    aria_label: "Tocar episódio",
                                    onclick: {
                                        let episode_list = episode_list.clone();
                                        move |_| player.play_list(episode_list.clone(), index + latest_count)
                                    },
                                    Icon { name: "play".to_string(), class: "icon".to_string() }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
