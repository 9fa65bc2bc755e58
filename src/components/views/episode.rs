use crate::api::*;
use crate::components::{episode_title, AppView, Icon, PlayerController};
use dioxus::prelude::*;

#[component]
pub fn EpisodeView(id: String) -> Element {
    let player = use_context::<PlayerController>();
    let id = use_memo(use_reactive!(|id| id));
    let episode = use_resource(move || async move { site_loader().episode(&id()).await });

    rsx! {
        div { class: "episode-page",
            {
                match episode() {
                    Some(Ok(episode)) => rsx! {
                        document::Title { "{episode_title(&episode.title)}" }
                        div { class: "episode-page__thumbnail",
                            Link { to: AppView::HomeView {}, class: "episode-page__back",
                                Icon { name: "arrow-left".to_string(), class: "icon".to_string() }
                            }
                            img {
                                src: "{episode.thumbnail}",
                                alt: "{episode.title}",
                                width: "700",
                                height: "160",
                            }
                            button {
                                r#type: "button",
                                class: "episode-page__play",
                                aria_label: "Tocar episódio",
                                onclick: {
                                    let episode = episode.clone();
                                    move |_| player.play(episode.clone())
                                },
                                Icon { name: "play".to_string(), class: "icon".to_string() }
                            }
                        }
                        header {
                            h1 { "{episode.title}" }
                            span { "{episode.members}" }
                            span { "{episode.published_at}" }
                            span { "{episode.duration_as_string}" }
                        }
                        div {
                            class: "episode-page__description",
                            dangerous_inner_html: "{episode.description}",
                        }
                    },
                    Some(Err(err)) => rsx! {
                        div { class: "page-status page-status--error",
                            p { "Episódio indisponível." }
                            small { "{err}" }
                            Link { to: AppView::HomeView {}, "Voltar para o início" }
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
