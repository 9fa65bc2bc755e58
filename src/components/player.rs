use crate::api::duration_as_string;
use crate::components::{seek_to, ElapsedSignal, Icon, PlayerController};
use dioxus::prelude::*;

mod controls;

use controls::{LoopButton, NextButton, PlayPauseButton, PrevButton, ShuffleButton};

#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerController>();
    let mut elapsed = use_context::<ElapsedSignal>().0;

    let state = player.state();
    let episode = state.current_episode().cloned();
    let has_episode = episode.is_some();
    let progress = elapsed();

    let on_seek = move |e: Event<FormData>| {
        if let Ok(seconds) = e.value().parse::<f64>() {
            let seconds = seconds.max(0.0);
            seek_to(seconds);
            elapsed.set(seconds.floor() as u64);
        }
    };

    rsx! {
        div { class: "player",
            header { class: "player__header",
                Icon { name: "headphones".to_string(), class: "icon".to_string() }
                strong { "Tocando agora" }
                if has_episode {
                    button {
                        r#type: "button",
                        class: "player__close",
                        aria_label: "Limpar player",
                        onclick: move |_| player.clear_player_state(),
                        Icon { name: "x".to_string(), class: "icon icon--small".to_string() }
                    }
                }
            }

            {match &episode {
                Some(episode) => rsx! {
                    div { class: "player__current",
                        img {
                            src: "{episode.thumbnail}",
                            alt: "{episode.title}",
                            width: "592",
                            height: "592",
                        }
                        strong { "{episode.title}" }
                        span { "{episode.members}" }
                    }
                },
                None => rsx! {
                    div { class: "player__empty",
                        strong { "Selecione um podcast para ouvir" }
                    }
                },
            }}

            footer { class: if has_episode { "player__footer" } else { "player__footer player__footer--empty" },
                div { class: "player__progress",
                    span { "{duration_as_string(progress)}" }
                    div { class: "player__slider",
                        {match &episode {
                            Some(episode) => rsx! {
                                input {
                                    r#type: "range",
                                    min: "0",
                                    max: "{episode.duration}",
                                    value: "{progress}",
                                    oninput: on_seek,
                                }
                            },
                            None => rsx! {
                                div { class: "player__slider-empty" }
                            },
                        }}
                    }
                    span {
                        {episode.as_ref().map(|e| e.duration_as_string.clone()).unwrap_or_else(|| duration_as_string(0))}
                    }
                }

                div { class: "player__buttons",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    LoopButton {}
                }
            }
        }
    }
}
