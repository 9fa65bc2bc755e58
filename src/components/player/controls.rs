use crate::components::{Icon, PlayerController};
use dioxus::prelude::*;

/// Shuffle button - toggle shuffle mode
#[component]
pub(super) fn ShuffleButton() -> Element {
    let player = use_context::<PlayerController>();
    let state = player.state();
    // Shuffling a single episode is meaningless.
    let disabled = state.current_episode().is_none() || state.episode_list().len() <= 1;

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            disabled: disabled,
            class: if state.is_shuffling() { "player__button player__button--active" } else { "player__button" },
            aria_label: "Embaralhar",
            onclick: move |_| player.toggle_shuffle(),
            Icon { name: "shuffle".to_string(), class: "icon".to_string() }
        }
    }
}

/// Previous button
#[component]
pub(super) fn PrevButton() -> Element {
    let player = use_context::<PlayerController>();
    let state = player.state();
    let disabled = state.current_episode().is_none() || !state.has_previous();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            disabled: disabled,
            class: "player__button",
            aria_label: "Tocar anterior",
            onclick: move |_| player.play_previous(),
            Icon { name: "prev".to_string(), class: "icon".to_string() }
        }
    }
}

/// Play/Pause button
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerController>();
    let state = player.state();
    let playing = state.is_playing();

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            disabled: state.current_episode().is_none(),
            class: "player__button player__button--play",
            aria_label: if playing { "Pausar" } else { "Tocar" },
            onclick: move |_| player.toggle_play(),
            if playing {
                Icon { name: "pause".to_string(), class: "icon".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "icon".to_string() }
            }
        }
    }
}

/// Next button
#[component]
pub(super) fn NextButton() -> Element {
    let player = use_context::<PlayerController>();
    let state = player.state();
    let disabled = state.current_episode().is_none() || !state.has_next();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            disabled: disabled,
            class: "player__button",
            aria_label: "Tocar próxima",
            onclick: move |_| player.play_next(),
            Icon { name: "next".to_string(), class: "icon".to_string() }
        }
    }
}

/// Loop button - repeat the current episode
#[component]
pub(super) fn LoopButton() -> Element {
    let player = use_context::<PlayerController>();
    let state = player.state();

    rsx! {
        button {
            id: "loop-btn",
            r#type: "button",
            disabled: state.current_episode().is_none(),
            class: if state.is_looping() { "player__button player__button--active" } else { "player__button" },
            aria_label: "Repetir",
            onclick: move |_| player.toggle_loop(),
            Icon { name: "repeat".to_string(), class: "icon".to_string() }
        }
    }
}
