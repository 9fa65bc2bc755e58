//! Audio Manager - drives the browser audio element from the playback queue,
//! outside of the player's render cycle.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::PlayerController;
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "podcastr-audio";

/// Whole seconds elapsed in the current track. Local to the player; never
/// written back into the queue.
#[derive(Clone, Copy)]
pub struct ElapsedSignal(pub Signal<u64>);

/// Initialize the global audio element once
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    rsx! {}
}

#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let player = use_context::<PlayerController>();
    let elapsed = use_context::<ElapsedSignal>().0;

    // Effects below only re-run when their slice of the queue actually changes.
    let selection = use_memo(move || {
        let state = player.state();
        state
            .current_episode()
            .map(|episode| (state.selection(), episode.url.clone()))
    });
    let is_playing = use_memo(move || player.state().is_playing());
    let is_looping = use_memo(move || player.state().is_looping());

    // Wire element events back into the queue once.
    use_hook(move || {
        let Some(audio) = get_or_create_audio_element() else {
            tracing::warn!("no audio element available, playback disabled");
            return;
        };
        let runtime = Runtime::current();

        let mut elapsed_signal = elapsed;
        let runtime_time = runtime.clone();
        let time_closure = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime_time.clone());
            if let Some(audio) = get_or_create_audio_element() {
                let seconds = audio.current_time().max(0.0).floor() as u64;
                if *elapsed_signal.peek() != seconds {
                    elapsed_signal.set(seconds);
                }
            }
        }) as Box<dyn FnMut()>);
        audio.set_ontimeupdate(Some(time_closure.as_ref().unchecked_ref()));
        time_closure.forget();

        let runtime_end = runtime.clone();
        let end_closure = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime_end.clone());
            player.finish_track();
        }) as Box<dyn FnMut()>);
        audio.set_onended(Some(end_closure.as_ref().unchecked_ref()));
        end_closure.forget();

        let runtime_play = runtime.clone();
        let play_closure = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime_play.clone());
            player.set_playing_state(true);
        }) as Box<dyn FnMut()>);
        audio.set_onplay(Some(play_closure.as_ref().unchecked_ref()));
        play_closure.forget();

        let runtime_pause = runtime.clone();
        let pause_closure = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime_pause.clone());
            player.set_playing_state(false);
        }) as Box<dyn FnMut()>);
        audio.set_onpause(Some(pause_closure.as_ref().unchecked_ref()));
        pause_closure.forget();
    });

    // Load the selected episode whenever the selection changes.
    use_effect(move || {
        let selected = selection();
        let mut elapsed = elapsed;
        elapsed.set(0);

        let Some(audio) = get_or_create_audio_element() else {
            return;
        };
        match selected {
            Some((_, url)) => {
                if audio.src() != url {
                    audio.set_src(&url);
                }
                audio.set_current_time(0.0);
                // Newly selected tracks start on their own.
                let _ = audio.play();
            }
            None => {
                if audio.has_attribute("src") {
                    let _ = audio.pause();
                    let _ = audio.remove_attribute("src");
                    audio.load();
                }
            }
        }
    });

    // Handle play/pause state changes
    use_effect(move || {
        let playing = is_playing();
        if let Some(audio) = get_or_create_audio_element() {
            if playing {
                if audio.paused() && audio.has_attribute("src") {
                    let _ = audio.play();
                }
            } else if !audio.paused() {
                let _ = audio.pause();
            }
        }
    });

    use_effect(move || {
        let looping = is_looping();
        if let Some(audio) = get_or_create_audio_element() {
            audio.set_loop(looping);
        }
    });

    rsx! {}
}

/// Seek to a specific position in the current track
#[cfg(target_arch = "wasm32")]
pub fn seek_to(position: f64) {
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_current_time(position.max(0.0));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seek_to(_position: f64) {}
