use crate::components::{AppView, AudioController, ElapsedSignal, Header, Player, PlayerController};
use crate::playback::PlaybackQueue;
use dioxus::prelude::*;

/// Layout shared by every page: header, routed page, and the persistent player.
#[component]
pub fn AppShell() -> Element {
    // One queue for the whole session; the layout outlives page navigation.
    let queue = use_signal(PlaybackQueue::new);
    let elapsed = use_signal(|| 0u64);
    let player = PlayerController::new(queue);

    use_context_provider(|| player);
    use_context_provider(|| ElapsedSignal(elapsed));

    rsx! {
        div { class: "app-shell",
            main { class: "app-shell__main",
                Header {}
                div { class: "page-shell", Outlet::<AppView> {} }
            }

            Player {}
        }

        // Audio controller - manages playback separately from UI
        AudioController {}
    }
}
