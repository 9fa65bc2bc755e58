use crate::api::Episode;
use crate::playback::{PlaybackQueue, TrackEnd};
use dioxus::prelude::*;
use std::rc::Rc;

/// Handle to the app's single playback queue.
///
/// Created once by the shell and handed to views through context. Every
/// mutation goes through one of the queue operations below.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerController {
    queue: Signal<PlaybackQueue>,
}

impl PlayerController {
    pub fn new(queue: Signal<PlaybackQueue>) -> Self {
        Self { queue }
    }

    /// Current queue state; subscribes the calling scope.
    pub fn state(&self) -> PlaybackQueue {
        self.queue.read().clone()
    }

    pub fn play_list(&self, list: Rc<[Episode]>, start_index: usize) {
        let mut queue = self.queue;
        let result = queue.write().play_list(list, start_index);
        if let Err(err) = result {
            tracing::error!("play_list ignored: {err}");
        }
    }

    pub fn play(&self, episode: Episode) {
        let mut queue = self.queue;
        queue.write().play(episode);
    }

    pub fn toggle_play(&self) {
        let mut queue = self.queue;
        queue.write().toggle_play();
    }

    pub fn toggle_loop(&self) {
        let mut queue = self.queue;
        queue.write().toggle_loop();
    }

    pub fn toggle_shuffle(&self) {
        let mut queue = self.queue;
        queue.write().toggle_shuffle();
    }

    /// Mirrors play/pause changes reported by the audio element.
    pub fn set_playing_state(&self, playing: bool) {
        let mut queue = self.queue;
        if queue.peek().is_playing() != playing {
            queue.write().set_playing_state(playing);
        }
    }

    pub fn play_next(&self) {
        let mut queue = self.queue;
        queue.write().play_next();
    }

    pub fn play_previous(&self) {
        let mut queue = self.queue;
        queue.write().play_previous();
    }

    pub fn clear_player_state(&self) {
        let mut queue = self.queue;
        queue.write().clear_player_state();
    }

    pub fn finish_track(&self) -> TrackEnd {
        let mut queue = self.queue;
        let outcome = queue.write().finish_track();
        tracing::debug!("track ended: {outcome:?}");
        outcome
    }
}
