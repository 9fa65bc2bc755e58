//! The shared playback queue: which episodes are in rotation, which one is
//! active and which playback modes are on.

use crate::api::Episode;
use rand::Rng;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("cannot play an empty episode list")]
    EmptyList,

    #[error("start index {index} is out of range for a list of {len} episodes")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What the player did once the active track finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    Advanced,
    Cleared,
}

/// Invariant: `current_episode_index` is `None` or a valid index into `episode_list`.
#[derive(Debug, Clone)]
pub struct PlaybackQueue {
    episode_list: Rc<[Episode]>,
    current_episode_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    // Bumped every time a track is (re)started, including the same index.
    selection: u64,
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self {
            episode_list: Rc::from(Vec::new()),
            current_episode_index: None,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            selection: 0,
        }
    }
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    pub fn current_episode_index(&self) -> Option<usize> {
        self.current_episode_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_episode_index
            .and_then(|index| self.episode_list.get(index))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Changes whenever the audio element has to (re)load the current track.
    pub fn selection(&self) -> u64 {
        self.selection
    }

    pub fn has_next(&self) -> bool {
        self.is_looping
            || (self.is_shuffling && !self.episode_list.is_empty())
            || self
                .current_episode_index
                .is_some_and(|index| index + 1 < self.episode_list.len())
    }

    pub fn has_previous(&self) -> bool {
        self.current_episode_index
            .is_some_and(|index| index > 0 && index - 1 < self.episode_list.len())
    }

    /// Replaces the rotation with `list` and starts playing `list[start_index]`.
    pub fn play_list(
        &mut self,
        list: impl Into<Rc<[Episode]>>,
        start_index: usize,
    ) -> Result<(), QueueError> {
        let list = list.into();
        if list.is_empty() {
            return Err(QueueError::EmptyList);
        }
        if start_index >= list.len() {
            return Err(QueueError::IndexOutOfRange {
                index: start_index,
                len: list.len(),
            });
        }

        self.start(list, start_index);
        Ok(())
    }

    /// Plays a single episode on its own.
    pub fn play(&mut self, episode: Episode) {
        self.start(Rc::from(vec![episode]), 0);
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
    }

    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn play_next(&mut self) {
        self.play_next_with(&mut rand::thread_rng());
    }

    /// Loop restarts the current track, then shuffle picks any index (the
    /// current one included), otherwise advance without wrapping.
    pub fn play_next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(index) = self.current_episode_index else {
            return;
        };

        if self.is_looping {
            self.select(index);
        } else if self.is_shuffling {
            let next = rng.gen_range(0..self.episode_list.len());
            self.select(next);
        } else if index + 1 < self.episode_list.len() {
            self.select(index + 1);
        }
    }

    pub fn play_previous(&mut self) {
        if self.has_previous() {
            if let Some(index) = self.current_episode_index {
                self.select(index - 1);
            }
        }
    }

    pub fn clear_player_state(&mut self) {
        self.episode_list = Rc::from(Vec::new());
        self.current_episode_index = None;
        self.is_playing = false;
    }

    /// End-of-track rule: move on while there is a next track, otherwise empty the player.
    pub fn finish_track(&mut self) -> TrackEnd {
        self.finish_track_with(&mut rand::thread_rng())
    }

    pub fn finish_track_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TrackEnd {
        if self.current_episode_index.is_some() && self.has_next() {
            self.play_next_with(rng);
            TrackEnd::Advanced
        } else {
            self.clear_player_state();
            TrackEnd::Cleared
        }
    }

    /// Picking the track that is already active keeps its position and only resumes it.
    fn start(&mut self, list: Rc<[Episode]>, index: usize) {
        let already_active =
            self.current_episode_index == Some(index) && *self.episode_list == *list;
        self.episode_list = list;
        if !already_active {
            self.select(index);
        }
        self.is_playing = true;
    }

    fn select(&mut self, index: usize) {
        debug_assert!(index < self.episode_list.len());
        self.current_episode_index = Some(index);
        self.selection = self.selection.wrapping_add(1);
    }
}
