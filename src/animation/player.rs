use serde::{Deserialize, Serialize};

use crate::animation::pose::Pose;
use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};

/// How an actor's animation gets (re)started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationMode {
    /// Starts on the rising edge of the actor's trigger key.
    #[default]
    Triggered,
    /// Restarts itself whenever it is idle, looping forever.
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Result of one [`AnimationPlayer::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerTick {
    /// The player is not running.
    Idle,
    /// Interpolated pose for the new elapsed time.
    Pose(Pose),
    /// Elapsed time crossed the track duration on this step; the player is
    /// idle again.
    Completed,
}

/// Time cursor over a [`KeyframeTrack`].
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    elapsed: f32,
    state: PlaybackState,
    cursor: KeyframeCursor,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Idle → Playing. Tracks without a bracketing pair are silently refused.
    pub fn try_start(&mut self, track: &KeyframeTrack) -> bool {
        if self.is_playing() {
            return true;
        }
        if !track.is_playable() {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// Core logic: advance time and sample.
    pub fn advance(&mut self, dt: f32, track: &KeyframeTrack) -> PlayerTick {
        if !self.is_playing() {
            return PlayerTick::Idle;
        }

        self.elapsed += dt;

        let duration = track.duration();
        if self.elapsed > duration {
            self.elapsed -= duration;
            self.state = PlaybackState::Idle;
            return PlayerTick::Completed;
        }

        match track.sample_with_cursor(self.elapsed, &mut self.cursor) {
            Ok(pose) => PlayerTick::Pose(pose),
            Err(err) => {
                // Only reachable if the track was swapped for an unplayable one mid-run.
                log::warn!("stopping playback: {err}");
                self.state = PlaybackState::Idle;
                PlayerTick::Idle
            }
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.state = PlaybackState::Idle;
        self.cursor.reset();
    }
}
