use serde::{Deserialize, Serialize};

use crate::animation::pose::Pose;
use crate::errors::{MarionetteError, Result};

const MAX_SCAN_OFFSET: usize = 3;

/// A timestamped pose sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub pose: Pose,
    pub timestamp: f32,
}

impl Keyframe {
    #[must_use]
    pub const fn new(timestamp: f32, pose: Pose) -> Self {
        Self { pose, timestamp }
    }
}

/// Where a query time falls relative to the keyframes of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyframeSpan {
    /// Before the first keyframe: clamps to the first pose.
    BeforeStart,
    /// Inside `[keyframes[prev].timestamp, keyframes[next].timestamp)`.
    Between { prev: usize, next: usize, alpha: f32 },
    /// At or after the last keyframe: clamps to the last pose.
    AfterEnd,
}

/// Remembers the interval found by the previous lookup.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    pub fn reset(&mut self) {
        self.last_index = 0;
    }
}

/// Ordered keyframes plus the authoritative loop boundary.
///
/// `duration` is independent of the last timestamp: a track may hold its
/// final pose for a while (`duration > last`) or be cut short
/// (`duration < last`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    keyframes: Vec<Keyframe>,
    duration: f32,
}

impl KeyframeTrack {
    pub fn new(keyframes: Vec<Keyframe>, duration: f32) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MarionetteError::InvalidDuration(duration));
        }

        let mut previous = 0.0_f32;
        for (index, keyframe) in keyframes.iter().enumerate() {
            let t = keyframe.timestamp;
            if !t.is_finite() {
                return Err(MarionetteError::InvalidKeyframes {
                    index,
                    reason: "timestamp is not finite",
                });
            }
            if t < 0.0 {
                return Err(MarionetteError::InvalidKeyframes {
                    index,
                    reason: "timestamp is negative",
                });
            }
            if t < previous {
                return Err(MarionetteError::InvalidKeyframes {
                    index,
                    reason: "timestamps must be non-decreasing",
                });
            }
            previous = t;
        }

        Ok(Self {
            keyframes,
            duration,
        })
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Interpolation needs a bracketing pair.
    #[inline]
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.keyframes.len() >= 2
    }

    /// Locates `time` among the keyframes with a binary search.
    #[must_use]
    pub fn locate(&self, time: f32) -> KeyframeSpan {
        // First index whose timestamp is strictly greater than `time`.
        let next = self.keyframes.partition_point(|k| k.timestamp <= time);
        self.span_for_next(next, time)
    }

    pub fn sample(&self, time: f32) -> Result<Pose> {
        self.ensure_playable()?;
        Ok(self.pose_for_span(self.locate(time)))
    }

    /// Same result as [`sample`](Self::sample), reusing the interval found by
    /// the previous call when playback moves forward in small steps.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Result<Pose> {
        self.ensure_playable()?;

        let len = self.keyframes.len();
        let i = cursor.last_index.min(len - 2);

        let mut found = None;
        if time >= self.keyframes[i].timestamp {
            for idx in i..(i + MAX_SCAN_OFFSET).min(len - 1) {
                if time < self.keyframes[idx + 1].timestamp {
                    found = Some(idx + 1);
                    break;
                }
            }
        }

        let next = found.unwrap_or_else(|| self.keyframes.partition_point(|k| k.timestamp <= time));
        cursor.last_index = next.saturating_sub(1).min(len - 2);

        Ok(self.pose_for_span(self.span_for_next(next, time)))
    }

    fn ensure_playable(&self) -> Result<()> {
        if self.is_playable() {
            Ok(())
        } else {
            Err(MarionetteError::NotPlayable {
                keyframes: self.keyframes.len(),
            })
        }
    }

    fn span_for_next(&self, next: usize, time: f32) -> KeyframeSpan {
        if next == 0 {
            return KeyframeSpan::BeforeStart;
        }
        if next >= self.keyframes.len() {
            return KeyframeSpan::AfterEnd;
        }

        let prev = next - 1;
        let t0 = self.keyframes[prev].timestamp;
        let t1 = self.keyframes[next].timestamp;
        // t0 <= time < t1, so the span is never zero-width here.
        let alpha = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
        KeyframeSpan::Between { prev, next, alpha }
    }

    fn pose_for_span(&self, span: KeyframeSpan) -> Pose {
        match span {
            KeyframeSpan::Between { prev, next, alpha } => {
                self.keyframes[prev].pose.lerp(&self.keyframes[next].pose, alpha)
            }
            KeyframeSpan::BeforeStart => {
                log::trace!("sample before first keyframe, clamping");
                self.keyframes[0].pose
            }
            KeyframeSpan::AfterEnd => {
                log::trace!("sample at or past last keyframe, clamping");
                self.keyframes[self.keyframes.len() - 1].pose
            }
        }
    }
}

/// Incremental construction of a [`KeyframeTrack`].
///
/// The duration has no implicit default; `build` fails until one is given.
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    keyframes: Vec<Keyframe>,
    duration: Option<f32>,
}

impl TrackBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keyframe(mut self, timestamp: f32, pose: Pose) -> Self {
        self.keyframes.push(Keyframe::new(timestamp, pose));
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn build(self) -> Result<KeyframeTrack> {
        let duration = self.duration.ok_or(MarionetteError::MissingDuration)?;
        KeyframeTrack::new(self.keyframes, duration)
    }
}
