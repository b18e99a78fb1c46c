//! Animator
//!
//! Plays one clip at a time against a [`SceneGraph`]. Starting a clip
//! interrupts whatever was playing; there is no queue. Each keyframe reads
//! its start values from the scene when it begins (after its delay), so a
//! clip always continues smoothly from wherever an interrupted one left the
//! joints.

use std::collections::HashMap;
use std::hash::Hash;

use crate::scene::SceneGraph;

use super::clip::{Clip, ClipEnd};

/// Upper bound on keyframe transitions processed in one advance.
const MAX_STEPS_PER_ADVANCE: usize = 256;

/// Notifications produced while advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimEvent<K> {
    /// The clip reached the end of its last keyframe. Not emitted by looping clips.
    ClipFinished(K),
}

#[derive(Debug, Clone)]
struct Playback<K> {
    clip: K,
    keyframe: usize,
    /// Time spent in the current keyframe, delay included
    elapsed: f32,
    /// Channel values captured when the current keyframe's tween began
    start: Option<Vec<f32>>,
}

impl<K> Playback<K> {
    fn new(clip: K) -> Self {
        Self {
            clip,
            keyframe: 0,
            elapsed: 0.0,
            start: None,
        }
    }
}

/// Clip library plus the single in-flight playback.
#[derive(Debug, Clone)]
pub struct Animator<K> {
    library: HashMap<K, Clip<K>>,
    playback: Option<Playback<K>>,
}

impl<K: Copy + Eq + Hash> Default for Animator<K> {
    fn default() -> Self {
        Self {
            library: HashMap::new(),
            playback: None,
        }
    }
}

impl<K: Copy + Eq + Hash> Animator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a clip.
    pub fn insert(&mut self, key: K, clip: Clip<K>) {
        self.library.insert(key, clip);
    }

    pub fn clip(&self, key: K) -> Option<&Clip<K>> {
        self.library.get(&key)
    }

    /// Start `key` from its first keyframe, interrupting the current clip.
    ///
    /// Returns `false` (and stops) if the clip is unknown.
    pub fn play(&mut self, key: K) -> bool {
        if self.library.contains_key(&key) {
            self.playback = Some(Playback::new(key));
            true
        } else {
            self.playback = None;
            false
        }
    }

    /// Drop the in-flight clip. Joints keep their current values.
    pub fn stop(&mut self) {
        self.playback = None;
    }

    /// Clip currently playing, if any.
    pub fn current(&self) -> Option<K> {
        self.playback.as_ref().map(|p| p.clip)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Advance the in-flight clip by `dt` seconds, writing joint values into `scene`.
    pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) -> Vec<AnimEvent<K>> {
        let mut events = Vec::new();
        let mut remaining = dt.max(0.0);

        for _ in 0..MAX_STEPS_PER_ADVANCE {
            let Some(playback) = self.playback.as_mut() else {
                break;
            };
            let Some(clip) = self.library.get(&playback.clip) else {
                self.playback = None;
                break;
            };
            let Some(keyframe) = clip.keyframes.get(playback.keyframe) else {
                // Empty clip: finish immediately.
                let (finished, end) = (playback.clip, clip.end);
                self.finish(finished, end, &mut events);
                continue;
            };

            let time_in = playback.elapsed + remaining;
            if time_in < keyframe.delay {
                playback.elapsed = time_in;
                break;
            }

            let start = playback
                .start
                .get_or_insert_with(|| keyframe.targets.iter().map(|t| scene.get(t.node, t.channel)).collect());

            let active = time_in - keyframe.delay;
            let progress = if keyframe.duration <= 0.0 {
                1.0
            } else {
                (active / keyframe.duration).min(1.0)
            };
            let eased = keyframe.easing.apply(progress);
            for (target, &from) in keyframe.targets.iter().zip(start.iter()) {
                let to = if target.relative { from + target.value } else { target.value };
                scene.set(target.node, target.channel, from + (to - from) * eased);
            }

            if active < keyframe.duration {
                playback.elapsed = time_in;
                break;
            }

            remaining = active - keyframe.duration;
            playback.keyframe += 1;
            playback.elapsed = 0.0;
            playback.start = None;

            if playback.keyframe >= clip.keyframes.len() {
                let (finished, end) = (playback.clip, clip.end);
                self.finish(finished, end, &mut events);
            }
        }

        events
    }

    fn finish(&mut self, finished: K, end: ClipEnd<K>, events: &mut Vec<AnimEvent<K>>) {
        match end {
            ClipEnd::Hold => {
                self.playback = None;
                events.push(AnimEvent::ClipFinished(finished));
            }
            ClipEnd::Loop => {
                if let Some(playback) = self.playback.as_mut() {
                    playback.keyframe = 0;
                    playback.elapsed = 0.0;
                    playback.start = None;
                }
                if self.library.get(&finished).is_some_and(|c| c.span() <= 0.0) {
                    self.playback = None;
                }
            }
            ClipEnd::Then(next) => {
                events.push(AnimEvent::ClipFinished(finished));
                self.play(next);
            }
        }
    }
}
