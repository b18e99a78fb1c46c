//! Keyframes and clips
//!
//! A [`Keyframe`] tweens a set of node channels to target values. A
//! [`Clip`] plays its keyframes in order and then follows its [`ClipEnd`]
//! behaviour. Clips are keyed by a caller-defined id type `K`, so a looping
//! clip simply names itself as its successor.

use crate::scene::{Channel, NodeId};

use super::easing::Easing;

/// One channel of one node driven by a keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub node: NodeId,
    pub channel: Channel,
    pub value: f32,
    /// When set, `value` is an offset from the channel's value at keyframe start.
    pub relative: bool,
}

impl Target {
    pub fn to(node: NodeId, channel: Channel, value: f32) -> Self {
        Self {
            node,
            channel,
            value,
            relative: false,
        }
    }

    pub fn by(node: NodeId, channel: Channel, offset: f32) -> Self {
        Self {
            node,
            channel,
            value: offset,
            relative: true,
        }
    }
}

/// A tween of several targets sharing one duration, delay and easing.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub targets: Vec<Target>,
    /// Seconds from start values to targets
    pub duration: f32,
    /// Seconds to wait before the tween starts (start values are read after it)
    pub delay: f32,
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            targets: Vec::new(),
            duration: duration.max(0.0),
            delay: 0.0,
            easing,
        }
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn target(mut self, node: NodeId, channel: Channel, value: f32) -> Self {
        self.targets.push(Target::to(node, channel, value));
        self
    }

    pub fn offset(mut self, node: NodeId, channel: Channel, offset: f32) -> Self {
        self.targets.push(Target::by(node, channel, offset));
        self
    }

    /// Total time this keyframe occupies.
    pub fn span(&self) -> f32 {
        self.delay + self.duration
    }
}

/// What happens when the last keyframe of a clip completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipEnd<K> {
    /// Stay on the final pose; the animator goes idle.
    Hold,
    /// Start again from the first keyframe.
    Loop,
    /// Start the named clip.
    Then(K),
}

/// Ordered keyframes plus end behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip<K> {
    pub keyframes: Vec<Keyframe>,
    pub end: ClipEnd<K>,
}

impl<K> Clip<K> {
    pub fn new(end: ClipEnd<K>) -> Self {
        Self {
            keyframes: Vec::new(),
            end,
        }
    }

    pub fn with_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }

    /// Total time of one pass through the clip.
    pub fn span(&self) -> f32 {
        self.keyframes.iter().map(Keyframe::span).sum()
    }
}
