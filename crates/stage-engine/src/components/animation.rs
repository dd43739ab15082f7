//! Sprite animation: named clips over a sprite sheet grid and the playback
//! state machine that steps through them.
//!
//! Playback advances by elapsed time at each clip's own frame rate, at most
//! one frame per [`AnimationPlayer::update`] call, so a host running at any
//! tick rate sees the same frame sequence.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::types::Rect;
use crate::core::area::Area2D;
use crate::error::AnimationError;

/// Slack when comparing accumulated time against a frame interval, so that
/// float error from summing many small deltas never drops a frame.
const TIME_EPSILON: f64 = 1e-6;

/// Immutable description of one animation: a horizontal strip of
/// `frame_count` cells starting at (`column`, `row`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub row: u32,
    pub column: u32,
    pub frame_count: u32,
    /// Frames per second.
    #[serde(default = "default_frame_rate", alias = "framerate")]
    pub frame_rate: u32,
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

fn default_frame_rate() -> u32 {
    8
}

impl AnimationClip {
    /// One-shot clip at the given rate.
    pub fn new(row: u32, column: u32, frame_count: u32, frame_rate: u32) -> Self {
        Self {
            row,
            column,
            frame_count,
            frame_rate,
            looping: false,
        }
    }

    pub fn looped(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Seconds each frame stays on screen.
    pub fn frame_interval(&self) -> f64 {
        1.0 / self.frame_rate as f64
    }

    pub fn total_duration(&self) -> f64 {
        self.frame_interval() * self.frame_count as f64
    }

    /// Grid cells (column, row) of every frame, in playback order.
    pub fn frames(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.frame_count).map(move |k| (self.column + k, self.row))
    }

    /// Source rectangle of frame `k` on a sheet of `frame_size` cells.
    /// No wrap-around: cells past the sheet's last column are the caller's
    /// responsibility.
    pub fn frame_rect(&self, k: u32, frame_size: Area2D) -> Rect {
        Rect::new(
            (self.column + k) as i32 * frame_size.width,
            self.row as i32 * frame_size.height,
            frame_size.width,
            frame_size.height,
        )
    }

    fn validate(&self, name: &str) -> Result<(), AnimationError> {
        let reason = if self.frame_count == 0 {
            "frame_count must be at least 1"
        } else if self.frame_rate == 0 {
            "frame_rate must be at least 1"
        } else {
            return Ok(());
        };
        Err(AnimationError::InvalidClip {
            name: name.to_string(),
            reason,
        })
    }
}

/// Where the player is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Completed,
}

/// What subscribing a completion handler does to current playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribePolicy {
    /// Registration only.
    #[default]
    Passive,
    /// Registration marks the player completed and resets it to an idle,
    /// clip-less state.
    ResetOnSubscribe,
}

/// Completion observer. Identity is the `Rc` allocation, so registering a
/// clone of the same handler twice is deduplicated.
///
/// Handlers receive the player that completed and may call
/// [`AnimationPlayer::play`] on it.
pub type CompletionHandler = Rc<dyn Fn(&mut AnimationPlayer)>;

/// Per-sprite clip table plus one playback state machine.
pub struct AnimationPlayer {
    clips: HashMap<String, AnimationClip>,
    current: Option<String>,
    frame_index: u32,
    elapsed: f64,
    state: PlaybackState,
    completed: bool,
    handlers: Vec<CompletionHandler>,
    policy: SubscribePolicy,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new(SubscribePolicy::default())
    }
}

impl fmt::Debug for AnimationPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationPlayer")
            .field("clips", &self.clips.len())
            .field("current", &self.current)
            .field("frame_index", &self.frame_index)
            .field("state", &self.state)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl AnimationPlayer {
    pub fn new(policy: SubscribePolicy) -> Self {
        Self {
            clips: HashMap::new(),
            current: None,
            frame_index: 0,
            elapsed: 0.0,
            state: PlaybackState::Stopped,
            completed: false,
            handlers: Vec::new(),
            policy,
        }
    }

    /// Declare a named clip. Names are unique per player.
    pub fn declare_clip(&mut self, name: impl Into<String>, clip: AnimationClip) -> Result<(), AnimationError> {
        let name = name.into();
        if self.clips.contains_key(&name) {
            return Err(AnimationError::AlreadyExists(name));
        }
        clip.validate(&name)?;
        self.clips.insert(name, clip);
        Ok(())
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Start `name` from its first frame.
    ///
    /// Replaying the active clip is a no-op unless it already completed.
    pub fn play(&mut self, name: &str) -> Result<(), AnimationError> {
        if !self.clips.contains_key(name) {
            return Err(AnimationError::NotFound(name.to_string()));
        }
        if self.current.as_deref() == Some(name) && self.state != PlaybackState::Completed {
            return Ok(());
        }
        log::debug!("animation: play `{name}`");
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.completed = false;
        self.current = Some(name.to_string());
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Leave `Playing` without advancing. With `force_complete`, fires the
    /// completion signal now and ends in `Completed`.
    pub fn stop(&mut self, force_complete: bool) {
        if force_complete {
            self.state = PlaybackState::Completed;
            self.completed = true;
            self.notify_completed();
        } else if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Continue a stopped clip from where it stopped.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Stopped && self.current.is_some() {
            self.state = PlaybackState::Playing;
        }
    }

    /// Advance by `dt` seconds. Returns true if the frame index changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let Some(clip) = self.current_clip().copied() else {
            return false;
        };

        self.elapsed += dt.max(0.0) as f64;
        let interval = clip.frame_interval();
        if self.elapsed + TIME_EPSILON < interval {
            return false;
        }
        // Carry at most a partial frame so idle calls never catch up.
        self.elapsed = (self.elapsed - interval).min(interval - 2.0 * TIME_EPSILON);

        if clip.looping {
            self.frame_index = (self.frame_index + 1) % clip.frame_count;
            return true;
        }

        self.frame_index += 1;
        if self.frame_index >= clip.frame_count {
            self.frame_index = 0;
            self.elapsed = 0.0;
            self.state = PlaybackState::Completed;
            self.completed = true;
            log::debug!("animation: `{}` completed", self.current.as_deref().unwrap_or_default());
            self.notify_completed();
        }
        true
    }

    /// Register a completion handler. Returns false if this exact handler
    /// was already registered.
    pub fn on_completed(&mut self, handler: &CompletionHandler) -> bool {
        let added = if self.handlers.iter().any(|h| Rc::ptr_eq(h, handler)) {
            false
        } else {
            self.handlers.push(Rc::clone(handler));
            true
        };
        if self.policy == SubscribePolicy::ResetOnSubscribe {
            self.completed = true;
            self.reset();
        }
        added
    }

    /// Unregister a handler. Returns false if it was not registered.
    pub fn off_completed(&mut self, handler: &CompletionHandler) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !Rc::ptr_eq(h, handler));
        self.handlers.len() != before
    }

    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.current.as_deref().and_then(|name| self.clips.get(name))
    }

    /// Source rectangle of the current frame, if a clip is active.
    pub fn source_rect(&self, frame_size: Area2D) -> Option<Rect> {
        self.current_clip()
            .map(|clip| clip.frame_rect(self.frame_index, frame_size))
    }

    pub fn policy(&self) -> SubscribePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SubscribePolicy) {
        self.policy = policy;
    }

    fn reset(&mut self) {
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.current = None;
        self.state = PlaybackState::Stopped;
    }

    fn notify_completed(&mut self) {
        // Snapshot so handlers can re-enter the player.
        let handlers = self.handlers.clone();
        for handler in &handlers {
            handler(self);
        }
    }
}
