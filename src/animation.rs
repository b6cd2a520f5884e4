//! Motion state to animation playback mapping.
//!
//! Both controllers classify their entity into a [`MotionState`]. The mapping
//! to a clip is a pure lookup, [`AnimationDirective::for_state`]; executing
//! the cross-fade belongs to whoever drives the skinned model. [`ClipMixer`]
//! models that cross-fade as plain weights so the renderer can apply them
//! directly and tests can check that a transition never pops.

use bevy::prelude::{Component, Reflect};

/// Clip played while standing still.
pub const IDLE_CLIP: &str = "wait";
/// Clip used for both walking and running.
pub const WALK_CLIP: &str = "walk";
/// One-shot wave.
pub const EMOTE_CLIP: &str = "coucou";

/// Time scale applied to the walk cycle while running.
pub const RUN_TIME_SCALE: f32 = 2.4;
/// Fade-out of the clip being replaced, in seconds.
pub const FADE_OUT_SECONDS: f32 = 0.3;
/// Fade-in of looping clips, in seconds.
pub const LOOP_BLEND_SECONDS: f32 = 0.3;
/// Fade-in of the emote, in seconds.
pub const EMOTE_BLEND_SECONDS: f32 = 0.2;

/// Locomotion classification used to select an animation.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing still.
    #[default]
    Idle,
    /// Moving at walking speed.
    Walk,
    /// Sprinting.
    Run,
    /// Playing the one-shot wave.
    Emote,
}

/// How a clip behaves when it reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once; hold the final pose when `clamp_when_finished` is set.
    Once {
        /// Hold the last frame instead of snapping back to the rest pose.
        clamp_when_finished: bool,
    },
    /// Loop forever.
    Repeat,
}

/// Playback request derived from a [`MotionState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDirective {
    /// Name of the clip to play.
    pub clip: &'static str,
    /// Whether the clip loops or plays once.
    pub loop_mode: LoopMode,
    /// Playback speed multiplier.
    pub speed: f32,
    /// Seconds for the new clip to reach full weight.
    pub blend_in: f32,
    /// Seconds for the replaced clip to fade to zero.
    pub fade_out: f32,
}

impl AnimationDirective {
    /// Maps a motion state to its playback directive.
    ///
    /// # Examples
    ///
    /// ```
    /// use promenade::animation::{AnimationDirective, LoopMode, MotionState};
    /// let run = AnimationDirective::for_state(MotionState::Run);
    /// assert_eq!(run.clip, "walk");
    /// assert!(run.speed > 1.0);
    /// let wave = AnimationDirective::for_state(MotionState::Emote);
    /// assert_eq!(wave.loop_mode, LoopMode::Once { clamp_when_finished: true });
    /// ```
    #[must_use]
    pub const fn for_state(state: MotionState) -> Self {
        match state {
            MotionState::Idle => Self::looping(IDLE_CLIP, 1.0),
            MotionState::Walk => Self::looping(WALK_CLIP, 1.0),
            MotionState::Run => Self::looping(WALK_CLIP, RUN_TIME_SCALE),
            MotionState::Emote => Self {
                clip: EMOTE_CLIP,
                loop_mode: LoopMode::Once {
                    clamp_when_finished: true,
                },
                speed: 1.0,
                blend_in: EMOTE_BLEND_SECONDS,
                fade_out: FADE_OUT_SECONDS,
            },
        }
    }

    const fn looping(clip: &'static str, speed: f32) -> Self {
        Self {
            clip,
            loop_mode: LoopMode::Repeat,
            speed,
            blend_in: LOOP_BLEND_SECONDS,
            fade_out: FADE_OUT_SECONDS,
        }
    }
}

/// Weight of one clip in the current blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWeight {
    /// Clip name.
    pub clip: &'static str,
    /// Blend weight in `[0, 1]`.
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FadingClip {
    clip: &'static str,
    weight: f32,
    fade_out: f32,
}

/// Cross-fade bookkeeping for a single animated entity.
///
/// The active clip ramps up linearly over its directive's `blend_in` while
/// every replaced clip ramps down over `fade_out`, concurrently. Switching
/// between two directives that share a clip (walk and run) only changes the
/// playback speed, so the shared cycle is never restarted.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ClipMixer {
    state: MotionState,
    directive: AnimationDirective,
    weight: f32,
    fading: Vec<FadingClip>,
}

impl Default for ClipMixer {
    fn default() -> Self {
        Self::new(MotionState::Idle)
    }
}

impl ClipMixer {
    /// Starts fully blended into the clip for `state`.
    #[must_use]
    pub const fn new(state: MotionState) -> Self {
        Self {
            state,
            directive: AnimationDirective::for_state(state),
            weight: 1.0,
            fading: Vec::new(),
        }
    }

    /// Motion state currently requested.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        self.state
    }

    /// Directive currently playing.
    #[must_use]
    pub const fn directive(&self) -> AnimationDirective {
        self.directive
    }

    /// Requests playback for `state`.
    ///
    /// Returns `true` when the request changed the motion state.
    pub fn play(&mut self, state: MotionState) -> bool {
        if state == self.state {
            return false;
        }
        let next = AnimationDirective::for_state(state);
        log::trace!("animation {:?} -> {:?} ({})", self.state, state, next.clip);
        self.state = state;

        if next.clip == self.directive.clip {
            self.directive = next;
            return true;
        }

        if self.weight > 0.0 {
            self.fading.push(FadingClip {
                clip: self.directive.clip,
                weight: self.weight,
                fade_out: next.fade_out,
            });
        }

        // A clip that is still fading out resumes from its current weight.
        self.weight = self
            .fading
            .iter()
            .position(|f| f.clip == next.clip)
            .map_or(0.0, |idx| self.fading.swap_remove(idx).weight);
        self.directive = next;
        true
    }

    /// Advances all fades by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let elapsed = dt.max(0.0);
        self.weight = ramp(self.weight, elapsed, self.directive.blend_in);
        for fading in &mut self.fading {
            fading.weight = ramp(fading.weight, -elapsed, fading.fade_out);
        }
        self.fading.retain(|f| f.weight > 0.0);
    }

    /// Current weights, active clip first.
    pub fn weights(&self) -> impl Iterator<Item = ClipWeight> + '_ {
        std::iter::once(ClipWeight {
            clip: self.directive.clip,
            weight: self.weight,
        })
        .chain(self.fading.iter().map(|f| ClipWeight {
            clip: f.clip,
            weight: f.weight,
        }))
    }

    /// Weight of `clip`, or zero when it is not part of the blend.
    #[must_use]
    pub fn weight_of(&self, clip: &str) -> f32 {
        self.weights()
            .filter(|w| w.clip == clip)
            .map(|w| w.weight)
            .sum()
    }

    /// Whether no transition is in flight.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.fading.is_empty() && self.weight >= 1.0
    }
}

/// Moves `weight` linearly by `dt / duration`, saturating in `[0, 1]`.
const fn ramp(weight: f32, dt: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if dt >= 0.0 { 1.0 } else { 0.0 };
    }
    (weight + dt / duration).clamp(0.0, 1.0)
}
