//! Frame animator
//!
//! Keeps animation slots and computes the current frame of each running
//! animation from the elapsed time. Progress is fixed point with
//! [`PROGRESS_ONE`] meaning complete.

use heapless::Vec;
use inverter_hal::{AnimationCurve, AnimationId, FrameAnimation, HostError, LayerId, Rect};

/// Animation slots
pub const MAX_ANIMATIONS: usize = 4;

/// Fixed-point progress of a finished animation
pub const PROGRESS_ONE: u32 = 1 << 16;

/// Map elapsed time to curved progress in `0..=PROGRESS_ONE`
pub fn progress(curve: AnimationCurve, elapsed_ms: u32, duration_ms: u32) -> u32 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return PROGRESS_ONE;
    }

    let one = PROGRESS_ONE as u64;
    let t = elapsed_ms as u64 * one / duration_ms as u64;
    let eased = match curve {
        AnimationCurve::Linear => t,
        AnimationCurve::EaseIn => t * t / one,
        AnimationCurve::EaseOut => one - (one - t) * (one - t) / one,
        AnimationCurve::EaseInOut => {
            if t < one / 2 {
                2 * t * t / one
            } else {
                one - 2 * (one - t) * (one - t) / one
            }
        }
    };
    eased as u32
}

/// Interpolate every field of a frame
pub fn interpolate(from: &Rect, to: &Rect, progress: u32) -> Rect {
    fn lerp(a: i32, b: i32, p: u32) -> i32 {
        a + ((b - a) as i64 * p as i64 / PROGRESS_ONE as i64) as i32
    }

    let p = progress.min(PROGRESS_ONE);
    Rect::new(
        lerp(from.x as i32, to.x as i32, p) as i16,
        lerp(from.y as i32, to.y as i32, p) as i16,
        lerp(from.w as i32, to.w as i32, p) as u16,
        lerp(from.h as i32, to.h as i32, p) as u16,
    )
}

/// One frame update produced by [`Animator::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub animation: AnimationId,
    pub layer: LayerId,
    pub frame: Rect,
    /// The animation reached its end and is no longer scheduled
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    params: FrameAnimation,
    started_at: Option<u32>,
}

/// Animation slot table
#[derive(Default)]
pub struct Animator {
    slots: [Option<Slot>; MAX_ANIMATIONS],
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, params: &FrameAnimation) -> Result<AnimationId, HostError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        self.slots[index] = Some(Slot {
            params: *params,
            started_at: None,
        });
        Ok(AnimationId::new(index as u8))
    }

    pub fn params(&self, animation: AnimationId) -> Result<&FrameAnimation, HostError> {
        Ok(&self.slot(animation)?.params)
    }

    /// Start (or restart) from the `from` frame at `now_ms`
    pub fn schedule(&mut self, animation: AnimationId, now_ms: u32) -> Result<(), HostError> {
        self.slot_mut(animation)?.started_at = Some(now_ms);
        Ok(())
    }

    /// Stop; returns `true` if it was running
    pub fn unschedule(&mut self, animation: AnimationId) -> Result<bool, HostError> {
        Ok(self.slot_mut(animation)?.started_at.take().is_some())
    }

    pub fn is_scheduled(&self, animation: AnimationId) -> bool {
        self.slot(animation)
            .map(|s| s.started_at.is_some())
            .unwrap_or(false)
    }

    /// Free the slot; returns `true` if it was running
    pub fn destroy(&mut self, animation: AnimationId) -> Result<bool, HostError> {
        let slot = self
            .slots
            .get_mut(animation.raw() as usize)
            .and_then(Option::take)
            .ok_or(HostError::InvalidHandle)?;
        Ok(slot.started_at.is_some())
    }

    /// Check if any animation is running
    pub fn is_idle(&self) -> bool {
        self.slots.iter().flatten().all(|s| s.started_at.is_none())
    }

    /// Compute the current frame of every running animation
    ///
    /// Animations that reached their end are unscheduled.
    pub fn advance(&mut self, now_ms: u32) -> Vec<Step, MAX_ANIMATIONS> {
        let mut steps = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(slot) = slot else { continue };
            let Some(started_at) = slot.started_at else {
                continue;
            };

            let params = &slot.params;
            let elapsed = now_ms.wrapping_sub(started_at);
            let p = progress(params.curve, elapsed, params.duration_ms);
            let finished = p >= PROGRESS_ONE;
            if finished {
                slot.started_at = None;
            }

            // Capacity equals the slot count
            let _ = steps.push(Step {
                animation: AnimationId::new(index as u8),
                layer: params.layer,
                frame: interpolate(&params.from, &params.to, p),
                finished,
            });
        }

        steps
    }

    fn slot(&self, animation: AnimationId) -> Result<&Slot, HostError> {
        self.slots
            .get(animation.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(HostError::InvalidHandle)
    }

    fn slot_mut(&mut self, animation: AnimationId) -> Result<&mut Slot, HostError> {
        self.slots
            .get_mut(animation.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::InvalidHandle)
    }
}
