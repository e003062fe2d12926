//! Drag / idle state machine.
//!
//! Tracks whether the camera control is being handled and debounces the
//! return to idle after a drag ends. Time is always passed in by the caller,
//! so the machine never reads a clock itself.

use crate::constants::IDLE_DELAY;
use std::time::Duration;

/// Identifies one armed cooldown. Re-arming replaces the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Dragging,
    Cooldown { deadline: Duration, timer: TimerHandle },
}

/// Side effects requested by a drag-start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragStartEffect {
    pub play_narration: bool,
    pub cancelled_cooldown: bool,
}

#[derive(Clone, Debug)]
pub struct Interaction {
    phase: InteractionPhase,
    idle_delay: Duration,
    narration_played: bool,
    next_timer: u64,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(IDLE_DELAY)
    }
}

impl Interaction {
    pub fn new(idle_delay: Duration) -> Self {
        Self {
            phase: InteractionPhase::Idle,
            idle_delay,
            narration_played: false,
            next_timer: 0,
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn narration_played(&self) -> bool {
        self.narration_played
    }

    pub fn drag_start(&mut self, now: Duration, asset_ready: bool) -> DragStartEffect {
        let cancelled_cooldown = match self.phase {
            InteractionPhase::Cooldown { deadline, .. } => now < deadline,
            _ => false,
        };
        if cancelled_cooldown {
            log::debug!("[interaction] drag restarted during cooldown");
        }
        self.phase = InteractionPhase::Dragging;

        let play_narration = asset_ready && !self.narration_played;
        if play_narration {
            self.narration_played = true;
            log::info!("[interaction] first drag after load; narration requested");
        }
        DragStartEffect {
            play_narration,
            cancelled_cooldown,
        }
    }

    /// Arms the cooldown. Returns the new timer handle, or `None` when no
    /// drag was in progress.
    pub fn drag_end(&mut self, now: Duration) -> Option<TimerHandle> {
        self.poll(now);
        if self.phase == InteractionPhase::Idle {
            return None;
        }
        let timer = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.phase = InteractionPhase::Cooldown {
            deadline: now + self.idle_delay,
            timer,
        };
        log::debug!("[interaction] drag ended; cooldown {:?}", self.idle_delay);
        Some(timer)
    }

    /// Expires an elapsed cooldown. Returns true when the machine went idle.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.phase {
            InteractionPhase::Cooldown { deadline, .. } if now >= deadline => {
                self.phase = InteractionPhase::Idle;
                log::debug!("[interaction] idle");
                true
            }
            _ => false,
        }
    }

    /// True while dragging and for the whole cooldown window after it.
    pub fn is_controlled(&self, now: Duration) -> bool {
        match self.phase {
            InteractionPhase::Idle => false,
            InteractionPhase::Dragging => true,
            InteractionPhase::Cooldown { deadline, .. } => now < deadline,
        }
    }
}
