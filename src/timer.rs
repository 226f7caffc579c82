use std::time::Duration;

use crate::session::{SessionKind, SessionPolicy, SESSIONS_PER_CYCLE};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Complete timer state. The main loop owns the single live instance and
/// replaces it with whatever [`TimerEngine::update`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// Total length of the current session, in seconds.
    pub duration_secs: u32,
    /// Seconds left; never exceeds `duration_secs`.
    pub remaining_secs: u32,
    /// Whether ticks count down.
    pub running: bool,
    /// Completed work sessions since the last long break, in `0..=3`.
    pub cycle_index: u8,
    pub kind: SessionKind,
    /// Last known terminal size. Rendering only.
    pub viewport_width: u16,
    pub viewport_height: u16,
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    KeyPress(char),
    Resize { width: u16, height: u16 },
}

/// Effect requested by a transition, carried out by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Deliver another `Tick` after the given delay.
    ScheduleTick(Duration),
    /// Exit the process.
    Terminate,
}

/// Pure transition function over [`TimerState`], parameterised by the
/// session lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerEngine {
    policy: SessionPolicy,
}

impl TimerEngine {
    pub fn new(policy: SessionPolicy) -> Self {
        Self { policy }
    }

    /// Stopped, first work session of a fresh cycle.
    pub fn initial_state(&self, viewport_width: u16, viewport_height: u16) -> TimerState {
        let duration = self.policy.duration(SessionKind::Work);
        TimerState {
            duration_secs: duration,
            remaining_secs: duration,
            running: false,
            cycle_index: 0,
            kind: SessionKind::Work,
            viewport_width,
            viewport_height,
        }
    }

    /// Apply one event and return the new state plus an optional follow-up.
    pub fn update(&self, mut state: TimerState, event: Event) -> (TimerState, Option<Action>) {
        match event {
            Event::Resize { width, height } => {
                state.viewport_width = width;
                state.viewport_height = height;
                (state, None)
            }
            Event::KeyPress('s') => {
                if state.running {
                    return (state, None);
                }
                log::debug!("timer started at {}s remaining", state.remaining_secs);
                state.running = true;
                (state, Some(Action::ScheduleTick(TICK_INTERVAL)))
            }
            Event::KeyPress('p') => {
                if state.running {
                    log::debug!("timer paused at {}s remaining", state.remaining_secs);
                }
                state.running = false;
                (state, None)
            }
            Event::KeyPress('q') => (state, Some(Action::Terminate)),
            Event::KeyPress(_) => (state, None),
            Event::Tick => self.tick(state),
        }
    }

    fn tick(&self, mut state: TimerState) -> (TimerState, Option<Action>) {
        // Stale tick: paused since it was scheduled, or nothing left to count.
        if !state.running || state.remaining_secs == 0 {
            return (state, None);
        }

        state.remaining_secs -= 1;
        if state.remaining_secs == 0 {
            state = self.advance_session(state);
            state.running = true;
        }
        (state, Some(Action::ScheduleTick(TICK_INTERVAL)))
    }

    /// Move to the next session once the current countdown is exhausted.
    fn advance_session(&self, mut state: TimerState) -> TimerState {
        let next = match state.kind {
            SessionKind::Work if state.cycle_index < SESSIONS_PER_CYCLE - 1 => {
                state.cycle_index += 1;
                SessionKind::ShortBreak
            }
            SessionKind::Work => {
                state.cycle_index = 0;
                SessionKind::LongBreak
            }
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Work,
        };

        log::info!(
            "{} finished, starting {} (cycle {}/{})",
            state.kind.label(),
            next.label(),
            state.cycle_index + 1,
            SESSIONS_PER_CYCLE,
        );

        let duration = self.policy.duration(next);
        state.kind = next;
        state.duration_secs = duration;
        state.remaining_secs = duration;
        state
    }
}
