//! Per-page countdown state machine for the tracker content agent.
//!
//! Caller-ticked: no internal thread or timer. The page's own once-per-second
//! callback calls [`Countdown::tick`] with the current visibility, so the
//! counter approximates foreground active time rather than wall-clock time.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Counting -> PromptShown -> (resolved) Idle
//! ```

use crate::types::message::ContentPush;

/// Seconds on a blocked site before the prompt appears.
/// Deliberately short — demo tuning, kept in one place for retuning.
pub const PROMPT_THRESHOLD_SECS: u64 = 10;

/// The warning pulse fires this many seconds before the prompt.
pub const WARNING_LEAD_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Counting time, but the page is not blocked; never prompts.
    Idle,
    /// Counting toward the prompt threshold on a blocked page.
    Counting,
    /// The overlay is up; the counter is paused.
    PromptShown,
}

/// Event surfaced by a tick, for the widget to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The widget should pulse: the prompt is seconds away.
    WarningPulse,
    /// Show the two-choice overlay.
    ShowPrompt,
}

/// The two overlay buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    TakeQuiz,
    ReturnToAssignment,
}

/// What the agent should do after a prompt choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Navigate away to the quiz page.
    OpenQuizPage,
    /// Ask the background coordinator to find-or-open an assignment site.
    RequestAssignmentRedirect,
}

/// Countdown state for one loaded page.
pub struct Countdown {
    seconds: u64,
    state: CountdownState,
    blocked: bool,
    warned: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            seconds: 0,
            state: CountdownState::Idle,
            blocked: false,
            warned: false,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Displayed seconds on the floating widget.
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Advances one second of visible time.
    ///
    /// No-op while the page is hidden or the prompt is up. On a blocked
    /// page, emits the warning pulse once at T−3s and shows the prompt at
    /// the threshold.
    pub fn tick(&mut self, visible: bool) -> Option<TickEvent> {
        if !visible || self.state == CountdownState::PromptShown {
            return None;
        }
        if self.state == CountdownState::Idle && self.blocked {
            self.state = CountdownState::Counting;
        }

        self.seconds += 1;

        if self.state != CountdownState::Counting {
            return None;
        }
        if self.seconds >= PROMPT_THRESHOLD_SECS {
            self.state = CountdownState::PromptShown;
            return Some(TickEvent::ShowPrompt);
        }
        if !self.warned && self.seconds + WARNING_LEAD_SECS >= PROMPT_THRESHOLD_SECS {
            self.warned = true;
            return Some(TickEvent::WarningPulse);
        }
        None
    }

    /// Updates the blocklist classification (from a load-complete push).
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
        match self.state {
            CountdownState::Idle if blocked => self.state = CountdownState::Counting,
            CountdownState::Counting if !blocked => self.state = CountdownState::Idle,
            _ => {}
        }
    }

    /// Applies a background `updateTimer` push: reset beats everything,
    /// otherwise the displayed time and blocked verdict are overwritten.
    pub fn apply_push(&mut self, push: &ContentPush) {
        let ContentPush::UpdateTimer {
            time,
            is_blocked_site,
            is_reset,
        } = push;

        if is_reset.unwrap_or(false) {
            self.reset();
            return;
        }
        self.seconds = time / 1000;
        if let Some(blocked) = *is_blocked_site {
            self.set_blocked(blocked);
        }
    }

    /// Resolves the overlay. Returning to the assignment zeroes the timer
    /// and re-enters Idle; taking the quiz leaves the machine behind with
    /// the page.
    pub fn choose(&mut self, choice: PromptChoice) -> PromptAction {
        match choice {
            PromptChoice::TakeQuiz => PromptAction::OpenQuizPage,
            PromptChoice::ReturnToAssignment => {
                self.reset();
                PromptAction::RequestAssignmentRedirect
            }
        }
    }

    /// Forces Idle and zeroes the displayed time, from any state.
    pub fn reset(&mut self) {
        self.seconds = 0;
        self.warned = false;
        self.state = CountdownState::Idle;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
