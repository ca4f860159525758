use strand_events::StatusEvent;
use strand_platform::time::{Instant, elapsed_millis};

/// Lifecycle of one generation request.
///
/// `Completed`, `Aborted` and `Errored` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Initializing,
    Generating,
    Completed,
    Aborted,
    Errored,
}

impl LoopState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Aborted | Self::Errored)
    }
}

/// Text accumulated by one generation.
#[derive(Clone, Debug)]
pub struct GenerationState {
    prompt: String,
    sentence: String,
    token_count: usize,
    token_budget: usize,
    started: Instant,
}

impl GenerationState {
    /// Starts the clock; `first_token` comes from prompt initialization and
    /// does not count against the budget.
    #[must_use]
    pub fn new(prompt: String, first_token: String, token_budget: usize) -> Self {
        Self {
            prompt,
            sentence: first_token,
            token_count: 0,
            token_budget,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn has_budget(&self) -> bool {
        self.token_count < self.token_budget
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Prompt followed by everything generated so far.
    #[must_use]
    pub fn output(&self) -> String {
        format!("{}{}", self.prompt, self.sentence)
    }

    /// Appends `token` and returns the matching `generating` event.
    pub fn push(&mut self, token: String) -> StatusEvent {
        self.sentence.push_str(&token);
        self.token_count += 1;
        let total_time = elapsed_millis(self.started);
        StatusEvent::Generating {
            message: "Generating token".to_owned(),
            sentence: self.sentence.clone(),
            token,
            total_time,
            tokens_sec: tokens_per_sec(self.token_count, total_time),
            prompt: self.prompt.clone(),
        }
    }
}

#[expect(clippy::cast_precision_loss, reason = "rate for display")]
fn tokens_per_sec(count: usize, elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 {
        count as f64 / elapsed_ms * 1000.0
    } else {
        0.0
    }
}
