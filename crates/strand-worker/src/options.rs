#[derive(Clone, Debug)]
pub struct GenerationOptions {
    /// Context length the default token budget is derived from.
    pub max_seq_len: usize,
    /// Repeat-penalty window passed to the engine.
    pub repeat_last_n: usize,
    /// Token that ends generation.
    pub eos_token: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_seq_len: 2048,
            repeat_last_n: 64,
            eos_token: "<|endoftext|>".to_owned(),
        }
    }
}

impl GenerationOptions {
    #[must_use]
    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    #[must_use]
    pub fn with_repeat_last_n(mut self, n: usize) -> Self {
        self.repeat_last_n = n;
        self
    }

    #[must_use]
    pub fn with_eos_token(mut self, token: impl Into<String>) -> Self {
        self.eos_token = token.into();
        self
    }

    /// Tokens to generate: the caller's limit, else what is left of the
    /// context after the prompt (prompt length counted in characters).
    #[must_use]
    pub fn token_budget(&self, explicit: Option<usize>, prompt: &str) -> usize {
        explicit.unwrap_or_else(|| {
            self.max_seq_len
                .saturating_sub(prompt.chars().count())
                .saturating_sub(1)
        })
    }
}
