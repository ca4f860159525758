use bytes::Bytes;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use strand_events::StartRequest;

use crate::EngineResult;

/// Sampling configuration handed to the engine with the prompt.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub repeat_penalty: f32,
    /// Window of recent tokens the repeat penalty looks at.
    pub repeat_last_n: usize,
    pub seed: u64,
}

impl SamplingParams {
    #[must_use]
    pub fn from_request(request: &StartRequest, repeat_last_n: usize) -> Self {
        Self {
            temperature: request.temp,
            top_p: request.top_p,
            repeat_penalty: request.repeat_penalty,
            repeat_last_n,
            seed: request.seed,
        }
    }
}

/// A loaded model that produces text one token at a time.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait InferenceEngine: Send + 'static {
    /// Resets generation state to `prompt` and returns the first token.
    ///
    /// # Errors
    ///
    /// [`EngineError::Init`](crate::EngineError::Init) on failure.
    fn init_with_prompt(&mut self, prompt: &str, params: &SamplingParams) -> EngineResult<String>;

    /// The next token of the current generation.
    ///
    /// # Errors
    ///
    /// [`EngineError::Generation`](crate::EngineError::Generation) on failure.
    fn next_token(&mut self) -> EngineResult<String>;
}

/// Raw bytes an engine is built from.
#[derive(Clone, Debug)]
pub struct EngineInputs {
    pub weights: Bytes,
    pub tokenizer: Bytes,
    pub config: Bytes,
    pub quantized: bool,
}

/// Builds engines from downloaded inputs.
pub trait EngineFactory: Send + Sync + 'static {
    type Engine: InferenceEngine;

    /// # Errors
    ///
    /// [`EngineError::AssetDecode`](crate::EngineError::AssetDecode) for
    /// unparsable tokenizer or config bytes,
    /// [`EngineError::Construct`](crate::EngineError::Construct) otherwise.
    fn construct(&self, inputs: EngineInputs) -> EngineResult<Self::Engine>;
}
