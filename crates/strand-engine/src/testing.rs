//! Scripted engine for tests: plays back a fixed token list.

use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;

use crate::{
    EngineError, EngineFactory, EngineInputs, EngineResult, InferenceEngine, SamplingParams,
};

pub const DEFAULT_EOS: &str = "<|endoftext|>";

/// Builds [`ScriptedEngine`]s and records how it was used.
///
/// `init_with_prompt` returns the first script token, each `next_token`
/// the following one. Once the script runs out the engine returns the
/// end-of-sequence token, or repeats a filler token forever if one is set.
#[derive(Clone)]
pub struct ScriptedFactory {
    script: Arc<Vec<String>>,
    filler: Option<String>,
    step_delay: Duration,
    fail_construct: Arc<AtomicUsize>,
    fail_init: bool,
    fail_at_step: Option<usize>,
    constructions: Arc<AtomicUsize>,
    inits: Arc<AtomicUsize>,
    steps: Arc<AtomicUsize>,
    last_inputs: Arc<Mutex<Option<EngineInputs>>>,
    last_init: Arc<Mutex<Option<(String, SamplingParams)>>>,
}

impl ScriptedFactory {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Arc::new(script.into_iter().map(Into::into).collect()),
            filler: None,
            step_delay: Duration::ZERO,
            fail_construct: Arc::default(),
            fail_init: false,
            fail_at_step: None,
            constructions: Arc::default(),
            inits: Arc::default(),
            steps: Arc::default(),
            last_inputs: Arc::default(),
            last_init: Arc::default(),
        }
    }

    /// Never emits end-of-sequence: `token` repeats after the script.
    #[must_use]
    pub fn endless(mut self, token: impl Into<String>) -> Self {
        self.filler = Some(token.into());
        self
    }

    /// Each `next_token` blocks for `delay`, like real decoding would.
    #[must_use]
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// The first `times` constructions fail.
    #[must_use]
    pub fn failing_construct(self, times: usize) -> Self {
        self.fail_construct.store(times, Ordering::SeqCst);
        self
    }

    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// The `step`-th `next_token` call (0-based) fails.
    #[must_use]
    pub fn failing_at_step(mut self, step: usize) -> Self {
        self.fail_at_step = Some(step);
        self
    }

    /// Number of engines built so far.
    #[must_use]
    pub fn constructions(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.constructions)
    }

    /// Number of `init_with_prompt` calls across all engines.
    #[must_use]
    pub fn inits(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.inits)
    }

    /// Number of `next_token` calls across all engines.
    #[must_use]
    pub fn steps(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.steps)
    }

    #[must_use]
    pub fn last_inputs(&self) -> Arc<Mutex<Option<EngineInputs>>> {
        Arc::clone(&self.last_inputs)
    }

    /// Prompt and sampling parameters of the latest `init_with_prompt`.
    #[must_use]
    pub fn last_init(&self) -> Arc<Mutex<Option<(String, SamplingParams)>>> {
        Arc::clone(&self.last_init)
    }
}

impl EngineFactory for ScriptedFactory {
    type Engine = ScriptedEngine;

    fn construct(&self, inputs: EngineInputs) -> EngineResult<ScriptedEngine> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        *self.last_inputs.lock() = Some(inputs);
        let should_fail = self
            .fail_construct
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(EngineError::Construct("scripted construction failure".into()));
        }
        Ok(ScriptedEngine {
            factory: self.clone(),
            pending: VecDeque::new(),
            step: 0,
        })
    }
}

pub struct ScriptedEngine {
    factory: ScriptedFactory,
    pending: VecDeque<String>,
    step: usize,
}

impl ScriptedEngine {
    fn pop(&mut self) -> String {
        self.pending.pop_front().unwrap_or_else(|| {
            self.factory
                .filler
                .clone()
                .unwrap_or_else(|| DEFAULT_EOS.to_owned())
        })
    }
}

impl InferenceEngine for ScriptedEngine {
    fn init_with_prompt(&mut self, prompt: &str, params: &SamplingParams) -> EngineResult<String> {
        self.factory.inits.fetch_add(1, Ordering::SeqCst);
        *self.factory.last_init.lock() = Some((prompt.to_owned(), params.clone()));
        if self.factory.fail_init {
            return Err(EngineError::Init("scripted init failure".into()));
        }
        self.pending = self.factory.script.iter().cloned().collect();
        self.step = 0;
        Ok(self.pop())
    }

    fn next_token(&mut self) -> EngineResult<String> {
        let step = self.step;
        self.step += 1;
        self.factory.steps.fetch_add(1, Ordering::SeqCst);
        if !self.factory.step_delay.is_zero() {
            std::thread::sleep(self.factory.step_delay);
        }
        if self.factory.fail_at_step == Some(step) {
            return Err(EngineError::Generation(format!("scripted failure at step {step}")));
        }
        Ok(self.pop())
    }
}
