#![forbid(unsafe_code)]

use serde::{Deserialize, Deserializer, Serialize};
use strand_core::{ModelId, WeightsSource};
use url::Url;

/// Command sent by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    /// Load (or reuse) a session and generate from `prompt`.
    Start(StartRequest),
    /// Cancel the in-flight generation at its next step boundary.
    Abort,
}

impl Command {
    /// Parses one JSON message from the host.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed or unknown commands.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Payload of a `start` command.
///
/// Field names are camelCase on the wire except `temp` and `top_p`. The
/// older `weightsURL`/`modelID`/`tokenizerURL`/`configURL` spellings are
/// accepted as aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(alias = "weightsURL")]
    pub weights_source: WeightsSource,
    #[serde(alias = "modelID")]
    pub model_identifier: ModelId,
    #[serde(alias = "tokenizerURL")]
    pub tokenizer_source: Url,
    #[serde(alias = "configURL")]
    pub config_source: Url,
    #[serde(default)]
    pub quantized: bool,
    pub prompt: String,
    pub temp: f64,
    #[serde(rename = "top_p")]
    pub top_p: f64,
    pub repeat_penalty: f32,
    pub seed: u64,
    /// Explicit token budget. `0` and `null` mean "derive from the prompt".
    #[serde(
        default,
        deserialize_with = "positive_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_seq_len: Option<usize>,
}

fn positive_or_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<usize>::deserialize(deserializer)?;
    Ok(raw.filter(|n| *n > 0))
}
