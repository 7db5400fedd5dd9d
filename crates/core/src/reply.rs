//! Assistant reply types — the shape handed to the UI layer.
//!
//! The same shape is produced whether the answer came from the remote
//! completion API or from the local fallback responder; only the `source`
//! field distinguishes provenance. Callers use it for observability, not
//! for behavior branching.

use serde::{Deserialize, Serialize};

/// The `source` value used when the local responder produced the reply.
pub const LOCAL_FALLBACK_SOURCE: &str = "local-fallback";

/// The conversational intent detected for a user message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Skills,
    Projects,
    Experience,
    Contact,
    Cv,
    Greeting,
    Help,
    #[default]
    Default,
}

impl Intent {
    /// All intents the responder must be able to answer.
    pub const ALL: [Intent; 8] = [
        Intent::Skills,
        Intent::Projects,
        Intent::Experience,
        Intent::Contact,
        Intent::Cv,
        Intent::Greeting,
        Intent::Help,
        Intent::Default,
    ];
}

/// A UI action the frontend can offer alongside the reply text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub kind: ActionKind,
    pub label: String,

    /// Target for the action: a section anchor, a URL, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DownloadCv,
    ScrollTo,
    OpenUrl,
}

/// A complete assistant answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    /// The answer text shown to the user.
    pub text: String,

    /// Follow-up prompts the UI can offer as quick replies.
    pub suggestions: Vec<String>,

    /// Optional UI actions (download CV, scroll to contact, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SuggestedAction>,

    /// Provenance: `"local-fallback"` or the remote backend name.
    pub source: String,

    /// The detected intent (always set by the local responder; `Default`
    /// for remote completions).
    #[serde(default)]
    pub intent: Intent,

    /// Classification confidence in [0.3, 1.0] for local replies; 1.0 for
    /// remote completions.
    pub confidence: f32,
}

impl AssistantReply {
    /// Whether this reply was produced locally rather than by the remote
    /// completion API.
    pub fn is_fallback(&self) -> bool {
        self.source == LOCAL_FALLBACK_SOURCE
    }
}
