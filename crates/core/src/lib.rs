//! # Foliochat Core
//!
//! Domain types, traits, and error definitions for the Foliochat portfolio
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external seam is defined as a trait here: the profile store, the
//! completion backend, the translator, and the translation cache.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod category;
pub mod completion;
pub mod error;
pub mod language;
pub mod profile;
pub mod reply;
pub mod translate;

// Re-export key types at crate root for ergonomics
pub use category::Category;
pub use completion::{Completion, CompletionBackend, CompletionRequest};
pub use error::{Error, Result};
pub use language::Language;
pub use profile::{
    ExperienceItem, Profile, ProfileBundle, ProfileStore, ProjectItem, ProjectStatus, SkillItem,
};
pub use reply::{ActionKind, AssistantReply, Intent, SuggestedAction, LOCAL_FALLBACK_SOURCE};
pub use translate::{TranslationCache, Translator};
