//! ChatEngine — the orchestrator behind every chat turn.
//!
//! # Control flow
//!
//! 1. Reject an unusable message (empty input) — the one error that
//!    propagates to the caller
//! 2. Fetch the profile bundle; a store failure substitutes the placeholder
//!    bundle so the conversation proceeds with degraded personalization
//! 3. Compose the system prompt at the configured budget
//! 4. With a backend configured: one completion attempt; a
//!    `PromptTooLarge` rejection recomposes at the reduced budgets and
//!    retries; any other failure substitutes the local responder
//! 5. Without a backend: answer locally, no network at all
//!
//! The caller can always tell provenance from the reply's `source` field.

use std::sync::Arc;

use foliochat_composer::{ComposerLimits, ContextComposer};
use foliochat_config::ComposerConfig;
use foliochat_core::error::CompletionError;
use foliochat_core::{
    AssistantReply, CompletionBackend, CompletionRequest, Error, Intent, Language, ProfileBundle,
    ProfileStore, Result,
};
use tracing::{debug, info, warn};

use crate::responder::FallbackResponder;

/// The chat engine. Construct once and share (`Arc`) across sessions; every
/// invocation works on its own immutable profile snapshot.
pub struct ChatEngine {
    store: Arc<dyn ProfileStore>,
    backend: Option<Arc<dyn CompletionBackend>>,
    composer: ContextComposer,
    responder: FallbackResponder,
    max_prompt_chars: usize,
    retry_prompt_chars: Vec<usize>,
}

impl ChatEngine {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        backend: Option<Arc<dyn CompletionBackend>>,
        composer_config: &ComposerConfig,
    ) -> Self {
        Self {
            store,
            backend,
            composer: ContextComposer::new(ComposerLimits::from(composer_config)),
            responder: FallbackResponder::new(),
            max_prompt_chars: composer_config.max_prompt_chars,
            retry_prompt_chars: composer_config.retry_prompt_chars.clone(),
        }
    }

    /// Whether a remote backend is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Process one user message into a reply.
    ///
    /// The only error this returns is `Error::InvalidMessage` for empty
    /// input — a programming-contract violation by the caller. Every other
    /// failure is absorbed into a fallback reply.
    pub async fn process_message(
        &self,
        message: &str,
        language: Language,
    ) -> Result<AssistantReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::InvalidMessage("message is empty".into()));
        }

        let Some(backend) = &self.backend else {
            debug!("No completion backend configured, answering locally");
            return Ok(self.responder.respond(message, language));
        };

        let bundle = match self.store.fetch_bundle().await {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!(store = %self.store.name(), error = %e,
                    "Profile store unavailable, using placeholder profile");
                ProfileBundle::placeholder()
            }
        };

        match self.try_remote(backend.as_ref(), &bundle, message, language).await {
            Some(reply) => Ok(reply),
            None => Ok(self.responder.respond(message, language)),
        }
    }

    /// Attempt the remote completion, walking down the budget ladder on
    /// oversized-prompt rejections. `None` means "fall back locally".
    async fn try_remote(
        &self,
        backend: &dyn CompletionBackend,
        bundle: &ProfileBundle,
        message: &str,
        language: Language,
    ) -> Option<AssistantReply> {
        let budgets =
            std::iter::once(self.max_prompt_chars).chain(self.retry_prompt_chars.iter().copied());

        for budget in budgets {
            let context = self.composer.compose_for_message(bundle, message, budget);
            let request = CompletionRequest::new(context.system_prompt(), message);

            match backend.complete(request).await {
                Ok(completion) => {
                    info!(backend = %backend.name(), model = %completion.model,
                        "Remote completion succeeded");
                    return Some(AssistantReply {
                        text: completion.text,
                        suggestions: remote_suggestions(language),
                        actions: vec![],
                        source: backend.name().to_string(),
                        intent: Intent::Default,
                        confidence: 1.0,
                    });
                }
                Err(CompletionError::PromptTooLarge(reason)) => {
                    warn!(budget, reason = %reason,
                        "Prompt rejected as too large, recomposing at a smaller budget");
                    continue;
                }
                Err(e) => {
                    warn!(backend = %backend.name(), error = %e,
                        "Remote completion failed, substituting local responder");
                    return None;
                }
            }
        }

        warn!("Budget ladder exhausted, substituting local responder");
        None
    }
}

/// Generic quick replies attached to remote completions.
fn remote_suggestions(language: Language) -> Vec<String> {
    let list: &[&str] = match language {
        Language::En => &["Tell me about the projects", "What are the main skills?"],
        Language::Fr => &["Parlez-moi des projets", "Quelles sont les compétences ?"],
    };
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use foliochat_core::error::ProfileError;
    use foliochat_core::{
        Completion, ExperienceItem, Profile, ProjectItem, SkillItem, LOCAL_FALLBACK_SOURCE,
    };
    use std::sync::Mutex;

    // ── Mocks ─────────────────────────────────────────────────────────

    /// A store serving a small fixed bundle.
    struct StubStore;

    #[async_trait]
    impl ProfileStore for StubStore {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_profile(&self) -> std::result::Result<Profile, ProfileError> {
            Ok(Profile {
                name: "Alex Martin".into(),
                role: "Developer".into(),
                email: "alex@example.com".into(),
                location: "Lyon".into(),
                experience_years: 6,
                availability: "open".into(),
                bio: "Builds web platforms.".into(),
            })
        }

        async fn fetch_skills(&self) -> std::result::Result<Vec<SkillItem>, ProfileError> {
            Ok(vec![SkillItem {
                name: "React".into(),
                category: "frontend".into(),
                level: 5,
                years_experience: 4,
                description: None,
            }])
        }

        async fn fetch_experiences(&self) -> std::result::Result<Vec<ExperienceItem>, ProfileError> {
            Ok(vec![])
        }

        async fn fetch_projects(&self) -> std::result::Result<Vec<ProjectItem>, ProfileError> {
            Ok(vec![])
        }
    }

    /// A store that always fails.
    struct FailingStore;

    #[async_trait]
    impl ProfileStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_profile(&self) -> std::result::Result<Profile, ProfileError> {
            Err(ProfileError::Network("connection refused".into()))
        }

        async fn fetch_skills(&self) -> std::result::Result<Vec<SkillItem>, ProfileError> {
            Err(ProfileError::Network("connection refused".into()))
        }

        async fn fetch_experiences(&self) -> std::result::Result<Vec<ExperienceItem>, ProfileError> {
            Err(ProfileError::Network("connection refused".into()))
        }

        async fn fetch_projects(&self) -> std::result::Result<Vec<ProjectItem>, ProfileError> {
            Err(ProfileError::Network("connection refused".into()))
        }
    }

    /// A backend scripted with an ordered list of outcomes. Records the
    /// system-prompt length of every request it sees.
    struct ScriptedBackend {
        script: Mutex<Vec<std::result::Result<Completion, CompletionError>>>,
        prompt_lens: Mutex<Vec<usize>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<std::result::Result<Completion, CompletionError>>) -> Self {
            Self {
                script: Mutex::new(script),
                prompt_lens: Mutex::new(vec![]),
            }
        }

        fn succeeding(text: &str) -> Self {
            Self::new(vec![Ok(Completion {
                text: text.into(),
                model: "test-model".into(),
            })])
        }

        fn failing() -> Self {
            Self::new(vec![Err(CompletionError::Network("boom".into()))])
        }

        fn calls(&self) -> usize {
            self.prompt_lens.lock().unwrap().len()
        }

        fn prompt_lens(&self) -> Vec<usize> {
            self.prompt_lens.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<Completion, CompletionError> {
            self.prompt_lens
                .lock()
                .unwrap()
                .push(request.system_prompt.len());
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Err(CompletionError::Network("script exhausted".into()))
            } else {
                script.remove(0)
            }
        }
    }

    fn engine(
        store: Arc<dyn ProfileStore>,
        backend: Option<Arc<dyn CompletionBackend>>,
    ) -> ChatEngine {
        ChatEngine::new(store, backend, &ComposerConfig::default())
    }

    // ── Tests ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_message_is_invalid_argument() {
        let engine = engine(Arc::new(StubStore), None);
        let err = engine.process_message("   ", Language::En).await.unwrap_err();
        assert!(matches!(err, Error::InvalidMessage(_)));
    }

    #[tokio::test]
    async fn no_backend_answers_locally() {
        let engine = engine(Arc::new(StubStore), None);
        let reply = engine.process_message("hello", Language::Fr).await.unwrap();
        assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
        assert_eq!(reply.intent, Intent::Greeting);
        assert!(reply.text.starts_with("Bonjour"));
        assert!(reply.confidence >= 0.3);
        assert!(!reply.suggestions.is_empty());
    }

    #[tokio::test]
    async fn backend_success_is_tagged_with_backend_name() {
        let backend = Arc::new(ScriptedBackend::succeeding("Here is the answer"));
        let engine = engine(Arc::new(StubStore), Some(backend.clone()));

        let reply = engine
            .process_message("What skills does he have?", Language::En)
            .await
            .unwrap();
        assert_eq!(reply.source, "scripted");
        assert_eq!(reply.text, "Here is the answer");
        assert!((reply.confidence - 1.0).abs() < f32::EPSILON);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn backend_failure_substitutes_local_responder() {
        let backend = Arc::new(ScriptedBackend::failing());
        let engine = engine(Arc::new(StubStore), Some(backend.clone()));

        let reply = engine
            .process_message("What skills does he have?", Language::En)
            .await
            .unwrap();
        assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
        assert_eq!(reply.intent, Intent::Skills);
        // Exactly one remote attempt — no retry loop on ordinary failures.
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn oversized_prompt_walks_the_budget_ladder() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(CompletionError::PromptTooLarge("8192 tokens".into())),
            Err(CompletionError::PromptTooLarge("still too large".into())),
            Ok(Completion {
                text: "Fits now".into(),
                model: "test-model".into(),
            }),
        ]));
        let engine = engine(Arc::new(StubStore), Some(backend.clone()));

        let reply = engine
            .process_message("Tell me everything", Language::En)
            .await
            .unwrap();
        assert_eq!(reply.text, "Fits now");
        assert_eq!(backend.calls(), 3);

        // Each recomposition used a smaller or equal prompt.
        let lens = backend.prompt_lens();
        assert!(lens[0] >= lens[1]);
        assert!(lens[1] >= lens[2]);
    }

    #[tokio::test]
    async fn exhausted_ladder_falls_back_locally() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(CompletionError::PromptTooLarge("too large".into())),
            Err(CompletionError::PromptTooLarge("too large".into())),
            Err(CompletionError::PromptTooLarge("too large".into())),
        ]));
        let engine = engine(Arc::new(StubStore), Some(backend.clone()));

        let reply = engine
            .process_message("Tell me everything", Language::En)
            .await
            .unwrap();
        assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
        // Initial budget plus the two reduced ones.
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn store_failure_uses_placeholder_profile() {
        let backend = Arc::new(ScriptedBackend::succeeding("Degraded but alive"));
        let engine = engine(Arc::new(FailingStore), Some(backend.clone()));

        let reply = engine
            .process_message("Who are you?", Language::En)
            .await
            .unwrap();
        // The conversation proceeded despite the store being down.
        assert_eq!(reply.text, "Degraded but alive");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn store_failure_without_backend_still_answers() {
        let engine = engine(Arc::new(FailingStore), None);
        let reply = engine.process_message("hello", Language::En).await.unwrap();
        assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
        assert!(!reply.text.is_empty());
    }
}
