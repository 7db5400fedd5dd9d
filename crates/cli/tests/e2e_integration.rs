//! End-to-end integration tests for the Foliochat assistant backend.
//!
//! These tests exercise the full pipeline from user message to reply:
//! relevance triage, budgeted composition, the remote completion attempt,
//! and local fallback substitution.

use std::sync::Arc;

use foliochat_assistant::ChatEngine;
use foliochat_composer::{ComposerLimits, ContextComposer};
use foliochat_config::ComposerConfig;
use foliochat_core::error::CompletionError;
use foliochat_core::{
    Completion, CompletionBackend, CompletionRequest, Intent, Language, ProfileStore,
    LOCAL_FALLBACK_SOURCE,
};
use foliochat_profile::FixtureStore;

// ── Mock backend ─────────────────────────────────────────────────────────

/// A backend that returns scripted outcomes in sequence and records every
/// system prompt it receives.
struct ScriptedBackend {
    script: std::sync::Mutex<Vec<Result<Completion, CompletionError>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(script: Vec<Result<Completion, CompletionError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(script),
            prompts: std::sync::Mutex::new(vec![]),
        }
    }

    fn text(answer: &str) -> Self {
        Self::new(vec![Ok(Completion {
            text: answer.into(),
            model: "mock".into(),
        })])
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CompletionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, CompletionError> {
        self.prompts.lock().unwrap().push(request.system_prompt);
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            panic!("ScriptedBackend exhausted");
        }
        script.remove(0)
    }
}

fn engine_with(backend: Option<Arc<dyn CompletionBackend>>) -> ChatEngine {
    ChatEngine::new(
        Arc::new(FixtureStore::sample()),
        backend,
        &ComposerConfig::default(),
    )
}

// ── E2E: remote path ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_remote_answer_carries_profile_context() {
    let backend = Arc::new(ScriptedBackend::text("He has 4 years of React."));
    let engine = engine_with(Some(backend.clone()));

    let reply = engine
        .process_message("What React skills does he have?", Language::En)
        .await
        .unwrap();

    assert_eq!(reply.text, "He has 4 years of React.");
    assert_eq!(reply.source, "e2e_mock");

    // The system prompt the backend saw contains the fixed blocks and the
    // React-filtered skills section.
    let prompt = &backend.prompts()[0];
    assert!(prompt.contains("[PERSONAL]"));
    assert!(prompt.contains("[SUMMARY]"));
    assert!(prompt.contains("[SKILLS]"));
    assert!(prompt.contains("React (5/5, 4years)"));
}

#[tokio::test]
async fn e2e_oversized_prompt_recomposes_smaller() {
    let backend = Arc::new(ScriptedBackend::new(vec![
        Err(CompletionError::PromptTooLarge("too long".into())),
        Ok(Completion {
            text: "Short answer".into(),
            model: "mock".into(),
        }),
    ]));
    let engine = engine_with(Some(backend.clone()));

    let reply = engine
        .process_message("Tell me about the projects", Language::En)
        .await
        .unwrap();

    assert_eq!(reply.text, "Short answer");
    assert_eq!(backend.calls(), 2);
    let prompts = backend.prompts();
    assert!(prompts[1].len() <= prompts[0].len());
}

// ── E2E: local fallback path ─────────────────────────────────────────────

#[tokio::test]
async fn e2e_no_api_key_answers_locally_in_french() {
    let engine = engine_with(None);

    let reply = engine.process_message("hello", Language::Fr).await.unwrap();

    assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
    assert_eq!(reply.intent, Intent::Greeting);
    assert!(reply.text.starts_with("Bonjour"));
    assert!(reply.confidence >= 0.3 && reply.confidence <= 1.0);
    assert!(!reply.suggestions.is_empty());
}

#[tokio::test]
async fn e2e_remote_failure_is_invisible_to_the_user() {
    let backend = Arc::new(ScriptedBackend::new(vec![Err(
        CompletionError::Network("connection refused".into()),
    )]));
    let engine = engine_with(Some(backend));

    let reply = engine
        .process_message("What are his skills?", Language::En)
        .await
        .unwrap();

    // No error surfaced: a complete local answer instead.
    assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
    assert_eq!(reply.intent, Intent::Skills);
    assert!(!reply.text.is_empty());
    assert!(!reply.suggestions.is_empty());
}

// ── E2E: composition against the sample profile ──────────────────────────

#[tokio::test]
async fn e2e_default_ordering_composes_all_sections() {
    let store = FixtureStore::sample();
    let bundle = store.fetch_bundle().await.unwrap();
    let composer = ContextComposer::new(ComposerLimits::default());

    let context = composer.compose_for_message(&bundle, "Tell me more", 4000);
    let keys: Vec<&str> = context.sections.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["personal", "summary", "projects", "skills", "experiences"]
    );
}

#[tokio::test]
async fn e2e_budget_monotonicity_on_sample_profile() {
    let store = FixtureStore::sample();
    let bundle = store.fetch_bundle().await.unwrap();
    let composer = ContextComposer::new(ComposerLimits::default());

    let mut previous_len = 0;
    for budget in [1000, 2000, 4000, 8000] {
        let context = composer.compose_for_message(&bundle, "everything please", budget);
        let total: usize = context.sections.iter().map(|s| s.text.len()).sum();
        assert!(
            total >= previous_len,
            "budget {budget} produced less text than a smaller budget"
        );
        previous_len = total;
    }
}
