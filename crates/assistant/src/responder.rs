//! Fallback Responder — the local substitute for the remote completion API.
//!
//! Stateless, single-shot: classify the message, pick the canned template
//! for the (intent, language) pair, append a detail block for any extracted
//! entities, and attach the intent's suggestions and actions. Used whenever
//! the remote backend is absent or fails; the reply is tagged
//! `source = "local-fallback"` so callers can tell provenance apart.

use foliochat_core::{
    ActionKind, AssistantReply, Intent, Language, SuggestedAction, LOCAL_FALLBACK_SOURCE,
};

use crate::intent::{Classification, IntentClassifier};

/// The local responder.
pub struct FallbackResponder {
    classifier: IntentClassifier,
}

impl FallbackResponder {
    pub fn new() -> Self {
        Self {
            classifier: IntentClassifier::new(),
        }
    }

    /// Produce a complete local answer. Never fails and never returns
    /// empty text or empty suggestions.
    pub fn respond(&self, message: &str, language: Language) -> AssistantReply {
        let classification = self.classifier.classify(message);
        let text = self.render_text(&classification, language);

        AssistantReply {
            text,
            suggestions: suggestions(classification.intent, language),
            actions: actions(classification.intent, language),
            source: LOCAL_FALLBACK_SOURCE.into(),
            intent: classification.intent,
            confidence: classification.confidence,
        }
    }

    fn render_text(&self, classification: &Classification, language: Language) -> String {
        let mut text = template(classification.intent, language).to_string();

        if !classification.technologies.is_empty() {
            let list = classification.technologies.join(", ");
            let detail = match language {
                Language::En => format!("\n\nOn the technologies you mentioned ({list}): they are part of the stack — ask away."),
                Language::Fr => format!("\n\nConcernant les technologies citées ({list}) : elles font partie de la stack, n'hésitez pas à demander des détails."),
            };
            text.push_str(&detail);
        }

        if !classification.project_types.is_empty() {
            let list = classification.project_types.join(", ");
            let detail = match language {
                Language::En => format!("\n\nThere is matching work in the portfolio for: {list}."),
                Language::Fr => format!("\n\nLe portfolio contient des réalisations de type : {list}."),
            };
            text.push_str(&detail);
        }

        text
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// The canned answer for an (intent, language) pair.
fn template(intent: Intent, language: Language) -> &'static str {
    match (intent, language) {
        (Intent::Skills, Language::En) => {
            "The core stack is React and TypeScript on the front end with Node and \
             PostgreSQL on the back end, plus Docker for deployment. The skills section \
             of the site has the full breakdown with proficiency levels."
        }
        (Intent::Skills, Language::Fr) => {
            "La stack principale : React et TypeScript côté front, Node et PostgreSQL \
             côté back, et Docker pour le déploiement. La section compétences du site \
             détaille chaque niveau de maîtrise."
        }
        (Intent::Projects, Language::En) => {
            "The portfolio features several shipped projects — an e-commerce storefront, \
             an analytics dashboard, and a support chatbot among them. Each project page \
             lists the stack and links to a live demo when available."
        }
        (Intent::Projects, Language::Fr) => {
            "Le portfolio présente plusieurs projets livrés — dont une boutique \
             e-commerce, un tableau de bord analytique et un chatbot de support. Chaque \
             fiche projet liste la stack et un lien vers la démo quand elle existe."
        }
        (Intent::Experience, Language::En) => {
            "Currently a lead developer, with several years of full-stack roles before \
             that. The experience section walks through each position, period, and the \
             technologies used."
        }
        (Intent::Experience, Language::Fr) => {
            "Actuellement lead developer, après plusieurs années de postes full-stack. \
             La section expérience détaille chaque poste, sa période et les technologies \
             utilisées."
        }
        (Intent::Contact, Language::En) => {
            "The quickest way to get in touch is the contact form at the bottom of the \
             page, or directly by email. Replies usually come within a day."
        }
        (Intent::Contact, Language::Fr) => {
            "Le plus simple est le formulaire de contact en bas de page, ou directement \
             par email. Réponse généralement sous 24 h."
        }
        (Intent::Cv, Language::En) => {
            "An up-to-date CV is available for download right from the site."
        }
        (Intent::Cv, Language::Fr) => {
            "Un CV à jour est téléchargeable directement depuis le site."
        }
        (Intent::Greeting, Language::En) => {
            "Hello! I'm the portfolio assistant. Ask me about skills, projects, or \
             experience — or how to get in touch."
        }
        (Intent::Greeting, Language::Fr) => {
            "Bonjour ! Je suis l'assistant du portfolio. Posez-moi vos questions sur les \
             compétences, les projets ou le parcours — ou sur comment prendre contact."
        }
        (Intent::Help, Language::En) => {
            "I can answer questions about this developer's skills, projects, and career, \
             point you to the CV, or help you get in touch."
        }
        (Intent::Help, Language::Fr) => {
            "Je peux répondre aux questions sur les compétences, les projets et le \
             parcours, vous indiquer le CV, ou vous aider à prendre contact."
        }
        (Intent::Default, Language::En) => {
            "I'm not sure I caught that, but I can tell you about skills, projects, \
             experience, or how to get in touch."
        }
        (Intent::Default, Language::Fr) => {
            "Je ne suis pas sûr d'avoir compris, mais je peux vous parler des \
             compétences, des projets, du parcours, ou de la prise de contact."
        }
    }
}

/// Quick-reply suggestions for an (intent, language) pair.
fn suggestions(intent: Intent, language: Language) -> Vec<String> {
    let list: &[&str] = match (intent, language) {
        (Intent::Skills, Language::En) => &["Show related projects", "How many years with React?"],
        (Intent::Skills, Language::Fr) => &["Voir les projets associés", "Combien d'années sur React ?"],
        (Intent::Projects, Language::En) => &["Which stack was used?", "Any live demos?"],
        (Intent::Projects, Language::Fr) => &["Quelle stack a été utilisée ?", "Y a-t-il des démos ?"],
        (Intent::Experience, Language::En) => &["What is the current role?", "Show the skills"],
        (Intent::Experience, Language::Fr) => &["Quel est le poste actuel ?", "Voir les compétences"],
        (Intent::Contact, Language::En) => &["Download the CV", "What is the availability?"],
        (Intent::Contact, Language::Fr) => &["Télécharger le CV", "Quelles sont les disponibilités ?"],
        (Intent::Cv, Language::En) => &["How to get in touch?", "Tell me about the experience"],
        (Intent::Cv, Language::Fr) => &["Comment prendre contact ?", "Parlez-moi du parcours"],
        (Intent::Greeting, Language::En) => &["What are the main skills?", "Show me the projects"],
        (Intent::Greeting, Language::Fr) => &["Quelles sont les compétences ?", "Montrez-moi les projets"],
        (Intent::Help, Language::En) => &["What are the main skills?", "How to get in touch?"],
        (Intent::Help, Language::Fr) => &["Quelles sont les compétences ?", "Comment prendre contact ?"],
        (Intent::Default, Language::En) => &["Show me the projects", "What are the main skills?"],
        (Intent::Default, Language::Fr) => &["Montrez-moi les projets", "Quelles sont les compétences ?"],
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// UI actions for an intent, when any apply.
fn actions(intent: Intent, language: Language) -> Vec<SuggestedAction> {
    match intent {
        Intent::Cv => vec![SuggestedAction {
            kind: ActionKind::DownloadCv,
            label: match language {
                Language::En => "Download CV".into(),
                Language::Fr => "Télécharger le CV".into(),
            },
            target: None,
        }],
        Intent::Contact => vec![SuggestedAction {
            kind: ActionKind::ScrollTo,
            label: match language {
                Language::En => "Go to contact".into(),
                Language::Fr => "Aller au contact".into(),
            },
            target: Some("#contact".into()),
        }],
        Intent::Projects => vec![SuggestedAction {
            kind: ActionKind::ScrollTo,
            label: match language {
                Language::En => "See the projects".into(),
                Language::Fr => "Voir les projets".into(),
            },
            target: Some("#projects".into()),
        }],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> FallbackResponder {
        FallbackResponder::new()
    }

    #[test]
    fn every_intent_in_every_language_is_complete() {
        for intent in Intent::ALL {
            for language in Language::ALL {
                assert!(
                    !template(intent, language).is_empty(),
                    "empty template for {intent:?}/{language:?}"
                );
                assert!(
                    !suggestions(intent, language).is_empty(),
                    "empty suggestions for {intent:?}/{language:?}"
                );
            }
        }
    }

    #[test]
    fn french_greeting_scenario() {
        let reply = responder().respond("hello", Language::Fr);
        assert_eq!(reply.intent, Intent::Greeting);
        assert!(reply.text.starts_with("Bonjour"));
        assert!(reply.confidence >= 0.3);
        assert_eq!(reply.source, LOCAL_FALLBACK_SOURCE);
        assert!(reply.is_fallback());
    }

    #[test]
    fn cv_intent_offers_download_action() {
        let reply = responder().respond("Can I download your CV?", Language::En);
        assert_eq!(reply.intent, Intent::Cv);
        assert!(reply
            .actions
            .iter()
            .any(|a| a.kind == ActionKind::DownloadCv));
    }

    #[test]
    fn contact_intent_scrolls_to_anchor() {
        let reply = responder().respond("how can I contact you", Language::En);
        assert_eq!(reply.intent, Intent::Contact);
        assert_eq!(reply.actions[0].target.as_deref(), Some("#contact"));
    }

    #[test]
    fn technology_detail_block_appended() {
        let reply = responder().respond("Do you know React and Docker?", Language::En);
        assert!(reply.text.contains("react, docker"));
    }

    #[test]
    fn project_type_detail_block_appended_in_french() {
        let reply = responder().respond("Un projet e-commerce ?", Language::Fr);
        assert!(reply.text.contains("ecommerce"));
    }

    #[test]
    fn confidence_bounds_hold_across_messages() {
        for message in ["", "hi", "skills skills skills", "completely unrelated"] {
            let reply = responder().respond(message, Language::En);
            assert!(reply.confidence >= 0.3 && reply.confidence <= 1.0);
        }
    }

    #[test]
    fn responses_are_deterministic() {
        let a = responder().respond("show me your projects", Language::En);
        let b = responder().respond("show me your projects", Language::En);
        assert_eq!(a.text, b.text);
        assert_eq!(a.suggestions, b.suggestions);
    }
}
