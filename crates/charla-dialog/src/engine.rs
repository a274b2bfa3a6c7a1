//! The conversation state machine.
//!
//! `turn` is a pure decision function over (current state, inbound text):
//! it returns what to reply, which state to move to, and whether the
//! session ends. Global commands are checked before state-specific
//! handling in every active state.

use charla_core::ChatState;

use crate::classifier::{CommandClassifier, GlobalCommand};
use crate::faq::FaqTable;
use crate::replies::ReplyCatalog;
use crate::types::TurnOutcome;

/// Menu selector for AI support.
const MENU_SUPPORT: &str = "1";
/// Menu selector for the FAQ.
const MENU_FAQ: &str = "2";

/// Pure dispatcher for one conversational turn.
pub struct DialogEngine {
    classifier: CommandClassifier,
    faq: FaqTable,
    replies: ReplyCatalog,
    /// Minimum characters a support question needs to reach the gateway.
    min_question_chars: usize,
}

impl DialogEngine {
    pub fn new(
        classifier: CommandClassifier,
        faq: FaqTable,
        replies: ReplyCatalog,
        min_question_chars: usize,
    ) -> Self {
        Self {
            classifier,
            faq,
            replies,
            min_question_chars,
        }
    }

    /// The canned reply texts, shared with the orchestrator for gateway
    /// result composition.
    pub fn replies(&self) -> &ReplyCatalog {
        &self.replies
    }

    /// Decide the outcome of one inbound message.
    ///
    /// `state` is `None` when the user has no session (the closed state).
    pub fn turn(&self, state: Option<ChatState>, body: &str) -> TurnOutcome {
        let text = body.trim();

        let Some(current) = state else {
            // Closed: the assistant must not speak unless addressed.
            if self.classifier.is_entry(text) {
                return TurnOutcome::enter(
                    ChatState::Menu,
                    vec![self.replies.welcome.clone(), self.replies.menu_prompt.clone()],
                );
            }
            return TurnOutcome::silent();
        };

        // Global commands win over state-specific handling.
        match self.classifier.classify(text) {
            Some(GlobalCommand::Farewell) => {
                return TurnOutcome::close(self.replies.closing.clone());
            }
            Some(GlobalCommand::Menu) => {
                return TurnOutcome::enter(ChatState::Menu, vec![self.replies.menu_prompt.clone()]);
            }
            None => {}
        }

        match current {
            ChatState::Menu => self.menu_turn(text),
            ChatState::Support => self.support_turn(text),
            ChatState::Faq => self.faq_turn(text),
        }
    }

    /// MENU: pick a branch, or re-prompt on anything else.
    fn menu_turn(&self, text: &str) -> TurnOutcome {
        match text {
            MENU_SUPPORT => TurnOutcome::enter(
                ChatState::Support,
                vec![self.replies.support_prompt.clone()],
            ),
            MENU_FAQ => TurnOutcome::enter(ChatState::Faq, vec![self.faq.menu_text()]),
            _ => TurnOutcome::stay(vec![
                self.replies.invalid_option.clone(),
                self.replies.menu_prompt.clone(),
            ]),
        }
    }

    /// SUPPORT: validate, then hand the question to the orchestrator for
    /// the gateway call.
    fn support_turn(&self, text: &str) -> TurnOutcome {
        if text.chars().count() < self.min_question_chars {
            return TurnOutcome::stay(vec![self.replies.too_short.clone()]);
        }
        TurnOutcome::forward(text.to_string())
    }

    /// FAQ: numeric code lookup; unknown codes re-prompt in place.
    fn faq_turn(&self, text: &str) -> TurnOutcome {
        match self.faq.lookup_text(text) {
            Some(answer) => TurnOutcome::stay(vec![
                answer.to_string(),
                self.replies.faq_followup.clone(),
            ]),
            None => TurnOutcome::stay(vec![self.replies.choose_valid.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_core::config::{FaqConfig, VocabConfig};

    fn engine() -> DialogEngine {
        let vocab = VocabConfig::default();
        let faq_config = FaqConfig::default();
        let classifier = CommandClassifier::new(&vocab);
        let faq = FaqTable::new(&faq_config);
        let replies = ReplyCatalog::new("Charla", "soporte@charla.example", &faq);
        DialogEngine::new(classifier, FaqTable::new(&faq_config), replies, 3)
    }

    // ---- closed state ----

    #[test]
    fn test_closed_entry_keyword_opens_menu() {
        let e = engine();
        let out = e.turn(None, "hola");
        assert_eq!(out.next_state, Some(ChatState::Menu));
        assert_eq!(out.replies.len(), 2);
        assert!(out.replies[0].contains("Bienvenido"));
        assert!(!out.terminate);
    }

    #[test]
    fn test_closed_other_text_is_ignored() {
        let e = engine();
        let out = e.turn(None, "qué hora es");
        assert_eq!(out, TurnOutcome::silent());
    }

    #[test]
    fn test_closed_farewell_is_ignored() {
        let e = engine();
        // No session: even a farewell must not produce a reply.
        let out = e.turn(None, "gracias");
        assert_eq!(out, TurnOutcome::silent());
    }

    // ---- global commands ----

    #[test]
    fn test_farewell_closes_from_every_state() {
        let e = engine();
        for state in [ChatState::Menu, ChatState::Support, ChatState::Faq] {
            let out = e.turn(Some(state), "muchas gracias");
            assert!(out.terminate, "farewell must close from {:?}", state);
            assert_eq!(out.replies.len(), 1);
            assert!(out.replies[0].contains("Gracias por contactarte"));
        }
    }

    #[test]
    fn test_menu_word_returns_to_menu_without_closing() {
        let e = engine();
        for state in [ChatState::Support, ChatState::Faq] {
            let out = e.turn(Some(state), "menu");
            assert_eq!(out.next_state, Some(ChatState::Menu));
            assert!(!out.terminate, "menu must preserve the session");
        }
    }

    #[test]
    fn test_global_command_checked_before_state_logic() {
        let e = engine();
        // In SUPPORT, "gracias" must close, not go to the gateway.
        let out = e.turn(Some(ChatState::Support), "gracias");
        assert!(out.terminate);
        assert!(out.forward_query.is_none());
    }

    // ---- menu state ----

    #[test]
    fn test_menu_selector_one_enters_support() {
        let e = engine();
        let out = e.turn(Some(ChatState::Menu), "1");
        assert_eq!(out.next_state, Some(ChatState::Support));
        assert!(out.replies[0].contains("Escribe tu consulta"));
    }

    #[test]
    fn test_menu_selector_two_enters_faq() {
        let e = engine();
        let out = e.turn(Some(ChatState::Menu), "2");
        assert_eq!(out.next_state, Some(ChatState::Faq));
        assert!(out.replies[0].contains("Preguntas frecuentes"));
    }

    #[test]
    fn test_menu_invalid_choice_reprompts_in_place() {
        let e = engine();
        let out = e.turn(Some(ChatState::Menu), "9");
        assert_eq!(out.next_state, None);
        assert!(!out.terminate);
        assert_eq!(out.replies.len(), 2);
        assert!(out.replies[0].contains("No entendí"));
    }

    #[test]
    fn test_menu_selector_tolerates_whitespace() {
        let e = engine();
        let out = e.turn(Some(ChatState::Menu), "  1  ");
        assert_eq!(out.next_state, Some(ChatState::Support));
    }

    // ---- support state ----

    #[test]
    fn test_support_forwards_valid_question() {
        let e = engine();
        let out = e.turn(Some(ChatState::Support), "dónde se guardan mis datos");
        assert_eq!(out.forward_query.as_deref(), Some("dónde se guardan mis datos"));
        assert_eq!(out.next_state, Some(ChatState::Support));
        assert!(out.replies.is_empty());
    }

    #[test]
    fn test_support_too_short_reprompts() {
        let e = engine();
        for text in ["", "a", "ab", "  ab  "] {
            let out = e.turn(Some(ChatState::Support), text);
            assert!(out.forward_query.is_none(), "{:?} must not reach gateway", text);
            assert_eq!(out.replies.len(), 1);
        }
    }

    #[test]
    fn test_support_three_chars_is_enough() {
        let e = engine();
        let out = e.turn(Some(ChatState::Support), "ayu");
        assert!(out.forward_query.is_some());
    }

    #[test]
    fn test_support_query_is_trimmed() {
        let e = engine();
        let out = e.turn(Some(ChatState::Support), "  cómo pago  ");
        assert_eq!(out.forward_query.as_deref(), Some("cómo pago"));
    }

    // ---- faq state ----

    #[test]
    fn test_faq_known_code_answers_and_stays() {
        let e = engine();
        let out = e.turn(Some(ChatState::Faq), "1");
        assert_eq!(out.next_state, None);
        assert!(!out.terminate);
        assert_eq!(out.replies.len(), 2);
        assert!(out.replies[1].contains("Otra pregunta"));
    }

    #[test]
    fn test_faq_unknown_code_reprompts() {
        let e = engine();
        let out = e.turn(Some(ChatState::Faq), "9");
        assert_eq!(out.replies, vec!["Elige un número del 1 al 6.".to_string()]);
        assert_eq!(out.next_state, None);
        assert!(!out.terminate);
    }

    #[test]
    fn test_faq_non_numeric_reprompts() {
        let e = engine();
        let out = e.turn(Some(ChatState::Faq), "horario");
        assert_eq!(out.replies, vec!["Elige un número del 1 al 6.".to_string()]);
    }

    #[test]
    fn test_faq_lookup_never_mutates_table() {
        let e = engine();
        e.turn(Some(ChatState::Faq), "9");
        e.turn(Some(ChatState::Faq), "9");
        // The same unknown code keeps yielding the same re-prompt.
        let out = e.turn(Some(ChatState::Faq), "9");
        assert_eq!(out.replies, vec!["Elige un número del 1 al 6.".to_string()]);
        // And known codes still answer.
        let out = e.turn(Some(ChatState::Faq), "2");
        assert_eq!(out.replies.len(), 2);
    }

    // ---- determinism ----

    #[test]
    fn test_turn_is_deterministic() {
        let e = engine();
        let a = e.turn(Some(ChatState::Faq), "3");
        let b = e.turn(Some(ChatState::Faq), "3");
        assert_eq!(a, b);
    }
}
