//! Vocabulary-driven command classification.
//!
//! Global commands (farewell, menu) and entry keywords are matched against
//! configurable vocabularies, compiled once into case-insensitive
//! word-boundary alternations.

use charla_core::config::VocabConfig;
use regex::Regex;

/// A command recognized in every active state, checked before state logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalCommand {
    /// End the conversation.
    Farewell,
    /// Return to the menu, keeping the session.
    Menu,
}

/// Classifies inbound text against the configured vocabularies.
pub struct CommandClassifier {
    entry_re: Option<Regex>,
    farewell_re: Option<Regex>,
    menu_re: Option<Regex>,
}

impl CommandClassifier {
    /// Compile the vocabularies into matchers. An empty vocabulary matches
    /// nothing.
    pub fn new(vocab: &VocabConfig) -> Self {
        Self {
            entry_re: compile_vocabulary(&vocab.entry_keywords),
            farewell_re: compile_vocabulary(&vocab.farewells),
            menu_re: compile_vocabulary(&vocab.menu_words),
        }
    }

    /// Classify a message as a global command, if it is one.
    ///
    /// Farewell wins over menu when both vocabularies match.
    pub fn classify(&self, text: &str) -> Option<GlobalCommand> {
        if matches(&self.farewell_re, text) {
            return Some(GlobalCommand::Farewell);
        }
        if matches(&self.menu_re, text) {
            return Some(GlobalCommand::Menu);
        }
        None
    }

    /// Whether the message opens a conversation from the closed state.
    pub fn is_entry(&self, text: &str) -> bool {
        matches(&self.entry_re, text)
    }
}

fn matches(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

/// Build one case-insensitive word-boundary alternation from a vocabulary.
///
/// Each phrase is escaped; interior whitespace matches any run of
/// whitespace, so "muchas gracias" also matches "muchas  gracias".
fn compile_vocabulary(phrases: &[String]) -> Option<Regex> {
    let alts: Vec<String> = phrases
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            p.split_whitespace()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    if alts.is_empty() {
        return None;
    }
    // Vocabulary terms are validated words, so the built pattern is valid.
    Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alts.join("|"))).expect("invalid vocabulary regex"))
}
