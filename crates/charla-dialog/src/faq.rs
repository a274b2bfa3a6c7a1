//! Static FAQ table.
//!
//! Immutable after load: a numeric code maps to a question label and a
//! canned answer. Pure lookup, no failure mode beyond "not found".

use std::collections::HashMap;

use charla_core::config::{FaqConfig, FaqEntryConfig};

/// Immutable code → entry table loaded once at startup.
pub struct FaqTable {
    entries: HashMap<u32, FaqEntryConfig>,
    /// Codes in ascending order, for menu rendering and the re-prompt.
    codes: Vec<u32>,
}

impl FaqTable {
    /// Build the table from configuration. Later duplicates of a code win.
    pub fn new(config: &FaqConfig) -> Self {
        let mut entries = HashMap::new();
        for entry in &config.entries {
            entries.insert(entry.code, entry.clone());
        }
        let mut codes: Vec<u32> = entries.keys().copied().collect();
        codes.sort_unstable();
        Self { entries, codes }
    }

    /// Look up the answer for a code.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.entries.get(&code).map(|e| e.answer.as_str())
    }

    /// Parse raw text as a code and look it up.
    pub fn lookup_text(&self, text: &str) -> Option<&str> {
        text.trim().parse::<u32>().ok().and_then(|c| self.lookup(c))
    }

    /// Render the numbered question menu.
    pub fn menu_text(&self) -> String {
        let mut lines = vec!["📖 Preguntas frecuentes:".to_string()];
        for code in &self.codes {
            let entry = &self.entries[code];
            lines.push(format!("{}. {}", code, entry.question));
        }
        lines.push(String::new());
        lines.push("Responde con el número de tu pregunta.".to_string());
        lines.join("\n")
    }

    /// Human description of the valid code range, e.g. "del 1 al 6".
    pub fn valid_range_text(&self) -> String {
        match (self.codes.first(), self.codes.last()) {
            (Some(first), Some(last)) if self.codes.len() as u32 == last - first + 1 => {
                format!("del {} al {}", first, last)
            }
            (Some(_), Some(_)) => {
                let list: Vec<String> = self.codes.iter().map(|c| c.to_string()).collect();
                list.join(", ")
            }
            _ => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
