//! Prompt template for gateway calls.
//!
//! A static preamble is prefixed to every user question. The preamble can
//! be loaded from a text file; when the file is absent the embedded
//! default is used.

use std::path::Path;

use tracing::warn;

/// The preamble shipped with the binary.
const DEFAULT_PREAMBLE: &str = "Eres el asistente virtual de una empresa de servicios. \
Responde en español, de forma breve, amable y concreta. \
Si no sabes la respuesta, dilo y sugiere contactar a una persona del equipo.";

/// Static text block prefixed to every answer-gateway call.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    preamble: String,
}

impl PromptTemplate {
    /// Use the embedded default preamble.
    pub fn embedded() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
        }
    }

    /// Load the preamble from a file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let preamble = std::fs::read_to_string(path)?;
        Ok(Self {
            preamble: preamble.trim().to_string(),
        })
    }

    /// Load from the configured path, falling back to the embedded default
    /// when the path is empty or unreadable.
    pub fn load(path: &str) -> Self {
        if path.is_empty() {
            return Self::embedded();
        }
        match Self::from_file(Path::new(path)) {
            Ok(template) => template,
            Err(e) => {
                warn!(path, error = %e, "prompt file unreadable, using embedded preamble");
                Self::embedded()
            }
        }
    }

    /// Render the full prompt for one user question.
    pub fn render(&self, user_message: &str) -> String {
        format!(
            "{}\nEl usuario pregunta: {}\nResponde de forma breve y útil.",
            self.preamble, user_message
        )
    }
}
