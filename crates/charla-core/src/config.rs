use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CharlaError, Result};

/// Top-level configuration for the Charla assistant.
///
/// Loaded from `charla.toml` by default. Each section corresponds to a
/// bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharlaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub vocab: VocabConfig,
    #[serde(default)]
    pub faq: FaqConfig,
}

impl CharlaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CharlaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CharlaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Brand name shown in the welcome and closing messages.
    pub brand_name: String,
    /// Human-support contact named in the apology message.
    pub support_contact: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            brand_name: "Charla".to_string(),
            support_contact: "soporte@charla.example".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Session store and janitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds of inactivity after which a session is considered stale.
    pub timeout_secs: u64,
    /// Seconds between janitor sweeps.
    pub janitor_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 600,
            janitor_interval_secs: 300,
        }
    }
}

/// Duplicate-delivery suppression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Seconds an accepted (user, text) fingerprint stays visible.
    pub window_secs: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self { window_secs: 30 }
    }
}

/// Answer gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Seconds to wait for a generated answer before giving up.
    pub timeout_secs: u64,
    /// Base URL of the chat-completions endpoint.
    pub base_url: String,
    /// Model identifier sent with each completion request.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Path to the prompt preamble text file. Empty means the embedded default.
    pub prompt_path: String,
    /// Minimum characters a support question must have to reach the gateway.
    pub min_question_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 25,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "CHARLA_API_KEY".to_string(),
            prompt_path: String::new(),
            min_question_chars: 3,
        }
    }
}

/// Command vocabularies for the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabConfig {
    /// Words that open a conversation from the closed state.
    pub entry_keywords: Vec<String>,
    /// Words that end the conversation from any active state.
    pub farewells: Vec<String>,
    /// Words that return to the menu from any active state.
    pub menu_words: Vec<String>,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            entry_keywords: vec![
                "hola".to_string(),
                "buenas".to_string(),
                "ayuda".to_string(),
                "soporte".to_string(),
                "charla".to_string(),
            ],
            farewells: vec![
                "gracias".to_string(),
                "muchas gracias".to_string(),
                "adiós".to_string(),
                "adios".to_string(),
                "hasta luego".to_string(),
                "chao".to_string(),
                "nos vemos".to_string(),
                "bye".to_string(),
                "no".to_string(),
            ],
            menu_words: vec!["menu".to_string(), "menú".to_string()],
        }
    }
}

/// A single FAQ entry: numeric code, question label, canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntryConfig {
    pub code: u32,
    pub question: String,
    pub answer: String,
}

/// Static FAQ table, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqConfig {
    pub entries: Vec<FaqEntryConfig>,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            entries: vec![
                FaqEntryConfig {
                    code: 1,
                    question: "¿Cuál es el horario de atención?".to_string(),
                    answer: "🕘 Atendemos de lunes a viernes, de 9:00 a 18:00.".to_string(),
                },
                FaqEntryConfig {
                    code: 2,
                    question: "¿Dónde están ubicados?".to_string(),
                    answer: "📍 Estamos en Av. Siempreviva 742, Buenos Aires.".to_string(),
                },
                FaqEntryConfig {
                    code: 3,
                    question: "¿Cuáles son los medios de pago?".to_string(),
                    answer: "💳 Aceptamos tarjeta, transferencia y efectivo.".to_string(),
                },
                FaqEntryConfig {
                    code: 4,
                    question: "¿Cómo agendo una cita?".to_string(),
                    answer: "📅 Escribinos tu disponibilidad y te confirmamos un turno."
                        .to_string(),
                },
                FaqEntryConfig {
                    code: 5,
                    question: "¿Qué servicios ofrecen?".to_string(),
                    answer: "🛠️ Soporte técnico, consultoría y capacitación.".to_string(),
                },
                FaqEntryConfig {
                    code: 6,
                    question: "¿Cómo contacto a una persona?".to_string(),
                    answer: "👤 Escribí a soporte@charla.example y te responden en el día."
                        .to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // ---- Defaults ----

    #[test]
    fn test_default_config_values() {
        let config = CharlaConfig::default();
        assert_eq!(config.session.timeout_secs, 600);
        assert_eq!(config.session.janitor_interval_secs, 300);
        assert_eq!(config.dedup.window_secs, 30);
        assert_eq!(config.gateway.timeout_secs, 25);
        assert_eq!(config.gateway.min_question_chars, 3);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_default_vocab_nonempty() {
        let vocab = VocabConfig::default();
        assert!(vocab.entry_keywords.contains(&"hola".to_string()));
        assert!(vocab.farewells.contains(&"gracias".to_string()));
        assert!(vocab.menu_words.contains(&"menu".to_string()));
    }

    #[test]
    fn test_default_faq_has_six_entries() {
        let faq = FaqConfig::default();
        assert_eq!(faq.entries.len(), 6);
        let codes: Vec<u32> = faq.entries.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6]);
    }

    // ---- Load / save round trip ----

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charla.toml");

        let mut config = CharlaConfig::default();
        config.session.timeout_secs = 120;
        config.general.brand_name = "Prueba".to_string();
        config.save(&path).unwrap();

        let loaded = CharlaConfig::load(&path).unwrap();
        assert_eq!(loaded.session.timeout_secs, 120);
        assert_eq!(loaded.general.brand_name, "Prueba");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(CharlaConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = CharlaConfig::load_or_default(&path);
        assert_eq!(config.session.timeout_secs, 600);
    }

    #[test]
    fn test_load_or_default_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "session = [[[").unwrap();
        let config = CharlaConfig::load_or_default(&path);
        assert_eq!(config.dedup.window_secs, 30);
    }

    // ---- Partial files use section defaults ----

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[session]\ntimeout_secs = 45\n").unwrap();

        let config = CharlaConfig::load(&path).unwrap();
        assert_eq!(config.session.timeout_secs, 45);
        // Untouched sections keep their defaults.
        assert_eq!(config.session.janitor_interval_secs, 300);
        assert_eq!(config.dedup.window_secs, 30);
        assert_eq!(config.faq.entries.len(), 6);
    }

    #[test]
    fn test_faq_entries_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("faq.toml");
        std::fs::write(
            &path,
            r#"
[[faq.entries]]
code = 1
question = "¿Hay estacionamiento?"
answer = "Sí, en el subsuelo."
"#,
        )
        .unwrap();

        let config = CharlaConfig::load(&path).unwrap();
        assert_eq!(config.faq.entries.len(), 1);
        assert_eq!(config.faq.entries[0].code, 1);
        assert_eq!(config.faq.entries[0].answer, "Sí, en el subsuelo.");
    }
}
