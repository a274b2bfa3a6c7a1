//! User-visible reply texts.
//!
//! Built once from the brand name, the human-support contact, and the FAQ
//! table's valid range. Keeping every outbound string here keeps the engine
//! and the orchestrator free of scattered literals.

use crate::faq::FaqTable;

/// All canned outbound texts, with brand and contact interpolated.
#[derive(Clone, Debug)]
pub struct ReplyCatalog {
    /// First message after an entry keyword.
    pub welcome: String,
    /// The main menu prompt, re-sent on invalid menu input.
    pub menu_prompt: String,
    /// Sent when entering the support state.
    pub support_prompt: String,
    /// Follow-up sent after every successful AI answer.
    pub support_followup: String,
    /// Re-prompt for questions below the minimum length.
    pub too_short: String,
    /// Sent when the gateway returns a blank answer.
    pub empty_answer: String,
    /// Sent on gateway failure or timeout; names the human contact.
    pub apology: String,
    /// Sent before an unrecognized menu choice re-prompt.
    pub invalid_option: String,
    /// Re-prompt for an unknown FAQ code, naming the valid range.
    pub choose_valid: String,
    /// Invitation for another code after a FAQ answer.
    pub faq_followup: String,
    /// Farewell reply; the session is destroyed after sending it.
    pub closing: String,
}

impl ReplyCatalog {
    /// Build the catalog for a brand, support contact, and FAQ table.
    pub fn new(brand: &str, support_contact: &str, faq: &FaqTable) -> Self {
        Self {
            welcome: format!(
                "🙌 ¡Bienvenido al asistente de *{}*! Estoy aquí para ayudarte.",
                brand
            ),
            menu_prompt: "Elige una opción:\n\
                          1️⃣ Soporte con nuestro asistente\n\
                          2️⃣ Preguntas frecuentes\n\n\
                          Escribe *menu* en cualquier momento para volver aquí."
                .to_string(),
            support_prompt: "✍️ Escribe tu consulta y te respondo enseguida.".to_string(),
            support_followup: "¿Tienes otra duda?".to_string(),
            too_short: "✍️ Cuéntame un poco más así puedo ayudarte.".to_string(),
            empty_answer: "🤔 No pude generar una respuesta. ¿Puedes reformular tu consulta?"
                .to_string(),
            apology: format!(
                "😔 Lo siento, no puedo responder en este momento. \
                 Escribe a {} y una persona del equipo te ayudará.",
                support_contact
            ),
            invalid_option: "No entendí esa opción.".to_string(),
            choose_valid: format!("Elige un número {}.", faq.valid_range_text()),
            faq_followup: "¿Otra pregunta? Responde con el número, o escribe *menu*.".to_string(),
            closing: format!(
                "👋 ¡Gracias por contactarte con {}! Que tengas un excelente día.",
                brand
            ),
        }
    }
}
