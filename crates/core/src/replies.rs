//! Fixed Italian reply texts for the WhatsApp assistant.

/// Keyword that routes a message to the guided quote prompt.
pub const QUOTE_TRIGGER: &str = "preventivo";

pub const GREETING: &str =
    "Ciao! 😊 Sono il tuo assistente per i preventivi. Dimmi, di che lavoro hai bisogno? ✨";

pub const GUIDED_PROMPT: &str = "Ottima scelta! 💪 Per darti un preventivo preciso, ho bisogno di alcune info:\n1️⃣ Quante ore di lavoro pensi siano necessarie?\n2️⃣ Qual è il costo stimato dei materiali?\n3️⃣ Il lavoro è semplice, medio o complesso?";

/// Sent when the generative path fails. The user gets an apology, never an error.
pub const APOLOGY: &str =
    "Scusa, in questo momento non riesco a risponderti. Riprova tra qualche minuto. 🙏";
