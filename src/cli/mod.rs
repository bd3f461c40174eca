use crate::session::AdminGate;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for answer generation (gemini, openai, ollama)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "gemini")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API (e.g., http://localhost:11434 for Ollama)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for answer generation (e.g., gemini-2.5-flash, gpt-4o-mini)
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter defaults if None
    pub chat_model: Option<String>,

    // --- Knowledge Base ---
    /// Path to the initial knowledge-base text file.
    #[arg(long, env = "KNOWLEDGE_BASE_PATH", default_value = "data/knowledge_base.md")]
    pub knowledge_base_path: String,

    // --- Admin Gate ---
    /// Chat phrase that starts the admin-unlock flow (matched case-insensitively).
    #[arg(long, env = "ADMIN_TRIGGER", default_value = "@salonecivicai")]
    pub admin_trigger: String,

    /// Password expected on the utterance after the trigger (matched exactly).
    #[arg(long, env = "ADMIN_SECRET", default_value = "Admin@CivicAISalone")]
    pub admin_secret: String,

    /// Delay in milliseconds before the password prompt is appended.
    #[arg(long, env = "GATE_PROMPT_DELAY_MS", default_value = "500")]
    pub gate_prompt_delay_ms: u64,

    /// Delay in milliseconds simulating credential verification.
    #[arg(long, env = "GATE_VERIFY_DELAY_MS", default_value = "800")]
    pub gate_verify_delay_ms: u64,

    // --- TLS ---
    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn admin_gate(&self) -> AdminGate {
        AdminGate {
            trigger: self.admin_trigger.clone(),
            secret: self.admin_secret.clone(),
            prompt_delay: Duration::from_millis(self.gate_prompt_delay_ms),
            verify_delay: Duration::from_millis(self.gate_verify_delay_ms),
        }
    }
}
