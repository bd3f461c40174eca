use serde::Serialize;
use std::time::Duration;

/// Fixed tokens and delays for the in-chat admin unlock flow. Demo-grade by
/// design: this is a hidden door for the showcase deployment, not a
/// credential system.
#[derive(Debug, Clone)]
pub struct AdminGate {
    /// Phrase that starts the flow. Compared trimmed and case-insensitively.
    pub trigger: String,
    /// Password expected on the next utterance. Compared exactly, untrimmed.
    pub secret: String,
    /// Pause before the password prompt is appended.
    pub prompt_delay: Duration,
    /// Pause simulating credential verification.
    pub verify_delay: Duration,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self {
            trigger: "@salonecivicai".to_string(),
            secret: "Admin@CivicAISalone".to_string(),
            prompt_delay: Duration::from_millis(500),
            verify_delay: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminFlow {
    #[default]
    Idle,
    AwaitingPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Utterance was the trigger phrase; ask for the password.
    PromptPassword,
    /// Password attempt matched the secret.
    Unlock,
    /// Password attempt did not match.
    Deny,
    /// Not part of the admin flow; hand the utterance to answer generation.
    PassThrough,
}

/// One step of the admin flow. While a password is pending, any input is
/// consumed as the attempt — a second trigger phrase included; there is no
/// retry loop, the flow always falls back to `Idle` after one attempt.
pub fn advance(flow: AdminFlow, utterance: &str, gate: &AdminGate) -> (AdminFlow, GateDecision) {
    match flow {
        AdminFlow::AwaitingPassword => {
            if utterance == gate.secret {
                (AdminFlow::Idle, GateDecision::Unlock)
            } else {
                (AdminFlow::Idle, GateDecision::Deny)
            }
        }
        AdminFlow::Idle => {
            if utterance.trim().to_lowercase() == gate.trigger.to_lowercase() {
                (AdminFlow::AwaitingPassword, GateDecision::PromptPassword)
            } else {
                (AdminFlow::Idle, GateDecision::PassThrough)
            }
        }
    }
}
