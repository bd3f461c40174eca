pub mod gate;

pub use gate::{AdminFlow, AdminGate, GateDecision};

use crate::models::chat::{ChatMessage, MessageAction};
use async_trait::async_trait;
use log::error;
use std::error::Error as StdError;
use tokio::time::sleep;

/// The one external capability a session depends on. The production
/// implementation lives in [`crate::agent`]; tests substitute their own.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn generate_answer(
        &self,
        history: &[ChatMessage],
        question: &str,
        context: &str,
    ) -> Result<String, Box<dyn StdError + Send + Sync>>;
}

pub const GREETING_TEXT: &str = "Hello! I am **SaloneCivic AI**. \n\nI can help you understand your rights and responsibilities under Sierra Leonean law, including the Constitution, Citizenship Act, and Cyber Security Act.\n\nAsk me questions like:\n* \"How do I become a citizen?\"\n* \"What are my rights if arrested?\"\n* \"Is cyberbullying a crime?\"";

pub const SECURITY_CHECK_TEXT: &str =
    "**Security Check**\n\nPlease enter the administrative password to proceed.";

pub const UNLOCK_TEXT: &str =
    "**Credentials Verified**\n\nAccess granted to the Knowledge Base Manager.";

pub const DENIED_TEXT: &str = "**Access Denied**\n\nIncorrect credentials provided.";

pub const ANSWER_FAILURE_TEXT: &str =
    "I'm having trouble connecting to the knowledge base right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, or a submission was already in flight.
    Ignored,
    /// The admin flow consumed the utterance (prompt, unlock or denial).
    GateHandled(GateDecision),
    /// Answer generation ran; `failed` marks the apology path.
    Answered { failed: bool },
}

/// Per-session chat controller. Owns the append-only message log, the admin
/// flow state and the busy flag; everything it does is observable as appends
/// to the log.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    flow: AdminFlow,
    busy: bool,
    gate: AdminGate,
}

impl ChatSession {
    pub fn new(gate: AdminGate) -> Self {
        Self {
            messages: Vec::new(),
            flow: AdminFlow::Idle,
            busy: false,
            gate,
        }
    }

    /// Session as served to clients, seeded with the fixed greeting.
    pub fn with_greeting(gate: AdminGate) -> Self {
        let mut session = Self::new(gate);
        session.messages.push(ChatMessage::assistant(GREETING_TEXT));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn flow(&self) -> AdminFlow {
        self.flow
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Handle one user utterance. The user message is always appended before
    /// any reply; at most one submission is in flight at a time. Failures of
    /// the answer capability never escape — they become a single error-flagged
    /// message.
    pub async fn submit(
        &mut self,
        utterance: &str,
        answers: &dyn AnswerSource,
        context: &str,
    ) -> SubmitOutcome {
        let text = utterance.trim();
        if text.is_empty() || self.busy {
            return SubmitOutcome::Ignored;
        }

        self.messages.push(ChatMessage::user(text));

        let (next_flow, decision) = gate::advance(self.flow, utterance, &self.gate);
        self.flow = next_flow;

        match decision {
            GateDecision::PromptPassword => {
                // The flow is already AwaitingPassword during this pause.
                // The serving layer holds the session for the whole call, so
                // nothing can slip in before the prompt lands.
                sleep(self.gate.prompt_delay).await;
                self.messages.push(ChatMessage::assistant(SECURITY_CHECK_TEXT));
                SubmitOutcome::GateHandled(decision)
            }
            GateDecision::Unlock | GateDecision::Deny => {
                self.busy = true;
                sleep(self.gate.verify_delay).await;
                let reply = if decision == GateDecision::Unlock {
                    ChatMessage::assistant(UNLOCK_TEXT).with_action(MessageAction::Unlock)
                } else {
                    ChatMessage::assistant(DENIED_TEXT)
                };
                self.messages.push(reply);
                self.busy = false;
                SubmitOutcome::GateHandled(decision)
            }
            GateDecision::PassThrough => {
                self.busy = true;
                // History is everything before the utterance just appended.
                let prior = self.messages.len() - 1;
                let result = answers
                    .generate_answer(&self.messages[..prior], text, context)
                    .await;
                self.busy = false;

                match result {
                    Ok(answer) => {
                        self.messages.push(ChatMessage::assistant(answer));
                        SubmitOutcome::Answered { failed: false }
                    }
                    Err(e) => {
                        error!("Answer generation failed: {}", e);
                        self.messages
                            .push(ChatMessage::assistant_error(ANSWER_FAILURE_TEXT));
                        SubmitOutcome::Answered { failed: true }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted stand-in for the LLM stack. Records what it was asked.
    struct ScriptedAnswers {
        reply: Result<String, String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(usize, String, String)>>,
    }

    impl ScriptedAnswers {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("generation unreachable".to_string()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnswerSource for ScriptedAnswers {
        async fn generate_answer(
            &self,
            history: &[ChatMessage],
            question: &str,
            context: &str,
        ) -> Result<String, Box<dyn StdError + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((
                history.len(),
                question.to_string(),
                context.to_string(),
            ));
            self.reply.clone().map_err(Into::into)
        }
    }

    fn quick_gate() -> AdminGate {
        AdminGate {
            prompt_delay: std::time::Duration::ZERO,
            verify_delay: std::time::Duration::ZERO,
            ..AdminGate::default()
        }
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_is_ignored() {
        let answers = ScriptedAnswers::ok("unused");
        let mut session = ChatSession::new(quick_gate());

        assert_eq!(session.submit("", &answers, "kb").await, SubmitOutcome::Ignored);
        assert_eq!(session.submit("   ", &answers, "kb").await, SubmitOutcome::Ignored);
        assert!(session.messages().is_empty());
        assert_eq!(answers.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_while_busy_is_a_no_op() {
        let answers = ScriptedAnswers::ok("unused");
        let mut session = ChatSession::new(quick_gate());
        session.busy = true;

        assert_eq!(
            session.submit("hello", &answers, "kb").await,
            SubmitOutcome::Ignored
        );
        assert!(session.messages().is_empty());
        assert_eq!(session.flow(), AdminFlow::Idle);
        assert_eq!(answers.call_count(), 0);
    }

    #[tokio::test]
    async fn user_message_is_appended_before_the_reply() {
        let answers = ScriptedAnswers::ok("Here is your answer.");
        let mut session = ChatSession::new(quick_gate());

        let outcome = session.submit("What is citizenship?", &answers, "kb").await;
        assert_eq!(outcome, SubmitOutcome::Answered { failed: false });

        let log = session.messages();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].role, Role::User);
        assert_eq!(log[0].text, "What is citizenship?");
        assert_eq!(log[1].role, Role::Assistant);
        assert_eq!(log[1].text, "Here is your answer.");
        assert!(!log[1].is_error);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn history_excludes_the_current_utterance() {
        let answers = ScriptedAnswers::ok("answer");
        let mut session = ChatSession::new(quick_gate());

        session.submit("first question", &answers, "kb-v1").await;
        session.submit("second question", &answers, "kb-v2").await;

        let seen = answers.seen.lock().unwrap();
        assert_eq!(seen[0], (0, "first question".to_string(), "kb-v1".to_string()));
        // Second call sees the first exchange (user + assistant) as history
        // and the knowledge base as it is at call time.
        assert_eq!(seen[1], (2, "second question".to_string(), "kb-v2".to_string()));
    }

    #[tokio::test]
    async fn trigger_prompts_for_password_without_calling_the_llm() {
        let answers = ScriptedAnswers::ok("unused");
        let mut session = ChatSession::new(quick_gate());

        let outcome = session.submit("@SaloneCivicAI", &answers, "kb").await;
        assert_eq!(outcome, SubmitOutcome::GateHandled(GateDecision::PromptPassword));
        assert_eq!(session.flow(), AdminFlow::AwaitingPassword);

        let log = session.messages();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].text, SECURITY_CHECK_TEXT);
        assert_eq!(answers.call_count(), 0);
    }

    #[tokio::test]
    async fn wrong_password_is_denied_and_flow_resets() {
        let answers = ScriptedAnswers::ok("unused");
        let mut session = ChatSession::new(quick_gate());

        session.submit("@salonecivicai", &answers, "kb").await;
        let outcome = session.submit("not-the-password", &answers, "kb").await;

        assert_eq!(outcome, SubmitOutcome::GateHandled(GateDecision::Deny));
        assert_eq!(session.flow(), AdminFlow::Idle);
        let last = session.messages().last().unwrap();
        assert_eq!(last.text, DENIED_TEXT);
        assert!(last.action.is_none());
        assert_eq!(answers.call_count(), 0);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn generation_failure_becomes_one_error_message() {
        let answers = ScriptedAnswers::failing();
        let mut session = ChatSession::new(quick_gate());

        let outcome = session.submit("Is cyberbullying a crime?", &answers, "kb").await;
        assert_eq!(outcome, SubmitOutcome::Answered { failed: true });

        let log = session.messages();
        assert_eq!(log.len(), 2);
        assert!(log[1].is_error);
        assert_eq!(log[1].text, ANSWER_FAILURE_TEXT);
        assert!(!session.is_busy());
        assert_eq!(answers.call_count(), 1);
    }

    #[tokio::test]
    async fn greeting_seeds_the_log() {
        let session = ChatSession::with_greeting(quick_gate());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].text, GREETING_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn gate_paths_honor_the_configured_delays() {
        let answers = ScriptedAnswers::ok("unused");
        let mut session = ChatSession::new(AdminGate::default());

        let started = tokio::time::Instant::now();
        session.submit("@salonecivicai", &answers, "kb").await;
        assert!(started.elapsed() >= std::time::Duration::from_millis(500));

        let started = tokio::time::Instant::now();
        session.submit("Admin@CivicAISalone", &answers, "kb").await;
        assert!(started.elapsed() >= std::time::Duration::from_millis(800));
    }

    #[tokio::test]
    async fn full_unlock_scenario() {
        let answers = ScriptedAnswers::ok("Citizenship is defined by the Citizenship Act.");
        let mut session = ChatSession::new(quick_gate());

        // Trigger: user + security check, no LLM call.
        session.submit("@salonecivicai", &answers, "kb").await;
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.flow(), AdminFlow::AwaitingPassword);

        // Correct password: unlock-tagged reply, flow back to idle.
        let outcome = session.submit("Admin@CivicAISalone", &answers, "kb").await;
        assert_eq!(outcome, SubmitOutcome::GateHandled(GateDecision::Unlock));
        assert_eq!(session.messages().len(), 4);
        assert_eq!(
            session.messages()[3].action,
            Some(MessageAction::Unlock)
        );
        assert_eq!(session.flow(), AdminFlow::Idle);
        assert_eq!(answers.call_count(), 0);

        // Ordinary question afterwards goes to answer generation.
        let outcome = session.submit("What is citizenship?", &answers, "kb").await;
        assert_eq!(outcome, SubmitOutcome::Answered { failed: false });
        assert_eq!(session.messages().len(), 6);
        assert_eq!(answers.call_count(), 1);
    }
}
