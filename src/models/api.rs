use super::chat::ChatMessage;
use crate::session::AdminFlow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    /// Omitted on the first message; the server mints one and returns it.
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub session_id: Uuid,
    /// Messages this submission appended, in order. Empty when the input was
    /// ignored (blank message).
    pub appended: Vec<ChatMessage>,
    /// Admin-flow state after the submission.
    pub flow: AdminFlow,
    /// Busy flag after the submission.
    pub busy: bool,
}

#[derive(Serialize, Debug)]
pub struct SessionMessagesResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Debug)]
pub struct KnowledgeBaseResponse {
    pub content: String,
}

#[derive(Deserialize, Debug)]
pub struct KnowledgeBaseUpdate {
    pub content: String,
}

#[derive(Serialize, Debug)]
pub struct KnowledgeBaseUpdated {
    pub success: bool,
    pub length: usize,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::MessageAction;

    #[test]
    fn chat_response_reports_gate_state_and_busy_flag() {
        let resp = ChatResponse {
            session_id: Uuid::new_v4(),
            appended: vec![
                ChatMessage::user("Admin@CivicAISalone"),
                ChatMessage::assistant("granted").with_action(MessageAction::Unlock),
            ],
            flow: AdminFlow::AwaitingPassword,
            busy: false,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["flow"], "awaiting_password");
        assert_eq!(json["busy"], false);
        assert_eq!(json["appended"][1]["action"], "unlock");

        let idle = serde_json::to_value(AdminFlow::Idle).unwrap();
        assert_eq!(idle, "idle");
    }
}
