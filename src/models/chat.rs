use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Action tag riding on a message. The serving layer passes it through
/// verbatim; the client decides what to do with it (for `Unlock`, switching
/// to the admin view).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAction {
    Unlock,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MessageAction>,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            is_error: false,
            action: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Assistant, text);
        msg.is_error = true;
        msg
    }

    pub fn with_action(mut self, action: MessageAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role_and_flags() {
        let user = ChatMessage::user("hello");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_error);
        assert!(user.action.is_none());

        let err = ChatMessage::assistant_error("oops");
        assert_eq!(err.role, Role::Assistant);
        assert!(err.is_error);

        let unlock = ChatMessage::assistant("ok").with_action(MessageAction::Unlock);
        assert_eq!(unlock.action, Some(MessageAction::Unlock));
    }

    #[test]
    fn action_tag_serializes_as_unlock() {
        let msg = ChatMessage::assistant("granted").with_action(MessageAction::Unlock);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "unlock");
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn plain_message_omits_action_field() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("action").is_none());
    }
}
