//! Conversation-related types.

use travel_agent_model::ModelMessage;

/// An append-only list of messages for one dialogue run.
#[derive(Clone, Default, Debug)]
pub struct Conversation {
    pub(crate) messages: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates a conversation from the messages a caller supplied.
    #[inline]
    pub fn new(messages: Vec<ModelMessage>) -> Self {
        Self { messages }
    }

    /// Prepends `prompt` as a system message unless the conversation
    /// already starts with one. Returns `true` if a message was inserted.
    pub fn ensure_system_prompt(&mut self, prompt: &str) -> bool {
        if matches!(self.messages.first(), Some(ModelMessage::System { .. })) {
            return false;
        }
        self.messages.insert(0, ModelMessage::system(prompt));
        true
    }

    /// Returns the messages so far.
    #[inline]
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    #[inline]
    pub(crate) fn push(&mut self, msg: ModelMessage) {
        self.messages.push(msg);
    }

    /// Consumes the conversation and returns its messages.
    #[inline]
    pub fn into_messages(self) -> Vec<ModelMessage> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_system_prompt() {
        let mut conversation = Conversation::new(vec![]);
        assert!(conversation.ensure_system_prompt("Be helpful."));
        assert_eq!(
            conversation.messages(),
            [ModelMessage::system("Be helpful.")]
        );

        let mut conversation = Conversation::new(vec![
            ModelMessage::system("Custom."),
            ModelMessage::user("Hi"),
        ]);
        assert!(!conversation.ensure_system_prompt("Be helpful."));
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[0].content(), "Custom.");

        // A system message later in the list doesn't count.
        let mut conversation = Conversation::new(vec![
            ModelMessage::user("Hi"),
            ModelMessage::system("Late."),
        ]);
        assert!(conversation.ensure_system_prompt("Be helpful."));
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(conversation.messages()[0].content(), "Be helpful.");
    }
}
