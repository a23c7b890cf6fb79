//! Change notifications and their wire codec.
//!
//! A notification travels through the queue as `"<action>:<identifier>"`,
//! for example `update:blog.post.42` or `delete:blog.post.42`.

use std::fmt;
use std::str::FromStr;

use crate::errors::MessageError;

/// Separator between the action verb and the identifier.
pub const SEPARATOR: char = ':';

/// The net action a notification asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// The entity was created or modified and must be (re)indexed.
    Update,
    /// The entity was removed and its document must leave the index.
    Delete,
}

impl Action {
    /// The wire verb for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(MessageError::unknown_action(other)),
        }
    }
}

/// A change notification for a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Notification {
    /// What should happen to the entity's document.
    pub action: Action,
    /// Composite entity identifier, e.g. `blog.post.42`.
    pub identifier: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(action: Action, identifier: impl Into<String>) -> Self {
        Self {
            action,
            identifier: identifier.into(),
        }
    }

    /// Create an update notification.
    pub fn update(identifier: impl Into<String>) -> Self {
        Self::new(Action::Update, identifier)
    }

    /// Create a delete notification.
    pub fn delete(identifier: impl Into<String>) -> Self {
        Self::new(Action::Delete, identifier)
    }

    /// Encode the notification into its wire form.
    ///
    /// # Example
    ///
    /// ```
    /// use queued_search_shared::Notification;
    ///
    /// assert_eq!(Notification::update("blog.post.42").encode(), "update:blog.post.42");
    /// ```
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.action, SEPARATOR, self.identifier)
    }

    /// Decode a wire message.
    ///
    /// The message is split on the first separator, so identifiers may contain
    /// further `:` characters. Surrounding whitespace is ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Notification)` - The decoded notification
    /// * `Err(MessageError)` - If the separator is missing, the verb is unknown
    ///   or the identifier is empty
    pub fn decode(message: &str) -> Result<Self, MessageError> {
        let trimmed = message.trim();

        let (action, identifier) = trimmed
            .split_once(SEPARATOR)
            .ok_or_else(|| MessageError::missing_separator(trimmed))?;

        let action = action.parse::<Action>()?;

        if identifier.is_empty() {
            return Err(MessageError::empty_identifier(trimmed));
        }

        Ok(Self::new(action, identifier))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.action, SEPARATOR, self.identifier)
    }
}

impl FromStr for Notification {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(
            Notification::update("notes.note.23").encode(),
            "update:notes.note.23"
        );
        assert_eq!(
            Notification::delete("weblog.entry.8").encode(),
            "delete:weblog.entry.8"
        );
    }

    #[test]
    fn test_display_matches_encode() {
        let notification = Notification::delete("blog.post.42");
        assert_eq!(notification.to_string(), notification.encode());
    }

    #[test]
    fn test_decode_update_and_delete() {
        let update = Notification::decode("update:blog.post.42").unwrap();
        assert_eq!(update.action, Action::Update);
        assert_eq!(update.identifier, "blog.post.42");

        let delete = Notification::decode("delete:blog.post.42").unwrap();
        assert_eq!(delete.action, Action::Delete);
        assert_eq!(delete.identifier, "blog.post.42");
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let notification = Notification::decode("  update:t.1\n").unwrap();
        assert_eq!(notification, Notification::update("t.1"));
    }

    #[test]
    fn test_decode_keeps_extra_separators_in_identifier() {
        let notification = Notification::decode("delete:urn:t.1").unwrap();
        assert_eq!(notification.identifier, "urn:t.1");
    }

    #[test]
    fn test_decode_missing_separator() {
        let result = Notification::decode("updatenotes.note.1");
        assert!(matches!(result, Err(MessageError::MissingSeparator(_))));
    }

    #[test]
    fn test_decode_unknown_action() {
        let result = Notification::decode("save:notes.note.1");
        assert_eq!(result, Err(MessageError::UnknownAction("save".to_string())));

        // Verbs are case-sensitive.
        let result = Notification::decode("UPDATE:notes.note.1");
        assert!(matches!(result, Err(MessageError::UnknownAction(_))));
    }

    #[test]
    fn test_decode_empty_identifier() {
        let result = Notification::decode("delete:");
        assert!(matches!(result, Err(MessageError::EmptyIdentifier(_))));
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("update".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("delete".parse::<Action>().unwrap(), Action::Delete);
        assert!("remove".parse::<Action>().is_err());
    }
}
