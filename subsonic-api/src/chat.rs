//! Chat APIs.
//!
//! ## `get_chat_messages` — `GET /rest/getChatMessages.view?since=1712340000000`
//!
//! ```json
//! { "chatMessages": { "chatMessage": [
//!     { "username": "bob", "time": 1712340123000, "message": "anyone up?" }
//! ] } }
//! ```
//!
//! `time` and `since` are milliseconds since the epoch.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::ChatMessage;
use crate::types::UnixMillis;
use crate::values::QueryValues;

impl SubsonicClient {
    /// Messages, optionally only those newer than `since`.
    pub fn get_chat_messages(&mut self, since: Option<UnixMillis>) -> Result<Vec<ChatMessage>> {
        let params = since.map_or_else(QueryValues::new, |t| {
            QueryValues::single("since", t.as_millis().to_string())
        });
        let body = self.call("getChatMessages", params)?;
        let messages = expect_body!(body, "chatMessages" => ChatMessages, or_default)?;
        Ok(messages.chat_message)
    }

    pub fn add_chat_message(&mut self, message: &str) -> Result<()> {
        self.call("addChatMessage", QueryValues::single("message", message))?;
        Ok(())
    }
}
