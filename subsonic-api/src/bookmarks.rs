//! Bookmark and play queue APIs.
//!
//! ## `get_bookmarks` — `GET /rest/getBookmarks.view`
//!
//! ```json
//! { "bookmarks": { "bookmark": [
//!     { "position": 754000, "username": "alice", "comment": "",
//!       "created": "2024-03-02T20:00:00.000Z", "changed": "2024-03-02T20:00:00.000Z",
//!       "entry": { "id": "ep-1", "title": "Pilot" } }
//! ] } }
//! ```
//!
//! ## `get_play_queue` / `save_play_queue`
//!
//! Since 1.12.0; see [`Session::can_use_play_queue`](crate::Session::can_use_play_queue).
//! Positions are milliseconds.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{Bookmark, PlayQueue};
use crate::requests::{CreateBookmark, SavePlayQueue};
use crate::types::SubsonicId;
use crate::values::QueryValues;

impl SubsonicClient {
    pub fn get_bookmarks(&mut self) -> Result<Vec<Bookmark>> {
        let body = self.call("getBookmarks", QueryValues::new())?;
        let bookmarks = expect_body!(body, "bookmarks" => Bookmarks, or_default)?;
        Ok(bookmarks.bookmark)
    }

    /// Create or replace the bookmark on a media file.
    pub fn create_bookmark(&mut self, req: &CreateBookmark) -> Result<()> {
        self.call_with("createBookmark", req)?;
        Ok(())
    }

    pub fn delete_bookmark(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("deleteBookmark", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }

    /// The saved play queue; `None` if the user never saved one.
    pub fn get_play_queue(&mut self) -> Result<Option<PlayQueue>> {
        let body = self.call("getPlayQueue", QueryValues::new())?;
        if body.key().is_none() {
            return Ok(None);
        }
        expect_body!(body, "playQueue" => PlayQueue).map(Some)
    }

    /// Save the queue; an empty `ids` clears it.
    pub fn save_play_queue(&mut self, req: &SavePlayQueue) -> Result<()> {
        self.call_with("savePlayQueue", req)?;
        Ok(())
    }
}
