//! Playlist APIs.
//!
//! ## `get_playlist` — `GET /rest/getPlaylist.view?id=<id>`
//!
//! ```json
//! { "playlist": {
//!     "id": "pl-1", "name": "Late night", "owner": "alice", "public": false,
//!     "songCount": 2, "duration": 512,
//!     "created": "2024-01-05T21:14:03.000Z", "changed": "2024-02-01T08:00:00.000Z",
//!     "entry": [ { "id": "t1", "title": "..." } ]
//! } }
//! ```
//!
//! `duration` is in seconds and decodes into a
//! [`SubsonicDuration`](crate::types::SubsonicDuration).
//!
//! ## `create_playlist` — `GET /rest/createPlaylist.view?name=Mix&songId=t1&songId=t2`
//!
//! Passing `playlistId` instead of `name` replaces the songs of an existing
//! playlist, which is also how songs are reordered. Since 1.14.0 the reply
//! carries the resulting playlist; older servers reply with an empty body.
//!
//! ## `update_playlist` / `delete_playlist`
//!
//! Empty replies.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{Playlist, PlaylistWithSongs};
use crate::requests::{CreatePlaylist, UpdatePlaylist};
use crate::response::ResponseBody;
use crate::types::SubsonicId;
use crate::values::QueryValues;

impl SubsonicClient {
    /// Playlists visible to the current user, or to `username` (admin only).
    pub fn get_playlists(&mut self, username: Option<&str>) -> Result<Vec<Playlist>> {
        let params = username.map_or_else(QueryValues::new, |u| QueryValues::single("username", u));
        let body = self.call("getPlaylists", params)?;
        let playlists = expect_body!(body, "playlists" => Playlists, or_default)?;
        Ok(playlists.playlist)
    }

    pub fn get_playlist(&mut self, id: &SubsonicId) -> Result<PlaylistWithSongs> {
        let body = self.call("getPlaylist", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "playlist" => Playlist)
    }

    /// Create a playlist, or replace the songs of an existing one.
    ///
    /// `None` when the server is older than 1.14.0 and returns no playlist.
    pub fn create_playlist(&mut self, req: &CreatePlaylist) -> Result<Option<PlaylistWithSongs>> {
        match self.call_with("createPlaylist", req)? {
            ResponseBody::Empty => Ok(None),
            body => expect_body!(body, "playlist" => Playlist).map(Some),
        }
    }

    /// Rename, comment, share, add or remove songs.
    pub fn update_playlist(&mut self, req: &UpdatePlaylist) -> Result<()> {
        self.call_with("updatePlaylist", req)?;
        Ok(())
    }

    pub fn delete_playlist(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("deletePlaylist", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }
}
