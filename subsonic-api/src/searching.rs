//! Search APIs.
//!
//! ## `search3` — `GET /rest/search3.view?query=blue&songCount=20`
//!
//! ```json
//! { "searchResult3": {
//!     "artist": [ { "id": "ar-1", "name": "Blue Öyster Cult" } ],
//!     "album":  [ { "id": "al-1", "name": "Blue Train" } ],
//!     "song":   [ { "id": "t1", "title": "Blue in Green" } ]
//! } }
//! ```
//!
//! `search2` returns the same shape under `searchResult2`, using the
//! file-structure view. Counts default to 20 per kind on the server.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{SearchResult2, SearchResult3};
use crate::requests::Search;

impl SubsonicClient {
    /// Search artists, albums and songs (file-structure view).
    pub fn search2(&mut self, req: &Search) -> Result<SearchResult2> {
        let body = self.call_with("search2", req)?;
        expect_body!(body, "searchResult2" => SearchResult2, or_default)
    }

    /// Search artists, albums and songs (ID3 view). Since 1.8.0.
    pub fn search3(&mut self, req: &Search) -> Result<SearchResult3> {
        let body = self.call_with("search3", req)?;
        expect_body!(body, "searchResult3" => SearchResult3, or_default)
    }
}
