//! Album and song list APIs.
//!
//! ## `get_album_list2` — `GET /rest/getAlbumList2.view?type=newest&size=20`
//!
//! ```json
//! { "albumList2": { "album": [
//!     { "id": "al-1", "name": "Blue Train", "artist": "John Coltrane", "year": 1958 }
//! ] } }
//! ```
//!
//! `type=byYear` needs `fromYear`/`toYear` and `type=byGenre` needs
//! `genre`; both need protocol 1.10.1.
//!
//! ## `get_random_songs` — `GET /rest/getRandomSongs.view?size=10`
//!
//! ```json
//! { "randomSongs": { "song": [ { "id": "t1", "title": "..." } ] } }
//! ```

use crate::browsing::folder_query;
use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{AlbumId3, Child, NowPlayingEntry, Songs, Starred, Starred2};
use crate::requests::{GetAlbumList, GetRandomSongs, GetSongsByGenre};
use crate::types::SubsonicId;
use crate::values::QueryValues;

impl SubsonicClient {
    /// Albums in the file-structure view.
    pub fn get_album_list(&mut self, req: &GetAlbumList) -> Result<Vec<Child>> {
        let body = self.call_with("getAlbumList", req)?;
        let list = expect_body!(body, "albumList" => AlbumList, or_default)?;
        Ok(list.album)
    }

    /// Albums organised by ID3 tags.
    pub fn get_album_list2(&mut self, req: &GetAlbumList) -> Result<Vec<AlbumId3>> {
        let body = self.call_with("getAlbumList2", req)?;
        let list = expect_body!(body, "albumList2" => AlbumList2, or_default)?;
        Ok(list.album)
    }

    pub fn get_random_songs(&mut self, req: &GetRandomSongs) -> Result<Vec<Child>> {
        let body = self.call_with("getRandomSongs", req)?;
        let songs: Songs = expect_body!(body, "randomSongs" => RandomSongs, or_default)?;
        Ok(songs.song)
    }

    pub fn get_songs_by_genre(&mut self, req: &GetSongsByGenre) -> Result<Vec<Child>> {
        let body = self.call_with("getSongsByGenre", req)?;
        let songs: Songs = expect_body!(body, "songsByGenre" => SongsByGenre, or_default)?;
        Ok(songs.song)
    }

    /// What every user is playing right now.
    pub fn get_now_playing(&mut self) -> Result<Vec<NowPlayingEntry>> {
        let body = self.call("getNowPlaying", QueryValues::new())?;
        let now = expect_body!(body, "nowPlaying" => NowPlaying, or_default)?;
        Ok(now.entry)
    }

    /// Starred artists, albums and songs (file-structure view).
    pub fn get_starred(&mut self, music_folder_id: Option<&SubsonicId>) -> Result<Starred> {
        let body = self.call("getStarred", folder_query(music_folder_id))?;
        expect_body!(body, "starred" => Starred, or_default)
    }

    /// Starred artists, albums and songs (ID3 view).
    pub fn get_starred2(&mut self, music_folder_id: Option<&SubsonicId>) -> Result<Starred2> {
        let body = self.call("getStarred2", folder_query(music_folder_id))?;
        expect_body!(body, "starred2" => Starred2, or_default)
    }
}
