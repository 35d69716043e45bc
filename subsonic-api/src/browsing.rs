//! Browsing APIs: folders, indexes, artists, albums, songs, videos, and
//! last.fm-backed info.
//!
//! Two parallel views exist. The file-structure view (`getIndexes`,
//! `getMusicDirectory`) walks folders on disk; the ID3 view (`getArtists`,
//! `getArtist`, `getAlbum`) is organised by tags and is what most clients
//! use.
//!
//! ## `get_album` — `GET /rest/getAlbum.view?id=<id>`
//!
//! ```json
//! { "album": {
//!     "id": "3a1f", "name": "Kind of Blue", "artist": "Miles Davis",
//!     "songCount": 5, "duration": 2755,
//!     "song": [ { "id": "t1", "title": "So What", "track": 1, "duration": 562 } ]
//! } }
//! ```
//!
//! ## `get_artist_info2` — `GET /rest/getArtistInfo2.view?id=<id>&count=5`
//!
//! ```json
//! { "artistInfo2": {
//!     "biography": "...", "lastFmUrl": "https://www.last.fm/music/...",
//!     "similarArtist": [ { "id": "ar-2", "name": "John Coltrane" } ]
//! } }
//! ```
//!
//! Servers omit the result key entirely for empty lists, so list-returning
//! methods yield an empty value instead of an error in that case.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{
    AlbumInfo, AlbumWithSongsId3, ArtistInfo, ArtistInfo2, ArtistWithAlbumsId3, ArtistsId3,
    Child, Directory, Genre, Indexes, MusicFolder, Songs, VideoInfo, Videos,
};
use crate::requests::{GetArtistInfo, GetIndexes, GetSimilarSongs, GetTopSongs};
use crate::types::SubsonicId;
use crate::values::QueryValues;

pub(crate) fn folder_query(music_folder_id: Option<&SubsonicId>) -> QueryValues {
    match music_folder_id {
        Some(id) => QueryValues::single("musicFolderId", id.as_str()),
        None => QueryValues::new(),
    }
}

impl SubsonicClient {
    pub fn get_music_folders(&mut self) -> Result<Vec<MusicFolder>> {
        let body = self.call("getMusicFolders", QueryValues::new())?;
        let folders = expect_body!(body, "musicFolders" => MusicFolders, or_default)?;
        Ok(folders.music_folder)
    }

    /// File-structure index of all artists.
    pub fn get_indexes(&mut self, req: &GetIndexes) -> Result<Indexes> {
        let body = self.call_with("getIndexes", req)?;
        expect_body!(body, "indexes" => Indexes, or_default)
    }

    /// One folder of the file-structure view.
    pub fn get_music_directory(&mut self, id: &SubsonicId) -> Result<Directory> {
        let body = self.call("getMusicDirectory", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "directory" => Directory)
    }

    /// Since 1.9.0; see [`Session::can_get_genres`](crate::Session::can_get_genres).
    pub fn get_genres(&mut self) -> Result<Vec<Genre>> {
        let body = self.call("getGenres", QueryValues::new())?;
        let genres = expect_body!(body, "genres" => Genres, or_default)?;
        Ok(genres.genre)
    }

    /// ID3 index of all artists.
    pub fn get_artists(&mut self, music_folder_id: Option<&SubsonicId>) -> Result<ArtistsId3> {
        let body = self.call("getArtists", folder_query(music_folder_id))?;
        expect_body!(body, "artists" => Artists, or_default)
    }

    /// An artist with its albums.
    pub fn get_artist(&mut self, id: &SubsonicId) -> Result<ArtistWithAlbumsId3> {
        let body = self.call("getArtist", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "artist" => Artist)
    }

    /// An album with its songs.
    pub fn get_album(&mut self, id: &SubsonicId) -> Result<AlbumWithSongsId3> {
        let body = self.call("getAlbum", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "album" => Album)
    }

    pub fn get_song(&mut self, id: &SubsonicId) -> Result<Child> {
        let body = self.call("getSong", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "song" => Song)
    }

    pub fn get_videos(&mut self) -> Result<Vec<Child>> {
        let body = self.call("getVideos", QueryValues::new())?;
        let videos: Videos = expect_body!(body, "videos" => Videos, or_default)?;
        Ok(videos.video)
    }

    /// Captions, audio tracks and conversions of a video.
    pub fn get_video_info(&mut self, id: &SubsonicId) -> Result<VideoInfo> {
        let body = self.call("getVideoInfo", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "videoInfo" => VideoInfo)
    }

    /// Biography and similar artists, for the file-structure view.
    pub fn get_artist_info(&mut self, req: &GetArtistInfo) -> Result<ArtistInfo> {
        let body = self.call_with("getArtistInfo", req)?;
        expect_body!(body, "artistInfo" => ArtistInfo, or_default)
    }

    /// Biography and similar artists, for the ID3 view.
    pub fn get_artist_info2(&mut self, req: &GetArtistInfo) -> Result<ArtistInfo2> {
        let body = self.call_with("getArtistInfo2", req)?;
        expect_body!(body, "artistInfo2" => ArtistInfo2, or_default)
    }

    pub fn get_album_info(&mut self, id: &SubsonicId) -> Result<AlbumInfo> {
        let body = self.call("getAlbumInfo", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "albumInfo" => AlbumInfo, or_default)
    }

    /// Same reply key as [`get_album_info`](Self::get_album_info), but takes
    /// an ID3 album ID.
    pub fn get_album_info2(&mut self, id: &SubsonicId) -> Result<AlbumInfo> {
        let body = self.call("getAlbumInfo2", QueryValues::single("id", id.as_str()))?;
        expect_body!(body, "albumInfo" => AlbumInfo, or_default)
    }

    /// Songs similar to an artist, album or song (file-structure view).
    pub fn get_similar_songs(&mut self, req: &GetSimilarSongs) -> Result<Vec<Child>> {
        let body = self.call_with("getSimilarSongs", req)?;
        let songs: Songs = expect_body!(body, "similarSongs" => SimilarSongs, or_default)?;
        Ok(songs.song)
    }

    /// Songs similar to an ID3 artist.
    pub fn get_similar_songs2(&mut self, req: &GetSimilarSongs) -> Result<Vec<Child>> {
        let body = self.call_with("getSimilarSongs2", req)?;
        let songs: Songs = expect_body!(body, "similarSongs2" => SimilarSongs2, or_default)?;
        Ok(songs.song)
    }

    /// Top songs of an artist by name, from last.fm.
    pub fn get_top_songs(&mut self, req: &GetTopSongs) -> Result<Vec<Child>> {
        let body = self.call_with("getTopSongs", req)?;
        let songs: Songs = expect_body!(body, "topSongs" => TopSongs, or_default)?;
        Ok(songs.song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_filter_is_optional() {
        assert!(folder_query(None).is_empty());
        let id = SubsonicId::from("3");
        assert_eq!(folder_query(Some(&id)).encode(), "musicFolderId=3");
    }
}
