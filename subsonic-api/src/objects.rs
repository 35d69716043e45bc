//! Result objects carried inside a `subsonic-response` envelope.
//!
//! Field names follow Rust conventions (`snake_case`); on the wire they are
//! camelCase (`coverArt`, `musicBrainzId`). Every struct decodes with
//! `#[serde(default)]`, because servers routinely leave out fields they
//! have no value for, and OpenSubsonic additions are absent on plain
//! Subsonic servers.
//!
//! Timestamps are ISO 8601 strings (`"2024-02-05T16:32:17.000Z"`) decoded
//! into `DateTime<Utc>`, except [`ChatMessage::time`] which is epoch
//! milliseconds.

use crate::types::{IgnoredArticles, ItemDate, SubsonicDuration, SubsonicId, UnixMillis};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Browsing ────────────────────────────────────────────────────────

/// A top-level music folder configured on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicFolder {
    pub id: SubsonicId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicFolders {
    pub music_folder: Vec<MusicFolder>,
}

/// File-structure index returned by `getIndexes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Indexes {
    /// Epoch milliseconds of the last library change.
    pub last_modified: i64,
    pub ignored_articles: IgnoredArticles,
    pub shortcut: Vec<Artist>,
    pub index: Vec<Index>,
    /// Loose files at the top of the music folder.
    pub child: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Index {
    pub name: String,
    pub artist: Vec<Artist>,
}

/// An artist in the file-structure view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    pub id: SubsonicId,
    pub name: String,
    pub artist_image_url: String,
    pub starred: Option<DateTime<Utc>>,
    pub user_rating: i32,
    pub average_rating: f64,
}

/// ID3-tag index returned by `getArtists`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistsId3 {
    pub ignored_articles: IgnoredArticles,
    pub index: Vec<IndexId3>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexId3 {
    pub name: String,
    pub artist: Vec<ArtistId3>,
}

/// An artist organised by ID3 tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistId3 {
    pub id: SubsonicId,
    pub name: String,
    pub cover_art: String,
    pub artist_image_url: String,
    pub album_count: i32,
    pub starred: Option<DateTime<Utc>>,
    // OpenSubsonic
    pub music_brainz_id: String,
    pub sort_name: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistWithAlbumsId3 {
    #[serde(flatten)]
    pub artist: ArtistId3,
    pub album: Vec<AlbumId3>,
}

/// An album organised by ID3 tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumId3 {
    pub id: SubsonicId,
    pub name: String,
    pub artist: String,
    pub artist_id: SubsonicId,
    pub cover_art: String,
    pub song_count: i32,
    /// Total length in seconds.
    pub duration: i32,
    pub play_count: i64,
    pub created: Option<DateTime<Utc>>,
    pub starred: Option<DateTime<Utc>>,
    pub year: i32,
    pub genre: String,
    // OpenSubsonic
    pub played: Option<DateTime<Utc>>,
    pub user_rating: i32,
    pub record_labels: Vec<RecordLabel>,
    pub music_brainz_id: String,
    pub genres: Vec<ItemGenre>,
    pub artists: Vec<ArtistId3>,
    pub display_artist: String,
    pub release_types: Vec<String>,
    pub moods: Vec<String>,
    pub sort_name: String,
    pub original_release_date: ItemDate,
    pub release_date: ItemDate,
    pub is_compilation: bool,
    pub disc_titles: Vec<DiscTitle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumWithSongsId3 {
    #[serde(flatten)]
    pub album: AlbumId3,
    pub song: Vec<Child>,
}

/// A file or directory: a song, video, podcast episode or folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Child {
    pub id: SubsonicId,
    pub parent: SubsonicId,
    pub is_dir: bool,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub track: i32,
    pub year: i32,
    pub genre: String,
    pub cover_art: String,
    /// File size in bytes.
    pub size: i64,
    pub content_type: String,
    pub suffix: String,
    pub transcoded_content_type: String,
    pub transcoded_suffix: String,
    /// Length in seconds.
    pub duration: i32,
    /// Kbps.
    pub bit_rate: i32,
    pub path: String,
    pub is_video: bool,
    pub user_rating: i32,
    pub average_rating: f64,
    pub play_count: i64,
    pub disc_number: i32,
    pub created: Option<DateTime<Utc>>,
    pub starred: Option<DateTime<Utc>>,
    pub album_id: SubsonicId,
    pub artist_id: SubsonicId,
    /// `music`, `podcast`, `audiobook` or `video`.
    #[serde(rename = "type")]
    pub kind: String,
    pub bookmark_position: i64,
    pub original_width: i32,
    pub original_height: i32,
    // OpenSubsonic
    pub media_type: String,
    pub played: Option<DateTime<Utc>>,
    pub bpm: i32,
    pub comment: String,
    pub sort_name: String,
    pub music_brainz_id: String,
    pub genres: Vec<ItemGenre>,
    pub artists: Vec<ArtistId3>,
    pub display_artist: String,
    pub album_artists: Vec<ArtistId3>,
    pub display_album_artist: String,
    pub contributors: Vec<Contributor>,
    pub display_composer: String,
    pub moods: Vec<String>,
    pub replay_gain: Option<ReplayGain>,
}

/// Contents of one folder returned by `getMusicDirectory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Directory {
    pub id: SubsonicId,
    pub parent: SubsonicId,
    pub name: String,
    pub starred: Option<DateTime<Utc>>,
    pub user_rating: i32,
    pub average_rating: f64,
    pub play_count: i64,
    pub child: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Genre {
    /// The genre name.
    pub value: String,
    pub song_count: i32,
    pub album_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Genres {
    pub genre: Vec<Genre>,
}

// ── Video ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Videos {
    pub video: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInfo {
    pub id: SubsonicId,
    pub captions: Vec<Captions>,
    pub audio_track: Vec<AudioTrack>,
    pub conversion: Vec<VideoConversion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Captions {
    pub id: SubsonicId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioTrack {
    pub id: SubsonicId,
    pub name: String,
    pub language_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoConversion {
    pub id: SubsonicId,
    pub bit_rate: i32,
    pub audio_track_id: SubsonicId,
}

// ── Lists ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NowPlaying {
    pub entry: Vec<NowPlayingEntry>,
}

/// A song some user is currently playing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NowPlayingEntry {
    #[serde(flatten)]
    pub child: Child,
    pub username: String,
    pub minutes_ago: i32,
    pub player_id: SubsonicId,
    pub player_name: String,
}

/// Result of the deprecated `search` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub offset: i32,
    pub total_hits: i32,
    #[serde(rename = "match")]
    pub matches: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult2 {
    pub artist: Vec<Artist>,
    pub album: Vec<Child>,
    pub song: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult3 {
    pub artist: Vec<ArtistId3>,
    pub album: Vec<AlbumId3>,
    pub song: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumList {
    pub album: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumList2 {
    pub album: Vec<AlbumId3>,
}

/// Song list shared by `randomSongs`, `songsByGenre`, `similarSongs`,
/// `similarSongs2` and `topSongs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Songs {
    pub song: Vec<Child>,
}

pub type SimilarSongs = Songs;
pub type SimilarSongs2 = Songs;
pub type TopSongs = Songs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Starred {
    pub artist: Vec<Artist>,
    pub album: Vec<Child>,
    pub song: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Starred2 {
    pub artist: Vec<ArtistId3>,
    pub album: Vec<AlbumId3>,
    pub song: Vec<Child>,
}

// ── Info ────────────────────────────────────────────────────────────

/// Album notes and images, usually sourced from last.fm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumInfo {
    pub notes: String,
    pub music_brainz_id: String,
    pub last_fm_url: String,
    pub small_image_url: String,
    pub medium_image_url: String,
    pub large_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistInfo {
    pub biography: String,
    pub music_brainz_id: String,
    pub last_fm_url: String,
    pub small_image_url: String,
    pub medium_image_url: String,
    pub large_image_url: String,
    pub similar_artist: Vec<Artist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistInfo2 {
    pub biography: String,
    pub music_brainz_id: String,
    pub last_fm_url: String,
    pub small_image_url: String,
    pub medium_image_url: String,
    pub large_image_url: String,
    pub similar_artist: Vec<ArtistId3>,
}

// ── Playlists ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlist {
    pub id: SubsonicId,
    pub name: String,
    pub comment: String,
    pub owner: String,
    pub public: bool,
    pub song_count: i32,
    pub duration: SubsonicDuration,
    pub created: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
    pub cover_art: String,
    /// Users allowed to read a private playlist.
    pub allowed_user: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlists {
    pub playlist: Vec<Playlist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub entry: Vec<Child>,
}

// ── Jukebox ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JukeboxStatus {
    pub current_index: i32,
    pub playing: bool,
    /// Volume between 0.0 and 1.0.
    pub gain: f32,
    /// Seconds into the current track.
    pub position: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JukeboxPlaylist {
    #[serde(flatten)]
    pub status: JukeboxStatus,
    pub entry: Vec<Child>,
}

// ── System & users ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct License {
    pub valid: bool,
    pub email: String,
    pub license_expires: Option<DateTime<Utc>>,
    pub trial_expires: Option<DateTime<Utc>>,
}

/// A supported OpenSubsonic extension and the versions implemented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenSubsonicExtension {
    pub name: String,
    pub versions: Vec<i32>,
}

/// A user account and its permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub email: String,
    pub scrobbling_enabled: bool,
    pub max_bit_rate: i32,
    pub admin_role: bool,
    pub settings_role: bool,
    pub download_role: bool,
    pub upload_role: bool,
    pub playlist_role: bool,
    pub cover_art_role: bool,
    pub comment_role: bool,
    pub podcast_role: bool,
    pub stream_role: bool,
    pub jukebox_role: bool,
    pub share_role: bool,
    pub video_conversion_role: bool,
    pub avatar_last_changed: Option<DateTime<Utc>>,
    /// Music folders the user may access.
    pub folder: Vec<SubsonicId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Users {
    pub user: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessage {
    pub username: String,
    pub time: UnixMillis,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessages {
    pub chat_message: Vec<ChatMessage>,
}

// ── Lyrics ──────────────────────────────────────────────────────────

/// Plain lyrics returned by `getLyrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lyrics {
    pub artist: String,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricsList {
    pub structured_lyrics: Vec<StructuredLyrics>,
}

/// One language's lyrics for a song, possibly time-synced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredLyrics {
    pub lang: String,
    pub synced: bool,
    pub line: Vec<Line>,
    pub display_artist: String,
    pub display_title: String,
    /// Milliseconds to shift every line's start by.
    pub offset: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    pub value: String,
    /// Start time in milliseconds; absent for unsynced lyrics.
    pub start: Option<i64>,
}

// ── Podcasts ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Podcasts {
    pub channel: Vec<PodcastChannel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewestPodcasts {
    pub episode: Vec<PodcastEpisode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodcastChannel {
    pub id: SubsonicId,
    pub url: String,
    pub title: String,
    pub description: String,
    pub cover_art: String,
    pub original_image_url: String,
    /// `new`, `downloading`, `completed`, `error`, `deleted` or `skipped`.
    pub status: String,
    pub error_message: String,
    pub episode: Vec<PodcastEpisode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodcastEpisode {
    #[serde(flatten)]
    pub child: Child,
    /// Present once the episode is downloaded; use it to stream.
    pub stream_id: Option<SubsonicId>,
    pub channel_id: SubsonicId,
    pub description: String,
    pub status: String,
    pub publish_date: Option<DateTime<Utc>>,
}

// ── Radio, bookmarks, shares ────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternetRadioStation {
    pub id: SubsonicId,
    pub name: String,
    pub stream_url: String,
    pub homepage_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternetRadioStations {
    pub internet_radio_station: Vec<InternetRadioStation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bookmark {
    /// Milliseconds into the entry.
    pub position: i64,
    pub username: String,
    pub comment: String,
    pub created: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
    pub entry: Child,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bookmarks {
    pub bookmark: Vec<Bookmark>,
}

/// The saved play queue of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayQueue {
    pub current: Option<SubsonicId>,
    /// Milliseconds into the current entry.
    pub position: i64,
    pub username: String,
    pub changed: Option<DateTime<Utc>>,
    pub changed_by: String,
    pub entry: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Share {
    pub id: SubsonicId,
    pub url: String,
    pub description: String,
    pub username: String,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub last_visited: Option<DateTime<Utc>>,
    pub visit_count: i32,
    pub entry: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shares {
    pub share: Vec<Share>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanStatus {
    pub scanning: bool,
    /// Files scanned so far.
    pub count: i64,
}

// ── OpenSubsonic item details ───────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemGenre {
    pub name: String,
}

/// A contributing artist for a song or album (composer, producer, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contributor {
    pub role: String,
    pub sub_role: Option<String>,
    pub artist: ArtistId3,
}

/// ReplayGain values in dB, peaks as linear amplitude.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplayGain {
    pub track_gain: Option<f64>,
    pub album_gain: Option<f64>,
    pub track_peak: Option<f64>,
    pub album_peak: Option<f64>,
    pub base_gain: Option<f64>,
    /// Applied when the matching gain is missing.
    pub fallback_gain: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordLabel {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscTitle {
    pub disc: i32,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn album_with_songs_flattens_album_fields() {
        let json = r#"{
            "id": 101, "name": "Abbey Road", "artist": "The Beatles",
            "artistId": "ar-1", "songCount": 2, "duration": 300,
            "created": "2023-01-02T03:04:05.000Z",
            "originalReleaseDate": {"year": 1969, "month": 9, "day": 26},
            "genres": [{"name": "Rock"}],
            "song": [
                {"id": "s1", "title": "Come Together", "isDir": false, "duration": 259},
                {"id": 2, "title": "Something", "type": "music"}
            ]
        }"#;
        let album: AlbumWithSongsId3 = serde_json::from_str(json).unwrap();
        assert_eq!(album.album.id.as_str(), "101");
        assert_eq!(album.album.artist_id.as_str(), "ar-1");
        assert_eq!(album.album.original_release_date.year, 1969);
        assert_eq!(album.album.genres[0].name, "Rock");
        assert!(album.album.created.is_some());
        assert_eq!(album.song.len(), 2);
        assert_eq!(album.song[1].id.as_str(), "2");
        assert_eq!(album.song[1].kind, "music");
    }

    #[test]
    fn playlist_duration_is_seconds() {
        let json = r#"{"id": "pl1", "name": "Mix", "songCount": 3, "duration": 725,
                       "entry": [{"id": "s1"}]}"#;
        let pl: PlaylistWithSongs = serde_json::from_str(json).unwrap();
        assert_eq!(pl.playlist.duration.as_duration(), Duration::from_secs(725));
        assert_eq!(pl.playlist.duration.to_string(), "12m5s");
        assert_eq!(pl.entry.len(), 1);
    }

    #[test]
    fn missing_fields_default() {
        let child: Child = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(child.title, "");
        assert!(child.starred.is_none());
        assert!(child.replay_gain.is_none());
    }

    #[test]
    fn search_result_match_key() {
        let r: SearchResult =
            serde_json::from_str(r#"{"offset":0,"totalHits":1,"match":[{"id":"m"}]}"#).unwrap();
        assert_eq!(r.total_hits, 1);
        assert_eq!(r.matches[0].id.as_str(), "m");
    }

    #[test]
    fn chat_time_is_epoch_millis() {
        let m: ChatMessage =
            serde_json::from_str(r#"{"username":"a","time":1706000000000,"message":"hi"}"#)
                .unwrap();
        assert_eq!(m.time.as_millis(), 1_706_000_000_000);
    }
}
