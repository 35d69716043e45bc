//! Request descriptors for endpoints that take more than one argument.
//!
//! Each struct lists its parameters in wire order. `Option` fields are
//! left out of the query when `None`; list fields repeat their key once
//! per element (`id=1&id=2`).
//!
//! ```ignore
//! let req = Search { query: "miles".into(), song_count: Some(50), ..Search::default() };
//! client.search3(&req)?;
//! ```

use crate::error::QueryTextError;
use crate::types::{SubsonicId, UnixMillis};
use crate::values::{ToQueryText, query_params};

use std::fmt;
use std::str::FromStr;

// ── Enumerated parameters ───────────────────────────────────────────

/// Ordering for `getAlbumList` / `getAlbumList2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlbumListType {
    Random,
    #[default]
    Newest,
    Highest,
    Frequent,
    Recent,
    /// Since 1.8.0.
    AlphabeticalByName,
    /// Since 1.8.0.
    AlphabeticalByArtist,
    /// Since 1.8.0.
    Starred,
    /// Needs `from_year` and `to_year`. Since 1.10.1.
    ByYear,
    /// Needs `genre`. Since 1.10.1.
    ByGenre,
}

impl AlbumListType {
    pub const ALL: [Self; 10] = [
        Self::Random,
        Self::Newest,
        Self::Highest,
        Self::Frequent,
        Self::Recent,
        Self::AlphabeticalByName,
        Self::AlphabeticalByArtist,
        Self::Starred,
        Self::ByYear,
        Self::ByGenre,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Newest => "newest",
            Self::Highest => "highest",
            Self::Frequent => "frequent",
            Self::Recent => "recent",
            Self::AlphabeticalByName => "alphabeticalByName",
            Self::AlphabeticalByArtist => "alphabeticalByArtist",
            Self::Starred => "starred",
            Self::ByYear => "byYear",
            Self::ByGenre => "byGenre",
        }
    }
}

impl fmt::Display for AlbumListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumListType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown album list type {s:?}"))
    }
}

impl ToQueryText for AlbumListType {
    fn to_query_text(&self) -> Result<String, QueryTextError> {
        Ok(self.as_str().to_owned())
    }
}

/// Operation for `jukeboxControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JukeboxAction {
    /// Returns the playlist as well as the status.
    Get,
    #[default]
    Status,
    Set,
    Start,
    Stop,
    Skip,
    Add,
    Clear,
    Remove,
    Shuffle,
    SetGain,
}

impl JukeboxAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Status => "status",
            Self::Set => "set",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Skip => "skip",
            Self::Add => "add",
            Self::Clear => "clear",
            Self::Remove => "remove",
            Self::Shuffle => "shuffle",
            Self::SetGain => "setGain",
        }
    }
}

impl fmt::Display for JukeboxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToQueryText for JukeboxAction {
    fn to_query_text(&self) -> Result<String, QueryTextError> {
        Ok(self.as_str().to_owned())
    }
}

// ── Browsing ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIndexes {
    pub music_folder_id: Option<SubsonicId>,
    /// Only return a result if the index changed after this time.
    pub if_modified_since: Option<UnixMillis>,
}

query_params!(GetIndexes {
    music_folder_id as "musicFolderId", omit_empty;
    if_modified_since as "ifModifiedSince", omit_empty;
});

/// Arguments to `getArtistInfo`, `getArtistInfo2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetArtistInfo {
    pub id: SubsonicId,
    /// Max similar artists to return.
    pub count: Option<u32>,
    /// Include similar artists not in the library.
    pub include_not_present: Option<bool>,
}

query_params!(GetArtistInfo {
    id;
    count, omit_empty;
    include_not_present as "includeNotPresent", omit_empty;
});

/// Arguments to `getSimilarSongs`, `getSimilarSongs2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetSimilarSongs {
    pub id: SubsonicId,
    pub count: Option<u32>,
}

query_params!(GetSimilarSongs {
    id;
    count, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTopSongs {
    /// Artist name, not ID.
    pub artist: String,
    pub count: Option<u32>,
}

query_params!(GetTopSongs {
    artist;
    count, omit_empty;
});

// ── Album/song lists ────────────────────────────────────────────────

/// Arguments to `getAlbumList`, `getAlbumList2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAlbumList {
    pub list_type: AlbumListType,
    /// 1 to 500, server default 10.
    pub size: Option<u32>,
    pub offset: Option<u32>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub genre: Option<String>,
    pub music_folder_id: Option<SubsonicId>,
}

impl GetAlbumList {
    pub fn new(list_type: AlbumListType) -> Self {
        Self {
            list_type,
            ..Self::default()
        }
    }
}

query_params!(GetAlbumList {
    list_type as "type";
    size, omit_empty;
    offset, omit_empty;
    from_year as "fromYear", omit_empty;
    to_year as "toYear", omit_empty;
    genre, omit_empty;
    music_folder_id as "musicFolderId", omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetRandomSongs {
    /// Max 500, server default 10.
    pub size: Option<u32>,
    pub genre: Option<String>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub music_folder_id: Option<SubsonicId>,
}

query_params!(GetRandomSongs {
    size, omit_empty;
    genre, omit_empty;
    from_year as "fromYear", omit_empty;
    to_year as "toYear", omit_empty;
    music_folder_id as "musicFolderId", omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetSongsByGenre {
    pub genre: String,
    pub count: Option<u32>,
    pub offset: Option<u32>,
    pub music_folder_id: Option<SubsonicId>,
}

query_params!(GetSongsByGenre {
    genre;
    count, omit_empty;
    offset, omit_empty;
    music_folder_id as "musicFolderId", omit_empty;
});

// ── Searching ───────────────────────────────────────────────────────

/// Arguments to `search2`, `search3`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    pub query: String,
    pub artist_count: Option<u32>,
    pub artist_offset: Option<u32>,
    pub album_count: Option<u32>,
    pub album_offset: Option<u32>,
    pub song_count: Option<u32>,
    pub song_offset: Option<u32>,
    pub music_folder_id: Option<SubsonicId>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

query_params!(Search {
    query;
    artist_count as "artistCount", omit_empty;
    artist_offset as "artistOffset", omit_empty;
    album_count as "albumCount", omit_empty;
    album_offset as "albumOffset", omit_empty;
    song_count as "songCount", omit_empty;
    song_offset as "songOffset", omit_empty;
    music_folder_id as "musicFolderId", omit_empty;
});

// ── Playlists ───────────────────────────────────────────────────────

/// Create a playlist (`name`) or replace one's songs (`playlist_id`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePlaylist {
    pub playlist_id: Option<SubsonicId>,
    pub name: Option<String>,
    pub song_ids: Vec<SubsonicId>,
}

query_params!(CreatePlaylist {
    playlist_id as "playlistId", omit_empty;
    name, omit_empty;
    song_ids as "songId", omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlaylist {
    pub playlist_id: SubsonicId,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub public: Option<bool>,
    pub song_ids_to_add: Vec<SubsonicId>,
    /// Zero-based positions in the current playlist.
    pub song_indexes_to_remove: Vec<u32>,
}

query_params!(UpdatePlaylist {
    playlist_id as "playlistId";
    name, omit_empty;
    comment, omit_empty;
    public, omit_empty;
    song_ids_to_add as "songIdToAdd", omit_empty;
    song_indexes_to_remove as "songIndexToRemove", omit_empty;
});

// ── Media retrieval ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    pub id: SubsonicId,
    /// Kbps; 0 means no limit.
    pub max_bit_rate: Option<u32>,
    /// Target format (`mp3`, `opus`, `raw` to disable transcoding).
    pub format: Option<String>,
    /// Seconds into the media to start at.
    pub time_offset: u64,
    /// Video size as `WxH`.
    pub size: String,
    pub estimate_content_length: bool,
    /// Return the converted MP4 of a video. Since 1.14.0.
    pub converted: bool,
}

impl Stream {
    pub fn new(id: impl Into<SubsonicId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

query_params!(Stream {
    id;
    max_bit_rate as "maxBitRate", omit_empty;
    format, omit_empty;
    time_offset as "timeOffset", omit_empty;
    size, omit_empty;
    estimate_content_length as "estimateContentLength", omit_empty;
    converted, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCaptions {
    pub id: SubsonicId,
    /// `srt` or `vtt`.
    pub format: Option<String>,
}

query_params!(GetCaptions {
    id;
    format, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCoverArt {
    /// Cover art ID of a song, album or artist.
    pub id: SubsonicId,
    /// Scale to this many pixels.
    pub size: Option<u32>,
}

query_params!(GetCoverArt {
    id;
    size, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetLyrics {
    pub artist: Option<String>,
    pub title: Option<String>,
}

query_params!(GetLyrics {
    artist, omit_empty;
    title, omit_empty;
});

// ── Annotation ──────────────────────────────────────────────────────

/// Targets for `star` / `unstar`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarTargets {
    /// Songs, or folders in file-structure browsing.
    pub ids: Vec<SubsonicId>,
    pub album_ids: Vec<SubsonicId>,
    pub artist_ids: Vec<SubsonicId>,
}

impl StarTargets {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.album_ids.is_empty() && self.artist_ids.is_empty()
    }
}

query_params!(StarTargets {
    ids as "id", omit_empty;
    album_ids as "albumId", omit_empty;
    artist_ids as "artistId", omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scrobble {
    pub id: SubsonicId,
    /// When the song was listened to.
    pub time: Option<UnixMillis>,
    /// `false` only updates "now playing".
    pub submission: Option<bool>,
}

query_params!(Scrobble {
    id;
    time, omit_empty;
    submission, omit_empty;
});

// ── Sharing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateShare {
    /// Songs, albums or videos to share.
    pub ids: Vec<SubsonicId>,
    pub description: String,
    pub expires: Option<UnixMillis>,
}

query_params!(CreateShare {
    ids as "id";
    description, omit_empty;
    expires, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateShare {
    pub id: SubsonicId,
    pub description: Option<String>,
    pub expires: Option<UnixMillis>,
}

query_params!(UpdateShare {
    id;
    description, omit_empty;
    expires, omit_empty;
});

// ── Podcasts ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetPodcasts {
    /// Only this channel.
    pub id: Option<SubsonicId>,
    pub include_episodes: Option<bool>,
}

query_params!(GetPodcasts {
    id, omit_empty;
    include_episodes as "includeEpisodes", omit_empty;
});

// ── Jukebox ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JukeboxControl {
    pub action: JukeboxAction,
    /// Track index for `skip` and `remove`.
    pub index: Option<u32>,
    /// Seconds into the track for `skip`.
    pub offset: Option<u32>,
    /// Songs for `add` and `set`.
    pub ids: Vec<SubsonicId>,
    /// Volume for `setGain`, 0.0 to 1.0.
    pub gain: Option<f32>,
}

impl JukeboxControl {
    pub fn new(action: JukeboxAction) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }
}

query_params!(JukeboxControl {
    action;
    index, omit_empty;
    offset, omit_empty;
    ids as "id", omit_empty;
    gain, omit_empty;
});

// ── Bookmarks & play queue ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateBookmark {
    pub id: SubsonicId,
    /// Milliseconds into the media.
    pub position: u64,
    pub comment: Option<String>,
}

query_params!(CreateBookmark {
    id;
    position;
    comment, omit_empty;
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePlayQueue {
    pub ids: Vec<SubsonicId>,
    /// The playing entry.
    pub current: Option<SubsonicId>,
    /// Milliseconds into `current`.
    pub position: Option<u64>,
}

query_params!(SavePlayQueue {
    ids as "id", omit_empty;
    current, omit_empty;
    position, omit_empty;
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::marshal_values;

    fn ids(list: &[&str]) -> Vec<SubsonicId> {
        list.iter().copied().map(SubsonicId::from).collect()
    }

    #[test]
    fn create_share_omits_empty_description_and_expiry() {
        let req = CreateShare {
            ids: ids(&["s1", "s2"]),
            description: String::new(),
            expires: None,
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("id").unwrap(), ["s1", "s2"]);
        assert!(!values.contains_key("description"));
        assert!(!values.contains_key("expires"));
    }

    #[test]
    fn share_expiry_is_epoch_millis() {
        let req = UpdateShare {
            id: "sh1".into(),
            description: Some("road trip".into()),
            expires: UnixMillis::from_millis(1_710_000_000_000),
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.first("expires"), Some("1710000000000"));
        assert_eq!(values.first("description"), Some("road trip"));
    }

    #[test]
    fn album_list_uses_wire_names() {
        let req = GetAlbumList {
            from_year: Some(1990),
            to_year: Some(1999),
            ..GetAlbumList::new(AlbumListType::ByYear)
        };
        let values = marshal_values(&req).unwrap();
        let keys: Vec<&str> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["type", "fromYear", "toYear"]);
        assert_eq!(values.first("type"), Some("byYear"));
    }

    #[test]
    fn album_list_type_parses_case_insensitively() {
        assert_eq!(
            "alphabeticalbyname".parse::<AlbumListType>().unwrap(),
            AlbumListType::AlphabeticalByName
        );
        assert!("sideways".parse::<AlbumListType>().is_err());
    }

    #[test]
    fn star_targets_repeat_keys() {
        let req = StarTargets {
            ids: ids(&["t1", "t2"]),
            artist_ids: ids(&["ar1"]),
            ..StarTargets::default()
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.encode(), "id=t1&id=t2&artistId=ar1");
    }

    #[test]
    fn scrobble_keeps_explicit_false() {
        let req = Scrobble {
            id: "t1".into(),
            time: None,
            submission: Some(false),
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.first("submission"), Some("false"));
        assert!(!values.contains_key("time"));
    }

    #[test]
    fn stream_defaults_send_only_id() {
        let values = marshal_values(&Stream::new("t9")).unwrap();
        assert_eq!(values.encode(), "id=t9");

        let req = Stream {
            max_bit_rate: Some(0),
            format: Some("raw".into()),
            ..Stream::new("t9")
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.encode(), "id=t9&maxBitRate=0&format=raw");
    }

    #[test]
    fn jukebox_gain_rejects_nan() {
        let req = JukeboxControl {
            gain: Some(f32::NAN),
            ..JukeboxControl::new(JukeboxAction::SetGain)
        };
        assert!(marshal_values(&req).is_err());
    }

    #[test]
    fn update_playlist_orders_removals() {
        let req = UpdatePlaylist {
            playlist_id: "pl".into(),
            song_indexes_to_remove: vec![4, 0, 2],
            ..UpdatePlaylist::default()
        };
        let values = marshal_values(&req).unwrap();
        assert_eq!(values.get("songIndexToRemove").unwrap(), ["4", "0", "2"]);
        assert!(!values.contains_key("songIdToAdd"));
    }
}
