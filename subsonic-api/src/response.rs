//! The `subsonic-response` envelope.
//!
//! Every JSON reply has the same outer shape:
//!
//! ```json
//! { "subsonic-response": {
//!     "status": "ok",
//!     "version": "1.16.1",
//!     "type": "navidrome", "serverVersion": "0.53.3", "openSubsonic": true,
//!     "album": { "id": "al-1", "name": "...", "song": [ ... ] }
//! } }
//! ```
//!
//! There is no discriminant field: the result kind is whichever of the
//! known keys (`album`, `playlists`, `searchResult3`, ...) is present.
//! [`SubsonicResponse`] turns that into a [`ResponseBody`] variant, with
//! the `error` object taking precedence whenever the status is `failed`.

use crate::error::{ApiError, ErrorCode, Result, SubsonicError};
use crate::objects::{
    AlbumInfo, AlbumList, AlbumList2, AlbumWithSongsId3, ArtistInfo, ArtistInfo2,
    ArtistWithAlbumsId3, ArtistsId3, Bookmarks, ChatMessages, Child, Directory, Genres, Indexes,
    InternetRadioStations, JukeboxPlaylist, JukeboxStatus, License, Lyrics, LyricsList,
    MusicFolders, NewestPodcasts, NowPlaying, OpenSubsonicExtension, PlayQueue, PlaylistWithSongs,
    Playlists, Podcasts, ScanStatus, SearchResult, SearchResult2, SearchResult3, Shares, Songs,
    Starred, Starred2, User, Users, VideoInfo, Videos,
};

use serde::Deserialize;
use serde_json::{Map, Value};

/// `status` attribute of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Failed,
}

/// Declare [`ResponseBody`] from one `"wireKey" => Variant(Payload)` table.
macro_rules! response_body {
    ($($key:literal => $variant:ident($payload:ty),)*) => {
        /// The single result carried by a successful envelope.
        #[derive(Debug, Clone, PartialEq)]
        #[allow(clippy::large_enum_variant)]
        pub enum ResponseBody {
            /// No result key (`ping`, and every mutating call).
            Empty,
            $($variant($payload),)*
        }

        impl ResponseBody {
            /// Every result key the decoder recognises.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            /// Wire key of the active variant; `None` for `Empty`.
            pub fn key(&self) -> Option<&'static str> {
                match self {
                    Self::Empty => None,
                    $(Self::$variant(_) => Some($key),)*
                }
            }

            fn from_entry(key: &str, value: Value) -> Option<serde_json::Result<Self>> {
                match key {
                    $($key => Some(serde_json::from_value(value).map(Self::$variant)),)*
                    _ => None,
                }
            }
        }
    };
}

response_body! {
    "musicFolders" => MusicFolders(MusicFolders),
    "indexes" => Indexes(Indexes),
    "directory" => Directory(Directory),
    "genres" => Genres(Genres),
    "artists" => Artists(ArtistsId3),
    "artist" => Artist(ArtistWithAlbumsId3),
    "album" => Album(AlbumWithSongsId3),
    "song" => Song(Child),
    "videos" => Videos(Videos),
    "videoInfo" => VideoInfo(VideoInfo),
    "nowPlaying" => NowPlaying(NowPlaying),
    "searchResult" => SearchResult(SearchResult),
    "searchResult2" => SearchResult2(SearchResult2),
    "searchResult3" => SearchResult3(SearchResult3),
    "playlists" => Playlists(Playlists),
    "playlist" => Playlist(PlaylistWithSongs),
    "jukeboxStatus" => JukeboxStatus(JukeboxStatus),
    "jukeboxPlaylist" => JukeboxPlaylist(JukeboxPlaylist),
    "license" => License(License),
    "users" => Users(Users),
    "user" => User(User),
    "chatMessages" => ChatMessages(ChatMessages),
    "albumList" => AlbumList(AlbumList),
    "albumList2" => AlbumList2(AlbumList2),
    "randomSongs" => RandomSongs(Songs),
    "songsByGenre" => SongsByGenre(Songs),
    "lyrics" => Lyrics(Lyrics),
    "lyricsList" => LyricsList(LyricsList),
    "podcasts" => Podcasts(Podcasts),
    "newestPodcasts" => NewestPodcasts(NewestPodcasts),
    "internetRadioStations" => InternetRadioStations(InternetRadioStations),
    "bookmarks" => Bookmarks(Bookmarks),
    "playQueue" => PlayQueue(PlayQueue),
    "shares" => Shares(Shares),
    "starred" => Starred(Starred),
    "starred2" => Starred2(Starred2),
    "albumInfo" => AlbumInfo(AlbumInfo),
    "artistInfo" => ArtistInfo(ArtistInfo),
    "artistInfo2" => ArtistInfo2(ArtistInfo2),
    "similarSongs" => SimilarSongs(Songs),
    "similarSongs2" => SimilarSongs2(Songs),
    "topSongs" => TopSongs(Songs),
    "scanStatus" => ScanStatus(ScanStatus),
    "openSubsonicExtensions" => OpenSubsonicExtensions(Vec<OpenSubsonicExtension>),
}

/// Envelope as it appears on the wire, before variant selection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    status: ResponseStatus,
    #[serde(default)]
    version: String,
    #[serde(default, rename = "type")]
    server_type: Option<String>,
    #[serde(default)]
    server_version: Option<String>,
    #[serde(default)]
    open_subsonic: bool,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// A decoded `subsonic-response` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct SubsonicResponse {
    pub status: ResponseStatus,
    /// Protocol version the server speaks.
    pub version: String,
    /// OpenSubsonic: server software name (`navidrome`, `gonic`, ...).
    pub server_type: Option<String>,
    /// OpenSubsonic: server software version.
    pub server_version: Option<String>,
    /// OpenSubsonic: whether the server implements the extensions.
    pub open_subsonic: bool,
    /// Set whenever the call failed.
    pub error: Option<ApiError>,
    /// Always [`ResponseBody::Empty`] when `error` is set.
    pub body: ResponseBody,
}

impl TryFrom<RawEnvelope> for SubsonicResponse {
    type Error = String;

    fn try_from(raw: RawEnvelope) -> std::result::Result<Self, String> {
        let failed = raw.status == ResponseStatus::Failed || raw.error.is_some();
        let (error, body) = if failed {
            let error = raw
                .error
                .unwrap_or_else(|| ApiError::new(ErrorCode::Generic));
            (Some(error), ResponseBody::Empty)
        } else {
            (None, select_body(raw.rest)?)
        };
        Ok(Self {
            status: raw.status,
            version: raw.version,
            server_type: raw.server_type,
            server_version: raw.server_version,
            open_subsonic: raw.open_subsonic,
            error,
            body,
        })
    }
}

/// Pick the one recognised result key; unknown keys are ignored.
fn select_body(rest: Map<String, Value>) -> std::result::Result<ResponseBody, String> {
    let mut body = ResponseBody::Empty;
    for (key, value) in rest {
        let Some(decoded) = ResponseBody::from_entry(&key, value) else {
            continue;
        };
        let decoded = decoded.map_err(|e| format!("invalid {key:?} in response: {e}"))?;
        if let Some(previous) = body.key() {
            return Err(format!(
                "response carries both {previous:?} and {key:?} results"
            ));
        }
        body = decoded;
    }
    Ok(body)
}

impl SubsonicResponse {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The result, or the server-reported error.
    pub fn into_result(self) -> std::result::Result<ResponseBody, ApiError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.body),
        }
    }
}

/// The document root: `{"subsonic-response": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(rename = "subsonic-response", default)]
    pub subsonic_response: Option<SubsonicResponse>,
}

/// Decode a JSON reply body into its envelope.
///
/// Malformed JSON is [`SubsonicError::Json`]; a document without a
/// `subsonic-response` object is [`SubsonicError::NoSubsonicResponse`].
pub fn decode_envelope(bytes: &[u8]) -> Result<SubsonicResponse> {
    let root: Response = serde_json::from_slice(bytes)?;
    root.subsonic_response
        .ok_or(SubsonicError::NoSubsonicResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_has_empty_body() {
        let env = decode_envelope(
            br#"{"subsonic-response":{"status":"ok","version":"1.16.1"}}"#,
        )
        .unwrap();
        assert!(env.is_ok());
        assert_eq!(env.version, "1.16.1");
        assert_eq!(env.body, ResponseBody::Empty);
        assert!(!env.open_subsonic);
    }

    #[test]
    fn failed_status_error_wins_over_payload() {
        let env = decode_envelope(
            br#"{"subsonic-response":{
                "status":"failed","version":"1.16.1",
                "error":{"code":70,"message":"Album not found"},
                "album":{"id":"a1","name":"Ghost"}
            }}"#,
        )
        .unwrap();
        assert_eq!(env.body, ResponseBody::Empty);
        let err = env.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Album not found");
    }

    #[test]
    fn failed_without_error_object_is_generic() {
        let env = decode_envelope(
            br#"{"subsonic-response":{"status":"failed","version":"1.16.1"}}"#,
        )
        .unwrap();
        assert_eq!(env.into_result().unwrap_err().code, ErrorCode::Generic);
    }

    #[test]
    fn missing_root_key_is_local_error() {
        let err = decode_envelope(br#"{"status":"ok","version":"1.16.1"}"#).unwrap_err();
        assert!(matches!(err, SubsonicError::NoSubsonicResponse));
        assert_eq!(err.code(), Some(-1));
        assert!(err.api_error().is_none());

        let err = decode_envelope(b"<html>").unwrap_err();
        assert!(matches!(err, SubsonicError::Json(_)));
    }

    #[test]
    fn realistic_album_payload() {
        let body = br#"{"subsonic-response":{
            "status":"ok","version":"1.16.1","type":"navidrome",
            "serverVersion":"0.53.3 (13af8ed4)","openSubsonic":true,
            "album":{
                "id":"3a1f","name":"Kind of Blue","artist":"Miles Davis",
                "artistId":"9c2e","coverArt":"al-3a1f_0","songCount":2,
                "duration":1103,"created":"2024-03-01T10:20:30.123456789Z",
                "year":1959,"genre":"Jazz","userRating":5,
                "genres":[{"name":"Jazz"}],
                "song":[
                    {"id":"t1","parent":"3a1f","isDir":false,"title":"So What",
                     "track":1,"duration":562,"bitRate":320,"suffix":"mp3",
                     "replayGain":{"trackGain":-6.5,"albumPeak":0.98}},
                    {"id":"t2","parent":"3a1f","isDir":false,"title":"Freddie Freeloader",
                     "track":2,"duration":541}
                ]
            }
        }}"#;
        let env = decode_envelope(body).unwrap();
        assert_eq!(env.server_type.as_deref(), Some("navidrome"));
        assert!(env.open_subsonic);
        assert_eq!(env.body.key(), Some("album"));
        let ResponseBody::Album(album) = env.into_result().unwrap() else {
            panic!("expected album body");
        };
        assert_eq!(album.album.name, "Kind of Blue");
        assert_eq!(album.album.year, 1959);
        assert_eq!(album.song.len(), 2);
        let gain = album.song[0].replay_gain.as_ref().unwrap();
        assert_eq!(gain.track_gain, Some(-6.5));
        assert_eq!(gain.base_gain, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let env = decode_envelope(
            br#"{"subsonic-response":{"status":"ok","version":"1.16.1",
                "xmlns":"http://subsonic.org/restapi",
                "scanStatus":{"scanning":true,"count":42}}}"#,
        )
        .unwrap();
        assert_eq!(
            env.body,
            ResponseBody::ScanStatus(ScanStatus {
                scanning: true,
                count: 42
            })
        );
    }

    #[test]
    fn two_result_keys_are_rejected() {
        let err = decode_envelope(
            br#"{"subsonic-response":{"status":"ok","version":"1.16.1",
                "genres":{"genre":[]},"license":{"valid":true}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SubsonicError::Json(_)));
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn extensions_list() {
        let env = decode_envelope(
            br#"{"subsonic-response":{"status":"ok","version":"1.16.1","openSubsonic":true,
                "openSubsonicExtensions":[{"name":"songLyrics","versions":[1]},
                                          {"name":"transcodeOffset","versions":[1]}]}}"#,
        )
        .unwrap();
        let ResponseBody::OpenSubsonicExtensions(ext) = env.body else {
            panic!("expected extensions");
        };
        assert_eq!(ext.len(), 2);
        assert_eq!(ext[0].name, "songLyrics");
    }

    #[test]
    fn keys_table_is_unique() {
        let mut keys = ResponseBody::KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ResponseBody::KEYS.len());
    }
}
