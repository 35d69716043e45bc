//! Media retrieval APIs.
//!
//! ## `stream` — `GET /rest/stream.view?id=<id>&maxBitRate=128&format=mp3`
//!
//! Binary audio or video. The server may transcode; `format=raw` asks it
//! not to. An error comes back as a JSON envelope with HTTP 200, which
//! [`SubsonicClient::stream`] turns into [`SubsonicError::Api`].
//!
//! ## `download` — `GET /rest/download.view?id=<id>`
//!
//! The original file, never transcoded.
//!
//! ## `get_cover_art` — `GET /rest/getCoverArt.view?id=<coverArt>&size=300`
//!
//! Image bytes. `id` is the `coverArt` field of a song, album or artist.
//!
//! ## `get_lyrics_by_song_id` — `GET /rest/getLyricsBySongId.view?id=<id>`
//!
//! OpenSubsonic `songLyrics` extension:
//!
//! ```json
//! { "lyricsList": { "structuredLyrics": [
//!     { "lang": "eng", "synced": true, "offset": 0,
//!       "line": [ { "start": 0, "value": "First line" } ] }
//! ] } }
//! ```
//!
//! ## URL builders
//!
//! [`stream_url`](SubsonicClient::stream_url) and friends return fully
//! authenticated URLs for handing to an external player. They embed the
//! credentials, so treat them as secrets.

use crate::client::{SubsonicClient, expect_body};
use crate::error::{Result, SubsonicError};
use crate::objects::{Lyrics, StructuredLyrics};
use crate::requests::{GetCaptions, GetCoverArt, GetLyrics, Stream};
use crate::types::SubsonicId;
use crate::values::{QueryValues, marshal_values};

use reqwest::blocking::Response;

impl SubsonicClient {
    /// Open a media stream. Read it with [`std::io::Read`] or
    /// [`Response::copy_to`].
    pub fn stream(&mut self, req: &Stream) -> Result<Response> {
        let params = marshal_values(req)?;
        self.get_raw("stream", params)
    }

    /// Open the original file for download.
    pub fn download(&mut self, id: &SubsonicId) -> Result<Response> {
        self.get_raw("download", QueryValues::single("id", id.as_str()))
    }

    /// Captions of a video as text (`srt` or `vtt`).
    pub fn get_captions(&mut self, req: &GetCaptions) -> Result<String> {
        let params = marshal_values(req)?;
        let bytes = self.get_bytes("getCaptions", params)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn get_cover_art(&mut self, req: &GetCoverArt) -> Result<Vec<u8>> {
        let params = marshal_values(req)?;
        self.get_bytes("getCoverArt", params)
    }

    /// Avatar image of a user.
    pub fn get_avatar(&mut self, username: &str) -> Result<Vec<u8>> {
        self.get_bytes("getAvatar", QueryValues::single("username", username))
    }

    /// Plain lyrics looked up by artist and title.
    pub fn get_lyrics(&mut self, req: &GetLyrics) -> Result<Lyrics> {
        let body = self.call_with("getLyrics", req)?;
        expect_body!(body, "lyrics" => Lyrics, or_default)
    }

    /// Structured, possibly synced, lyrics of a song.
    ///
    /// # Errors
    ///
    /// [`SubsonicError::OpenSubsonicUnsupported`] without a request unless
    /// the server has advertised OpenSubsonic support.
    pub fn get_lyrics_by_song_id(&mut self, id: &SubsonicId) -> Result<Vec<StructuredLyrics>> {
        if !self.session().open_subsonic {
            return Err(SubsonicError::OpenSubsonicUnsupported);
        }
        let body = self.call("getLyricsBySongId", QueryValues::single("id", id.as_str()))?;
        let list = expect_body!(body, "lyricsList" => LyricsList, or_default)?;
        Ok(list.structured_lyrics)
    }

    // ── URL builders ────────────────────────────────────────────────

    pub fn stream_url(&self, req: &Stream) -> Result<String> {
        Ok(self.request_url("stream", marshal_values(req)?))
    }

    pub fn download_url(&self, id: &SubsonicId) -> String {
        self.request_url("download", QueryValues::single("id", id.as_str()))
    }

    pub fn cover_art_url(&self, req: &GetCoverArt) -> Result<String> {
        Ok(self.request_url("getCoverArt", marshal_values(req)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    fn client() -> SubsonicClient {
        SubsonicClient::new(ServerConfig::new("https://music.example.com", "alice", "sesame"))
            .unwrap()
    }

    #[test]
    fn stream_url_carries_options() {
        let c = client();
        let mut req = Stream::new("t1");
        req.max_bit_rate = Some(128);
        req.format = Some("opus".into());
        let url = c.stream_url(&req).unwrap();
        assert!(url.starts_with("https://music.example.com/rest/stream.view?v=1.8.0&c="));
        assert!(url.ends_with("&id=t1&maxBitRate=128&format=opus"));
        assert!(!url.contains("timeOffset"));
    }

    #[test]
    fn download_and_cover_art_urls() {
        let c = client();
        let url = c.download_url(&SubsonicId::from("t 1"));
        assert!(url.starts_with("https://music.example.com/rest/download.view?"));
        assert!(url.ends_with("&id=t%201"));

        let req = GetCoverArt {
            id: "al-1".into(),
            size: Some(300),
        };
        let url = c.cover_art_url(&req).unwrap();
        assert!(url.contains("/rest/getCoverArt.view?"));
        assert!(url.ends_with("&id=al-1&size=300"));
    }

    #[test]
    fn song_lyrics_need_open_subsonic() {
        let mut c = SubsonicClient::new(ServerConfig::new("http://192.0.2.1", "u", "p")).unwrap();
        let err = c.get_lyrics_by_song_id(&SubsonicId::from("t1")).unwrap_err();
        assert!(matches!(err, SubsonicError::OpenSubsonicUnsupported));
    }
}
