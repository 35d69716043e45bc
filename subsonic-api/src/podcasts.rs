//! Podcast APIs.
//!
//! ## `get_podcasts` — `GET /rest/getPodcasts.view?includeEpisodes=false`
//!
//! ```json
//! { "podcasts": { "channel": [ {
//!     "id": "pc-1", "url": "https://feeds.example.com/show.xml",
//!     "title": "Show", "status": "completed",
//!     "episode": [ { "id": "ep-1", "streamId": "t-ep-1", "channelId": "pc-1",
//!                    "title": "Pilot", "status": "completed",
//!                    "publishDate": "2024-02-01T06:00:00.000Z" } ]
//! } ] } }
//! ```
//!
//! The mutating calls (`refreshPodcasts`, `createPodcastChannel`, ...)
//! need podcast administration rights and reply with an empty body.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::{PodcastChannel, PodcastEpisode};
use crate::requests::GetPodcasts;
use crate::types::SubsonicId;
use crate::values::QueryValues;

impl SubsonicClient {
    /// Subscribed channels, optionally with their episodes.
    pub fn get_podcasts(&mut self, req: &GetPodcasts) -> Result<Vec<PodcastChannel>> {
        let body = self.call_with("getPodcasts", req)?;
        let podcasts = expect_body!(body, "podcasts" => Podcasts, or_default)?;
        Ok(podcasts.channel)
    }

    /// Most recently published episodes across all channels.
    pub fn get_newest_podcasts(&mut self, count: Option<u32>) -> Result<Vec<PodcastEpisode>> {
        let params = count.map_or_else(QueryValues::new, |n| {
            QueryValues::single("count", n.to_string())
        });
        let body = self.call("getNewestPodcasts", params)?;
        let newest = expect_body!(body, "newestPodcasts" => NewestPodcasts, or_default)?;
        Ok(newest.episode)
    }

    /// Ask the server to check every channel for new episodes.
    pub fn refresh_podcasts(&mut self) -> Result<()> {
        self.call("refreshPodcasts", QueryValues::new())?;
        Ok(())
    }

    /// Subscribe to the feed at `url`.
    pub fn create_podcast_channel(&mut self, url: &str) -> Result<()> {
        self.call("createPodcastChannel", QueryValues::single("url", url))?;
        Ok(())
    }

    pub fn delete_podcast_channel(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("deletePodcastChannel", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }

    pub fn delete_podcast_episode(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("deletePodcastEpisode", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }

    /// Ask the server to fetch an episode; it becomes streamable via its
    /// `streamId` once the download completes.
    pub fn download_podcast_episode(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("downloadPodcastEpisode", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }
}
