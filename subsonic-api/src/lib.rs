//! Subsonic / OpenSubsonic REST API client library.
//!
//! Typed, blocking access to any Subsonic-compatible music server
//! (Navidrome, Gonic, Airsonic, Subsonic itself, ...): browsing, lists,
//! search, playlists, streaming, annotation, sharing, podcasts, jukebox,
//! chat, bookmarks and library scans.
//!
//! # Connecting
//!
//! The server URL and credentials are persisted to
//! `~/.config/subsonic-rs/server.json`.
//!
//! ```no_run
//! use subsonic_api::{ServerConfig, SubsonicClient};
//!
//! // Save credentials
//! let config = ServerConfig::new("music.example.com", "alice", "sesame");
//! config.save().unwrap();
//!
//! // Create client (loads config from disk) and check it works
//! let mut client = SubsonicClient::from_saved().unwrap();
//! client.ping().unwrap();
//! println!("server speaks {}", client.session().version);
//! ```
//!
//! # Requests
//!
//! Calls with more than one parameter take a descriptor from
//! [`requests`]. Descriptors are marshalled to query parameters by
//! [`values::QueryParams`]; empty optional fields are left out.
//!
//! ```no_run
//! use subsonic_api::SubsonicClient;
//! use subsonic_api::requests::{AlbumListType, GetAlbumList};
//!
//! let mut client = SubsonicClient::from_saved().unwrap();
//! let mut req = GetAlbumList::new(AlbumListType::Newest);
//! req.size = Some(10);
//! for album in client.get_album_list2(&req).unwrap() {
//!     println!("{} - {}", album.artist, album.name);
//! }
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                          | REST endpoint              | Description             |
//! |-------------------------------------------------|----------------------------|-------------------------|
//! | [`SubsonicClient::ping`]                        | `ping`                     | Connectivity check      |
//! | [`SubsonicClient::get_open_subsonic_extensions`]| `getOpenSubsonicExtensions`| Supported extensions    |
//! | [`SubsonicClient::get_artists`]                 | `getArtists`               | ID3 artist index        |
//! | [`SubsonicClient::get_artist`]                  | `getArtist`                | Artist with albums      |
//! | [`SubsonicClient::get_album`]                   | `getAlbum`                 | Album with songs        |
//! | [`SubsonicClient::get_album_list2`]             | `getAlbumList2`            | Newest, random, ...     |
//! | [`SubsonicClient::search3`]                     | `search3`                  | Search                  |
//! | [`SubsonicClient::get_playlist`]                | `getPlaylist`              | Playlist with songs     |
//! | [`SubsonicClient::stream`]                      | `stream`                   | Audio / video stream    |
//! | [`SubsonicClient::download`]                    | `download`                 | Original file           |
//! | [`SubsonicClient::star`]                        | `star`                     | Star items              |
//! | [`SubsonicClient::scrobble`]                    | `scrobble`                 | Register a play         |
//! | [`SubsonicClient::create_share`]                | `createShare`              | Public link             |
//! | [`SubsonicClient::jukebox_control`]             | `jukeboxControl`           | Server-side playback    |
//! | [`SubsonicClient::get_play_queue`]              | `getPlayQueue`             | Saved play queue        |
//!
//! Every other REST call has a method of the same name in snake case.
//!
//! # Errors
//!
//! A server-side failure arrives with HTTP 200 and is returned as
//! [`SubsonicError::Api`] carrying an [`ApiError`]. Its [`ErrorCode`]
//! distinguishes wrong credentials (40), missing rights (50), not found
//! (70) and so on.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod objects;
pub mod requests;
pub mod response;
pub mod types;
pub mod values;

mod annotation;
mod bookmarks;
mod browsing;
mod chat;
mod jukebox;
mod lists;
mod media;
mod playlists;
mod podcasts;
mod radio;
mod searching;
mod sharing;
mod system;
mod users;

pub use annotation::MAX_RATING;
pub use client::{Session, SubsonicClient};
pub use config::ServerConfig;
pub use error::{ApiError, ErrorCode, QueryTextError, Result, SubsonicError};
pub use jukebox::JukeboxResult;
pub use types::{SubsonicDuration, SubsonicId, UnixMillis};
