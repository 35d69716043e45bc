//! Jukebox control: playback on the server's own audio hardware.
//!
//! ## `jukebox_control` — `GET /rest/jukeboxControl.view?action=add&id=t1&id=t2`
//!
//! Every action except `get` replies with the status:
//!
//! ```json
//! { "jukeboxStatus": { "currentIndex": 0, "playing": true, "gain": 0.75, "position": 17 } }
//! ```
//!
//! `get` replies with the status fields plus the queued entries under
//! `jukeboxPlaylist`.

use crate::client::SubsonicClient;
use crate::error::{Result, SubsonicError};
use crate::objects::{JukeboxPlaylist, JukeboxStatus};
use crate::requests::JukeboxControl;
use crate::response::ResponseBody;

/// Reply of [`SubsonicClient::jukebox_control`].
#[derive(Debug, Clone, PartialEq)]
pub enum JukeboxResult {
    Status(JukeboxStatus),
    /// Only for [`JukeboxAction::Get`](crate::requests::JukeboxAction::Get).
    Playlist(JukeboxPlaylist),
}

impl JukeboxResult {
    pub fn status(&self) -> &JukeboxStatus {
        match self {
            Self::Status(status) => status,
            Self::Playlist(playlist) => &playlist.status,
        }
    }
}

impl TryFrom<ResponseBody> for JukeboxResult {
    type Error = SubsonicError;

    fn try_from(body: ResponseBody) -> Result<Self> {
        match body {
            ResponseBody::JukeboxStatus(status) => Ok(Self::Status(status)),
            ResponseBody::JukeboxPlaylist(playlist) => Ok(Self::Playlist(playlist)),
            other => Err(SubsonicError::UnexpectedResponse {
                expected: "jukeboxStatus",
                found: other.key(),
            }),
        }
    }
}

impl SubsonicClient {
    /// Needs the jukebox role on the server.
    pub fn jukebox_control(&mut self, req: &JukeboxControl) -> Result<JukeboxResult> {
        let body = self.call_with("jukeboxControl", req)?;
        JukeboxResult::try_from(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Child;

    #[test]
    fn status_and_playlist_replies() {
        let status = JukeboxStatus {
            current_index: 1,
            playing: true,
            gain: 0.5,
            position: 30,
        };
        let result = JukeboxResult::try_from(ResponseBody::JukeboxStatus(status.clone())).unwrap();
        assert_eq!(result, JukeboxResult::Status(status.clone()));

        let playlist = JukeboxPlaylist {
            status: status.clone(),
            entry: vec![Child::default()],
        };
        let result = JukeboxResult::try_from(ResponseBody::JukeboxPlaylist(playlist)).unwrap();
        assert_eq!(result.status(), &status);
        assert!(matches!(result, JukeboxResult::Playlist(ref p) if p.entry.len() == 1));
    }

    #[test]
    fn empty_reply_is_unexpected() {
        let err = JukeboxResult::try_from(ResponseBody::Empty).unwrap_err();
        assert!(matches!(
            err,
            SubsonicError::UnexpectedResponse { expected: "jukeboxStatus", found: None }
        ));
    }
}
