//! Sharing APIs.
//!
//! ## `create_share` — `GET /rest/createShare.view?id=t1&id=t2&expires=1735689600000`
//!
//! ```json
//! { "shares": { "share": [ {
//!     "id": "sh-1", "url": "https://music.example.com/share/Xk2a",
//!     "username": "alice", "created": "2024-04-05T18:00:00.000Z",
//!     "visitCount": 0, "entry": [ { "id": "t1", "title": "..." } ]
//! } ] } }
//! ```
//!
//! The reply lists exactly the one share just created.
//!
//! ## `update_share` / `delete_share`
//!
//! Empty replies.

use crate::client::{SubsonicClient, expect_body};
use crate::error::{Result, SubsonicError};
use crate::objects::{Share, Shares};
use crate::requests::{CreateShare, UpdateShare};
use crate::types::SubsonicId;
use crate::values::QueryValues;

/// The single share of a `createShare` reply.
fn created_share(shares: Shares) -> Result<Share> {
    let count = shares.share.len();
    let mut iter = shares.share.into_iter();
    match (iter.next(), count) {
        (Some(share), 1) => Ok(share),
        _ => Err(SubsonicError::Other(format!(
            "expected one share in createShare reply, got {count}"
        ))),
    }
}

impl SubsonicClient {
    /// Shares the current user may manage.
    pub fn get_shares(&mut self) -> Result<Vec<Share>> {
        let body = self.call("getShares", QueryValues::new())?;
        let shares = expect_body!(body, "shares" => Shares, or_default)?;
        Ok(shares.share)
    }

    /// Create a public link to songs, albums or videos.
    pub fn create_share(&mut self, req: &CreateShare) -> Result<Share> {
        let body = self.call_with("createShare", req)?;
        let shares = expect_body!(body, "shares" => Shares)?;
        created_share(shares)
    }

    /// Change the description or expiry of a share.
    pub fn update_share(&mut self, req: &UpdateShare) -> Result<()> {
        self.call_with("updateShare", req)?;
        Ok(())
    }

    pub fn delete_share(&mut self, id: &SubsonicId) -> Result<()> {
        self.call("deleteShare", QueryValues::single("id", id.as_str()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(id: &str) -> Share {
        Share {
            id: id.into(),
            ..Share::default()
        }
    }

    #[test]
    fn exactly_one_share_expected() {
        let one = Shares {
            share: vec![share("sh-1")],
        };
        assert_eq!(created_share(one).unwrap().id.as_str(), "sh-1");

        let err = created_share(Shares::default()).unwrap_err();
        assert!(err.to_string().contains("got 0"));

        let two = Shares {
            share: vec![share("a"), share("b")],
        };
        assert!(created_share(two).unwrap_err().to_string().contains("got 2"));
    }
}
