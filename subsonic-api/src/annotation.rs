//! Media annotation APIs: stars, ratings and scrobbles.
//!
//! ## `star` — `GET /rest/star.view?id=t1&albumId=al-1&artistId=ar-1`
//!
//! Each of `id`, `albumId` and `artistId` may repeat. Empty reply.
//!
//! ## `set_rating` — `GET /rest/setRating.view?id=t1&rating=4`
//!
//! `rating` is 1 to 5, or 0 to remove the rating.
//!
//! ## `scrobble` — `GET /rest/scrobble.view?id=t1&time=1712340000000&submission=true`
//!
//! `time` is milliseconds since the epoch. `submission=false` only updates
//! "now playing".

use crate::client::SubsonicClient;
use crate::error::{QueryTextError, Result, SubsonicError};
use crate::requests::{Scrobble, StarTargets};
use crate::types::SubsonicId;
use crate::values::QueryValues;

/// Highest rating the protocol accepts.
pub const MAX_RATING: u8 = 5;

fn rating_query(id: &SubsonicId, rating: u8) -> Result<QueryValues> {
    if rating > MAX_RATING {
        return Err(SubsonicError::InvalidQueryValue {
            name: "rating".into(),
            source: QueryTextError::OutOfRange {
                value: rating.into(),
                min: 0,
                max: MAX_RATING.into(),
            },
        });
    }
    let mut q = QueryValues::single("id", id.as_str());
    q.set("rating", rating.to_string());
    Ok(q)
}

impl SubsonicClient {
    /// Star songs, albums and artists.
    pub fn star(&mut self, targets: &StarTargets) -> Result<()> {
        self.call_with("star", targets)?;
        Ok(())
    }

    pub fn unstar(&mut self, targets: &StarTargets) -> Result<()> {
        self.call_with("unstar", targets)?;
        Ok(())
    }

    /// Rate a song, album or artist; `0` removes the rating.
    pub fn set_rating(&mut self, id: &SubsonicId, rating: u8) -> Result<()> {
        let params = rating_query(id, rating)?;
        self.call("setRating", params)?;
        Ok(())
    }

    /// Register a play, or only update "now playing".
    pub fn scrobble(&mut self, req: &Scrobble) -> Result<()> {
        self.call_with("scrobble", req)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_range() {
        let id = SubsonicId::from("t1");
        assert_eq!(rating_query(&id, 0).unwrap().encode(), "id=t1&rating=0");
        assert_eq!(rating_query(&id, 5).unwrap().encode(), "id=t1&rating=5");
        let err = rating_query(&id, 6).unwrap_err();
        assert!(matches!(err, SubsonicError::InvalidQueryValue { ref name, .. } if name == "rating"));
    }
}
