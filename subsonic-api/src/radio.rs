//! Internet radio APIs.
//!
//! ## `get_internet_radio_stations` — `GET /rest/getInternetRadioStations.view`
//!
//! ```json
//! { "internetRadioStations": { "internetRadioStation": [
//!     { "id": "1", "name": "NTS 1", "streamUrl": "https://stream-relay-geo.ntslive.net/stream",
//!       "homepageUrl": "https://www.nts.live" }
//! ] } }
//! ```

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::InternetRadioStation;
use crate::values::QueryValues;

impl SubsonicClient {
    pub fn get_internet_radio_stations(&mut self) -> Result<Vec<InternetRadioStation>> {
        let body = self.call("getInternetRadioStations", QueryValues::new())?;
        let stations =
            expect_body!(body, "internetRadioStations" => InternetRadioStations, or_default)?;
        Ok(stations.internet_radio_station)
    }
}
