//! System and media-library scanning APIs.
//!
//! ## `ping` — `GET /rest/ping.view`
//!
//! Response: `{"subsonic-response": {"status": "ok", "version": "1.16.1"}}`
//!
//! Used to test connectivity and credentials. A wrong password comes back
//! as error 40 inside the envelope, with HTTP status 200.
//!
//! ## `get_license` — `GET /rest/getLicense.view`
//!
//! ```json
//! { "license": { "valid": true, "email": "foo@bar.com",
//!                "licenseExpires": "2029-01-01T00:00:00.000Z" } }
//! ```
//!
//! ## `get_open_subsonic_extensions` — `GET /rest/getOpenSubsonicExtensions.view`
//!
//! ```json
//! { "openSubsonicExtensions": [ { "name": "songLyrics", "versions": [1] } ] }
//! ```
//!
//! Only called once a previous reply carried `"openSubsonic": true`.
//!
//! ## `get_scan_status` / `start_scan`
//!
//! Both return `{ "scanStatus": { "scanning": true, "count": 1042 } }`.

use crate::client::{SubsonicClient, expect_body};
use crate::error::{Result, SubsonicError};
use crate::objects::{License, OpenSubsonicExtension, ScanStatus};
use crate::values::QueryValues;

impl SubsonicClient {
    /// Check connectivity and credentials.
    ///
    /// Also refreshes the session's protocol version and OpenSubsonic flag.
    pub fn ping(&mut self) -> Result<()> {
        self.call("ping", QueryValues::new())?;
        Ok(())
    }

    pub fn get_license(&mut self) -> Result<License> {
        let body = self.call("getLicense", QueryValues::new())?;
        expect_body!(body, "license" => License)
    }

    /// List the OpenSubsonic extensions the server implements.
    ///
    /// # Errors
    ///
    /// [`SubsonicError::OpenSubsonicUnsupported`] without making a request
    /// unless an earlier reply advertised OpenSubsonic support. Call
    /// [`ping`](Self::ping) first on a fresh client.
    pub fn get_open_subsonic_extensions(&mut self) -> Result<Vec<OpenSubsonicExtension>> {
        if !self.session().open_subsonic {
            return Err(SubsonicError::OpenSubsonicUnsupported);
        }
        let body = self.call("getOpenSubsonicExtensions", QueryValues::new())?;
        expect_body!(body, "openSubsonicExtensions" => OpenSubsonicExtensions, or_default)
    }

    pub fn get_scan_status(&mut self) -> Result<ScanStatus> {
        let body = self.call("getScanStatus", QueryValues::new())?;
        expect_body!(body, "scanStatus" => ScanStatus)
    }

    /// Start a library rescan; returns the status right after starting.
    pub fn start_scan(&mut self) -> Result<ScanStatus> {
        let body = self.call("startScan", QueryValues::new())?;
        expect_body!(body, "scanStatus" => ScanStatus)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::SubsonicClient;
    use crate::config::ServerConfig;
    use crate::error::SubsonicError;

    #[test]
    fn extensions_gated_before_any_request() {
        // Unroutable address: the call must fail before touching the network.
        let config = ServerConfig::new("http://192.0.2.1", "u", "p");
        let mut client = SubsonicClient::new(config).unwrap();
        let err = client.get_open_subsonic_extensions().unwrap_err();
        assert!(matches!(err, SubsonicError::OpenSubsonicUnsupported));
        assert_eq!(err.code(), Some(-2));
        assert!(!client.session().server_available);
    }
}
