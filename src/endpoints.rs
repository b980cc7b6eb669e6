//! The fixed catalogue of Nexus Mods v1 endpoints.
//!
//! Each endpoint is a path template. Identifiers (game domain, mod id, file
//! id, MD5 hash) are substituted verbatim; no escaping is applied beyond
//! the query encoding done by the transport.
//!
//! # Example
//!
//! ```rust
//! use nexusmods_api::Endpoint;
//!
//! let endpoint = Endpoint::ModFile {
//!     game: "skyrimspecialedition",
//!     mod_id: "266",
//!     file_id: "1000",
//! };
//! assert_eq!(
//!     endpoint.path(),
//!     "/v1/games/skyrimspecialedition/mods/266/files/1000.json"
//! );
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiError, HttpRequest, NexusClient};

/// A logical API operation and the identifiers it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Mods updated within a period.
    UpdatedMods { game: &'a str },
    /// Changelogs of a mod, keyed by version.
    ModChangelogs { game: &'a str, mod_id: &'a str },
    /// The ten most recently added mods.
    LatestAdded { game: &'a str },
    /// The ten most recently updated mods.
    LatestUpdated { game: &'a str },
    /// Ten trending mods.
    Trending { game: &'a str },
    /// A single mod.
    Mod { game: &'a str, mod_id: &'a str },
    /// Mods and files matching an MD5 hash.
    Md5Search { game: &'a str, md5_hash: &'a str },
    /// Files belonging to a mod.
    ModFiles { game: &'a str, mod_id: &'a str },
    /// A single file of a mod.
    ModFile {
        game: &'a str,
        mod_id: &'a str,
        file_id: &'a str,
    },
    /// Download links for a file.
    FileDownloadLink {
        game: &'a str,
        mod_id: &'a str,
        file_id: &'a str,
    },
    /// A single game.
    Game { game: &'a str },
}

impl Endpoint<'_> {
    /// Renders the endpoint's path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::UpdatedMods { game } => format!("/v1/games/{game}/mods/updated.json"),
            Self::ModChangelogs { game, mod_id } => {
                format!("/v1/games/{game}/mods/{mod_id}/changelogs.json")
            }
            Self::LatestAdded { game } => format!("/v1/games/{game}/mods/latest_added.json"),
            Self::LatestUpdated { game } => format!("/v1/games/{game}/mods/latest_updated.json"),
            Self::Trending { game } => format!("/v1/games/{game}/mods/trending.json"),
            Self::Mod { game, mod_id } => format!("/v1/games/{game}/mods/{mod_id}.json"),
            Self::Md5Search { game, md5_hash } => {
                format!("/v1/games/{game}/mods/md5_search/{md5_hash}.json")
            }
            Self::ModFiles { game, mod_id } => format!("/v1/games/{game}/mods/{mod_id}/files.json"),
            Self::ModFile {
                game,
                mod_id,
                file_id,
            } => format!("/v1/games/{game}/mods/{mod_id}/files/{file_id}.json"),
            Self::FileDownloadLink {
                game,
                mod_id,
                file_id,
            } => format!("/v1/games/{game}/mods/{mod_id}/files/{file_id}/download_link.json"),
            Self::Game { game } => format!("/v1/games/{game}.json"),
        }
    }

    /// Builds a request for this endpoint with no query parameters.
    #[must_use]
    pub fn request(&self) -> HttpRequest {
        HttpRequest::new(self.path())
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Window accepted by the updated-mods endpoint's `period` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UpdatePeriod {
    /// The last day.
    #[serde(rename = "1d")]
    Day,
    /// The last week.
    #[serde(rename = "1w")]
    Week,
    /// The last month.
    #[serde(rename = "1m")]
    Month,
}

impl UpdatePeriod {
    /// Returns the value sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "1d",
            Self::Week => "1w",
            Self::Month => "1m",
        }
    }
}

impl fmt::Display for UpdatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn with_params(endpoint: Endpoint<'_>, params: &[(&str, &str)]) -> HttpRequest {
    HttpRequest::builder(endpoint.path())
        .query(params.iter().copied())
        .build()
}

/// Endpoint convenience calls.
///
/// Every call returns the decoded JSON document or an [`ApiError`]; branch
/// on [`ApiError::code`] to tell transport, HTTP and parse failures apart.
impl NexusClient {
    /// Calls an arbitrary catalogue endpoint with optional query parameters.
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn call(
        &self,
        endpoint: Endpoint<'_>,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.get_json(&with_params(endpoint, params)).await
    }

    /// `GET /v1/games/{game}/mods/updated.json`
    ///
    /// The API requires a `period` parameter (`1d`, `1w` or `1m`); see
    /// [`get_updated_mods_for_period`](Self::get_updated_mods_for_period).
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_updated_mods(
        &self,
        game: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.call(Endpoint::UpdatedMods { game }, params).await
    }

    /// `GET /v1/games/{game}/mods/updated.json?period={period}`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_updated_mods_for_period(
        &self,
        game: &str,
        period: UpdatePeriod,
    ) -> Result<Value, ApiError> {
        self.get_updated_mods(game, &[("period", period.as_str())])
            .await
    }

    /// `GET /v1/games/{game}/mods/{mod_id}/changelogs.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_mod_changelogs(
        &self,
        game: &str,
        mod_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.call(Endpoint::ModChangelogs { game, mod_id }, params)
            .await
    }

    /// `GET /v1/games/{game}/mods/latest_added.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_latest_added(&self, game: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::LatestAdded { game }, &[]).await
    }

    /// `GET /v1/games/{game}/mods/latest_updated.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_latest_updated(&self, game: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::LatestUpdated { game }, &[]).await
    }

    /// `GET /v1/games/{game}/mods/trending.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_trending(&self, game: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::Trending { game }, &[]).await
    }

    /// `GET /v1/games/{game}/mods/{mod_id}.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_mod(&self, game: &str, mod_id: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::Mod { game, mod_id }, &[]).await
    }

    /// `GET /v1/games/{game}/mods/md5_search/{md5_hash}.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn md5_search(&self, game: &str, md5_hash: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::Md5Search { game, md5_hash }, &[]).await
    }

    /// `GET /v1/games/{game}/mods/{mod_id}/files.json`
    ///
    /// Accepts the API's optional `category` filter through `params`.
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn list_mod_files(
        &self,
        game: &str,
        mod_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.call(Endpoint::ModFiles { game, mod_id }, params).await
    }

    /// `GET /v1/games/{game}/mods/{mod_id}/files/{file_id}.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_mod_file(
        &self,
        game: &str,
        mod_id: &str,
        file_id: &str,
    ) -> Result<Value, ApiError> {
        self.call(
            Endpoint::ModFile {
                game,
                mod_id,
                file_id,
            },
            &[],
        )
        .await
    }

    /// `GET /v1/games/{game}/mods/{mod_id}/files/{file_id}/download_link.json`
    ///
    /// Works as-is for premium accounts. Other accounts must pass the `key`
    /// and `expires` values from the website's `nxm://` link through
    /// [`get_file_download_link_with`](Self::get_file_download_link_with).
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_file_download_link(
        &self,
        game: &str,
        mod_id: &str,
        file_id: &str,
    ) -> Result<Value, ApiError> {
        self.get_file_download_link_with(game, mod_id, file_id, &[])
            .await
    }

    /// Download links with caller-supplied query parameters, e.g.
    /// `[("key", key), ("expires", expires)]` from an `nxm://` link.
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_file_download_link_with(
        &self,
        game: &str,
        mod_id: &str,
        file_id: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.call(
            Endpoint::FileDownloadLink {
                game,
                mod_id,
                file_id,
            },
            params,
        )
        .await
    }

    /// `GET /v1/games/{game}.json`
    ///
    /// # Errors
    ///
    /// See [`NexusClient::get_json`].
    pub async fn get_game(&self, game: &str) -> Result<Value, ApiError> {
        self.call(Endpoint::Game { game }, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_path() {
        let game = "skyrim";
        let cases = [
            (
                Endpoint::UpdatedMods { game },
                "/v1/games/skyrim/mods/updated.json",
            ),
            (
                Endpoint::ModChangelogs { game, mod_id: "12" },
                "/v1/games/skyrim/mods/12/changelogs.json",
            ),
            (
                Endpoint::LatestAdded { game },
                "/v1/games/skyrim/mods/latest_added.json",
            ),
            (
                Endpoint::LatestUpdated { game },
                "/v1/games/skyrim/mods/latest_updated.json",
            ),
            (
                Endpoint::Trending { game },
                "/v1/games/skyrim/mods/trending.json",
            ),
            (
                Endpoint::Mod { game, mod_id: "12" },
                "/v1/games/skyrim/mods/12.json",
            ),
            (
                Endpoint::Md5Search {
                    game,
                    md5_hash: "d41d8cd98f00b204e9800998ecf8427e",
                },
                "/v1/games/skyrim/mods/md5_search/d41d8cd98f00b204e9800998ecf8427e.json",
            ),
            (
                Endpoint::ModFiles { game, mod_id: "12" },
                "/v1/games/skyrim/mods/12/files.json",
            ),
            (
                Endpoint::ModFile {
                    game,
                    mod_id: "12",
                    file_id: "34",
                },
                "/v1/games/skyrim/mods/12/files/34.json",
            ),
            (
                Endpoint::FileDownloadLink {
                    game,
                    mod_id: "12",
                    file_id: "34",
                },
                "/v1/games/skyrim/mods/12/files/34/download_link.json",
            ),
            (Endpoint::Game { game }, "/v1/games/skyrim.json"),
        ];

        for (endpoint, expected) in cases {
            assert_eq!(endpoint.path(), expected);
            assert_eq!(endpoint.to_string(), expected);
        }
    }

    #[test]
    fn test_identifiers_are_substituted_verbatim() {
        let endpoint = Endpoint::Mod {
            game: "fallout 4",
            mod_id: "a/b",
        };
        assert_eq!(endpoint.path(), "/v1/games/fallout 4/mods/a/b.json");
    }

    #[test]
    fn test_with_params_keeps_order() {
        let request = with_params(
            Endpoint::FileDownloadLink {
                game: "skyrim",
                mod_id: "1",
                file_id: "2",
            },
            &[("key", "abc"), ("expires", "123")],
        );
        assert_eq!(
            request.query,
            vec![
                ("key".to_string(), "abc".to_string()),
                ("expires".to_string(), "123".to_string()),
            ]
        );
        assert!(request.extra_headers.is_empty());
    }

    #[test]
    fn test_update_period_wire_values() {
        assert_eq!(UpdatePeriod::Day.as_str(), "1d");
        assert_eq!(UpdatePeriod::Week.to_string(), "1w");
        assert_eq!(
            serde_json::to_string(&UpdatePeriod::Month).unwrap(),
            r#""1m""#
        );
    }

    #[test]
    fn test_endpoint_request_has_no_query() {
        let request = Endpoint::Game { game: "skyrim" }.request();
        assert_eq!(request.path, "/v1/games/skyrim.json");
        assert!(request.query.is_empty());
    }
}
