//! Request descriptors for the Nexus Mods API.
//!
//! The API is read-only from this client's point of view, so every request
//! is a GET. A request is a path plus ordered query parameters and extra
//! headers.

/// A GET request to be sent to the Nexus Mods API.
///
/// Query parameters keep their insertion order and may repeat; extra header
/// names are matched case-insensitively when merged with the client's
/// mandatory headers.
///
/// # Example
///
/// ```rust
/// use nexusmods_api::HttpRequest;
///
/// let request = HttpRequest::builder("/v1/games/skyrim/mods/updated.json")
///     .query_param("period", "1w")
///     .header("Application-Name", "MyModManager")
///     .build();
///
/// assert_eq!(request.path, "/v1/games/skyrim/mods/updated.json");
/// assert_eq!(request.query, vec![("period".to_string(), "1w".to_string())]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpRequest {
    /// The resource path, e.g. `/v1/games/skyrim.json`.
    pub path: String,
    /// Query parameters, URL-encoded by the transport.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a request for `path` with no query parameters or extra headers.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest::new(path),
        }
    }

    /// Replaces all query parameters at once.
    #[must_use]
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request.query = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Replaces all extra headers at once.
    #[must_use]
    pub fn extra_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request.extra_headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Appends a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.extra_headers.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}
