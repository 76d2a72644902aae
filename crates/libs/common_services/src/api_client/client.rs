use super::error::ApiClientError;
use app_state::BackendSettings;
use async_trait::async_trait;
use common_types::{
    AnalyzeRequest, AnalyzeResponse, BuildPlaylistRequest, BuildPlaylistResponse,
    FetchTracksRequest, FetchTracksResponse,
};
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

/// The remote color-playlist service.
///
/// Every call fails as a whole on a non-2xx response; there is no partial result.
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    async fn health(&self) -> Result<(), ApiClientError>;

    async fn fetch_tracks(
        &self,
        request: &FetchTracksRequest,
    ) -> Result<FetchTracksResponse, ApiClientError>;

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiClientError>;

    async fn build_playlist(
        &self,
        request: &BuildPlaylistRequest,
    ) -> Result<BuildPlaylistResponse, ApiClientError>;
}

/// HTTP implementation of [`PlaylistApi`].
///
/// Time bounds per call are applied by the caller, only the connect timeout lives here.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, ApiClientError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &settings.session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let http_client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .default_headers(headers)
            .build()?;

        Self::with_client(http_client, &settings.base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Result<Self, ApiClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Endpoints are joined relative to the base, which only works below a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http_client,
            base_url,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self.http_client.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiClientError::UnexpectedStatus { status, text });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlaylistApi for ApiClient {
    #[instrument(skip(self))]
    async fn health(&self) -> Result<(), ApiClientError> {
        let response = self.http_client.get(self.endpoint("health")?).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ApiClientError::UnexpectedStatus { status, text })
        }
    }

    #[instrument(skip(self, request), fields(source = %request.source, limit = request.limit))]
    async fn fetch_tracks(
        &self,
        request: &FetchTracksRequest,
    ) -> Result<FetchTracksResponse, ApiClientError> {
        self.post_json("fetch-tracks", request).await
    }

    #[instrument(skip(self, request), fields(hex = %request.hex, tracks = request.tracks.len()))]
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiClientError> {
        self.post_json("analyze", request).await
    }

    #[instrument(skip(self, request), fields(hex = %request.hex, tracks = request.tracks.len()))]
    async fn build_playlist(
        &self,
        request: &BuildPlaylistRequest,
    ) -> Result<BuildPlaylistResponse, ApiClientError> {
        self.post_json("build", request).await
    }
}
