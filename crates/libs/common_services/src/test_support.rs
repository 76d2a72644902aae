use crate::analysis::{ProgressReport, ProgressView};
use crate::api_client::{ApiClientError, PlaylistApi};
use async_trait::async_trait;
use common_types::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, BuildPlaylistRequest, BuildPlaylistResponse,
    FetchTracksRequest, FetchTracksResponse, Track,
};
use reqwest::StatusCode;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

pub fn track(i: usize) -> Track {
    Track {
        id: Some(format!("id{i}")),
        uri: format!("spotify:track:{i}"),
        name: format!("Track {i}"),
        artists: "Artist".to_string(),
        image_url: None,
    }
}

pub fn tracks(n: usize) -> Vec<Track> {
    (0..n).map(track).collect()
}

pub fn result(i: usize, distance: f64) -> AnalysisResult {
    AnalysisResult {
        track: track(i),
        distance,
        dominant: None,
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub fetch: Vec<FetchTracksRequest>,
    pub analyze: Vec<AnalyzeRequest>,
    pub build: Vec<BuildPlaylistRequest>,
}

/// In-memory backend with per-call delays and failures.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub tracks: Vec<Track>,
    pub results: Vec<AnalysisResult>,
    pub fetch_delay: Duration,
    pub analyze_delay: Duration,
    pub build_delay: Duration,
    pub fetch_status: Option<u16>,
    pub analyze_status: Option<u16>,
    pub build_status: Option<u16>,
    pub calls: Mutex<Calls>,
}

impl FakeApi {
    pub fn calls(&self) -> MutexGuard<'_, Calls> {
        self.calls.lock().expect("calls lock")
    }
}

async fn respond<T>(delay: Duration, status: Option<u16>, body: T) -> Result<T, ApiClientError> {
    sleep(delay).await;
    match status {
        Some(code) => Err(ApiClientError::UnexpectedStatus {
            status: StatusCode::from_u16(code).expect("valid status"),
            text: "fake failure".to_string(),
        }),
        None => Ok(body),
    }
}

#[async_trait]
impl PlaylistApi for FakeApi {
    async fn health(&self) -> Result<(), ApiClientError> {
        Ok(())
    }

    async fn fetch_tracks(
        &self,
        request: &FetchTracksRequest,
    ) -> Result<FetchTracksResponse, ApiClientError> {
        self.calls().fetch.push(request.clone());
        let body = FetchTracksResponse {
            tracks: self.tracks.clone(),
        };
        respond(self.fetch_delay, self.fetch_status, body).await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiClientError> {
        self.calls().analyze.push(request.clone());
        let body = AnalyzeResponse {
            results: self.results.clone(),
            total: Some(request.tracks.len()),
            ..AnalyzeResponse::default()
        };
        respond(self.analyze_delay, self.analyze_status, body).await
    }

    async fn build_playlist(
        &self,
        request: &BuildPlaylistRequest,
    ) -> Result<BuildPlaylistResponse, ApiClientError> {
        self.calls().build.push(request.clone());
        let body = BuildPlaylistResponse {
            playlist_id: Some("pl1".to_string()),
            playlist_url: Some("https://open.spotify.com/playlist/pl1".to_string()),
            added: request.tracks.len(),
            considered: Some(request.tracks.len()),
            hex: Some(request.hex.to_string()),
        };
        respond(self.build_delay, self.build_status, body).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Status(String),
    Show(usize),
    Update(ProgressReport),
    Hide,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn updates(&self) -> Vec<&ProgressReport> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Update(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Status(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ProgressView for RecordingView {
    fn status(&mut self, message: &str) {
        self.events.push(ViewEvent::Status(message.to_string()));
    }

    fn show(&mut self, total: usize) {
        self.events.push(ViewEvent::Show(total));
    }

    fn update(&mut self, report: &ProgressReport) {
        self.events.push(ViewEvent::Update(report.clone()));
    }

    fn hide(&mut self) {
        self.events.push(ViewEvent::Hide);
    }
}
