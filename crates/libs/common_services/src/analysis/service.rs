use crate::analysis::error::{BuildError, log_error};
use crate::analysis::interfaces::{
    AnalysisSession, BuildOutcome, BuildRequest, SessionState, Stage,
};
use crate::analysis::progress::{ProgressSimulator, ProgressView};
use crate::api_client::{ApiClientError, PlaylistApi};
use app_state::{AnalysisSettings, SEARCH_SIMILARITY_FLOOR};
use common_types::{AnalyzeRequest, ColorCode, FetchTracksRequest};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: Option<ActiveBuild>,
    last_state: SessionState,
}

#[derive(Debug)]
struct ActiveBuild {
    session: AnalysisSession,
    cancel: CancellationToken,
}

/// Drives one build at a time: fetch candidates, analyze them, and pace a simulated
/// progress view while the analysis call is in flight. Starting a build supersedes
/// the active one.
pub struct AnalysisOrchestrator<A> {
    api: A,
    settings: AnalysisSettings,
    registry: Mutex<Registry>,
}

impl<A: PlaylistApi> AnalysisOrchestrator<A> {
    pub fn new(api: A, settings: AnalysisSettings) -> Self {
        Self {
            api,
            settings,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// State of the active session, or the terminal state of the last one.
    pub fn state(&self) -> SessionState {
        let registry = self.registry();
        registry
            .active
            .as_ref()
            .map_or(registry.last_state, |active| active.session.state)
    }

    pub fn active_session(&self) -> Option<AnalysisSession> {
        self.registry()
            .active
            .as_ref()
            .map(|active| active.session.clone())
    }

    /// Run a build to a terminal state. Results are only returned on a clean success;
    /// every other exit stops the ticker and hides the progress view first.
    #[instrument(skip(self, request, view), fields(color = %request.color, source = %request.source))]
    pub async fn build<V: ProgressView>(
        &self,
        request: &BuildRequest,
        view: &mut V,
    ) -> Result<BuildOutcome, BuildError> {
        let (session_id, cancel) = self.begin(request.color);

        view.status("Fetching tracks...");
        let fetch_request = FetchTracksRequest {
            source: request.source,
            playlist_url: request.playlist_url.clone(),
            limit: request.limit,
        };
        let fetched = bounded(
            Stage::FetchingCandidates,
            self.settings.fetch_timeout,
            &cancel,
            self.api.fetch_tracks(&fetch_request),
        )
        .await;
        let tracks = match fetched {
            Ok(response) => response.tracks,
            Err(error) => return Err(self.fail(session_id, error, view)),
        };

        let total = tracks.len();
        self.transition(session_id, SessionState::Analyzing, |session| {
            session.total = total;
        });
        view.status(&format!("Fetched {total} tracks. Analyzing colors..."));
        view.show(total);

        let analyze_request = AnalyzeRequest {
            hex: request.color,
            threshold: SEARCH_SIMILARITY_FLOOR,
            tracks: tracks.clone(),
        };
        let mut simulator =
            ProgressSimulator::start(session_id, tracks, self.settings.tick_interval);
        let analysis = bounded(
            Stage::Analyzing,
            self.settings.analyze_timeout,
            &cancel,
            self.api.analyze(&analyze_request),
        );
        tokio::pin!(analysis);

        let analyzed = loop {
            tokio::select! {
                biased;
                result = &mut analysis => break result,
                report = simulator.tick() => {
                    self.record_progress(session_id, report.analyzed);
                    view.update(&report);
                }
            }
        };

        let response = match analyzed {
            Ok(response) => response,
            Err(error) => {
                simulator.stop();
                view.hide();
                return Err(self.fail(session_id, error, view));
            }
        };

        if let Some(report) = simulator.complete() {
            self.record_progress(session_id, report.analyzed);
            view.update(&report);
        }
        let lingered = tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            () = sleep(self.settings.completion_linger) => true,
        };
        view.hide();
        if !lingered {
            return Err(self.fail(session_id, BuildError::Superseded, view));
        }

        self.finish(session_id, SessionState::Completed);
        view.status("");
        info!(
            "Session {session_id}: {} results for {} candidates",
            response.results.len(),
            total
        );

        Ok(BuildOutcome {
            session_id,
            color: request.color,
            considered: total,
            results: response.results,
        })
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, color: ColorCode) -> (u64, CancellationToken) {
        let mut registry = self.registry();
        if let Some(previous) = registry.active.take() {
            debug!("Session {}: cancelling for a newer build", previous.session.id);
            previous.cancel.cancel();
        }

        registry.next_id += 1;
        let id = registry.next_id;
        let cancel = CancellationToken::new();
        registry.active = Some(ActiveBuild {
            session: AnalysisSession {
                id,
                color,
                started_at: Instant::now(),
                state: SessionState::FetchingCandidates,
                total: 0,
                analyzed: 0,
            },
            cancel: cancel.clone(),
        });
        debug!("Session {id}: {:?}", SessionState::FetchingCandidates);
        (id, cancel)
    }

    /// Only touches the session if it is still the active one.
    fn with_session(&self, id: u64, apply: impl FnOnce(&mut AnalysisSession)) {
        let mut registry = self.registry();
        if let Some(active) = registry
            .active
            .as_mut()
            .filter(|active| active.session.id == id)
        {
            apply(&mut active.session);
        }
    }

    fn transition(&self, id: u64, state: SessionState, apply: impl FnOnce(&mut AnalysisSession)) {
        self.with_session(id, |session| {
            session.state = state;
            apply(session);
        });
        debug!("Session {id}: {state:?}");
    }

    fn record_progress(&self, id: u64, analyzed: usize) {
        self.with_session(id, |session| session.analyzed = analyzed.min(session.total));
    }

    fn finish(&self, id: u64, state: SessionState) {
        let mut registry = self.registry();
        if registry
            .active
            .as_ref()
            .is_some_and(|active| active.session.id == id)
        {
            registry.active = None;
            registry.last_state = state;
        }
        debug!("Session {id}: {state:?}");
    }

    fn fail<V: ProgressView>(&self, id: u64, error: BuildError, view: &mut V) -> BuildError {
        self.finish(id, error.terminal_state());
        log_error(id, &error);
        if !matches!(error, BuildError::Superseded) {
            view.status(&error.user_message());
        }
        error
    }
}

/// Bound a remote call by `after` and by the session's cancellation.
async fn bounded<T>(
    stage: Stage,
    after: Duration,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ApiClientError>>,
) -> Result<T, BuildError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(BuildError::Superseded),
        result = timeout(after, call) => match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(BuildError::Network { stage, source }),
            Err(_) => Err(BuildError::Timeout { stage, after }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, RecordingView, ViewEvent, result, tracks};
    use common_types::CandidateSource;

    fn request(color: &str) -> BuildRequest {
        BuildRequest::from_input(color, CandidateSource::Liked, None, 0).expect("valid request")
    }

    fn orchestrator(api: FakeApi) -> AnalysisOrchestrator<FakeApi> {
        AnalysisOrchestrator::new(api, AnalysisSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn completed_build_reports_total_exactly_once() {
        let api = FakeApi {
            tracks: tracks(4),
            results: vec![result(0, 5.0), result(1, 20.0)],
            analyze_delay: Duration::from_secs(10),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();

        let outcome = orchestrator
            .build(&request("#ff0000"), &mut view)
            .await
            .expect("build succeeds");

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.considered, 4);
        assert_eq!(orchestrator.state(), SessionState::Completed);
        assert!(orchestrator.active_session().is_none());

        let updates = view.updates();
        assert!(updates.iter().all(|r| r.analyzed <= r.total));
        assert!(updates.windows(2).all(|w| w[0].analyzed < w[1].analyzed));
        assert_eq!(updates.iter().filter(|r| r.analyzed == r.total).count(), 1);
        assert_eq!(updates.last().map(|r| r.analyzed), Some(4));
        assert_eq!(view.events.last(), Some(&ViewEvent::Status(String::new())));
        assert!(view.events.contains(&ViewEvent::Hide));
    }

    #[tokio::test(start_paused = true)]
    async fn fast_analysis_forces_progress_to_total() {
        let api = FakeApi {
            tracks: tracks(100),
            analyze_delay: Duration::from_millis(450),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();

        orchestrator
            .build(&request("#00ff00"), &mut view)
            .await
            .expect("build succeeds");

        let updates = view.updates();
        // Two ticks, then the forced completion.
        assert_eq!(
            updates.iter().map(|r| r.analyzed).collect::<Vec<_>>(),
            vec![1, 2, 100]
        );
        let hide = view.events.iter().position(|e| *e == ViewEvent::Hide);
        let last_update = view
            .events
            .iter()
            .rposition(|e| matches!(e, ViewEvent::Update(_)));
        assert!(last_update < hide);
    }

    #[tokio::test(start_paused = true)]
    async fn analysis_timeout_tears_down_without_completing() {
        let api = FakeApi {
            tracks: tracks(1000),
            analyze_delay: Duration::from_secs(200),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();
        let started = Instant::now();

        let error = orchestrator
            .build(&request("#0000ff"), &mut view)
            .await
            .expect_err("analysis times out");

        assert!(matches!(
            error,
            BuildError::Timeout {
                stage: Stage::Analyzing,
                ..
            }
        ));
        assert_eq!(started.elapsed(), Duration::from_secs(120));
        assert_eq!(orchestrator.state(), SessionState::TimedOut);
        assert!(view.updates().iter().all(|r| r.analyzed < r.total));
        assert!(view.events.contains(&ViewEvent::Hide));
        assert_eq!(
            view.events.last(),
            Some(&ViewEvent::Status(
                "Analysis timed out. Try with fewer tracks or check your connection.".to_string()
            ))
        );

        // No stray ticks after teardown.
        let events = view.events.len();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(view.events.len(), events);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_skips_analysis() {
        let api = FakeApi {
            fetch_status: Some(502),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();

        let error = orchestrator
            .build(&request("#abcdef"), &mut view)
            .await
            .expect_err("fetch fails");

        assert!(matches!(
            error,
            BuildError::Network {
                stage: Stage::FetchingCandidates,
                ..
            }
        ));
        assert_eq!(orchestrator.state(), SessionState::Failed);
        assert!(orchestrator.api().calls().analyze.is_empty());
        assert!(view.updates().is_empty());
        assert_eq!(
            view.events.last(),
            Some(&ViewEvent::Status("Error: HTTP 502".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_timeout_after_sixty_seconds() {
        let api = FakeApi {
            fetch_delay: Duration::from_secs(90),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();
        let started = Instant::now();

        let error = orchestrator
            .build(&request("#abcdef"), &mut view)
            .await
            .expect_err("fetch times out");

        assert!(matches!(
            error,
            BuildError::Timeout {
                stage: Stage::FetchingCandidates,
                ..
            }
        ));
        assert_eq!(started.elapsed(), Duration::from_secs(60));
        assert_eq!(error.terminal_state(), SessionState::TimedOut);
        assert!(orchestrator.api().calls().analyze.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn analysis_failure_hides_progress_immediately() {
        let api = FakeApi {
            tracks: tracks(50),
            analyze_delay: Duration::from_millis(1100),
            analyze_status: Some(500),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut view = RecordingView::default();

        let error = orchestrator
            .build(&request("#123456"), &mut view)
            .await
            .expect_err("analysis fails");

        assert!(matches!(
            error,
            BuildError::Network {
                stage: Stage::Analyzing,
                ..
            }
        ));
        assert_eq!(orchestrator.state(), SessionState::Failed);
        assert!(view.updates().iter().all(|r| r.analyzed < r.total));
        assert_eq!(view.updates().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_candidate_pool_still_analyzes() {
        let orchestrator = orchestrator(FakeApi::default());
        let mut view = RecordingView::default();

        let outcome = orchestrator
            .build(&request("#ffffff"), &mut view)
            .await
            .expect("build succeeds");

        assert!(outcome.results.is_empty());
        let calls = orchestrator.api().calls();
        assert_eq!(calls.analyze.len(), 1);
        assert!(calls.analyze[0].tracks.is_empty());
        assert!((calls.analyze[0].threshold - SEARCH_SIMILARITY_FLOOR).abs() < f64::EPSILON);
        assert!(view.events.contains(&ViewEvent::Show(0)));
        assert_eq!(
            view.updates().iter().map(|r| (r.analyzed, r.total)).collect::<Vec<_>>(),
            vec![(0, 0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn newer_build_supersedes_the_active_one() {
        let api = FakeApi {
            tracks: tracks(10),
            results: vec![result(3, 1.0)],
            analyze_delay: Duration::from_secs(10),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut first_view = RecordingView::default();
        let mut second_view = RecordingView::default();
        let first_request = request("#ff0000");
        let second_request = request("#00ff00");

        let (first, second) = tokio::join!(
            orchestrator.build(&first_request, &mut first_view),
            async {
                sleep(Duration::from_secs(1)).await;
                orchestrator.build(&second_request, &mut second_view).await
            }
        );

        assert!(matches!(first, Err(BuildError::Superseded)));
        let second = second.expect("newer build succeeds");
        assert_eq!(second.session_id, 2);
        assert_eq!(orchestrator.state(), SessionState::Completed);

        // The superseded build stopped ticking and showed no error text.
        assert!(first_view.events.contains(&ViewEvent::Hide));
        assert!(first_view.updates().iter().all(|r| r.analyzed <= 5));
        assert!(!first_view.statuses().iter().any(|s| s.starts_with("Error")));
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_during_fetch_drops_the_pending_call() {
        let api = FakeApi {
            tracks: tracks(3),
            results: vec![result(0, 1.0)],
            fetch_delay: Duration::from_secs(10),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut first_view = RecordingView::default();
        let mut second_view = RecordingView::default();
        let first_request = request("#ff0000");
        let second_request = request("#00ff00");
        let started = Instant::now();

        let ((first, first_done), second) = tokio::join!(
            async {
                let outcome = orchestrator.build(&first_request, &mut first_view).await;
                (outcome, started.elapsed())
            },
            async {
                sleep(Duration::from_secs(1)).await;
                orchestrator.build(&second_request, &mut second_view).await
            }
        );

        assert!(matches!(first, Err(BuildError::Superseded)));
        assert_eq!(first_done, Duration::from_secs(1));
        assert!(second.is_ok());
        assert_eq!(orchestrator.state(), SessionState::Completed);
        // Only the newer build got as far as analysis.
        assert_eq!(orchestrator.api().calls().analyze.len(), 1);
        assert!(!first_view.events.iter().any(|e| matches!(e, ViewEvent::Show(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_during_completion_linger_discards_results() {
        let api = FakeApi {
            tracks: tracks(3),
            results: vec![result(0, 1.0)],
            analyze_delay: Duration::from_secs(1),
            ..FakeApi::default()
        };
        let orchestrator = orchestrator(api);
        let mut first_view = RecordingView::default();
        let mut second_view = RecordingView::default();
        let first_request = request("#ff0000");
        let second_request = request("#00ff00");

        // The first analysis finishes at 1s and lingers until 1.5s.
        let (first, second) = tokio::join!(
            orchestrator.build(&first_request, &mut first_view),
            async {
                sleep(Duration::from_millis(1200)).await;
                orchestrator.build(&second_request, &mut second_view).await
            }
        );

        assert!(matches!(first, Err(BuildError::Superseded)));
        assert_eq!(second.expect("newer build succeeds").session_id, 2);
        assert_eq!(orchestrator.state(), SessionState::Completed);
        assert_eq!(orchestrator.api().calls().analyze.len(), 2);
        assert_eq!(first_view.events.last(), Some(&ViewEvent::Hide));
        assert_eq!(first_view.updates().last().map(|r| r.analyzed), Some(3));
    }
}
