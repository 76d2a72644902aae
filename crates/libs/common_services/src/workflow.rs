use crate::analysis::{AnalysisOrchestrator, BuildError, BuildRequest, ProgressView};
use crate::api_client::PlaylistApi;
use crate::result_set::ResultSet;
use crate::save::{SaveError, SavedCollection, commit_selection};
use app_state::{AnalysisSettings, ResultSettings};
use common_types::{CandidateSource, ColorCode};

/// Build, narrow, and save, with the results owned in one place.
pub struct Workflow<A> {
    orchestrator: AnalysisOrchestrator<A>,
    results: ResultSet,
    color: Option<ColorCode>,
}

impl<A: PlaylistApi> Workflow<A> {
    pub fn new(api: A, analysis: AnalysisSettings, results: &ResultSettings) -> Self {
        Self {
            orchestrator: AnalysisOrchestrator::new(api, analysis),
            results: ResultSet::new(results.default_top_n),
            color: None,
        }
    }

    pub const fn orchestrator(&self) -> &AnalysisOrchestrator<A> {
        &self.orchestrator
    }

    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Color of the loaded results.
    pub const fn color(&self) -> Option<ColorCode> {
        self.color
    }

    /// Validate input and run a build. The result set only changes on success.
    /// Returns the number of results kept.
    pub async fn build<V: ProgressView>(
        &mut self,
        raw_color: &str,
        source: CandidateSource,
        playlist_url: Option<&str>,
        consider: u32,
        view: &mut V,
    ) -> Result<usize, BuildError> {
        let request = match BuildRequest::from_input(raw_color, source, playlist_url, consider) {
            Ok(request) => request,
            Err(error) => {
                view.status(&error.to_string());
                return Err(error.into());
            }
        };

        let outcome = self.orchestrator.build(&request, view).await?;
        self.results.load(outcome.results);
        self.color = Some(outcome.color);
        Ok(self.results.len())
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.results.set_top_n(n);
    }

    pub fn set_top_n_input(&mut self, text: &str) {
        self.results.set_top_n_input(text);
    }

    pub fn select_by_index(&mut self, index: usize) {
        self.results.select_by_index(index);
    }

    /// Save the current cutoff, bounded by the commit timeout.
    pub async fn save<V: ProgressView>(
        &self,
        name: Option<&str>,
        view: &mut V,
    ) -> Result<SavedCollection, SaveError> {
        let Some(color) = self.color else {
            view.status(&SaveError::NothingSelected.user_message());
            return Err(SaveError::NothingSelected);
        };

        view.status("Creating playlist...");
        let saved = commit_selection(self.orchestrator.api(), &self.results)
            .color(color)
            .maybe_name(name)
            .time_limit(self.orchestrator.settings().commit_timeout)
            .call()
            .await;

        match &saved {
            Ok(_) => view.status(""),
            Err(error) => view.status(&error.user_message()),
        }
        saved
    }
}
