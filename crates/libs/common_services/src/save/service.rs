use crate::api_client::PlaylistApi;
use crate::result_set::ResultSet;
use crate::save::error::SaveError;
use crate::save::interfaces::{SavedCollection, default_collection_name};
use app_state::COMMIT_SIMILARITY_FLOOR;
use bon::builder;
use common_types::{BuildPlaylistRequest, ColorCode, Track};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Creates a collection from the current selection.
///
/// The selection is re-sorted by distance and cut to `top_n` (the result set's own cutoff
/// when not given). A blank `name` falls back to the default derived from `color`.
/// Without a `time_limit` the call is unbounded.
///
/// # Errors
///
/// [`SaveError::NothingSelected`] when the selection is empty, without calling the service.
#[builder]
pub async fn commit_selection<A: PlaylistApi + ?Sized>(
    #[builder(start_fn)] api: &A,
    #[builder(start_fn)] results: &ResultSet,
    color: ColorCode,
    top_n: Option<usize>,
    #[builder(into)] name: Option<String>,
    time_limit: Option<Duration>,
) -> Result<SavedCollection, SaveError> {
    let cutoff = top_n.or(results.top_n()).unwrap_or(0);
    let tracks: Vec<Track> = results
        .sorted_selection(cutoff)
        .into_iter()
        .map(|r| r.track.clone())
        .collect();
    if tracks.is_empty() {
        warn!("Refusing to save an empty selection for {color}");
        return Err(SaveError::NothingSelected);
    }

    let playlist_name = name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default_collection_name(color));
    let request = BuildPlaylistRequest {
        hex: color,
        threshold: COMMIT_SIMILARITY_FLOOR,
        top_n: tracks.len(),
        tracks,
        playlist_name,
    };

    let response = match time_limit {
        Some(limit) => timeout(limit, api.build_playlist(&request))
            .await
            .map_err(|_| SaveError::Timeout(limit))??,
        None => api.build_playlist(&request).await?,
    };

    info!(
        "Saved \"{}\": {} of {} tracks added",
        request.playlist_name, response.added, request.top_n
    );
    Ok(SavedCollection {
        collection_url: response.playlist_url,
        added: response.added,
        requested: request.top_n,
    })
}
