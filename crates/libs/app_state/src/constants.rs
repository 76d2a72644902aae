/// Similarity floor sent with a search; the client filters results itself.
pub const SEARCH_SIMILARITY_FLOOR: f64 = 0.0;

/// Similarity floor sent on commit: everything the user selected is accepted.
pub const COMMIT_SIMILARITY_FLOOR: f64 = 100.0;

/// Candidate limit sent when the user asks to consider everything (`0`).
pub const UNLIMITED_CANDIDATES: u32 = 10_000;

/// Smallest candidate pool worth fetching.
pub const MIN_CANDIDATES: u32 = 50;

pub const DEFAULT_TOP_N: usize = 100;

/// Prefix for the collection name derived from the target color.
pub const COLLECTION_NAME_PREFIX: &str = "Color Playlist - ";
