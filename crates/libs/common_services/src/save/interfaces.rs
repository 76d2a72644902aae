use app_state::COLLECTION_NAME_PREFIX;
use common_types::ColorCode;

/// A collection created on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCollection {
    pub collection_url: Option<String>,
    /// Count reported by the service, which may be below `requested`.
    pub added: usize,
    pub requested: usize,
}

/// `"Color Playlist - #RRGGBB"`
#[must_use]
pub fn default_collection_name(color: ColorCode) -> String {
    format!("{COLLECTION_NAME_PREFIX}{}", color.to_upper_hex())
}
