//! Map records as decoded from the kz-map-info JSON arrays.

use serde_json::{Map, Value};

/// One map entry: an insertion-ordered JSON object.
pub type Record = Map<String, Value>;

/// Flat, comma-joined mapper names.
pub const MAPPER_NAME_KEY: &str = "mapper_name";
/// Flat, comma-joined mapper SteamID64s.
pub const MAPPER_ID64_KEY: &str = "mapper_steamid64";
/// Structured list written in place of the two flat fields.
pub const MAPPERS_KEY: &str = "mappers";
/// Separator used by the flat fields.
pub const LIST_SEPARATOR: &str = ", ";

/// URL fields corrected by default.
pub const DEFAULT_URL_FIELDS: &[&str] = &["workshop_url"];

/// Decodes a JSON array of objects into records.
pub fn records_from_slice(bytes: &[u8]) -> serde_json::Result<Vec<Record>> {
    serde_json::from_slice(bytes)
}
