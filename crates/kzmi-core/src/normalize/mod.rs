//! Record normalization: mapper lists and workshop URLs.
//!
//! Upstream records carry mapper credits as two parallel comma-joined strings
//! (`mapper_name`, `mapper_steamid64`) that are frequently misaligned or
//! blank. They are replaced by a single `mappers` array of [`Mapper`] objects.
//! URL fields get their scheme upgraded and a stray `/?` collapsed.

mod error;
mod list;
mod url;

pub use error::NormalizeError;
pub use list::{pad_or_truncate, split_list};
pub use url::fix_url;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mapper::Mapper;
use crate::record::{
    Record, DEFAULT_URL_FIELDS, MAPPERS_KEY, MAPPER_ID64_KEY, MAPPER_NAME_KEY,
};

/// What to do when a designated URL field is missing or not a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlPolicy {
    /// Nothing to correct; leave the record as is.
    #[default]
    Lenient,
    /// Fail the record (and with it the batch).
    Strict,
}

/// Tunables for [`normalize_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub url_fields: Vec<String>,
    pub url_policy: UrlPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            url_fields: DEFAULT_URL_FIELDS.iter().map(|s| s.to_string()).collect(),
            url_policy: UrlPolicy::Lenient,
        }
    }
}

/// Replaces the flat mapper fields with a structured `mappers` array.
///
/// Both flat fields are removed whenever present. The shorter list is padded
/// with absent values up to the longer one's length. When neither side has
/// any entries, no `mappers` field is written.
pub fn normalize_authors(record: &mut Record) {
    let mut names = take_list(record, MAPPER_NAME_KEY);
    let mut ids = take_list(record, MAPPER_ID64_KEY);

    let len = names.len().max(ids.len());
    if len == 0 {
        return;
    }

    pad_or_truncate(&mut names, len);
    pad_or_truncate(&mut ids, len);

    let mappers = names
        .iter()
        .zip(&ids)
        .map(|(name, id64)| Value::from(Mapper::new(name.as_deref(), id64.as_deref())))
        .collect();

    record.insert(MAPPERS_KEY.to_string(), Value::Array(mappers));
}

/// Applies [`fix_url`] to every designated field.
pub fn normalize_urls<S: AsRef<str>>(
    record: &mut Record,
    fields: &[S],
    policy: UrlPolicy,
) -> Result<(), NormalizeError> {
    for field in fields {
        let field = field.as_ref();
        match record.get_mut(field) {
            Some(Value::String(url)) => {
                let fixed = fix_url(url);
                if fixed != *url {
                    tracing::trace!(field, from = %url, to = %fixed, "fixed url");
                    *url = fixed;
                }
            }
            _ if policy == UrlPolicy::Lenient => {}
            Some(_) => {
                return Err(NormalizeError::NotAString {
                    field: field.to_string(),
                })
            }
            None => {
                return Err(NormalizeError::MissingField {
                    field: field.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Normalizes every record in order, stopping at the first failure.
pub fn normalize_batch(
    records: Option<&mut [Record]>,
    opts: &NormalizeOptions,
) -> Result<(), NormalizeError> {
    let Some(records) = records else {
        return Ok(());
    };
    for (index, record) in records.iter_mut().enumerate() {
        normalize_authors(record);
        normalize_urls(record, &opts.url_fields, opts.url_policy).map_err(|e| {
            NormalizeError::InRecord {
                index,
                source: Box::new(e),
            }
        })?;
    }
    Ok(())
}

fn take_list(record: &mut Record, key: &str) -> Vec<Option<String>> {
    record
        .shift_remove(key)
        .map(|v| split_list(&v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn pads_shorter_id_list() {
        let mut r = record(json!({"mapper_name": "Alice, Bob", "mapper_steamid64": "111"}));
        normalize_authors(&mut r);
        assert!(!r.contains_key(MAPPER_NAME_KEY));
        assert!(!r.contains_key(MAPPER_ID64_KEY));
        assert_eq!(
            r[MAPPERS_KEY],
            json!([{"name": "Alice", "id64": "111"}, {"name": "Bob", "id64": null}])
        );
    }

    #[test]
    fn pads_shorter_name_list() {
        let mut r = record(json!({"mapper_name": "Alice", "mapper_steamid64": "1, 2, 3"}));
        normalize_authors(&mut r);
        assert_eq!(
            r[MAPPERS_KEY],
            json!([
                {"name": "Alice", "id64": "1"},
                {"name": null, "id64": "2"},
                {"name": null, "id64": "3"}
            ])
        );
    }

    #[test]
    fn blank_fields_write_no_mappers() {
        let mut r = record(json!({"mapper_name": "", "mapper_steamid64": ""}));
        normalize_authors(&mut r);
        assert!(r.is_empty());
    }

    #[test]
    fn missing_fields_write_no_mappers() {
        let mut r = record(json!({"name": "kz_beginnerblock"}));
        normalize_authors(&mut r);
        assert_eq!(r, record(json!({"name": "kz_beginnerblock"})));
    }

    #[test]
    fn null_fields_write_no_mappers() {
        let mut r = record(json!({"mapper_name": null, "mapper_steamid64": null}));
        normalize_authors(&mut r);
        assert!(r.is_empty());
    }

    #[test]
    fn names_only() {
        let mut r = record(json!({"mapper_name": "Alice"}));
        normalize_authors(&mut r);
        assert_eq!(r[MAPPERS_KEY], json!([{"name": "Alice", "id64": null}]));
    }

    #[test]
    fn null_tokens_inside_lists_become_absent() {
        let mut r = record(json!({"mapper_name": "null, Bob", "mapper_steamid64": "111, null"}));
        normalize_authors(&mut r);
        assert_eq!(
            r[MAPPERS_KEY],
            json!([{"name": null, "id64": "111"}, {"name": "Bob", "id64": null}])
        );
    }

    #[test]
    fn numeric_id_is_taken_as_text() {
        let mut r = record(json!({"mapper_name": "Alice", "mapper_steamid64": 76561198000000000u64}));
        normalize_authors(&mut r);
        assert_eq!(
            r[MAPPERS_KEY],
            json!([{"name": "Alice", "id64": "76561198000000000"}])
        );
    }

    #[test]
    fn mappers_appended_after_remaining_fields() {
        let mut r = record(json!({
            "id": 1,
            "mapper_name": "Alice",
            "name": "kz_a",
            "mapper_steamid64": "111",
            "workshop_url": ""
        }));
        normalize_authors(&mut r);
        let keys: Vec<&str> = r.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "workshop_url", "mappers"]);
    }

    #[test]
    fn normalize_authors_is_idempotent() {
        let mut r = record(json!({"mapper_name": "Alice, Bob", "mapper_steamid64": "111"}));
        normalize_authors(&mut r);
        let once = r.clone();
        normalize_authors(&mut r);
        assert_eq!(r, once);
    }

    #[test]
    fn fixes_designated_url_fields() {
        let mut r = record(json!({
            "workshop_url": "http://steamcommunity.com/sharedfiles/filedetails/?id=1",
            "other_url": "http://example.com/?a=1"
        }));
        normalize_urls(&mut r, DEFAULT_URL_FIELDS, UrlPolicy::Lenient).unwrap();
        assert_eq!(
            r["workshop_url"],
            "https://steamcommunity.com/sharedfiles/filedetails?id=1"
        );
        assert_eq!(r["other_url"], "http://example.com/?a=1");
    }

    #[test]
    fn lenient_ignores_missing_and_non_string_urls() {
        let mut r = record(json!({"name": "kz_a"}));
        normalize_urls(&mut r, &["workshop_url"], UrlPolicy::Lenient).unwrap();
        assert_eq!(r, record(json!({"name": "kz_a"})));

        let mut r = record(json!({"workshop_url": null}));
        normalize_urls(&mut r, &["workshop_url"], UrlPolicy::Lenient).unwrap();
        assert_eq!(r["workshop_url"], Value::Null);

        let mut r = record(json!({"workshop_url": 5}));
        normalize_urls(&mut r, &["workshop_url"], UrlPolicy::Lenient).unwrap();
        assert_eq!(r["workshop_url"], 5);
    }

    #[test]
    fn strict_rejects_missing_url_field() {
        let mut r = record(json!({"name": "kz_a"}));
        let err = normalize_urls(&mut r, &["workshop_url"], UrlPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MissingField {
                field: "workshop_url".to_string()
            }
        );
    }

    #[test]
    fn strict_rejects_non_string_url_field() {
        let mut r = record(json!({"workshop_url": null}));
        let err = normalize_urls(&mut r, &["workshop_url"], UrlPolicy::Strict).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAString { .. }));
    }

    #[test]
    fn batch_none_and_empty_are_noops() {
        let opts = NormalizeOptions::default();
        normalize_batch(None, &opts).unwrap();
        let mut empty: Vec<Record> = Vec::new();
        normalize_batch(Some(empty.as_mut_slice()), &opts).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn batch_normalizes_every_record_in_order() {
        let mut records = vec![
            record(json!({"mapper_name": "Alice", "mapper_steamid64": "1", "workshop_url": "http://a/?x"})),
            record(json!({"mapper_name": "", "mapper_steamid64": "", "workshop_url": ""})),
        ];
        normalize_batch(Some(records.as_mut_slice()), &NormalizeOptions::default()).unwrap();
        assert_eq!(
            records[0],
            record(json!({"workshop_url": "https://a?x", "mappers": [{"name": "Alice", "id64": "1"}]}))
        );
        assert_eq!(records[1], record(json!({"workshop_url": ""})));
    }

    #[test]
    fn strict_batch_reports_failing_record_index() {
        let mut records = vec![
            record(json!({"workshop_url": "http://a"})),
            record(json!({"mapper_name": "Bob"})),
        ];
        let opts = NormalizeOptions {
            url_policy: UrlPolicy::Strict,
            ..NormalizeOptions::default()
        };
        let err = normalize_batch(Some(records.as_mut_slice()), &opts).unwrap_err();
        match err {
            NormalizeError::InRecord { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, NormalizeError::MissingField { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(records[0]["workshop_url"], "https://a");
    }
}
