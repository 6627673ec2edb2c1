//! Normalized mapper credit: one (name, SteamID64) pair.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream writes this token where a value is missing.
const NULL_TOKEN: &str = "null";

pub const NAME_KEY: &str = "name";
pub const ID64_KEY: &str = "id64";

/// A credited mapper. Either side may be absent when the upstream lists were
/// misaligned or the value was blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMapper")]
pub struct Mapper {
    name: Option<String>,
    id64: Option<String>,
}

/// Wire shape used on deserialization so decoded values go through `Mapper::new`.
#[derive(Deserialize)]
struct RawMapper {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id64: Option<String>,
}

impl From<RawMapper> for Mapper {
    fn from(raw: RawMapper) -> Self {
        Mapper::new(raw.name.as_deref(), raw.id64.as_deref())
    }
}

impl Mapper {
    /// Builds a mapper; `None`, `""` and `"null"` all become absent.
    pub fn new(name: Option<&str>, id64: Option<&str>) -> Self {
        Self {
            name: fix_value(name),
            id64: fix_value(id64),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id64(&self) -> Option<&str> {
        self.id64.as_deref()
    }
}

impl From<Mapper> for Value {
    fn from(m: Mapper) -> Self {
        let mut obj = Map::new();
        obj.insert(NAME_KEY.to_string(), m.name.map_or(Value::Null, Value::String));
        obj.insert(ID64_KEY.to_string(), m.id64.map_or(Value::Null, Value::String));
        Value::Object(obj)
    }
}

fn fix_value(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty() && *s != NULL_TOKEN)
        .map(str::to_string)
}
