//! Identifier wire representation
//!
//! GraphQL `ID` values arrive as strings from the commerce API but older
//! endpoints send bare numbers; both decode to `String`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Num(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Num(n) => n.to_string(),
        }
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub mod option {
    use super::RawId;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
    }
}
