use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Practice identifier in canonical text form
///
/// The catalog may carry ids as JSON strings or integers while the picker
/// always hands back text. Both sides go through the same normalization
/// (integers in decimal, text trimmed) so equality never depends on how the
/// id happened to be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Identifier {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<i64> for Identifier {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

impl From<u64> for Identifier {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawIdentifier::deserialize(deserializer)? {
            RawIdentifier::Text(text) => Self::new(text),
            RawIdentifier::Signed(n) => Self::from(n),
            RawIdentifier::Unsigned(n) => Self::from(n),
        })
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    pub id: Identifier,
    pub title: String,
    pub description: String,
    pub timeout_ms: u64,
    /// Code placed before the submission, empty when there is none
    pub header: String,
    /// Code placed after the submission, empty when there is none
    pub footer: String,
    pub testcases: Vec<Testcase>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Sample shown to the user. Empty `input`/`output` means "not shown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testcase {
    pub note: String,
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub note: String,
    pub code: String,
}

/// Ordered practices as served by the `list` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Practice>);

impl Catalog {
    pub fn new(practices: Vec<Practice>) -> Self {
        Self(practices)
    }

    pub fn find(&self, id: &Identifier) -> Option<&Practice> {
        self.0.iter().find(|p| &p.id == id)
    }

    pub fn first(&self) -> Option<&Practice> {
        self.0.first()
    }

    pub fn entries(&self) -> &[Practice] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-testcase outcome reported by the judge
///
/// The vocabulary belongs to the judge service; only `"Ok"` has a meaning here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(String);

impl Verdict {
    pub const OK: &'static str = "Ok";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_ok(&self) -> bool {
        self.0 == Self::OK
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verdicts of one judge round-trip, keyed by testcase index
///
/// Accepts both wire shapes seen from judge services: an object keyed by
/// decimal index (`{"0":"Ok"}`) and a plain array (`["Ok"]`). Keys must be
/// written exactly as `index.to_string()` would, so every entry maps to
/// its own row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResultSet", into = "BTreeMap<String, Verdict>")]
pub struct ResultSet(BTreeMap<usize, Verdict>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResultSet {
    Keyed(BTreeMap<String, Verdict>),
    Positional(Vec<Verdict>),
}

impl TryFrom<RawResultSet> for ResultSet {
    type Error = String;

    fn try_from(raw: RawResultSet) -> Result<Self, Self::Error> {
        match raw {
            RawResultSet::Positional(verdicts) => Ok(verdicts.into_iter().enumerate().collect()),
            RawResultSet::Keyed(map) => map
                .into_iter()
                .map(|(key, verdict)| {
                    // "00" or " 0" would silently collide with "0"
                    key.parse::<usize>()
                        .ok()
                        .filter(|index| index.to_string() == key)
                        .map(|index| (index, verdict))
                        .ok_or_else(|| format!("testcase index '{}' is not a decimal number", key))
                })
                .collect(),
        }
    }
}

impl From<ResultSet> for BTreeMap<String, Verdict> {
    fn from(set: ResultSet) -> Self {
        set.0
            .into_iter()
            .map(|(index, verdict)| (index.to_string(), verdict))
            .collect()
    }
}

impl FromIterator<(usize, Verdict)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (usize, Verdict)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl ResultSet {
    /// Entries in ascending testcase index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Verdict)> {
        self.0.iter().map(|(index, verdict)| (*index, verdict))
    }

    pub fn get(&self, index: usize) -> Option<&Verdict> {
        self.0.get(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.0.values().filter(|v| v.is_ok()).count()
    }
}

/// Body of the `judge` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub id: Identifier,
    pub code: String,
}
