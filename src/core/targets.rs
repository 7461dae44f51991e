//! Extraction targets: msgids and where they were found.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One occurrence of a msgid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub file: String,
    /// 1-based source line.
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        debug_assert!(line > 0, "lines are 1-based");
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Msgids of one extraction run, each with its locations in first-seen order.
///
/// Keys are kept sorted, so [`TargetTable::rows`] needs no extra sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTable {
    targets: BTreeMap<String, Vec<Location>>,
}

impl TargetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` at `location`. Empty text is ignored.
    ///
    /// Returns true if the text was recorded.
    pub fn add_target(&mut self, text: &str, location: Location) -> bool {
        if text.is_empty() {
            return false;
        }
        match self.targets.get_mut(text) {
            Some(locations) => locations.push(location),
            None => {
                self.targets.insert(text.to_string(), vec![location]);
            }
        }
        true
    }

    /// Append every location of `other` after the ones already recorded.
    pub fn merge(&mut self, other: TargetTable) {
        for (text, locations) in other.targets {
            self.targets.entry(text).or_default().extend(locations);
        }
    }

    pub fn get(&self, text: &str) -> Option<&[Location]> {
        self.targets.get(text).map(Vec::as_slice)
    }

    /// Number of distinct msgids.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Rows sorted by msgid.
    pub fn rows(&self) -> Vec<TargetRow> {
        self.targets
            .iter()
            .map(|(msgid, locations)| TargetRow {
                msgid: msgid.clone(),
                locations: locations.clone(),
            })
            .collect()
    }

    pub fn into_rows(self) -> Vec<TargetRow> {
        self.targets
            .into_iter()
            .map(|(msgid, locations)| TargetRow { msgid, locations })
            .collect()
    }
}

/// `[msgid, "file:line", ...]` row handed to catalog writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub msgid: String,
    pub locations: Vec<Location>,
}

impl TargetRow {
    /// Flatten into `[msgid, "file:line", ...]`.
    pub fn to_strings(&self) -> Vec<String> {
        std::iter::once(self.msgid.clone())
            .chain(self.locations.iter().map(Location::to_string))
            .collect()
    }
}

impl Serialize for TargetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.locations.len() + 1))?;
        seq.serialize_element(&self.msgid)?;
        for location in &self.locations {
            seq.serialize_element(&location.to_string())?;
        }
        seq.end()
    }
}
