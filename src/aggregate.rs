//! Function-level grouping of verdicts.
//!
//! Groups are a stable partition of the input: functions appear in the order
//! they are first seen, and verdicts keep their relative order inside each
//! group. Functions with no verdicts are absent rather than empty.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::control::Function;
use crate::verdict::{CoverageStatus, Verdict};

/// Verdicts sharing one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionGroup {
    pub function: Function,
    pub verdicts: Vec<Verdict>,
}

impl FunctionGroup {
    /// Number of verdicts in this group with the given status.
    pub fn count(&self, status: CoverageStatus) -> usize {
        self.verdicts.iter().filter(|v| v.status == status).count()
    }

    /// Verdicts in this group that need remediation.
    pub fn gaps(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| v.is_gap())
    }
}

/// Ordered mapping from function to its verdicts.
///
/// Serializes as a JSON object whose keys keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedVerdicts {
    groups: Vec<FunctionGroup>,
}

impl GroupedVerdicts {
    /// Function keys in first-seen order.
    pub fn functions(&self) -> Vec<Function> {
        self.groups.iter().map(|g| g.function).collect()
    }

    pub fn get(&self, function: Function) -> Option<&[Verdict]> {
        self.groups
            .iter()
            .find(|g| g.function == function)
            .map(|g| g.verdicts.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupedVerdicts {
    type Item = &'a FunctionGroup;
    type IntoIter = std::slice::Iter<'a, FunctionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for GroupedVerdicts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.function.as_str(), &group.verdicts)?;
        }
        map.end()
    }
}

/// Partition verdicts by function, preserving first-seen order.
pub fn group(verdicts: &[Verdict]) -> GroupedVerdicts {
    let mut groups: Vec<FunctionGroup> = Vec::new();

    for verdict in verdicts {
        match groups.iter_mut().find(|g| g.function == verdict.function) {
            Some(group) => group.verdicts.push(verdict.clone()),
            None => groups.push(FunctionGroup {
                function: verdict.function,
                verdicts: vec![verdict.clone()],
            }),
        }
    }

    GroupedVerdicts { groups }
}
