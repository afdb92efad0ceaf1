//! Group-Version-Kind - Canonical identity for a kind of workload
//!
//! Kind reference format: `<kind>.<version>.<group>`
//!
//! Examples:
//! - `MyJob.v1.batch.example.com` (group `batch.example.com`)
//! - `Job.v1.batch`
//! - `Pod.v1.` (core group, empty)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structured identifier for a kind of resource.
///
/// The canonical string form (see [`fmt::Display`]) is the key used by the
/// registry, so two values are interchangeable iff their canonical strings are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    /// API group, empty for the core group
    pub group: String,
    /// API version within the group
    pub version: String,
    /// Resource kind
    pub kind: String,
}

impl GroupVersionKind {
    /// Create a new GroupVersionKind
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Parse a kind reference into a GroupVersionKind
    ///
    /// Expected format: `<kind>.<version>.<group>`. Everything after the second
    /// dot is the group, so groups may themselves contain dots. Short forms
    /// without a version and group separator (`Pod.v1`, `Pod`) are rejected.
    /// Segments are taken as-is; empty kinds or versions are not an error.
    pub fn parse_kind_arg(arg: &str) -> Result<Self> {
        if arg.is_empty() {
            return Err(Error::EmptyName);
        }

        let mut parts = arg.splitn(3, '.');
        let (Some(kind), Some(version), Some(group)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::MalformedIdentifier(arg.to_string()));
        };

        Ok(Self::new(group, version, kind))
    }

    /// The `apiVersion` form: `version` for the core group, `group/version` otherwise
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Convert back to the kind reference accepted by [`Self::parse_kind_arg`]
    pub fn to_kind_arg(&self) -> String {
        format!("{}.{}.{}", self.kind, self.version, self.group)
    }

    /// Canonical string used as the registry key.
    ///
    /// Registry identity is defined by this string, not by field equality: a
    /// `/` inside a segment can make two distinct triples share a key.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

impl FromStr for GroupVersionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_kind_arg(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reference() {
        let gvk = GroupVersionKind::parse_kind_arg("MyJob.v1.batch.example.com").unwrap();
        assert_eq!(gvk.kind, "MyJob");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.group, "batch.example.com");
        assert_eq!(gvk.api_version(), "batch.example.com/v1");
    }

    #[test]
    fn test_parse_core_group() {
        let gvk = GroupVersionKind::parse_kind_arg("Pod.v1.").unwrap();
        assert_eq!(gvk, GroupVersionKind::new("", "v1", "Pod"));
        assert_eq!(gvk.api_version(), "v1");
        assert_eq!(gvk.canonical(), "/v1, Kind=Pod");
    }

    #[test]
    fn test_canonical_string() {
        let gvk = GroupVersionKind::new("batch", "v1", "Job");
        assert_eq!(gvk.to_string(), "batch/v1, Kind=Job");
        assert_eq!(gvk.to_kind_arg(), "Job.v1.batch");

        let parsed: GroupVersionKind = gvk.to_kind_arg().parse().unwrap();
        assert_eq!(parsed.canonical(), gvk.canonical());
    }

    #[test]
    fn test_invalid_kind_args() {
        assert!(matches!(GroupVersionKind::parse_kind_arg(""), Err(Error::EmptyName)));
        assert!(GroupVersionKind::parse_kind_arg("Pod").is_err());
        assert!(GroupVersionKind::parse_kind_arg("Pod.v1").is_err());
        assert!(GroupVersionKind::parse_kind_arg("Pod.").is_err());
    }

    #[test]
    fn test_parse_accepts_empty_segments() {
        assert_eq!(GroupVersionKind::parse_kind_arg("..").unwrap(), GroupVersionKind::new("", "", ""));
        assert_eq!(
            GroupVersionKind::parse_kind_arg(".v1.batch").unwrap(),
            GroupVersionKind::new("batch", "v1", "")
        );
        assert_eq!(
            GroupVersionKind::parse_kind_arg("Job..batch").unwrap(),
            GroupVersionKind::new("batch", "", "Job")
        );
        assert_eq!(
            GroupVersionKind::parse_kind_arg("Job.v1.bat ch").unwrap(),
            GroupVersionKind::new("bat ch", "v1", "Job")
        );
    }

    #[test]
    fn test_canonical_key_collision() {
        let a = GroupVersionKind::new("a/b", "v1", "Job");
        let b = GroupVersionKind::new("a", "b/v1", "Job");
        assert_ne!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }
}
