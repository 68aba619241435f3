//! Namespace bindings and the small path language used for label queries.
//!
//! A path is a `/`-separated list of steps, each matching direct children of
//! the current element. A step is `prefix:Name`, `Name` (no namespace),
//! `prefix:*` or `*`. A leading `./` is ignored.

use std::collections::BTreeMap;

use crate::error::Pds4Error;

/// PDS4 core schema namespace.
pub const PDS4_NAMESPACE: &str = "http://pds.nasa.gov/pds4/pds/v1";

/// PDS4 display dictionary namespace.
pub const DISP_NAMESPACE: &str = "http://pds.nasa.gov/pds4/disp/v1";

/// Prefix to namespace URI bindings used to resolve query paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    bindings: BTreeMap<String, String>,
}

impl NamespaceMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bindings every PDS4 image label needs: `pds4` and `disp`.
    pub fn pds4() -> Self {
        Self::new()
            .with("pds4", PDS4_NAMESPACE)
            .with("disp", DISP_NAMESPACE)
    }

    /// Adds (or replaces) a binding.
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.bindings.insert(prefix.into(), uri.into());
        self
    }

    /// Looks up the URI bound to `prefix`.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }
}

/// What a single path step matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameTest<'p> {
    /// `*`
    Any,
    /// `prefix:*`
    AnyIn(&'p str),
    /// `prefix:Name`, or `Name` with no namespace.
    Exact {
        namespace: Option<&'p str>,
        name: &'p str,
    },
}

impl NameTest<'_> {
    pub(crate) fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        match *self {
            NameTest::Any => true,
            NameTest::AnyIn(uri) => namespace == Some(uri),
            NameTest::Exact {
                namespace: expected_ns,
                name: expected_name,
            } => namespace == expected_ns && name == expected_name,
        }
    }
}

/// Resolves a path string into name tests, binding prefixes through `ns`.
pub(crate) fn compile<'p>(path: &'p str, ns: &'p NamespaceMap) -> Result<Vec<NameTest<'p>>, Pds4Error> {
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);

    trimmed
        .split('/')
        .filter(|step| !step.is_empty() && *step != ".")
        .map(|step| compile_step(step, ns))
        .collect()
}

fn compile_step<'p>(step: &'p str, ns: &'p NamespaceMap) -> Result<NameTest<'p>, Pds4Error> {
    match step.split_once(':') {
        None if step == "*" => Ok(NameTest::Any),
        None => Ok(NameTest::Exact {
            namespace: None,
            name: step,
        }),
        Some((prefix, local)) => {
            let uri = ns
                .uri(prefix)
                .ok_or_else(|| Pds4Error::UnknownNamespacePrefix(prefix.to_string()))?;
            if local == "*" {
                Ok(NameTest::AnyIn(uri))
            } else {
                Ok(NameTest::Exact {
                    namespace: Some(uri),
                    name: local,
                })
            }
        }
    }
}
