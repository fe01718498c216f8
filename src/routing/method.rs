//! HTTP method flags and the flag-to-verb table.
//!
//! # Responsibilities
//! - Represent the supported verbs as distinct bit flags
//! - Map flags to verb names through an explicit, substitutable table
//!
//! # Design Decisions
//! - Closed set: GET, POST, PUT, DELETE, HEAD
//! - Verbs outside the set are unrepresentable (parsing fails)
//! - Flag ordering follows declaration order, which is also the probe order

use std::fmt;
use std::str::FromStr;

/// An HTTP verb understood by resource routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MethodFlag {
    Get = 1,
    Post = 2,
    Put = 4,
    Delete = 8,
    Head = 16,
}

impl MethodFlag {
    /// Every flag, in enumeration order.
    pub const ALL: [MethodFlag; 5] = [
        MethodFlag::Get,
        MethodFlag::Post,
        MethodFlag::Put,
        MethodFlag::Delete,
        MethodFlag::Head,
    ];

    /// Bit value of the flag.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Canonical verb name.
    pub fn as_str(self) -> &'static str {
        match self {
            MethodFlag::Get => "GET",
            MethodFlag::Post => "POST",
            MethodFlag::Put => "PUT",
            MethodFlag::Delete => "DELETE",
            MethodFlag::Head => "HEAD",
        }
    }
}

impl fmt::Display for MethodFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a verb is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for MethodFlag {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = s.trim();
        MethodFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str().eq_ignore_ascii_case(verb))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Ordered mapping from method flags to the verb names reported to clients.
///
/// The entry order is the order in which the negotiator looks for a
/// route's representative method. Flags missing from the table are never
/// used as that representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTable {
    entries: Vec<(MethodFlag, String)>,
}

impl MethodTable {
    /// Build a table from `(flag, name)` pairs. Later duplicates of a flag are ignored.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MethodFlag, S)>,
        S: Into<String>,
    {
        let mut table: Vec<(MethodFlag, String)> = Vec::new();
        for (flag, name) in entries {
            if table.iter().all(|(existing, _)| *existing != flag) {
                table.push((flag, name.into()));
            }
        }
        Self { entries: table }
    }

    /// Name registered for `flag`, if the table knows it.
    pub fn name(&self, flag: MethodFlag) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|(_, name)| name.as_str())
    }

    /// Flag registered under `name` (case-insensitive).
    pub fn flag_for(&self, name: &str) -> Option<MethodFlag> {
        self.entries
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(flag, _)| *flag)
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (MethodFlag, &str)> + '_ {
        self.entries.iter().map(|(flag, name)| (*flag, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new(MethodFlag::ALL.into_iter().map(|flag| (flag, flag.as_str())))
    }
}
