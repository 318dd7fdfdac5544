// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::fmt;

/// Where a declaration came from.
///
/// Sections are pure diagnostics: the cascade records the section a
/// specified value was declared in alongside the computed value, so
/// inspection tooling can point back at the source. They never influence
/// resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// The source name, typically a stylesheet path.
    pub source: Rc<str>,
    /// The 1-based line the declaration starts on.
    pub line: u32,
}

impl Section {
    /// Creates a section.
    #[must_use]
    pub fn new(source: &str, line: u32) -> Self {
        Self {
            source: Rc::from(source),
            line,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}
