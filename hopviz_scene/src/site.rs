// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deployment settings for the page hosting the animation.

extern crate alloc;

use alloc::string::String;

/// Where the page is served from.
///
/// Passed to whatever renders links and images; there is no process-wide setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    base_path: String,
}

impl SiteConfig {
    /// The project page's deployment prefix.
    pub const DEFAULT_BASE_PATH: &'static str = "/eacl2026-GritHopper";

    /// Creates a config for a page served under `base_path`.
    ///
    /// A trailing `/` is dropped, so `"/"` and `""` both mean the site root.
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: String::from(base_path.trim_end_matches('/')),
        }
    }

    /// The normalized base path without a trailing `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolves a site-absolute asset path like `/logos/model.jpeg` under the base path.
    pub fn asset_path(&self, path: &str) -> String {
        let mut out = self.base_path.clone();
        out.push('/');
        out.push_str(path.trim_start_matches('/'));
        out
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_PATH)
    }
}
