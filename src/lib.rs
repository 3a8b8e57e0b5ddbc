//! # depin - Minimal Source Dependency Vendoring
//!
//! depin reads a JSON manifest of source dependencies and pins each one into
//! `_vendor/src/<path>` by cloning it with `git` or `hg` at an exact revision.
//!
//! ## Quick Start
//!
//! ```bash
//! # Reads ./deps.json
//! depin
//!
//! # Or an explicit manifest
//! depin third_party.json
//! ```
//!
//! Dependencies install strictly in manifest order and the run stops at the
//! first failure. Nothing is rolled back.
//!
//! ## Module Organization
//!
//! - [`manifest`] - Manifest parsing (`deps.json`)
//! - [`vendor`] - Vendor root and `.env` hint setup
//! - [`install`] - Directory reset, clone and pin per dependency
//! - [`config`] - Fixed file layout
//! - [`error`] - Error taxonomy

/// Fixed file layout (`_vendor/src`, `.env`).
pub mod config;

/// Error types shared by all stages.
pub mod error;

/// Per-dependency install procedure.
pub mod install;

/// Dependency manifest parsing.
pub mod manifest;

/// Vendor root and environment hint setup.
pub mod vendor;

use colored::*;
use std::path::Path;

use config::VendorLayout;
use error::Result;
use install::Installed;

/// Counts reported after a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub pinned: usize,
    pub empty: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.pinned + self.empty
    }
}

/// Loads `manifest_path` and installs every dependency into the layout's vendor root.
///
/// The manifest is fully decoded before anything touches the filesystem.
pub fn run(manifest_path: &Path, layout: &VendorLayout) -> Result<RunSummary> {
    let deps = manifest::load_manifest(&layout.resolve(manifest_path))?;

    let vendor_root = vendor::ensure_vendor_root(layout)?;
    vendor::ensure_env_hint(layout)?;

    if !deps.is_empty() {
        println!("{} Vendoring {} dependencies...", "📦".blue(), deps.len());
    }

    let mut summary = RunSummary::default();
    for dep in &deps {
        match install::install(dep, &vendor_root)? {
            Installed::Pinned => summary.pinned += 1,
            Installed::Empty => summary.empty += 1,
        }
    }
    Ok(summary)
}
