//! Vendor root and `.env` hint setup.
//!
//! `_vendor/src` is created once per run and every dependency path is resolved
//! against its absolute location. The `.env` hint is write-once: an existing
//! file is never touched, even if its content is stale.

use crate::config::VendorLayout;
use crate::error::{Result, VendorError};
use colored::*;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Result of [`ensure_env_hint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvHint {
    Written,
    Existing,
}

/// Creates `path` and any missing parents with mode 0755 on Unix.
pub(crate) fn create_dir_tree(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Ensures the vendor source root exists and returns its absolute path.
pub fn ensure_vendor_root(layout: &VendorLayout) -> Result<PathBuf> {
    let root = layout.vendor_path();
    create_dir_tree(&root).map_err(|e| VendorError::directory(&root, e))?;
    std::path::absolute(&root).map_err(|e| VendorError::directory(&root, e))
}

/// Writes the `.env` export line unless the file already exists.
pub fn ensure_env_hint(layout: &VendorLayout) -> Result<EnvHint> {
    let env_path = layout.env_path();

    match fs::symlink_metadata(&env_path) {
        Ok(_) => {
            println!(
                "{} {} exists. Skipping...",
                "!".yellow(),
                layout.env_file.display()
            );
            return Ok(EnvHint::Existing);
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(VendorError::Write {
                path: env_path,
                source,
            });
        }
    }

    let write_err = |source| VendorError::Write {
        path: env_path.clone(),
        source,
    };
    // create_new keeps the never-overwrite guarantee if the file shows up meanwhile.
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&env_path)
        .map_err(write_err)?;
    writeln!(file, "{}", layout.env_line).map_err(write_err)?;

    println!(
        "{} Written \"{}\" into {}",
        "✓".green(),
        layout.env_line,
        layout.env_file.display()
    );
    println!(
        "  You can autoload {} with {}",
        layout.env_file.display(),
        "https://github.com/kennethreitz/autoenv".cyan()
    );
    Ok(EnvHint::Written)
}
