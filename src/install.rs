//! Per-dependency install: reset the directory, clone, pin.
//!
//! Each dependency directory is wiped and fetched from scratch, so local edits
//! under `_vendor/src` are lost on every run. The VCS clients run as child
//! processes with an explicit working directory; the process working directory
//! is never changed.
//!
//! ## Commands
//!
//! - git: `git clone --quiet --no-checkout <repo> <path>`, then
//!   `git reset --quiet --hard <rev>` inside `<path>`
//! - hg: `hg clone --quiet --updaterev <rev> <repo> <path>`

use crate::error::{Result, VendorError};
use crate::manifest::{Dependency, Vcs};
use crate::vendor::create_dir_tree;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// What [`install`] left on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installed {
    /// Source tree fetched and pinned.
    Pinned,
    /// Unsupported VCS tag; the directory exists but is empty.
    Empty,
}

/// One external VCS invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsCommand {
    pub program: &'static str,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl VcsCommand {
    fn new(program: &'static str, args: &[&str], cwd: PathBuf) -> Self {
        Self {
            program,
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd,
        }
    }

    /// Runs to completion with inherited stdio and environment.
    fn run(&self) -> std::result::Result<(), String> {
        let status = Command::new(self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|e| format!("could not start {}: {}", self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("failed ({})", status))
        }
    }
}

impl fmt::Display for VcsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Commands that fetch and pin `dep` under `vendor_root`, in execution order.
///
/// Empty for unsupported VCS tags.
pub fn fetch_plan(dep: &Dependency, vendor_root: &Path) -> Vec<VcsCommand> {
    let root = vendor_root.to_path_buf();
    match dep.vcs() {
        Vcs::Git => vec![
            VcsCommand::new(
                "git",
                &[
                    "clone",
                    "--quiet",
                    "--no-checkout",
                    dep.repo.as_str(),
                    dep.path.as_str(),
                ],
                root.clone(),
            ),
            VcsCommand::new(
                "git",
                &["reset", "--quiet", "--hard", dep.rev.as_str()],
                root.join(&dep.path),
            ),
        ],
        Vcs::Hg => vec![VcsCommand::new(
            "hg",
            &[
                "clone",
                "--quiet",
                "--updaterev",
                dep.rev.as_str(),
                dep.repo.as_str(),
                dep.path.as_str(),
            ],
            root,
        )],
        Vcs::Unsupported => Vec::new(),
    }
}

/// Installs one dependency into `vendor_root/<path>`, replacing whatever was there.
pub fn install(dep: &Dependency, vendor_root: &Path) -> Result<Installed> {
    println!("{} Installing {}", "📦".blue(), dep.repo.bold());

    let dest = dependency_dir(dep, vendor_root)?;

    reset_dir(&dest)?;
    create_dir_tree(&dest).map_err(|e| VendorError::directory(&dest, e))?;

    let plan = fetch_plan(dep, vendor_root);
    if plan.is_empty() {
        println!(
            "   {} Unsupported vcs '{}' for {}, left {} empty",
            "!".yellow(),
            dep.vcs,
            dep.repo,
            dep.path
        );
        return Ok(Installed::Empty);
    }

    for cmd in &plan {
        run_with_spinner(cmd, dep).map_err(|detail| VendorError::Install {
            repo: dep.repo.clone(),
            path: dest.clone(),
            command: cmd.to_string(),
            detail,
        })?;
    }

    if !dep.rev.is_empty() {
        println!("   {} Pinned {} at {}", "📌".blue(), dep.path, dep.rev);
    }
    Ok(Installed::Pinned)
}

/// Resolves `dep.path` under the vendor root.
///
/// Only plain relative components are accepted, so the reset step can never
/// reach the vendor root itself or anything outside it.
fn dependency_dir(dep: &Dependency, vendor_root: &Path) -> Result<PathBuf> {
    let rel = Path::new(&dep.path);
    // components() drops interior and trailing "." so check the raw segments too.
    let no_dots = dep
        .path
        .split(['/', std::path::MAIN_SEPARATOR])
        .all(|seg| seg != "." && seg != "..");
    let plain = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if dep.path.trim().is_empty() || !no_dots || !plain {
        return Err(VendorError::directory(
            vendor_root.join(rel),
            format!(
                "dependency {} has path '{}'; expected a relative path without '.' or '..'",
                dep.repo, dep.path
            ),
        ));
    }
    Ok(vendor_root.join(rel))
}

/// Removes `dest` whether it is a directory, a file or a symlink. Missing is fine.
fn reset_dir(dest: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(dest) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(VendorError::directory(dest, e)),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(dest)
    } else {
        fs::remove_file(dest)
    };
    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(VendorError::directory(dest, e)),
    }
}

fn run_with_spinner(cmd: &VcsCommand, dep: &Dependency) -> std::result::Result<(), String> {
    if !console::user_attended_stderr() {
        return cmd.run();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷ "),
    );
    pb.set_message(format!("{} {}...", cmd.args[0], dep.path));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = cmd.run();
    pb.finish_and_clear();
    result
}
