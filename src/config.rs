use std::path::{Path, PathBuf};

/// Manifest read when no path is given on the command line.
pub const DEFAULT_MANIFEST: &str = "deps.json";

/// Vendor source root, relative to the base directory.
pub const VENDOR_SRC_DIR: &str = "_vendor/src";

pub const ENV_FILE: &str = ".env";

pub const ENV_EXPORT_LINE: &str = "export GOPATH=$(pwd)/_vendor:$GOPATH";

/// Where the vendor tree and the env hint live.
///
/// Everything is resolved against `base`, so nothing depends on the process
/// working directory after the layout is built.
#[derive(Debug, Clone)]
pub struct VendorLayout {
    pub base: PathBuf,
    pub vendor_dir: PathBuf,
    pub env_file: PathBuf,
    pub env_line: String,
}

impl VendorLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            vendor_dir: PathBuf::from(VENDOR_SRC_DIR),
            env_file: PathBuf::from(ENV_FILE),
            env_line: ENV_EXPORT_LINE.to_string(),
        }
    }

    /// Layout rooted at the current working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn vendor_path(&self) -> PathBuf {
        self.base.join(&self.vendor_dir)
    }

    pub fn env_path(&self) -> PathBuf {
        self.base.join(&self.env_file)
    }

    /// Resolves a manifest path given relative to the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}
