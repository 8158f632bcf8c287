use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Directory that report results are dumped into.
#[derive(Debug, Clone)]
pub struct ReportDir {
    path: PathBuf,
}

impl ReportDir {
    /// Create the directory if it is missing. Call once before the first save.
    pub fn ensure(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// `<name>_<YYYYMMDD_HHMMSS>.json`, with `_1`, `_2`, ... appended when a
    /// report of the same name was already written this second.
    fn timestamped_path(&self, name: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let base = format!("{name}_{stamp}");
        let mut candidate = self.path.join(format!("{base}.json"));
        let mut n = 1;
        while candidate.exists() {
            candidate = self.path.join(format!("{base}_{n}.json"));
            n += 1;
        }
        candidate
    }

    /// Write `value` as 2-space indented UTF-8 JSON. An explicit `filename`
    /// is used verbatim; otherwise a timestamped name inside the directory.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        filename: Option<&Path>,
    ) -> Result<PathBuf> {
        let out_path = match filename {
            Some(p) => {
                if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                p.to_path_buf()
            }
            None => self.timestamped_path(name),
        };
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&out_path, json)?;
        tracing::info!(path = %out_path.display(), "report saved");
        Ok(out_path)
    }
}

/// Run `compute` and, when a directory is given, persist its result under
/// `name` before handing it back. Passing `None` skips persistence.
pub fn with_report<T, F>(
    dir: Option<&ReportDir>,
    name: &str,
    filename: Option<&Path>,
    compute: F,
) -> Result<T>
where
    T: Serialize,
    F: FnOnce() -> Result<T>,
{
    let result = compute()?;
    if let Some(dir) = dir {
        dir.save(name, &result, filename)?;
    }
    Ok(result)
}
