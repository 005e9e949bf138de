use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};

/// `screenshot_<YYYY_MM_DD.HH_MM_SS.mmm>.png`
pub fn file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("screenshot_{}.png", at.format("%Y_%m_%d.%H_%M_%S%.3f"))
}

/// Creates `dir` if missing and returns the file path for a shot taken `at`.
pub fn prepare_path<Tz: TimeZone>(dir: &Path, at: DateTime<Tz>) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create screenshot directory {}", dir.display()))?;
    Ok(dir.join(file_name(&at)))
}
