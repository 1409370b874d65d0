//! Cached dataset downloads.
//!
//! Files land at `<cache_root>/<stem>/<fname>`, where `<stem>` is `fname` up
//! to its first `.`. A second call for the same `fname` is a no-op once the
//! file exists. Bodies are streamed into `<fname>.part` and renamed on
//! success, so an interrupted download is never mistaken for a cached file.
//! Progress is drawn on stderr, sized from `content-length` when the server
//! sends one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;

use crate::error::AppError;

const CACHE_DIR_ENV: &str = "TG_DATA_DIR";
const DEFAULT_CACHE_DIR: &str = "data";

/// Cache root from `TG_DATA_DIR` (also read from `.env`), else `./data`.
pub fn cache_root_from_env() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var_os(CACHE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
}

/// Deterministic local path for `fname` under `cache_root`.
pub fn cache_path(cache_root: &Path, fname: &str) -> PathBuf {
    let stem = fname.split('.').next().unwrap_or(fname);
    cache_root.join(stem).join(fname)
}

/// Ensure `fname` exists in the cache, downloading it from `url` if needed.
pub fn download(url: &str, fname: &str, cache_root: &Path) -> Result<PathBuf, AppError> {
    if fname.is_empty() || fname.contains(['/', '\\']) {
        return Err(AppError::new(2, format!("Invalid download file name '{fname}'.")));
    }

    let path = cache_path(cache_root, fname);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::new(4, format!("Failed to create cache dir '{}': {e}", dir.display())))?;
    }

    if path.exists() {
        log::info!("{} already exists, skipping download...", path.display());
        return Ok(path);
    }

    log::info!("Downloading {url} to {}...", path.display());
    let bytes = fetch_to(url, fname, &path)?;
    log::info!("Download done ({bytes} bytes).");
    Ok(path)
}

fn fetch_to(url: &str, label: &str, dest: &Path) -> Result<u64, AppError> {
    let mut resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| AppError::new(4, format!("Download request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::new(
            4,
            format!("Download of {url} failed with status {}.", resp.status()),
        ));
    }

    let bar = progress_bar(resp.content_length())?;
    bar.set_message(label.to_string());

    let part = dest.with_extension(part_extension(dest));
    let file = File::create(&part)
        .map_err(|e| AppError::new(4, format!("Failed to create '{}': {e}", part.display())))?;
    let mut writer = ProgressWriter::new(file, bar);
    io::copy(&mut resp, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::new(4, format!("Failed to write download body: {e}")))?;
    let bytes = writer.finish();

    fs::rename(&part, dest)
        .map_err(|e| AppError::new(4, format!("Failed to move download into place: {e}")))?;
    Ok(bytes)
}

/// Byte bar when the total is known, spinner otherwise.
fn progress_bar(total: Option<u64>) -> Result<ProgressBar, AppError> {
    let (bar, template) = match total {
        Some(len) => (
            ProgressBar::new(len),
            "{msg} [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ),
        None => (ProgressBar::new_spinner(), "{spinner} {msg} {bytes} ({bytes_per_sec})"),
    };
    let style = ProgressStyle::default_bar()
        .template(template)
        .map_err(|e| AppError::new(4, format!("Invalid progress template: {e}")))?;
    bar.set_style(style.progress_chars("=> "));
    Ok(bar)
}

/// Writer that advances a progress bar by every byte it accepts.
struct ProgressWriter<W> {
    inner: W,
    bar: ProgressBar,
    written: u64,
}

impl<W: Write> ProgressWriter<W> {
    fn new(inner: W, bar: ProgressBar) -> Self {
        Self { inner, bar, written: 0 }
    }

    /// Closes the bar and returns the byte count. Drops `inner`.
    fn finish(self) -> u64 {
        self.bar.finish();
        self.written
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        self.bar.inc(n as u64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn part_extension(dest: &Path) -> String {
    match dest.extension() {
        Some(ext) => format!("{}.part", ext.to_string_lossy()),
        None => "part".to_string(),
    }
}
