use crate::core::http;
use crate::error::{NetplayError, Result};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn percent(&self) -> Option<u8> {
        match self.total {
            Some(0) | None => None,
            Some(total) => Some(((self.downloaded.min(total) * 100) / total) as u8),
        }
    }
}

/// Progress callback that only logs.
pub fn log_progress(progress: DownloadProgress) {
    match progress.percent() {
        Some(percent) => log::debug!("Downloaded {} bytes ({percent}%)", progress.downloaded),
        None => log::debug!("Downloaded {} bytes", progress.downloaded),
    }
}

pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
        })
    }

    /// Streams `url` to `destination`.
    ///
    /// Bytes go to `<destination>.part` first and the file is only renamed
    /// into place once the body has been fully written.
    pub fn download_file<F>(&self, url: &str, destination: &Path, mut on_progress: F) -> Result<()>
    where
        F: FnMut(DownloadProgress),
    {
        log::info!("Downloading {url} to {}", destination.display());

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut response = http::ensure_success(self.client.get(url).send()?, url)?;
        let total = response.content_length();

        let partial = partial_path(destination);
        let mut writer = BufWriter::new(File::create(&partial)?);
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut downloaded = 0u64;

        // Read failures come from the connection, write failures from the disk.
        let copied: Result<()> = loop {
            let read = match response.read(&mut buffer) {
                Ok(0) => break Ok(()),
                Ok(read) => read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    break Err(NetplayError::DownloadError {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
                }
            };
            if let Err(e) = writer.write_all(&buffer[..read]) {
                break Err(e.into());
            }
            downloaded += read as u64;
            on_progress(DownloadProgress { downloaded, total });
        };

        let finished = copied.and_then(|_| writer.flush().map_err(NetplayError::from));
        drop(writer);
        if let Err(e) = finished {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }

        std::fs::rename(&partial, destination)?;
        log::info!("Successfully downloaded {url} ({downloaded} bytes)");
        Ok(())
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Extracts every entry of a zip archive into `destination`, overwriting
/// existing files, and returns the names of the extracted entries in archive
/// order. Entries that would land outside `destination` are skipped.
pub fn extract_zip(archive_path: &Path, destination: &Path) -> Result<Vec<String>> {
    log::info!(
        "Extracting {} to {}",
        archive_path.display(),
        destination.display()
    );

    std::fs::create_dir_all(destination)?;

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| NetplayError::extraction_error(archive_path, e.to_string()))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| NetplayError::extraction_error(archive_path, e.to_string()))?;
        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                log::warn!("Skipping unsafe archive entry {}", file.name());
                continue;
            }
        };
        entries.push(file.name().to_string());

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                if !p.exists() {
                    std::fs::create_dir_all(p)?;
                }
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
            }
        }
    }

    log::info!("Extracted {} entries", entries.len());
    Ok(entries)
}
