use anyhow::{Context, bail};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use std::path::Path;
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::{info, warn};

/// Downloads model artifacts that are missing on disk.
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, file_id: &str) -> String {
        format!("{}?export=download&id={}", self.base_url, file_id)
    }

    /// No-op when `dest` exists. A failed download leaves no file behind.
    /// Returns whether a download happened.
    pub async fn ensure(&self, file_id: &str, dest: &Path) -> anyhow::Result<bool> {
        if dest.exists() {
            return Ok(false);
        }
        info!("Downloading {} from remote store...", dest.display());
        if let Some(parent) = dest.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        match self.download(file_id, dest).await {
            Ok(bytes) => {
                info!("{} downloaded ({bytes} bytes)", dest.display());
                Ok(true)
            }
            Err(err) => {
                if let Err(remove_err) = fs::remove_file(dest).await {
                    if dest.exists() {
                        warn!("Failed to remove partial {}: {remove_err}", dest.display());
                    }
                }
                Err(err)
            }
        }
    }

    async fn download(&self, file_id: &str, dest: &Path) -> anyhow::Result<u64> {
        let response = self
            .client
            .get(self.url_for(file_id))
            .header(ACCEPT_ENCODING, "gzip, deflate")
            .send()
            .await
            .context("Failed to fetch")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Response is not success ({status}): {body}");
        }
        // The remote store answers large or restricted files with an HTML
        // confirmation page instead of the file itself.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if content_type.starts_with("text/html") {
            bail!("Expected an artifact for {file_id} but got an HTML page");
        }

        let mut file = File::create(dest)
            .await
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let data = chunk.context("Failed to fetch chunk")?;
            file.write_all(&data)
                .await
                .context("Failed to write to file")?;
            written += data.len() as u64;
        }
        file.flush().await.context("Failed to flush file")?;
        Ok(written)
    }
}

/// Removes artifacts so the next start downloads them again.
pub async fn discard(paths: &[&Path]) {
    for path in paths {
        match fs::remove_file(path).await {
            Ok(()) => warn!("Discarded {}", path.display()),
            Err(err) if path.exists() => warn!("Failed to discard {}: {err}", path.display()),
            Err(_) => {}
        }
    }
}
