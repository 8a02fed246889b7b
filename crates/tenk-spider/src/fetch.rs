use crate::http::*;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{error, trace};

/// GET request a workbook from `url` and write it to `path`, streaming the
/// body to disk chunk by chunk so peak memory stays independent of the
/// artifact size. Overwrites any file already at `path`.
pub async fn download_file(http_client: &HttpClient, url: &str, path: &Path) -> anyhow::Result<()> {
    trace!("downloading {url} to {}", path.display());
    let mut response = http_client.get(url).send().await.map_err(|err| {
        error!("failed to fetch {url}, error({err})");
        err
    })?;

    // NOTE: the body is written whatever the response status; EDGAR error
    // pages land on disk as if they were the workbook
    let mut file = File::create(path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    trace!("written {}", path.display());
    Ok(())
}
