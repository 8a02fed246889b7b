use crate::edgar::{EdgarClient, EdgarError, Filing, Registry};
use crate::http::*;
use crate::roster::Company;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// The filing category retained for download; every other form type is
/// excluded.
pub const ANNUAL_REPORT_FORM: &str = "10-K";

/// Fixed extension of the financial statement workbooks.
const WORKBOOK_EXT: &str = "xlsx";

/// Run the retrieval batch: for each roster company, look up its filing
/// history, keep the 10-Ks, resolve each workbook URL, and download the lot
/// into `<out_dir>/<title>/`.
///
/// The output root is created fresh; an existing directory fails the run.
pub async fn run(roster_path: &str, out_dir: &Path, tui: bool) -> anyhow::Result<()> {
    let companies = crate::roster::read_roster(roster_path)?;
    let http_client = crate::std_client_build();
    let client = EdgarClient::new(http_client.clone());

    trace!("creating output root {}", out_dir.display());
    tokio::fs::create_dir(out_dir).await.map_err(|err| {
        error!(
            "failed to create output root {}, error({err})",
            out_dir.display()
        );
        err
    })?;

    // progress bar across the roster
    let pb = if tui {
        let pb = ProgressBar::new(companies.len() as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} {spinner:.magenta}\n\
                    [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
                    [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
                )?
                .progress_chars("##-"),
        );
        pb.set_message("collecting 10-K workbooks ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let time = std::time::Instant::now();
    for company in &companies {
        scrape_company(&client, &http_client, company, out_dir).await?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "batch finished, {} companies processed, {}",
        companies.len(),
        crate::time_elapsed(time)
    );

    Ok(())
}

/// Retrieve every 10-K workbook for one company. An unrecognised CIK skips
/// the company; every other error aborts the batch.
pub async fn scrape_company<R: Registry + Sync>(
    registry: &R,
    http_client: &HttpClient,
    company: &Company,
    out_dir: &Path,
) -> anyhow::Result<()> {
    // the company directory exists whether or not anything downloads for it
    let company_dir = out_dir.join(&company.title);
    tokio::fs::create_dir(&company_dir).await?;

    let filings = match registry.submissions(&company.cik).await {
        Ok(filings) => filings,
        Err(EdgarError::InvalidCik(cik)) => {
            error!("CIK lookup failed for {}, CIK({cik})", company.title);
            println!("Failed for {}", company.title);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let selected = select_annual_reports(&filings);
    println!("Found {} 10-K for {}", selected.len(), company.title);

    // phase one: resolve every workbook location
    let (downloads, missed) = resolve_workbooks(registry, &company.cik, &selected).await?;
    println!(
        "{} reports to be downloaded for {} [missed {missed}]",
        downloads.len(),
        company.cik
    );

    // phase two: fetch each resolved workbook in turn
    let total = downloads.len();
    let mut done = 0;
    for url in &downloads {
        let path = workbook_path(&company_dir, url)?;
        crate::fetch::download_file(http_client, url, &path).await?;
        done += 1;
        println!("Downloaded [{done}/{total}]");
    }

    Ok(())
}

/// Resolve the workbook URL of every selected filing. A missing workbook is
/// expected for older filings and only counted; any other registry error
/// propagates.
pub async fn resolve_workbooks<R: Registry + Sync>(
    registry: &R,
    cik: &str,
    filings: &[Filing],
) -> Result<(Vec<String>, usize), EdgarError> {
    let mut downloads = Vec::new();
    let mut missed = 0;
    for filing in filings {
        match registry.xlsx_url(cik, &filing.accession_number).await {
            Ok(url) => downloads.push(url),
            Err(EdgarError::NoWorkbook { accession, .. }) => {
                debug!("no workbook for CIK {cik}, accession({accession})");
                missed += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok((downloads, missed))
}

/// Keep only annual reports, preserving the registry's ordering.
pub fn select_annual_reports(filings: &[Filing]) -> Vec<Filing> {
    filings
        .iter()
        .filter(|filing| filing.form == ANNUAL_REPORT_FORM)
        .cloned()
        .collect()
}

/// Destination path for a workbook URL: the path segment before the final
/// component is the accession-scoped identifier, so the same URL always maps
/// to the same filename.
pub fn workbook_path(company_dir: &Path, url: &str) -> anyhow::Result<PathBuf> {
    let mut segments = url.rsplit('/');
    let _file = segments.next();
    let stem = segments
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| anyhow::anyhow!("no accession segment in workbook url: {url}"))?;
    Ok(company_dir.join(format!("{stem}.{WORKBOOK_EXT}")))
}
