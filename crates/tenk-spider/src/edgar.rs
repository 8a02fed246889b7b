use crate::http::*;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, trace};

/// Outcomes of the two EDGAR lookups that callers branch on; anything not
/// listed here is carried through as [`EdgarError::Http`].
#[derive(Debug, thiserror::Error)]
pub enum EdgarError {
    /// The submissions endpoint does not recognise the CIK.
    #[error("invalid CIK {0}")]
    InvalidCik(String),

    /// No financial statement workbook exists for this filing; common for
    /// filings made before machine-readable reports were published.
    #[error("no workbook for CIK {cik}, accession {accession}")]
    NoWorkbook { cik: String, accession: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// One regulatory submission from a company's filing history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filing {
    pub form: String,
    pub accession_number: String,
}

/// The two registry lookups the pipeline drives, kept behind a trait so the
/// orchestration can be exercised without the wire.
#[async_trait]
pub trait Registry {
    /// A company's filing history, in the order the registry returns it.
    async fn submissions(&self, cik: &str) -> Result<Vec<Filing>, EdgarError>;

    /// The workbook URL for one filing, or [`EdgarError::NoWorkbook`].
    async fn xlsx_url(&self, cik: &str, accession: &str) -> Result<String, EdgarError>;
}

/// Client for the [SEC EDGAR] submission registry.
///
/// [SEC EDGAR]: https://www.sec.gov/search-filings/edgar-application-programming-interfaces
pub struct EdgarClient {
    http_client: HttpClient,
}

impl EdgarClient {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Registry for EdgarClient {
    /// Fetch a company's filing history from the submissions endpoint, in
    /// the order EDGAR returns it.
    async fn submissions(&self, cik: &str) -> Result<Vec<Filing>, EdgarError> {
        let padded = pad_cik(cik)?;
        let url = format!("https://data.sec.gov/submissions/CIK{padded}.json");

        trace!("fetching submissions for CIK {padded}");
        let response = self.http_client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(EdgarError::InvalidCik(cik.to_string()));
        }

        let submissions: Submissions = response
            .error_for_status()?
            .json()
            .await
            .map_err(|err| {
                error!("failed to parse submissions JSON for CIK {padded}, error({err})");
                err
            })?;

        let filings = submissions.filings.recent.into_filings();
        debug!("CIK {padded}: {} filings listed", filings.len());
        Ok(filings)
    }

    /// Resolve the workbook URL for one filing, probing the Archives path
    /// with a HEAD request first: EDGAR answers 404 where a filing has no
    /// machine-readable workbook.
    async fn xlsx_url(&self, cik: &str, accession: &str) -> Result<String, EdgarError> {
        let url = xlsx_archive_url(cik, accession)?;

        trace!("probing workbook at {url}");
        let response = self.http_client.head(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(EdgarError::NoWorkbook {
                cik: cik.to_string(),
                accession: accession.to_string(),
            });
        }
        response.error_for_status()?;

        Ok(url)
    }
}

/// Zero-pad a CIK to the 10 digits the submissions endpoint expects.
pub fn pad_cik(cik: &str) -> Result<String, EdgarError> {
    let numeric: u64 = cik
        .parse()
        .map_err(|_| EdgarError::InvalidCik(cik.to_string()))?;
    Ok(format!("{numeric:010}"))
}

/// Build the Archives URL of a filing's workbook. The accession number is
/// embedded dash-less as the second-to-last path segment, which later becomes
/// the downloaded filename.
pub fn xlsx_archive_url(cik: &str, accession: &str) -> Result<String, EdgarError> {
    let numeric: u64 = cik
        .parse()
        .map_err(|_| EdgarError::InvalidCik(cik.to_string()))?;
    let accession = accession.replace('-', "");
    Ok(format!(
        "https://www.sec.gov/Archives/edgar/data/{numeric}/{accession}/Financial_Report.xlsx"
    ))
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Submissions {
    filings: Filings,
}

#[derive(Debug, Deserialize)]
struct Filings {
    recent: Recent,
}

// the submissions endpoint lists each filing attribute as a parallel array:
// `"accessionNumber": ["0000320193-24-000123", ...], "form": ["10-K", ...]`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recent {
    accession_number: Vec<String>,
    form: Vec<String>,
}

impl Recent {
    fn into_filings(self) -> Vec<Filing> {
        self.form
            .into_iter()
            .zip(self.accession_number)
            .map(|(form, accession_number)| Filing {
                form,
                accession_number,
            })
            .collect()
    }
}

/// Parse a raw submissions payload into its filing list; split out of
/// [`EdgarClient::submissions`] so the wire format is testable offline.
pub fn parse_submissions(body: &[u8]) -> anyhow::Result<Vec<Filing>> {
    let submissions: Submissions = serde_json::from_slice(body)?;
    Ok(submissions.filings.recent.into_filings())
}
