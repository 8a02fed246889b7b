use tracing::{debug, trace};

// columns of the roster csv, 0-based:
// `ticker, title, ..., cik, ...`
const TITLE_COL: usize = 1;
const CIK_COL: usize = 6;

/// One roster row; the company title doubles as the output directory name,
/// the CIK is the lookup key into EDGAR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub cik: String,
    pub title: String,
}

/// Read the company roster from a csv file at `path`.
///
/// The first row is a header and is discarded; every following row must carry
/// the display name at column 1 and the CIK at column 6.
pub fn read_roster(path: &str) -> anyhow::Result<Vec<Company>> {
    trace!("reading roster csv at {path}");
    let mut rdr = csv::Reader::from_path(path)?;

    let mut companies = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let title = record
            .get(TITLE_COL)
            .ok_or_else(|| anyhow::anyhow!("roster row missing title column: {record:?}"))?;
        let cik = record
            .get(CIK_COL)
            .ok_or_else(|| anyhow::anyhow!("roster row missing CIK column: {record:?}"))?;
        companies.push(Company {
            cik: cik.to_string(),
            title: title.to_string(),
        });
    }

    debug!("roster read, {} companies listed", companies.len());
    Ok(companies)
}
