use async_trait::async_trait;
use tenk_spider::edgar::{EdgarError, Filing, Registry};
use tenk_spider::pipeline::{resolve_workbooks, scrape_company};
use tenk_spider::roster::Company;

fn filing(form: &str, accession: &str) -> Filing {
    Filing {
        form: form.to_string(),
        accession_number: accession.to_string(),
    }
}

// Offline stand-in for EDGAR: one unrecognised CIK, everyone else holding
// filings whose workbook probes all miss, so nothing reaches the fetch phase.
struct StubRegistry;

#[async_trait]
impl Registry for StubRegistry {
    async fn submissions(&self, cik: &str) -> Result<Vec<Filing>, EdgarError> {
        match cik {
            "9999999" => Err(EdgarError::InvalidCik(cik.to_string())),
            _ => Ok(vec![
                filing("10-K", "0001234567-24-000111"),
                filing("10-Q", "0001234567-24-000222"),
                filing("10-K", "0001234567-23-000333"),
            ]),
        }
    }

    async fn xlsx_url(&self, cik: &str, accession: &str) -> Result<String, EdgarError> {
        Err(EdgarError::NoWorkbook {
            cik: cik.to_string(),
            accession: accession.to_string(),
        })
    }
}

// Stand-in where only accession "0001234567-24-000111" carries a workbook.
struct PatchyRegistry;

#[async_trait]
impl Registry for PatchyRegistry {
    async fn submissions(&self, _cik: &str) -> Result<Vec<Filing>, EdgarError> {
        Ok(Vec::new())
    }

    async fn xlsx_url(&self, cik: &str, accession: &str) -> Result<String, EdgarError> {
        match accession {
            "0001234567-24-000111" => Ok(
                "https://www.sec.gov/Archives/edgar/data/1234567/000123456724000111/Financial_Report.xlsx"
                    .to_string(),
            ),
            _ => Err(EdgarError::NoWorkbook {
                cik: cik.to_string(),
                accession: accession.to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn an_unrecognised_cik_skips_the_company_and_the_batch_continues() {
    let out = tempfile::tempdir().unwrap();
    let registry = StubRegistry;
    let http_client = reqwest::Client::new();

    let ghost = Company {
        cik: "9999999".to_string(),
        title: "Ghost Corp".to_string(),
    };
    let acme = Company {
        cik: "1234567".to_string(),
        title: "Acme Corp".to_string(),
    };

    // the invalid CIK does not escape the per-company boundary
    scrape_company(&registry, &http_client, &ghost, out.path())
        .await
        .unwrap();
    // and the next company is still processed
    scrape_company(&registry, &http_client, &acme, out.path())
        .await
        .unwrap();

    // both company directories exist, the skipped one empty
    let ghost_dir = out.path().join("Ghost Corp");
    assert!(ghost_dir.is_dir());
    assert!(std::fs::read_dir(&ghost_dir).unwrap().next().is_none());
    assert!(out.path().join("Acme Corp").is_dir());
}

#[tokio::test]
async fn a_company_whose_probes_all_miss_still_completes() {
    let out = tempfile::tempdir().unwrap();
    let registry = StubRegistry;
    let http_client = reqwest::Client::new();

    let acme = Company {
        cik: "1234567".to_string(),
        title: "Acme Corp".to_string(),
    };
    scrape_company(&registry, &http_client, &acme, out.path())
        .await
        .unwrap();

    // nothing downloaded, nothing fatal
    let acme_dir = out.path().join("Acme Corp");
    assert!(std::fs::read_dir(&acme_dir).unwrap().next().is_none());
}

#[tokio::test]
async fn missing_workbooks_are_counted_and_skipped() {
    let filings = vec![
        filing("10-K", "0001234567-24-000111"),
        filing("10-K", "0001234567-23-000333"),
        filing("10-K", "0001234567-22-000444"),
    ];

    let (downloads, missed) = resolve_workbooks(&PatchyRegistry, "1234567", &filings)
        .await
        .unwrap();

    assert_eq!(
        downloads,
        vec![
            "https://www.sec.gov/Archives/edgar/data/1234567/000123456724000111/Financial_Report.xlsx"
                .to_string()
        ]
    );
    assert_eq!(missed, 2);
}
