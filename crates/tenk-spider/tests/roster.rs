use std::io::Write;
use tenk_spider::roster::{read_roster, Company};

// Roster rows follow the sp500.csv layout: ticker at column 0, display name
// at column 1, CIK at column 6.

#[test]
fn read_roster_keeps_title_and_cik_columns() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Symbol,Security,GICS Sector,GICS Sub-Industry,Headquarters,Date added,CIK,Founded"
    )
    .unwrap();
    writeln!(file, "AAA,Acme Corp,Industrials,Widgets,Nowhere,1957-03-04,0001234567,1916").unwrap();
    writeln!(file, "BBB,Bolt Inc,Industrials,Bolts,Elsewhere,1976-08-09,66740,1902").unwrap();

    let companies = read_roster(file.path().to_str().unwrap()).unwrap();
    assert_eq!(
        companies,
        vec![
            Company {
                cik: "0001234567".to_string(),
                title: "Acme Corp".to_string(),
            },
            Company {
                cik: "66740".to_string(),
                title: "Bolt Inc".to_string(),
            },
        ]
    );
}

#[test]
fn read_roster_discards_the_header_row() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Symbol,Security,a,b,c,d,CIK,e").unwrap();

    let companies = read_roster(file.path().to_str().unwrap()).unwrap();
    assert!(companies.is_empty());
}

#[test]
fn read_roster_rejects_short_rows() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Symbol,Security,a,b,c,d,CIK,e").unwrap();
    writeln!(file, "AAA,Acme Corp").unwrap();

    assert!(read_roster(file.path().to_str().unwrap()).is_err());
}
