//! Customer import from CSV

use crate::model::NewCustomer;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },
}

/// One CSV row before validation. Every column is optional at this point
/// so a blank cell is reported with its line instead of a parse error.
#[derive(Debug, Deserialize)]
struct CustomerRow {
    name: Option<String>,
    email: Option<String>,
    currency: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    balance_cents: Option<i64>,
}

fn required(value: Option<String>, line: usize, field: &'static str) -> Result<String, ImportError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ImportError::MissingField { line, field })
}

pub fn read_customers_csv(path: &Path) -> Result<Vec<NewCustomer>, ImportError> {
    let file = std::fs::File::open(path)?;
    parse_customers(file)
}

/// Parse customers from CSV with a header row
pub fn parse_customers<R: std::io::Read>(reader: R) -> Result<Vec<NewCustomer>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut customers = Vec::new();
    for (index, row) in reader.deserialize::<CustomerRow>().enumerate() {
        let row = row?;
        let line = index + 1;
        customers.push(NewCustomer {
            name: required(row.name, line, "name")?,
            email: required(row.email, line, "email")?,
            currency: required(row.currency, line, "currency")?.to_uppercase(),
            alias: row.alias.filter(|a| !a.is_empty()),
            balance_cents: row.balance_cents.unwrap_or(0),
        });
    }
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_customers() {
        let csv = "name,email,currency,alias,balance_cents\n\
                   Acme Labs,ops@acme.test,usd,acme,1500\n\
                   Globex,billing@globex.test,EUR,,\n";
        let customers = parse_customers(csv.as_bytes()).unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "Acme Labs");
        assert_eq!(customers[0].currency, "USD");
        assert_eq!(customers[0].alias.as_deref(), Some("acme"));
        assert_eq!(customers[0].balance_cents, 1500);
        assert_eq!(customers[1].alias, None);
        assert_eq!(customers[1].balance_cents, 0);
    }

    #[test]
    fn test_optional_columns_can_be_absent() {
        let csv = "name,email,currency\nInitech,ap@initech.test,GBP\n";
        let customers = parse_customers(csv.as_bytes()).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].alias, None);
    }

    #[test]
    fn test_missing_field_reports_line() {
        let csv = "name,email,currency\nA,a@a.test,USD\nB,,USD\n";
        let err = parse_customers(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingField {
                line: 2,
                field: "email"
            }
        ));
        assert_eq!(err.to_string(), "line 2: missing required field `email`");
    }

    #[test]
    fn test_bad_balance_is_csv_error() {
        let csv = "name,email,currency,balance_cents\nA,a@a.test,USD,lots\n";
        assert!(matches!(
            parse_customers(csv.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let path = std::env::temp_dir().join("billing-tui-does-not-exist.csv");
        assert!(matches!(read_customers_csv(&path), Err(ImportError::Io(_))));
    }

    #[test]
    fn test_read_customers_file() {
        let path = std::env::temp_dir().join(format!("billing-tui-import-{}.csv", std::process::id()));
        std::fs::write(&path, "name,email,currency\nHooli,x@hooli.test,usd\n").unwrap();
        let customers = read_customers_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(customers[0].name, "Hooli");
        assert_eq!(customers[0].currency, "USD");
    }
}
