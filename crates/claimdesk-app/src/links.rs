// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use url::{Url, form_urlencoded};

use crate::{FilterCriteria, InvoiceFormInput, SelectionSet};

pub const FILTER_CLAIMS_PATH: &str = "finance/filter_claims/";
pub const GENERATE_REPORT_PATH: &str = "finance/generate_report/";
pub const GENERATE_INVOICE_PATH: &str = "finance/generate_invoice/";

/// Finance endpoints resolved against the dashboard's server root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            bail!("server.base_url must not be empty");
        }
        let mut base =
            Url::parse(trimmed).with_context(|| format!("invalid server URL {trimmed:?}"))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!(
                "server URL {trimmed:?} must use http or https, got {}",
                base.scheme()
            );
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn filter_claims(&self, criteria: &FilterCriteria) -> Result<Url> {
        let mut url = self.endpoint(FILTER_CLAIMS_PATH)?;
        if !criteria.is_empty() {
            url.query_pairs_mut().extend_pairs(criteria.iter());
        }
        Ok(url)
    }

    /// Special expenses and whiplash analysis are always included.
    pub fn report(&self, selection: &SelectionSet) -> Result<Url> {
        let mut url = self.endpoint(GENERATE_REPORT_PATH)?;
        let query = [
            claim_ids_pair(selection),
            encode_pair("include_special_expenses", "on"),
            encode_pair("include_whiplash", "on"),
        ]
        .join("&");
        url.set_query(Some(&query));
        Ok(url)
    }

    pub fn invoice(&self, form: &InvoiceFormInput, selection: &SelectionSet) -> Result<Url> {
        let mut url = self.endpoint(GENERATE_INVOICE_PATH)?;
        let mut pairs = form
            .pairs()
            .iter()
            .map(|(key, value)| encode_pair(key, value))
            .collect::<Vec<_>>();
        pairs.push(claim_ids_pair(selection));
        url.set_query(Some(&pairs.join("&")));
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("resolve {path} against {}", self.base))
    }
}

// Ids stay comma-joined without escaping the separator.
fn claim_ids_pair(selection: &SelectionSet) -> String {
    format!("claim_ids={}", selection.joined())
}

fn encode_pair(key: &str, value: &str) -> String {
    let key = form_urlencoded::byte_serialize(key.as_bytes()).collect::<String>();
    let value = form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>();
    format!("{key}={value}")
}

#[cfg(test)]
mod tests {
    use super::Endpoints;
    use crate::{ClaimId, FilterCriteria, InvoiceFormInput, SelectionSet};

    fn selection(ids: &[i64]) -> SelectionSet {
        ids.iter().copied().map(ClaimId::new).collect()
    }

    #[test]
    fn base_url_gains_trailing_slash_for_subpath_deployments() -> anyhow::Result<()> {
        let endpoints = Endpoints::new("https://claims.example/app")?;
        let url = endpoints.filter_claims(&FilterCriteria::new())?;
        assert_eq!(
            url.as_str(),
            "https://claims.example/app/finance/filter_claims/"
        );
        Ok(())
    }

    #[test]
    fn rejects_empty_and_non_http_urls() {
        assert!(Endpoints::new("  ").is_err());
        let error = Endpoints::new("ftp://claims.example").expect_err("ftp should fail");
        assert!(error.to_string().contains("http or https"));
    }

    #[test]
    fn filter_url_encodes_criteria_in_form_order() -> anyhow::Result<()> {
        let endpoints = Endpoints::new("http://localhost:8000")?;
        let criteria =
            FilterCriteria::from_entries([("start_date", "2024-01-01"), ("whiplash", "")]);
        let url = endpoints.filter_claims(&criteria)?;
        assert_eq!(url.path(), "/finance/filter_claims/");
        assert_eq!(url.query(), Some("start_date=2024-01-01&whiplash="));
        Ok(())
    }

    #[test]
    fn report_url_forces_both_flags() -> anyhow::Result<()> {
        let endpoints = Endpoints::new("http://localhost:8000/")?;
        let url = endpoints.report(&selection(&[7, 3]))?;
        assert_eq!(url.path(), "/finance/generate_report/");
        assert_eq!(
            url.query(),
            Some("claim_ids=3,7&include_special_expenses=on&include_whiplash=on")
        );
        Ok(())
    }

    #[test]
    fn invoice_url_appends_claim_ids_after_form_fields() -> anyhow::Result<()> {
        let endpoints = Endpoints::new("http://localhost:8000")?;
        let form = InvoiceFormInput {
            client_name: "Acme & Sons".to_owned(),
            invoice_date: "2024-06-01".to_owned(),
            due_date: String::new(),
            notes: "net 30".to_owned(),
        };
        let url = endpoints.invoice(&form, &selection(&[4, 9]))?;
        assert_eq!(url.path(), "/finance/generate_invoice/");
        assert_eq!(
            url.query(),
            Some("client_name=Acme+%26+Sons&invoice_date=2024-06-01&due_date=&notes=net+30&claim_ids=4,9")
        );
        Ok(())
    }
}
