// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use time::Date;
use time::macros::format_description;

use crate::{FilterCriteria, FormKind, WhiplashFilter};

/// Raw values of the filter form, kept as typed text until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFormInput {
    pub start_date: String,
    pub end_date: String,
    pub min_settlement: String,
    pub max_settlement: String,
    pub whiplash: WhiplashFilter,
}

impl Default for FilterFormInput {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            end_date: String::new(),
            min_settlement: String::new(),
            max_settlement: String::new(),
            whiplash: WhiplashFilter::Any,
        }
    }
}

impl FilterFormInput {
    pub const FIELDS: [&'static str; 5] = [
        "start_date",
        "end_date",
        "min_settlement",
        "max_settlement",
        "whiplash",
    ];

    pub fn validate(&self) -> Result<()> {
        let start = parse_form_date("start date", &self.start_date)?;
        let end = parse_form_date("end date", &self.end_date)?;
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            bail!("end date must be on/after start date");
        }

        let min = parse_amount("minimum settlement", &self.min_settlement)?;
        let max = parse_amount("maximum settlement", &self.max_settlement)?;
        if let (Some(min), Some(max)) = (min, max)
            && max < min
        {
            bail!("maximum settlement must be at least the minimum");
        }
        Ok(())
    }

    /// Every field goes out, empty ones included, in form order.
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria::from_entries([
            ("start_date", self.start_date.trim()),
            ("end_date", self.end_date.trim()),
            ("min_settlement", amount_text(&self.min_settlement)),
            ("max_settlement", amount_text(&self.max_settlement)),
            ("whiplash", self.whiplash.as_str()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceFormInput {
    pub client_name: String,
    pub invoice_date: String,
    pub due_date: String,
    pub notes: String,
}

impl InvoiceFormInput {
    pub const FIELDS: [&'static str; 4] = ["client_name", "invoice_date", "due_date", "notes"];

    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            bail!("invoice client name is required -- enter a name and retry");
        }
        let Some(invoice_date) = parse_form_date("invoice date", &self.invoice_date)? else {
            bail!("invoice date is required -- use YYYY-MM-DD");
        };
        if let Some(due_date) = parse_form_date("due date", &self.due_date)?
            && due_date < invoice_date
        {
            bail!("invoice due date must be on/after the invoice date");
        }
        Ok(())
    }

    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("client_name", self.client_name.trim()),
            ("invoice_date", self.invoice_date.trim()),
            ("due_date", self.due_date.trim()),
            ("notes", self.notes.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    Filter(FilterFormInput),
    Invoice(InvoiceFormInput),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Filter(_) => FormKind::Filter,
            Self::Invoice(_) => FormKind::Invoice,
        }
    }

    pub fn blank_for(kind: FormKind) -> Self {
        match kind {
            FormKind::Filter => Self::Filter(FilterFormInput::default()),
            FormKind::Invoice => Self::Invoice(InvoiceFormInput::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Filter(form) => form.validate(),
            Self::Invoice(form) => form.validate(),
        }
    }
}

pub fn parse_form_date(label: &str, value: &str) -> Result<Option<Date>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("{label} {trimmed:?} is not a date; use YYYY-MM-DD"))?;
    Ok(Some(date))
}

/// Amount text as the server expects it: trimmed, without a leading `£`.
pub fn amount_text(value: &str) -> &str {
    value.trim().trim_start_matches('£').trim_start()
}

pub fn parse_amount(label: &str, value: &str) -> Result<Option<f64>> {
    let trimmed = amount_text(value);
    if trimmed.is_empty() {
        return Ok(None);
    }
    let amount: f64 = trimmed
        .parse()
        .with_context(|| format!("{label} {trimmed:?} is not a number"))?;
    if !amount.is_finite() || amount < 0.0 {
        bail!("{label} must be a non-negative amount");
    }
    Ok(Some(amount))
}

#[cfg(test)]
mod tests {
    use super::{
        FilterFormInput, FormPayload, InvoiceFormInput, parse_amount, parse_form_date,
    };
    use crate::{FormKind, WhiplashFilter};
    use time::{Date, Month};

    #[test]
    fn blank_filter_form_validates_and_sends_every_field() {
        let form = FilterFormInput::default();
        assert!(form.validate().is_ok());

        let criteria = form.to_criteria();
        let keys = criteria.iter().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, FilterFormInput::FIELDS.to_vec());
        assert!(criteria.iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn filter_form_rejects_inverted_date_range() {
        let form = FilterFormInput {
            start_date: "2024-05-02".to_owned(),
            end_date: "2024-05-01".to_owned(),
            ..FilterFormInput::default()
        };
        let error = form.validate().expect_err("inverted range should fail");
        assert!(error.to_string().contains("on/after start date"));
    }

    #[test]
    fn filter_form_rejects_inverted_amounts() {
        let form = FilterFormInput {
            min_settlement: "500".to_owned(),
            max_settlement: "100".to_owned(),
            ..FilterFormInput::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn filter_form_trims_values_into_criteria() {
        let form = FilterFormInput {
            start_date: " 2024-01-01 ".to_owned(),
            whiplash: WhiplashFilter::Yes,
            ..FilterFormInput::default()
        };
        let criteria = form.to_criteria();
        assert_eq!(criteria.get("start_date"), Some("2024-01-01"));
        assert_eq!(criteria.get("whiplash"), Some("yes"));
    }

    #[test]
    fn pound_sign_is_dropped_before_amounts_go_out() {
        let form = FilterFormInput {
            min_settlement: "£100".to_owned(),
            max_settlement: " £ 2500.50 ".to_owned(),
            ..FilterFormInput::default()
        };
        assert!(form.validate().is_ok());

        let criteria = form.to_criteria();
        assert_eq!(criteria.get("min_settlement"), Some("100"));
        assert_eq!(criteria.get("max_settlement"), Some("2500.50"));
    }

    #[test]
    fn invoice_form_requires_client_and_date() {
        let mut form = InvoiceFormInput::default();
        assert!(form.validate().is_err());

        form.client_name = "Acme Legal".to_owned();
        let error = form.validate().expect_err("missing date should fail");
        assert!(error.to_string().contains("invoice date is required"));

        form.invoice_date = "2024-06-01".to_owned();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn invoice_form_rejects_due_date_before_invoice_date() {
        let form = InvoiceFormInput {
            client_name: "Acme Legal".to_owned(),
            invoice_date: "2024-06-01".to_owned(),
            due_date: "2024-05-01".to_owned(),
            notes: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn payload_kind_matches_blank_form() {
        assert_eq!(FormPayload::blank_for(FormKind::Filter).kind(), FormKind::Filter);
        assert_eq!(
            FormPayload::blank_for(FormKind::Invoice).kind(),
            FormKind::Invoice
        );
    }

    #[test]
    fn form_dates_and_amounts_parse() {
        assert_eq!(
            parse_form_date("date", "2024-02-29").expect("valid date"),
            Some(Date::from_calendar_date(2024, Month::February, 29).expect("valid date"))
        );
        assert_eq!(parse_form_date("date", "  ").expect("blank date"), None);
        assert!(parse_form_date("date", "29/02/2024").is_err());

        assert_eq!(parse_amount("amount", "£12.50").expect("amount"), Some(12.5));
        assert!(parse_amount("amount", "-1").is_err());
        assert!(parse_amount("amount", "NaN").is_err());
    }
}
