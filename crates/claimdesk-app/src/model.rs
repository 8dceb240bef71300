// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

/// A claim as returned by the filter endpoint. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub accident_date: String,
    pub settlement_value: f64,
    pub whiplash: bool,
    pub special_health_expenses: f64,
    pub special_reduction: f64,
}

/// Field/value constraints last submitted through the filter form.
///
/// Keeps form order. A repeated key keeps its first position and takes the
/// last value, matching how a submitted form collapses into an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    entries: Vec<(String, String)>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut criteria = Self::default();
        for (key, value) in entries {
            criteria.set(key, value);
        }
        criteria
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Hidden,
    Visible,
}

impl PanelVisibility {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhiplashFilter {
    Any,
    Yes,
    No,
}

impl WhiplashFilter {
    pub const ALL: [Self; 3] = [Self::Any, Self::Yes, Self::No];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "any" => Some(Self::Any),
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    pub fn matches(self, whiplash: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Yes => whiplash,
            Self::No => !whiplash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Filter,
    Invoice,
}

impl FormKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Filter => "filter claims",
            Self::Invoice => "generate invoice",
        }
    }
}

/// One table row as currently drawn: the claim plus its checkbox state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub claim: ClaimRecord,
    pub checked: bool,
}

/// Text shown by the selection summary panel; `None` means the panel is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    pub text: Option<String>,
}

impl SelectionSummary {
    pub fn visibility(&self) -> PanelVisibility {
        if self.text.is_some() {
            PanelVisibility::Visible
        } else {
            PanelVisibility::Hidden
        }
    }
}

/// Everything the dashboard draws: results table, panels and the invoice modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub(crate) rows: Vec<RenderedRow>,
    pub(crate) results: PanelVisibility,
    pub(crate) summary: SelectionSummary,
    pub(crate) invoice_modal: PanelVisibility,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            results: PanelVisibility::Hidden,
            summary: SelectionSummary::default(),
            invoice_modal: PanelVisibility::Hidden,
        }
    }
}

impl PageView {
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn results(&self) -> PanelVisibility {
        self.results
    }

    pub fn summary(&self) -> &SelectionSummary {
        &self.summary
    }

    pub fn invoice_modal(&self) -> PanelVisibility {
        self.invoice_modal
    }

    pub fn row(&self, id: ClaimId) -> Option<&RenderedRow> {
        self.rows.iter().find(|row| row.claim.id == id)
    }

    pub fn checked_ids(&self) -> Vec<ClaimId> {
        self.rows
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.claim.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClaimRecord, FilterCriteria, WhiplashFilter};
    use crate::ClaimId;

    #[test]
    fn criteria_keep_first_position_and_last_value() {
        let criteria = FilterCriteria::from_entries([
            ("start_date", "2024-01-01"),
            ("whiplash", "yes"),
            ("start_date", "2024-02-01"),
        ]);
        let entries = criteria.iter().collect::<Vec<_>>();
        assert_eq!(
            entries,
            vec![("start_date", "2024-02-01"), ("whiplash", "yes")]
        );
    }

    #[test]
    fn criteria_clear_empties_everything() {
        let mut criteria = FilterCriteria::from_entries([("whiplash", "no")]);
        criteria.clear();
        assert!(criteria.is_empty());
        assert_eq!(criteria.get("whiplash"), None);
    }

    #[test]
    fn whiplash_filter_round_trips_form_values() {
        for filter in WhiplashFilter::ALL {
            assert_eq!(WhiplashFilter::parse(filter.as_str()), Some(filter));
        }
        assert_eq!(WhiplashFilter::parse("maybe"), None);
        assert!(WhiplashFilter::Any.matches(false));
        assert!(!WhiplashFilter::Yes.matches(false));
    }

    #[test]
    fn claim_record_decodes_endpoint_payload() {
        let claim: ClaimRecord = serde_json::from_str(
            r#"{"id":5,"accident_date":"2024-03-01","settlement_value":1500.5,"whiplash":true,"special_health_expenses":120,"special_reduction":0}"#,
        )
        .expect("valid claim json");
        assert_eq!(claim.id, ClaimId::new(5));
        assert!(claim.whiplash);
        assert_eq!(claim.special_health_expenses, 120.0);
    }
}
