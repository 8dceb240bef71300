// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    ClaimId, ClaimRecord, Endpoints, FilterCriteria, FilterFormInput, InvoiceFormInput, PageView,
    PanelVisibility, RenderedRow, SelectionSet, SelectionSummary,
};

pub const EMPTY_SELECTION_ALERT: &str = "Please select at least one claim";
pub const FILTER_BUSY_STATUS: &str = "filter already in progress; wait for results";

/// Anything that can answer a filter query. The HTTP client implements this;
/// demos and tests plug in in-memory sources.
pub trait ClaimsSource {
    fn filter_claims(&self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub request_id: u64,
    pub criteria: FilterCriteria,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    Toggle(ClaimId),
    SelectAll,
    ResetFilters,
    SubmitFilter(FilterFormInput),
    GenerateReport,
    OpenInvoice,
    CloseInvoice,
    DismissModalBackdrop,
    SubmitInvoice(InvoiceFormInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    CheckboxChanged { id: ClaimId, checked: bool },
    SelectionChanged { count: usize },
    TableRendered { rows: usize },
    SummaryUpdated(SelectionSummary),
    ResultsVisibilityChanged(PanelVisibility),
    InvoiceModalChanged(PanelVisibility),
    FilterFormCleared,
    FilterRequested(FilterRequest),
    StatusUpdated(String),
    Alert(String),
    Navigate(Url),
}

/// Owns the selection, the committed filters and the page model for one
/// dashboard session.
///
/// The selection is cumulative: filtering, re-rendering and resetting never
/// drop a selected claim, even when its row is no longer on screen.
#[derive(Debug, Clone)]
pub struct ClaimsController {
    endpoints: Endpoints,
    selection: SelectionSet,
    filters: FilterCriteria,
    page: PageView,
    in_flight: Option<FilterRequest>,
    next_request_id: u64,
}

impl ClaimsController {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            selection: SelectionSet::new(),
            filters: FilterCriteria::new(),
            page: PageView::default(),
            in_flight: None,
            next_request_id: 0,
        }
    }

    /// Starts a session from rows that arrived already drawn, seeding the
    /// selection from the rows that were checked.
    pub fn with_initial_rows(endpoints: Endpoints, rows: Vec<RenderedRow>) -> Self {
        let mut controller = Self::new(endpoints);
        controller.selection = rows
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.claim.id)
            .collect();
        if !rows.is_empty() {
            controller.page.results = PanelVisibility::Visible;
        }
        // A claim checked in any row is checked in all of its rows.
        controller.render(rows.into_iter().map(|row| row.claim).collect());
        controller.refresh_summary();
        debug!(
            selected = controller.selection.len(),
            rows = controller.page.rows.len(),
            "initial page loaded"
        );
        controller
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn in_flight(&self) -> Option<&FilterRequest> {
        self.in_flight.as_ref()
    }

    /// `true` when every drawn checkbox agrees with the selection.
    pub fn is_synchronized(&self) -> bool {
        self.page
            .rows
            .iter()
            .all(|row| row.checked == self.selection.contains(row.claim.id))
    }

    pub fn dispatch(&mut self, command: PageCommand) -> Vec<PageEvent> {
        match command {
            PageCommand::Toggle(id) => self.toggle(id),
            PageCommand::SelectAll => self.select_all(),
            PageCommand::ResetFilters => self.reset(),
            PageCommand::SubmitFilter(form) => self.submit_filter(&form),
            PageCommand::GenerateReport => self.generate_report(),
            PageCommand::OpenInvoice => self.open_invoice(),
            PageCommand::CloseInvoice | PageCommand::DismissModalBackdrop => self.close_invoice(),
            PageCommand::SubmitInvoice(form) => self.submit_invoice(&form),
        }
    }

    pub fn toggle(&mut self, id: ClaimId) -> Vec<PageEvent> {
        let checked = self.selection.toggle(id);
        for row in self.page.rows.iter_mut().filter(|row| row.claim.id == id) {
            row.checked = checked;
        }
        debug!(%id, checked, selected = self.selection.len(), "claim toggled");

        vec![
            PageEvent::CheckboxChanged { id, checked },
            PageEvent::SelectionChanged {
                count: self.selection.len(),
            },
            self.refresh_summary(),
        ]
    }

    pub fn select_all(&mut self) -> Vec<PageEvent> {
        let mut events = Vec::new();
        for row in &mut self.page.rows {
            self.selection.insert(row.claim.id);
            if !row.checked {
                row.checked = true;
                events.push(PageEvent::CheckboxChanged {
                    id: row.claim.id,
                    checked: true,
                });
            }
        }
        debug!(selected = self.selection.len(), "selected all rendered claims");

        events.push(PageEvent::SelectionChanged {
            count: self.selection.len(),
        });
        events.push(self.refresh_summary());
        events
    }

    /// Rebuilds the table body. Checked state comes from the selection; the
    /// selection itself is never touched here.
    pub fn render(&mut self, claims: Vec<ClaimRecord>) -> Vec<PageEvent> {
        self.page.rows = claims
            .into_iter()
            .map(|claim| RenderedRow {
                checked: self.selection.contains(claim.id),
                claim,
            })
            .collect();
        debug!(
            rows = self.page.rows.len(),
            selected = self.selection.len(),
            "table rendered"
        );
        vec![PageEvent::TableRendered {
            rows: self.page.rows.len(),
        }]
    }

    pub fn refresh_summary(&mut self) -> PageEvent {
        let count = self.selection.len();
        self.page.summary = SelectionSummary {
            text: (count > 0).then(|| format!("Selected Claims: {count}")),
        };
        PageEvent::SummaryUpdated(self.page.summary.clone())
    }

    /// Clears the form and the committed filters and hides the results. The
    /// selection stays as it is. A pending filter request is abandoned.
    pub fn reset(&mut self) -> Vec<PageEvent> {
        if let Some(request) = self.in_flight.take() {
            debug!(request_id = request.request_id, "pending filter abandoned by reset");
        }
        self.filters.clear();
        self.page.results = PanelVisibility::Hidden;
        info!(selected = self.selection.len(), "filters reset");

        vec![
            PageEvent::FilterFormCleared,
            PageEvent::ResultsVisibilityChanged(PanelVisibility::Hidden),
            self.refresh_summary(),
        ]
    }

    /// Validates the form and opens a filter request. Only one request may be
    /// outstanding; a second submission is turned away until the first one
    /// completes or a reset abandons it.
    pub fn submit_filter(&mut self, form: &FilterFormInput) -> Vec<PageEvent> {
        if let Some(pending) = &self.in_flight {
            debug!(
                request_id = pending.request_id,
                "filter submission rejected while another is in flight"
            );
            return vec![PageEvent::StatusUpdated(FILTER_BUSY_STATUS.to_owned())];
        }
        if let Err(error) = form.validate() {
            return vec![PageEvent::Alert(format!("Invalid filter: {error}"))];
        }

        self.next_request_id = self.next_request_id.saturating_add(1).max(1);
        let request = FilterRequest {
            request_id: self.next_request_id,
            criteria: form.to_criteria(),
        };
        info!(request_id = request.request_id, "filter requested");
        self.in_flight = Some(request.clone());
        vec![PageEvent::FilterRequested(request)]
    }

    /// Applies the outcome of a filter request. Outcomes for anything but the
    /// in-flight request are dropped.
    pub fn complete_filter(
        &mut self,
        request_id: u64,
        outcome: Result<Vec<ClaimRecord>>,
    ) -> Vec<PageEvent> {
        let Some(pending) = self.in_flight.take_if(|pending| pending.request_id == request_id)
        else {
            debug!(request_id, "stale filter outcome dropped");
            return Vec::new();
        };

        match outcome {
            Ok(claims) => {
                info!(request_id, claims = claims.len(), "filter completed");
                self.filters = pending.criteria;
                let mut events = self.render(claims);
                self.page.results = PanelVisibility::Visible;
                events.push(PageEvent::ResultsVisibilityChanged(PanelVisibility::Visible));
                events.push(self.refresh_summary());
                events
            }
            Err(error) => {
                warn!(request_id, error = %error, "filter failed");
                vec![PageEvent::Alert(format!(
                    "An error occurred while filtering claims: {error}"
                ))]
            }
        }
    }

    /// Runs a whole filter round trip against `source` on the calling thread.
    pub fn filter_with<S: ClaimsSource + ?Sized>(
        &mut self,
        form: &FilterFormInput,
        source: &S,
    ) -> Vec<PageEvent> {
        let mut events = self.submit_filter(form);
        let request = events.iter().find_map(|event| match event {
            PageEvent::FilterRequested(request) => Some(request.clone()),
            _ => None,
        });
        if let Some(request) = request {
            let outcome = source.filter_claims(&request.criteria);
            events.extend(self.complete_filter(request.request_id, outcome));
        }
        events
    }

    pub fn generate_report(&mut self) -> Vec<PageEvent> {
        if self.selection.is_empty() {
            return vec![PageEvent::Alert(EMPTY_SELECTION_ALERT.to_owned())];
        }
        match self.endpoints.report(&self.selection) {
            Ok(url) => {
                info!(selected = self.selection.len(), %url, "navigating to report");
                vec![PageEvent::Navigate(url)]
            }
            Err(error) => vec![PageEvent::Alert(format!(
                "Could not build the report link: {error}"
            ))],
        }
    }

    pub fn open_invoice(&mut self) -> Vec<PageEvent> {
        if self.selection.is_empty() {
            return vec![PageEvent::Alert(EMPTY_SELECTION_ALERT.to_owned())];
        }
        self.page.invoice_modal = PanelVisibility::Visible;
        vec![PageEvent::InvoiceModalChanged(PanelVisibility::Visible)]
    }

    pub fn close_invoice(&mut self) -> Vec<PageEvent> {
        if !self.page.invoice_modal.is_visible() {
            return Vec::new();
        }
        self.page.invoice_modal = PanelVisibility::Hidden;
        vec![PageEvent::InvoiceModalChanged(PanelVisibility::Hidden)]
    }

    pub fn submit_invoice(&mut self, form: &InvoiceFormInput) -> Vec<PageEvent> {
        if self.selection.is_empty() {
            return vec![PageEvent::Alert(EMPTY_SELECTION_ALERT.to_owned())];
        }
        if let Err(error) = form.validate() {
            return vec![PageEvent::Alert(format!("Invalid invoice: {error}"))];
        }
        match self.endpoints.invoice(form, &self.selection) {
            Ok(url) => {
                info!(selected = self.selection.len(), %url, "navigating to invoice");
                vec![PageEvent::Navigate(url)]
            }
            Err(error) => vec![PageEvent::Alert(format!(
                "Could not build the invoice link: {error}"
            ))],
        }
    }
}
