// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use claimdesk_app::{
    ClaimId, ClaimRecord, ClaimsController, FilterCriteria, FilterFormInput, FilterRequest,
    FormKind, FormPayload, InvoiceFormInput, PageCommand, PageEvent, PanelVisibility,
    RenderedRow, WhiplashFilter,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const CLAIM_COLUMNS: [&str; 7] = [
    "",
    "Claim",
    "Accident date",
    "Settlement",
    "Whiplash",
    "Special health",
    "Special reduction",
];
const CHECKED_MARK: &str = "[x]";
const UNCHECKED_MARK: &str = "[ ]";

/// Where the claims come from. The CLI backs this with the HTTP client or the
/// demo source.
pub trait AppRuntime {
    fn filter_claims(&mut self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>>;

    /// Runs the request and posts its outcome back to the event loop. The
    /// default runs inline; runtimes that can move work off the UI thread
    /// should override it.
    fn spawn_filter(&mut self, request: FilterRequest, tx: Sender<InternalEvent>) -> Result<()> {
        let outcome = self
            .filter_claims(&request.criteria)
            .map_err(|error| error.to_string());
        tx.send(InternalEvent::FilterCompleted {
            request_id: request.request_id,
            outcome,
        })
        .map_err(|_| anyhow!("filter event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    FilterCompleted {
        request_id: u64,
        outcome: Result<Vec<ClaimRecord>, String>,
    },
}

/// How a dashboard session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Navigate(Url),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub load_on_start: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Whiplash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormFieldSpec {
    label: &'static str,
    hint: &'static str,
    kind: FieldKind,
}

const FILTER_FIELDS: [FormFieldSpec; 5] = [
    FormFieldSpec {
        label: "Accident from",
        hint: "YYYY-MM-DD",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Accident to",
        hint: "YYYY-MM-DD",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Min settlement",
        hint: "£",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Max settlement",
        hint: "£",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Whiplash",
        hint: "space to cycle",
        kind: FieldKind::Whiplash,
    },
];

const INVOICE_FIELDS: [FormFieldSpec; 4] = [
    FormFieldSpec {
        label: "Client name",
        hint: "required",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Invoice date",
        hint: "YYYY-MM-DD",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Due date",
        hint: "YYYY-MM-DD, optional",
        kind: FieldKind::Text,
    },
    FormFieldSpec {
        label: "Notes",
        hint: "optional",
        kind: FieldKind::Text,
    },
];

fn form_field_specs(kind: FormKind) -> &'static [FormFieldSpec] {
    match kind {
        FormKind::Filter => &FILTER_FIELDS,
        FormKind::Invoice => &INVOICE_FIELDS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    kind: FormKind,
    values: Vec<String>,
    field: usize,
}

impl FormUiState {
    fn blank(kind: FormKind) -> Self {
        Self {
            kind,
            values: vec![String::new(); form_field_specs(kind).len()],
            field: 0,
        }
    }

    fn value(&self, index: usize) -> String {
        self.values.get(index).cloned().unwrap_or_default()
    }

    fn payload(&self) -> FormPayload {
        match self.kind {
            FormKind::Filter => FormPayload::Filter(FilterFormInput {
                start_date: self.value(0),
                end_date: self.value(1),
                min_settlement: self.value(2),
                max_settlement: self.value(3),
                whiplash: WhiplashFilter::parse(&self.value(4)).unwrap_or(WhiplashFilter::Any),
            }),
            FormKind::Invoice => FormPayload::Invoice(InvoiceFormInput {
                client_name: self.value(0),
                invoice_date: self.value(1),
                due_date: self.value(2),
                notes: self.value(3),
            }),
        }
    }

    fn move_field(&mut self, delta: isize) {
        let len = self.values.len().max(1) as isize;
        self.field = (self.field as isize + delta).rem_euclid(len) as usize;
    }

    fn current_kind(&self) -> FieldKind {
        form_field_specs(self.kind)
            .get(self.field)
            .map(|spec| spec.kind)
            .unwrap_or(FieldKind::Text)
    }

    fn cycle_choice(&mut self, delta: isize) {
        let Some(value) = self.values.get_mut(self.field) else {
            return;
        };
        let choices = WhiplashFilter::ALL;
        let current = WhiplashFilter::parse(value)
            .and_then(|filter| choices.iter().position(|choice| *choice == filter))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(choices.len() as isize) as usize;
        *value = choices[next].as_str().to_owned();
    }

    fn push_char(&mut self, ch: char) {
        if self.current_kind() == FieldKind::Whiplash {
            if ch == ' ' {
                self.cycle_choice(1);
            }
            return;
        }
        if let Some(value) = self.values.get_mut(self.field) {
            value.push(ch);
        }
    }

    fn pop_char(&mut self) {
        if self.current_kind() == FieldKind::Whiplash {
            if let Some(value) = self.values.get_mut(self.field) {
                value.clear();
            }
            return;
        }
        if let Some(value) = self.values.get_mut(self.field) {
            value.pop();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Table,
    FilterForm,
    InvoiceForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    focus: Focus,
    cursor: usize,
    filter_form: FormUiState,
    invoice_form: FormUiState,
    alert: Option<String>,
    status_line: Option<String>,
    status_token: u64,
    help_visible: bool,
    navigate_to: Option<Url>,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            focus: Focus::Table,
            cursor: 0,
            filter_form: FormUiState::blank(FormKind::Filter),
            invoice_form: FormUiState::blank(FormKind::Invoice),
            alert: None,
            status_line: None,
            status_token: 0,
            help_visible: false,
            navigate_to: None,
        }
    }
}

pub fn run_app<R: AppRuntime>(
    controller: &mut ClaimsController,
    runtime: &mut R,
    options: RunOptions,
) -> Result<SessionEnd> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let outcome = event_loop(&mut terminal, controller, runtime, options);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    outcome
}

fn event_loop<R: AppRuntime>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut ClaimsController,
    runtime: &mut R,
    options: RunOptions,
) -> Result<SessionEnd> {
    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if options.load_on_start {
        dispatch_command(
            controller,
            runtime,
            &mut view_data,
            &internal_tx,
            PageCommand::SubmitFilter(FilterFormInput::default()),
        );
    }

    loop {
        process_internal_events(controller, &mut view_data, &internal_tx, &internal_rx);
        if view_data.navigate_to.is_some() {
            break;
        }

        terminal
            .draw(|frame| render(frame, controller, &view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(controller, runtime, &mut view_data, &internal_tx, key)
        {
            break;
        }
    }

    Ok(match view_data.navigate_to {
        Some(url) => SessionEnd::Navigate(url),
        None => SessionEnd::Quit,
    })
}

fn process_internal_events(
    controller: &mut ClaimsController,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::FilterCompleted {
                request_id,
                outcome,
            } => {
                let events =
                    controller.complete_filter(request_id, outcome.map_err(|error| anyhow!(error)));
                apply_page_events(view_data, tx, &events);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn dispatch_command<R: AppRuntime>(
    controller: &mut ClaimsController,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: PageCommand,
) {
    let events = controller.dispatch(command);
    apply_page_events(view_data, internal_tx, &events);

    for event in events {
        let PageEvent::FilterRequested(request) = event else {
            continue;
        };
        let request_id = request.request_id;
        emit_status(view_data, internal_tx, "filtering claims...");
        if let Err(error) = runtime.spawn_filter(request, internal_tx.clone()) {
            warn!(request_id, error = %error, "filter could not be started");
            let failed = controller.complete_filter(request_id, Err(error));
            apply_page_events(view_data, internal_tx, &failed);
        }
    }
}

fn apply_page_events(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: &[PageEvent],
) {
    for event in events {
        match event {
            PageEvent::Alert(message) => {
                view_data.alert = Some(message.clone());
            }
            PageEvent::Navigate(url) => {
                view_data.navigate_to = Some(url.clone());
            }
            PageEvent::StatusUpdated(message) => {
                emit_status(view_data, internal_tx, message.clone());
            }
            PageEvent::FilterFormCleared => {
                view_data.filter_form = FormUiState::blank(FormKind::Filter);
            }
            PageEvent::InvoiceModalChanged(PanelVisibility::Visible) => {
                view_data.invoice_form.field = 0;
                view_data.focus = Focus::InvoiceForm;
            }
            PageEvent::InvoiceModalChanged(PanelVisibility::Hidden) => {
                view_data.focus = Focus::Table;
            }
            PageEvent::TableRendered { rows } => {
                view_data.cursor = view_data.cursor.min(rows.saturating_sub(1));
                let noun = if *rows == 1 { "claim" } else { "claims" };
                emit_status(view_data, internal_tx, format!("{rows} {noun}"));
            }
            PageEvent::CheckboxChanged { .. }
            | PageEvent::SelectionChanged { .. }
            | PageEvent::SummaryUpdated(_)
            | PageEvent::ResultsVisibilityChanged(_)
            | PageEvent::FilterRequested(_) => {}
        }
    }
}

fn handle_key_event<R: AppRuntime>(
    controller: &mut ClaimsController,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // Alerts block everything until acknowledged.
    if view_data.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            view_data.alert = None;
        }
        return false;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.focus {
        Focus::FilterForm | Focus::InvoiceForm => {
            handle_form_key(controller, runtime, view_data, internal_tx, key);
            view_data.navigate_to.is_some()
        }
        Focus::Table => {
            handle_table_key(controller, runtime, view_data, internal_tx, key)
                || view_data.navigate_to.is_some()
        }
    }
}

fn handle_table_key<R: AppRuntime>(
    controller: &mut ClaimsController,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let row_count = visible_rows(controller).len();
    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 {
                view_data.cursor = (view_data.cursor + 1).min(row_count - 1);
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.cursor = view_data.cursor.saturating_sub(1);
            None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            view_data.cursor = 0;
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            view_data.cursor = row_count.saturating_sub(1);
            None
        }
        KeyCode::Char(' ') => cursor_claim(controller, view_data).map(PageCommand::Toggle),
        KeyCode::Char('a') => Some(PageCommand::SelectAll),
        KeyCode::Char('/') | KeyCode::Char('f') => {
            view_data.filter_form.field = 0;
            view_data.focus = Focus::FilterForm;
            None
        }
        KeyCode::Char('x') => Some(PageCommand::ResetFilters),
        KeyCode::Char('r') => Some(PageCommand::GenerateReport),
        KeyCode::Char('i') => Some(PageCommand::OpenInvoice),
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            None
        }
        _ => None,
    };

    if let Some(command) = command {
        debug!(?command, "table command");
        dispatch_command(controller, runtime, view_data, internal_tx, command);
    }
    false
}

fn handle_form_key<R: AppRuntime>(
    controller: &mut ClaimsController,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let invoice = view_data.focus == Focus::InvoiceForm;
    let form = if invoice {
        &mut view_data.invoice_form
    } else {
        &mut view_data.filter_form
    };

    match key.code {
        KeyCode::Esc => {
            if invoice {
                dispatch_command(
                    controller,
                    runtime,
                    view_data,
                    internal_tx,
                    PageCommand::DismissModalBackdrop,
                );
            } else {
                view_data.focus = Focus::Table;
            }
        }
        KeyCode::Tab | KeyCode::Down => form.move_field(1),
        KeyCode::BackTab | KeyCode::Up => form.move_field(-1),
        KeyCode::Left if form.current_kind() == FieldKind::Whiplash => form.cycle_choice(-1),
        KeyCode::Right if form.current_kind() == FieldKind::Whiplash => form.cycle_choice(1),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Enter => {
            let command = match form.payload() {
                FormPayload::Filter(input) => PageCommand::SubmitFilter(input),
                FormPayload::Invoice(input) => PageCommand::SubmitInvoice(input),
            };
            if !invoice {
                view_data.focus = Focus::Table;
            }
            dispatch_command(controller, runtime, view_data, internal_tx, command);
        }
        KeyCode::Char(ch) => form.push_char(ch),
        _ => {}
    }
}

fn visible_rows(controller: &ClaimsController) -> &[RenderedRow] {
    if controller.page().results().is_visible() {
        controller.page().rows()
    } else {
        &[]
    }
}

fn cursor_claim(controller: &ClaimsController, view_data: &ViewData) -> Option<ClaimId> {
    visible_rows(controller)
        .get(view_data.cursor)
        .map(|row| row.claim.id)
}

fn render(frame: &mut ratatui::Frame<'_>, controller: &ClaimsController, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(format!("filters: {}", filters_label(controller.filters())))
        .block(Block::default().title("claimdesk").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    render_table(frame, layout[1], controller, view_data);

    let summary = Paragraph::new(summary_text(controller))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().title("selection").borders(Borders::ALL));
    frame.render_widget(summary, layout[2]);

    let status = Paragraph::new(status_text(controller, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if view_data.focus == Focus::FilterForm {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);
        let form = Paragraph::new(render_form_text(&view_data.filter_form)).block(
            Block::default()
                .title(FormKind::Filter.label())
                .borders(Borders::ALL),
        );
        frame.render_widget(form, area);
    }

    if controller.page().invoice_modal().is_visible() {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);
        let form = Paragraph::new(render_form_text(&view_data.invoice_form)).block(
            Block::default()
                .title(FormKind::Invoice.label())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(form, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }

    if let Some(message) = &view_data.alert {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);
        let alert = Paragraph::new(format!("{message}\n\nenter to dismiss")).block(
            Block::default()
                .title("alert")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(alert, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    controller: &ClaimsController,
    view_data: &ViewData,
) {
    if !controller.page().results().is_visible() {
        let hint = Paragraph::new("no results shown -- press / to filter claims")
            .block(Block::default().title("claims").borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    }

    let header = Row::new(CLAIM_COLUMNS.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = controller
        .page()
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut style = Style::default();
            if row.checked {
                style = style.fg(Color::Green);
            }
            if index == view_data.cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Row::new(row_cells(row).into_iter().map(Cell::from)).style(style)
        });

    let widths = [
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Min(10),
        Constraint::Length(8),
        Constraint::Min(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("claims ({})", controller.page().rows().len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn row_cells(row: &RenderedRow) -> [String; 7] {
    let claim = &row.claim;
    [
        if row.checked {
            CHECKED_MARK
        } else {
            UNCHECKED_MARK
        }
        .to_owned(),
        claim.id.to_string(),
        claim.accident_date.clone(),
        format_pounds(claim.settlement_value),
        if claim.whiplash { "Yes" } else { "No" }.to_owned(),
        format_pounds(claim.special_health_expenses),
        format_pounds(claim.special_reduction),
    ]
}

fn format_pounds(value: f64) -> String {
    format!("£{value:.2}")
}

fn filters_label(criteria: &FilterCriteria) -> String {
    let active = criteria
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>();
    if active.is_empty() {
        "none".to_owned()
    } else {
        active.join(", ")
    }
}

fn summary_text(controller: &ClaimsController) -> String {
    controller
        .page()
        .summary()
        .text
        .clone()
        .unwrap_or_default()
}

fn render_form_text(form: &FormUiState) -> String {
    let mut out = String::new();
    for (index, spec) in form_field_specs(form.kind).iter().enumerate() {
        let marker = if index == form.field { ">" } else { " " };
        let value = form.value(index);
        let shown = match spec.kind {
            FieldKind::Text => value,
            FieldKind::Whiplash => WhiplashFilter::parse(&value)
                .unwrap_or(WhiplashFilter::Any)
                .label()
                .to_owned(),
        };
        out.push_str(&format!(
            "{marker} {:<15} {shown}  ({})\n",
            spec.label, spec.hint
        ));
    }
    out.push_str("\ntab/shift+tab field | enter submit | esc close");
    out
}

fn status_text(controller: &ClaimsController, view_data: &ViewData) -> String {
    let default = "j/k move | space toggle | a all | / filter | x reset | r report | i invoice | ? help | q quit";
    let pending = if controller.in_flight().is_some() {
        "filtering | "
    } else {
        ""
    };
    match &view_data.status_line {
        Some(status) => format!("{pending}{status} | {default}"),
        None => format!("{pending}{default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit\n\
table: j/k or up/down move | g/G first/last | space toggle claim | a select all\n\
table: / or f filter form | x reset filters (selection kept) | r report | i invoice | q quit\n\
form: tab/shift+tab field | left/right or space cycle choice | enter submit | esc close\n\
alert: enter or esc dismiss"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
