// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::time::Duration;
use time::OffsetDateTime;
use varaus_app::{
    AllocationResult, Application, ApplicationRound, ApplicationRoundId, Column, FetchError,
    FetchPhase, FilterConfig, FilterOption, GroupTab, HANDLED_STATUSES, Messages,
    ProcessedAllocationResult, ResolutionTables, RowTarget, ServiceSectorId, SortOrder,
    TableRecord, TableView, allocated_columns, allocated_facets, applications_columns,
    applications_facets, derive_facets, format_number, group_by_unit, notice_key,
    partition_unallocated, process_allocation_results, single_group, timeframe_status,
    unallocated_columns, unallocated_facets, validated_only,
};

/// Data access the browser needs from its host. The round fetch gates the
/// dependent ones; implementations are expected to surface failures as
/// [`FetchError`] rather than panic.
pub trait RoundRuntime {
    fn load_round(&mut self, id: ApplicationRoundId) -> Result<ApplicationRound, FetchError>;
    fn load_applications(
        &mut self,
        round: ApplicationRoundId,
        status_filter: &str,
    ) -> Result<Vec<Application>, FetchError>;
    fn load_allocation_results(
        &mut self,
        round: ApplicationRoundId,
        sector: ServiceSectorId,
    ) -> Result<Vec<AllocationResult>, FetchError>;

    /// Clock for the application-period summary. Demo sessions pin this so
    /// the header stays reproducible.
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub round_id: ApplicationRoundId,
    /// Comma-separated raw statuses the applications fetch is server-filtered
    /// to.
    pub status_filter: String,
}

/// The two pages of the browser. Applications is the landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Applications,
    Resolution,
}

impl Screen {
    const ALL: [Self; 2] = [Self::Applications, Self::Resolution];

    const fn toggled(self) -> Self {
        match self {
            Self::Applications => Self::Resolution,
            Self::Resolution => Self::Applications,
        }
    }
}

/// Cursor position within one table. Kept outside [`TableView`] so each
/// resolution tab remembers its own place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TableUiState {
    cursor: usize,
    col: usize,
}

struct ApplicationsScreen {
    view: TableView<Application>,
    facets: Vec<FilterConfig>,
    ui: TableUiState,
}

struct ResolutionScreen {
    tables: ResolutionTables,
    allocated_facets: Vec<FilterConfig>,
    unallocated_facets: Vec<FilterConfig>,
    /// Applications without any allocation result, before view filters.
    unallocated_total: usize,
    /// Precomputed at load time so rendering needs no clock.
    timeframe: String,
    allocated_ui: TableUiState,
    unallocated_ui: TableUiState,
}

/// The dismissible failure notice. `key` names the message for tests and
/// logs; `label` and `message` are what the overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    key: &'static str,
    label: String,
    message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FacetPickerUiState {
    visible: bool,
    cursor: usize,
}

struct ViewData {
    messages: Messages,
    screen: Screen,
    round: Option<ApplicationRound>,
    applications: Option<ApplicationsScreen>,
    resolution: Option<ResolutionScreen>,
    facet_picker: FacetPickerUiState,
    notice: Option<Notice>,
    status_line: Option<String>,
    help_visible: bool,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            messages: Messages::builtin(),
            screen: Screen::Applications,
            round: None,
            applications: None,
            resolution: None,
            facet_picker: FacetPickerUiState::default(),
            notice: None,
            status_line: None,
            help_visible: false,
        }
    }
}

pub fn run_app<R: RoundRuntime>(options: &BrowserOptions, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    load_screen(options, runtime, &mut view_data, Screen::Applications);

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(options, runtime, &mut view_data, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

// ---------------------------------------------------------------------------
// Loading

/// Runs the load sequence for one screen: round first, then the collections
/// it gates. On failure the screen keeps its previous data (if any) and a
/// notice is raised; returns whether the load went through.
fn load_screen<R: RoundRuntime>(
    options: &BrowserOptions,
    runtime: &mut R,
    view_data: &mut ViewData,
    screen: Screen,
) -> bool {
    view_data.notice = None;

    let round = match runtime.load_round(options.round_id) {
        Ok(round) => round,
        Err(error) => {
            raise_notice(view_data, FetchPhase::Round, &error);
            return false;
        }
    };
    let applications = match runtime.load_applications(round.id, &options.status_filter) {
        Ok(applications) => applications,
        Err(error) => {
            raise_notice(view_data, FetchPhase::Collections, &error);
            return false;
        }
    };

    match screen {
        Screen::Applications => apply_applications_data(view_data, &applications),
        Screen::Resolution => {
            let results = match runtime.load_allocation_results(round.id, round.service_sector_id)
            {
                Ok(results) => results,
                Err(error) => {
                    raise_notice(view_data, FetchPhase::Collections, &error);
                    return false;
                }
            };
            let timeframe = timeframe_status(
                round.application_period_begin,
                round.application_period_end,
                runtime.now(),
                &view_data.messages,
            );
            apply_resolution_data(view_data, &applications, &results, timeframe);
        }
    }
    view_data.round = Some(round);
    true
}

fn ensure_screen_loaded<R: RoundRuntime>(
    options: &BrowserOptions,
    runtime: &mut R,
    view_data: &mut ViewData,
    screen: Screen,
) {
    let loaded = match screen {
        Screen::Applications => view_data.applications.is_some(),
        Screen::Resolution => view_data.resolution.is_some(),
    };
    if !loaded {
        load_screen(options, runtime, view_data, screen);
    }
}

fn apply_applications_data(view_data: &mut ViewData, applications: &[Application]) {
    let facets = derive_facets(applications, &applications_facets(), &view_data.messages);
    match view_data.applications.as_mut() {
        Some(screen) => {
            screen.view.set_groups(single_group(applications));
            screen.facets = facets;
            let _ = apply_table_command(
                &mut screen.view,
                &mut screen.ui,
                TableCommand::MoveCursor(0),
            );
        }
        None => {
            view_data.applications = Some(ApplicationsScreen {
                view: TableView::new(applications_columns(), single_group(applications)),
                facets,
                ui: TableUiState::default(),
            });
        }
    }
}

fn apply_resolution_data(
    view_data: &mut ViewData,
    applications: &[Application],
    results: &[AllocationResult],
    timeframe: String,
) {
    let processed = process_allocation_results(results);
    // The partition counts every processed result; the allocated tab then
    // narrows to validated rows only.
    let partition = partition_unallocated(applications, &processed);
    let validated = validated_only(&processed);

    let allocated_groups = group_by_unit(&validated);
    let unallocated_groups = single_group(&partition.unallocated);
    let allocated_filters = derive_facets(&validated, &allocated_facets(), &view_data.messages);
    let unallocated_filters = derive_facets(
        &partition.unallocated,
        &unallocated_facets(),
        &view_data.messages,
    );

    match view_data.resolution.as_mut() {
        Some(screen) => {
            screen.tables.allocated.set_groups(allocated_groups);
            screen.tables.unallocated.set_groups(unallocated_groups);
            screen.allocated_facets = allocated_filters;
            screen.unallocated_facets = unallocated_filters;
            screen.unallocated_total = partition.unallocated.len();
            screen.timeframe = timeframe;
            let _ = apply_table_command(
                &mut screen.tables.allocated,
                &mut screen.allocated_ui,
                TableCommand::MoveCursor(0),
            );
            let _ = apply_table_command(
                &mut screen.tables.unallocated,
                &mut screen.unallocated_ui,
                TableCommand::MoveCursor(0),
            );
        }
        None => {
            view_data.resolution = Some(ResolutionScreen {
                tables: ResolutionTables::new(
                    TableView::new(allocated_columns(), allocated_groups),
                    TableView::new(unallocated_columns(), unallocated_groups),
                ),
                allocated_facets: allocated_filters,
                unallocated_facets: unallocated_filters,
                unallocated_total: partition.unallocated.len(),
                timeframe,
                allocated_ui: TableUiState::default(),
                unallocated_ui: TableUiState::default(),
            });
        }
    }
}

fn raise_notice(view_data: &mut ViewData, phase: FetchPhase, error: &FetchError) {
    let key = notice_key(phase, error);
    view_data.notice = Some(Notice {
        key,
        label: view_data.messages.translate("errors.functionFailed"),
        message: view_data.messages.translate(key),
    });
    view_data.status_line = Some(format!("load failed: {key}"));
}

// ---------------------------------------------------------------------------
// Key handling

fn handle_key_event<R: RoundRuntime>(
    options: &BrowserOptions,
    runtime: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    let ctrl_q = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q');
    if ctrl_q || key.code == KeyCode::Char('q') {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.facet_picker.visible {
        handle_facet_picker_key(view_data, key);
        return false;
    }

    match key.code {
        KeyCode::Esc => {
            if view_data.notice.take().is_some() {
                view_data.status_line = Some("notice dismissed".to_owned());
            }
        }
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Tab => {
            let next = view_data.screen.toggled();
            view_data.screen = next;
            ensure_screen_loaded(options, runtime, view_data, next);
            view_data.status_line = Some(screen_title(next, &view_data.messages));
        }
        KeyCode::Char('t') => {
            if view_data.screen == Screen::Resolution
                && let Some(screen) = view_data.resolution.as_mut()
            {
                screen.tables.toggle_tab();
                let label = view_data
                    .messages
                    .translate(screen.tables.active_tab().message_key());
                view_data.status_line = Some(label);
            }
        }
        KeyCode::Char('f') => {
            if facet_picker_entries(view_data).is_empty() {
                view_data.status_line = Some("no filters available".to_owned());
            } else {
                view_data.facet_picker.visible = true;
                view_data.facet_picker.cursor = 0;
            }
        }
        KeyCode::Char('r') => {
            if load_screen(options, runtime, view_data, view_data.screen) {
                view_data.status_line = Some("reloaded".to_owned());
            }
        }
        _ => {
            if let Some(command) = table_command_for_key(key)
                && let Some(feedback) = dispatch_table_command(view_data, command)
                && let Some(status) = feedback_status(feedback, options, &view_data.messages)
            {
                view_data.status_line = Some(status);
            }
        }
    }
    false
}

fn handle_facet_picker_key(view_data: &mut ViewData, key: KeyEvent) {
    let entry_count = facet_picker_entries(view_data).len();
    if entry_count > 0 && view_data.facet_picker.cursor >= entry_count {
        view_data.facet_picker.cursor = entry_count - 1;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('f') => view_data.facet_picker.visible = false,
        KeyCode::Char('j') | KeyCode::Down => {
            if view_data.facet_picker.cursor + 1 < entry_count {
                view_data.facet_picker.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.facet_picker.cursor = view_data.facet_picker.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(status) = toggle_picker_entry(view_data) {
                view_data.status_line = Some(status);
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveCursor(isize),
    CursorFirst,
    CursorLast,
    MoveColumn(isize),
    SortSelectedColumn,
    ToggleSelectRow,
    ClearSelection,
    ClearFilters,
    ActivateRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFeedback {
    Moved,
    Sorted { title: &'static str, order: SortOrder },
    Selected(i64),
    Unselected(i64),
    NotSelectable,
    SelectionCleared(usize),
    FiltersCleared(usize),
    Opened(RowTarget),
    NoTarget,
    NoRow,
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(TableCommand::MoveCursor(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(TableCommand::MoveCursor(-1)),
        KeyCode::Char('g') => Some(TableCommand::CursorFirst),
        KeyCode::Char('G') => Some(TableCommand::CursorLast),
        KeyCode::Char('h') | KeyCode::Left => Some(TableCommand::MoveColumn(-1)),
        KeyCode::Char('l') | KeyCode::Right => Some(TableCommand::MoveColumn(1)),
        KeyCode::Char('s') => Some(TableCommand::SortSelectedColumn),
        KeyCode::Char('x') => Some(TableCommand::ToggleSelectRow),
        KeyCode::Char('X') => Some(TableCommand::ClearSelection),
        KeyCode::Char('c') => Some(TableCommand::ClearFilters),
        KeyCode::Enter => Some(TableCommand::ActivateRow),
        _ => None,
    }
}

/// Routes a table command at the table behind the current screen and
/// resolution tab. `None` when that screen has not loaded.
fn dispatch_table_command(
    view_data: &mut ViewData,
    command: TableCommand,
) -> Option<TableFeedback> {
    match view_data.screen {
        Screen::Applications => view_data
            .applications
            .as_mut()
            .map(|screen| apply_table_command(&mut screen.view, &mut screen.ui, command)),
        Screen::Resolution => {
            view_data
                .resolution
                .as_mut()
                .map(|screen| match screen.tables.active_tab() {
                    GroupTab::Allocated => apply_table_command(
                        &mut screen.tables.allocated,
                        &mut screen.allocated_ui,
                        command,
                    ),
                    GroupTab::Unallocated => apply_table_command(
                        &mut screen.tables.unallocated,
                        &mut screen.unallocated_ui,
                        command,
                    ),
                })
        }
    }
}

fn apply_table_command<R: TableRecord + Clone>(
    view: &mut TableView<R>,
    ui: &mut TableUiState,
    command: TableCommand,
) -> TableFeedback {
    let rows = view.visible_rows();
    let row_count = rows.len();
    // The collection may have shrunk since the last command.
    if row_count == 0 {
        ui.cursor = 0;
    } else if ui.cursor >= row_count {
        ui.cursor = row_count - 1;
    }
    let column_count = view.config().cols.len();
    if column_count > 0 && ui.col >= column_count {
        ui.col = column_count - 1;
    }

    match command {
        TableCommand::MoveCursor(delta) => {
            if row_count > 0 {
                let target = ui.cursor as isize + delta;
                ui.cursor = target.clamp(0, row_count as isize - 1) as usize;
            }
            TableFeedback::Moved
        }
        TableCommand::CursorFirst => {
            ui.cursor = 0;
            TableFeedback::Moved
        }
        TableCommand::CursorLast => {
            if row_count > 0 {
                ui.cursor = row_count - 1;
            }
            TableFeedback::Moved
        }
        TableCommand::MoveColumn(delta) => {
            if column_count > 0 {
                let target = ui.col as isize + delta;
                ui.col = target.clamp(0, column_count as isize - 1) as usize;
            }
            TableFeedback::Moved
        }
        TableCommand::SortSelectedColumn => {
            let column = &view.config().cols[ui.col];
            let key = column.key;
            let title = column.title;
            view.cycle_sort(key);
            TableFeedback::Sorted {
                title,
                order: view.sort_order(),
            }
        }
        TableCommand::ToggleSelectRow => {
            let Some(row) = rows.get(ui.cursor) else {
                return TableFeedback::NoRow;
            };
            match (view.config().index)(row) {
                None => TableFeedback::NotSelectable,
                Some(id) => {
                    view.toggle_select(id);
                    if view.is_selected(id) {
                        TableFeedback::Selected(id)
                    } else {
                        TableFeedback::Unselected(id)
                    }
                }
            }
        }
        TableCommand::ClearSelection => {
            let cleared = view.selected_ids().len();
            view.clear_selection();
            TableFeedback::SelectionCleared(cleared)
        }
        TableCommand::ClearFilters => {
            let cleared = view.active_filter_count();
            view.clear_filters();
            TableFeedback::FiltersCleared(cleared)
        }
        TableCommand::ActivateRow => {
            let Some(row) = rows.get(ui.cursor) else {
                return TableFeedback::NoRow;
            };
            match (view.config().row_link)(row) {
                Some(target) => TableFeedback::Opened(target),
                None => TableFeedback::NoTarget,
            }
        }
    }
}

fn feedback_status(
    feedback: TableFeedback,
    options: &BrowserOptions,
    messages: &Messages,
) -> Option<String> {
    match feedback {
        TableFeedback::Moved | TableFeedback::NoRow => None,
        TableFeedback::Sorted { title, order } => Some(format!(
            "sort: {} {}",
            messages.translate(title),
            sort_glyph(order)
        )),
        TableFeedback::Selected(id) => Some(format!("picked {id}")),
        TableFeedback::Unselected(id) => Some(format!("unpicked {id}")),
        TableFeedback::NotSelectable => Some("row has no identity".to_owned()),
        TableFeedback::SelectionCleared(count) => Some(format!("cleared {count} picked")),
        TableFeedback::FiltersCleared(count) => Some(format!("cleared {count} filters")),
        TableFeedback::Opened(target) => {
            Some(format!("open {}", route_for(options.round_id, target)))
        }
        TableFeedback::NoTarget => Some("no destination".to_owned()),
    }
}

/// Route string a row activation navigates to. Rendered into the status line
/// here; a web shell would push it into its router instead.
fn route_for(round: ApplicationRoundId, target: RowTarget) -> String {
    match target {
        RowTarget::Application(id) => format!("/application/{}", id.get()),
        RowTarget::Recommendation(schedule) => format!(
            "/applicationRound/{}/recommendation/{}",
            round.get(),
            schedule.get()
        ),
    }
}

const fn sort_glyph(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    }
}

// ---------------------------------------------------------------------------
// Facet picker

#[derive(Debug, Clone, PartialEq, Eq)]
struct PickerEntry {
    facet_title: String,
    option: FilterOption,
    active: bool,
}

fn facet_picker_entries(view_data: &ViewData) -> Vec<PickerEntry> {
    match view_data.screen {
        Screen::Applications => match view_data.applications.as_ref() {
            Some(screen) => picker_entries(&screen.facets, &screen.view),
            None => Vec::new(),
        },
        Screen::Resolution => match view_data.resolution.as_ref() {
            Some(screen) => match screen.tables.active_tab() {
                GroupTab::Allocated => {
                    picker_entries(&screen.allocated_facets, &screen.tables.allocated)
                }
                GroupTab::Unallocated => {
                    picker_entries(&screen.unallocated_facets, &screen.tables.unallocated)
                }
            },
            None => Vec::new(),
        },
    }
}

fn picker_entries<R: TableRecord + Clone>(
    facets: &[FilterConfig],
    view: &TableView<R>,
) -> Vec<PickerEntry> {
    let mut entries = Vec::new();
    for facet in facets {
        for option in &facet.filters {
            entries.push(PickerEntry {
                facet_title: facet.title.clone(),
                option: option.clone(),
                active: view.has_filter(option.key, &option.value),
            });
        }
    }
    entries
}

fn toggle_picker_entry(view_data: &mut ViewData) -> Option<String> {
    let entries = facet_picker_entries(view_data);
    let entry = entries.get(view_data.facet_picker.cursor)?.clone();

    let active = match view_data.screen {
        Screen::Applications => {
            let screen = view_data.applications.as_mut()?;
            screen
                .view
                .toggle_filter(entry.option.key, &entry.option.value);
            let _ = apply_table_command(
                &mut screen.view,
                &mut screen.ui,
                TableCommand::MoveCursor(0),
            );
            screen.view.has_filter(entry.option.key, &entry.option.value)
        }
        Screen::Resolution => {
            let screen = view_data.resolution.as_mut()?;
            match screen.tables.active_tab() {
                GroupTab::Allocated => {
                    screen
                        .tables
                        .allocated
                        .toggle_filter(entry.option.key, &entry.option.value);
                    let _ = apply_table_command(
                        &mut screen.tables.allocated,
                        &mut screen.allocated_ui,
                        TableCommand::MoveCursor(0),
                    );
                    screen
                        .tables
                        .allocated
                        .has_filter(entry.option.key, &entry.option.value)
                }
                GroupTab::Unallocated => {
                    screen
                        .tables
                        .unallocated
                        .toggle_filter(entry.option.key, &entry.option.value);
                    let _ = apply_table_command(
                        &mut screen.tables.unallocated,
                        &mut screen.unallocated_ui,
                        TableCommand::MoveCursor(0),
                    );
                    screen
                        .tables
                        .unallocated
                        .has_filter(entry.option.key, &entry.option.value)
                }
            }
        }
    };

    let state = if active { "on" } else { "off" };
    let title = option_label(&entry.option);
    Some(format!("filter {state}: {title}"))
}

fn option_label(option: &FilterOption) -> String {
    if option.title.is_empty() {
        "(none)".to_owned()
    } else {
        option.title.clone()
    }
}

// ---------------------------------------------------------------------------
// Rendering

fn render(frame: &mut ratatui::Frame<'_>, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = Screen::ALL
        .iter()
        .position(|screen| *screen == view_data.screen)
        .unwrap_or(0);
    let titles = Screen::ALL
        .iter()
        .map(|screen| screen_title(*screen, &view_data.messages))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("varaus").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_body(frame, layout[1], view_data);

    let status = Paragraph::new(status_text(view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(notice) = &view_data.notice {
        let area = centered_rect(62, 32, frame.area());
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(render_notice_text(notice))
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .title(notice.label.clone())
                    .borders(Borders::ALL),
            );
        frame.render_widget(widget, area);
    }

    if view_data.facet_picker.visible {
        let area = centered_rect(52, 62, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(render_facet_picker_text(view_data))
            .block(Block::default().title("filters").borders(Borders::ALL));
        frame.render_widget(picker, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 62, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_body(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    match view_data.screen {
        Screen::Applications => match &view_data.applications {
            Some(screen) => render_applications_screen(frame, area, screen, view_data),
            None => render_placeholder(frame, area, view_data),
        },
        Screen::Resolution => match &view_data.resolution {
            Some(screen) => render_resolution_screen(frame, area, screen, view_data),
            None => render_placeholder(frame, area, view_data),
        },
    }
}

fn render_placeholder(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let widget = Paragraph::new(placeholder_text(view_data)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(screen_title(view_data.screen, &view_data.messages)),
    );
    frame.render_widget(widget, area);
}

/// "Loading..." until the first load lands; an active notice takes over the
/// messaging so the body stays blank behind it.
fn placeholder_text(view_data: &ViewData) -> String {
    if view_data.notice.is_some() {
        String::new()
    } else {
        view_data.messages.translate("common.loading")
    }
}

fn render_applications_screen(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &ApplicationsScreen,
    view_data: &ViewData,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let ingress = Paragraph::new(applications_ingress_text(screen, view_data))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(ingress, sections[0]);

    let label = view_data.messages.translate("Application.allApplications");
    render_table(
        frame,
        sections[1],
        &TableRender {
            view: &screen.view,
            ui: &screen.ui,
            title: table_title(&screen.view, &label),
            dim_row: Some(is_handled_application),
            group_heading: None,
        },
        &view_data.messages,
    );
}

fn render_resolution_screen(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    screen: &ResolutionScreen,
    view_data: &ViewData,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(1)])
        .split(area);

    let ingress = Paragraph::new(resolution_ingress_text(screen, view_data))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(ingress, sections[0]);

    let label = view_data
        .messages
        .translate(screen.tables.active_tab().message_key());
    match screen.tables.active_tab() {
        GroupTab::Allocated => render_table(
            frame,
            sections[1],
            &TableRender {
                view: &screen.tables.allocated,
                ui: &screen.allocated_ui,
                title: table_title(&screen.tables.allocated, &label),
                dim_row: None,
                group_heading: Some(unit_heading),
            },
            &view_data.messages,
        ),
        GroupTab::Unallocated => render_table(
            frame,
            sections[1],
            &TableRender {
                view: &screen.tables.unallocated,
                ui: &screen.unallocated_ui,
                title: table_title(&screen.tables.unallocated, &label),
                dim_row: None,
                group_heading: None,
            },
            &view_data.messages,
        ),
    }
}

/// Applications already past review render dimmed, same vocabulary as the
/// resolution pipeline's handled set.
fn is_handled_application(application: &Application) -> bool {
    HANDLED_STATUSES.contains(&application.status.as_str())
}

fn unit_heading(result: &ProcessedAllocationResult) -> String {
    result.unit_name.clone()
}

struct TableRender<'a, R> {
    view: &'a TableView<R>,
    ui: &'a TableUiState,
    title: String,
    dim_row: Option<fn(&R) -> bool>,
    /// Emits a heading row above each group when set; single-table views
    /// leave it off.
    group_heading: Option<fn(&R) -> String>,
}

fn render_table<R: TableRecord + Clone>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    table: &TableRender<'_, R>,
    messages: &Messages,
) {
    let config = table.view.config();
    let columns = config.cols.len();
    let widths = vec![Constraint::Min(8); columns.max(1)];

    let header_cells = config.cols.iter().map(|column| {
        Cell::from(header_label(column, table.view, messages)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let mut rows: Vec<Row> = Vec::new();
    let mut data_index = 0usize;
    for group in table.view.visible_groups() {
        if group.data.is_empty() {
            continue;
        }
        if let Some(heading) = table.group_heading
            && let Some(first) = group.data.first()
        {
            let mut cells = vec![Cell::from(heading(first)).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )];
            cells.extend((1..columns).map(|_| Cell::from(String::new())));
            rows.push(Row::new(cells));
        }
        for row in &group.data {
            let cursor_row = data_index == table.ui.cursor;
            let row_id = (config.index)(row);
            let picked = row_id.is_some_and(|id| table.view.is_selected(id));
            let dimmed = table.dim_row.is_some_and(|dim| dim(row));

            let cells = config
                .cols
                .iter()
                .enumerate()
                .map(|(column_index, column)| {
                    let mut style = Style::default();
                    if dimmed {
                        style = style.fg(Color::DarkGray);
                    }
                    if picked {
                        style = style.fg(Color::Yellow);
                    }
                    if cursor_row {
                        style = style.bg(Color::DarkGray);
                    }
                    if cursor_row && column_index == table.ui.col {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    Cell::from(column.render(row, messages)).style(style)
                })
                .collect::<Vec<_>>();
            rows.push(Row::new(cells));
            data_index += 1;
        }
    }

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table.title.clone())
                .borders(Borders::ALL),
        );
    frame.render_widget(widget, area);
}

fn header_label<R: TableRecord + Clone>(
    column: &Column<R>,
    view: &TableView<R>,
    messages: &Messages,
) -> String {
    let mut label = messages.translate(column.title);
    if column.key == view.sort_key() {
        label.push(' ');
        label.push_str(sort_glyph(view.sort_order()));
    }
    label
}

fn table_title<R: TableRecord + Clone>(view: &TableView<R>, label: &str) -> String {
    let visible = view.visible_rows().len();
    let total = view.total_rows();
    let mut parts = vec![format!("{label} {visible}/{total}")];
    let filters = view.active_filter_count();
    if filters > 0 {
        parts.push(format!("filters {filters}"));
    }
    let picked = view.selected_ids().len();
    if picked > 0 {
        parts.push(format!("picked {picked}"));
    }
    parts.join(" | ")
}

fn screen_title(screen: Screen, messages: &Messages) -> String {
    match screen {
        Screen::Applications => messages.translate("Application.allApplications"),
        // No resolution exists while the round is still under review; the
        // number renders as a placeholder.
        Screen::Resolution => {
            messages.translate_with("ApplicationRound.resolutionNumber", &[("no", "????")])
        }
    }
}

fn applications_ingress_text(screen: &ApplicationsScreen, view_data: &ViewData) -> String {
    let round_name = view_data
        .round
        .as_ref()
        .map(|round| round.name.as_str())
        .unwrap_or("");
    format!(
        "{round_name}\n{} {}",
        screen.view.total_rows(),
        view_data.messages.translate("common.volumeUnit")
    )
}

fn resolution_ingress_text(screen: &ResolutionScreen, view_data: &ViewData) -> String {
    let round_name = view_data
        .round
        .as_ref()
        .map(|round| round.name.as_str())
        .unwrap_or("");
    let count = if screen.unallocated_total == 0 {
        "0".to_owned()
    } else {
        format_number(Some(screen.unallocated_total as i64), "")
    };
    let count_line = format!(
        "{count} {}",
        view_data
            .messages
            .translate("ApplicationRound.unallocatedApplications")
    );
    format!(
        "{round_name}\n{}\n{count_line}\n{}",
        screen.timeframe,
        resolution_tab_line(screen, &view_data.messages)
    )
}

fn resolution_tab_line(screen: &ResolutionScreen, messages: &Messages) -> String {
    GroupTab::ALL
        .iter()
        .map(|tab| {
            let label = messages.translate(tab.message_key());
            if *tab == screen.tables.active_tab() {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<String>>()
        .join("  ")
}

fn render_notice_text(notice: &Notice) -> String {
    format!("{}\n\nesc to dismiss", notice.message)
}

fn render_facet_picker_text(view_data: &ViewData) -> String {
    let entries = facet_picker_entries(view_data);
    if entries.is_empty() {
        return "no filters available".to_owned();
    }

    let mut lines = Vec::new();
    let mut last_title: Option<&str> = None;
    for (index, entry) in entries.iter().enumerate() {
        if last_title != Some(entry.facet_title.as_str()) {
            if last_title.is_some() {
                lines.push(String::new());
            }
            lines.push(entry.facet_title.clone());
            last_title = Some(entry.facet_title.as_str());
        }
        let cursor = if index == view_data.facet_picker.cursor {
            ">"
        } else {
            " "
        };
        let mark = if entry.active { "x" } else { " " };
        lines.push(format!("{cursor} [{mark}] {}", option_label(&entry.option)));
    }
    lines.push(String::new());
    lines.push("enter toggle | esc close".to_owned());
    lines.join("\n")
}

fn status_text(view_data: &ViewData) -> String {
    // Overlays carry their own hints; the bar stays quiet underneath them.
    if view_data.help_visible || view_data.facet_picker.visible {
        return String::new();
    }

    let badge = screen_badge(view_data.screen);
    let hints = "j/k h/l g/G | enter open | s sort | f filter | c clear | x/X pick | t tab | tab screen | r reload | ? help | q quit";
    match &view_data.status_line {
        Some(status) => format!("{badge} | {status} | {hints}"),
        None => format!("{badge} | {hints}"),
    }
}

const fn screen_badge(screen: Screen) -> &'static str {
    match screen {
        Screen::Applications => "APPLICATIONS",
        Screen::Resolution => "RESOLUTION",
    }
}

fn help_overlay_text() -> String {
    [
        "j/k or arrows   move row",
        "h/l or arrows   move column",
        "g/G             first/last row",
        "s               sort by the selected column",
        "f               filter picker",
        "c               clear filters",
        "x/X             pick row / clear picks",
        "enter           open the row's destination",
        "tab             switch screen",
        "t               switch resolution tab",
        "r               reload",
        "esc             dismiss notice or overlay",
        "q or ctrl+q     quit",
    ]
    .join("\n")
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

#[cfg(test)]
mod tests {
    use super::{
        BrowserOptions, RoundRuntime, Screen, TableCommand, ViewData, applications_ingress_text,
        dispatch_table_command, facet_picker_entries, handle_key_event, header_label,
        is_handled_application, load_screen, placeholder_text, render_facet_picker_text,
        render_notice_text, resolution_ingress_text, route_for, status_text, table_title,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use time::OffsetDateTime;
    use time::macros::datetime;
    use varaus_app::{
        AllocationResult, ApplicantType, Application, ApplicationAggregates, ApplicationEvent,
        ApplicationEventScheduleId, ApplicationId, ApplicationRound, ApplicationRoundId,
        AppliedAggregates, FetchError, GroupTab, Organisation, REVIEW_STATUS_FILTER, RowTarget,
        ServiceSectorId,
    };

    #[derive(Debug, Default)]
    struct FakeRuntime {
        round: Option<ApplicationRound>,
        applications: Vec<Application>,
        allocation_results: Vec<AllocationResult>,
        round_error: Option<FetchError>,
        applications_error: Option<FetchError>,
        results_error: Option<FetchError>,
        round_calls: usize,
        application_calls: usize,
        result_calls: usize,
        last_status_filter: Option<String>,
    }

    impl RoundRuntime for FakeRuntime {
        fn load_round(
            &mut self,
            id: ApplicationRoundId,
        ) -> Result<ApplicationRound, FetchError> {
            self.round_calls += 1;
            if let Some(error) = &self.round_error {
                return Err(error.clone());
            }
            match &self.round {
                Some(round) if round.id == id => Ok(round.clone()),
                _ => Err(FetchError::NotFound),
            }
        }

        fn load_applications(
            &mut self,
            _round: ApplicationRoundId,
            status_filter: &str,
        ) -> Result<Vec<Application>, FetchError> {
            self.application_calls += 1;
            self.last_status_filter = Some(status_filter.to_owned());
            if let Some(error) = &self.applications_error {
                return Err(error.clone());
            }
            Ok(self.applications.clone())
        }

        fn load_allocation_results(
            &mut self,
            _round: ApplicationRoundId,
            _sector: ServiceSectorId,
        ) -> Result<Vec<AllocationResult>, FetchError> {
            self.result_calls += 1;
            if let Some(error) = &self.results_error {
                return Err(error.clone());
            }
            Ok(self.allocation_results.clone())
        }

        fn now(&self) -> OffsetDateTime {
            datetime!(2026-02-15 12:00 UTC)
        }
    }

    fn sample_round(id: i64) -> ApplicationRound {
        ApplicationRound {
            id: ApplicationRoundId::new(id),
            name: "Spring 2026 sports halls".to_owned(),
            service_sector_id: ServiceSectorId::new(3),
            application_period_begin: datetime!(2026-02-01 00:00 UTC),
            application_period_end: datetime!(2026-03-01 00:00 UTC),
        }
    }

    fn sample_application(id: i64, name: &str, status: &str) -> Application {
        Application {
            id: ApplicationId::new(id),
            applicant_type: Some(ApplicantType::Association),
            organisation: Some(Organisation {
                name: name.to_owned(),
                active_members_count: Some(25),
            }),
            contact_person: None,
            status: status.to_owned(),
            aggregated_data: Some(ApplicationAggregates {
                reservations_total: Some(4),
                min_duration_total: Some(3600),
            }),
        }
    }

    fn sample_result(
        application_id: i64,
        schedule_id: i64,
        unit: &str,
        event_status: &str,
    ) -> AllocationResult {
        AllocationResult {
            application_id: ApplicationId::new(application_id),
            application_event_schedule_id: Some(ApplicationEventScheduleId::new(schedule_id)),
            applicant_type: Some(ApplicantType::Association),
            organisation_name: format!("Org {application_id}"),
            unit_name: unit.to_owned(),
            application_event: ApplicationEvent {
                status: event_status.to_owned(),
            },
            application_aggregated_data: Some(AppliedAggregates {
                applied_reservations_total: Some(4),
                applied_min_duration_total: Some(3600),
            }),
        }
    }

    fn populated_runtime() -> FakeRuntime {
        FakeRuntime {
            round: Some(sample_round(7)),
            applications: vec![
                sample_application(1, "Cello club", "in_review"),
                sample_application(2, "Alpha ry", "declined"),
                sample_application(3, "Beta kuoro", "in_review"),
            ],
            allocation_results: vec![
                sample_result(1, 10, "North Hall", "validated"),
                sample_result(3, 11, "Cedar Room", "validated"),
                sample_result(3, 12, "North Hall", "failed"),
            ],
            ..FakeRuntime::default()
        }
    }

    fn options() -> BrowserOptions {
        BrowserOptions {
            round_id: ApplicationRoundId::new(7),
            status_filter: REVIEW_STATUS_FILTER.to_owned(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_view_data(runtime: &mut FakeRuntime) -> ViewData {
        let mut view_data = ViewData::default();
        assert!(load_screen(
            &options(),
            runtime,
            &mut view_data,
            Screen::Applications
        ));
        view_data
    }

    fn loaded_resolution(runtime: &mut FakeRuntime) -> ViewData {
        let mut view_data = ViewData::default();
        view_data.screen = Screen::Resolution;
        assert!(load_screen(
            &options(),
            runtime,
            &mut view_data,
            Screen::Resolution
        ));
        view_data
    }

    fn visible_customer_names(view_data: &ViewData) -> Vec<String> {
        view_data
            .applications
            .as_ref()
            .expect("applications loaded")
            .view
            .visible_rows()
            .iter()
            .map(|application| {
                application
                    .organisation
                    .as_ref()
                    .map(|organisation| organisation.name.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn round_failure_gates_the_dependent_fetches() {
        let mut runtime = FakeRuntime {
            round_error: Some(FetchError::Transport("connection refused".to_owned())),
            ..FakeRuntime::default()
        };
        let mut view_data = ViewData::default();

        let loaded = load_screen(&options(), &mut runtime, &mut view_data, Screen::Applications);
        assert!(!loaded);
        assert_eq!(runtime.application_calls, 0);
        assert_eq!(runtime.result_calls, 0);

        let notice = view_data.notice.expect("notice raised");
        assert_eq!(notice.key, "errors.errorFetchingData");
        assert_eq!(notice.label, "Operation failed");
        assert_eq!(notice.message, "Error fetching data");
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("load failed: errors.errorFetchingData")
        );
    }

    #[test]
    fn missing_round_reports_not_found() {
        let mut runtime = FakeRuntime::default();
        let mut view_data = ViewData::default();

        load_screen(&options(), &mut runtime, &mut view_data, Screen::Applications);
        let notice = view_data.notice.expect("notice raised");
        assert_eq!(notice.key, "errors.applicationRoundNotFound");
        assert_eq!(notice.message, "Application round not found");
    }

    #[test]
    fn collection_failures_share_one_message() {
        let mut runtime = populated_runtime();
        runtime.applications_error = Some(FetchError::Transport("502".to_owned()));
        let mut view_data = ViewData::default();
        load_screen(&options(), &mut runtime, &mut view_data, Screen::Applications);
        assert_eq!(
            view_data.notice.as_ref().map(|notice| notice.key),
            Some("errors.errorFetchingApplications")
        );

        let mut runtime = populated_runtime();
        runtime.results_error = Some(FetchError::NotFound);
        let mut view_data = ViewData::default();
        load_screen(&options(), &mut runtime, &mut view_data, Screen::Resolution);
        assert_eq!(
            view_data.notice.as_ref().map(|notice| notice.key),
            Some("errors.errorFetchingApplications")
        );
        // The round fetch succeeded before the failure.
        assert_eq!(runtime.round_calls, 1);
        assert_eq!(runtime.result_calls, 1);
    }

    #[test]
    fn successful_load_clears_a_stale_notice() {
        let mut runtime = populated_runtime();
        let mut view_data = ViewData::default();
        super::raise_notice(
            &mut view_data,
            varaus_app::FetchPhase::Round,
            &FetchError::NotFound,
        );
        assert!(view_data.notice.is_some());

        assert!(load_screen(
            &options(),
            &mut runtime,
            &mut view_data,
            Screen::Applications
        ));
        assert!(view_data.notice.is_none());
    }

    #[test]
    fn applications_load_sorts_by_customer_and_counts_rows() {
        let mut runtime = populated_runtime();
        let view_data = loaded_view_data(&mut runtime);

        assert_eq!(
            visible_customer_names(&view_data),
            ["Alpha ry", "Beta kuoro", "Cello club"]
        );
        let screen = view_data.applications.as_ref().expect("loaded");
        let ingress = applications_ingress_text(screen, &view_data);
        assert_eq!(ingress, "Spring 2026 sports halls\n3 units");
        assert!(!screen.facets.is_empty());
    }

    #[test]
    fn status_filter_is_forwarded_verbatim() {
        let mut runtime = populated_runtime();
        let _ = loaded_view_data(&mut runtime);
        assert_eq!(
            runtime.last_status_filter.as_deref(),
            Some("in_review,review_done,declined")
        );
    }

    #[test]
    fn resolution_load_partitions_and_groups_by_unit() {
        let mut runtime = populated_runtime();
        let view_data = loaded_resolution(&mut runtime);
        let screen = view_data.resolution.as_ref().expect("loaded");

        // Application 2 has no allocation result at all.
        assert_eq!(screen.unallocated_total, 1);
        assert_eq!(screen.tables.unallocated.total_rows(), 1);

        // Only validated rows reach the allocated tab, one group per unit.
        assert_eq!(screen.tables.allocated.total_rows(), 2);
        let groups = screen.tables.allocated.visible_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].data[0].unit_name, "North Hall");
        assert_eq!(groups[1].data[0].unit_name, "Cedar Room");

        assert_eq!(screen.tables.active_tab(), GroupTab::Allocated);
    }

    #[test]
    fn timeframe_line_uses_the_runtime_clock() {
        let mut runtime = populated_runtime();
        let view_data = loaded_resolution(&mut runtime);
        let screen = view_data.resolution.as_ref().expect("loaded");
        assert_eq!(screen.timeframe, "Application period open until 2026-03-01");

        let ingress = resolution_ingress_text(screen, &view_data);
        assert!(ingress.contains("Application period open until 2026-03-01"));
        assert!(ingress.contains("1 applications without allocations"));
        assert!(ingress.contains("[Handled]"));
    }

    #[test]
    fn tab_key_switches_screens_and_loads_lazily() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);
        assert_eq!(runtime.round_calls, 1);

        let quit = handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Tab));
        assert!(!quit);
        assert_eq!(view_data.screen, Screen::Resolution);
        assert!(view_data.resolution.is_some());
        assert_eq!(runtime.round_calls, 2);
        assert_eq!(runtime.result_calls, 1);

        // Already loaded: switching back does not refetch.
        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Tab));
        assert_eq!(view_data.screen, Screen::Applications);
        assert_eq!(runtime.round_calls, 2);
    }

    #[test]
    fn resolution_tab_state_survives_switching() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_resolution(&mut runtime);

        {
            let screen = view_data.resolution.as_mut().expect("loaded");
            screen.tables.allocated.toggle_filter("unitName", "North Hall");
            screen.allocated_ui.cursor = 0;
            screen.allocated_ui.col = 2;
        }

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('t')),
        );
        {
            let screen = view_data.resolution.as_ref().expect("loaded");
            assert_eq!(screen.tables.active_tab(), GroupTab::Unallocated);
        }

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('t')),
        );
        let screen = view_data.resolution.as_ref().expect("loaded");
        assert_eq!(screen.tables.active_tab(), GroupTab::Allocated);
        assert!(screen.tables.allocated.has_filter("unitName", "North Hall"));
        assert_eq!(screen.allocated_ui.col, 2);
        // Nothing was fetched for a tab switch.
        assert_eq!(runtime.round_calls, 1);
    }

    #[test]
    fn facet_picker_toggles_the_underlying_filter() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('f')),
        );
        assert!(view_data.facet_picker.visible);

        let entries = facet_picker_entries(&view_data);
        assert!(!entries.is_empty());
        let first = entries[0].clone();

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Enter));
        {
            let screen = view_data.applications.as_ref().expect("loaded");
            assert!(screen.view.has_filter(first.option.key, &first.option.value));
        }
        let text = render_facet_picker_text(&view_data);
        assert!(text.contains("> [x]"), "picker text: {text}");

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Enter));
        {
            let screen = view_data.applications.as_ref().expect("loaded");
            assert!(!screen.view.has_filter(first.option.key, &first.option.value));
        }

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Esc));
        assert!(!view_data.facet_picker.visible);
    }

    #[test]
    fn enter_opens_the_application_route() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Enter));
        // First visible row after the customer sort is Alpha ry, id 2.
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("open /application/2")
        );
    }

    #[test]
    fn recommendation_route_includes_the_round() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_resolution(&mut runtime);

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Enter));
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("open /applicationRound/7/recommendation/10")
        );
    }

    #[test]
    fn route_strings_cover_both_targets() {
        let round = ApplicationRoundId::new(7);
        assert_eq!(
            route_for(round, RowTarget::Application(ApplicationId::new(12))),
            "/application/12"
        );
        assert_eq!(
            route_for(
                round,
                RowTarget::Recommendation(ApplicationEventScheduleId::new(34))
            ),
            "/applicationRound/7/recommendation/34"
        );
    }

    #[test]
    fn sort_key_cycles_and_headers_mark_direction() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('s')),
        );
        assert_eq!(
            visible_customer_names(&view_data),
            ["Cello club", "Beta kuoro", "Alpha ry"]
        );
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("sort: Customer ↓")
        );

        let screen = view_data.applications.as_ref().expect("loaded");
        let label = header_label(
            &screen.view.config().cols[0],
            &screen.view,
            &view_data.messages,
        );
        assert_eq!(label, "Customer ↓");
        let unsorted = header_label(
            &screen.view.config().cols[1],
            &screen.view,
            &view_data.messages,
        );
        assert_eq!(unsorted, "Participants");
    }

    #[test]
    fn handled_applications_are_dimmed() {
        assert!(is_handled_application(&sample_application(
            1, "Alpha ry", "declined"
        )));
        assert!(is_handled_application(&sample_application(
            2, "Beta", "validated"
        )));
        assert!(!is_handled_application(&sample_application(
            3, "Gamma", "in_review"
        )));
    }

    #[test]
    fn notice_dismisses_with_esc() {
        let mut runtime = FakeRuntime::default();
        let mut view_data = ViewData::default();
        load_screen(&options(), &mut runtime, &mut view_data, Screen::Applications);
        assert!(view_data.notice.is_some());

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Esc));
        assert!(view_data.notice.is_none());
        assert_eq!(view_data.status_line.as_deref(), Some("notice dismissed"));
    }

    #[test]
    fn notice_text_carries_the_dismiss_hint() {
        let mut view_data = ViewData::default();
        super::raise_notice(
            &mut view_data,
            varaus_app::FetchPhase::Collections,
            &FetchError::Transport("boom".to_owned()),
        );
        let notice = view_data.notice.expect("notice raised");
        assert_eq!(
            render_notice_text(&notice),
            "Error fetching applications\n\nesc to dismiss"
        );
    }

    #[test]
    fn quit_keys_end_the_session() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        assert!(handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('q'))
        ));
        assert!(handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)
        ));
        assert!(!handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('j'))
        ));
    }

    #[test]
    fn help_overlay_opens_and_suppresses_hints() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('?')),
        );
        assert!(view_data.help_visible);
        assert_eq!(status_text(&view_data), "");

        handle_key_event(&options(), &mut runtime, &mut view_data, key(KeyCode::Esc));
        assert!(!view_data.help_visible);
        assert!(status_text(&view_data).starts_with("APPLICATIONS | "));
    }

    #[test]
    fn clear_filters_reports_how_many_went_away() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);
        {
            let screen = view_data.applications.as_mut().expect("loaded");
            screen.view.toggle_filter("status", "in_review");
            screen.view.toggle_filter("applicantType", "association");
        }

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('c')),
        );
        let screen = view_data.applications.as_ref().expect("loaded");
        assert_eq!(screen.view.active_filter_count(), 0);
        assert_eq!(
            view_data.status_line.as_deref(),
            Some("cleared 2 filters")
        );
    }

    #[test]
    fn picking_rows_and_clearing_picks() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('x')),
        );
        {
            let screen = view_data.applications.as_ref().expect("loaded");
            assert_eq!(screen.view.selected_ids(), [2]);
        }
        assert_eq!(view_data.status_line.as_deref(), Some("picked 2"));

        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('X')),
        );
        let screen = view_data.applications.as_ref().expect("loaded");
        assert!(screen.view.selected_ids().is_empty());
        assert_eq!(view_data.status_line.as_deref(), Some("cleared 1 picked"));
    }

    #[test]
    fn reload_refreshes_from_the_runtime_and_keeps_filters() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);
        {
            let screen = view_data.applications.as_mut().expect("loaded");
            screen.view.toggle_filter("applicantType", "association");
        }

        runtime
            .applications
            .push(sample_application(4, "Delta ry", "in_review"));
        handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('r')),
        );

        let screen = view_data.applications.as_ref().expect("loaded");
        assert_eq!(screen.view.total_rows(), 4);
        assert!(screen.view.has_filter("applicantType", "association"));
        assert_eq!(view_data.status_line.as_deref(), Some("reloaded"));
    }

    #[test]
    fn cursor_moves_clamp_to_the_visible_rows() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);

        dispatch_table_command(&mut view_data, TableCommand::MoveCursor(10));
        assert_eq!(
            view_data.applications.as_ref().expect("loaded").ui.cursor,
            2
        );
        dispatch_table_command(&mut view_data, TableCommand::MoveCursor(-10));
        assert_eq!(
            view_data.applications.as_ref().expect("loaded").ui.cursor,
            0
        );
        dispatch_table_command(&mut view_data, TableCommand::CursorLast);
        assert_eq!(
            view_data.applications.as_ref().expect("loaded").ui.cursor,
            2
        );
    }

    #[test]
    fn table_title_shows_counts_filters_and_picks() {
        let mut runtime = populated_runtime();
        let mut view_data = loaded_view_data(&mut runtime);
        {
            let screen = view_data.applications.as_mut().expect("loaded");
            screen.view.toggle_filter("status", "in_review");
            screen.view.toggle_select(1);
        }
        let screen = view_data.applications.as_ref().expect("loaded");
        assert_eq!(
            table_title(&screen.view, "All applications"),
            "All applications 2/3 | filters 1 | picked 1"
        );
    }

    #[test]
    fn placeholder_shows_loading_until_data_or_notice() {
        let view_data = ViewData::default();
        assert_eq!(placeholder_text(&view_data), "Loading...");

        let mut view_data = ViewData::default();
        super::raise_notice(
            &mut view_data,
            varaus_app::FetchPhase::Round,
            &FetchError::NotFound,
        );
        assert_eq!(placeholder_text(&view_data), "");
    }

    #[test]
    fn commands_without_a_loaded_screen_are_ignored() {
        let mut view_data = ViewData::default();
        assert!(dispatch_table_command(&mut view_data, TableCommand::MoveCursor(1)).is_none());

        let mut runtime = FakeRuntime::default();
        // 't' and table keys are no-ops before a load lands anywhere.
        assert!(!handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Char('t'))
        ));
        assert!(!handle_key_event(
            &options(),
            &mut runtime,
            &mut view_data,
            key(KeyCode::Enter)
        ));
        assert!(view_data.status_line.is_none());
    }
}
