use crossterm::event::KeyCode;
use log::debug;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::error::Result;
use crate::fmt::{number, truncate};
use crate::models::{Brand, Transaction, TransactionId, TxnType};
use crate::settings::Settings;
use crate::store::{Lookup, Notification, TransactionStore};
use crate::tui::{
    self, View, ViewAction, AMOUNT_NEG_STYLE, AMOUNT_POS_STYLE, BUTTON_STYLE, FOCUS_STYLE,
    FOOTER_STYLE, HEADER_STYLE, PLACEHOLDER_STYLE, SELECTED_STYLE, TOAST_STYLE,
};

const DATE_MAX_LEN: usize = 10;
// Title, blank, four fields, blank, button
const FORM_HEIGHT: u16 = 9;

/// Form rows in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Amount,
    Type,
    Brand,
    Submit,
}

const FIELDS: [Field; 5] = [
    Field::Date,
    Field::Amount,
    Field::Type,
    Field::Brand,
    Field::Submit,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Amount => "Amount",
            Field::Type => "Type",
            Field::Brand => "Brand",
            Field::Submit => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

pub struct Tracker {
    store: TransactionStore,
    focus: Focus,
    field: usize,
    selection: usize,
    scroll_offset: usize,
    last_visible_rows: usize,
    status_message: Option<String>,
    /// Remaining keypresses before the status message is cleared.
    status_ttl: u8,
    toast_lifetime: u8,
    greeting: Option<String>,
}

impl Tracker {
    pub fn new(store: TransactionStore, settings: &Settings) -> Self {
        let greeting = if settings.user_name.is_empty() {
            None
        } else {
            Some(settings.user_name.clone())
        };
        Self {
            store,
            focus: Focus::Form,
            field: 0,
            selection: 0,
            scroll_offset: 0,
            last_visible_rows: 10,
            status_message: None,
            status_ttl: 0,
            toast_lifetime: settings.toast_ttl.max(1),
            greeting,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    fn selected_id(&self) -> Option<TransactionId> {
        self.store.transactions().get(self.selection).map(|t| t.id)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_ttl = self.toast_lifetime;
    }

    fn notify(&mut self, result: Lookup<Notification>) {
        match result {
            Lookup::Found(note) => self.set_status(note.message()),
            Lookup::NotFound => debug!("event=notify status=skipped reason=not_found"),
        }
    }

    fn leave_edit(&mut self) {
        if self.store.cancel_edit().is_some() {
            self.set_status("Unsaved changes discarded");
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        self.selection = if len == 0 { 0 } else { self.selection.min(len - 1) };
        self.ensure_visible(self.last_visible_rows);
    }

    fn ensure_visible(&mut self, visible_rows: usize) {
        if self.selection < self.scroll_offset {
            self.scroll_offset = self.selection;
        } else if visible_rows > 0 && self.selection >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selection - visible_rows + 1;
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw_screen(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = FOOTER_STYLE;

        let [header_area, sep, form_area, table_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let header = match &self.greeting {
            Some(name) => format!(" kickbook: Track Your Sneaker Transactions  (hi, {name})"),
            None => " kickbook: Track Your Sneaker Transactions".to_string(),
        };
        frame.render_widget(Paragraph::new(header).style(HEADER_STYLE), header_area);

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        frame.render_widget(Paragraph::new(self.form_lines()), form_area);

        // Title, blank and column header take three lines; totals take two.
        let data_rows = (table_area.height as usize).saturating_sub(5);
        self.last_visible_rows = data_rows;
        self.ensure_visible(data_rows);
        frame.render_widget(Paragraph::new(self.table_lines(data_rows)), table_area);

        let hints = match (&self.status_message, self.focus) {
            (Some(msg), _) => Paragraph::new(format!(" {msg}")).style(TOAST_STYLE),
            (None, Focus::Form) => Paragraph::new(
                " \u{2191}\u{2193}=field  \u{2190}\u{2192}=choose  Enter=save  Tab/Esc=table",
            )
            .style(FOOTER_STYLE),
            (None, Focus::Table) => Paragraph::new(
                " \u{2191}\u{2193}=select  e=edit  d=delete  a=new  Tab=form  q=quit",
            )
            .style(FOOTER_STYLE),
        };
        frame.render_widget(hints, hints_area);
    }

    fn form_lines(&self) -> Vec<Line<'static>> {
        let draft = self.store.draft();
        let title = if self.store.is_editing() {
            " Edit Transaction"
        } else {
            " New Transaction"
        };
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, field) in FIELDS.iter().enumerate() {
            let is_focused = self.focus == Focus::Form && i == self.field;
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if is_focused {
                FOCUS_STYLE
            } else {
                Style::default()
            };

            let value = match field {
                Field::Date => text_value(&draft.date, "YYYY-MM-DD", is_focused, value_style),
                Field::Amount => text_value(&draft.amount, "0.00", is_focused, value_style),
                Field::Type => selector_value(
                    draft.kind.map(|k| k.as_str()),
                    "Select Type",
                    is_focused,
                    value_style,
                ),
                Field::Brand => selector_value(
                    draft.brand.map(|b| b.as_str()),
                    "Select Brand",
                    is_focused,
                    value_style,
                ),
                Field::Submit => {
                    lines.push(Line::from(""));
                    let style = if is_focused {
                        BUTTON_STYLE
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    lines.push(Line::from(vec![
                        Span::raw("   "),
                        Span::styled(format!("[ {} ]", self.store.submit_label()), style),
                    ]));
                    continue;
                }
            };

            lines.push(Line::from(vec![
                Span::styled(format!("   {:<10} ", field.label()), label_style),
                value,
            ]));
        }
        lines
    }

    fn table_lines(&self, data_rows: usize) -> Vec<Line<'static>> {
        let transactions = self.store.transactions();
        let mut lines = vec![
            Line::from(Span::styled(
                format!(" Transaction List ({})", transactions.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if transactions.is_empty() {
            lines.push(Line::from("   No transactions. Fill in the form and press Enter."));
            return lines;
        }

        lines.push(Line::from(Span::styled(
            format!("   {:<12} {:>12}  {:<9} {}", "Date", "Amount", "Type", "Brand"),
            FOOTER_STYLE.add_modifier(Modifier::BOLD),
        )));

        let end = (self.scroll_offset + data_rows).min(transactions.len());
        for (i, txn) in transactions
            .iter()
            .enumerate()
            .take(end)
            .skip(self.scroll_offset)
        {
            let is_selected = i == self.selection;
            let marker = if is_selected && self.focus == Focus::Table {
                " > "
            } else {
                "   "
            };
            let row_style = if is_selected && self.focus == Focus::Table {
                SELECTED_STYLE
            } else if self.store.editing() == Some(txn.id) {
                FOCUS_STYLE
            } else {
                Style::default()
            };
            lines.push(row_line(marker, txn, row_style));
        }

        let totals = self.store.totals();
        let mut summary = format!(
            "   Income {}  Expense {}  Net {}",
            number(totals.income),
            number(totals.expense),
            number(totals.net)
        );
        if totals.unparsed > 0 {
            summary.push_str(&format!("  ({} non-numeric)", totals.unparsed));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(summary, FOOTER_STYLE)));
        lines
    }

    // -----------------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------------

    fn handle_form_key(&mut self, code: KeyCode) -> ViewAction {
        let field = FIELDS[self.field];
        match code {
            KeyCode::Esc => {
                // A new entry stays in the form; only an edit is abandoned.
                if self.store.is_editing() {
                    self.leave_edit();
                }
                self.focus = Focus::Table;
            }
            KeyCode::Tab | KeyCode::BackTab => self.focus = Focus::Table,
            KeyCode::Down => self.field = (self.field + 1) % FIELDS.len(),
            KeyCode::Up => {
                self.field = if self.field == 0 {
                    FIELDS.len() - 1
                } else {
                    self.field - 1
                };
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                let draft = self.store.draft_mut();
                match field {
                    Field::Type => draft.kind = cycle(TxnType::ALL, draft.kind, forward),
                    Field::Brand => draft.brand = cycle(Brand::ALL, draft.brand, forward),
                    _ => {}
                }
            }
            KeyCode::Char(c) => {
                let draft = self.store.draft_mut();
                match field {
                    Field::Date if accepts_date_char(&draft.date, c) => draft.date.push(c),
                    Field::Amount if accepts_amount_char(&draft.amount, c) => {
                        draft.amount.push(c)
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => {
                let draft = self.store.draft_mut();
                match field {
                    Field::Date => {
                        draft.date.pop();
                    }
                    Field::Amount => {
                        draft.amount.pop();
                    }
                    Field::Type => draft.kind = None,
                    Field::Brand => draft.brand = None,
                    Field::Submit => {}
                }
            }
            KeyCode::Enter => {
                let result = self.store.submit();
                let added = result == Lookup::Found(Notification::Added);
                self.notify(result);
                self.field = 0;
                if added {
                    self.selection = self.store.len().saturating_sub(1);
                }
                self.clamp_selection();
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_table_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Up => {
                self.selection = self.selection.saturating_sub(1);
                self.ensure_visible(self.last_visible_rows);
            }
            KeyCode::Down => {
                if !self.store.is_empty() {
                    self.selection = (self.selection + 1).min(self.store.len() - 1);
                    self.ensure_visible(self.last_visible_rows);
                }
            }
            KeyCode::Tab | KeyCode::BackTab => self.focus = Focus::Form,
            KeyCode::Char('a') => {
                if self.store.is_editing() {
                    self.leave_edit();
                }
                self.field = 0;
                self.focus = Focus::Form;
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    match self.store.begin_edit(id) {
                        Lookup::Found(Some(_)) => self.set_status("Unsaved draft discarded"),
                        Lookup::Found(None) => {}
                        Lookup::NotFound => debug!("event=begin_edit status=not_found id={id}"),
                    }
                    self.field = 0;
                    self.focus = Focus::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    let result = self.store.delete(id);
                    self.notify(result);
                    self.clamp_selection();
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            _ => {}
        }
        ViewAction::Continue
    }
}

impl View for Tracker {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_screen(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }

        match self.focus {
            Focus::Form => self.handle_form_key(code),
            Focus::Table => self.handle_table_key(code),
        }
    }
}

/// Launch the interactive tracker.
pub fn run(settings: &Settings, empty: bool) -> Result<()> {
    let mut tracker = Tracker::new(initial_store(settings, empty), settings);
    tui::run_view(&mut tracker)?;
    log::info!("event=app_exit transactions={}", tracker.store().len());
    Ok(())
}

/// Sample records unless `--empty` was passed or seeding is off in settings.
fn initial_store(settings: &Settings, empty: bool) -> TransactionStore {
    if empty || !settings.seed_sample_data {
        TransactionStore::new()
    } else {
        TransactionStore::with_sample_data()
    }
}

fn row_line(marker: &'static str, txn: &Transaction, style: Style) -> Line<'static> {
    let amount_style = match txn.kind {
        Some(TxnType::Income) => AMOUNT_POS_STYLE,
        Some(TxnType::Expense) => AMOUNT_NEG_STYLE,
        None => Style::default(),
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{:<12} ", truncate(&txn.date, 12)), style),
        Span::styled(
            format!("{:>12}  ", truncate(&txn.amount, 12)),
            style.patch(amount_style),
        ),
        Span::styled(format!("{:<9} ", txn.kind_label()), style),
        Span::styled(txn.brand_label(), style),
    ])
}

fn text_value(
    value: &str,
    placeholder: &'static str,
    focused: bool,
    style: Style,
) -> Span<'static> {
    if value.is_empty() && !focused {
        Span::styled(placeholder, PLACEHOLDER_STYLE)
    } else {
        let cursor = if focused { "_" } else { "" };
        Span::styled(format!("{value}{cursor}"), style)
    }
}

fn selector_value(
    value: Option<&'static str>,
    placeholder: &'static str,
    focused: bool,
    style: Style,
) -> Span<'static> {
    let arrows = if focused { ("< ", " >") } else { ("  ", "  ") };
    match value {
        Some(v) => Span::styled(format!("{}{v}{}", arrows.0, arrows.1), style),
        None => Span::styled(
            format!("{}{placeholder}{}", arrows.0, arrows.1),
            if focused { style } else { PLACEHOLDER_STYLE },
        ),
    }
}

/// Step through a closed choice list; an unset value starts at either end.
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if all.is_empty() {
        return None;
    }
    let next = match current.and_then(|c| all.iter().position(|v| *v == c)) {
        None if forward => 0,
        None => all.len() - 1,
        Some(i) if forward => (i + 1) % all.len(),
        Some(0) => all.len() - 1,
        Some(i) => i - 1,
    };
    Some(all[next])
}

/// Date inputs take digits and dashes only.
fn accepts_date_char(current: &str, c: char) -> bool {
    (c.is_ascii_digit() || c == '-') && current.chars().count() < DATE_MAX_LEN
}

/// Number inputs take digits, a single decimal point and a leading minus.
fn accepts_amount_char(current: &str, c: char) -> bool {
    match c {
        '0'..='9' => true,
        '.' => !current.contains('.'),
        '-' => current.is_empty(),
        _ => false,
    }
}
