// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The presentation controller (ratatui + crossterm). It owns the [`ComposerState`] and the three
//! choice lists, applies one transition per key event and then resynchronises the widgets from
//! state. Panel visibility is read from [`visibility`] only.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::choice::{ChoiceList, ChoiceListConfig, SearchKind, SearchableChoiceList};
use crate::config::AppConfig;
use crate::export::{
    copy_with_fallback, mailto_uri, Clipboard, MailLauncher, Osc52Clipboard, SystemClipboard,
    SystemMailLauncher,
};
use crate::model::{PartyId, RegionCode};
use crate::state::{visibility, Category, ComposerState, Panel, TransitionError};

const FOCUS_COLOR: Color = Color::LightGreen;
const ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "advomail ";
const CURSOR_BG: Color = Color::Rgb(40, 40, 40);
const CURSOR_BG_FOCUSED: Color = Color::Rgb(30, 70, 30);
const PLACEHOLDER_COLOR: Color = Color::DarkGray;
const TOAST_TTL: Duration = Duration::from_secs(2);
const REPRESENTATIVE_MAX_OPTIONS: usize = 5000;
const PAGE_STEP: isize = 10;

/// Runs the interactive terminal UI until the user quits.
///
/// A failed data load is shown on a blocking error screen; the error is then returned so the
/// process exits non-zero.
pub fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let loaded = config.data_source().load_blocking();
    let mut terminal = TerminalSession::new()?;

    let directory = match loaded {
        Ok(directory) => directory,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            run_error_screen(&mut terminal, &err.to_string())?;
            return Err(err);
        }
    };

    let state = ComposerState::with_tone(directory, config.default_tone);
    let mut app = App::new(state, Exporters::system(config.mail_opener.clone()));

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(action) = app.take_external_action() {
                        let result =
                            terminal.run_external_action(|| app.execute_external_action(action));
                        match result {
                            Ok(()) => app.set_toast("Opened mail client"),
                            Err(err) => app.set_toast(format!("Mail client failed: {err}")),
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn run_error_screen(terminal: &mut TerminalSession, message: &str) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render_error_screen(frame, message))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_error_screen_quit(key) {
                return Ok(());
            }
        }
    }
}

fn is_error_screen_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c' | 'q') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        _ => false,
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let direction = if stack_main_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_area);
    let form_area = panes[0];
    let output_area = panes[1];

    let panels = visibility(&app.state);
    let mut fields = vec![(Focus::Category, Constraint::Length(3))];
    for (panel, focus) in [
        (Panel::Party, Focus::Party),
        (Panel::Region, Focus::Region),
        (Panel::Representative, Focus::Representative),
    ] {
        if panels.contains(&panel) {
            fields.push((focus, Constraint::Min(5)));
        }
    }
    if panels.contains(&Panel::Options) {
        fields.push((Focus::Tone, Constraint::Length(3)));
        fields.push((Focus::Subject, Constraint::Length(3)));
    }
    if panels.contains(&Panel::Generate) {
        fields.push((Focus::Generate, Constraint::Length(3)));
    }
    if fields.iter().all(|(_, constraint)| matches!(constraint, Constraint::Length(_))) {
        fields.push((Focus::Output, Constraint::Min(0)));
    }

    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|(_, constraint)| *constraint).collect::<Vec<_>>())
        .split(form_area);

    for (&(field, _), &field_area) in fields.iter().zip(field_areas.iter()) {
        match field {
            Focus::Category => render_category(frame, app, field_area),
            Focus::Party | Focus::Region | Focus::Representative => {
                render_choice_list(frame, app, field, field_area);
            }
            Focus::Tone => render_tone(frame, app, field_area),
            Focus::Subject => render_subject(frame, app, field_area),
            Focus::Generate => render_generate(frame, app, field_area),
            Focus::Output => {}
        }
    }

    render_output(frame, app, panels.contains(&Panel::Output), output_area);

    let compact_footer = footer_uses_compact_mode(main_area);
    let toast_suffix = match app.toast.as_ref().map(|toast| toast.expires_at) {
        Some(expires_at) if expires_at > Instant::now() => {
            app.toast.as_ref().map(|toast| format!(" | {}", toast.message)).unwrap_or_default()
        }
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let status = Paragraph::new(footer_help_line(app, &toast_suffix, compact_footer));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn field_block(app: &App, field: Focus, tail: Option<&str>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(view_title(field.label(), tail))
        .border_style(panel_border_style_for_focus(app.focus, field))
}

fn render_category(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let line = match app.state.selection().category() {
        Some(category) => Line::from(vec![
            Span::raw("‹ "),
            Span::styled(category.display_name(), Style::default().fg(Color::White)),
            Span::raw(" ›"),
        ]),
        None => Line::from(Span::styled(
            "‹ Select recipient type ›",
            Style::default().fg(PLACEHOLDER_COLOR),
        )),
    };
    let paragraph = Paragraph::new(line).block(field_block(app, Focus::Category, None));
    frame.render_widget(paragraph, area);
}

fn render_tone(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let tone = app.state.selection().tone();
    let line = Line::from(vec![
        Span::raw("‹ "),
        Span::styled(tone.display_name(), Style::default().fg(Color::White)),
        Span::raw(" ›"),
    ]);
    let paragraph = Paragraph::new(line).block(field_block(app, Focus::Tone, None));
    frame.render_widget(paragraph, area);
}

fn render_subject(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let subject = app.state.selection().subject_override();
    let line = if subject.is_empty() {
        Line::from(Span::styled(
            "Optional subject override",
            Style::default().fg(PLACEHOLDER_COLOR),
        ))
    } else {
        Line::from(subject.to_owned())
    };
    let block = field_block(app, Focus::Subject, None);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if app.focus == Focus::Subject && !app.show_help {
        let cursor_x = inner
            .x
            .saturating_add(subject.chars().count() as u16)
            .min(inner.x.saturating_add(inner.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

fn render_generate(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let style = if app.focus == Focus::Generate {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let paragraph = Paragraph::new(Line::from(Span::styled("[ Generate email ]", style)))
        .alignment(Alignment::Center)
        .block(field_block(app, Focus::Generate, None));
    frame.render_widget(paragraph, area);
}

fn render_choice_list(frame: &mut Frame<'_>, app: &App, field: Focus, area: Rect) {
    let Some(list) = app.list(field) else {
        return;
    };

    let hidden = list.hidden_match_count();
    let tail = (hidden > 0).then(|| format!("(+{hidden} more, keep typing)"));
    let block = field_block(app, field, tail.as_deref());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let has_focus = app.focus == field;
    let query_line = if list.query().is_empty() {
        Line::from(Span::styled(
            list.placeholder().to_owned(),
            Style::default().fg(PLACEHOLDER_COLOR),
        ))
    } else {
        Line::from(vec![
            Span::styled("/", Style::default().fg(FOOTER_KEY_COLOR)),
            Span::raw(list.query().to_owned()),
        ])
    };
    frame.render_widget(Paragraph::new(query_line), rows[0]);
    if has_focus && !app.show_help {
        let offset = if list.query().is_empty() { 0 } else { 1 + list.query().chars().count() };
        let cursor_x = rows[0]
            .x
            .saturating_add(offset as u16)
            .min(rows[0].x.saturating_add(rows[0].width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, rows[0].y));
    }

    let marker_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let cursor = list.cursor();
    let items = list
        .visible_options()
        .enumerate()
        .map(|(visible_idx, option)| {
            let is_selected = list.is_visible_selected(visible_idx);
            let marker = if is_selected { "◼" } else { "◻" };
            let mut item = ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(" "),
                Span::raw(option.text.clone()),
            ]));
            if let Some(bg) = choice_item_bg(cursor == Some(visible_idx), has_focus) {
                item = item.style(Style::default().bg(bg));
            }
            item
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        let message = if list.is_empty() { "No options" } else { "No matches" };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(PLACEHOLDER_COLOR))),
            rows[1],
        );
        return;
    }

    let mut list_state = ListState::default().with_selected(cursor);
    frame.render_stateful_widget(List::new(items), rows[1], &mut list_state);
}

fn render_output(frame: &mut Frame<'_>, app: &mut App, visible: bool, area: Rect) {
    let block = field_block(app, Focus::Output, visible.then_some("(read-only)"));
    let Some(email) = app.state.output().filter(|_| visible) else {
        let hint = if app.state.selection().is_complete() {
            "Press Ctrl-G to generate the email."
        } else {
            "Choose a recipient to compose an email."
        };
        let paragraph = Paragraph::new(Span::styled(hint, Style::default().fg(PLACEHOLDER_COLOR)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let text = email.output_text();
    let inner = block.inner(area);
    let max_scroll = text
        .lines()
        .count()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.output_scroll = app.output_scroll.min(max_scroll);

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    frame.render_widget(paragraph, area);
}

// Extracted layout/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExternalAction {
    OpenMailClient { uri: String },
}

/// Clipboard and mail-client handles used by the export actions.
struct Exporters {
    clipboard: Box<dyn Clipboard>,
    fallback_clipboard: Box<dyn Clipboard>,
    launcher: Box<dyn MailLauncher>,
}

impl Exporters {
    fn system(mail_opener: Option<String>) -> Self {
        Self {
            clipboard: Box::new(SystemClipboard::new()),
            fallback_clipboard: Box::new(Osc52Clipboard::stdout()),
            launcher: Box::new(SystemMailLauncher::new(mail_opener)),
        }
    }
}

struct App {
    state: ComposerState,
    parties: SearchableChoiceList,
    regions: SearchableChoiceList,
    representatives: SearchableChoiceList,
    representatives_region: Option<RegionCode>,
    exporters: Exporters,
    focus: Focus,
    output_scroll: u16,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    pending_external_action: Option<ExternalAction>,
    should_quit: bool,
}

impl App {
    fn new(state: ComposerState, exporters: Exporters) -> Self {
        let mut parties = SearchableChoiceList::new(ChoiceListConfig::new("Search parties…"));
        let mut regions = SearchableChoiceList::new(ChoiceListConfig::new("Search regions…"));
        let representatives = SearchableChoiceList::new(
            ChoiceListConfig::new("Search representatives…")
                .with_max_options(REPRESENTATIVE_MAX_OPTIONS)
                .with_search(SearchKind::Fuzzy),
        );
        parties.set_options(state.party_choices());
        regions.set_options(state.region_choices());

        let mut app = Self {
            state,
            parties,
            regions,
            representatives,
            representatives_region: None,
            exporters,
            focus: Focus::Category,
            output_scroll: 0,
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            pending_external_action: None,
            should_quit: false,
        };
        app.sync_widgets();
        app
    }

    fn list(&self, field: Focus) -> Option<&SearchableChoiceList> {
        match field {
            Focus::Party => Some(&self.parties),
            Focus::Region => Some(&self.regions),
            Focus::Representative => Some(&self.representatives),
            _ => None,
        }
    }

    fn list_mut(&mut self, field: Focus) -> Option<&mut SearchableChoiceList> {
        match field {
            Focus::Party => Some(&mut self.parties),
            Focus::Region => Some(&mut self.regions),
            Focus::Representative => Some(&mut self.representatives),
            _ => None,
        }
    }

    /// Visible fields in Tab order.
    fn focus_order(&self) -> Vec<Focus> {
        let panels = visibility(&self.state);
        let mut order = vec![Focus::Category];
        for (panel, focus) in [
            (Panel::Party, Focus::Party),
            (Panel::Region, Focus::Region),
            (Panel::Representative, Focus::Representative),
        ] {
            if panels.contains(&panel) {
                order.push(focus);
            }
        }
        if panels.contains(&Panel::Options) {
            order.extend([Focus::Tone, Focus::Subject]);
        }
        if panels.contains(&Panel::Generate) {
            order.push(Focus::Generate);
        }
        if panels.contains(&Panel::Output) {
            order.push(Focus::Output);
        }
        order
    }

    fn cycle_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
    }

    /// Resynchronises the widgets from state after a transition.
    fn sync_widgets(&mut self) {
        let selection = self.state.selection();

        match selection.party() {
            Some(party) => {
                self.parties.select_value(party.as_str());
            }
            None => self.parties.clear_selection(),
        }
        match selection.region() {
            Some(region) => {
                self.regions.select_value(region.as_str());
            }
            None => self.regions.clear_selection(),
        }

        if selection.region() != self.representatives_region.as_ref() {
            self.representatives_region = selection.region().cloned();
            self.representatives.set_options(self.state.representative_choices());
        }
        match self.state.selection().representative() {
            Some(name) => {
                self.representatives.select_value(name);
            }
            None => self.representatives.clear_selection(),
        }

        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Category;
        }
    }

    fn apply_transition(&mut self, result: Result<(), TransitionError>) -> bool {
        let applied = match result {
            Ok(()) => true,
            Err(err) => {
                self.set_toast(err.to_string());
                false
            }
        };
        self.sync_widgets();
        applied
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_event(key) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(ch) = key.code {
                match ch.to_ascii_lowercase() {
                    'c' | 'q' => return true,
                    'g' => self.generate(),
                    'y' => self.copy_output(),
                    'o' => self.queue_open_mail_client(),
                    _ => {}
                }
                return false;
            }
        }
        self.handle_key_code(key.code)
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => self.show_help = false,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::PageDown => self.help_scroll_page(1),
                KeyCode::PageUp => self.help_scroll_page(-1),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::F(1) => {
                self.toggle_help();
                return false;
            }
            KeyCode::Tab => {
                self.cycle_focus(1);
                return false;
            }
            KeyCode::BackTab => {
                self.cycle_focus(-1);
                return false;
            }
            KeyCode::Char('?') if !self.focus.is_text_input() => {
                self.toggle_help();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Category => self.handle_category_key(code),
            Focus::Party | Focus::Region | Focus::Representative => self.handle_list_key(code),
            Focus::Tone => self.handle_tone_key(code),
            Focus::Subject => self.handle_subject_key(code),
            Focus::Generate => match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.generate();
                    false
                }
                KeyCode::Esc => true,
                _ => false,
            },
            Focus::Output => self.handle_output_key(code),
        }
    }

    fn handle_category_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.shift_category(-1),
            KeyCode::Right => self.shift_category(1),
            KeyCode::Enter => {
                if self.state.selection().category().is_none() {
                    self.shift_category(1);
                }
                self.cycle_focus(1);
            }
            KeyCode::Backspace | KeyCode::Delete => self.apply_category(None),
            KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn shift_category(&mut self, delta: isize) {
        let all = Category::ALL;
        let next = match self.state.selection().category() {
            None if delta >= 0 => all[0],
            None => all[all.len() - 1],
            Some(current) => {
                let idx = all.iter().position(|category| *category == current).unwrap_or(0);
                all[(idx as isize + delta).rem_euclid(all.len() as isize) as usize]
            }
        };
        self.apply_category(Some(next));
    }

    fn apply_category(&mut self, category: Option<Category>) {
        self.state.select_category(category);
        self.parties.clear_query();
        self.regions.clear_query();
        self.output_scroll = 0;
        self.sync_widgets();
    }

    fn handle_list_key(&mut self, code: KeyCode) -> bool {
        let field = self.focus;
        let Some(list) = self.list_mut(field) else {
            return false;
        };
        match code {
            KeyCode::Char(ch) => list.push_query_char(ch),
            KeyCode::Backspace => {
                list.pop_query_char();
            }
            KeyCode::Up => list.move_cursor(-1),
            KeyCode::Down => list.move_cursor(1),
            KeyCode::PageUp => list.move_cursor(-PAGE_STEP),
            KeyCode::PageDown => list.move_cursor(PAGE_STEP),
            KeyCode::Home => list.move_cursor_to_start(),
            KeyCode::End => list.move_cursor_to_end(),
            KeyCode::Enter => self.commit_list_choice(field),
            KeyCode::Esc => {
                if !list.clear_query() {
                    return true;
                }
            }
            _ => {}
        }
        false
    }

    fn commit_list_choice(&mut self, field: Focus) {
        let Some(value) = self
            .list_mut(field)
            .and_then(|list| list.select_cursor())
            .map(|option| option.value.clone())
        else {
            self.set_toast("No matching option");
            return;
        };

        let result = match field {
            Focus::Party => match PartyId::new(value) {
                Ok(party) => self.state.select_party(party),
                Err(err) => {
                    self.set_toast(format!("Invalid party: {err}"));
                    return;
                }
            },
            Focus::Region => match RegionCode::new(value) {
                Ok(region) => self.state.select_region(region),
                Err(err) => {
                    self.set_toast(format!("Invalid region: {err}"));
                    return;
                }
            },
            Focus::Representative => self.state.select_representative(value),
            _ => return,
        };

        if self.apply_transition(result) {
            if let Some(list) = self.list_mut(field) {
                list.clear_query();
            }
            self.cycle_focus(1);
        }
    }

    fn handle_tone_key(&mut self, code: KeyCode) -> bool {
        let tone = self.state.selection().tone();
        match code {
            KeyCode::Left => self.state.set_tone(tone.prev()),
            KeyCode::Right => self.state.set_tone(tone.next()),
            KeyCode::Enter => self.cycle_focus(1),
            KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_subject_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => self.state.subject_override_mut().push(ch),
            KeyCode::Backspace => {
                self.state.subject_override_mut().pop();
            }
            KeyCode::Enter => self.cycle_focus(1),
            KeyCode::Esc => {
                if self.state.selection().subject_override().is_empty() {
                    return true;
                }
                self.state.set_subject_override(String::new());
            }
            _ => {}
        }
        false
    }

    fn handle_output_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.output_scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.output_scroll_by(-1),
            KeyCode::PageDown => self.output_scroll_by(PAGE_STEP as i32),
            KeyCode::PageUp => self.output_scroll_by(-PAGE_STEP as i32),
            KeyCode::Home => self.output_scroll = 0,
            KeyCode::End => self.output_scroll = u16::MAX,
            KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn output_scroll_by(&mut self, delta: i32) {
        let next = (self.output_scroll as i32 + delta).clamp(0, u16::MAX as i32);
        self.output_scroll = next as u16;
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        let next = (self.help_scroll as i32 + delta).clamp(0, u16::MAX as i32);
        self.help_scroll = next as u16;
    }

    fn help_scroll_page(&mut self, direction: i32) {
        let page = self.help_viewport_height.max(1).saturating_sub(1) as i32;
        let step = page.max(1);
        self.help_scroll_by(direction.signum() * step);
    }

    fn generate(&mut self) {
        match self.state.generate() {
            Ok(_) => {
                self.output_scroll = 0;
                self.focus = Focus::Output;
                self.set_toast("Email generated");
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn output_text(&self) -> Option<String> {
        self.state.output().map(|email| email.output_text())
    }

    fn copy_output(&mut self) {
        let Some(text) = self.output_text() else {
            self.set_toast("Nothing to copy yet");
            return;
        };

        let exporters = &mut self.exporters;
        let result = copy_with_fallback(
            exporters.clipboard.as_mut(),
            exporters.fallback_clipboard.as_mut(),
            &text,
        );
        match result {
            Ok(path) => self.set_toast(path.notice()),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }

    fn queue_open_mail_client(&mut self) {
        let Some(text) = self.output_text() else {
            self.set_toast("Generate an email first");
            return;
        };
        self.pending_external_action = Some(ExternalAction::OpenMailClient {
            uri: mailto_uri(&text),
        });
    }

    fn take_external_action(&mut self) -> Option<ExternalAction> {
        self.pending_external_action.take()
    }

    fn execute_external_action(&mut self, action: ExternalAction) -> Result<(), String> {
        match action {
            ExternalAction::OpenMailClient { uri } => {
                tracing::debug!(len = uri.len(), "opening mail client");
                self.exporters.launcher.open(&uri).map_err(|err| err.to_string())
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    /// Leaves the alternate screen while `action` runs, so terminal mail clients get the tty.
    fn run_external_action(
        &mut self,
        action: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), String> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)
            .map_err(|err| format!("terminal suspend failed: {err}"))?;
        action()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            let _ = ratatui::backend::Backend::flush(terminal.backend_mut());
            return Err(err);
        }

        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
