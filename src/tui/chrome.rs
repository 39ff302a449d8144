// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn stack_main_panes_vertically(area: Rect) -> bool {
    area.width < 100
}

fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 80
}

/// Focusable fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Category,
    Party,
    Region,
    Representative,
    Tone,
    Subject,
    Generate,
    Output,
}

impl Focus {
    fn label(self) -> &'static str {
        match self {
            Self::Category => "Recipient type",
            Self::Party => "Party",
            Self::Region => "Region",
            Self::Representative => "Representative",
            Self::Tone => "Tone",
            Self::Subject => "Subject",
            Self::Generate => "Generate",
            Self::Output => "Output",
        }
    }

    /// Fields that take typed characters as text.
    fn is_text_input(self) -> bool {
        matches!(self, Self::Party | Self::Region | Self::Representative | Self::Subject)
    }
}

fn panel_border_style_for_focus(active: Focus, panel: Focus) -> Style {
    if active != panel {
        return Style::default();
    }

    Style::default().fg(FOCUS_COLOR)
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn choice_item_bg(is_cursor: bool, has_focus: bool) -> Option<Color> {
    match (is_cursor, has_focus) {
        (true, true) => Some(CURSOR_BG_FOCUSED),
        (true, false) => Some(CURSOR_BG),
        (false, _) => None,
    }
}

fn footer_help_line(app: &App, toast_suffix: &str, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let no_output = app.state.output().is_none();
    let incomplete = !app.state.selection().is_complete();

    if compact {
        push_footer_entry(&mut spans, "NEXT", "Tab");
        push_footer_entry_maybe_disabled(&mut spans, "GEN", "^G", incomplete);
        push_footer_entry_maybe_disabled(&mut spans, "COPY", "^Y", no_output);
        push_footer_entry(&mut spans, "QUIT", "^Q");
    } else {
        match app.focus {
            Focus::Party | Focus::Region | Focus::Representative => {
                push_footer_entry(&mut spans, "SEARCH", "type");
                push_footer_entry(&mut spans, "MOVE", "↑↓");
                push_footer_entry(&mut spans, "PICK", "↵");
            }
            Focus::Category | Focus::Tone => {
                push_footer_entry(&mut spans, "CHANGE", "←→");
            }
            Focus::Subject => {
                push_footer_entry(&mut spans, "EDIT", "type");
            }
            Focus::Generate => {
                push_footer_entry_maybe_disabled(&mut spans, "GENERATE", "↵", incomplete);
            }
            Focus::Output => {
                push_footer_entry(&mut spans, "SCROLL", "↑↓");
            }
        }
        push_footer_entry(&mut spans, "NEXT", "Tab");
        push_footer_entry_maybe_disabled(&mut spans, "GENERATE", "^G", incomplete);
        push_footer_entry_maybe_disabled(&mut spans, "COPY", "^Y", no_output);
        push_footer_entry_maybe_disabled(&mut spans, "MAIL", "^O", no_output);
        let help = if app.focus.is_text_input() { "F1" } else { "?" };
        push_footer_entry(&mut spans, "HELP", help);
        push_footer_entry(&mut spans, "QUIT", "^Q");
    }

    if let Some(toast_message) = toast_suffix.strip_prefix(" | ") {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::styled(
            "Toast:".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::raw(toast_message.to_owned()));
    }

    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = help_key_style();
    let header_style = help_header_style();
    let dim_style = Style::default().fg(Color::DarkGray);

    let sections: [(&str, &[(&str, &str)]); 5] = [
        (
            "Global",
            &[
                ("Tab/Shift-Tab", "Focus next/previous field"),
                ("Ctrl-G", "Generate email"),
                ("Ctrl-Y", "Copy email to clipboard"),
                ("Ctrl-O", "Open in mail client"),
                ("?/F1", "Help (toggle; F1 inside text fields)"),
                ("Ctrl-C/Ctrl-Q", "Quit"),
                ("Esc", "Clear field, or quit when empty"),
            ],
        ),
        (
            "Lists",
            &[
                ("Type", "Search labels and values"),
                ("Backspace", "Delete search char"),
                ("↑/↓, PgUp/PgDn", "Move cursor"),
                ("Home/End", "First/last option"),
                ("Enter", "Select option"),
            ],
        ),
        (
            "Recipient type / Tone",
            &[
                ("←/→", "Previous/next choice"),
                ("Enter", "Confirm and move on"),
                ("Backspace", "Clear recipient type"),
            ],
        ),
        (
            "Subject",
            &[
                ("Type", "Edit subject override"),
                ("Enter", "Move on"),
            ],
        ),
        (
            "Output / Help",
            &[
                ("↑/↓, PgUp/PgDn", "Scroll"),
                ("Home/End", "Top/bottom"),
                ("Esc/?", "Close help"),
            ],
        ),
    ];

    let key_col_width = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (title, entries) in sections {
        lines.push(Line::from(Span::styled(format!("--- {title} ---"), header_style)));
        for (key, desc) in entries {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Note: ", dim_style),
        Span::styled(
            "changing the recipient type, party or region hides the generated email.",
            dim_style,
        ),
    ]));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(76, 80, main_area);
    frame.render_widget(Clear, area);

    let lines = help_lines();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title_style(
            Style::default()
                .fg(FOCUS_COLOR)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    app.help_viewport_height = inner.height;
    let max_scroll = lines
        .len()
        .saturating_sub(inner.height.max(1) as usize)
        .min(u16::MAX as usize) as u16;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_error_screen(frame: &mut Frame<'_>, message: &str) {
    let area = centered_rect(70, 50, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Could not load the representative data.",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(FOOTER_LABEL_COLOR)),
            Span::styled("q", help_key_style()),
            Span::styled(" to quit.", Style::default().fg(FOOTER_LABEL_COLOR)),
        ]),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("─ Error ─")
                .border_style(Style::default().fg(ERROR_COLOR)),
        );
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    vec![Span::styled(
        value.to_owned(),
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD),
    )]
}
