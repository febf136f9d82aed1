// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, overlay, and style helpers used by TUI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Options,
    Selection,
    Blocks,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Options => Self::Selection,
            Self::Selection => Self::Blocks,
            Self::Blocks => Self::Options,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Options => Self::Blocks,
            Self::Selection => Self::Options,
            Self::Blocks => Self::Selection,
        }
    }
}

fn border_style(active: Focus, panel: Focus) -> Style {
    if active == panel {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        title.push(' ');
        title.push_str(tail);
    }
    title.push(' ');
    title
}

fn draw(frame: &mut Frame<'_>, shell: &mut Shell) {
    shell.expire_toast(Instant::now());
    let area = frame.area();

    let [tabs_area, crumbs_area, query_area, main_area, output_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .areas(area);

    frame.render_widget(Paragraph::new(tabs_line(&shell.view)), tabs_area);
    frame.render_widget(Paragraph::new(crumbs_line(&shell.view)), crumbs_area);
    frame.render_widget(Paragraph::new(query_line(shell)), query_area);
    if let Mode::Query(input) = &shell.mode {
        let prefix = Line::from(format!("Search: {}", input.text())).width() as u16;
        let x = query_area.x.saturating_add(prefix).min(query_area.right().saturating_sub(1));
        frame.set_cursor_position((x, query_area.y));
    }

    let [options_area, side_area] =
        Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)]).areas(main_area);
    let [selection_area, blocks_area] =
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(side_area);

    render_options(frame, shell, options_area);
    render_selection(frame, shell, selection_area);
    render_blocks(frame, shell, blocks_area);
    render_output(frame, shell, output_area);
    frame.render_widget(Paragraph::new(footer_line(shell)), footer_area);

    match &shell.mode {
        Mode::Query(_) => render_suggestions(frame, shell, main_area),
        Mode::Manager(manager) => render_manager(frame, shell, manager, main_area),
        Mode::Help => render_help(frame, main_area),
        _ => {}
    }
}

fn tabs_line(view: &View) -> Line<'static> {
    let mut spans = Vec::with_capacity(view.categories.len() * 2);
    for tab in &view.categories {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        let text = format!(" {} {} ({}) ", tab.icon, tab.name, tab.count);
        let style = if tab.active {
            Style::default().fg(Color::Black).bg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(FOOTER_LABEL_COLOR)
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn crumbs_line(view: &View) -> Line<'static> {
    let mut spans = vec![Span::styled(
        view.breadcrumb_line(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !view.filters.is_empty() {
        spans.push(Span::raw("   "));
        let all_active = view.filters.iter().all(|chip| !chip.active);
        spans.push(chip_span("全部", all_active));
        for chip in &view.filters {
            spans.push(Span::raw(" "));
            spans.push(chip_span(&chip.name, chip.active));
        }
    }
    Line::from(spans)
}

fn chip_span(name: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[{name}]"), style)
}

fn query_line(shell: &Shell) -> Line<'static> {
    let query = match &shell.mode {
        Mode::Query(input) => input.text().to_owned(),
        _ => shell.view.query.clone(),
    };
    let mut spans = vec![
        Span::styled("Search: ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::raw(query),
    ];
    if shell.view.query_mode == QueryMode::Regex {
        spans.push(Span::styled("  (regex)".to_owned(), Style::default().fg(FOOTER_KEY_COLOR)));
    }
    if let Some(err) = shell.view.options.as_ref().and_then(|list| list.query_error.as_deref()) {
        let summary = err.lines().last().unwrap_or(err).trim().to_owned();
        spans.push(Span::styled(format!("  {summary}"), Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn option_marker(node: &OptionNode, selected: bool) -> &'static str {
    match node {
        OptionNode::Leaf(_) if selected => "◼ ",
        OptionNode::Leaf(_) => "◻ ",
        OptionNode::Manage(_) => "⚙ ",
        OptionNode::Subcategory { .. }
        | OptionNode::SceneType { .. }
        | OptionNode::FirstModifier { .. } => "▸ ",
    }
}

fn option_line(option: &NavOption, hint: Option<&str>) -> Line<'static> {
    let mut spans = Vec::with_capacity(4);
    if let Some(hint) = hint {
        spans.push(Span::styled(
            format!("{hint} "),
            Style::default().fg(HINT_COLOR).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(option_marker(&option.node, option.selected)));

    let label_style = if option.selected {
        Style::default().fg(SELECTED_COLOR)
    } else if option.node.is_manage() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };
    spans.push(Span::styled(option.node.label().into_owned(), label_style));

    if let OptionNode::Leaf(leaf) = &option.node {
        if let Some(sub) = &leaf.subcategory_name {
            spans.push(Span::styled(format!("  {sub}"), Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}

fn render_options(frame: &mut Frame<'_>, shell: &mut Shell, area: Rect) {
    let hint_labels = match &shell.mode {
        Mode::Hint { labels, typed } => Some((labels, typed.as_str())),
        _ => None,
    };

    let (items, tail) = match &shell.view.options {
        Some(list) => {
            let items = list
                .options
                .iter()
                .enumerate()
                .filter_map(|(index, option)| {
                    let hint = match hint_labels {
                        Some((labels, typed)) => {
                            let label = labels.get(index)?;
                            if !label.starts_with(typed) {
                                return None;
                            }
                            Some(label.as_str())
                        }
                        None => None,
                    };
                    Some(ListItem::new(option_line(option, hint)))
                })
                .collect::<Vec<_>>();
            let tail = format!("({}) depth {}", list.count, list.depth);
            (items, tail)
        }
        None => (vec![ListItem::new(Line::from("No categories"))], String::new()),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(shell.focus, Focus::Options))
                .title(view_title("Options", '1', Some(&tail))),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    if hint_labels.is_some() {
        frame.render_widget(list, area);
    } else {
        frame.render_stateful_widget(list, area, &mut shell.options);
    }
}

fn render_selection(frame: &mut Frame<'_>, shell: &mut Shell, area: Rect) {
    let items = shell
        .view
        .selection
        .iter()
        .map(|item| ListItem::new(Line::from(format!("✕ {}", item.label()))))
        .collect::<Vec<_>>();
    let tail = format!("({})", shell.view.selection.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(shell.focus, Focus::Selection))
                .title(view_title("Selected", '2', Some(&tail))),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut shell.selection);
}

fn render_blocks(frame: &mut Frame<'_>, shell: &mut Shell, area: Rect) {
    let editing = match &shell.mode {
        Mode::Block { index, input } => Some((*index, input.text())),
        _ => None,
    };
    let items = shell
        .view
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let (lock, lock_style) = if block.locked {
                ("🔒", Style::default().fg(LOCKED_COLOR))
            } else {
                ("  ", Style::default())
            };
            let value = match editing {
                Some((editing_index, text)) if editing_index == index => format!("{text}█"),
                _ => block.value.clone(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(lock.to_owned(), lock_style),
                Span::styled(format!(" {}: ", block.label), Style::default().fg(FOOTER_LABEL_COLOR)),
                Span::raw(value),
            ]))
        })
        .collect::<Vec<_>>();

    let mode = match shell.view.composition_mode {
        CompositionMode::Blocks => "mode blocks",
        CompositionMode::Selection => "mode selection",
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(shell.focus, Focus::Blocks))
                .title(view_title("Blocks", '3', Some(mode))),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut shell.blocks);
}

fn delimiter_label(delimiter: &Delimiter) -> String {
    let newline = if delimiter.newlines() { " ⏎" } else { "" };
    format!("delimiter {:?}{newline}", delimiter.text())
}

fn render_output(frame: &mut Frame<'_>, shell: &Shell, area: Rect) {
    let mut tail = match &shell.mode {
        Mode::Delimiter(input) => format!("delimiter {:?}█", input.text()),
        _ => delimiter_label(&shell.view.delimiter),
    };
    if shell.view.is_user_editing {
        tail.push_str(" · edited");
    }

    let mut text = shell.view.output.clone();
    let editing = matches!(shell.mode, Mode::Output(_));
    if editing {
        text.push('█');
    }
    let border = if editing { Style::default().fg(FOCUS_COLOR) } else { Style::default() };
    let output = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(view_title("Output", 'e', Some(&tail))),
    );
    frame.render_widget(output, area);
}

fn footer_line(shell: &Shell) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    match &shell.mode {
        Mode::Normal => {
            push_footer_entry(&mut spans, "Move", "j/k");
            push_footer_entry(&mut spans, "Open", "⏎");
            push_footer_entry(&mut spans, "Up", "⌫");
            push_footer_entry(&mut spans, "Category", "h/l");
            push_footer_entry(&mut spans, "Search", "/");
            push_footer_entry(&mut spans, "Jump", "g");
            push_footer_entry(&mut spans, "Edit", "e");
            push_footer_entry(&mut spans, "Copy", "y");
            push_footer_entry(&mut spans, "Manage", "M");
            push_footer_entry(&mut spans, "Help", "?");
            push_footer_entry(&mut spans, "Quit", "q");
        }
        Mode::Query(_) => {
            let offered = !shell.suggestion_state().suggestions().is_empty();
            push_footer_entry(&mut spans, "Apply", "⏎");
            push_footer_entry_maybe_disabled(&mut spans, "Pick", "↑/↓", !offered);
            push_footer_entry(&mut spans, "Done", "Esc");
        }
        Mode::Output(_) | Mode::Block { .. } | Mode::Delimiter(_) => {
            push_footer_entry(&mut spans, "Save", "⏎");
            push_footer_entry(&mut spans, "Cancel", "Esc");
        }
        Mode::Hint { .. } => {
            push_footer_entry(&mut spans, "Jump", "label");
            push_footer_entry(&mut spans, "Cancel", "Esc");
        }
        Mode::Manager(manager) if manager.adding.is_some() => {
            push_footer_entry(&mut spans, "Add", "⏎");
            push_footer_entry(&mut spans, "Cancel", "Esc");
        }
        Mode::Manager(_) => {
            push_footer_entry(&mut spans, "Column", "Tab");
            push_footer_entry(&mut spans, "Add", "a");
            push_footer_entry(&mut spans, "Remove", "x");
            push_footer_entry(&mut spans, "Reset", "R");
            push_footer_entry(&mut spans, "Close", "Esc");
        }
        Mode::Help => push_footer_entry(&mut spans, "Close", "?"),
    }

    if let Some(toast) = &shell.toast {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(toast.message.clone(), Style::default().fg(SELECTED_COLOR)));
    }
    Line::from(spans)
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
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(format!("{label}:"), Style::default().fg(FOOTER_LABEL_COLOR)));
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
}

fn render_suggestions(frame: &mut Frame<'_>, shell: &Shell, anchor: Rect) {
    let lines: Vec<Line<'static>> = match shell.suggestion_state() {
        SuggestionState::Hidden => return,
        SuggestionState::Loading { keyword } => {
            vec![Line::styled(format!("Asking for {keyword:?}…"), Style::default().fg(Color::DarkGray))]
        }
        SuggestionState::Ready { suggestions, .. } => suggestions
            .into_iter()
            .enumerate()
            .map(|(index, suggestion)| {
                let style = if index == shell.suggestion_cursor {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::styled(suggestion, style)
            })
            .collect(),
    };

    let width = anchor.width.saturating_sub(4).min(72);
    let height = (lines.len() as u16).saturating_add(2).min(anchor.height);
    let area = Rect::new(anchor.x.saturating_add(2), anchor.y, width, height);
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(FOCUS_COLOR))
            .title(" Suggestions "),
    );
    frame.render_widget(popup, area);
}

fn manager_list(
    title: String,
    items: Vec<String>,
    cursor: usize,
    focused: bool,
) -> (List<'static>, ListState) {
    let items = items.into_iter().map(ListItem::new).collect::<Vec<_>>();
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(cursor));
    }
    let border = if focused { Style::default().fg(FOCUS_COLOR) } else { Style::default() };
    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(border).title(title))
        .highlight_style(highlight);
    (list, state)
}

fn render_manager(frame: &mut Frame<'_>, shell: &Shell, manager: &Manager, main_area: Rect) {
    let area = centered_rect(84, 80, main_area);
    frame.render_widget(Clear, area);

    let title = format!(" {} ", OptionNode::Manage(manager.target.clone()).label());
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(title);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [columns_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(columns_area);

    let (left, right) = shell.manager_columns(manager);
    let (left_title, right_title) = match &manager.target {
        ManageTarget::Catalog(_) => {
            let sub = left.get(manager.left).cloned().unwrap_or_default();
            (" Subcategories ".to_owned(), format!(" Variations · {sub} "))
        }
        ManageTarget::SceneModifiers => (" First modifiers ".to_owned(), " Second modifiers ".to_owned()),
    };

    let (list, mut state) =
        manager_list(left_title, left, manager.left, manager.column == ManagerColumn::Left);
    frame.render_stateful_widget(list, left_area, &mut state);
    let (list, mut state) =
        manager_list(right_title, right, manager.right, manager.column == ManagerColumn::Right);
    frame.render_stateful_widget(list, right_area, &mut state);

    if let Some(input) = &manager.adding {
        let line = Line::from(vec![
            Span::styled("Add: ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)),
            Span::raw(format!("{}█", input.text())),
        ]);
        frame.render_widget(Paragraph::new(line), input_area);
    }
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = 100u16.saturating_sub(height_percent) / 2;
    let horizontal_margin = 100u16.saturating_sub(width_percent) / 2;

    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage(vertical_margin),
        Constraint::Percentage(height_percent),
        Constraint::Percentage(vertical_margin),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(horizontal_margin),
        Constraint::Percentage(width_percent),
        Constraint::Percentage(horizontal_margin),
    ])
    .areas(middle);
    center
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("Tab/Shift-Tab, 1-3", "Cycle or pick the focused pane"),
    ("h/l, [/], ←/→", "Previous / next category"),
    ("j/k, ↑/↓", "Move within the focused pane"),
    ("Enter", "Open option, remove selected item, or edit block"),
    ("Backspace, Esc", "Go up one level (Esc clears the search first)"),
    ("/", "Search options; ↑/↓ + Enter applies a suggestion"),
    ("r", "Toggle substring / regex search"),
    ("f", "Cycle subcategory filter"),
    ("g", "Jump to an option by label"),
    ("e", "Edit the output text"),
    ("y", "Copy output to the clipboard"),
    ("c, x", "Clear selection / remove focused item"),
    ("d, n", "Edit delimiter / toggle newlines"),
    ("m", "Toggle blocks / selection composition"),
    ("Space, R", "Lock block / randomize unlocked blocks"),
    ("M", "Manage options or modifiers"),
    ("q, Ctrl-C", "Quit"),
];

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD);
    let width = HELP_KEYS.iter().map(|(key, _)| Line::from(*key).width()).max().unwrap_or(0);
    HELP_KEYS
        .iter()
        .map(|(key, desc)| {
            let pad = width.saturating_sub(Line::from(*key).width());
            Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled((*key).to_owned(), key_style),
                Span::raw("  "),
                Span::raw((*desc).to_owned()),
            ])
        })
        .collect()
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(82, 84, main_area);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(help_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(FOCUS_COLOR))
            .title(" Help "),
    );
    frame.render_widget(help, area);
}
