//! Per-view renderers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use super::Theme;
use crate::app::form::FIELD_LABELS;
use crate::app::{App, MENU_ITEMS};
use crate::store::PingResult;

const MASCOT_NORMAL: [&str; 4] = [
    "╭─────────╮",
    "│  ●   ●  │",
    "│   ───   │",
    "╰─────────╯",
];

const MASCOT_HAPPY: [&str; 4] = [
    "╭─────────╮",
    "│  ●   ●  │",
    "│   ╰─╯   │",
    "╰─────────╯",
];

const MASCOT_RESTING: [&str; 4] = [
    "╭─────────╮",
    "│  -   -  │",
    "│   ───   │",
    "╰─────────╯",
];

pub fn draw_main_menu(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = padded(frame.area());
    let mascot = match app.menu_index {
        0 => MASCOT_NORMAL,
        1 => MASCOT_HAPPY,
        _ => MASCOT_RESTING,
    };

    let mut lines = vec![
        Line::from(Span::styled("WATCHPOST", header_style(theme))),
        Line::from(Span::styled(
            "Keeping watch on your endpoints",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
    ];
    for row in mascot {
        lines.push(Line::from(Span::styled(
            row,
            Style::default().fg(theme.primary),
        )));
    }
    lines.push(Line::default());

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let (prefix, style) = if i == app.menu_index {
            (
                "→ ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(theme.text))
        };
        lines.push(Line::from(Span::styled(format!("{prefix}{item}"), style)));
    }
    lines.push(Line::default());
    lines.push(hint_line(theme, "↑/↓: Navigate • Enter: Select • q: Quit"));

    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_profile_list(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = padded(frame.area());
    let profiles = app.store.profiles();

    let mut lines = vec![
        Line::from(Span::styled("SELECT PROFILE", header_style(theme))),
        Line::default(),
    ];

    if profiles.is_empty() {
        lines.push(Line::from(Span::styled(
            "No profiles found",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());
        lines.push(hint_line(theme, "c: Create New • Esc: Back"));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    for (i, profile) in profiles.iter().enumerate() {
        let selected = i == app.profile_index;
        let marker = if selected {
            Span::styled("● ", Style::default().fg(theme.success))
        } else {
            Span::styled("○ ", Style::default().fg(theme.dim))
        };
        let mut name_style = Style::default().fg(theme.primary);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            marker,
            Span::styled(profile.name.clone(), name_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", profile.full_url()),
            Style::default().fg(theme.dim),
        )));
        lines.push(Line::from(Span::styled(
            format!("  every {} min", profile.interval),
            Style::default().fg(theme.dim),
        )));
        lines.push(Line::default());
    }

    lines.push(hint_line(
        theme,
        "Enter: Run • e: Edit • d: Delete • c: Create New • Esc: Back",
    ));
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_form(frame: &mut Frame, app: &App, theme: &Theme, title: &str) {
    let area = padded(frame.area());

    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), header_style(theme))),
        Line::default(),
    ];

    for (i, (label, hint)) in FIELD_LABELS.iter().enumerate() {
        let focused = i == app.form.focus();
        let label_style = if focused {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(*label, label_style)));
        lines.push(Line::from(Span::styled(
            *hint,
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )));

        let caret_color = if focused { theme.accent } else { theme.border };
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(caret_color)),
            Span::styled(
                app.form.field(i).value().to_string(),
                Style::default().fg(theme.text),
            ),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    let save_style = if app.form.on_last_field() {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.primary)
    };
    lines.push(Line::from(Span::styled("[ Save Profile ]", save_style)));
    lines.push(Line::default());
    lines.push(hint_line(theme, "Tab/↑↓: Navigate • Enter: Next/Save • Esc: Cancel"));

    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_running(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = padded(frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let status = if app.running {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.success)),
            Span::styled(
                "ACTIVE - Monitoring endpoint...",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.dim)),
            Span::styled("PAUSED - Monitoring paused", Style::default().fg(theme.dim)),
        ])
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled("MONITORING", header_style(theme))),
        status,
    ]);
    frame.render_widget(header, chunks[0]);

    if let Some(profile) = &app.current {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                profile.name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("URL: ", Style::default().fg(theme.dim)),
                Span::styled(profile.full_url(), Style::default().fg(theme.text)),
            ]),
            Line::from(vec![
                Span::styled("Interval: ", Style::default().fg(theme.dim)),
                Span::styled(
                    format!("{} minutes", profile.interval),
                    Style::default().fg(theme.text),
                ),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(card, chunks[1]);
    }

    let items: Vec<ListItem> = if app.results.is_empty() {
        vec![ListItem::new(Span::styled(
            "No ping results yet...",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        app.results
            .iter()
            .map(|result| ListItem::new(result_line(result, theme)))
            .collect()
    };
    let feed = List::new(items).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled("Recent Pings", Style::default().fg(theme.text))),
    );
    frame.render_widget(feed, chunks[2]);

    let hints = if app.running {
        "s: Stop • Esc: Back • q: Quit"
    } else {
        "s: Start • Esc: Back • q: Quit"
    };
    frame.render_widget(Paragraph::new(hint_line(theme, hints)), chunks[3]);
}

/// Render the banner on the bottom row, over whatever view is up.
pub fn draw_notice(frame: &mut Frame, app: &App, theme: &Theme) {
    let Some(notice) = &app.notice else {
        return;
    };
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let row = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            notice.clone(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        row,
    );
}

fn result_line(result: &PingResult, theme: &Theme) -> Line<'static> {
    let timestamp = result.timestamp.format("%H:%M:%S").to_string();
    let mut spans = vec![
        Span::styled(timestamp, Style::default().fg(theme.dim)),
        Span::raw("  "),
    ];
    if result.success {
        spans.push(Span::styled(
            "✓ ",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("HTTP {}", result.status_code),
            Style::default().fg(theme.success),
        ));
    } else {
        spans.push(Span::styled(
            "✗ ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ));
        let text = match &result.error {
            Some(error) => format!("ERROR: {error}"),
            None => format!("HTTP {}", result.status_code),
        };
        spans.push(Span::styled(text, Style::default().fg(theme.error)));
    }
    spans.push(Span::styled(
        format!(" ({}ms)", result.duration.as_millis()),
        Style::default().fg(theme.dim),
    ));
    Line::from(spans)
}

fn header_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

fn hint_line(theme: &Theme, text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(theme.dim)))
}

fn padded(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(2)
        .horizontal_margin(4)
        .constraints([Constraint::Min(0)])
        .split(area)[0]
}
