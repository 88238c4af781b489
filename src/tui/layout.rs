use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::domain::{processing_steps, Item, StepState};
use crate::flow::{Screen, MISSING_ITEM_MESSAGE};

use super::app::TuiApp;

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());

    match app.screen {
        Screen::Save => render_save(frame, app, chunks[0]),
        Screen::Processing => render_processing(frame, app, chunks[0]),
        Screen::Preview => render_preview(frame, app, chunks[0]),
        Screen::Reading => render_reading(frame, app, chunks[0]),
        Screen::Reflection => render_reflection(frame, app, chunks[0]),
        Screen::TodaysReads => render_list(frame, app, chunks[0], "Today's reads"),
        Screen::Library => render_list(frame, app, chunks[0], "Library"),
    }

    render_status_bar(frame, app, chunks[1]);
}

fn render_save(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Save an article");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new("Paste a link and press Enter:"),
        chunks[0],
    );

    let input = Paragraph::new(app.url_input.as_str())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input, chunks[1]);

    if let Some(err) = &app.form_error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }
}

fn render_processing(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Analyzing your article");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(err) = &app.processing_error {
        let text = vec![
            Line::from(Span::styled(
                "We couldn't process this article.",
                Style::default().fg(Color::Red),
            )),
            Line::from(err.as_str()),
            Line::from(""),
            Line::from("Press 'a' to save a different link."),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        return;
    }

    let complete = app.preview_at.is_some();
    let mut lines = Vec::new();
    if let Some(item) = &app.active_item {
        lines.push(Line::from(item.url.as_str()));
        lines.push(Line::from(""));
    }
    for step in processing_steps(complete) {
        let style = match step.state {
            StepState::Complete => Style::default().fg(Color::Green),
            StepState::Current => Style::default().add_modifier(Modifier::BOLD),
            StepState::Pending => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", step.marker(), step.label),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(if complete {
        "Done! Opening the preview...".to_string()
    } else if app.poll_attempts > 0 {
        format!(
            "This usually takes a few seconds. (check {})",
            app.poll_attempts
        )
    } else {
        "This usually takes a few seconds.".to_string()
    }));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_preview(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Preview");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(item) = &app.active_item else {
        frame.render_widget(
            Paragraph::new(MISSING_ITEM_MESSAGE).wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        item.display_title(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(source) = &item.source {
        lines.push(Line::from(Span::styled(
            source.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(mins) = item.reading_time() {
        let meta = match item.skim_time() {
            Some(skim) => format!("{} min read · {} min skim", mins, skim),
            None => format!("{} min read", mins),
        };
        lines.push(Line::from(meta));
    }
    if let Some(difficulty) = item.difficulty {
        lines.push(Line::from(format!("Difficulty: {}", difficulty.as_str())));
    }
    lines.push(Line::from(format!(
        "Saved: {}",
        item.saved_at.format("%Y-%m-%d %H:%M")
    )));

    if let Some(points) = item.summary.as_deref().filter(|s| !s.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "TL;DR:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for point in points {
            lines.push(Line::from(format!("  - {}", point)));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_reading(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let title = app
        .active_item
        .as_ref()
        .map(|item| item.display_title().to_string())
        .unwrap_or_else(|| "Reading".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(item) = &app.active_item else {
        frame.render_widget(
            Paragraph::new(MISSING_ITEM_MESSAGE).wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let body = item
        .content
        .as_deref()
        .unwrap_or("No text was extracted for this article. Press 'o' to open it in your browser.");

    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((app.reading_scroll, 0)),
        inner,
    );
}

fn render_reflection(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("One quick question");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from("Was this article worth your time?"),
        Line::from(""),
    ];
    match app.rating {
        None => {
            lines.push(Line::from("  [y] yes    [n] no"));
        }
        Some(worth_it) => {
            lines.push(Line::from(format!(
                "  {}",
                if worth_it { "Yes, worth it" } else { "No, not really" }
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Add a note (optional), then press Enter:"));
            lines.push(Line::from(Span::styled(
                format!("> {}", app.note),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_list(frame: &mut Frame, app: &mut TuiApp, area: Rect, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let message = match app.screen {
            Screen::TodaysReads => "Nothing queued for today. Save something worth reading!",
            _ => "No saved items yet. Press 'a' to save your first link.",
        };
        frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), inner);
        return;
    }

    let rows: Vec<ListItem> = app.items.iter().map(list_entry).collect();
    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn list_entry(item: &Item) -> ListItem<'_> {
    let marker = if item.is_done() { "  " } else { "● " };
    let time = item
        .reading_time()
        .map(|mins| format!("{:>2} min", mins))
        .unwrap_or_else(|| "      ".to_string());

    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{}  ", item.saved_at.format("%b %d")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!("{}  ", time)),
        Span::raw(item.display_title().to_string()),
    ]))
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let hints = match app.screen {
        Screen::Save => "Enter save · Esc today's reads · Ctrl-C quit",
        Screen::Processing => "a save another · t today's reads · q quit",
        Screen::Preview => "Enter read · o open in browser · Esc back · q quit",
        Screen::Reading => "j/k scroll · r done reading · s skimmed it · o browser · Esc back",
        Screen::Reflection => "y/n rate · Enter submit · Esc skip",
        Screen::TodaysReads | Screen::Library => {
            "j/k move · Enter open · a save · t today · l library · q quit"
        }
    };

    let text = match &app.status_message {
        Some(message) => format!(" {}  |  {}", message, hints),
        None => format!(" {}", hints),
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered_text(app: &mut TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_processing_screen_shows_check_count() {
        let mut app = TuiApp::new();
        app.enter(Screen::Processing);
        assert!(!rendered_text(&mut app).contains("(check"));

        app.poll_attempts = 4;
        assert!(rendered_text(&mut app).contains("(check 4)"));
    }

    #[test]
    fn test_preview_without_item_shows_missing_message() {
        let mut app = TuiApp::new();
        app.enter(Screen::Preview);

        let text = rendered_text(&mut app);
        assert!(text.contains("save a link first"));
    }
}
