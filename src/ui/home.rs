use crate::app::App;
use crate::ui::key_span;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let mut text = Text::default();

    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("Explore {} Nations", app.countries.len()),
        Style::default().fg(Color::Cyan),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Master the World's Flags",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "An interactive journey across continents. Learn capitals, currencies, and flags.",
        Style::default().fg(Color::Gray),
    )));
    text.push_line(Line::from(""));

    if app.countries.is_empty() {
        text.push_line(Line::from(Span::styled(
            "No country data available right now. Check your connection and restart.",
            Style::default().fg(Color::Yellow),
        )));
        text.push_line(Line::from(""));
    }

    let entries = [
        ("q", "Global Quiz", "Identify currencies, capitals, and flags under pressure."),
        ("l", "Explore Database", "Detailed profiles and AI-driven fun facts."),
        ("f", "Study Flags", "Flip through every flag in a full-screen gallery."),
    ];
    for (key, title, desc) in entries {
        text.push_line(Line::from(vec![
            key_span(key),
            Span::from("  "),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        text.push_line(Line::from(Span::styled(
            format!("   {}", desc),
            Style::default().fg(Color::DarkGray),
        )));
        text.push_line(Line::from(""));
    }

    let home = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(home, area);
}
