use crate::app::App;
use crate::models::Country;
use crate::ui::layout::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_study(f: &mut Frame, app: &App, area: Rect) {
    let Some(country) = app.study_current() else {
        draw_empty(f, area);
        return;
    };

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        format!(
            "{}  ·  {} of {}",
            country.region,
            app.study.index + 1,
            app.countries.len()
        ),
        Style::default().fg(Color::DarkGray),
    )));
    text.push_line(Line::from(""));
    text.extend(flag_card(country));
    text.push_line(Line::from(""));

    let label = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    text.push_line(Line::from(vec![
        Span::styled("Capital  ", label),
        Span::from(country.primary_capital().unwrap_or("-").to_string()),
    ]));
    text.push_line(Line::from(vec![
        Span::styled("Currency  ", label),
        Span::from(country.primary_currency_name().unwrap_or("-").to_string()),
    ]));
    text.push_line(Line::from(vec![
        Span::styled("Subregion  ", label),
        Span::from(country.subregion.clone()),
    ]));

    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Flag Study"));
    f.render_widget(card, area);
}

pub fn draw_fullscreen(f: &mut Frame, app: &App, area: Rect) {
    let Some(country) = app.study_current() else {
        draw_empty(f, area);
        return;
    };

    let mut text = flag_card(country);
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::from(" browse  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::from(" exit full screen"),
    ]));

    let inner = centered_rect(area.width.saturating_sub(4), 9, area);
    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card, inner);
}

fn flag_card(country: &Country) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        country.flag_emoji(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(Span::styled(
        country.common_name().to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    if !country.flags.alt.is_empty() {
        text.push_line(Line::from(Span::styled(
            country.flags.alt.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    text
}

fn draw_empty(f: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No flags to study yet.")
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(empty, area);
}
