pub mod layout;
mod home;
mod learn;
mod quiz;
mod study;

pub use layout::{
    calculate_app_chunks, calculate_learn_chunks, calculate_quiz_chunks, centered_rect,
};

use crate::app::App;
use crate::models::AppMode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const NAV: [(char, AppMode); 4] = [
    ('h', AppMode::Home),
    ('l', AppMode::Learn),
    ('f', AppMode::Study),
    ('q', AppMode::Quiz),
];

pub fn draw(f: &mut Frame, app: &App) {
    if app.loading {
        draw_loading(f);
        return;
    }

    // Full-screen flag study hides the chrome
    if app.mode == AppMode::Study && app.study.fullscreen {
        study::draw_fullscreen(f, app, f.area());
        return;
    }

    let layout = calculate_app_chunks(f.area());
    draw_header(f, app.mode, layout.header_area);

    match app.mode {
        AppMode::Home => home::draw_home(f, app, layout.body_area),
        AppMode::Learn => learn::draw_learn(f, app, layout.body_area),
        AppMode::Study => study::draw_study(f, app, layout.body_area),
        AppMode::Quiz => quiz::draw_quiz(f, app, layout.body_area),
    }

    draw_help(f, app, layout.help_area);
}

pub fn draw_loading(f: &mut Frame) {
    let area = centered_rect(40, 5, f.area());
    let loading = Paragraph::new(vec![
        Line::from("🌍"),
        Line::from(Span::styled(
            "Mapping the world...",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

fn draw_header(f: &mut Frame, mode: AppMode, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "🌍 Global",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Explorer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("    "),
    ];

    for (key, target) in NAV {
        let style = if target == mode {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", key, target.title()), style));
        spans.push(Span::from(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub(crate) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub(crate) fn push_hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    spans.push(key_span(key));
    spans.push(Span::from(label));
}

fn help_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();

    match app.mode {
        AppMode::Home => {
            push_hint(&mut spans, "Enter", " Start Quiz  ");
            push_hint(&mut spans, "/", " Search  ");
        }
        AppMode::Learn if app.learn.searching => {
            push_hint(&mut spans, "Type", " to filter  ");
            push_hint(&mut spans, "Enter/Esc", " Done  ");
            return Line::from(spans);
        }
        AppMode::Learn => {
            push_hint(&mut spans, "↑/↓", " Browse  ");
            push_hint(&mut spans, "Enter", " Details  ");
            push_hint(&mut spans, "/", " Search  ");
            push_hint(&mut spans, "Esc", " Back  ");
        }
        AppMode::Study => {
            push_hint(&mut spans, "←/→", " Prev/Next  ");
            push_hint(&mut spans, "Enter", " Full Screen  ");
        }
        AppMode::Quiz => quiz::push_help(app, &mut spans),
    }
    push_hint(&mut spans, "h/l/f/q", " Navigate  ");
    push_hint(&mut spans, "Ctrl+C", " Quit");
    Line::from(spans)
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let help = Paragraph::new(help_line(app))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
