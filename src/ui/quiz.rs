use crate::app::App;
use crate::quiz::{QuestionKind, QuizState};
use crate::ui::layout::{calculate_quiz_chunks, centered_rect};
use crate::ui::{key_span, push_hint};
use crate::utils::{performance_label, truncate_string};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub fn draw_quiz(f: &mut Frame, app: &App, area: Rect) {
    let Some(quiz) = &app.quiz else {
        draw_unavailable(f, app, area);
        return;
    };
    let state = quiz.state();

    if state.show_level_up() {
        draw_level_up(f, state, area);
    } else if state.is_finished() {
        draw_finished(f, state, area);
    } else {
        draw_question(f, state, app.sound.is_enabled(), area);
    }
}

pub(crate) fn push_help(app: &App, spans: &mut Vec<Span<'static>>) {
    let Some(quiz) = &app.quiz else {
        push_hint(spans, "Enter", " Retry  ");
        return;
    };
    let state = quiz.state();

    if state.show_level_up() {
        push_hint(spans, "Enter", " Next Level  ");
    } else if state.is_finished() {
        push_hint(spans, "n", " New Journey  ");
    } else if state.selection().is_some() {
        push_hint(spans, "Enter", " Continue  ");
    } else {
        push_hint(spans, "1-4", " Answer  ");
    }
    push_hint(spans, "m", " Sound  ");
    push_hint(spans, "Esc", " Home  ");
}

fn draw_unavailable(f: &mut Frame, app: &App, area: Rect) {
    let message = app
        .quiz_error
        .clone()
        .unwrap_or_else(|| "No quiz content available.".to_string());
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "The quiz cannot start yet",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message),
    ];
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_question(f: &mut Frame, state: &QuizState, sound_on: bool, area: Rect) {
    let Some(question) = state.current_question() else {
        return;
    };
    let layout = calculate_quiz_chunks(area);

    let mut stats = vec![
        Span::styled(
            format!(" LVL {} ", state.level()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::styled(
            format!("  Step {} / {}", state.step_in_level(), state.questions_per_level()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::from("    "),
    ];
    if state.combo() > 1 {
        stats.push(Span::styled(
            format!("⚡ {}x Streak  ", state.combo()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    stats.push(Span::styled(
        if sound_on { "🔊  " } else { "🔇  " },
        Style::default().fg(Color::Gray),
    ));
    stats.push(Span::styled(
        format!("🏆 {}", state.score()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let stats_bar = Paragraph::new(Line::from(stats)).block(Block::default().borders(Borders::ALL));
    f.render_widget(stats_bar, layout.stats_area);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(state.step_in_level() as f64 / state.questions_per_level() as f64)
        .label("");
    f.render_widget(progress, layout.progress_area);

    let border_color = match state.selection() {
        Some(s) if s.correct => Color::Green,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    };

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.kind.category().to_uppercase(),
        Style::default().fg(Color::Gray),
    )));
    text.push_line(Line::from(""));
    let heading = match question.kind {
        QuestionKind::Flag => "Which country owns this flag?".to_string(),
        _ => question.country.common_name().to_string(),
    };
    text.push_line(Line::from(Span::styled(
        heading,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(Span::styled(
        question.kind.instruction(),
        Style::default().fg(Color::Gray),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(question.country.flag_emoji()));

    let question_panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(question_panel, layout.question_area);

    let selection = state.selection();
    let width = (layout.options_area.width as usize).saturating_sub(10).max(4);
    let options: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_correct = *option == question.correct_answer;
            let is_selected = selection.is_some_and(|s| s.answer == *option);
            let (marker, style) = match selection {
                None => ("", Style::default()),
                Some(_) if is_correct => (
                    "  ✓",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(_) if is_selected => (
                    "  ✗",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Some(_) => ("", Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![
                key_span(["1", "2", "3", "4"][i.min(3)]),
                Span::from("  "),
                Span::styled(format!("{}{}", truncate_string(option, width), marker), style),
            ])
        })
        .collect();
    let options_panel = Paragraph::new(options).block(Block::default().borders(Borders::ALL));
    f.render_widget(options_panel, layout.options_area);

    if selection.is_some() {
        let label = if state.is_last_in_level() {
            "FINISH LEVEL →"
        } else {
            "NEXT STEP →"
        };
        let hint = Paragraph::new(Line::from(vec![
            key_span("Enter"),
            Span::from(" "),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(hint, layout.hint_area);
    }
}

fn draw_level_up(f: &mut Frame, state: &QuizState, area: Rect) {
    let text = vec![
        Line::from("★ ★ ★ ★ ★"),
        Line::from(""),
        Line::from(Span::styled(
            "LEVEL UP",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Level {} Mastered!", state.level())),
        Line::from(""),
        Line::from(Span::styled(
            format!("⚡ Accuracy: {}%", state.level_accuracy()),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(vec![
            key_span("Enter"),
            Span::from(format!(" Begin Level {} →", state.level() + 1)),
        ]),
    ];

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, centered_rect(50, 12, area));
}

fn draw_finished(f: &mut Frame, state: &QuizState, area: Rect) {
    let accuracy = state.final_accuracy();
    let box_area = centered_rect(60, 16, area);

    let text = vec![
        Line::from(Span::styled(
            "🏆 WORLD EXPLORER",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Grand Quest Complete!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::from("Final Score: "),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(format!(" / {}", state.total_questions())),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Performance ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                performance_label(accuracy),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("    Accuracy ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}%", accuracy),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, box_area);

    // Accuracy bar and actions sit inside the bottom of the box
    let inner_width = box_area.width.saturating_sub(4);
    let bar_area = Rect::new(box_area.x + 2, box_area.y + 9, inner_width, 1);
    let actions_area = Rect::new(box_area.x + 2, box_area.y + 12, inner_width, 1);
    if box_area.height >= 14 {
        let bar = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(f64::from(accuracy.min(100)) / 100.0)
            .label("");
        f.render_widget(bar, bar_area);

        let actions = Paragraph::new(Line::from(vec![
            key_span("n"),
            Span::from(" New Journey    "),
            key_span("h"),
            Span::from(" Home Menu"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(actions, actions_area);
    }
}
