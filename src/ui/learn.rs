use crate::app::App;
use crate::countries::format_population;
use crate::models::Country;
use crate::ui::layout::calculate_learn_chunks;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn draw_learn(f: &mut Frame, app: &App, area: Rect) {
    let layout = calculate_learn_chunks(area);
    let results = app.learn.results(&app.countries);

    let search_style = if app.learn.searching {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_text = if app.learn.search.is_empty() && !app.learn.searching {
        Span::styled(
            "Search by name or capital...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::from(app.learn.search.as_str())
    };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title("World Database"),
    );
    f.render_widget(search, layout.search_area);
    if app.learn.searching {
        let x = layout.search_area.x + 1 + app.learn.search.width() as u16;
        let max_x = layout.search_area.right().saturating_sub(2);
        f.set_cursor_position((x.min(max_x), layout.search_area.y + 1));
    }

    let name_width = (layout.list_area.width as usize).saturating_sub(6).max(4);
    let items: Vec<ListItem> = if results.is_empty() {
        let message = if app.countries.is_empty() {
            "No countries loaded"
        } else {
            "No matches"
        };
        vec![ListItem::new(message).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        results.iter().map(|c| country_item(c, name_width)).collect()
    };

    let mut state = ListState::default();
    if !results.is_empty() {
        state.select(Some(app.learn.cursor.min(results.len() - 1)));
    }
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} countries", results.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, layout.list_area, &mut state);

    draw_detail(f, app, layout.detail_area);
}

fn country_item(country: &Country, width: usize) -> ListItem<'static> {
    let capital = country.primary_capital().unwrap_or("-");
    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::from(format!("{} ", country.flag_emoji())),
            Span::styled(
                truncate_string(country.common_name(), width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            truncate_string(
                &format!("   {} · {}", capital, format_population(country.population)),
                width + 3,
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(country) = &app.learn.selected else {
        let hint = Paragraph::new("Discover every nation's profile. Press Enter on a country.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, area);
        return;
    };

    let label = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let mut text = Text::default();

    text.push_line(Line::from(Span::styled(
        format!("{} {}", country.flag_emoji(), country.common_name()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(Span::styled(
        country.name.official.clone(),
        Style::default().fg(Color::Gray),
    )));
    text.push_line(Line::from(""));

    text.push_line(Line::from(vec![
        Span::styled("Capital     ", label),
        Span::from(country.primary_capital().unwrap_or("-").to_string()),
    ]));
    text.push_line(Line::from(vec![
        Span::styled("Population  ", label),
        Span::from(format_population(country.population)),
    ]));
    let currency = country
        .primary_currency()
        .map(|c| format!("{} ({})", c.name, c.symbol))
        .unwrap_or_else(|| "-".to_string());
    text.push_line(Line::from(vec![
        Span::styled("Currency    ", label),
        Span::from(currency),
    ]));
    text.push_line(Line::from(vec![
        Span::styled("Region      ", label),
        Span::from(format!("{} / {}", country.region, country.subregion)),
    ]));
    if !country.flags.png.is_empty() {
        text.push_line(Line::from(vec![
            Span::styled("Flag        ", label),
            Span::styled(country.flags.png.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    text.push_line(Line::from(""));

    text.push_line(Line::from(Span::styled(
        "✨ AI INSIGHT",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));
    let insight = match (&app.learn.fact, app.learn.fact_loading) {
        (Some(fact), _) => Span::styled(
            format!("\"{}\"", fact),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        (None, true) => Span::styled(
            "Consulting the atlas...",
            Style::default().fg(Color::DarkGray),
        ),
        (None, false) => Span::from(""),
    };
    text.push_line(Line::from(insight));

    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(detail, area);
}
