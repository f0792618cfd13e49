use crate::app::App;
use crate::models::AppMode;
use crate::quiz::QuizPhase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if app.loading {
        return;
    }

    // The search box swallows everything, nav letters included
    if app.mode == AppMode::Learn && app.learn.searching {
        handle_search_input(app, key);
        return;
    }

    let nav = match key.code {
        KeyCode::Char('h') => Some(AppMode::Home),
        KeyCode::Char('l') => Some(AppMode::Learn),
        KeyCode::Char('f') => Some(AppMode::Study),
        KeyCode::Char('q') => Some(AppMode::Quiz),
        _ => None,
    };
    if let Some(mode) = nav {
        app.set_mode(mode);
        return;
    }

    match app.mode {
        AppMode::Home => handle_home_input(app, key),
        AppMode::Learn => handle_learn_input(app, key),
        AppMode::Study => handle_study_input(app, key),
        AppMode::Quiz => handle_quiz_input(app, key, now),
    }
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.set_mode(AppMode::Quiz),
        KeyCode::Char('/') => {
            app.set_mode(AppMode::Learn);
            app.learn.searching = true;
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Down => app.learn.searching = false,
        KeyCode::Backspace => app.learn_search_pop(),
        KeyCode::Char(c) => app.learn_search_push(c),
        _ => {}
    }
}

fn handle_learn_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.learn.searching = true,
        KeyCode::Down | KeyCode::Char('j') => app.learn_move(1),
        KeyCode::Up | KeyCode::Char('k') => app.learn_move(-1),
        KeyCode::PageDown => app.learn_move(10),
        KeyCode::PageUp => app.learn_move(-10),
        KeyCode::Enter => app.learn_open_selected(),
        KeyCode::Esc => {
            if app.learn.selected.is_some() {
                app.learn.close_detail();
            } else {
                app.set_mode(AppMode::Home);
            }
        }
        _ => {}
    }
}

fn handle_study_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('n') => app.study_step(1),
        KeyCode::Left | KeyCode::Char('p') => app.study_step(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.study.fullscreen = !app.study.fullscreen,
        KeyCode::Esc => {
            if app.study.fullscreen {
                app.study.fullscreen = false;
            } else {
                app.set_mode(AppMode::Home);
            }
        }
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => {
            app.set_mode(AppMode::Home);
            return;
        }
        KeyCode::Char('m') => {
            app.toggle_sound();
            return;
        }
        _ => {}
    }

    // Quiz could not start; let the player retry once data is there
    if app.quiz.is_none() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('r')) {
            app.start_quiz();
        }
        return;
    }
    let Some(quiz) = app.quiz.as_mut() else {
        return;
    };

    match quiz.state().phase().clone() {
        QuizPhase::Answering { selection: None } => {
            if let KeyCode::Char(c @ '1'..='4') = key.code {
                let index = (c as u8 - b'1') as usize;
                let option = quiz
                    .state()
                    .current_question()
                    .and_then(|q| q.options.get(index))
                    .cloned();
                if let Some(option) = option {
                    quiz.submit_answer(&option, now);
                }
            }
        }
        QuizPhase::Answering { selection: Some(_) } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ')) {
                quiz.advance();
            }
        }
        QuizPhase::LevelComplete => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                quiz.acknowledge_level();
            }
        }
        QuizPhase::Finished => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('n')) {
                app.restart_quiz();
            }
        }
    }
}
