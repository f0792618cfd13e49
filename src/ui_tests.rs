#[cfg(test)]
mod ui_integration_tests {
    use crate::app::App;
    use crate::audio::{SilentFeedback, SoundToggle};
    use crate::input::handle_key;
    use crate::models::{AppMode, Country, FetchRequest, FetchResponse, test_country};
    use crate::quiz::{AUTO_ADVANCE_DELAY, QuizConfig};
    use crate::ui::draw;
    use crossbeam_channel::Receiver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::Instant;

    fn countries() -> Vec<Country> {
        vec![
            test_country("France", "Paris", "Euro", "FR"),
            test_country("Germany", "Berlin", "Euro", "DE"),
            test_country("Japan", "Tokyo", "Japanese yen", "JP"),
            test_country("Peru", "Lima", "Peruvian sol", "PE"),
            test_country("Kenya", "Nairobi", "Kenyan shilling", "KE"),
        ]
    }

    fn create_test_app(config: QuizConfig) -> (App, Receiver<FetchRequest>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sound = SoundToggle::new(Arc::new(SilentFeedback), true);
        let mut app = App::new(config, sound, tx);
        app.handle_response(FetchResponse::Countries(countries()));
        (app, rx)
    }

    fn small_quiz() -> QuizConfig {
        QuizConfig {
            levels: 2,
            questions_per_level: 2,
            ..QuizConfig::default()
        }
    }

    /// Render one frame and flatten the buffer into lines of text.
    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::empty()), now);
    }

    fn answer(app: &mut App, correct: bool, now: Instant) {
        let q = app.quiz.as_ref().unwrap().state().current_question().unwrap();
        let index = q
            .options
            .iter()
            .position(|o| (*o == q.correct_answer) == correct)
            .unwrap();
        press(app, KeyCode::Char((b'1' + index as u8) as char), now);
    }

    #[test]
    fn test_loading_screen() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let app = App::new(
            QuizConfig::default(),
            SoundToggle::new(Arc::new(SilentFeedback), true),
            tx,
        );
        let screen = render(&app);
        assert!(screen.contains("Mapping the world..."));
    }

    #[test]
    fn test_home_screen_shows_country_count_and_nav() {
        let (app, _rx) = create_test_app(QuizConfig::default());
        let screen = render(&app);

        assert!(screen.contains("Explore 5 Nations"));
        assert!(screen.contains("Global Quiz"));
        assert!(screen.contains("l Learn"));
        assert!(screen.contains("f Flags"));
        assert!(screen.contains("Ctrl+C"));
    }

    #[test]
    fn test_empty_catalog_is_no_content_not_error() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        app.handle_response(FetchResponse::Countries(Vec::new()));

        let screen = render(&app);
        assert!(screen.contains("Explore 0 Nations"));
        assert!(screen.contains("No country data available"));

        app.set_mode(AppMode::Learn);
        assert!(render(&app).contains("No countries loaded"));
        app.set_mode(AppMode::Study);
        assert!(render(&app).contains("No flags to study yet."));
    }

    #[test]
    fn test_learn_screen_with_detail_and_fact() {
        let (mut app, rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('l'), now);

        let screen = render(&app);
        assert!(screen.contains("Search by name or capital..."));
        assert!(screen.contains("5 countries"));

        // Open Peru (France, Germany, Japan, Peru)
        for _ in 0..3 {
            press(&mut app, KeyCode::Down, now);
        }
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(
            rx.try_recv().unwrap(),
            FetchRequest::Fact {
                country: "Peru".to_string()
            }
        );
        assert!(render(&app).contains("Consulting the atlas..."));

        app.handle_response(FetchResponse::Fact {
            country: "Peru".to_string(),
            text: "Peru has over 3,000 potato varieties.".to_string(),
        });
        let screen = render(&app);
        assert!(screen.contains("AI INSIGHT"));
        assert!(screen.contains("Peru has over 3,000 potato varieties."));
        assert!(screen.contains("Lima"));
        assert!(screen.contains("Peruvian sol ($)"));
        assert!(screen.contains("1.0M people"));
    }

    #[test]
    fn test_learn_search_filters_list() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('l'), now);
        press(&mut app, KeyCode::Char('/'), now);
        for c in "nairobi".chars() {
            press(&mut app, KeyCode::Char(c), now);
        }

        let screen = render(&app);
        assert!(screen.contains("1 countries"));
        assert!(screen.contains("Kenya"));
        assert!(!screen.contains("Germany"));
    }

    #[test]
    fn test_study_carousel_screen() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('f'), now);

        let screen = render(&app);
        assert!(screen.contains("1 of 5"));
        assert!(screen.contains("France"));
        assert!(screen.contains("Paris"));

        press(&mut app, KeyCode::Left, now);
        let screen = render(&app);
        assert!(screen.contains("5 of 5"));
        assert!(screen.contains("Nairobi"));

        press(&mut app, KeyCode::Enter, now);
        let screen = render(&app);
        assert!(screen.contains("Kenya"));
        assert!(screen.contains("exit full screen"));
        assert!(!screen.contains("5 of 5"));
    }

    #[test]
    fn test_quiz_question_and_feedback() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('q'), now);

        let screen = render(&app);
        assert!(screen.contains("LVL 1"));
        assert!(screen.contains("Step 1 / 5"));
        assert!(screen.contains("1-4"));
        assert!(!screen.contains("NEXT STEP"));
        let q = app.quiz.as_ref().unwrap().state().current_question().unwrap();
        for option in &q.options {
            assert!(screen.contains(option.as_str()), "missing option {}", option);
        }

        answer(&mut app, true, now);
        let screen = render(&app);
        assert!(screen.contains("NEXT STEP"));
        assert!(screen.contains("✓"));
        assert!(!screen.contains("Streak"));

        press(&mut app, KeyCode::Enter, now);
        answer(&mut app, true, now);
        let screen = render(&app);
        assert!(screen.contains("2x Streak"));
        assert!(screen.contains("Step 2 / 5"));
    }

    #[test]
    fn test_quiz_wrong_answer_marks_both_options() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('q'), now);

        answer(&mut app, false, now);
        let screen = render(&app);
        assert!(screen.contains("✓"));
        assert!(screen.contains("✗"));
    }

    #[test]
    fn test_level_up_and_finish_screens() {
        let (mut app, _rx) = create_test_app(small_quiz());
        let mut now = Instant::now();
        press(&mut app, KeyCode::Char('q'), now);

        answer(&mut app, true, now);
        press(&mut app, KeyCode::Enter, now);
        answer(&mut app, false, now);
        assert!(render(&app).contains("FINISH LEVEL"));

        now += AUTO_ADVANCE_DELAY;
        app.tick(now);
        let screen = render(&app);
        assert!(screen.contains("LEVEL UP"));
        assert!(screen.contains("Level 1 Mastered!"));
        assert!(screen.contains("Accuracy: 50%"));
        assert!(screen.contains("Begin Level 2"));

        press(&mut app, KeyCode::Enter, now);
        assert!(render(&app).contains("LVL 2"));

        for _ in 0..2 {
            answer(&mut app, true, now);
            press(&mut app, KeyCode::Enter, now);
        }
        let screen = render(&app);
        assert!(screen.contains("Grand Quest Complete!"));
        assert!(screen.contains("3 / 4"));
        assert!(screen.contains("75%"));
        assert!(screen.contains("Seasoned Traveler"));
        assert!(screen.contains("New Journey"));
    }

    #[test]
    fn test_sound_indicator_follows_toggle() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        let now = Instant::now();
        press(&mut app, KeyCode::Char('q'), now);
        assert!(render(&app).contains("🔊"));

        press(&mut app, KeyCode::Char('m'), now);
        assert!(render(&app).contains("🔇"));
    }

    #[test]
    fn test_quiz_unavailable_with_thin_catalog() {
        let (mut app, _rx) = create_test_app(QuizConfig::default());
        app.handle_response(FetchResponse::Countries(countries()[..2].to_vec()));
        press(&mut app, KeyCode::Char('q'), Instant::now());

        let screen = render(&app);
        assert!(screen.contains("The quiz cannot start yet"));
        assert!(screen.contains("Not enough countries"));
        assert!(screen.contains("Retry"));
    }
}
