use crate::ai::FAILURE_FALLBACK;
use crate::audio::SoundToggle;
use crate::countries::search;
use crate::models::{AppMode, Country, FetchRequest, FetchResponse};
use crate::quiz::{QuizConfig, QuizController};
use crate::utils::wrap_index;
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::time::Instant;

/// Search box, result cursor and the country opened in the detail panel.
#[derive(Debug, Default)]
pub struct LearnState {
    pub search: String,
    pub searching: bool,
    pub cursor: usize,
    pub selected: Option<Country>,
    pub fact: Option<String>,
    pub fact_loading: bool,
}

impl LearnState {
    pub fn results<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        search(countries, &self.search)
    }

    /// Close the detail panel and forget any fact in flight.
    pub fn close_detail(&mut self) {
        self.selected = None;
        self.fact = None;
        self.fact_loading = false;
    }
}

#[derive(Debug, Default)]
pub struct StudyState {
    pub index: usize,
    pub fullscreen: bool,
}

pub struct App {
    pub mode: AppMode,
    pub loading: bool,
    pub countries: Arc<Vec<Country>>,
    pub learn: LearnState,
    pub study: StudyState,
    pub quiz: Option<QuizController>,
    pub quiz_error: Option<String>,
    pub sound: SoundToggle,
    pub should_quit: bool,
    quiz_config: QuizConfig,
    requests: Sender<FetchRequest>,
}

impl App {
    pub fn new(quiz_config: QuizConfig, sound: SoundToggle, requests: Sender<FetchRequest>) -> Self {
        Self {
            mode: AppMode::Home,
            loading: true,
            countries: Arc::new(Vec::new()),
            learn: LearnState::default(),
            study: StudyState::default(),
            quiz: None,
            quiz_error: None,
            sound,
            should_quit: false,
            quiz_config,
            requests,
        }
    }

    pub fn request_countries(&mut self) {
        self.loading = true;
        if self.requests.send(FetchRequest::LoadCountries).is_err() {
            tracing::error!("Fetch worker unavailable; continuing with no countries");
            self.set_countries(Vec::new());
        }
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) {
        tracing::info!("Catalog ready with {} countries", countries.len());
        self.countries = Arc::new(countries);
        self.loading = false;
        self.learn.cursor = 0;
        self.study.index = 0;
    }

    pub fn handle_response(&mut self, response: FetchResponse) {
        match response {
            FetchResponse::Countries(countries) => self.set_countries(countries),
            FetchResponse::Fact { country, text } => {
                let current = self.learn.selected.as_ref().map(|c| c.common_name());
                if current == Some(country.as_str()) {
                    self.learn.fact = Some(text);
                    self.learn.fact_loading = false;
                } else {
                    tracing::debug!("Discarding stale fact for {}", country);
                }
            }
        }
    }

    /// Switch screens. Entering Quiz builds a fresh session and leaving it
    /// drops the controller along with any pending auto-advance.
    pub fn set_mode(&mut self, mode: AppMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!("Mode {} -> {}", self.mode.title(), mode.title());

        if self.mode == AppMode::Quiz {
            self.quiz = None;
            self.quiz_error = None;
        }
        if self.mode == AppMode::Learn {
            self.learn.searching = false;
        }
        self.mode = mode;

        if mode == AppMode::Quiz {
            self.start_quiz();
        }
    }

    pub fn start_quiz(&mut self) {
        self.quiz = None;
        match QuizController::new(
            Arc::clone(&self.countries),
            self.quiz_config,
            Box::new(self.sound.clone()),
        ) {
            Ok(controller) => {
                self.quiz = Some(controller);
                self.quiz_error = None;
            }
            Err(e) => {
                tracing::warn!("Cannot start quiz: {}", e);
                self.quiz_error = Some(e.to_string());
            }
        }
    }

    /// "New Journey": regenerate the running session in place.
    pub fn restart_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            self.start_quiz();
            return;
        };
        if let Err(e) = quiz.restart() {
            tracing::warn!("Cannot restart quiz: {}", e);
            self.quiz_error = Some(e.to_string());
            self.quiz = None;
        }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound.toggle()
    }

    pub fn learn_move(&mut self, delta: isize) {
        let len = self.learn.results(&self.countries).len();
        if len == 0 {
            self.learn.cursor = 0;
            return;
        }
        let next = (self.learn.cursor as isize + delta).clamp(0, len as isize - 1);
        self.learn.cursor = next as usize;
    }

    pub fn learn_search_push(&mut self, c: char) {
        self.learn.search.push(c);
        self.learn.cursor = 0;
    }

    pub fn learn_search_pop(&mut self) {
        self.learn.search.pop();
        self.learn.cursor = 0;
    }

    /// Open the highlighted result and ask the worker for its fact.
    pub fn learn_open_selected(&mut self) {
        let Some(country) = self
            .learn
            .results(&self.countries)
            .get(self.learn.cursor)
            .map(|c| (*c).clone())
        else {
            return;
        };

        let name = country.common_name().to_string();
        self.learn.selected = Some(country);
        self.learn.fact = None;
        self.learn.fact_loading = true;

        if self
            .requests
            .send(FetchRequest::Fact {
                country: name.clone(),
            })
            .is_err()
        {
            tracing::error!("Fetch worker unavailable; no fact for {}", name);
            self.learn.fact = Some(FAILURE_FALLBACK.to_string());
            self.learn.fact_loading = false;
        }
    }

    pub fn study_step(&mut self, delta: isize) {
        self.study.index = wrap_index(self.study.index, delta, self.countries.len());
    }

    pub fn study_current(&self) -> Option<&Country> {
        self.countries.get(self.study.index)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.quiz.as_mut().is_some_and(|quiz| quiz.tick(now))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.quiz.as_ref().and_then(QuizController::next_deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordingFeedback, SilentFeedback};
    use crate::models::test_country;
    use crossbeam_channel::Receiver;

    fn sample() -> Vec<Country> {
        vec![
            test_country("France", "Paris", "Euro", "FR"),
            test_country("Germany", "Berlin", "Euro", "DE"),
            test_country("Japan", "Tokyo", "Japanese yen", "JP"),
            test_country("Peru", "Lima", "Peruvian sol", "PE"),
            test_country("Kenya", "Nairobi", "Kenyan shilling", "KE"),
        ]
    }

    fn app() -> (App, Receiver<FetchRequest>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sound = SoundToggle::new(Arc::new(SilentFeedback), true);
        let mut app = App::new(QuizConfig::default(), sound, tx);
        app.set_countries(sample());
        (app, rx)
    }

    #[test]
    fn test_countries_response_ends_loading() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut app = App::new(
            QuizConfig::default(),
            SoundToggle::new(Arc::new(SilentFeedback), true),
            tx,
        );
        app.request_countries();
        assert!(app.loading);
        assert_eq!(rx.try_recv().unwrap(), FetchRequest::LoadCountries);

        app.handle_response(FetchResponse::Countries(sample()));
        assert!(!app.loading);
        assert_eq!(app.countries.len(), 5);
    }

    #[test]
    fn test_entering_quiz_builds_session_and_leaving_drops_it() {
        let (mut app, _rx) = app();
        app.set_mode(AppMode::Quiz);
        assert!(app.quiz.is_some());
        assert!(app.quiz_error.is_none());

        app.set_mode(AppMode::Home);
        assert!(app.quiz.is_none());
        assert_eq!(app.next_deadline(), None);
    }

    #[test]
    fn test_leaving_quiz_discards_pending_advance() {
        let (mut app, _rx) = app();
        app.set_mode(AppMode::Quiz);
        let now = Instant::now();
        let answer = app
            .quiz
            .as_ref()
            .and_then(|q| q.state().current_question())
            .map(|q| q.correct_answer.clone())
            .unwrap();
        app.quiz.as_mut().unwrap().submit_answer(&answer, now);
        assert!(app.next_deadline().is_some());

        app.set_mode(AppMode::Study);
        assert!(!app.tick(now + std::time::Duration::from_secs(5)));
    }

    #[test]
    fn test_quiz_with_too_few_countries_reports_error() {
        let (mut app, _rx) = app();
        app.set_countries(sample()[..2].to_vec());
        app.set_mode(AppMode::Quiz);
        assert!(app.quiz.is_none());
        assert!(app.quiz_error.as_deref().unwrap().contains("Not enough countries"));
    }

    #[test]
    fn test_oversized_quiz_reports_error_instead_of_panicking() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let config = QuizConfig {
            levels: usize::MAX,
            ..QuizConfig::default()
        };
        let mut app = App::new(config, SoundToggle::new(Arc::new(SilentFeedback), true), tx);
        app.set_countries(sample());
        app.set_mode(AppMode::Quiz);
        assert!(app.quiz.is_none());
        assert!(app.quiz_error.as_deref().unwrap().contains("Unsupported quiz size"));
    }

    #[test]
    fn test_muted_quiz_emits_nothing() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let recorder = RecordingFeedback::default();
        let mut app = App::new(
            QuizConfig::default(),
            SoundToggle::new(Arc::new(recorder.clone()), true),
            tx,
        );
        app.set_countries(sample());
        app.set_mode(AppMode::Quiz);
        assert!(!app.toggle_sound());

        let quiz = app.quiz.as_mut().unwrap();
        let answer = quiz.state().current_question().unwrap().correct_answer.clone();
        quiz.submit_answer(&answer, Instant::now());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_open_country_requests_fact_and_ignores_stale_reply() {
        let (mut app, rx) = app();
        app.set_mode(AppMode::Learn);
        app.learn_move(1);
        app.learn_open_selected();

        assert_eq!(
            rx.try_recv().unwrap(),
            FetchRequest::Fact {
                country: "Germany".to_string()
            }
        );
        assert!(app.learn.fact_loading);

        app.handle_response(FetchResponse::Fact {
            country: "France".to_string(),
            text: "stale".to_string(),
        });
        assert!(app.learn.fact.is_none());
        assert!(app.learn.fact_loading);

        app.handle_response(FetchResponse::Fact {
            country: "Germany".to_string(),
            text: "Germany has over 1,500 beers.".to_string(),
        });
        assert_eq!(app.learn.fact.as_deref(), Some("Germany has over 1,500 beers."));
        assert!(!app.learn.fact_loading);
    }

    #[test]
    fn test_search_resets_cursor_and_clamps_movement() {
        let (mut app, _rx) = app();
        app.learn_move(10);
        assert_eq!(app.learn.cursor, 4);

        app.learn_search_push('p');
        assert_eq!(app.learn.cursor, 0);
        // Japan, Peru, and France through Paris
        assert_eq!(app.learn.results(&app.countries).len(), 3);
        app.learn_move(-3);
        assert_eq!(app.learn.cursor, 0);
    }

    #[test]
    fn test_study_carousel_wraps() {
        let (mut app, _rx) = app();
        app.study_step(-1);
        assert_eq!(app.study.index, 4);
        app.study_step(1);
        assert_eq!(app.study.index, 0);
        assert_eq!(app.study_current().map(|c| c.common_name()), Some("France"));
    }

    #[test]
    fn test_worker_gone_falls_back() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut app = App::new(
            QuizConfig::default(),
            SoundToggle::new(Arc::new(SilentFeedback), true),
            tx,
        );
        app.request_countries();
        assert!(!app.loading);
        assert!(app.countries.is_empty());
    }
}
