use crate::error::QuizError;
use crate::models::Country;
use crate::quiz::QuizConfig;
use rand::Rng;
use rand::seq::SliceRandom;

pub const MIN_COUNTRIES: usize = 4;
pub const OPTIONS_PER_QUESTION: usize = 4;
const DISTRACTORS: usize = OPTIONS_PER_QUESTION - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Capital,
    Currency,
    Flag,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Capital,
        QuestionKind::Currency,
        QuestionKind::Flag,
    ];
    pub const TEXT_ONLY: [QuestionKind; 2] = [QuestionKind::Capital, QuestionKind::Currency];

    /// The value this kind of question asks about for `country`.
    pub fn answer_for(&self, country: &Country) -> Option<String> {
        let value = match self {
            QuestionKind::Capital => country.primary_capital(),
            QuestionKind::Currency => country.primary_currency_name(),
            QuestionKind::Flag => Some(country.common_name()).filter(|n| !n.trim().is_empty()),
        };
        value.map(str::to_string)
    }

    pub fn category(&self) -> &'static str {
        match self {
            QuestionKind::Capital => "Geography Trivia",
            QuestionKind::Currency => "Economic Trivia",
            QuestionKind::Flag => "Visual Identification",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            QuestionKind::Capital => "Identify the official capital city",
            QuestionKind::Currency => "Identify the national currency",
            QuestionKind::Flag => "Identify the correct nation below",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub country: Country,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

/// Build `config.total_questions()` questions from `countries`.
///
/// Shapes outside `QuizConfig::MAX_LEVELS` and `QuizConfig::MAX_QUESTIONS_PER_LEVEL`
/// are rejected before anything is allocated.
///
/// Countries are drawn from a shuffled pool, wrapping around when the pool is
/// smaller than the question count so repeats are spread out.
pub fn generate_questions<R: Rng + ?Sized>(
    countries: &[Country],
    config: QuizConfig,
    rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
    let insufficient = || QuizError::InsufficientData {
        available: countries.len(),
        required: MIN_COUNTRIES,
    };

    if countries.len() < MIN_COUNTRIES {
        return Err(insufficient());
    }

    let total = match config.total_questions() {
        Some(total) if config.is_within_limits() => total,
        _ => {
            return Err(QuizError::UnsupportedSize {
                levels: config.levels,
                questions_per_level: config.questions_per_level,
            });
        }
    };
    let kinds: &[QuestionKind] = if config.flag_questions {
        &QuestionKind::ALL
    } else {
        &QuestionKind::TEXT_ONLY
    };

    let mut pool: Vec<&Country> = countries.iter().collect();
    pool.shuffle(rng);

    let mut questions = Vec::with_capacity(total);

    for index in 0..total {
        let country = pool[index % pool.len()];
        let kind = *kinds.choose(rng).ok_or_else(insufficient)?;
        let question = build_question(index, country, kind, countries, config.flag_questions, rng)
            .ok_or_else(insufficient)?;
        questions.push(question);
    }

    tracing::info!(
        "Generated {} questions from {} countries",
        questions.len(),
        countries.len()
    );
    Ok(questions)
}

struct Draft {
    question: Question,
    distinct: bool,
}

/// Prefer a draft with distinct distractors, retrying as a flag question (or a
/// capital question when flags are off) if the chosen kind cannot supply them.
fn build_question<R: Rng + ?Sized>(
    index: usize,
    country: &Country,
    kind: QuestionKind,
    countries: &[Country],
    allow_flag: bool,
    rng: &mut R,
) -> Option<Question> {
    let fallback = if allow_flag {
        QuestionKind::Flag
    } else {
        QuestionKind::Capital
    };

    let first = draft(index, country, kind, countries, rng);
    if matches!(&first, Some(d) if d.distinct) || kind == fallback {
        return first.map(|d| d.question);
    }

    let retry = draft(index, country, fallback, countries, rng);
    match (first, retry) {
        (_, Some(retry)) if retry.distinct => Some(retry.question),
        (Some(original), _) => Some(original.question),
        (None, retry) => retry.map(|d| d.question),
    }
}

fn draft<R: Rng + ?Sized>(
    index: usize,
    country: &Country,
    kind: QuestionKind,
    countries: &[Country],
    rng: &mut R,
) -> Option<Draft> {
    let correct_answer = kind.answer_for(country)?;

    let mut candidates: Vec<String> = countries
        .iter()
        .filter(|c| c.common_name() != country.common_name())
        .filter_map(|c| kind.answer_for(c))
        .filter(|value| *value != correct_answer)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.shuffle(rng);

    let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTORS);
    for value in &candidates {
        if distractors.len() == DISTRACTORS {
            break;
        }
        if !distractors.contains(value) {
            distractors.push(value.clone());
        }
    }
    let distinct = distractors.len() == DISTRACTORS;

    // Known limitation: thin data repeats distractors rather than failing
    let mut refill = candidates.iter().cycle();
    while distractors.len() < DISTRACTORS {
        distractors.push(refill.next()?.clone());
    }

    let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
    options.push(correct_answer.clone());
    options.extend(distractors);
    options.shuffle(rng);

    Some(Draft {
        question: Question {
            id: format!("q-{}", index),
            kind,
            country: country.clone(),
            options,
            correct_answer,
        },
        distinct,
    })
}
