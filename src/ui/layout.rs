use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct LearnLayout {
    pub search_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
}

pub struct QuizLayout {
    pub stats_area: Rect,
    pub progress_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub hint_area: Rect,
}

pub fn calculate_app_chunks(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    AppLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_learn_chunks(area: Rect) -> LearnLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    LearnLayout {
        search_area: left[0],
        list_area: left[1],
        detail_area: columns[1],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    QuizLayout {
        stats_area: chunks[0],
        progress_area: chunks[1],
        question_area: chunks[2],
        options_area: chunks[3],
        hint_area: chunks[4],
    }
}

/// A `width` x `height` box centred in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout() {
        let layout = calculate_app_chunks(Rect::new(0, 0, 100, 40));

        // Margin 1 leaves 38 rows: 3 header, 3 help, the rest for the body
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.body_area.height, 32);
        assert_eq!(layout.header_area.width, 98);
    }

    #[test]
    fn test_learn_layout() {
        let layout = calculate_learn_chunks(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.search_area.height, 3);
        assert_eq!(layout.list_area.height, 27);
        assert_eq!(layout.search_area.width, 45);
        assert_eq!(layout.detail_area.width, 55);
        assert_eq!(layout.detail_area.x, 45);
    }

    #[test]
    fn test_quiz_layout() {
        let layout = calculate_quiz_chunks(Rect::new(0, 0, 80, 30));

        assert_eq!(layout.stats_area.height, 3);
        assert_eq!(layout.progress_area.height, 1);
        assert_eq!(layout.options_area.height, 6);
        assert_eq!(layout.hint_area.height, 1);
        assert_eq!(layout.question_area.height, 19);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));

        // Larger than the area gets clipped
        let small = Rect::new(10, 5, 20, 8);
        assert_eq!(centered_rect(50, 10, small), small);
    }
}
