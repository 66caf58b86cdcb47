//! UI rendering using ratatui
//!
//! One screen: header, board row with cursor, rack, word and rule
//! indicators, scores, feedback and a key legend.

use crate::app::{PlayScreen, SessionView};
use crate::game::board::{Bonus, Square};
use crate::game::Tile;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Render the play screen
pub fn render(frame: &mut Frame, screen: &PlayScreen) {
    let view = screen.session.view();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Board + cursor
            Constraint::Length(3), // Rack
            Constraint::Length(5), // Word + rules
            Constraint::Length(1), // Feedback
            Constraint::Min(0),    // Remaining space
            Constraint::Length(1), // Footer
        ])
        .margin(1)
        .split(area);

    render_header(frame, layout[0], &view);
    render_board(frame, layout[1], &view.squares, screen.cursor);
    render_rack(frame, layout[2], &view.rack);
    render_rules(frame, layout[3], &view);

    let (text, color) = format_feedback(&screen.feedback, view.notice.as_deref());
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)),
        layout[4],
    );

    let footer = Paragraph::new(
        "←→ Move  A-Z/1-7 Place  Bksp Return  Enter Next word  Ctrl+R Start over  Esc Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[6]);
}

/// Header: title, scores, tiles left in the bag
fn render_header(frame: &mut Frame, area: Rect, view: &SessionView) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("TILEROW").style(Style::default().fg(Color::Yellow).bold()),
        columns[0],
    );

    let scores = format!("Score: {}   Best: {}", view.current_score, view.highest_score);
    frame.render_widget(
        Paragraph::new(scores)
            .style(Style::default().fg(Color::Magenta).bold())
            .alignment(Alignment::Center),
        columns[1],
    );

    frame.render_widget(
        Paragraph::new(format!("Bag: {}", view.remaining_tiles))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Right),
        columns[2],
    );
}

/// Board row with a caret under the cursor square
fn render_board(frame: &mut Frame, area: Rect, squares: &[Square], cursor: usize) {
    let cells: Vec<Span> = squares.iter().map(square_span).collect();
    let caret: String = (0..squares.len())
        .map(|i| if i == cursor { "  ^  " } else { "     " })
        .collect();

    let lines = vec![
        Line::from(cells),
        Line::from(Span::styled(caret, Style::default().fg(Color::Yellow))),
    ];
    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).title("Board"));
    frame.render_widget(board, area);
}

fn square_span(square: &Square) -> Span<'static> {
    let color = bonus_color(square.bonus);
    match square.occupant {
        Some(tile) => Span::styled(
            format_tile(&tile),
            Style::default().fg(Color::Black).bg(color).bold(),
        ),
        None => Span::styled(
            format!("[{:>3}]", bonus_label(square.bonus)),
            Style::default().fg(color),
        ),
    }
}

fn render_rack(frame: &mut Frame, area: Rect, rack: &[Tile]) {
    let text = if rack.is_empty() {
        "(empty)".to_string()
    } else {
        rack.iter()
            .enumerate()
            .map(|(slot, tile)| format!("{}:{}", slot + 1, format_tile(tile)))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).title("Rack"));
    frame.render_widget(widget, area);
}

/// Current word and the three rule indicators
fn render_rules(frame: &mut Frame, area: Rect, view: &SessionView) {
    let mut lines = vec![Line::from(Span::styled(
        format!("Word: {}", view.word),
        Style::default().fg(Color::White).bold(),
    ))];

    for (i, (label, ok)) in view.report.rules().into_iter().enumerate() {
        // The dictionary answer may still be on its way
        let pending = i == 2 && view.lookup_pending;
        let (mark, color) = if pending {
            ("…", Color::DarkGray)
        } else if ok {
            ("✔", Color::Green)
        } else {
            ("✘", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), Style::default().fg(color).bold()),
            Span::raw(label),
        ]));
    }

    let advance = if view.advance_enabled {
        Span::styled("  [ Enter: next word ]", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("  [ next word ]", Style::default().fg(Color::DarkGray))
    };
    lines[0].spans.push(advance);

    frame.render_widget(Paragraph::new(lines), area);
}

fn format_tile(tile: &Tile) -> String {
    format!("[{}{:>2}]", tile.letter, tile.value)
}

fn bonus_label(bonus: Bonus) -> &'static str {
    match bonus {
        Bonus::Plain => "",
        Bonus::DoubleLetter => "DL",
        Bonus::DoubleWord => "DW",
    }
}

fn bonus_color(bonus: Bonus) -> Color {
    match bonus {
        Bonus::Plain => Color::Gray,
        Bonus::DoubleLetter => Color::LightBlue,
        Bonus::DoubleWord => Color::LightRed,
    }
}

/// Feedback line; the bag notice wins when there is no fresher message
fn format_feedback(feedback: &str, notice: Option<&str>) -> (String, Color) {
    if feedback.is_empty() {
        return match notice {
            Some(notice) => (notice.to_string(), Color::Yellow),
            None => (String::new(), Color::White),
        };
    }

    let color = if feedback.starts_with("OK") {
        Color::Green
    } else if feedback.starts_with("CLANK") || feedback.starts_with("No ") {
        Color::Red
    } else {
        Color::Yellow
    };
    (feedback.to_string(), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{GameSession, SessionOptions};
    use crate::game::dictionary::WordList;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn rendered(screen: &PlayScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_board_and_scores() {
        let session = GameSession::new(SessionOptions {
            dictionary: Arc::new(WordList::default()),
            seed: Some(2),
            ..SessionOptions::default()
        });
        let screen = PlayScreen::new(session);
        let text = rendered(&screen);

        assert!(text.contains("TILEROW"));
        assert!(text.contains("Score: 0   Best: 0"));
        assert!(text.contains("Bag: 91"));
        assert!(text.contains("[ DL]"));
        assert!(text.contains("[ DW]"));
        assert!(text.contains("Word: ------------"));
        assert!(text.contains("Found in dictionary"));
    }

    #[test]
    fn test_format_tile() {
        assert_eq!(format_tile(&Tile::new('Q', 10)), "[Q10]");
        assert_eq!(format_tile(&Tile::new('A', 1)), "[A 1]");
    }

    #[test]
    fn test_feedback_colors() {
        assert_eq!(format_feedback("OK +8", None).1, Color::Green);
        assert_eq!(format_feedback("CLANK: square 3", None).1, Color::Red);
        assert_eq!(
            format_feedback("", Some("No more tiles left in the bag!")),
            ("No more tiles left in the bag!".to_string(), Color::Yellow)
        );
        assert_eq!(format_feedback("", None), (String::new(), Color::White));
    }
}
