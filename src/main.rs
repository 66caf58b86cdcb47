//! TILEROW - one row of Scrabble in the terminal

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::error::Error;
use std::time::{Duration, Instant};
use tilerow::app::{GameSession, PlayScreen};
use tilerow::config::Config;
use tilerow::{logging, tui};

fn main() -> Result<(), Box<dyn Error>> {
    // Configuration errors are reported before the terminal is touched
    let config = Config::from_env()?;
    let _logger = logging::init(&config)?;
    log::info!("starting with {:?}", config);

    let mut screen = PlayScreen::new(GameSession::new(config.session_options()));

    let mut terminal = tui::Tui::new()?;
    terminal.enter()?;

    // Short tick so dictionary answers show up promptly
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &screen))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    match key.code {
                        KeyCode::Esc => screen.quit(),
                        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => screen.on_start_over(),
                        KeyCode::Char('c') if ctrl => screen.quit(),
                        KeyCode::Left => screen.cursor_left(),
                        KeyCode::Right => screen.cursor_right(),
                        KeyCode::Enter => screen.on_enter(),
                        KeyCode::Backspace | KeyCode::Delete => screen.on_backspace(),
                        KeyCode::Char(c) if c.is_ascii_alphabetic() => screen.on_letter(c),
                        KeyCode::Char(c @ '1'..='9') => {
                            screen.place_slot(c as usize - '1' as usize);
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            screen.poll();
            last_tick = Instant::now();
        }

        if screen.should_quit {
            break;
        }
    }

    log::info!("quitting, best score {}", screen.session.highest_score());
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}
