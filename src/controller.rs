use std::time::Duration;
use tracing::trace;

use crate::domain::{DtvConfig, DtvError, Message};
use ratatui::crossterm::event::{self, Event, KeyCode};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &DtvConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self) -> Result<Option<Message>, DtvError> {
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    return Ok(Self::handle_key(key));
                }
                Event::Resize(width, height) => {
                    return Ok(Some(Message::Resize(width as usize, height as usize)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn handle_key(key: event::KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::PageUp => Some(Message::MovePageUp),
            KeyCode::PageDown => Some(Message::MovePageDown),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Message::GrabOrDrop),
            KeyCode::Esc => Some(Message::CancelDrag),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    #[test]
    fn keys_map_to_messages() {
        let cases = [
            (KeyCode::Char('q'), Some(Message::Quit)),
            (KeyCode::Left, Some(Message::MoveLeft)),
            (KeyCode::Char('l'), Some(Message::MoveRight)),
            (KeyCode::Char(' '), Some(Message::GrabOrDrop)),
            (KeyCode::Enter, Some(Message::GrabOrDrop)),
            (KeyCode::Esc, Some(Message::CancelDrag)),
            (KeyCode::Tab, None),
        ];
        for (code, expected) in cases {
            assert_eq!(Controller::handle_key(KeyEvent::from(code)), expected);
        }
    }
}
