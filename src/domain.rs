use polars::error::PolarsError;
use std::io::Error;

pub const HELP_TEXT: &str =
    " Move <←→> Scroll <↑↓/PgUp/PgDn> Grab/Drop <Space> Cancel <Esc> Quit <Q> ";

#[derive(Debug, Clone)]
pub struct DtvConfig {
    pub event_poll_time: u64,
    pub max_column_width: usize,
}

impl Default for DtvConfig {
    fn default() -> Self {
        DtvConfig {
            event_poll_time: 100,
            max_column_width: 40,
        }
    }
}

// Messages produced by the controller and consumed by Model::update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    GrabOrDrop,
    CancelDrag,
    Resize(usize, usize),
}

#[derive(Debug)]
pub enum DtvError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    MissingColumn(String),
}

impl From<Error> for DtvError {
    fn from(err: Error) -> Self {
        DtvError::IoError(err)
    }
}

impl From<PolarsError> for DtvError {
    fn from(err: PolarsError) -> Self {
        DtvError::PolarsError(err)
    }
}
