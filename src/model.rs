use polars::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, trace};

use crate::columns::{ColumnOrder, DragGesture};
use crate::domain::{DtvError, Message};
use crate::rows::{default_columns, DisplayRow, RawRecord, NULL_MARKER};
use crate::ui::TABLE_CHROME_HEIGHT;

/// Source header names, in the order the loader extracts them.
const SOURCE_FIELDS: [&str; 6] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "City",
    "Registered Date",
];

#[derive(Debug, PartialEq)]
pub enum Status {
    EMPTY,
    READY,
    QUITTING,
}

pub struct Model {
    pub status: Status,
    name: String,
    rows: Vec<DisplayRow>,
    columns: ColumnOrder,
    gesture: DragGesture,
    cursor_column: usize,
    offset_row: usize,
    view_height: usize,
    view_width: usize,
}

impl Model {
    /// A model with headers but no rows. This is what renders when the
    /// data file never loads.
    pub fn empty() -> Self {
        Model {
            status: Status::EMPTY,
            name: String::new(),
            rows: Vec::new(),
            columns: default_columns(),
            gesture: DragGesture::Idle,
            cursor_column: 0,
            offset_row: 0,
            view_height: 24,
            view_width: 80,
        }
    }

    pub fn load(path: PathBuf) -> Result<Self, DtvError> {
        Self::check_file(&path)?;

        let start_time = Instant::now();
        let df = Self::load_csv(&path)?.collect()?;
        let records = Self::extract_records(&df)?;
        let rows: Vec<DisplayRow> = records.into_iter().map(DisplayRow::from_record).collect();
        info!(
            "Loaded {} rows in {}ms",
            rows.len(),
            start_time.elapsed().as_millis()
        );

        let mut model = Model::empty();
        model.name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("???")
            .to_string();
        model.status = if rows.is_empty() {
            Status::EMPTY
        } else {
            Status::READY
        };
        model.rows = rows;
        Ok(model)
    }

    fn check_file(path: &Path) -> Result<(), DtvError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DtvError::FileNotFound,
            ErrorKind::PermissionDenied => DtvError::PermissionDenied,
            _ => DtvError::IoError(e),
        })?;
        if !metadata.is_file() {
            return Err(DtvError::LoadingFailed("Not a file!".into()));
        }
        Ok(())
    }

    fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
        LazyCsvReader::new(PlPath::Local(path.into()))
            .with_has_header(true)
            .finish()
    }

    /// Pull the six source columns out of the frame as strings. Rows
    /// with a null ID are dropped, other nulls surface as the null
    /// marker so the table degrades instead of failing.
    fn extract_records(df: &DataFrame) -> Result<Vec<RawRecord>, DtvError> {
        let fields: Vec<Vec<Option<String>>> = SOURCE_FIELDS
            .iter()
            .map(|name| Self::column_values(df, name))
            .collect::<Result<_, _>>()?;

        let mut records = Vec::with_capacity(df.height());
        for ridx in 0..df.height() {
            let Some(id) = fields[0][ridx].clone() else {
                debug!("Dropping row {ridx}: null ID");
                continue;
            };
            let value = |cidx: usize| {
                fields[cidx][ridx]
                    .clone()
                    .unwrap_or_else(|| NULL_MARKER.to_string())
            };
            records.push(RawRecord {
                id,
                first_name: value(1),
                last_name: value(2),
                email: value(3),
                city: value(4),
                registered_date: value(5),
            });
        }
        Ok(records)
    }

    fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DtvError> {
        let col = df
            .column(name)
            .map_err(|_| DtvError::MissingColumn(name.to_string()))?
            .cast(&DataType::String)?;
        let series = col.str()?;
        Ok(series
            .into_iter()
            .map(|v| v.map(|s| s.replace("\r\n", " ").replace("\n", " ")))
            .collect())
    }

    // -------------------- Accessors for the UI ---------------------- //

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &ColumnOrder {
        &self.columns
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> &[DisplayRow] {
        let rbegin = std::cmp::min(self.offset_row, self.rows.len());
        let rend = std::cmp::min(rbegin + self.view_height, self.rows.len());
        &self.rows[rbegin..rend]
    }

    pub fn offset_row(&self) -> usize {
        self.offset_row
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor_column
    }

    pub fn dragged_column(&self) -> Option<&str> {
        self.gesture.active()
    }

    // ------------------------ Update logic --------------------------- //

    pub fn update(&mut self, message: Message) -> Result<(), DtvError> {
        trace!("Update: {message:?}");
        match message {
            Message::Quit => self.status = Status::QUITTING,
            Message::MoveLeft => self.move_cursor_left(),
            Message::MoveRight => self.move_cursor_right(),
            Message::MoveUp => self.scroll_up(1),
            Message::MoveDown => self.scroll_down(1),
            Message::MovePageUp => self.scroll_up(self.view_height),
            Message::MovePageDown => self.scroll_down(self.view_height),
            Message::GrabOrDrop => self.grab_or_drop(),
            Message::CancelDrag => self.cancel_drag(),
            Message::Resize(width, height) => self.resize(width, height),
        }
        Ok(())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_column + 1 < self.columns.len() {
            self.cursor_column += 1;
        }
    }

    fn scroll_up(&mut self, size: usize) {
        self.offset_row = self.offset_row.saturating_sub(size);
    }

    fn scroll_down(&mut self, size: usize) {
        let max_offset = self.rows.len().saturating_sub(self.view_height);
        self.offset_row = std::cmp::min(self.offset_row + size, max_offset);
    }

    /// Space either grabs the header under the cursor or, if a drag is
    /// in flight, drops the grabbed header onto the one under the
    /// cursor. A drop on itself commits nothing.
    fn grab_or_drop(&mut self) {
        let Some(under_cursor) = self.columns.key_at(self.cursor_column).map(String::from) else {
            return;
        };
        if !self.gesture.is_dragging() {
            self.gesture.begin(&under_cursor);
        } else if let Some((active, over)) = self.gesture.end(Some(under_cursor.as_str())) {
            self.columns.reorder(&active, &over);
            // Keep the cursor on the moved column
            if let Some(pos) = self.columns.position(&active) {
                self.cursor_column = pos;
            }
        }
    }

    fn cancel_drag(&mut self) {
        self.gesture.end(None);
    }

    fn resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{width}, h:{}->{height}",
            self.view_width, self.view_height
        );
        self.view_width = width;
        self.view_height = height.saturating_sub(TABLE_CHROME_HEIGHT);
        // Shrinking the view can leave the offset past the last page
        self.scroll_down(0);
    }
}
