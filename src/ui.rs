use chrono::Local;
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Cell, Row, Table},
    Frame,
};

use crate::columns::ColumnDescriptor;
use crate::domain::HELP_TEXT;
use crate::model::Model;
use crate::rows::DisplayRow;

// Top border, header row and bottom border around the table body
pub const TABLE_CHROME_HEIGHT: usize = 3;

pub struct TableUI {
    max_column_width: usize,
}

impl TableUI {
    pub fn new(max_column_width: usize) -> Self {
        Self { max_column_width }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let today = Local::now().date_naive();
        let columns = model.columns();
        let rows = model.visible_rows();

        // Cell text per visible row, in current column order
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| self.row_cells(row, columns.keys(), today))
            .collect();

        let widths = self.column_widths(columns.descriptors(), &cells);

        let header = Row::new(columns.descriptors().iter().enumerate().map(|(idx, col)| {
            let mut style = Style::new().bold();
            if model.dragged_column() == Some(col.key.as_str()) {
                style = style.yellow().reversed();
            } else if idx == model.cursor_column() {
                style = style.blue().reversed();
            }
            Cell::from(truncated(&col.label, self.max_column_width)).style(style)
        }));

        let body = cells
            .into_iter()
            .map(|row| Row::new(row.into_iter().map(Cell::from)));

        let nrows = model.rows().len();
        let first = if nrows == 0 { 0 } else { model.offset_row() + 1 };
        let title = Line::from(format!(
            " {} [{}-{}/{}] ",
            model.name(),
            first,
            model.offset_row() + rows.len(),
            nrows
        ));
        let instructions = instructions_line(model.dragged_column().is_some());
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(instructions.centered())
            .border_set(border::THICK);

        let table = Table::new(body, widths)
            .header(header)
            .column_spacing(1)
            .block(block);
        frame.render_widget(table, frame.area());
    }

    fn row_cells<'a>(
        &self,
        row: &DisplayRow,
        keys: impl Iterator<Item = &'a str>,
        today: chrono::NaiveDate,
    ) -> Vec<String> {
        keys.map(|key| truncated(&row.cell(key, today), self.max_column_width))
            .collect()
    }

    fn column_widths(
        &self,
        descriptors: &[ColumnDescriptor],
        cells: &[Vec<String>],
    ) -> Vec<Constraint> {
        descriptors
            .iter()
            .enumerate()
            .map(|(cidx, col)| {
                let widest_cell = cells
                    .iter()
                    .map(|row| row[cidx].chars().count())
                    .max()
                    .unwrap_or(0);
                let width = std::cmp::max(col.label.chars().count(), widest_cell);
                Constraint::Length(std::cmp::min(width, self.max_column_width) as u16)
            })
            .collect()
    }
}

fn instructions_line(dragging: bool) -> Line<'static> {
    if dragging {
        Line::from(vec![
            " Move ".into(),
            "<←→>".blue().bold(),
            " Drop ".into(),
            "<Space>".blue().bold(),
            " Cancel ".into(),
            "<Esc> ".blue().bold(),
        ])
    } else {
        Line::from(HELP_TEXT)
    }
}

fn truncated(text: &str, width: usize) -> String {
    if width < 3 {
        return String::new();
    }
    if text.chars().count() > width {
        let mut reduced: String = text.chars().take(width - 3).collect();
        reduced.push_str("...");
        reduced
    } else {
        text.to_string()
    }
}
