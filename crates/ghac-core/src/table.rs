//! Table formatting for CLI output.

use comfy_table::{Cell, ContentArrangement, Table as ComfyTable};

use crate::iostreams::IOStreams;
use crate::text;

/// Narrowest a truncated column is allowed to become.
const MIN_TRUNCATED_WIDTH: usize = 10;

/// Horizontal padding comfy-table adds around every cell.
const CELL_PADDING: usize = 2;

/// Table printer that adapts output based on TTY/non-TTY mode.
///
/// On a terminal, rows are aligned into columns and one column may be
/// truncated so each line fits the terminal width. Otherwise rows are
/// tab-separated and never truncated.
#[derive(Debug)]
pub struct TablePrinter {
    is_tty: bool,
    width: usize,
    truncate_column: Option<usize>,
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    /// Create a new table printer.
    pub fn new(ios: &IOStreams) -> Self {
        Self {
            is_tty: ios.is_stdout_tty(),
            width: ios.terminal_width(),
            truncate_column: None,
            rows: Vec::new(),
        }
    }

    /// Shrink column `index` with an ellipsis when rows would overflow the terminal.
    #[must_use]
    pub fn truncate_column(mut self, index: usize) -> Self {
        self.truncate_column = Some(index);
        self
    }

    /// Add a row of values.
    pub fn add_row(&mut self, fields: Vec<String>) {
        self.rows.push(fields);
    }

    /// Render the table to a string.
    pub fn render(&self) -> String {
        if self.is_tty {
            self.render_tty()
        } else {
            self.render_plain()
        }
    }

    fn render_tty(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let limit = self.truncate_column.map(|col| (col, self.column_budget(col)));

        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Disabled);

        for row in &self.rows {
            let cells: Vec<Cell> = row
                .iter()
                .enumerate()
                .map(|(i, field)| match limit {
                    Some((col, max)) if col == i => Cell::new(text::truncate(field, max)),
                    _ => Cell::new(field),
                })
                .collect();
            table.add_row(cells);
        }

        table
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Width left for column `col` once every other column is laid out.
    fn column_budget(&self, col: usize) -> usize {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let fixed: usize = (0..columns)
            .filter(|&i| i != col)
            .map(|i| self.column_width(i) + CELL_PADDING)
            .sum();
        self.width
            .saturating_sub(fixed + CELL_PADDING)
            .max(MIN_TRUNCATED_WIDTH)
    }

    fn column_width(&self, index: usize) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(|field| console::measure_text_width(field))
            .max()
            .unwrap_or(0)
    }

    fn render_plain(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
