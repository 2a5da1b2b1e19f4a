use crate::{Error, Result, CSV_SEPARATOR, SHEET_NAME};
use std::path::Path;

/// how a column is written and read back, inferred from all of its cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// The table decoded from the `;`-separated content of a response.
/// Cells are kept as text, the type of each column is inferred on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The numeric cells of one column, each with the index of its row
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    pub name: String,
    pub points: Vec<(usize, f64)>,
}

impl NumericSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, v)| v).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// None for cells that are empty, not a number, or NaN
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl Table {
    /// Init a Table from the csv content, the first line holds the headers.
    /// Short rows are padded with empty cells, rows longer than the headers are an error.
    pub fn from_csv_str(content: &str) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(CSV_SEPARATOR)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if headers.is_empty() {
            return Err(Error::EmptyTable);
        }
        let mut rows = Vec::new();
        for (r, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(Error::TooManyFields {
                    row: r,
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(Table { headers, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn column(&self, c: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(c).map(String::as_str).unwrap_or(""))
    }

    /// numeric when every non-empty cell is a number and there is at least one
    pub fn column_kind(&self, c: usize) -> ColumnKind {
        let mut any = false;
        for cell in self.column(c).filter(|cell| !cell.trim().is_empty()) {
            if parse_number(cell).is_none() {
                return ColumnKind::Text;
            }
            any = true;
        }
        if any {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }

    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.n_columns()).map(|c| self.column_kind(c)).collect()
    }

    /// coerce column c to numbers, dropping the cells that are not finite numbers
    pub fn numeric_series(&self, c: usize) -> NumericSeries {
        let name = self.headers.get(c).cloned().unwrap_or_default();
        let points = self
            .column(c)
            .enumerate()
            .filter_map(|(i, cell)| parse_number(cell).map(|v| (i, v)))
            .filter(|(_, v)| v.is_finite())
            .collect();
        NumericSeries { name, points }
    }

    /// Writes the table to a single-sheet xlsx at the given path, replacing any existing file.
    /// Column A holds the row index, the table starts at column B.
    pub fn to_xlsx(&self, fout: &Path) -> Result<()> {
        let kinds = self.column_kinds();
        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_by_name_mut(SHEET_NAME)
            .ok_or_else(|| Error::Spreadsheet(format!("sheet '{}' not found", SHEET_NAME)))?;
        for (c, header) in self.headers.iter().enumerate() {
            sheet
                .get_cell_mut((c as u32 + 2, 1u32))
                .set_value(header.as_str());
        }
        for (r, row) in self.rows.iter().enumerate() {
            let xlsx_row = r as u32 + 2;
            sheet.get_cell_mut((1u32, xlsx_row)).set_value_number(r as f64);
            for (c, cell) in row.iter().enumerate() {
                if cell.trim().is_empty() {
                    continue;
                }
                let target = sheet.get_cell_mut((c as u32 + 2, xlsx_row));
                match (kinds.get(c), parse_number(cell)) {
                    (Some(ColumnKind::Numeric), Some(v)) => {
                        target.set_value_number(v);
                    }
                    _ => {
                        target.set_value(cell.as_str());
                    }
                }
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, fout)
            .map_err(|e| Error::Spreadsheet(format!("{}: {}", fout.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.headers.join(";"))?;
        for row in self.rows.iter() {
            writeln!(f, "{}", row.join(";"))?
        }
        Ok(())
    }
}
