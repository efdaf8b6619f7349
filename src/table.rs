use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Result, TabsError};
use crate::registry;
use crate::valuetype::{Code, ValueType};

pub type Row = Vec<Code>;

// ------------- Column -------------
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    value_type: Arc<dyn ValueType>,
}

impl Column {
    pub fn new(name: &str, value_type: Arc<dyn ValueType>) -> Self {
        Self {
            name: name.to_owned(),
            value_type,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value_type(&self) -> Arc<dyn ValueType> {
        Arc::clone(&self.value_type)
    }
}
impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::<{}>", self.name, self.value_type.ident())
    }
}

// ------------- Table -------------
/// Columns plus an append-only matrix of codes. Every stored row is exactly
/// as wide as the column list and each code is valid for its column.
#[derive(Debug, Default)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
    pub fn width(&self) -> usize {
        self.columns.len()
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn add_column(&mut self, name: &str, value_type: Arc<dyn ValueType>) -> Result<()> {
        if !self.rows.is_empty() {
            return Err(TabsError::Schema(format!(
                "Can't add column {} to {} once it holds rows",
                name, self.name
            )));
        }
        if self.column(name).is_some() {
            return Err(TabsError::DuplicateColumn(name.to_owned()));
        }
        self.columns.push(Column::new(name, value_type));
        Ok(())
    }
    /// Adds a column whose value type is looked up by name in the process-wide registry.
    pub fn add_column_of(&mut self, name: &str, value_type: &str) -> Result<()> {
        let value_type = registry::get(value_type)
            .ok_or_else(|| TabsError::UnknownValueType(value_type.to_owned()))?;
        self.add_column(name, value_type)
    }
    fn check_arity(&self, found: usize) -> Result<()> {
        if found != self.columns.len() {
            return Err(TabsError::Arity {
                expected: self.columns.len(),
                found,
            });
        }
        Ok(())
    }
    pub fn append_row(&mut self, codes: &[Code]) -> Result<usize> {
        self.check_arity(codes.len())?;
        for (column, code) in self.columns.iter().zip(codes) {
            if !column.value_type.valid(*code) {
                return Err(TabsError::InvalidCode {
                    column: column.name.clone(),
                    code: *code,
                });
            }
        }
        self.rows.push(codes.to_vec());
        trace!(table = %self.name, row = self.rows.len() - 1, "appended row");
        Ok(self.rows.len() - 1)
    }
    /// Parses each text through its column's value type; the first column
    /// that rejects its input fails the whole row.
    pub fn append_row_text<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<usize> {
        self.check_arity(texts.len())?;
        let row = self
            .columns
            .iter()
            .zip(texts)
            .map(|(column, text)| column.value_type.parse(text.as_ref()))
            .collect::<Result<Row>>()?;
        self.rows.push(row);
        trace!(table = %self.name, row = self.rows.len() - 1, "appended row from text");
        Ok(self.rows.len() - 1)
    }
    pub fn row(&self, index: usize) -> Option<&[Code]> {
        self.rows.get(index).map(Vec::as_slice)
    }
    pub fn row_text(&self, index: usize) -> Option<Vec<String>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .zip(row)
                .map(|(column, code)| column.value_type.emit(*code))
                .collect(),
        )
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Code]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(f, "{} ({}) [{} rows]", self.name, columns.join(", "), self.rows.len())
    }
}
