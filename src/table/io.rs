//! Loading and saving tables.
//!
//! Tables round-trip through two textual formats: headered CSV (cells are
//! parsed as int, float, or bool where possible, falling back to text) and
//! serde, where a table serializes as an ordered map of column name to cells.

use std::io::{Read, Write};
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Cell, Column, Table};
use crate::error::PipelineError;

/// Parse one CSV field into the narrowest matching cell type.
fn parse_cell(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    if let Ok(v) = field.parse::<bool>() {
        return Cell::Bool(v);
    }
    if let Ok(v) = field.parse::<i64>() {
        return Cell::Int(v);
    }
    if let Ok(v) = field.parse::<f64>() {
        return Cell::Float(v);
    }
    Cell::Str(field.to_string())
}

impl Table {
    /// Read a headered CSV stream into a table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Table, PipelineError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let names: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut columns: Vec<Column> = vec![Vec::new(); names.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (i, field) in record.iter().enumerate() {
                columns[i].push(parse_cell(field));
            }
        }

        Table::from_columns(names.into_iter().zip(columns))
    }

    /// Read a headered CSV file into a table.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Table, PipelineError> {
        let file = std::fs::File::open(path)?;
        Table::from_csv_reader(file)
    }

    /// Write the table as headered CSV.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), PipelineError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.column_names())?;
        for row in self.rows() {
            let fields: Vec<String> = row.cells().map(Cell::to_string).collect();
            csv_writer.write_record(&fields)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.n_columns()))?;
        for (name, cells) in self.columns() {
            map.serialize_entry(name, cells)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = Table;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a map of column name to cell list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = Table::new();
        while let Some((name, cells)) = access.next_entry::<String, Column>()? {
            table
                .insert(name, cells)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_types() {
        assert_eq!(parse_cell(""), Cell::Null);
        assert_eq!(parse_cell("true"), Cell::Bool(true));
        assert_eq!(parse_cell("12"), Cell::Int(12));
        assert_eq!(parse_cell("-3.5"), Cell::Float(-3.5));
        assert_eq!(parse_cell("hello"), Cell::Str("hello".to_string()));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "name,age,score\nalice,31,9.5\nbob,28,\n";
        let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.column_names(), ["name", "age", "score"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.column("age").unwrap(),
            &[Cell::Int(31), Cell::Int(28)]
        );
        assert_eq!(
            table.column("score").unwrap(),
            &[Cell::Float(9.5), Cell::Null]
        );
    }

    #[test]
    fn test_csv_roundtrip() {
        let table = Table::from_columns([
            ("A", vec![Cell::Int(1), Cell::Int(2)]),
            ("label", vec![Cell::Str("x".into()), Cell::Str("y".into())]),
        ])
        .unwrap();

        let mut buffer = Vec::new();
        table.to_csv_writer(&mut buffer).unwrap();
        let back = Table::from_csv_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_serde_roundtrip_preserves_column_order() {
        let table = Table::from_columns([
            ("B", vec![Cell::Float(0.5)]),
            ("A", vec![Cell::Int(1)]),
        ])
        .unwrap();

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"B":[0.5],"A":[1]}"#);
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back.column_names(), ["B", "A"]);
        assert_eq!(back, table);
    }

    #[test]
    fn test_serde_rejects_ragged_columns() {
        let json = r#"{"A":[1,2],"B":[3]}"#;
        let result: Result<Table, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
