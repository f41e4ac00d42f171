use std::io::Read;
use std::path::Path;

use lloyd_core::Dataset;
use tracing::info;

use crate::error::IngestError;

/// Reads a dataset from CSV.
///
/// The first record is the header. The first column is an opaque row
/// identifier; every remaining column is a coordinate. Row numbers in
/// errors are 1-based and count data rows only.
pub struct CsvImporter;

impl CsvImporter {
    pub fn import(path: &Path) -> Result<Dataset, IngestError> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Imported {} rows ({} dimensions) from {}",
            dataset.len(),
            dataset.dim(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, IngestError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        if header.is_empty() {
            return Err(IngestError::MissingHeader);
        }
        if header.len() < 2 {
            return Err(IngestError::NoCoordinates);
        }

        let columns: Vec<String> = header.iter().map(str::to_string).collect();
        let width = columns.len();

        let mut ids = Vec::new();
        let mut vectors = Vec::new();

        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;

            if record.len() != width {
                return Err(IngestError::RowWidth {
                    row,
                    expected: width,
                    found: record.len(),
                });
            }

            let mut vector = Vec::with_capacity(width - 1);
            for (field, column) in record.iter().skip(1).zip(columns.iter().skip(1)) {
                let value: f64 = field.parse().map_err(|_| IngestError::ParseFloat {
                    row,
                    column: column.clone(),
                    value: field.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IngestError::NonFinite {
                        row,
                        column: column.clone(),
                    });
                }
                vector.push(value);
            }

            ids.push(record[0].to_string());
            vectors.push(vector);
        }

        Ok(Dataset::new(columns, ids, vectors)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Dataset, IngestError> {
        CsvImporter::from_reader(input.as_bytes())
    }

    #[test]
    fn parses_ids_and_coordinates() {
        let ds = parse("ID,a,b\n1,0.5,2\nx7, -3.25 ,1e2\n").unwrap();
        assert_eq!(ds.columns(), &["ID", "a", "b"]);
        assert_eq!(ds.ids(), &["1", "x7"]);
        assert_eq!(ds.vectors(), &[vec![0.5, 2.0], vec![-3.25, 100.0]]);
        assert_eq!(ds.dim(), 2);
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let ds = parse("ID,a\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns().len(), 2);
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(parse(""), Err(IngestError::MissingHeader)));
    }

    #[test]
    fn rejects_header_without_coordinates() {
        assert!(matches!(parse("ID\n1\n"), Err(IngestError::NoCoordinates)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse("ID,a,b\n1,1,2\n2,3\n").unwrap_err();
        assert!(matches!(err, IngestError::RowWidth { row: 2, expected: 3, found: 2 }));
    }

    #[test]
    fn rejects_unparsable_numbers() {
        let err = parse("ID,a,b\n1,1,2\n2,3,abc\n").unwrap_err();
        match err {
            IngestError::ParseFloat { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "b");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = parse("ID,a\n1,NaN\n").unwrap_err();
        assert!(matches!(err, IngestError::NonFinite { row: 1, .. }));
        let err = parse("ID,a\n1,inf\n").unwrap_err();
        assert!(matches!(err, IngestError::NonFinite { row: 1, .. }));
    }
}
