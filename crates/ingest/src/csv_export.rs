use std::io::Write;
use std::path::Path;

use lloyd_core::Dataset;
use tracing::info;

use crate::error::IngestError;

/// Name of the column appended to the input header.
pub const CLUSTER_COLUMN: &str = "Cluster";

/// Writes each row of a dataset together with its cluster index.
pub struct CsvExporter;

impl CsvExporter {
    pub fn save(
        path: &Path,
        dataset: &Dataset,
        assignments: &[usize],
        precision: usize,
    ) -> Result<(), IngestError> {
        let file = std::fs::File::create(path)?;
        Self::to_writer(file, dataset, assignments, precision)?;
        info!("Saved {} rows to {}", dataset.len(), path.display());
        Ok(())
    }

    /// Header is the dataset's columns plus `Cluster`; coordinates are
    /// written with `precision` decimal places.
    pub fn to_writer<W: Write>(
        writer: W,
        dataset: &Dataset,
        assignments: &[usize],
        precision: usize,
    ) -> Result<(), IngestError> {
        if assignments.len() != dataset.len() {
            return Err(IngestError::AssignmentCount(assignments.len(), dataset.len()));
        }

        let mut wtr = csv::Writer::from_writer(writer);

        let header = dataset
            .columns()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(CLUSTER_COLUMN));
        wtr.write_record(header)?;

        for ((id, vector), cluster) in dataset.rows().zip(assignments) {
            let mut record = Vec::with_capacity(vector.len() + 2);
            record.push(id.to_string());
            record.extend(vector.iter().map(|x| format!("{:.*}", precision, x)));
            record.push(cluster.to_string());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
