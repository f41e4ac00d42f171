use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::IngestError;

/// Coordinate columns of the customer-behaviour sample dataset.
pub const DEFAULT_COLUMNS: &[&str] = &["Frecuencia", "GastoT", "DiasSinCompra", "VariedadDeProductos"];

/// Writes random datasets: sequential ids `1..=n` and coordinates drawn
/// uniformly from `[0, 100)`, formatted with two decimals.
pub struct DatasetGenerator {
    columns: Vec<String>,
    rng: StdRng,
}

impl DatasetGenerator {
    pub fn new(columns: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { columns, rng }
    }

    pub fn with_default_columns(seed: Option<u64>) -> Self {
        Self::new(DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(), seed)
    }

    pub fn generate(&mut self, path: &Path, samples: usize) -> Result<(), IngestError> {
        let file = std::fs::File::create(path)?;
        self.to_writer(file, samples)?;
        info!(
            "Generated {} rows x {} columns in {}",
            samples,
            self.columns.len(),
            path.display()
        );
        Ok(())
    }

    pub fn to_writer<W: Write>(&mut self, writer: W, samples: usize) -> Result<(), IngestError> {
        if self.columns.is_empty() {
            return Err(IngestError::NoCoordinates);
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(std::iter::once("ID").chain(self.columns.iter().map(String::as_str)))?;

        let mut record = Vec::with_capacity(self.columns.len() + 1);
        for id in 1..=samples {
            record.clear();
            record.push(id.to_string());
            for _ in 0..self.columns.len() {
                let value: f64 = self.rng.gen_range(0.0..100.0);
                record.push(format!("{:.2}", value));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
