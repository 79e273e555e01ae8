// src/io/input.rs

use crate::error::{Result, SimError};
use crate::model::generator::GeneratorMatrix;
use std::io::Read;
use std::path::Path;

/// Reads a generator matrix from header-less CSV, one matrix row per line.
pub fn read_generator_csv<P: AsRef<Path>>(path: P) -> Result<GeneratorMatrix> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_generator(file)
}

pub fn parse_generator<R: Read>(reader: R) -> Result<GeneratorMatrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| parse_number(field, line))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    GeneratorMatrix::from_rows(&rows)
}

/// Parses a comma-separated probability vector such as `1,0,0`.
pub fn parse_distribution(text: &str) -> Result<Vec<f64>> {
    let values = text
        .split(',')
        .map(|field| parse_number(field.trim(), 0))
        .collect::<Result<Vec<f64>>>()?;
    crate::ensure!(
        values.iter().all(|p| (0.0..=1.0).contains(p)),
        "probabilities must lie in [0, 1]: {text}"
    );
    let total: f64 = values.iter().sum();
    crate::ensure!(
        (total - 1.0).abs() <= 1e-9,
        "probabilities must sum to 1, got {total}"
    );
    Ok(values)
}

fn parse_number(field: &str, line: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|e| SimError::Config(format!("line {}: `{field}`: {e}", line + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_from_csv() {
        let q = parse_generator("-3, 1.5, 1.5\n0,-2,2\n1,0.5,-1.5\n".as_bytes()).unwrap();
        assert_eq!(q.dim(), 3);
        assert_eq!(q.rate(0, 0), -3.0);
        assert_eq!(q.rate(2, 1), 0.5);
    }

    #[test]
    fn ragged_csv_is_dimension_error() {
        let err = parse_generator("-1,1\n0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { .. }));
    }

    #[test]
    fn non_numeric_field_names_line() {
        let err = parse_generator("-1,1\n1,abc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn distribution_list() {
        assert_eq!(parse_distribution("1, 0,0").unwrap(), vec![1.0, 0.0, 0.0]);
        assert!(parse_distribution("1.5,0").is_err());
        assert!(parse_distribution("0.5,0.2").is_err());
        assert!(parse_distribution("x").is_err());
    }
}
