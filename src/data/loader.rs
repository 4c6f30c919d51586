use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DataSource;
use crate::data::dataset::Dataset;
use crate::error::{PlotError, Result};

/// Build the dataset described by the config.
pub fn load_dataset(source: &DataSource) -> Result<Dataset> {
    let dataset = match source {
        DataSource::Random { count, seed } => random_cloud(*count, *seed)?,
        DataSource::Csv {
            path,
            x_column,
            y_column,
        } => load_csv(path, x_column.as_deref(), y_column.as_deref())?,
    };
    tracing::info!("Loaded {} points", dataset.len());
    Ok(dataset)
}

/// `count` points drawn uniformly from `[-1, 1]` on both axes.
pub fn random_cloud(count: usize, seed: Option<u64>) -> Result<Dataset> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let x: Vec<f32> = (0..count).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    let y: Vec<f32> = (0..count).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    Dataset::new(x, y)
}

/// Read two numeric columns from a CSV file with a header row.
///
/// Columns are looked up by name; a missing name falls back to the first
/// (x) or second (y) column. Rows where either value fails to parse or is
/// not finite are skipped.
pub fn load_csv(path: &Path, x_column: Option<&str>, y_column: Option<&str>) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| PlotError::DataLoad(format!("cannot open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| PlotError::DataLoad(format!("cannot read header: {e}")))?
        .clone();

    let find = |name: Option<&str>, fallback: usize| -> Result<usize> {
        match name {
            Some(name) => headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PlotError::DataLoad(format!("no column named {name:?}"))),
            None if fallback < headers.len() => Ok(fallback),
            None => Err(PlotError::DataLoad(format!(
                "expected at least two columns, found {}",
                headers.len()
            ))),
        }
    };
    let x_idx = find(x_column, 0)?;
    let y_idx = find(y_column, 1)?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let Ok(record) = result else {
            skipped += 1;
            continue;
        };
        match (parse_cell(record.get(x_idx)), parse_cell(record.get(y_idx))) {
            (Some(xv), Some(yv)) => {
                x.push(xv);
                y.push(yv);
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {skipped} rows without two finite values in {:?}", path);
    }
    if x.is_empty() {
        return Err(PlotError::DataLoad(format!(
            "no numeric rows found in {}",
            path.display()
        )));
    }
    Dataset::new(x, y)
}

fn parse_cell(cell: Option<&str>) -> Option<f32> {
    cell?.parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn random_cloud_stays_in_unit_box() {
        let data = random_cloud(1000, Some(7)).unwrap();
        assert_eq!(data.len(), 1000);
        assert!(data.x().iter().chain(data.y()).all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn random_cloud_is_reproducible_with_seed() {
        let a = random_cloud(64, Some(42)).unwrap();
        let b = random_cloud(64, Some(42)).unwrap();
        assert_eq!(a.x(), b.x());
        assert_eq!(a.y(), b.y());
    }

    #[test]
    fn csv_defaults_to_first_two_columns() {
        let file = csv_file("a,b,c\n1,2,3\n4,5,6\n");
        let data = load_csv(file.path(), None, None).unwrap();
        assert_eq!(data.x(), &[1.0, 4.0]);
        assert_eq!(data.y(), &[2.0, 5.0]);
    }

    #[test]
    fn csv_named_columns_and_bad_rows() {
        let file = csv_file("id, lon, lat\n0, 10.5, -3\n1, oops, 2\n2, 11.0, NaN\n3, 12, 4\n");
        let data = load_csv(file.path(), Some("lon"), Some("lat")).unwrap();
        assert_eq!(data.x(), &[10.5, 12.0]);
        assert_eq!(data.y(), &[-3.0, 4.0]);
    }

    #[test]
    fn csv_unknown_column_is_error() {
        let file = csv_file("a,b\n1,2\n");
        let err = load_csv(file.path(), Some("z"), None).unwrap_err();
        assert!(matches!(err, PlotError::DataLoad(_)));
    }

    #[test]
    fn csv_without_numeric_rows_is_error() {
        let file = csv_file("a,b\nx,y\n");
        let err = load_csv(file.path(), None, None).unwrap_err();
        assert!(matches!(err, PlotError::DataLoad(_)));
    }
}
