use anyhow::{anyhow, bail, Context};
use pdist::PointSet;
use std::path::Path;

/// Loads a header-less, comma separated file with one point per line.
///
/// Every field must parse as f64; rows of differing length are rejected by
/// [`PointSet::from_rows`]. An empty file carries no dimension and is rejected
/// as invalid input; use [`csv_point_set_with_dim`] when the dimension is known.
pub fn csv_point_set(data_path: impl AsRef<Path>) -> anyhow::Result<PointSet> {
    let rows = csv_rows(data_path.as_ref())?;
    Ok(PointSet::from_rows(&rows)?)
}

/// As [`csv_point_set`], but an empty file gives an empty set in `dim` dimensions
/// and a non-empty one must have `dim` columns.
pub fn csv_point_set_with_dim(data_path: impl AsRef<Path>, dim: usize) -> anyhow::Result<PointSet> {
    let data_path = data_path.as_ref();
    let rows = csv_rows(data_path)?;
    if rows.is_empty() {
        return Ok(PointSet::empty(dim)?);
    }

    let points = PointSet::from_rows(&rows)?;
    if points.dim() != dim {
        bail!(
            "{}: expected {dim} columns, found {}",
            data_path.display(),
            points.dim()
        );
    }
    Ok(points)
}

fn csv_rows(data_path: &Path) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(data_path)
        .with_context(|| format!("opening {}", data_path.display()))?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading record {line}"))?;
        let row = record
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| anyhow!("record {line}: cannot parse '{field}' as f64: {e}"))
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        rows.push(row);

        if rows.len() % 100_000 == 0 {
            log::info!("Ingested {} records", rows.len());
        }
    }
    log::info!("Ingested {} records from {}", rows.len(), data_path.display());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows() {
        let file = csv_file("0, 0\n3, 4\n-1.5,2e1\n");
        let points = csv_point_set(file.path()).unwrap();
        assert_eq!((points.len(), points.dim()), (3, 2));
        assert_eq!(points.as_slice(), &[0.0, 0.0, 3.0, 4.0, -1.5, 20.0]);
    }

    #[test]
    fn ragged_file_rejected() {
        let file = csv_file("1,2,3\n4,5\n");
        let err = csv_point_set(file.path()).unwrap_err();
        assert!(err.downcast_ref::<pdist::PdistError>().is_some(), "{err}");
    }

    #[test]
    fn bad_number_rejected() {
        let file = csv_file("1,2\n3,four\n");
        let err = csv_point_set(file.path()).unwrap_err();
        assert!(err.to_string().contains("four"), "{err}");
    }

    #[test]
    fn empty_file_needs_a_dimension() {
        let file = csv_file("");
        let err = csv_point_set(file.path()).unwrap_err();
        assert!(err.downcast_ref::<pdist::PdistError>().is_some(), "{err}");

        let points = csv_point_set_with_dim(file.path(), 3).unwrap();
        assert!(points.is_empty());
        assert_eq!(points.dim(), 3);
    }

    #[test]
    fn known_dimension_is_checked() {
        let file = csv_file("1,2\n3,4\n");
        assert_eq!(csv_point_set_with_dim(file.path(), 2).unwrap().len(), 2);
        assert!(csv_point_set_with_dim(file.path(), 3).is_err());
    }

    #[test]
    fn missing_file_rejected() {
        assert!(csv_point_set("/definitely/not/here.csv").is_err());
    }
}
