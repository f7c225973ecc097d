use std::{fs, path::Path};

use log::debug;
use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlpErr, Result};

/// A fixed-order collection of `(input, target)` samples, one per row.
///
/// Samples are always visited in the order they were stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The inputs, one sample per row.
    /// * `y` - The targets, one sample per row.
    ///
    /// # Returns
    /// The dataset, or an error if the row counts differ, there are no samples or either
    /// side has zero columns.
    pub fn new(x: Array2<f64>, y: Array2<f64>) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(MlpErr::SizeMismatch {
                what: "target rows",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        if x.nrows() == 0 {
            return Err(MlpErr::EmptyDataset);
        }

        if x.ncols() == 0 || y.ncols() == 0 {
            return Err(MlpErr::InvalidInput("samples must have inputs and targets"));
        }

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` from row-major data where each row holds `x_size` input values
    /// followed by `y_size` target values.
    pub fn from_flat(data: Vec<f64>, x_size: usize, y_size: usize) -> Result<Self> {
        let row_size = x_size + y_size;
        if row_size == 0 {
            return Err(MlpErr::InvalidInput("samples must have inputs and targets"));
        }

        let rows = data.len() / row_size;
        let full = Array2::from_shape_vec((rows, row_size), data).map_err(|_| {
            MlpErr::InvalidInput("flat data length isn't a multiple of the row size")
        })?;

        let x = full.slice(s![.., ..x_size]).to_owned();
        let y = full.slice(s![.., x_size..]).to_owned();
        Self::new(x, y)
    }

    /// Loads a dataset from a CSV file, one sample per line (inputs first, then targets).
    /// Blank lines are skipped.
    ///
    /// # Errors
    /// Returns `MlpErr::Io` if the file can't be read, `MlpErr::Dataset` if a line isn't made
    /// of `x_size + y_size` numbers, or `MlpErr::EmptyDataset`.
    pub fn load_csv<P: AsRef<Path>>(path: P, x_size: usize, y_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MlpErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::parse_csv(&content, x_size, y_size)?;
        debug!(
            "loaded {} samples ({x_size} inputs, {y_size} targets) from {}",
            dataset.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parses CSV contents, see `load_csv`.
    pub fn parse_csv(content: &str, x_size: usize, y_size: usize) -> Result<Self> {
        let row_size = x_size + y_size;
        let mut data = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let values = line
                .split(',')
                .map(|v| {
                    v.trim().parse::<f64>().map_err(|_| MlpErr::Dataset {
                        line: i + 1,
                        msg: format!("cannot parse '{}' as a number", v.trim()),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            if values.len() != row_size {
                return Err(MlpErr::Dataset {
                    line: i + 1,
                    msg: format!(
                        "expected {row_size} values (x_size={x_size} + y_size={y_size}), got {}",
                        values.len()
                    ),
                });
            }

            data.extend(values);
        }

        if data.is_empty() {
            return Err(MlpErr::EmptyDataset);
        }

        Self::from_flat(data, x_size, y_size)
    }

    /// Multiplies every target by `factor`.
    pub fn scale_targets(&mut self, factor: f64) {
        self.y *= factor;
    }

    /// Iterates over the `(input, target)` pairs in their stored order.
    pub fn samples(
        &self,
    ) -> impl ExactSizeIterator<Item = (ArrayView1<'_, f64>, ArrayView1<'_, f64>)> {
        self.x.axis_iter(Axis(0)).zip(self.y.axis_iter(Axis(0)))
    }

    pub fn inputs(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn targets(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn x_size(&self) -> usize {
        self.x.ncols()
    }

    pub fn y_size(&self) -> usize {
        self.y.ncols()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use ndarray::array;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn from_flat_splits_rows() {
        let dataset = Dataset::from_flat(vec![0., 1., 1., 0., 2., 3., 0., 1.], 2, 2).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.inputs(), array![[0., 1.], [2., 3.]]);
        assert_eq!(dataset.targets(), array![[1., 0.], [0., 1.]]);
    }

    #[test]
    fn samples_keep_their_order() {
        let x = array![[1.], [2.], [3.]];
        let y = array![[10.], [20.], [30.]];
        let dataset = Dataset::new(x, y).unwrap();

        let firsts: Vec<_> = dataset.samples().map(|(x, y)| (x[0], y[0])).collect();
        assert_eq!(firsts, vec![(1., 10.), (2., 20.), (3., 30.)]);
    }

    #[test]
    fn rejects_bad_shapes() {
        let err = Dataset::new(Array2::zeros((3, 2)), Array2::zeros((2, 1))).unwrap_err();
        assert!(matches!(err, MlpErr::SizeMismatch { .. }));

        let err = Dataset::new(Array2::zeros((0, 2)), Array2::zeros((0, 1))).unwrap_err();
        assert!(matches!(err, MlpErr::EmptyDataset));

        let err = Dataset::from_flat(vec![1., 2., 3.], 1, 1).unwrap_err();
        assert!(matches!(err, MlpErr::InvalidInput(_)));
    }

    #[test]
    fn scale_targets_leaves_inputs() {
        let mut dataset = Dataset::new(array![[1., 2.]], array![[1., 0.]]).unwrap();
        dataset.scale_targets(0.5);

        assert_eq!(dataset.inputs(), array![[1., 2.]]);
        assert_eq!(dataset.targets(), array![[0.5, 0.]]);
    }

    #[test]
    fn parse_csv() {
        let content = "0.5, 0.25, 1, 0\n\n-1,0,0,1\n";
        let dataset = Dataset::parse_csv(content, 2, 2).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.inputs(), array![[0.5, 0.25], [-1., 0.]]);
        assert_eq!(dataset.targets(), array![[1., 0.], [0., 1.]]);
    }

    #[test]
    fn parse_csv_reports_line() {
        let err = Dataset::parse_csv("1,0,1\n1,x,0\n", 2, 1).unwrap_err();
        assert!(matches!(err, MlpErr::Dataset { line: 2, .. }));

        let err = Dataset::parse_csv("1,0,1\n1,0\n", 2, 1).unwrap_err();
        assert!(matches!(err, MlpErr::Dataset { line: 2, .. }));

        let err = Dataset::parse_csv("\n\n", 2, 1).unwrap_err();
        assert!(matches!(err, MlpErr::EmptyDataset));
    }

    #[test]
    fn load_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0,1,1").unwrap();
        writeln!(file, "1,0,0").unwrap();

        let dataset = Dataset::load_csv(file.path(), 2, 1).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.x_size(), 2);
        assert_eq!(dataset.y_size(), 1);

        let err = Dataset::load_csv("/definitely/not/here.csv", 2, 1).unwrap_err();
        assert!(matches!(err, MlpErr::Io { .. }));
    }
}
