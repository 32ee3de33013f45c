//! History engine bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::board::{Color, Point};
use crate::error::HistoryError;
use crate::history::{HistoryConfig, HistoryEngine, Traversal, DEFAULT_STRIDE};

fn to_py_err(err: HistoryError) -> PyErr {
    match err {
        HistoryError::InvalidIndex { .. } => PyIndexError::new_err(err.to_string()),
        HistoryError::PreconditionViolation(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn color_from_raw(raw: u8) -> PyResult<Color> {
    Color::from_raw(raw).ok_or_else(|| PyValueError::new_err(format!("unknown color {}", raw)))
}

/// Python wrapper for HistoryEngine.
///
/// Colors are the integers BLACK=0, WHITE=1, EMPTY=2, OFFBOARD=3.
#[pyclass(name = "BoardHistory")]
pub struct PyBoardHistory {
    inner: HistoryEngine,
}

#[pymethods]
impl PyBoardHistory {
    #[new]
    #[pyo3(signature = (width, height, stride = DEFAULT_STRIDE))]
    fn new(width: u32, height: u32, stride: usize) -> PyResult<Self> {
        // Unsupported sizes surface as InvalidDimensions, raised as ValueError.
        let config = HistoryConfig::new(width, height).with_stride(stride);
        let inner = HistoryEngine::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Stage stones: a list of ((x, y), color).
    fn put(&mut self, stones: Vec<((i32, i32), u8)>) -> PyResult<()> {
        let stones = stones
            .into_iter()
            .map(|(point, raw)| Ok((Point::from(point), color_from_raw(raw)?)))
            .collect::<PyResult<Vec<_>>>()?;
        self.inner.put(&stones).map_err(to_py_err)
    }

    /// Clear points: a list of (x, y).
    fn take(&mut self, points: Vec<(i32, i32)>) -> PyResult<()> {
        let points: Vec<Point> = points.into_iter().map(Point::from).collect();
        self.inner.take(&points).map_err(to_py_err)
    }

    /// Commit the open turn, returning its index.
    fn close(&mut self) -> usize {
        self.inner.close()
    }

    /// Retract the latest (empty) turn.
    fn pop(&mut self) -> PyResult<()> {
        self.inner.pop().map(|_| ()).map_err(to_py_err)
    }

    /// State at `index` as rows of colors, indexed [y][x]. Negative indices
    /// count from the end.
    fn get_state(&self, index: i64) -> PyResult<Vec<Vec<u8>>> {
        let index = self.inner.resolve(index).map_err(to_py_err)?;
        let mut frame = self.inner.frame(index).map_err(to_py_err)?;
        Ok(frame
            .rows()
            .into_iter()
            .map(|row| row.into_iter().map(Color::raw).collect())
            .collect())
    }

    /// Contents of (x, y) at `index`. Off-board points give OFFBOARD.
    fn get(&self, index: i64, x: i32, y: i32) -> PyResult<u8> {
        let index = self.inner.resolve(index).map_err(to_py_err)?;
        let mut frame = self.inner.frame(index).map_err(to_py_err)?;
        Ok(frame.get(x, y).raw())
    }

    /// State at `index` as a flat row-major numpy array.
    fn state_numpy<'py>(&self, py: Python<'py>, index: i64) -> PyResult<Bound<'py, PyArray1<u8>>> {
        let index = self.inner.resolve(index).map_err(to_py_err)?;
        let mut frame = self.inner.frame(index).map_err(to_py_err)?;
        let cells: Vec<u8> = frame
            .iter(Traversal::RowMajor)
            .map(|(_, color)| color.raw())
            .collect();
        Ok(PyArray1::from_slice_bound(py, &cells))
    }

    #[getter]
    fn stride(&self) -> usize {
        self.inner.stride()
    }

    #[setter]
    fn set_stride(&mut self, stride: usize) -> PyResult<()> {
        self.inner.set_stride(stride).map_err(to_py_err)
    }

    #[getter]
    fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        let (width, height) = self.inner.dimensions();
        format!(
            "BoardHistory({}x{}, len={}, stride={})",
            width,
            height,
            self.inner.len(),
            self.inner.stride()
        )
    }
}
