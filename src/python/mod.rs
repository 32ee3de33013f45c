//! Python bindings for the board history engine.
//!
//! # Quick Start
//!
//! ```python
//! import board_history as bh
//!
//! history = bh.BoardHistory(9, 9, stride=5)
//! history.put([((0, 0), bh.BLACK)])
//! history.close()
//!
//! history.get(1, 0, 0)        # BLACK
//! history.get_state(-1)       # rows of colors
//! history.state_numpy(0)      # flat numpy array
//! ```

use pyo3::prelude::*;

mod py_history;

pub use py_history::*;

use crate::board::Color;

/// board_history: versioned board-state storage.
#[pymodule]
fn board_history(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBoardHistory>()?;

    m.add("BLACK", Color::Black.raw())?;
    m.add("WHITE", Color::White.raw())?;
    m.add("EMPTY", Color::Empty.raw())?;
    m.add("OFFBOARD", Color::Offboard.raw())?;

    Ok(())
}
