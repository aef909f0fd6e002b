pub mod column;
pub mod engine;

pub use column::{CellValue, ColumnSpec, RenderKind};
pub use engine::{SortDirection, SortState, TableEngine, TableSnapshot};
