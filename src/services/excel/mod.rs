pub mod reader;
pub mod types;
pub mod utils;

pub use reader::read_sheet;
pub use types::{ColumnKind, WORKBOOK_EXTENSIONS};
pub use utils::normalize_column_name;
