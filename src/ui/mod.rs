pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, success, summary_row, warn};
pub use table::{adapter_table, AdapterRow};
pub use theme::{theme, Theme};
