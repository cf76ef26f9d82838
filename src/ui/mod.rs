pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, info, section, success, warn};
pub use table::{ProjectRow, project_table};
pub use theme::{Theme, theme};
