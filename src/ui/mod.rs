pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;
pub mod view;

pub use icons::Icons;
pub use output::{
    error, field, header, matched_table, muted, not_found, section, success, table_heading, warn,
};
pub use progress::Spinner;
pub use table::{TableBuilder, columns_table, fields_table};
pub use theme::{theme, Theme};
pub use view::ResultView;
