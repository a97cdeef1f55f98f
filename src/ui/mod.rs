pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{change, error, header, info, muted, section, status, success, summary_row, warn};
pub use table::{TableBuilder, event_table, price_table, stats_table};
pub use theme::{Theme, theme};
