mod format;
mod json;
mod table;

pub(crate) use json::report_json;
pub(crate) use table::{
    print_count_table, print_frequency_table, print_summary_table, print_timeline_tables,
};
