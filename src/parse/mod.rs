pub mod markers;
pub mod task_parser;

pub use markers::{
    Checkbox, TimestampMarker, format_date_link, format_timestamp, last_timestamp,
    parse_checkbox, parse_date_link, parse_heading, parse_time_line, timestamp_markers,
    with_single_trailing_newline,
};
pub use task_parser::{HeaderScope, ScopeLine, parse_tasks};
