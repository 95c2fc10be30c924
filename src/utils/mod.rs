pub mod environment;
pub mod terminal;

pub use environment::{default_store_path, get_data_dir, log_file_path};
pub use terminal::{single_line, strip_ansi_codes};
