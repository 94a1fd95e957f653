pub mod pima_csv;

pub use pima_csv::{read_pima_csv, read_pima_from_reader, DataSource, DEFAULT_DATA_URL};
