//! Data reader contracts.
//!
//! - columnar tables (`table`)
//! - the `DataReader` capability and the contract orchestrator (`reader`)
//! - a CSV reader (`csv_reader`)

pub mod csv_reader;
pub mod reader;
pub mod table;

pub use csv_reader::CsvReader;
pub use reader::{Contracted, DataReader, ReadPermit, execute_contracted_read, post_read_data, pre_read_data};
pub use table::{Column, ColumnData, Table};
