//! Table store implementations

pub mod csv;
pub mod in_memory;

pub use csv::CsvTableStore;
pub use in_memory::InMemoryTableStore;
