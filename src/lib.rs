pub mod error;
pub mod near;
pub mod table;
pub mod tester;
#[macro_use]
pub mod utils;

pub use error::Error;
pub use near::{within, Element, Mismatch, NearEq};
pub use table::{load_table, to_matrix, Table};
pub use tester::{Status, Tester};
