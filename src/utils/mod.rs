/// Group of useful computations
pub mod computations;
pub mod keyed_vec;
/// Sorting algorithms
pub mod sort;
pub mod type_table;

pub use computations::*;
pub use keyed_vec::KeyedVec;
pub use sort::*;
pub use type_table::{PairTable, TypeTable};
