pub mod sparse;

pub use sparse::SparseMatrix;
