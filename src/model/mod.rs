pub mod displays;
pub mod equation;

pub use equation::{Equation, Relation, Term};
