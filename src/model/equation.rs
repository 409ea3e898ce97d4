use std::ops::{Mul, MulAssign};

use num_traits::{Signed, Zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Relation {
    /// Flips the direction of the comparison; equality is unchanged.
    pub fn invert(self) -> Self {
        match self {
            Relation::LessEqual => Relation::GreaterEqual,
            Relation::GreaterEqual => Relation::LessEqual,
            Relation::Equal => Relation::Equal,
        }
    }
}

/// A coefficient attached to a named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<T> {
    pub coefficient: T,
    pub variable: String,
}

impl<T> Term<T> {
    pub fn new(coefficient: T, variable: impl Into<String>) -> Self {
        Term {
            coefficient,
            variable: variable.into(),
        }
    }
}

impl<T> MulAssign<T> for Term<T>
where
    T: Clone + Mul<Output = T>,
{
    fn mul_assign(&mut self, factor: T) {
        self.coefficient = self.coefficient.clone() * factor;
    }
}

impl<T> Mul<T> for Term<T>
where
    T: Clone + Mul<Output = T>,
{
    type Output = Term<T>;

    fn mul(mut self, factor: T) -> Term<T> {
        self *= factor;
        self
    }
}

/// A sum of terms compared against a right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation<T> {
    pub lhs: Vec<Term<T>>,
    pub relation: Relation,
    pub rhs: T,
}

impl<T> Equation<T> {
    pub fn new(lhs: Vec<Term<T>>, relation: Relation, rhs: T) -> Self {
        Equation { lhs, relation, rhs }
    }

    /// Names of the lhs terms in listed order; duplicates are kept.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.lhs.iter().map(|term| term.variable.as_str())
    }
}

impl<T> MulAssign<T> for Equation<T>
where
    T: Clone + Signed,
{
    /// Scales every coefficient and the rhs; a negative factor inverts
    /// the relation. A zero factor is a caller error.
    fn mul_assign(&mut self, factor: T) {
        debug_assert!(!factor.is_zero(), "equations cannot be scaled by zero");
        for term in &mut self.lhs {
            *term *= factor.clone();
        }
        self.rhs = self.rhs.clone() * factor.clone();
        if factor.is_negative() {
            self.relation = self.relation.invert();
        }
    }
}

impl<T> Mul<T> for Equation<T>
where
    T: Clone + Signed,
{
    type Output = Equation<T>;

    fn mul(mut self, factor: T) -> Equation<T> {
        self *= factor;
        self
    }
}
