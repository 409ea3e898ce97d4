use std::fmt;

use num_traits::{One, Signed};

use crate::model::{Equation, Relation, Term};

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEqual => write!(f, "<="),
            Relation::GreaterEqual => write!(f, ">="),
            Relation::Equal => write!(f, "="),
        }
    }
}

impl<T> fmt::Display for Term<T>
where
    T: Signed + PartialOrd + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient.is_one() {
            write!(f, "{}", self.variable)
        } else if self.coefficient == -T::one() {
            write!(f, "-{}", self.variable)
        } else if self.coefficient.is_negative() {
            write!(f, "({})*{}", self.coefficient, self.variable)
        } else {
            write!(f, "{}*{}", self.coefficient, self.variable)
        }
    }
}

impl<T> fmt::Display for Equation<T>
where
    T: Signed + PartialOrd + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lhs.is_empty() {
            write!(f, "0")?;
        }
        for (i, term) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, " {} {}", self.relation, self.rhs)
    }
}
