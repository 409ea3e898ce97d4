pub mod bounds;
pub mod simplex;

pub use bounds::Bounds;
pub use simplex::Solver;

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::Solver;
    use crate::Rational;
    use crate::model::{Equation, Relation, Term};

    fn int(n: i64) -> Rational {
        Rational::from_integer(BigInt::from(n))
    }

    fn term(c: i64, v: &str) -> Term<Rational> {
        Term::new(int(c), v)
    }

    fn equation(lhs: Vec<Term<Rational>>, relation: Relation, rhs: i64) -> Equation<Rational> {
        Equation::new(lhs, relation, int(rhs))
    }

    fn value<'a>(model: &'a [(String, Rational)], name: &str) -> &'a Rational {
        &model
            .iter()
            .find(|(n, _)| n == name)
            .expect("variable present in model")
            .1
    }

    #[test]
    fn three_variable_system_is_satisfiable() {
        // x1 + x2 <= 20,  x1 + x3 = 5,  -x2 - x3 <= -10
        let mut solver = Solver::new(vec![
            equation(vec![term(1, "x1"), term(1, "x2")], Relation::LessEqual, 20),
            equation(vec![term(1, "x1"), term(1, "x3")], Relation::Equal, 5),
            equation(vec![term(-1, "x2"), term(-1, "x3")], Relation::LessEqual, -10),
        ]);
        solver.prepare();
        let model = solver.solve().expect("satisfiable");

        let x1 = value(&model, "x1").clone();
        let x2 = value(&model, "x2").clone();
        let x3 = value(&model, "x3").clone();
        assert!(x1.clone() + x2.clone() <= int(20));
        assert_eq!(x1 + x3.clone(), int(5));
        assert!(-x2 - x3 <= int(-10));
    }

    #[test]
    fn conflicting_single_variable_bounds_are_unsat() {
        // x >= 2,  2x <= 0
        let mut solver = Solver::new(vec![
            equation(vec![term(1, "x")], Relation::GreaterEqual, 2),
            equation(vec![term(2, "x")], Relation::LessEqual, 0),
        ]);
        solver.prepare();
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn two_variable_inequalities_are_satisfiable() {
        // x + y >= 2,  2x - y >= 0,  -x + 2y >= 1
        let mut solver = Solver::new(vec![
            equation(vec![term(1, "x"), term(1, "y")], Relation::GreaterEqual, 2),
            equation(vec![term(2, "x"), term(-1, "y")], Relation::GreaterEqual, 0),
            equation(vec![term(-1, "x"), term(2, "y")], Relation::GreaterEqual, 1),
        ]);
        solver.prepare();
        let model = solver.solve().expect("satisfiable");

        let x = value(&model, "x").clone();
        let y = value(&model, "y").clone();
        assert!(x.clone() + y.clone() >= int(2));
        assert!(int(2) * x.clone() - y.clone() >= int(0));
        assert!(-x + int(2) * y >= int(1));
    }

    #[test]
    fn empty_system_is_trivially_satisfiable() {
        let mut solver = Solver::<Rational>::new(Vec::new());
        solver.prepare();
        assert_eq!(solver.solve(), Some(Vec::new()));
        assert_eq!(solver.n_pivots(), 0);
    }

    #[test]
    fn equality_pins_the_variable() {
        let mut solver = Solver::new(vec![equation(vec![term(1, "x")], Relation::Equal, 3)]);
        solver.prepare();
        assert_eq!(solver.solve(), Some(vec![("x".to_owned(), int(3))]));
    }

    #[test]
    fn contradictory_equalities_are_unsat() {
        let mut solver = Solver::new(vec![
            equation(vec![term(1, "x")], Relation::Equal, 1),
            equation(vec![term(1, "x")], Relation::Equal, 2),
        ]);
        solver.prepare();
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn renders_equations_and_state() {
        let mut solver = Solver::new(vec![equation(
            vec![term(2, "x"), term(-1, "y")],
            Relation::GreaterEqual,
            0,
        )]);
        assert_eq!(format!("{solver}"), "2*x + -y >= 0\n");

        solver.prepare();
        let dump = format!("{solver:?}");
        assert!(dump.contains("slot"));
        assert!(dump.contains("row   0"));
    }
}
