use crate::BinaryOp;
use crate::BinaryOp::*;
use std::fmt::{Display, Error, Formatter};

impl BinaryOp {
    /// Apply this operator to two Boolean values.
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            And => left && right,
            Or => left || right,
            Xor => left != right,
            Iff => left == right,
            Imp => !left || right,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let symbol = match self {
            And => "&",
            Or => "|",
            Xor => "^",
            Imp => "=>",
            Iff => "<=>",
        };
        write!(f, "{}", symbol)?;
        Ok(())
    }
}
