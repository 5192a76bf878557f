use crate::BooleanNetwork;
use std::fmt::{Display, Error, Formatter};

/// Writes the network in the `.bnet` format, using the rule expressions exactly as they
/// were given during construction.
impl Display for BooleanNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "targets, factors")?;
        for var in self.variables() {
            writeln!(
                f,
                "{}, {}",
                self.get_variable_name(var),
                self.get_rule_string(var)
            )?;
        }
        Ok(())
    }
}
