use crate::VariableId;
use std::fmt::{Display, Error, Formatter};

impl VariableId {
    /// The index of this variable, which is also the position of its bit in a network state.
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<usize> for VariableId {
    fn from(val: usize) -> Self {
        VariableId(val)
    }
}

impl From<VariableId> for usize {
    fn from(value: VariableId) -> Self {
        value.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "BnVariable({})", self.0)
    }
}
