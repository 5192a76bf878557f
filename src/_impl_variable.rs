use crate::Variable;
use std::fmt::{Display, Error, Formatter};

impl Variable {
    pub(crate) fn new(name: &str) -> Variable {
        Variable {
            name: name.to_string(),
        }
    }

    /// Human-readable name of this variable.
    pub fn get_name(&self) -> &String {
        &self.name
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use crate::BooleanNetwork;

    #[test]
    fn basic_variable_test() {
        let bn = BooleanNetwork::new(vec!["A".to_string()], vec!["!A".to_string()]).unwrap();
        let a = bn.find_variable("A").unwrap();
        let a = &bn[a];
        assert_eq!("A", a.to_string().as_str());
        assert_eq!("A", a.get_name());
    }
}
