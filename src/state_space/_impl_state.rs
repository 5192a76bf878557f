use crate::state_space::State;
use crate::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    /// Matches a tuple of zeros and ones, e.g. `(0, 1, 1)` or `(1,)`.
    static ref TUPLE_REGEX: Regex = Regex::new(r"^\(\s*[01](\s*,\s*[01])*\s*,?\s*\)$").unwrap();
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "State({})", self.0)
    }
}

impl State {
    /// Render the first `num_vars` variables as a fixed-width string of `0`/`1` characters.
    /// Character `i` is the value of variable `i`.
    pub fn to_bit_string(self, num_vars: usize) -> String {
        (0..num_vars)
            .map(|i| if self.get_bit(i) { '1' } else { '0' })
            .collect()
    }

    /// Read a state from a string produced by [State::to_bit_string].
    pub fn try_from_bit_string(text: &str, num_vars: usize) -> Result<State, ValidationError> {
        let invalid = || ValidationError::InvalidState {
            text: text.to_string(),
            num_vars,
        };
        if text.chars().count() != num_vars {
            return Err(invalid());
        }
        let mut state = State(0);
        for (i, c) in text.chars().enumerate() {
            match c {
                '0' => {}
                '1' => state = state.set_bit(i, true),
                _ => return Err(invalid()),
            }
        }
        Ok(state)
    }

    /// Render the first `num_vars` variables as a tuple, e.g. `(0, 1, 0)`.
    ///
    /// A single-variable state is written as `(0,)`.
    pub fn to_tuple_string(self, num_vars: usize) -> String {
        let values = (0..num_vars)
            .map(|i| if self.get_bit(i) { "1" } else { "0" })
            .collect::<Vec<_>>();
        if values.len() == 1 {
            format!("({},)", values[0])
        } else {
            format!("({})", values.join(", "))
        }
    }

    /// Read a state from a tuple string (see [State::to_tuple_string]). Whitespace
    /// around the values is not significant.
    pub fn try_from_tuple_string(text: &str, num_vars: usize) -> Result<State, ValidationError> {
        let invalid = || ValidationError::InvalidState {
            text: text.to_string(),
            num_vars,
        };
        let trimmed = text.trim();
        if !TUPLE_REGEX.is_match(trimmed) {
            return Err(invalid());
        }
        let bits = trimmed
            .chars()
            .filter(|c| *c == '0' || *c == '1')
            .collect::<String>();
        Self::try_from_bit_string(&bits, num_vars).map_err(|_| invalid())
    }
}
