use crate::dynamics::UpdateSemantics;
use crate::state_space::State;
use crate::trajectory::{Trajectory, TrajectoryRecord};
use crate::ValidationError;

impl Trajectory {
    /// The states of this trajectory as bit strings of `num_vars` characters.
    pub fn to_bit_strings(&self, num_vars: usize) -> Vec<String> {
        self.states
            .iter()
            .map(|s| s.to_bit_string(num_vars))
            .collect()
    }

    /// Convert this trajectory into its serializable form.
    pub fn to_record(&self, num_vars: usize) -> TrajectoryRecord {
        TrajectoryRecord {
            synchronous: self.semantics.is_synchronous(),
            frequency: self.frequency,
            length: self.length,
            target_ratio: self.target_ratio,
            achieved_ratio: self.achieved_ratio,
            transient_count: self.transient_count,
            states: self.to_bit_strings(num_vars),
        }
    }

    /// Read a trajectory of a network with `num_vars` variables from its serialized form.
    pub fn try_from_record(
        record: &TrajectoryRecord,
        num_vars: usize,
    ) -> Result<Trajectory, ValidationError> {
        let states = record
            .states
            .iter()
            .map(|it| State::try_from_bit_string(it, num_vars))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Trajectory {
            semantics: UpdateSemantics::from_synchronous(record.synchronous),
            frequency: record.frequency,
            length: record.length,
            target_ratio: record.target_ratio,
            achieved_ratio: record.achieved_ratio,
            transient_count: record.transient_count,
            states,
        })
    }
}
