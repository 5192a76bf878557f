//! Reading and writing of network descriptions.
//!
//! A [NetworkDescription] is the JSON form of a network: node names, aligned rule
//! expressions and (optionally) the precomputed attractor sets and parent indices of both
//! semantics. States are written as tuples listing node `0` first, e.g. `"(0, 1, 0)"`.
//! Precomputed components are trusted when loaded, only the width of each state is checked.
//!
//! Networks can also be read from `.bnet` files (see [BooleanNetwork::try_from_bnet]) and from
//! plain network lists, i.e. JSON arrays of `[nodes, functions]` pairs.

use crate::attractors::AttractorSet;
use crate::dynamics::{NetworkDynamics, PrecomputedDynamics, UpdateSemantics};
use crate::parent_index::ParentIndex;
use crate::state_space::State;
use crate::{BooleanNetwork, DatasetError, Error, ValidationError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialized form of a network and its (optional) precomputed dynamics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub nodes: Vec<String>,
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs_async: Option<Vec<String>>,
    /// Older files use the key `attrs_sync:`.
    #[serde(default, alias = "attrs_sync:", skip_serializing_if = "Option::is_none")]
    pub attrs_sync: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents_async: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents_sync: Option<BTreeMap<String, Vec<String>>>,
}

impl NetworkDescription {
    /// A description of the network only, without precomputed dynamics.
    pub fn from_network(network: &BooleanNetwork) -> NetworkDescription {
        NetworkDescription {
            nodes: network.node_names().iter().map(|it| it.to_string()).collect(),
            functions: network.rule_strings().to_vec(),
            ..Default::default()
        }
    }

    /// A complete description, including attractors and parent indices of both semantics.
    pub fn from_dynamics(dynamics: &NetworkDynamics) -> NetworkDescription {
        let num_vars = dynamics.num_vars();
        let attractors = |semantics: UpdateSemantics| -> Vec<String> {
            dynamics
                .attractors(semantics)
                .sorted_states()
                .into_iter()
                .map(|s| s.to_tuple_string(num_vars))
                .collect()
        };
        let parents = |semantics: UpdateSemantics| -> BTreeMap<String, Vec<String>> {
            dynamics
                .parent_index(semantics)
                .sorted_entries()
                .into_iter()
                .map(|(state, parents)| {
                    let parents = parents.iter().map(|p| p.to_tuple_string(num_vars)).collect();
                    (state.to_tuple_string(num_vars), parents)
                })
                .collect()
        };
        NetworkDescription {
            attrs_async: Some(attractors(UpdateSemantics::Asynchronous)),
            attrs_sync: Some(attractors(UpdateSemantics::Synchronous)),
            parents_async: Some(parents(UpdateSemantics::Asynchronous)),
            parents_sync: Some(parents(UpdateSemantics::Synchronous)),
            ..Self::from_network(dynamics.network())
        }
    }

    /// Build the network and its dynamics. Components missing from the description
    /// are computed.
    pub fn to_dynamics(&self) -> Result<NetworkDynamics, Error> {
        let network = BooleanNetwork::new(self.nodes.clone(), self.functions.clone())?;
        let num_vars = network.num_vars();
        let precomputed = PrecomputedDynamics {
            sync_attractors: read_attractors(self.attrs_sync.as_ref(), num_vars)?,
            async_attractors: read_attractors(self.attrs_async.as_ref(), num_vars)?,
            sync_parents: read_parents(self.parents_sync.as_ref(), num_vars)?,
            async_parents: read_parents(self.parents_async.as_ref(), num_vars)?,
        };
        Ok(NetworkDynamics::from_precomputed(network, precomputed))
    }
}

/// **(internal)** Parse a list of tuple strings into an attractor set.
fn read_attractors(
    states: Option<&Vec<String>>,
    num_vars: usize,
) -> Result<Option<AttractorSet>, ValidationError> {
    let Some(states) = states else {
        return Ok(None);
    };
    let states = states
        .iter()
        .map(|it| State::try_from_tuple_string(it, num_vars))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(AttractorSet::from_states(states)))
}

/// **(internal)** Parse a map of tuple strings into a parent index.
fn read_parents(
    parents: Option<&BTreeMap<String, Vec<String>>>,
    num_vars: usize,
) -> Result<Option<ParentIndex>, ValidationError> {
    let Some(parents) = parents else {
        return Ok(None);
    };
    let mut entries = Vec::with_capacity(parents.len());
    for (state, list) in parents {
        let state = State::try_from_tuple_string(state, num_vars)?;
        let list = list
            .iter()
            .map(|it| State::try_from_tuple_string(it, num_vars))
            .collect::<Result<Vec<_>, _>>()?;
        entries.push((state, list));
    }
    Ok(Some(ParentIndex::from_entries(entries)))
}

/// Read a network description from a JSON file.
pub fn read_description<P: AsRef<Path>>(path: P) -> Result<NetworkDescription, DatasetError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let description = serde_json::from_reader(reader)?;
    debug!("Loaded network description from {:?}.", path.as_ref());
    Ok(description)
}

/// Write a network description as pretty-printed JSON.
pub fn write_description<P: AsRef<Path>>(
    path: P,
    description: &NetworkDescription,
) -> Result<(), DatasetError> {
    write_json(path, description)
}

/// Read a JSON list of `[nodes, functions]` pairs and build the dynamics of every network.
pub fn read_network_list<P: AsRef<Path>>(path: P) -> Result<Vec<NetworkDynamics>, DatasetError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let pairs: Vec<(Vec<String>, Vec<String>)> = serde_json::from_reader(reader)?;
    let mut result = Vec::with_capacity(pairs.len());
    for (i, (nodes, functions)) in pairs.into_iter().enumerate() {
        let network = BooleanNetwork::new(nodes, functions)?;
        result.push(NetworkDynamics::new(network).with_label(&format!("bn_{i}")));
    }
    Ok(result)
}

/// Write any serializable value as pretty-printed JSON, creating parent directories.
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    debug!("Written {:?}.", path);
    Ok(())
}
