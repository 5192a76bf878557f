use crate::dataset::NetworkTrajectories;
use crate::model_io::write_json;
use crate::DatasetError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Render the trajectories of one network as a BNFinder input table.
///
/// The header lists one `serie<k>:<t>` column for every sample `t` of every trajectory `k`.
/// Then follows one row per node, named `x<i>`, with the value of the node in each sample.
/// All values are tab-separated. Returns `None` if there is no sample to write.
pub fn to_bnfinder_table(entry: &NetworkTrajectories) -> Option<String> {
    let num_vars = entry.trajectories.first()?.states.first()?.len();
    let mut header = String::new();
    let mut rows = vec![String::new(); num_vars];
    for (k, trajectory) in entry.trajectories.iter().enumerate() {
        for (t, state) in trajectory.states.iter().enumerate() {
            header.push_str(&format!("\tserie{k}:{t}"));
            for (row, value) in rows.iter_mut().zip(state.chars()) {
                row.push('\t');
                row.push(value);
            }
        }
    }
    let mut result = header;
    result.push('\n');
    for (i, row) in rows.iter().enumerate() {
        result.push_str(&format!("x{i}{row}\n"));
    }
    Some(result)
}

/// Write one BNFinder table per network to `{prefix}_bn_{id}_trajectories.txt`.
///
/// Networks without samples are skipped. Returns the paths of the written files.
pub fn write_bnfinder_tables(
    prefix: &str,
    dataset: &[NetworkTrajectories],
) -> Result<Vec<PathBuf>, DatasetError> {
    let mut written = Vec::new();
    for entry in dataset {
        let Some(table) = to_bnfinder_table(entry) else {
            continue;
        };
        let path = PathBuf::from(format!("{prefix}_bn_{}_trajectories.txt", entry.bn_id));
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(table.as_bytes())?;
        writer.flush()?;
        info!("Created {:?}.", path);
        written.push(path);
    }
    Ok(written)
}

/// Write the whole dataset as a JSON list.
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    dataset: &[NetworkTrajectories],
) -> Result<(), DatasetError> {
    write_json(path, dataset)
}

#[cfg(test)]
mod tests {
    use crate::dataset::{to_bnfinder_table, write_bnfinder_tables, write_dataset, NetworkTrajectories};
    use crate::trajectory::TrajectoryRecord;

    fn record(synchronous: bool, states: &[&str]) -> TrajectoryRecord {
        TrajectoryRecord {
            synchronous,
            frequency: 1,
            length: states.len(),
            target_ratio: 0.0,
            achieved_ratio: 0.0,
            transient_count: 0,
            states: states.iter().map(|it| it.to_string()).collect(),
        }
    }

    #[test]
    fn bnfinder_table_layout() {
        let entry = NetworkTrajectories {
            bn_id: 3,
            trajectories: vec![
                record(true, &["100", "010"]),
                record(false, &["111", "011", "001"]),
            ],
        };
        let table = to_bnfinder_table(&entry).unwrap();
        let expected = "\tserie0:0\tserie0:1\tserie1:0\tserie1:1\tserie1:2\n\
                        x0\t1\t0\t1\t0\t0\n\
                        x1\t0\t1\t1\t1\t0\n\
                        x2\t0\t0\t1\t1\t1\n";
        assert_eq!(expected, table);
        assert_eq!(4, table.lines().count());
        for line in table.lines() {
            assert_eq!(6, line.split('\t').count());
        }
    }

    #[test]
    fn empty_entries_have_no_table() {
        let entry = NetworkTrajectories {
            bn_id: 0,
            trajectories: vec![],
        };
        assert_eq!(None, to_bnfinder_table(&entry));
    }

    #[test]
    fn export_files() {
        let dir = std::env::temp_dir().join("bn_trajectories_export_test");
        let dataset = vec![
            NetworkTrajectories {
                bn_id: 0,
                trajectories: vec![record(true, &["10", "01"])],
            },
            NetworkTrajectories {
                bn_id: 1,
                trajectories: vec![],
            },
        ];
        let prefix = dir.join("testcase").to_string_lossy().to_string();
        let written = write_bnfinder_tables(&prefix, &dataset).unwrap();
        assert_eq!(1, written.len());
        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!("\tserie0:0\tserie0:1\nx0\t1\t0\nx1\t0\t1\n", content);

        let path = dir.join("trajectories.json");
        write_dataset(&path, &dataset).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let restored: Vec<NetworkTrajectories> = serde_json::from_str(&content).unwrap();
        assert_eq!(dataset, restored);
    }
}
