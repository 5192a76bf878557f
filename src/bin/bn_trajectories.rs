use bn_trajectories::dataset::{
    generate_dataset, write_bnfinder_tables, write_dataset, DatasetConfig,
};
use bn_trajectories::dynamics::NetworkDynamics;
use bn_trajectories::generator::{generate_networks, GeneratorConfig};
use bn_trajectories::model_io::{
    read_description, read_network_list, write_description, NetworkDescription,
};
use bn_trajectories::trajectory::DEFAULT_MAX_STEPS;
use bn_trajectories::BooleanNetwork;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

#[derive(Parser)]
#[command(name = "bn_trajectories")]
#[command(about = "Generate Boolean networks and sample their trajectories")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true, global = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate random networks and store them (with attractors and parent indices)
    /// as `<PREFIX><i>.json`
    GenerateNetworks {
        /// Number of generated networks
        #[arg(long, default_value_t = 5, require_equals = true)]
        count: usize,
        /// Output filename prefix
        #[arg(long, default_value = "datasets/bn_", require_equals = true)]
        prefix: String,
        #[arg(long, default_value_t = 2, require_equals = true)]
        min_nodes: usize,
        #[arg(long, default_value_t = 3, require_equals = true)]
        max_nodes: usize,
        #[arg(long, default_value_t = 3, require_equals = true)]
        max_regulators: usize,
        /// RNG seed
        #[arg(long, short = 's', default_value_t = 42, require_equals = true)]
        seed: u64,
    },
    /// Sample trajectories of the given networks
    Sample {
        /// Network files: `.bnet` models or JSON network descriptions
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
        /// Read each JSON file as a list of `[nodes, functions]` pairs instead
        #[arg(long)]
        network_list: bool,
        #[arg(long, default_value_t = 1, require_equals = true)]
        frequency_low: usize,
        #[arg(long, default_value_t = 1, require_equals = true)]
        frequency_high: usize,
        #[arg(long, default_value_t = 10, require_equals = true)]
        length_low: usize,
        #[arg(long, default_value_t = 500, require_equals = true)]
        length_high: usize,
        /// Number of synchronous trajectories per network
        #[arg(long, default_value_t = 100, require_equals = true)]
        synchronous_count: usize,
        /// Number of asynchronous trajectories per network
        #[arg(long, default_value_t = 0, require_equals = true)]
        asynchronous_count: usize,
        /// Requested fraction of transient states in each trajectory
        #[arg(long, default_value_t = 0.0, require_equals = true)]
        target_ratio: f64,
        /// Step limit of each sampling phase
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS, require_equals = true)]
        max_steps: usize,
        /// Skip trajectories that exceed the step limit
        #[arg(long)]
        skip_failed: bool,
        /// RNG seed
        #[arg(long, short = 's', default_value_t = 42, require_equals = true)]
        seed: u64,
        /// Output JSON file
        #[arg(long, default_value = "datasets/trajectory_samples.json", require_equals = true)]
        output: String,
        /// Filename prefix of BNFinder tables (not written if missing)
        #[arg(long, require_equals = true)]
        bnfinder_prefix: Option<String>,
    },
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Warn,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    match args.command {
        Command::GenerateNetworks {
            count,
            prefix,
            min_nodes,
            max_nodes,
            max_regulators,
            seed,
        } => {
            let config = GeneratorConfig {
                min_nodes,
                max_nodes,
                max_regulators,
            };
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let networks = generate_networks(count, &config, &mut rng).unwrap_or_else(|e| {
                eprintln!("Failed to generate networks: {}", e);
                std::process::exit(1);
            });
            for (i, network) in networks.into_iter().enumerate() {
                let dynamics = NetworkDynamics::new(network);
                let path = format!("{prefix}{i}.json");
                let description = NetworkDescription::from_dynamics(&dynamics);
                if let Err(e) = write_description(&path, &description) {
                    eprintln!("Failed to write {}: {}", path, e);
                    std::process::exit(1);
                }
                println!("Written network with {} nodes to {}.", dynamics.num_vars(), path);
            }
        }
        Command::Sample {
            files,
            network_list,
            frequency_low,
            frequency_high,
            length_low,
            length_high,
            synchronous_count,
            asynchronous_count,
            target_ratio,
            max_steps,
            skip_failed,
            seed,
            output,
            bnfinder_prefix,
        } => {
            let config = DatasetConfig {
                frequency_low,
                frequency_high,
                length_low,
                length_high,
                synchronous_count,
                asynchronous_count,
                target_ratio,
                max_steps,
                seed,
                skip_failed,
            };
            if let Err(e) = config.validate() {
                eprintln!("Invalid parameters: {}", e);
                std::process::exit(1);
            }

            let mut networks = Vec::new();
            for file in &files {
                let loaded = load_networks(file, network_list).unwrap_or_else(|e| {
                    eprintln!("Failed to load networks from {}: {}", file, e);
                    std::process::exit(1);
                });
                networks.extend(loaded);
            }
            println!("Loaded {} network(s).", networks.len());

            let dataset = generate_dataset(&networks, &config).unwrap_or_else(|e| {
                eprintln!("Trajectory generation failed: {}", e);
                std::process::exit(1);
            });
            if let Err(e) = write_dataset(&output, &dataset) {
                eprintln!("Failed to write {}: {}", output, e);
                std::process::exit(1);
            }
            println!("Written trajectories to {}.", output);

            if let Some(prefix) = bnfinder_prefix {
                match write_bnfinder_tables(&prefix, &dataset) {
                    Ok(paths) => println!("Written {} BNFinder table(s).", paths.len()),
                    Err(e) => {
                        eprintln!("Failed to write BNFinder tables: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
    }
}

/// Load the networks of one input file.
fn load_networks(file: &str, network_list: bool) -> Result<Vec<NetworkDynamics>, String> {
    let path = Path::new(file);
    let label = path
        .file_stem()
        .map(|it| it.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());
    if path.extension().map(|it| it == "bnet").unwrap_or(false) {
        let network = BooleanNetwork::try_from_bnet_file(path)?;
        return Ok(vec![NetworkDynamics::new(network).with_label(&label)]);
    }
    if network_list {
        return read_network_list(path).map_err(|e| e.to_string());
    }
    let description = read_description(path).map_err(|e| e.to_string())?;
    let dynamics = description.to_dynamics().map_err(|e| e.to_string())?;
    Ok(vec![dynamics.with_label(&label)])
}
