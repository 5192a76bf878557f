use crate::BooleanNetwork;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build a network from `(name, rule)` pairs, panicking on invalid input.
pub fn mk_network(rules: &[(&str, &str)]) -> BooleanNetwork {
    BooleanNetwork::try_from_rules(rules).unwrap()
}

/// `x0 = false`, `x1 = x0`, `x2 = x1`.
///
/// The only attractor (under both semantics) is `000`. Under synchronous update, every
/// state reaches it in at most three steps, and state `x0 = 1, x1 = 1, x2 = 1` needs all
/// three.
pub fn mk_shift_register() -> BooleanNetwork {
    mk_network(&[("x0", "false"), ("x1", "x0"), ("x2", "x1")])
}

/// `x0 = !x1`, `x1 = x0`: a single synchronous cycle of length four.
pub fn mk_oscillator() -> BooleanNetwork {
    mk_network(&[("x0", "!x1"), ("x1", "x0")])
}

/// A deterministic random generator for tests.
pub fn mk_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
