//! Build a seeded common receiver gather, convert it to a common source
//! gather and back, and report what happened.
//!
//! Usage: `cargo run --example roundtrip [config.json]`
//! Set `GATHER_LOG=debug` to see the reindexer's own log records.
use anyhow::{ensure, Context, Result};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gather_reindex::config::{load_reindex_config, ReindexConfig};
use gather_reindex::{Array2, CogGather};

const N_RECEIVERS: usize = 8;
const N_DEPTHS: usize = 100;
const N_TIMES: usize = 50;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default()
                .filter_or("GATHER_LOG", "error,gather_reindex=info,roundtrip=info"),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_reindex_config(&path)?,
        None => ReindexConfig::default(),
    };
    log::info!(
        "Using execution mode {} (threshold {})",
        config.mode,
        config.parallel_threshold
    );

    let mut rng = StdRng::seed_from_u64(42);
    let receivers = (0..N_RECEIVERS)
        .map(|r| {
            let data = (0..N_DEPTHS * N_TIMES).map(|_| rng.gen_range(-1.0..1.0)).collect();
            Array2::from_shape_vec((N_DEPTHS, N_TIMES), data)
                .with_context(|| format!("Failed to build receiver {}", r))
        })
        .collect::<Result<Vec<Array2<f64>>>>()?;

    let cog = CogGather::new(receivers)?;
    let csg = cog.to_csg_with_config(&config);
    log::info!(
        "COG {:?} -> CSG with {} depth gathers of shape {:?}",
        cog.dims(),
        csg.n_depths(),
        csg.depth(0).map(Array2::shape)
    );

    let back = csg.to_cog_with_config(&config);
    ensure!(back == cog, "Round trip did not restore the original gather");
    log::info!("Round trip restored all {} receivers", back.n_receivers());

    Ok(())
}
