//! Times a fake request handler and logs the breakdown
//!
//! ```sh
//! RUST_LOG=timing_tree=info TIMING_TREE_CHILD_LIMIT=5 cargo run -p timing-tree --example request
//! ```

use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use timing_tree::{OptionalTimer, TimerNode, TimingConfig};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn load_rows(timer: Option<&mut TimerNode>, rows: u64) {
    let mut timer = timer;
    for row in 0..rows {
        let mut fetch = timer.start_child(format!("row {}", row));
        sleep(Duration::from_micros(50 + (row % 7) * 40));
        fetch.end();
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TimingConfig::from_env()?;
    config.apply();

    let mut root = config.start("handle request");

    root.start_child("authenticate").end();

    {
        let mut query = root.start_child("query");
        query.start_child("plan").end();
        load_rows(query.start_child("load rows"), 12);
        // "query" and everything under it still running ends with the root
    }

    root.end();
    root.log_tree(config.child_limit);

    if let Some(text) = root.render(config.child_limit) {
        println!("{}", text);
    }
    Ok(())
}
