use anyhow::Context;

use tripsplit_cli::{STDIN_ARG, Snapshot, run};

fn main() -> anyhow::Result<()> {
    tripsplit_observability::init();

    let source = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::info!("no snapshot path given; reading from stdin");
        STDIN_ARG.to_string()
    });

    let snapshot = Snapshot::load(&source)?;
    let rendered = run(&snapshot).with_context(|| format!("while processing {source}"))?;
    println!("{rendered}");

    Ok(())
}
