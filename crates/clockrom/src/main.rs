use anyhow::Context;
use clockrom::clock::{ClockRom, OUTPUT_PATH};
use romcraft::generate::write_image;
use tracing::info;

fn main() -> anyhow::Result<()> {
    clockrom::init_logging();

    let program = ClockRom::new().context("invalid clock configuration")?;
    let bytes = write_image(&program, OUTPUT_PATH)
        .with_context(|| format!("failed to write {OUTPUT_PATH}"))?;

    info!(path = OUTPUT_PATH, bytes, "clock image ready");
    Ok(())
}
