//! hexplot - a static hexagonal radar chart.
//!
//! Six per-axis magnitudes scale the vertices of a filled hexagon, framed
//! by spoke and perimeter lines and labelled with GPU glyph-texture text.
//! The chart content is compile-time constant; the window redraws the same
//! frame until closed.

mod chart;
mod geometry;
mod gpu;
mod layout;
mod math;
mod shell;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("starting hexplot");
    shell::run()
}
