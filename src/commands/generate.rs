//! Generate static files

use anyhow::Result;

use crate::content::{ContentLoader, Timeline};
use crate::generator::Generator;
use crate::Blog;

/// Run one full build: load, order, render.
///
/// Every build starts from a fresh file scan and recomputes the ordered
/// sequence and navigation edges from scratch.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(blog);
    let report = loader.load()?;
    let timeline = Timeline::build(&report.records);

    tracing::info!(
        "Loaded {} posts ({} listed on the index)",
        report.records.len(),
        timeline.len()
    );
    if !report.warnings.is_empty() {
        tracing::warn!(
            "{} post(s) excluded from ordered views, see warnings above",
            report.warnings.len()
        );
    }

    let generator = Generator::new(blog)?;
    generator.generate(&report, &timeline)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
