//! Manifest command implementation

use colored::Colorize;
use relay_content::SourceManifest;

use crate::context::Context;
use crate::error::Result;

/// Write `.relay/manifest.yaml` for the source tree in the working directory
pub fn run_manifest(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let manifest = SourceManifest::generate(ctx.cwd(), &config.artifact_dirs())?;
    let path = manifest.write(ctx.cwd())?;

    println!(
        "{} Wrote {} ({} artifact(s))",
        "OK".green().bold(),
        path.display(),
        manifest.len()
    );
    Ok(())
}
