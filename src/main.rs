use anyhow::Result;
use avc_meta::avc::ModConfig;
use avc_meta::commands::generate;
use clap::Parser;

/// avc-meta - AVC version file generator
///
/// Writes RealScience.version in the current directory for the given release tag.
/// The version checker reads this file to tell players an update is available.
///
/// Examples:
///   avc-meta 0.4.6.0     # Generate the version file for release 0.4.6.0
#[derive(Parser, Debug)]
#[command(about, disable_version_flag = true)]
struct Cli {
    /// Tag of the release in the format "major.minor.patch.build" (e.g. 0.4.6.0)
    #[arg(value_name = "TAG")]
    tag: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = avc_meta::runtime::RealRuntime;

    let path = generate(&runtime, &ModConfig::REAL_SCIENCE, &cli.tag)?;
    println!("Generated {} for {}", path.display(), cli.tag);
    Ok(())
}
