//! `dse volume` command - Ellipsoid volume from semi-axes

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::ellipsoid_volume;

#[derive(clap::Args, Debug)]
pub struct VolumeArgs {
    /// Semi-axis length along local x (m)
    #[arg(long = "dvx", value_parser = clap::value_parser!(i64).range(0..))]
    pub d_vx: i64,

    /// Semi-axis length along local y (m)
    #[arg(long = "dvy", value_parser = clap::value_parser!(i64).range(0..))]
    pub d_vy: i64,

    /// Semi-axis length along local z (m)
    #[arg(long = "dvz", value_parser = clap::value_parser!(i64).range(0..))]
    pub d_vz: i64,
}

/// Run the volume command
pub fn run(args: VolumeArgs, global: &GlobalOpts) -> Result<()> {
    let volume = ellipsoid_volume(args.d_vx, args.d_vy, args.d_vz);

    let summary = serde_json::json!({
        "dVx": args.d_vx,
        "dVy": args.d_vy,
        "dVz": args.d_vz,
        "volume": volume,
    });

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&summary).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&summary).into_diagnostic()?);
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{:.2}", volume);
        }
    }

    Ok(())
}
