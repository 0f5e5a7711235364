//! Command line helper: extract a kinematic chain from a URDF description
//! and report what the solver would see.

use anyhow::{Context, Result};
use clap::Parser;
use rs_redundant_kinematics::kinematic_traits::joints_at_zero;
use rs_redundant_kinematics::urdf::extract_chain_from_file;
use rs_redundant_kinematics::utils::dump_pose;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rk-chain",
    about = "Inspect the kinematic chain between two links of a URDF robot description"
)]
struct Args {
    /// URDF file with the robot description
    urdf: PathBuf,

    /// Link the chain starts from
    #[arg(long)]
    base: String,

    /// Link the chain ends at
    #[arg(long)]
    tip: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let chain = extract_chain_from_file(&args.urdf, &args.base, &args.tip)
        .with_context(|| format!("cannot extract chain {} -> {}", args.base, args.tip))?;

    println!(
        "{} actuated joints, {} links",
        chain.dof(),
        chain.link_names().len()
    );
    for joint in chain.joints() {
        println!(
            "  {:24} [{:8.3}, {:8.3}] rad, moves {}",
            joint.name, joint.bounds.0, joint.bounds.1, joint.child_link
        );
    }

    println!("link poses at the zero configuration:");
    let zeros = joints_at_zero(chain.dof());
    for link in chain.link_names() {
        let pose = chain.pose_of(link, &zeros)?;
        print!("  {:24} ", link);
        dump_pose(&pose);
    }
    Ok(())
}
