//! `keeper detect`

use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct DetectArgs {}

impl DetectArgs {
    pub fn run(self) -> Result<()> {
        match keeper_detector::detect() {
            Some(kind) => println!("{kind}"),
            None => println!("none"),
        }
        Ok(())
    }
}
