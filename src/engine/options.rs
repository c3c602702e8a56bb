/// Configuration options for the engine
use crate::grover::{GroverConfig, Schedule};

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Knobs passed to every recommendation request
    pub grover: GroverConfig,
    /// Whether a failing command aborts the process
    pub strict_mode: bool,
}

impl EngineOptions {
    pub fn new(grover: GroverConfig, strict_mode: bool) -> Self {
        Self { grover, strict_mode }
    }

    /// Set an option by its protocol name. The search configuration is
    /// validated as a whole and left untouched on error.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        let mut grover = self.grover.clone();

        match name {
            "conditions" => grover.conditions = value.parse().context("invalid conditions")?,
            "shots" => grover.shots = value.parse().context("invalid shots")?,
            "seed" => grover.seed = match value {
                "none" => None,
                _ => Some(value.parse().context("invalid seed")?),
            },
            "schedule" => grover.schedule = match value {
                "default" => None,
                _ => Some(value.parse::<Schedule>()?),
            },
            "marking" => grover.marking = value.parse()?,
            "trace" => grover.trace = value.parse().context("invalid trace")?,
            "maxmoves" => grover.max_moves = value.parse().context("invalid maxmoves")?,
            "strictmode" => {
                self.strict_mode = value.parse().context("invalid strictmode")?;
                return Ok(());
            }
            _ => bail!("Unknown option: {}", name),
        }

        grover.validate()?;
        self.grover = grover;

        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            grover: GroverConfig::default(),
            strict_mode: true,
        }
    }
}
