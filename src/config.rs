use crate::error::{Error, Result};

/// Configuration for one bonsai growth run.
#[derive(Clone, Debug)]
pub struct BonsaiConfig {
    /// Initial life budget for the trunk (higher = bigger tree).
    pub life_start: u32,
    /// Controls trunk width duration and shoot cooldown (higher = bushier).
    pub multiplier: u32,
    /// Glyphs drawn for dying/dead branches. Must be non-empty.
    pub leaves: Vec<String>,
    /// Gates the diagnostic overlay text on the canopy.
    pub verbosity: u8,
}

impl Default for BonsaiConfig {
    fn default() -> Self {
        Self {
            life_start: 32,
            multiplier: 5,
            leaves: vec!["&".to_string()],
            verbosity: 0,
        }
    }
}

impl BonsaiConfig {
    /// Reject misconfigurations before any growth step runs.
    pub fn validate(&self) -> Result<()> {
        if self.leaves.is_empty() {
            return Err(Error::InvalidConfiguration(
                "leaf glyph set must not be empty".to_string(),
            ));
        }
        if self.life_start == 0 {
            return Err(Error::InvalidConfiguration(
                "life_start must be at least 1".to_string(),
            ));
        }
        if self.multiplier == 0 {
            return Err(Error::InvalidConfiguration(
                "multiplier must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Branch types for the bonsai tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BranchType {
    Trunk,
    ShootLeft,
    ShootRight,
    Dying,
    Dead,
}

/// Counters for tracking generation progress. Reset at the start of each run.
#[derive(Default, Debug)]
pub struct Counters {
    /// Branch invocations, including every spawned child.
    pub branches: u32,
    /// Left/right shoots spawned from trunks.
    pub shoots: u32,
    /// Incrementing shoot id; its parity alternates shoot direction.
    pub shoot_counter: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BonsaiConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_leaves_rejected() {
        let conf = BonsaiConfig {
            leaves: vec![],
            ..BonsaiConfig::default()
        };
        assert!(matches!(
            conf.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_multiplier_rejected() {
        let conf = BonsaiConfig {
            multiplier: 0,
            ..BonsaiConfig::default()
        };
        assert!(conf.validate().is_err());
    }
}
