//! Shell settings read from the environment.

use orbs_core::{BoardConfig, LeapRule};
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ShellConfigError {
    #[error("Invalid SERVER_ADDR {0:?}: {1}")]
    InvalidAddr(String, AddrParseError),

    #[error("Unknown leap rule {0:?}, expected \"run\" or \"mirror\"")]
    UnknownLeapRule(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub addr: SocketAddr,
    pub leap_rule: LeapRule,
}

impl ShellConfig {
    /// Read `SERVER_ADDR` and `ORBS_LEAP_RULE`
    pub fn from_env() -> Result<Self, ShellConfigError> {
        Self::from_vars(
            std::env::var("SERVER_ADDR").ok(),
            std::env::var("ORBS_LEAP_RULE").ok(),
        )
    }

    pub fn from_vars(addr: Option<String>, leap_rule: Option<String>) -> Result<Self, ShellConfigError> {
        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = addr
            .parse()
            .map_err(|e| ShellConfigError::InvalidAddr(addr.clone(), e))?;

        let leap_rule = match leap_rule.as_deref().map(str::trim) {
            None | Some("") => LeapRule::default(),
            Some(rule) if rule.eq_ignore_ascii_case("run") => LeapRule::Run,
            Some(rule) if rule.eq_ignore_ascii_case("mirror") => LeapRule::Mirror,
            Some(other) => return Err(ShellConfigError::UnknownLeapRule(other.to_string())),
        };

        Ok(Self { addr, leap_rule })
    }

    /// Board settings for every new game of this shell
    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            leap_rule: self.leap_rule,
            ..BoardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_vars(None, None).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.leap_rule, LeapRule::Run);
    }

    #[test]
    fn test_leap_rule_names() {
        let config = ShellConfig::from_vars(None, Some("Mirror".into())).unwrap();
        assert_eq!(config.board_config().leap_rule, LeapRule::Mirror);
        assert!(matches!(
            ShellConfig::from_vars(None, Some("hop".into())),
            Err(ShellConfigError::UnknownLeapRule(_))
        ));
    }

    #[test]
    fn test_bad_addr() {
        assert!(matches!(
            ShellConfig::from_vars(Some("nowhere".into()), None),
            Err(ShellConfigError::InvalidAddr(..))
        ));
    }
}
