// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planner configuration and strategy selection.
//!
//! The strategy is chosen once, when the display's driver is known, and is
//! then passed to the [`Planner`](crate::planner::Planner) by value.

use core::fmt;
use core::str::FromStr;

use crate::classify::CapabilityPolicy;

/// Drivers whose planes cannot be trusted with anything but the client
/// target.
const CLIENT_ONLY_DRIVERS: &[&str] = &["kirin", "mediatek-drm"];

/// How layers are distributed between planes and the client target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Classify layers, build the mandatory client range, grow it for the
    /// plane budget.
    #[default]
    Generic,
    /// Composite every layer on the client path, every frame.
    ClientOnly,
}

impl Strategy {
    /// Picks the strategy for a display driver.
    ///
    /// Known GPU-only drivers get [`ClientOnly`](Self::ClientOnly); every
    /// other driver gets [`Generic`](Self::Generic).
    #[must_use]
    pub fn for_driver(driver: &str) -> Self {
        if CLIENT_ONLY_DRIVERS.contains(&driver) {
            Self::ClientOnly
        } else {
            Self::Generic
        }
    }

    /// The name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::ClientOnly => "client",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownStrategy;

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown composition strategy (expected \"generic\" or \"client\")")
    }
}

impl core::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "generic" => Ok(Self::Generic),
            "client" => Ok(Self::ClientOnly),
            _ => Err(UnknownStrategy),
        }
    }
}

/// Configuration for the [`Planner`](crate::planner::Planner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlannerConfig {
    /// Distribution strategy.
    pub strategy: Strategy,
    /// Layer classification policy.
    pub capability: CapabilityPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::generic()
    }
}

impl PlannerConfig {
    /// Plane-aware planning with the stock classifier.
    #[must_use]
    pub const fn generic() -> Self {
        Self {
            strategy: Strategy::Generic,
            capability: CapabilityPolicy {
                force_gpu_for_scaling: false,
            },
        }
    }

    /// Everything on the client path.
    #[must_use]
    pub const fn client_only() -> Self {
        Self {
            strategy: Strategy::ClientOnly,
            capability: CapabilityPolicy {
                force_gpu_for_scaling: false,
            },
        }
    }

    /// Configuration for a display driven by `driver`, honouring an optional
    /// strategy override (for example from a system property).
    ///
    /// An override that does not parse is an error rather than being
    /// silently ignored.
    pub fn for_driver(
        driver: &str,
        strategy_override: Option<&str>,
    ) -> Result<Self, UnknownStrategy> {
        let strategy = match strategy_override {
            Some(name) => name.parse()?,
            None => Strategy::for_driver(driver),
        };
        Ok(Self {
            strategy,
            ..Self::generic()
        })
    }

    /// Returns this configuration with scaled layers forced onto the GPU.
    #[must_use]
    pub const fn with_forced_gpu_scaling(mut self, force: bool) -> Self {
        self.capability.force_gpu_for_scaling = force;
        self
    }
}
