/*!
 * Scheduler Types
 * Policy identifiers and validated policy parameters
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_AGING_AMOUNT, DEFAULT_AGING_INTERVAL, DEFAULT_BOOST_INTERVAL, DEFAULT_MLFQ_QUANTA,
    DEFAULT_TIME_QUANTUM,
};
use crate::core::types::SimTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Round Robin time quantum (ms, always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(SimTime);

impl TimeQuantum {
    pub fn new(millis: SimTime) -> Result<Self, ConfigError> {
        if millis == 0 {
            return Err(ConfigError::InvalidQuantum(millis));
        }
        Ok(Self(millis))
    }

    #[inline(always)]
    pub const fn as_millis(&self) -> SimTime {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(DEFAULT_TIME_QUANTUM)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = SimTime::deserialize(deserializer)?;
        Self::new(millis).map_err(serde::de::Error::custom)
    }
}

/// Priority-with-Aging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgingConfig {
    interval: SimTime,
    amount: i32,
}

impl AgingConfig {
    pub fn new(interval: SimTime, amount: i32) -> Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::InvalidAgingInterval(interval));
        }
        if amount <= 0 {
            return Err(ConfigError::InvalidAgingAmount(amount));
        }
        Ok(Self { interval, amount })
    }

    #[inline]
    pub const fn interval(&self) -> SimTime {
        self.interval
    }

    #[inline]
    pub const fn amount(&self) -> i32 {
        self.amount
    }
}

impl Default for AgingConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_AGING_INTERVAL,
            amount: DEFAULT_AGING_AMOUNT,
        }
    }
}

impl<'de> Deserialize<'de> for AgingConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            #[serde(default = "default_aging_interval")]
            interval: SimTime,
            #[serde(default = "default_aging_amount")]
            amount: i32,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.interval, inner.amount).map_err(serde::de::Error::custom)
    }
}

fn default_aging_interval() -> SimTime {
    DEFAULT_AGING_INTERVAL
}

fn default_aging_amount() -> i32 {
    DEFAULT_AGING_AMOUNT
}

/// MLFQ parameters
///
/// One entry per level; `None` means the level runs its process to completion and is
/// only allowed as the last level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MlfqConfig {
    quanta: Vec<Option<SimTime>>,
    boost_interval: SimTime,
    preempt_top_level: bool,
}

impl MlfqConfig {
    pub fn new(quanta: Vec<Option<SimTime>>, boost_interval: SimTime) -> Result<Self, ConfigError> {
        if quanta.is_empty() {
            return Err(ConfigError::EmptyQuantumVector);
        }
        let last = quanta.len() - 1;
        for (level, quantum) in quanta.iter().enumerate() {
            match quantum {
                Some(0) => return Err(ConfigError::InvalidLevelQuantum { level, quantum: 0 }),
                None if level != last => return Err(ConfigError::UnboundedLevel { level }),
                _ => {}
            }
        }
        if boost_interval == 0 {
            return Err(ConfigError::InvalidBoostInterval(boost_interval));
        }
        Ok(Self {
            quanta,
            boost_interval,
            preempt_top_level: false,
        })
    }

    /// Let arrivals truncate level-0 slices as well (off by default)
    pub fn with_top_level_preemption(mut self, enabled: bool) -> Self {
        self.preempt_top_level = enabled;
        self
    }

    #[inline]
    pub fn levels(&self) -> usize {
        self.quanta.len()
    }

    /// Quantum of `level`, `None` for run-to-completion
    #[inline]
    pub fn quantum(&self, level: usize) -> Option<SimTime> {
        self.quanta.get(level).copied().flatten()
    }

    #[inline]
    pub fn boost_interval(&self) -> SimTime {
        self.boost_interval
    }

    #[inline]
    pub fn preempt_top_level(&self) -> bool {
        self.preempt_top_level
    }
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self {
            quanta: DEFAULT_MLFQ_QUANTA.to_vec(),
            boost_interval: DEFAULT_BOOST_INTERVAL,
            preempt_top_level: false,
        }
    }
}

impl<'de> Deserialize<'de> for MlfqConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Inner {
            #[serde(default = "default_mlfq_quanta")]
            quanta: Vec<Option<SimTime>>,
            #[serde(default = "default_boost_interval")]
            boost_interval: SimTime,
            #[serde(default)]
            preempt_top_level: bool,
        }

        let inner = Inner::deserialize(deserializer)?;
        Self::new(inner.quanta, inner.boost_interval)
            .map(|config| config.with_top_level_preemption(inner.preempt_top_level))
            .map_err(serde::de::Error::custom)
    }
}

fn default_mlfq_quanta() -> Vec<Option<SimTime>> {
    DEFAULT_MLFQ_QUANTA.to_vec()
}

fn default_boost_interval() -> SimTime {
    DEFAULT_BOOST_INTERVAL
}

/// The seven scheduling policies, with their parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SchedulingPolicy {
    Fcfs,
    Sjf,
    Srtf,
    #[serde(alias = "rr")]
    RoundRobin {
        #[serde(default)]
        time_quantum: TimeQuantum,
    },
    Priority,
    #[serde(alias = "preemptive_priority")]
    PriorityAging(AgingConfig),
    Mlfq(MlfqConfig),
}

impl SchedulingPolicy {
    pub fn round_robin(time_quantum: SimTime) -> Result<Self, ConfigError> {
        Ok(Self::RoundRobin {
            time_quantum: TimeQuantum::new(time_quantum)?,
        })
    }

    pub fn priority_aging(interval: SimTime, amount: i32) -> Result<Self, ConfigError> {
        Ok(Self::PriorityAging(AgingConfig::new(interval, amount)?))
    }

    pub fn mlfq(quanta: Vec<Option<SimTime>>, boost_interval: SimTime) -> Result<Self, ConfigError> {
        Ok(Self::Mlfq(MlfqConfig::new(quanta, boost_interval)?))
    }

    /// Parse a policy identifier; parameterised policies get their defaults
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srtf" => Ok(Self::Srtf),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin {
                time_quantum: TimeQuantum::default(),
            }),
            "priority" | "prio" => Ok(Self::Priority),
            "priority_aging" | "preemptive_priority" | "aging" => {
                Ok(Self::PriorityAging(AgingConfig::default()))
            }
            "mlfq" => Ok(Self::Mlfq(MlfqConfig::default())),
            _ => Err(ConfigError::UnknownPolicy(name.to_string())),
        }
    }

    /// Every policy with its default parameters, in canonical order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Fcfs,
            Self::Sjf,
            Self::Srtf,
            Self::RoundRobin {
                time_quantum: TimeQuantum::default(),
            },
            Self::Priority,
            Self::PriorityAging(AgingConfig::default()),
            Self::Mlfq(MlfqConfig::default()),
        ]
    }

    /// Stable identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::RoundRobin { .. } => "round_robin",
            Self::Priority => "priority",
            Self::PriorityAging(_) => "priority_aging",
            Self::Mlfq(_) => "mlfq",
        }
    }

    pub const fn is_preemptive(&self) -> bool {
        !matches!(self, Self::Fcfs | Self::Sjf | Self::Priority)
    }

    /// Number of ready-queue levels the policy uses
    pub fn queue_levels(&self) -> usize {
        match self {
            Self::Mlfq(config) => config.levels(),
            _ => 1,
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => f.write_str("FCFS"),
            Self::Sjf => f.write_str("SJF"),
            Self::Srtf => f.write_str("SRTF"),
            Self::RoundRobin { time_quantum } => {
                write!(f, "Round Robin (q={})", time_quantum.as_millis())
            }
            Self::Priority => f.write_str("Priority (Non-Preemptive)"),
            Self::PriorityAging(_) => f.write_str("Priority (Preemptive with Aging)"),
            Self::Mlfq(_) => f.write_str("MLFQ"),
        }
    }
}

impl FromStr for SchedulingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
