//! Disease compartments.
//!
//! SEIR-like with an extra `OnTreatment` state between infection and
//! immunity.  Every citizen is in exactly one compartment at all times.

use std::str::FromStr;

use crate::CoreError;

/// The disease state of a citizen.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compartment {
    #[default]
    Susceptible,
    /// Carries the bacteria; progresses to `Infected` after incubation.
    Exposed,
    /// Active, contagious case.  Expels particles every hour.
    Infected,
    /// Diagnosed and treated; no longer contagious.
    OnTreatment,
    /// Recovered; becomes susceptible again after full recovery.
    Immune,
}

impl Compartment {
    /// All compartments, in cycle order.
    pub const ALL: [Compartment; 5] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::OnTreatment,
        Compartment::Immune,
    ];

    /// `true` for `Exposed`, `Infected` and `OnTreatment`.
    #[inline]
    pub fn is_active_case(self) -> bool {
        matches!(
            self,
            Compartment::Exposed | Compartment::Infected | Compartment::OnTreatment
        )
    }

    /// Lower-case label, used for CSV columns and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Compartment::Susceptible => "susceptible",
            Compartment::Exposed     => "exposed",
            Compartment::Infected    => "infected",
            Compartment::OnTreatment => "on_treatment",
            Compartment::Immune      => "immune",
        }
    }
}

impl std::fmt::Display for Compartment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compartment {
    type Err = CoreError;

    /// Case-insensitive; accepts `on_treatment`, `on-treatment` and
    /// `ontreatment`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "susceptible" | "s" => Ok(Compartment::Susceptible),
            "exposed" | "e"     => Ok(Compartment::Exposed),
            "infected" | "i"    => Ok(Compartment::Infected),
            "ontreatment" | "t" => Ok(Compartment::OnTreatment),
            "immune" | "r"      => Ok(Compartment::Immune),
            _ => Err(CoreError::UnknownCompartment(s.to_owned())),
        }
    }
}
