//! Role tags and the static table of per-role influence parameters.
//!
//! Every number that shapes how strongly one agent sways another lives in
//! [`RoleTable`]; the contagion engine and proximity index only ever look
//! values up here.

use std::fmt;

use rustc_hash::FxHashMap;

/// The job an agent performs in the swarm.
///
/// The named roles cover the standard population; `Custom` keeps the set
/// open-ended for hosts that invent their own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Leader,
    Guard,
    Scout,
    #[default]
    Worker,
    Documenter,
    Debugger,
    Custom(u16),
}

impl Role {
    /// The named roles, in declaration order.
    pub const STANDARD: [Role; 6] = [
        Role::Leader,
        Role::Guard,
        Role::Scout,
        Role::Worker,
        Role::Documenter,
        Role::Debugger,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Leader     => f.write_str("leader"),
            Role::Guard      => f.write_str("guard"),
            Role::Scout      => f.write_str("scout"),
            Role::Worker     => f.write_str("worker"),
            Role::Documenter => f.write_str("documenter"),
            Role::Debugger   => f.write_str("debugger"),
            Role::Custom(n)  => write!(f, "custom-{n}"),
        }
    }
}

/// Which maximum-jump threshold applies to a role's transitions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdTier {
    #[default]
    Standard,
    /// Always validated against the transcendent threshold.
    Elevated,
}

/// Influence parameters for one role.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleProfile {
    /// Multiplier on the influence this role exerts on others.
    pub influence_weight: f32,
    /// Fraction of incoming influence this role shrugs off, in `[0, 1]`.
    pub resistance: f32,
    /// Distance beyond which this role exerts no influence.
    pub radius: f32,
    pub threshold_tier: ThresholdTier,
}

impl RoleProfile {
    pub const fn new(influence_weight: f32, resistance: f32, radius: f32) -> Self {
        Self {
            influence_weight,
            resistance,
            radius,
            threshold_tier: ThresholdTier::Standard,
        }
    }

    pub const fn elevated(mut self) -> Self {
        self.threshold_tier = ThresholdTier::Elevated;
        self
    }
}

/// Role → profile lookup, built once at startup.
///
/// Roles without an explicit entry (typically `Role::Custom`) resolve to the
/// table's fallback profile.
#[derive(Clone, Debug)]
pub struct RoleTable {
    profiles: FxHashMap<Role, RoleProfile>,
    fallback: RoleProfile,
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RoleTable {
    /// The tuned standard table.
    ///
    /// Leaders sway hardest and reach furthest; workers sway least and put up
    /// no resistance; documenters are the most resistant chroniclers.
    pub fn standard() -> Self {
        let mut profiles = FxHashMap::default();
        profiles.insert(Role::Leader,     RoleProfile::new(1.0, 0.3, 150.0).elevated());
        profiles.insert(Role::Guard,      RoleProfile::new(0.7, 0.5, 100.0));
        profiles.insert(Role::Scout,      RoleProfile::new(0.5, 0.2, 120.0));
        profiles.insert(Role::Worker,     RoleProfile::new(0.3, 0.0,  80.0));
        profiles.insert(Role::Documenter, RoleProfile::new(0.4, 0.7, 100.0));
        profiles.insert(Role::Debugger,   RoleProfile::new(0.5, 0.4, 100.0));
        Self {
            profiles,
            fallback: RoleProfile::new(0.3, 0.2, 100.0),
        }
    }

    /// A table where every role uses `profile`, sanitised as in [`set`](Self::set).
    pub fn uniform(profile: RoleProfile) -> Self {
        Self {
            profiles: FxHashMap::default(),
            fallback: sanitise(profile),
        }
    }

    /// Override the profile for `role`.  Values are sanitised: weight and
    /// radius are floored at zero, resistance clamped to `[0, 1]`.
    pub fn set(&mut self, role: Role, profile: RoleProfile) -> &mut Self {
        self.profiles.insert(role, sanitise(profile));
        self
    }

    /// Profile for `role`, or the fallback.
    #[inline]
    pub fn get(&self, role: Role) -> &RoleProfile {
        self.profiles.get(&role).unwrap_or(&self.fallback)
    }

    #[inline]
    pub fn influence_weight(&self, role: Role) -> f32 {
        self.get(role).influence_weight
    }

    #[inline]
    pub fn resistance(&self, role: Role) -> f32 {
        self.get(role).resistance
    }

    #[inline]
    pub fn radius(&self, role: Role) -> f32 {
        self.get(role).radius
    }

    /// Largest radius any role in the table can have.
    pub fn max_radius(&self) -> f32 {
        self.profiles
            .values()
            .map(|p| p.radius)
            .fold(self.fallback.radius, f32::max)
    }
}

fn sanitise(mut p: RoleProfile) -> RoleProfile {
    if p.influence_weight.is_nan() || p.influence_weight < 0.0 {
        tracing::warn!(weight = p.influence_weight, "negative influence weight floored at 0");
        p.influence_weight = 0.0;
    }
    if p.radius.is_nan() || p.radius < 0.0 {
        tracing::warn!(radius = p.radius, "negative radius floored at 0");
        p.radius = 0.0;
    }
    p.resistance = if p.resistance.is_nan() { 0.0 } else { p.resistance.clamp(0.0, 1.0) };
    p
}
