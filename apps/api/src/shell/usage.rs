//! Session usage accounting: how many optimizations the current tab may still run.
//!
//! The state is a plain value; every mutation goes through [`UsageState::apply`].

/// Free optimizations granted to a session with no unlocked tier.
pub const FREE_LIMIT: u32 = 2;
/// Optimizations granted by a pack activation code.
pub const PACK_SIZE: u32 = 10;

/// Unlocked tier for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tier {
    #[default]
    None,
    Pack,
    Unlimited,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Pack => "pack",
            Tier::Unlimited => "unlimited",
        }
    }

    pub fn parse(value: &str) -> Option<Tier> {
        match value {
            "none" => Some(Tier::None),
            "pack" => Some(Tier::Pack),
            "unlimited" => Some(Tier::Unlimited),
            _ => None,
        }
    }
}

/// What the session may still do, for display next to the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Limited(u32),
    Unlimited,
}

/// Why a submission was refused before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaExhausted {
    FreeUsed,
    PackUsed,
}

/// State transitions for [`UsageState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageEvent {
    /// The relay returned a rewrite.
    Optimized,
    /// A pack activation code was accepted.
    PackActivated,
    /// An unlimited activation code was accepted.
    UnlimitedActivated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageState {
    pub free_used: u32,
    pub tier: Tier,
    pub pack_remaining: u32,
}

impl UsageState {
    /// Checks whether one more optimization is allowed.
    pub fn check(&self) -> Result<(), QuotaExhausted> {
        match self.tier {
            Tier::Unlimited => Ok(()),
            Tier::Pack if self.pack_remaining > 0 => Ok(()),
            Tier::Pack => Err(QuotaExhausted::PackUsed),
            Tier::None if self.free_used < FREE_LIMIT => Ok(()),
            Tier::None => Err(QuotaExhausted::FreeUsed),
        }
    }

    pub fn remaining(&self) -> Remaining {
        match self.tier {
            Tier::Unlimited => Remaining::Unlimited,
            Tier::Pack => Remaining::Limited(self.pack_remaining),
            Tier::None => Remaining::Limited(FREE_LIMIT.saturating_sub(self.free_used)),
        }
    }

    /// The single state-update function for session usage.
    pub fn apply(self, event: UsageEvent) -> UsageState {
        match event {
            UsageEvent::Optimized => match self.tier {
                Tier::None => UsageState {
                    free_used: self.free_used.saturating_add(1),
                    ..self
                },
                Tier::Pack => UsageState {
                    pack_remaining: self.pack_remaining.saturating_sub(1),
                    ..self
                },
                Tier::Unlimited => self,
            },
            UsageEvent::PackActivated => UsageState {
                free_used: 0,
                tier: Tier::Pack,
                pack_remaining: PACK_SIZE,
            },
            UsageEvent::UnlimitedActivated => UsageState {
                tier: Tier::Unlimited,
                ..self
            },
        }
    }
}
