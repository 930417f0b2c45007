//! Per-tab key-value persistence for the usage state.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::warn;

use crate::shell::usage::{Tier, UsageState};

pub const USAGE_COUNT_KEY: &str = "jdopt.usage_count";
pub const IS_PRO_KEY: &str = "jdopt.is_pro";
pub const PRO_TYPE_KEY: &str = "jdopt.pro_type";
pub const PRO_REMAINING_KEY: &str = "jdopt.pro_remaining";

/// A string-keyed store that lives as long as the browsing session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store; one per tab.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Reads the usage state. Missing keys take their defaults; unreadable ones
/// are logged and take their defaults too.
pub fn load_usage(store: &impl SessionStore) -> UsageState {
    let free_used = read_or_default::<u32>(store, USAGE_COUNT_KEY);
    let is_pro = read_or_default::<bool>(store, IS_PRO_KEY);
    let pack_remaining = read_or_default::<u32>(store, PRO_REMAINING_KEY);

    let tier = if is_pro {
        match store.get(PRO_TYPE_KEY) {
            Some(raw) => Tier::parse(&raw).unwrap_or_else(|| {
                warn!("Ignoring unreadable session value {PRO_TYPE_KEY}={raw:?}");
                Tier::None
            }),
            None => Tier::None,
        }
    } else {
        Tier::None
    };

    UsageState {
        free_used,
        tier,
        pack_remaining,
    }
}

pub fn save_usage(store: &mut impl SessionStore, usage: &UsageState) {
    store.set(USAGE_COUNT_KEY, usage.free_used.to_string());
    store.set(IS_PRO_KEY, (usage.tier != Tier::None).to_string());
    store.set(PRO_TYPE_KEY, usage.tier.as_str().to_string());
    store.set(PRO_REMAINING_KEY, usage.pack_remaining.to_string());
}

fn read_or_default<T: FromStr + Default>(store: &impl SessionStore, key: &str) -> T {
    match store.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unreadable session value {key}={raw:?}");
            T::default()
        }),
        None => T::default(),
    }
}
