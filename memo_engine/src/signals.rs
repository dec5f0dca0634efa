//! Boolean signal store seam.
//!
//! Host scripts branch on numbered boolean signals ("switches"). The `check*`
//! script commands write their query result into one of them.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

/// Signal identifier as used by host scripts.
pub type SignalId = u32;

/// External boolean flag array the host script engine reads.
pub trait SignalStore {
    fn set_signal(&mut self, id: SignalId, value: bool);
    fn signal(&self, id: SignalId) -> bool;
}

/// In-memory signal store. Unset signals read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switches {
    values: BTreeMap<SignalId, bool>,
}

impl Switches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals that have been written at least once, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalId, bool)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl SignalStore for Switches {
    fn set_signal(&mut self, id: SignalId, value: bool) {
        info!("signal {id} set to {value}");
        self.values.insert(id, value);
    }

    fn signal(&self, id: SignalId) -> bool {
        self.values.get(&id).copied().unwrap_or(false)
    }
}
