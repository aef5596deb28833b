//! Trap-disposition statistics.

use serde::{Deserialize, Serialize};

/// Counts of how trapped operations were disposed of, for reporting by an
/// embedding simulator or driver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapCounters {
    /// Queue-decode invocations.
    pub decodes: u64,
    /// Slots re-dispatched after an UNIMPLEMENTED capture.
    pub redispatched: u64,
    /// Terminal invalid-operation signals.
    pub invalid: u64,
    /// Terminal division-by-zero signals.
    pub div_by_zero: u64,
    /// Overflow slots, trapped or unwrapped.
    pub overflow: u64,
    /// Underflow slots, trapped or unwrapped.
    pub underflow: u64,
    /// Terminal inexact signals.
    pub inexact: u64,
    /// Illegal-instruction escalations.
    pub illegal: u64,
    /// Decodes that drained every slot clean and resumed.
    pub resumed: u64,
}
