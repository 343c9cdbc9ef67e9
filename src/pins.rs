//! Default GPIO assignments for the Grove Circular LED connector.
//!
//! The Grove cable carries DI (data) on the primary signal wire and DCKI
//! (clock) on the secondary one. These are only defaults; the runtime
//! values come from [`RingConfig`](crate::config::RingConfig).

use crate::ports::PinId;

/// MY9221 DI input.
pub const RING_DATA_GPIO: PinId = 5;
/// MY9221 DCKI input.
pub const RING_CLOCK_GPIO: PinId = 4;
