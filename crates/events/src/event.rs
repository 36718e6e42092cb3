use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts describing a state change that already
/// happened (e.g. an item was added to a cart).
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "cart.item.added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (session time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
