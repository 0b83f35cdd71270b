//! Change-notification event bus.
//!
//! The scene surface owns an [`EventBus`] instance and publishes an event
//! after every mutation. Observers (the layer panel projection, the
//! interaction controller's selection gating) subscribe with a synchronous
//! handler or receive asynchronously via a broadcast channel. Consumers treat
//! every event as "recompute from the surface", never as an incremental diff.

mod bus;
mod events;

pub use bus::{EventBus, EventBusConfig, EventBusError, SubscriptionId};
pub use events::{
    EditorEvent, EventCategory, EventFilter, ExportEvent, LayerEvent, SceneEvent, ServiceEvent,
};
