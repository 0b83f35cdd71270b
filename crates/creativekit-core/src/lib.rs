//! # CreativeKit Core
//!
//! Core types, events, and service traits for CreativeKit.
//! Provides the fundamental abstractions shared by the editor:
//! the error taxonomy, the change-notification event bus, editor-wide
//! constants, and the traits for external collaborators (asset catalog,
//! creative generation, attention analysis).

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod services;

pub use error::{Error, LoadError, Result, SceneError, ServiceError};

pub use event_bus::{
    EditorEvent, EventBus, EventBusConfig, EventCategory, EventFilter, ExportEvent, LayerEvent,
    SceneEvent, ServiceEvent, SubscriptionId,
};

pub use services::{
    AssetCatalog, AssetKind, AssetRecord, AttentionAnalysis, AttentionRegion, AttentionService,
    GeneratedCreative, GenerationParams, GenerationService,
};
