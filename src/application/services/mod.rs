//! Application services - Use case implementations
//!
//! Services accept the catalog and the session store port and orchestrate the
//! pure domain services; each mutation runs to completion and persists before
//! returning.

pub mod session_service;
pub mod tracker_service;

pub use session_service::SessionService;
pub use tracker_service::{
    DestinationChoice, ExitGroup, ExitRow, SessionBoard, SessionGraph, TrackerService,
};
