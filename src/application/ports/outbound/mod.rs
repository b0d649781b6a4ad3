//! Outbound ports - Interfaces the application requires from external systems

mod session_store_port;

pub use session_store_port::{AppSelection, SessionStorePort, StoreError};
