//! Server Module
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - store selection from `AppConfig`
//! - **`init`** - state construction and app creation
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── state.rs   - AppState and FromRef implementations
//! ├── config.rs  - Store loading (memory or SQLite)
//! └── init.rs    - Server initialization and app creation
//! ```

/// Application state management
pub mod state;

/// Store loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_state};
pub use state::AppState;
