//! Domain Layer
//!
//! The core of Wampa - change detection and formatting without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Snapshots, changes, watcher events
//! - `value_objects/` - Immutable value types (Source, ConfigWarning)
//! - `services/` - Pure services (snapshot differ, output formatter)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
