//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `appgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `SourceRenderer`: Source unit to text
//!   - `NamespaceResolver`: Short entity name to qualified name
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, NamespaceResolver, SourceRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockNamespaceResolver, MockSourceRenderer};
