// Application layer - use cases and orchestration over the domain model.
// Reporting is pure; the service owns the wallet list and its repository.

pub mod error;
pub mod reporting;
pub mod sample;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use sample::*;
pub use service::*;
