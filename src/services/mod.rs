//! Services module
//!
//! Business logic services that sit between the transport layer and the
//! repository.

pub mod fraud;
pub mod notes;
pub mod views;

pub use fraud::FraudDetector;
pub use notes::NotesService;
pub use views::ViewAggregator;
