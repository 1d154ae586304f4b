//! Correspondence module - letters from the office to the user area.
//!
//! Letters are immutable once recorded; they do not participate in the
//! lock protocol. The only mutation is marking a letter as read.

mod correspondence_model;
mod correspondence_service;
mod correspondence_traits;

pub use correspondence_model::{Letter, NewLetter};
pub use correspondence_service::CorrespondenceService;
pub use correspondence_traits::{CorrespondenceRepositoryTrait, CorrespondenceServiceTrait};
