//! Applications module - draft application tracking.
//!
//! Applications are the user area's view of trademark, design, and
//! e-service filings. While an application is in an editable status it is a
//! "draft" and participates in the single-owner lock protocol.

mod applications_model;
mod applications_service;
mod applications_traits;


pub use applications_model::{
    Application, ApplicationSearchQuery, ApplicationSearchResponse, ApplicationSearchResponseMeta,
    ApplicationUpdate, IpRightType, NewApplication, Sort,
};
pub use applications_service::ApplicationService;
pub use applications_traits::{ApplicationRepositoryTrait, ApplicationServiceTrait};
