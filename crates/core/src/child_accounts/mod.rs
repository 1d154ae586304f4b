//! Child accounts module - delegated accounts under a user-area account.

mod child_accounts_model;
mod child_accounts_service;
mod child_accounts_traits;

pub use child_accounts_model::{
    ChildAccount, ChildAccountUpdate, ChildPermission, NewChildAccount,
};
pub use child_accounts_service::ChildAccountService;
pub use child_accounts_traits::{ChildAccountRepositoryTrait, ChildAccountServiceTrait};
