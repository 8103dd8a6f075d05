//! # Change Planner
//!
//! Pure decision logic shared by the lifecycle operations: how the password
//! is resolved and which tag mutations are required. Nothing in here touches
//! the store.

pub mod password;
pub mod tags;

pub use password::{plan_password, PasswordAction, PasswordPlan};
pub use tags::{plan_tags, TagDelta};
