//! Categories, budgets and transactions owned by users.

pub mod domain;
pub mod http;
