pub mod authentication;
pub mod bank_links;
pub mod budgeting;
pub mod cli;
mod cors;
pub mod database;
mod extract;
pub mod http_err;
pub mod identities;
pub mod models;
pub mod passwords;
pub mod repos;
pub mod server;

#[cfg(test)]
mod test_support;
