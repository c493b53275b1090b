pub mod dashboard;
pub mod goals;
pub mod health;
pub mod messages;
pub mod records;
pub mod view;
