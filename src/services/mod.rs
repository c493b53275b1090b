pub mod calendar;
pub mod character;
pub mod dashboard;
pub mod dates;
pub mod generation;
pub mod llm;
pub mod messages;
pub mod progress;
pub mod view_state;
