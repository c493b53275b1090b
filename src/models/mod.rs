pub mod ai_message;
pub mod daily_record;
pub mod goals;
pub mod progress;
