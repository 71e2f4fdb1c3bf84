pub mod card;
pub mod preferences;
pub mod review;

pub use card::{card_key, Flashcard, ScheduleSlot, Topic};
pub use preferences::Preferences;
pub use review::{truncate_to_millis, ReviewEntry, INITIAL_EASE_FACTOR};
