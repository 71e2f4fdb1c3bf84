pub mod due;
pub mod scheduler;
pub mod sm2;

pub use due::{due_cards, hardest_cards, rapid_review_cards, DueCard, RankedCard};
pub use scheduler::Scheduler;
pub use sm2::calculate_review;
