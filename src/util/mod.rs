mod sys;

pub use sys::{msg, yesno};
