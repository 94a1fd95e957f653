pub mod inquire_driver;
pub mod prompt_driver;
pub mod render;
pub mod session;

pub use inquire_driver::InquireDriver;
pub use prompt_driver::{Cancelled, PromptDriver};
pub use session::run_session;
