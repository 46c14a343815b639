pub mod menu;
pub mod session;
pub mod text_input;

pub use menu::{Control, Menu};
pub use session::Session;
