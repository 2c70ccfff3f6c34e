mod academic_record;
mod artifact;
mod backend;
mod backend_state;
mod course;
mod message;
mod search_input;

pub use academic_record::*;
pub use artifact::*;
pub use backend::*;
pub use backend_state::*;
pub use course::*;
pub use message::*;
pub use search_input::*;
