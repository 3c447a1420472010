pub mod storage;
pub mod types;

pub use storage::{load_meet, parse_meet, save_meet};
pub use types::{Event, Gender, MeetState, PlaceResult, Team, MEET_VERSION};
