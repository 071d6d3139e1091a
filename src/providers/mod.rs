pub mod json_file;
pub mod memory;
pub mod position;
pub mod seed;
pub mod traits;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use position::{locate, FixedPosition, IpGeolocator, ObserverState};
pub use traits::{ListingRepository, PositionProvider};
