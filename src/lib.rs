//! Galaxy map core: seeded galaxy generation, lane adjacency and the
//! interactive map controller (camera, selection, fleet transit).

pub mod configs;
pub mod controller;
pub mod dev;
pub mod fleet;
pub mod frame;
pub mod generation;
pub mod graph;
pub mod id;
pub mod logger;
pub mod orders;
pub mod rng;
pub mod system;
pub mod viewport;

pub use ahash::{AHashMap, AHashSet};
pub use configs::*;
pub use controller::*;
pub use fleet::*;
pub use frame::*;
pub use generation::*;
pub use glam::DVec2;
pub use graph::*;
pub use id::*;
pub use orders::*;
pub use rng::SeededRng;
pub use serde::{Deserialize, Serialize};
pub use system::*;
pub use viewport::*;
