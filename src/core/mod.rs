pub mod animation;
pub mod bridge;
pub mod constants;
pub mod crowd;
pub mod frame_loop;
pub mod gesture;
pub mod mapper;
pub mod sync;

pub use animation::*;
pub use bridge::*;
pub use crowd::*;
pub use frame_loop::*;
pub use gesture::*;
pub use mapper::*;
pub use sync::*;
