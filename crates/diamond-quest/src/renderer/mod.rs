pub mod camera;
pub mod snapshot;

pub use camera::Camera2D;
pub use snapshot::{BossView, DiamondView, FrameSnapshot, PlayerView, RobotView};
