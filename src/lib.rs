pub mod audio;
pub mod background;
pub mod bird;
pub mod effects;
pub mod game;
pub mod pipe;
pub mod pixel;
pub mod powerup;
pub mod score;

/// Logical canvas size. The simulation always runs on this fixed grid; the
/// terminal viewport scales it to whatever size the window happens to be.
pub const CANVAS_W: f64 = 400.0;
pub const CANVAS_H: f64 = 600.0;
