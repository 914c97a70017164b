mod player;

pub use player::Player;
