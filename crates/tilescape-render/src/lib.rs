pub mod draw_list;
pub mod palette;
pub mod tileset;

pub use draw_list::{DrawList, TileQuad};
pub use palette::{TileAppearance, TilePalette};
pub use tileset::{TextureHandle, Tileset, TilesetError};
