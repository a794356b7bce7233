// Interface adapters: input devices, rendering, asset files and frame output.

pub mod assets;
pub mod input;
pub mod protocol;
pub mod render;
