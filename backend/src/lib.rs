pub mod config;
pub mod glutils;
pub mod mesh;
pub mod shaders;
pub mod system;
