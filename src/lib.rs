pub mod config;
pub mod contact;
pub mod logging;
pub mod navigation;
pub mod theme;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
