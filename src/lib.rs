pub mod config;
pub mod panel;
pub mod render;
pub mod session;
pub mod store;
pub mod timeline;
pub mod viewer;

#[cfg(test)]
mod test;
