pub mod terminal;

pub use terminal::enable_ansi_support;
