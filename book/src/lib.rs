pub mod backend;
pub mod config;
pub mod error;
pub mod html;
pub mod markdown;
pub mod render;
pub mod tex;
pub mod text;

pub use backend::{Backend, OutputFormat};
pub use config::{BookConfig, Style};
pub use error::BookError;
pub use render::{Book, RenderReport, Skipped};
