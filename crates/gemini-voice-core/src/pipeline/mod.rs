// Batch pipeline
// request_builder -> (client) -> normalizer -> assembler, driven per item by driver

pub mod assembler;
pub mod driver;
pub mod item_config;
pub mod normalizer;
pub mod payload;
pub mod request_builder;

pub use assembler::{assemble, assemble_audio};
pub use driver::BatchDriver;
pub use item_config::resolve_item_config;
pub use normalizer::{detect_shape, normalize, normalize_audio, ResponseShape};
pub use request_builder::build_request;
