pub mod providers;

pub use providers::{ImagePart, ProviderError, ProviderResponse, VisionProvider};
