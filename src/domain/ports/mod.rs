mod image_api_port;
mod session_port;

pub use image_api_port::{GeneratedImage, ImageApiPort};
pub use session_port::{Credentials, SessionPort};

#[cfg(test)]
pub mod mocks {
    pub use super::image_api_port::mock::MockImageApi;
    pub use super::session_port::MockSessionPort;
}
