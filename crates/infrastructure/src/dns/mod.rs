pub mod static_responder;
pub mod transport;
pub mod upstream;

pub use static_responder::StaticResponder;
pub use upstream::UpstreamResolver;
