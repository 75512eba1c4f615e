pub mod error;
pub mod framing;
pub mod hub;
pub mod message;
pub mod queue;
pub mod subscriber;

pub use error::BusError;
pub use hub::Hub;
pub use message::{Header, Mode, SubscribeRequest};
pub use subscriber::Subscriber;
