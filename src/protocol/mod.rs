pub mod decoder;
pub mod frame;

pub use decoder::{DecodingContext, Event, Token};
pub use frame::decode_frame;
