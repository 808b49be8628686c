mod relay;
mod session;

pub use relay::ChatRelay;
pub use session::*;
