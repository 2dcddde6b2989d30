pub mod error;
pub mod event;
pub mod multi_value;
pub mod result;

pub use error::{BoxError, BridgeError};
pub use event::{GatewayEvent, Identity, RequestContext};
pub use multi_value::MultiValueMap;
pub use result::GatewayResult;
