pub mod relay;
pub mod resolver;

pub use relay::{RelayEndpoint, RelayMode};
pub use resolver::{FetchResolver, RawPage};
