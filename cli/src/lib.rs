pub mod config;
pub mod error;
pub mod executor;
pub mod relay;
pub mod render;
pub mod run;

pub use config::Config;
pub use executor::Executor;
pub use relay::{router, RelaySettings};
pub use run::{run_fetch, FetchArgs, FetchStatus};
