mod gateway;
mod pid;
mod reload;
mod request_id;
mod runtime;
mod setup;

#[cfg(test)]
mod tests;

pub use gateway::LogGateway;
pub use pid::PidFile;
pub use reload::{ReloadEvent, ReloadHandle, ReloadTrigger};
pub use request_id::RequestId;
pub use runtime::{
    ConfigOverrides, RuntimeState, build_runtime_state, load_or_default, reload_runtime_state,
};
pub use setup::{build_pingora_server, run};
