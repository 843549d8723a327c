use thiserror::Error;

use crate::runtime::InstanceKey;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no mounted instance for {0:?}")]
    UnknownInstance(InstanceKey),

    #[error("{instance} has no control matching `{target}`")]
    NoSuchControl { instance: String, target: String },

    #[error("`{target}` does not accept a {interaction} event")]
    NotInteractive {
        target: String,
        interaction: &'static str,
    },

    #[error("maximum update depth exceeded: still rendering after {limit} passes")]
    UpdateDepthExceeded { limit: usize },
}
