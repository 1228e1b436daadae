pub mod provider;
pub mod simulator;
mod traits;

pub use provider::{
    can_send, catalog, default_model, find_model, AiModel, ApiKeys, ModelTag, ProviderId,
};
pub use simulator::{canned_reply, SimulatedResponder};
pub use traits::Responder;
