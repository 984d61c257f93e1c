pub mod error;
pub mod filter;
pub mod gateway;
pub mod loader;
pub mod server;
pub mod storage;
pub mod validator;

pub use error::{GatewayError, GatewayResult};
pub use filter::{AgeFilter, RecordFilter};
pub use gateway::QueryGateway;
pub use server::create_router;
pub use storage::{Record, SurveyStore};
pub use validator::{classify, ValidationMode, Verdict};
