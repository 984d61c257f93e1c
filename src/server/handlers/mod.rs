pub mod query;
pub mod users;

pub use query::*;
pub use users::*;

use crate::gateway::QueryGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: QueryGateway,
}
