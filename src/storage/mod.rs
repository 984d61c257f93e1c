pub mod record;
pub mod store;

pub use record::Record;
pub use store::{Bindings, SurveyStore};
