pub mod dormand_prince;
pub mod integration_errors;
pub mod options;

pub use dormand_prince::{DormandPrince, IntegrationDetails};
pub use integration_errors::IntegrationErrors;
pub use options::IntegratorOptions;
