pub mod factory;
pub mod gate;
pub mod policy;
pub mod tokens;
pub mod validator;

pub use factory::build_antiforgery_gate;
pub use gate::{AntiForgeryGate, AuthorizationResult, GateError};
pub use policy::{AuthorizationConfig, ValidationOutcome};
pub use tokens::CookieHeaderExtractor;
pub use validator::{DoubleSubmitValidator, ValidationError};
