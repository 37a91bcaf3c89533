//! Display models and input validation for the three gateway flows

pub mod invoice;
pub mod number_format;
pub mod payment;
pub mod validation;
pub mod verification;

pub use invoice::{InvoiceQuery, InvoiceView, LineItem};
pub use number_format::format_number;
pub use payment::{PaymentForm, PaymentMethod, PaymentProgress, PaymentRequest, PaymentResult};
pub use validation::ValidationError;
pub use verification::{VerificationResult, VerifyQuery, PAID_STATUS};
