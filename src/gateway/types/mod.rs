//! Gateway types module
//!
//! ## Input Types
//! - [`AddTaskRequest`], [`CallerRequest`], [`UpdateTaskRequest`],
//!   [`TransferTaskRequest`]: task endpoint bodies
//!
//! The `POST /api/send` body is decoded by [`crate::payment::decode_transfer_request`]
//! from raw bytes, not by an extractor.
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`SendPaymentResponse`]: payment success body

pub mod request;
pub mod response;

pub use request::{AddTaskRequest, CallerRequest, TransferTaskRequest, UpdateTaskRequest};
pub use response::{
    ApiResponse, GENERIC_INTERNAL_MESSAGE, SendPaymentResponse, error_codes,
    payment_error_response,
};
