//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first, see `routes::app`)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. CORS (the mock API is called cross-origin by browser clients)
//! 3. `TraceLayer` (request span)
//! 4. Request ID (recorded on the span opened by `TraceLayer`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
