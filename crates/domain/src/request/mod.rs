//! HTTP request composition types

mod body;
mod file;
mod method;
mod outbound;

pub use body::{BodyMode, FieldKind, FormField};
pub use file::FileHandle;
pub use method::HttpMethod;
pub use outbound::{Header, MultipartPart, OutboundBody, OutboundRequest};
