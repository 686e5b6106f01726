//! Domain layer: operation descriptors and the logic every command shares
//!
//! This layer is independent of external concerns (no network, no CLI, no config loading).

pub mod error;
pub mod field;
pub mod operation;
pub mod paging;
pub mod request;
pub mod select;

pub use error::{DomainError, DomainResult};
pub use field::{kebab_case, Field, FieldKind};
pub use operation::{ConfirmImpact, JsonVersion, Operation, Paging, Service};
pub use paging::{paginate, Collected, PageRequest, PagingPlan, PartialFailure};
pub use request::{build_request, BoundParameters, RequestBody};
pub use select::Selection;
