//! Static operation tables, one module per wrapped service.

pub mod kendra_ranking;
pub mod kms;
pub mod partner_central_channel;

use crate::domain::{Operation, Service};

/// Every wrapped service, in listing order.
pub fn services() -> [&'static Service; 3] {
    [
        &kms::KMS,
        &kendra_ranking::KENDRA_RANKING,
        &partner_central_channel::PARTNER_CENTRAL_CHANNEL,
    ]
}

/// Every operation across all services.
pub fn all() -> impl Iterator<Item = &'static Operation> {
    kms::OPERATIONS
        .iter()
        .chain(kendra_ranking::OPERATIONS)
        .chain(partner_central_channel::OPERATIONS)
}

/// Find an operation by command name (case-insensitive).
pub fn find(command: &str) -> Option<&'static Operation> {
    all().find(|op| op.command.eq_ignore_ascii_case(command))
}

/// Look up a service by id (case-insensitive).
pub fn service(id: &str) -> Option<&'static Service> {
    services()
        .into_iter()
        .find(|s| s.id.eq_ignore_ascii_case(id))
}

pub fn by_service(service: &Service) -> impl Iterator<Item = &'static Operation> + '_ {
    all().filter(move |op| op.service.id == service.id)
}
