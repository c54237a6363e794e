//! Payments module - payments recorded against notices.

mod payments_model;
mod payments_service;
mod payments_traits;


pub use payments_model::{NewPayment, Payment};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait};
