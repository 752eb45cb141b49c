pub mod health_handlers;
pub mod veterinary_handlers;
