pub mod device_controller_handlers;
pub mod field_handlers;
pub mod user_handlers;
