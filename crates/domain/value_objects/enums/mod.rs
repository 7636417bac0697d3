pub mod payment_methods;
pub mod payment_statuses;
pub mod reservation_payment_statuses;
pub mod reservation_statuses;
pub mod settlement_statuses;
pub mod vehicle_statuses;
