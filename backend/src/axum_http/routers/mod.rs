pub mod branch_portal;
pub mod branches;
pub mod insurances;
pub mod payments;
pub mod reservations;
pub mod vehicles;
