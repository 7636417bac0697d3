pub mod enums;
pub mod pagination;
pub mod payments;
pub mod reservations;
pub mod split;
pub mod vehicles;
pub mod webhook;
