pub mod booking;
pub mod buddy;
pub mod destination;
pub mod message;
pub mod quiz;
