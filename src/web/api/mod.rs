pub mod error;
pub mod health;
pub mod satellites;
pub mod tracks;
