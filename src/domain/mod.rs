pub mod auth;
pub mod health;
pub mod member;
pub mod reservation;
pub mod reservation_time;
pub mod theme;
