pub mod reservation_time;
