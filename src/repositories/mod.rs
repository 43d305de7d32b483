pub mod reservation_repo;
