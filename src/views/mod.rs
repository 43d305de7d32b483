pub mod reservation_view;
