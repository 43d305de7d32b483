pub mod date_form;
pub mod handler_404;
pub mod snackbar;
