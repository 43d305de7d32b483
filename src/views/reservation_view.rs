use serde_json::{Map, Value};
use crate::controller::reservation_controller::ReservationController;
use crate::helpers::snackbar::Notifier;
use crate::models::notification::{Notification, VerticalPosition};
use crate::models::reservation::{Reservation, ReservationDate};
use crate::repositories::reservation_repo::ReservationRepo;

/// Renders the reservation page: the notification banner, the list and the
/// edit form, top to bottom.
pub fn render<R: ReservationRepo, N: Notifier>(
    controller: &ReservationController<R, N>,
    notification: Option<&Notification>,
) -> String {
    let mut page = String::new();

    let banner = notification.map(render_notification);
    if let Some((banner, VerticalPosition::Top)) = &banner {
        page.push_str(banner);
    }

    page.push_str("Reservations\n");
    if controller.reservations().is_empty() {
        page.push_str("  (none)\n");
    }
    for reservation in controller.reservations() {
        page.push_str(&render_row(reservation));
    }

    page.push('\n');
    match controller.reservation().id {
        Some(id) if controller.is_editing() => page.push_str(&format!("Edit reservation #{}\n", id)),
        _ if controller.is_editing() => page.push_str("Edit reservation\n"),
        _ => page.push_str("New reservation\n"),
    }
    page.push_str(&format!("  dates (YYYY-MM-DD,...): {}\n", controller.reservation_dates_str()));
    for (field, value) in &controller.reservation().details {
        page.push_str(&format!("  {}: {}\n", field, value));
    }

    if let Some((banner, VerticalPosition::Bottom)) = &banner {
        page.push('\n');
        page.push_str(banner);
    }

    page
}

fn render_notification(notification: &Notification) -> (String, VerticalPosition) {
    (
        format!("[ {} ]  ({})\n\n", notification.message, notification.action),
        notification.vertical_position,
    )
}

fn render_row(reservation: &Reservation) -> String {
    let id = reservation.id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string());

    let mut row = format!("  {:<6}{}", id, render_dates(&reservation.reservation_dates));
    let details = render_details(&reservation.details);
    if !details.is_empty() {
        row.push_str("  ");
        row.push_str(&details);
    }
    row.push('\n');
    row
}

fn render_dates(dates: &[ReservationDate]) -> String {
    if dates.is_empty() {
        return "-".to_string();
    }
    dates
        .iter()
        .map(ReservationDate::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

fn render_details(details: &Map<String, Value>) -> String {
    details
        .iter()
        .map(|(field, value)| format!("{}={}", field, value))
        .collect::<Vec<String>>()
        .join(" ")
}
