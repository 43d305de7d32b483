use serde_json::Value;
use tracing::warn;
use crate::helpers::date_form::{format_reservation_dates, transform_reservation_dates};
use crate::helpers::snackbar::Notifier;
use crate::models::reservation::Reservation;
use crate::repositories::reservation_repo::ReservationRepo;

pub const LIST_FAILED: &str = "Error retrieving reservations.";
pub const DELETED: &str = "Reservation deleted successfully.";
pub const DELETE_FAILED: &str = "Error deleting reservation. Please try again.";
pub const UPDATED: &str = "Reservation updated successfully.";
pub const UPDATE_FAILED: &str = "Error updating reservation. Please try again.";
pub const CREATED: &str = "Reservation created successfully.";
pub const CREATE_FAILED: &str = "Error creating reservation. Please try again.";

/// State behind the reservation view: the listed reservations plus the one
/// record being created or edited in the form.
pub struct ReservationController<R, N> {
    repo: R,
    notifier: N,
    reservations: Vec<Reservation>,
    reservation: Reservation,
    reservation_dates_str: String,
    editing_reservation: bool,
}

impl<R: ReservationRepo, N: Notifier> ReservationController<R, N> {
    pub fn new(repo: R, notifier: N) -> Self {
        Self {
            repo,
            notifier,
            reservations: Vec::new(),
            reservation: Reservation::default(),
            reservation_dates_str: String::new(),
            editing_reservation: false,
        }
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    pub fn reservation_dates_str(&self) -> &str {
        &self.reservation_dates_str
    }

    pub fn is_editing(&self) -> bool {
        self.editing_reservation
    }

    pub fn find(&self, id: i64) -> Option<&Reservation> {
        self.reservations.iter().find(|reservation| reservation.id == Some(id))
    }

    pub fn set_reservation_dates_str(&mut self, dates: impl Into<String>) {
        self.reservation_dates_str = dates.into();
    }

    /// Sets a descriptive field on the record in the form.
    pub fn set_detail(&mut self, field: impl Into<String>, value: Value) {
        self.reservation.details.insert(field.into(), value);
    }

    pub async fn initialize(&mut self) {
        self.get_all_reservations().await;
    }

    /// Replaces the listed reservations with the backend's. On failure the
    /// previous list stays as it was.
    pub async fn get_all_reservations(&mut self) {
        match self.repo.list().await {
            Ok(reservations) => {
                self.reservations = reservations;
            }
            Err(e) => {
                warn!("Something went wrong retrieving reservations due to: {:#}", e);
                self.notify(LIST_FAILED);
            }
        }
    }

    pub fn begin_edit(&mut self, reservation: &Reservation) {
        self.reservation = reservation.clone();
        self.editing_reservation = true;
        self.reservation_dates_str = format_reservation_dates(&self.reservation.reservation_dates);
    }

    pub async fn delete(&mut self, reservation: &Reservation) {
        let res = match reservation.id {
            Some(id) => self.repo.delete(id).await,
            None => Err(anyhow::anyhow!("Reservation has no id to delete")),
        };

        match res {
            Ok(_) => {
                self.notify(DELETED);
                self.get_all_reservations().await;
            }
            Err(e) => {
                warn!("Something went wrong deleting reservation due to: {:#}", e);
                self.notify(DELETE_FAILED);
            }
        }
    }

    /// Creates or updates the record in the form, depending on edit mode.
    ///
    /// The form is reset as soon as the call is issued, so it is already
    /// empty when a failure is reported.
    pub async fn save(&mut self) {
        self.reservation.reservation_dates = transform_reservation_dates(&self.reservation_dates_str);
        let editing = self.editing_reservation;
        let reservation = std::mem::take(&mut self.reservation);
        self.cancel_edit();

        if editing {
            match self.repo.update(&reservation).await {
                Ok(_) => {
                    self.notify(UPDATED);
                    self.get_all_reservations().await;
                }
                Err(e) => {
                    warn!("Something went wrong updating reservation due to: {:#}", e);
                    self.notify(UPDATE_FAILED);
                }
            }
        } else {
            match self.repo.create(&reservation).await {
                Ok(_) => {
                    self.notify(CREATED);
                    self.get_all_reservations().await;
                }
                Err(e) => {
                    warn!("Something went wrong creating reservation due to: {:#}", e);
                    self.notify(CREATE_FAILED);
                }
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reservation = Reservation::default();
        self.reservation_dates_str.clear();
        self.editing_reservation = false;
    }

    pub fn notify(&self, message: &str) {
        self.notifier.show_notification(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use anyhow::anyhow;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use serde_json::{json, Map};
    use time::macros::date;
    use crate::models::reservation::ReservationDate;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        List,
        Create(Reservation),
        Update(Reservation),
        Delete(i64),
    }

    /// Records every call and answers from queued outcomes; an empty queue
    /// answers with success.
    #[derive(Default)]
    struct FakeRepo {
        calls: Mutex<Vec<Call>>,
        lists: Mutex<VecDeque<anyhow::Result<Vec<Reservation>>>>,
        failures: Mutex<VecDeque<anyhow::Error>>,
    }

    impl FakeRepo {
        fn queue_list(&self, res: anyhow::Result<Vec<Reservation>>) {
            self.lists.lock().unwrap().push_back(res);
        }

        fn fail_next_mutation(&self, e: anyhow::Error) {
            self.failures.lock().unwrap().push_back(e);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|call| pred(call)).count()
        }

        fn mutation_outcome(&self) -> anyhow::Result<()> {
            match self.failures.lock().unwrap().pop_front() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    impl ReservationRepo for Arc<FakeRepo> {
        fn list(&self) -> BoxFuture<'_, anyhow::Result<Vec<Reservation>>> {
            self.calls.lock().unwrap().push(Call::List);
            let res = self.lists.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()));
            async move { res }.boxed()
        }

        fn create<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>> {
            self.calls.lock().unwrap().push(Call::Create(reservation.clone()));
            let res = self.mutation_outcome().map(|_| Reservation { id: Some(100), ..reservation.clone() });
            async move { res }.boxed()
        }

        fn update<'a>(&'a self, reservation: &'a Reservation) -> BoxFuture<'a, anyhow::Result<Reservation>> {
            self.calls.lock().unwrap().push(Call::Update(reservation.clone()));
            let res = self.mutation_outcome().map(|_| reservation.clone());
            async move { res }.boxed()
        }

        fn delete(&self, id: i64) -> BoxFuture<'_, anyhow::Result<()>> {
            self.calls.lock().unwrap().push(Call::Delete(id));
            let res = self.mutation_outcome();
            async move { res }.boxed()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn show_notification(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    type Controller = ReservationController<Arc<FakeRepo>, Arc<RecordingNotifier>>;

    fn controller() -> (Controller, Arc<FakeRepo>, Arc<RecordingNotifier>) {
        let repo = Arc::new(FakeRepo::default());
        let notifier = Arc::new(RecordingNotifier::default());
        (ReservationController::new(repo.clone(), notifier.clone()), repo, notifier)
    }

    fn reservation(id: i64, dates: Vec<ReservationDate>) -> Reservation {
        let mut details = Map::new();
        details.insert("guestName".to_string(), json!("Ada"));
        Reservation { id: Some(id), reservation_dates: dates, details }
    }

    #[tokio::test]
    async fn empty_list_shows_nothing() {
        let (mut controller, repo, notifier) = controller();
        repo.queue_list(Ok(Vec::new()));

        controller.initialize().await;

        assert!(controller.reservations().is_empty());
        assert!(notifier.messages().is_empty());
        assert_eq!(repo.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn failed_list_keeps_previous_reservations() {
        let (mut controller, repo, notifier) = controller();
        let existing = reservation(1, vec![date!(2024 - 01 - 15).into()]);
        repo.queue_list(Ok(vec![existing.clone()]));
        repo.queue_list(Err(anyhow!("connection refused")));

        controller.initialize().await;
        controller.get_all_reservations().await;

        assert_eq!(controller.reservations(), &[existing]);
        assert_eq!(notifier.messages(), vec![LIST_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn begin_then_cancel_restores_empty_form() {
        let (mut controller, _repo, _notifier) = controller();
        let existing = reservation(4, vec![date!(2024 - 01 - 15).into(), date!(2024 - 03 - 02).into()]);

        controller.begin_edit(&existing);
        assert!(controller.is_editing());
        assert_eq!(controller.reservation(), &existing);
        assert_eq!(controller.reservation_dates_str(), "2024-01-15,2024-03-02");

        controller.cancel_edit();
        assert!(!controller.is_editing());
        assert_eq!(controller.reservation(), &Reservation::default());
        assert_eq!(controller.reservation_dates_str(), "");
    }

    #[tokio::test]
    async fn begin_edit_copies_the_record() {
        let (mut controller, _repo, _notifier) = controller();
        let existing = reservation(4, vec![ReservationDate::Invalid, date!(2024 - 03 - 02).into()]);

        controller.begin_edit(&existing);
        controller.set_detail("guestName", json!("Grace"));

        assert_eq!(existing.details.get("guestName"), Some(&json!("Ada")));
        assert_eq!(controller.reservation_dates_str(), ",2024-03-02");
    }

    #[tokio::test]
    async fn save_in_create_mode_creates() {
        let (mut controller, repo, notifier) = controller();
        controller.set_reservation_dates_str("2024-01-15,2024-03-02");
        controller.set_detail("guestName", json!("Ada"));

        controller.save().await;

        let created = Reservation {
            id: None,
            reservation_dates: vec![date!(2024 - 01 - 15).into(), date!(2024 - 03 - 02).into()],
            details: reservation(0, Vec::new()).details,
        };
        assert_eq!(repo.calls(), vec![Call::Create(created), Call::List]);
        assert_eq!(notifier.messages(), vec![CREATED.to_string()]);
    }

    #[tokio::test]
    async fn save_in_edit_mode_updates() {
        let (mut controller, repo, notifier) = controller();
        let existing = reservation(9, vec![date!(2024 - 01 - 15).into()]);
        controller.begin_edit(&existing);
        controller.set_reservation_dates_str("2024-02-01");

        controller.save().await;

        let updated = reservation(9, vec![date!(2024 - 02 - 01).into()]);
        assert_eq!(repo.calls(), vec![Call::Update(updated), Call::List]);
        assert_eq!(repo.count(|call| matches!(call, Call::Create(_))), 0);
        assert_eq!(notifier.messages(), vec![UPDATED.to_string()]);
    }

    #[tokio::test]
    async fn save_with_empty_dates_submits_invalid_date() {
        let (mut controller, repo, _notifier) = controller();

        controller.save().await;

        match &repo.calls()[0] {
            Call::Create(sent) => assert_eq!(sent.reservation_dates, vec![ReservationDate::Invalid]),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_create_notifies_once_without_refresh() {
        let (mut controller, repo, notifier) = controller();
        repo.fail_next_mutation(anyhow!("network unreachable"));
        controller.set_reservation_dates_str("2024-01-15");

        controller.save().await;

        assert_eq!(repo.count(|call| *call == Call::List), 0);
        assert_eq!(notifier.messages(), vec![CREATE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn failed_update_still_resets_form() {
        let (mut controller, repo, notifier) = controller();
        repo.fail_next_mutation(anyhow!("500 Internal Server Error"));
        controller.begin_edit(&reservation(2, vec![date!(2024 - 01 - 15).into()]));

        controller.save().await;

        assert!(!controller.is_editing());
        assert_eq!(controller.reservation(), &Reservation::default());
        assert_eq!(controller.reservation_dates_str(), "");
        assert_eq!(notifier.messages(), vec![UPDATE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn delete_success_notifies_and_refreshes_once() {
        let (mut controller, repo, notifier) = controller();
        let target = reservation(5, Vec::new());

        controller.delete(&target).await;

        assert_eq!(repo.calls(), vec![Call::Delete(5), Call::List]);
        assert_eq!(notifier.messages(), vec![DELETED.to_string()]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_untouched() {
        let (mut controller, repo, notifier) = controller();
        let target = reservation(5, Vec::new());
        repo.queue_list(Ok(vec![target.clone()]));
        controller.initialize().await;
        repo.fail_next_mutation(anyhow!("404 Not Found"));

        controller.delete(&target).await;

        assert_eq!(controller.reservations(), &[target]);
        assert_eq!(repo.count(|call| *call == Call::List), 1);
        assert_eq!(notifier.messages(), vec![DELETE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn delete_without_id_is_a_failed_call() {
        let (mut controller, repo, notifier) = controller();

        controller.delete(&Reservation::default()).await;

        assert!(repo.calls().is_empty());
        assert_eq!(notifier.messages(), vec![DELETE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn refresh_replaces_list_wholesale() {
        let (mut controller, repo, _notifier) = controller();
        repo.queue_list(Ok(vec![reservation(1, Vec::new()), reservation(2, Vec::new())]));
        repo.queue_list(Ok(vec![reservation(3, Vec::new())]));

        controller.initialize().await;
        assert!(controller.find(2).is_some());

        controller.get_all_reservations().await;
        assert!(controller.find(2).is_none());
        assert_eq!(controller.reservations().len(), 1);
    }
}
