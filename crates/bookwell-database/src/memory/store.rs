//! In-memory implementation of every store trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use bookwell_core::error::AppError;
use bookwell_core::result::AppResult;
use bookwell_entity::availability::{
    Availability, AvailabilityWithWindows, CreateAvailability, Window,
};
use bookwell_entity::reservation::{CreateReservation, Reservation, ReservationDetail};
use bookwell_entity::token::RevokedToken;
use bookwell_entity::user::{CreateUser, User};

use crate::store::{BookingTransaction, HierarchyStore, RevocationStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    availabilities: HashMap<Uuid, Availability>,
    /// Availability ids in insertion order.
    availability_order: Vec<Uuid>,
    windows: HashMap<Uuid, Window>,
    reservations: HashMap<Uuid, Reservation>,
}

impl Tables {
    fn windows_of(&self, availability_id: Uuid) -> Vec<Window> {
        self.windows
            .values()
            .filter(|w| w.availability_id == availability_id)
            .cloned()
            .collect()
    }

    fn with_windows(&self, availability: &Availability) -> AvailabilityWithWindows {
        AvailabilityWithWindows::new(availability.clone(), self.windows_of(availability.id))
    }

    /// Remove an availability and its descendants, returning the removed
    /// window ids, or `None` if it did not exist.
    fn remove_availability(&mut self, id: Uuid) -> Option<Vec<Uuid>> {
        self.availabilities.remove(&id)?;
        self.availability_order.retain(|a| *a != id);

        let window_ids: Vec<Uuid> = self
            .windows
            .values()
            .filter(|w| w.availability_id == id)
            .map(|w| w.id)
            .collect();
        for window_id in &window_ids {
            self.windows.remove(window_id);
        }
        self.reservations
            .retain(|_, r| !window_ids.contains(&r.window_id));

        Some(window_ids)
    }
}

/// All tables in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    window_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    revoked: DashMap<String, RevokedToken>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn forget_window_locks(&self, window_ids: &[Uuid]) {
        for id in window_ids {
            self.window_locks.remove(id);
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == data.email) {
            return Err(AppError::duplicate_email(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<Uuid> = tables
            .availabilities
            .values()
            .filter(|a| a.owner_id == id)
            .map(|a| a.id)
            .collect();
        let mut removed_windows = Vec::new();
        for availability_id in owned {
            if let Some(ids) = tables.remove_availability(availability_id) {
                removed_windows.extend(ids);
            }
        }
        tables.reservations.retain(|_, r| r.booker_id != id);
        drop(tables);

        self.forget_window_locks(&removed_windows);
        Ok(true)
    }
}

#[async_trait]
impl HierarchyStore for MemoryStore {
    async fn list_availabilities(&self) -> AppResult<Vec<AvailabilityWithWindows>> {
        let tables = self.tables.read().await;
        Ok(tables
            .availability_order
            .iter()
            .filter_map(|id| tables.availabilities.get(id))
            .map(|a| tables.with_windows(a))
            .collect())
    }

    async fn find_availability(&self, id: Uuid) -> AppResult<Option<Availability>> {
        Ok(self.tables.read().await.availabilities.get(&id).cloned())
    }

    async fn find_availability_with_windows(
        &self,
        id: Uuid,
    ) -> AppResult<Option<AvailabilityWithWindows>> {
        let tables = self.tables.read().await;
        Ok(tables.availabilities.get(&id).map(|a| tables.with_windows(a)))
    }

    async fn create_availability(
        &self,
        data: &CreateAvailability,
    ) -> AppResult<AvailabilityWithWindows> {
        let mut tables = self.tables.write().await;
        if tables.availabilities.values().any(|a| a.name == data.name) {
            return Err(AppError::duplicate_name(format!(
                "Availability '{}' already exists",
                data.name
            )));
        }
        if !tables.users.contains_key(&data.owner_id) {
            return Err(AppError::forbidden("Owner no longer exists"));
        }

        let availability = Availability {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            owner_id: data.owner_id,
            created_at: Utc::now(),
        };
        let windows: Vec<Window> = data
            .windows
            .iter()
            .map(|interval| Window {
                id: Uuid::new_v4(),
                availability_id: availability.id,
                start_time: interval.start(),
                end_time: interval.end(),
            })
            .collect();

        tables
            .availabilities
            .insert(availability.id, availability.clone());
        tables.availability_order.push(availability.id);
        for window in &windows {
            tables.windows.insert(window.id, window.clone());
        }

        Ok(AvailabilityWithWindows::new(availability, windows))
    }

    async fn delete_availability(&self, id: Uuid) -> AppResult<bool> {
        let removed = self.tables.write().await.remove_availability(id);
        match removed {
            Some(window_ids) => {
                self.forget_window_locks(&window_ids);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_window(&self, id: Uuid) -> AppResult<Option<Window>> {
        Ok(self.tables.read().await.windows.get(&id).cloned())
    }

    async fn list_reservations_for_booker(
        &self,
        booker_id: Uuid,
    ) -> AppResult<Vec<ReservationDetail>> {
        let tables = self.tables.read().await;
        let Some(booker) = tables.users.get(&booker_id) else {
            return Ok(Vec::new());
        };

        let mut details: Vec<ReservationDetail> = tables
            .reservations
            .values()
            .filter(|r| r.booker_id == booker_id)
            .filter_map(|r| {
                let window = tables.windows.get(&r.window_id)?;
                let availability = tables.availabilities.get(&window.availability_id)?;
                Some(ReservationDetail {
                    id: r.id,
                    message: r.message.clone(),
                    start_time: r.start_time,
                    end_time: r.end_time,
                    created_at: r.created_at,
                    booker_id: booker.id,
                    booker_email: booker.email.clone(),
                    window_id: window.id,
                    window_start: window.start_time,
                    window_end: window.end_time,
                    availability_id: availability.id,
                    availability_name: availability.name.clone(),
                })
            })
            .collect();
        details.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(details)
    }

    async fn begin_booking(
        &self,
        window_id: Uuid,
    ) -> AppResult<Option<Box<dyn BookingTransaction>>> {
        let lock = self.window_locks.entry(window_id).or_default().clone();
        let guard = lock.lock_owned().await;

        let tables = self.tables.read().await;
        let Some(window) = tables.windows.get(&window_id).cloned() else {
            drop(tables);
            drop(guard);
            // Only the map's own handle left means no other booker is queued.
            self.window_locks
                .remove_if(&window_id, |_, l| Arc::strong_count(l) == 1);
            return Ok(None);
        };
        let mut reservations: Vec<Reservation> = tables
            .reservations
            .values()
            .filter(|r| r.window_id == window_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| r.start_time);
        drop(tables);

        debug!(window_id = %window_id, existing = reservations.len(), "Window locked for booking");

        Ok(Some(Box::new(MemoryBookingTransaction {
            tables: self.tables.clone(),
            window,
            reservations,
            _guard: guard,
        })))
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        Ok(self.revoked.contains_key(token))
    }

    async fn revoke(&self, token: &str) -> AppResult<bool> {
        let mut inserted = false;
        self.revoked.entry(token.to_string()).or_insert_with(|| {
            inserted = true;
            RevokedToken {
                id: Uuid::new_v4(),
                token: token.to_string(),
                revoked_at: Utc::now(),
            }
        });
        Ok(inserted)
    }
}

/// Booking unit of work holding the window's mutex until commit or drop.
struct MemoryBookingTransaction {
    tables: Arc<RwLock<Tables>>,
    window: Window,
    reservations: Vec<Reservation>,
    _guard: OwnedMutexGuard<()>,
}

#[async_trait]
impl BookingTransaction for MemoryBookingTransaction {
    fn window(&self) -> &Window {
        &self.window
    }

    fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    async fn commit(self: Box<Self>, data: &CreateReservation) -> AppResult<Reservation> {
        let mut tables = self.tables.write().await;
        // The availability may have been deleted while the window was held.
        if !tables.windows.contains_key(&self.window.id) {
            return Err(AppError::not_found(format!(
                "Window {} not found",
                self.window.id
            )));
        }
        if !tables.users.contains_key(&data.booker_id) {
            return Err(AppError::forbidden("Booking user no longer exists"));
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            window_id: self.window.id,
            booker_id: data.booker_id,
            message: data.message.clone(),
            start_time: data.interval.start(),
            end_time: data.interval.end(),
            created_at: Utc::now(),
        };
        tables
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }
}
