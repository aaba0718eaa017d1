//! Booking service
//!
//! Orchestrates the create/update flow (validate -> price -> availability ->
//! persist) and the lifecycle transitions. The availability check is
//! advisory (no store transaction spans check and insert); `confirm`
//! re-validates against the stored bookings so a lost race surfaces there
//! instead of silently double-booking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{Booking, BookingCreate, BookingStatus, BookingUpdate, Hotel, Room, UserInfo};
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::booking::availability::{find_conflict, is_available};
use crate::booking::lifecycle::{self, Actor, BookingAction, BookingOrigin, LifecycleError};
use crate::booking::pricing;
use crate::db::repository::booking::{BookingChanges, NewBooking};
use crate::db::repository::{booking as booking_repo, hotel as hotel_repo, room as room_repo,
    user as user_repo};
use crate::utils::{AppError, AppResult};

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::InvalidTransition { .. } => AppError::BusinessRule(e.to_string()),
            LifecycleError::NotPermitted(msg) => AppError::Forbidden(msg.to_string()),
        }
    }
}

/// A booking joined with its room, hotel and owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub booking: Booking,
    pub room: Room,
    pub hotel: Hotel,
    pub owner: UserInfo,
}

#[derive(Clone)]
pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a booking. The initial status comes from the entry point
    /// (self-service -> pending, quick-book -> confirmed); the total price
    /// is snapshotted from the room's current rate.
    pub async fn create(
        &self,
        actor: &Actor,
        origin: BookingOrigin,
        payload: BookingCreate,
    ) -> AppResult<Booking> {
        payload.validate()?;

        let room = room_repo::find_by_id(&self.pool, payload.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", payload.room_id)))?;

        let (nights, total_price) =
            pricing::price_stay(payload.check_in_date, payload.check_out_date, room.price);
        if nights == 0 {
            return Err(AppError::BusinessRule(
                "Check-out must be after check-in".into(),
            ));
        }

        self.ensure_available(
            &room,
            payload.check_in_date,
            payload.check_out_date,
            None,
        )
        .await?;

        let booking = booking_repo::create(
            &self.pool,
            NewBooking {
                room_id: room.id,
                user_id: actor.user_id,
                check_in_date: payload.check_in_date,
                check_out_date: payload.check_out_date,
                guest_name: payload.guest_name,
                guest_email: payload.guest_email,
                guest_phone: payload.guest_phone,
                total_price,
                status: origin.initial_status(),
            },
        )
        .await?;

        info!(
            booking_id = booking.id,
            room_id = room.id,
            nights,
            total_price,
            status = booking.status.as_str(),
            "Booking created"
        );
        Ok(booking)
    }

    /// Quick-booking entry point from a hotel page: the room must belong to
    /// that hotel, and the booking starts confirmed.
    pub async fn create_for_hotel(
        &self,
        actor: &Actor,
        hotel_id: i64,
        payload: BookingCreate,
    ) -> AppResult<Booking> {
        let room = room_repo::find_by_id(&self.pool, payload.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", payload.room_id)))?;
        if room.hotel_id != hotel_id {
            return Err(AppError::BusinessRule(
                "Room does not belong to this hotel".into(),
            ));
        }
        self.create(actor, BookingOrigin::QuickBook, payload).await
    }

    /// Edit a booking (owner or admin). When the room or either date
    /// changes, the price is recomputed and availability re-checked with
    /// the booking itself excluded from the conflict set.
    pub async fn update(
        &self,
        actor: &Actor,
        id: i64,
        payload: BookingUpdate,
    ) -> AppResult<Booking> {
        payload.validate()?;

        let existing = self.fetch(id).await?;
        if !actor.is_admin() && actor.user_id != existing.user_id {
            return Err(AppError::Forbidden(
                "Only the booking owner or staff can edit a booking".into(),
            ));
        }
        if existing.status == BookingStatus::Cancelled {
            return Err(AppError::BusinessRule(
                "Cancelled bookings cannot be edited".into(),
            ));
        }

        let room_id = payload.room_id.unwrap_or(existing.room_id);
        let check_in = payload.check_in_date.unwrap_or(existing.check_in_date);
        let check_out = payload.check_out_date.unwrap_or(existing.check_out_date);
        let stay_changed = room_id != existing.room_id
            || check_in != existing.check_in_date
            || check_out != existing.check_out_date;

        let mut changes = BookingChanges {
            room_id: payload.room_id,
            check_in_date: payload.check_in_date,
            check_out_date: payload.check_out_date,
            guest_name: payload.guest_name,
            guest_email: payload.guest_email,
            guest_phone: payload.guest_phone,
            total_price: None,
        };

        if stay_changed {
            let room = room_repo::find_by_id(&self.pool, room_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Room {room_id} not found")))?;

            let (nights, total_price) = pricing::price_stay(check_in, check_out, room.price);
            if nights == 0 {
                return Err(AppError::BusinessRule(
                    "Check-out must be after check-in".into(),
                ));
            }

            self.ensure_available(&room, check_in, check_out, Some(id))
                .await?;
            changes.total_price = Some(total_price);
        }

        let booking = booking_repo::update(&self.pool, id, changes).await?;
        info!(booking_id = id, "Booking updated");
        Ok(booking)
    }

    /// Staff action: pending -> confirmed. Availability is re-validated
    /// against the store first, which is where a create-time race between
    /// two overlapping bookings becomes visible.
    pub async fn confirm(&self, actor: &Actor, id: i64) -> AppResult<Booking> {
        let booking = self.fetch(id).await?;
        lifecycle::authorize(actor, booking.user_id, BookingAction::Confirm)?;
        let next = lifecycle::transition(booking.status, BookingAction::Confirm)?
            .unwrap_or(booking.status);

        let others = booking_repo::find_active_by_room(&self.pool, booking.room_id).await?;
        if let Some(conflict) = find_conflict(
            &others,
            booking.check_in_date,
            booking.check_out_date,
            Some(booking.id),
        ) {
            return Err(AppError::Conflict(format!(
                "Room is already booked for these dates (booking {})",
                conflict.id
            )));
        }

        let booking = booking_repo::set_status(&self.pool, id, next).await?;
        info!(booking_id = id, "Booking confirmed");
        Ok(booking)
    }

    /// Owner or staff action: pending/confirmed -> cancelled. Cancelled
    /// bookings drop out of the conflict set but do not touch the room's
    /// administrative availability flag.
    pub async fn cancel(&self, actor: &Actor, id: i64) -> AppResult<Booking> {
        let booking = self.fetch(id).await?;
        lifecycle::authorize(actor, booking.user_id, BookingAction::Cancel)?;
        let next = lifecycle::transition(booking.status, BookingAction::Cancel)?
            .unwrap_or(booking.status);

        let booking = booking_repo::set_status(&self.pool, id, next).await?;
        info!(booking_id = id, "Booking cancelled");
        Ok(booking)
    }

    /// Staff action, distinct from cancellation: removes the record
    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<bool> {
        let booking = self.fetch(id).await?;
        lifecycle::authorize(actor, booking.user_id, BookingAction::Delete)?;
        lifecycle::transition(booking.status, BookingAction::Delete)?;

        let deleted = booking_repo::delete(&self.pool, id).await?;
        info!(booking_id = id, "Booking deleted");
        Ok(deleted)
    }

    /// Fetch one booking, visible to its owner and staff
    pub async fn get(&self, actor: &Actor, id: i64) -> AppResult<Booking> {
        let booking = self.fetch(id).await?;
        if !actor.is_admin() && actor.user_id != booking.user_id {
            return Err(AppError::Forbidden("Not your booking".into()));
        }
        Ok(booking)
    }

    /// Booking with its room, hotel and owner. The room is needed before
    /// the hotel can be resolved; hotel and owner then load concurrently
    /// with all-or-nothing join semantics.
    pub async fn get_detail(&self, actor: &Actor, id: i64) -> AppResult<BookingDetail> {
        let booking = self.get(actor, id).await?;

        let room = room_repo::find_by_id(&self.pool, booking.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", booking.room_id)))?;

        let (hotel, owner) = tokio::try_join!(
            hotel_repo::find_by_id(&self.pool, room.hotel_id),
            user_repo::find_by_id(&self.pool, booking.user_id),
        )?;
        let hotel =
            hotel.ok_or_else(|| AppError::NotFound(format!("Hotel {} not found", room.hotel_id)))?;
        let owner = owner
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", booking.user_id)))?
            .info();

        Ok(BookingDetail {
            booking,
            room,
            hotel,
            owner,
        })
    }

    /// Users see their own bookings; staff see everything
    pub async fn list_for(&self, actor: &Actor) -> AppResult<Vec<Booking>> {
        let bookings = if actor.is_admin() {
            booking_repo::find_all(&self.pool).await?
        } else {
            booking_repo::find_by_user(&self.pool, actor.user_id).await?
        };
        Ok(bookings)
    }

    /// Availability probe for booking forms
    pub async fn check_availability(
        &self,
        room_id: i64,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        exclude: Option<i64>,
    ) -> AppResult<bool> {
        let room = room_repo::find_by_id(&self.pool, room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {room_id} not found")))?;
        let existing = booking_repo::find_active_by_room(&self.pool, room_id).await?;
        Ok(is_available(&room, &existing, check_in, check_out, exclude))
    }

    /// Staff report: bookings checking in within [from, to], narrowed to
    /// one city. Returns guest details across all users, so it is gated to
    /// staff. The range scan comes from the store; hotel resolution for the
    /// city filter fans out concurrently and fails as a unit.
    pub async fn search_by_city_and_period(
        &self,
        actor: &Actor,
        city: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only staff can search bookings across users".into(),
            ));
        }
        let in_window = booking_repo::find_by_check_in_between(&self.pool, from, to).await?;

        let lookups = in_window.iter().map(|b| self.hotel_of_booking(b));
        let hotels = futures::future::try_join_all(lookups).await?;

        Ok(in_window
            .into_iter()
            .zip(hotels)
            .filter(|(_, hotel)| hotel.city.eq_ignore_ascii_case(city))
            .map(|(booking, _)| booking)
            .collect())
    }

    async fn hotel_of_booking(&self, booking: &Booking) -> AppResult<Hotel> {
        let room = room_repo::find_by_id(&self.pool, booking.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", booking.room_id)))?;
        hotel_repo::find_by_id(&self.pool, room.hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Hotel {} not found", room.hotel_id)))
    }

    async fn fetch(&self, id: i64) -> AppResult<Booking> {
        Ok(booking_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {id} not found")))?)
    }

    async fn ensure_available(
        &self,
        room: &Room,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        exclude: Option<i64>,
    ) -> AppResult<()> {
        if !room.is_available {
            return Err(AppError::Conflict("Room is not available".into()));
        }
        let existing = booking_repo::find_active_by_room(&self.pool, room.id).await?;
        if find_conflict(&existing, check_in, check_out, exclude).is_some() {
            return Err(AppError::Conflict(
                "Room is already booked for the requested dates".into(),
            ));
        }
        Ok(())
    }
}
