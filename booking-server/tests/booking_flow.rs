//! End-to-end booking flow over an in-memory database
//!
//! Exercises the full lifecycle (create -> confirm -> cancel), pricing
//! snapshots, conflict detection and the role checks, all through
//! `BookingService` the way the HTTP handlers drive it.

use booking_server::booking::{Actor, BookingOrigin, BookingService};
use booking_server::db::DbService;
use booking_server::db::repository::{hotel as hotel_repo, room as room_repo, user as user_repo};
use booking_server::utils::AppError;
use chrono::{DateTime, TimeZone, Utc};
use shared::models::{
    BookingCreate, BookingStatus, BookingUpdate, Hotel, HotelCreate, Room, RoomCreate, RoomType,
    UserRole,
};
use sqlx::SqlitePool;

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

async fn setup() -> DbService {
    DbService::in_memory().await.expect("in-memory db")
}

async fn seed_hotel(pool: &SqlitePool, city: &str) -> Hotel {
    hotel_repo::create(
        pool,
        HotelCreate {
            name: format!("Hotel {city}"),
            address: "1 Main St".into(),
            city: city.into(),
            country: "Hungary".into(),
            description: "Test hotel".into(),
            stars: 4,
            amenities: vec!["wifi".into()],
            images: vec!["https://example.com/a.jpg".into()],
            contact_email: "info@example.com".into(),
            contact_phone: "+36 1 234 5678".into(),
        },
    )
    .await
    .expect("hotel")
}

async fn seed_room(pool: &SqlitePool, hotel_id: i64, number: &str, price: f64) -> Room {
    room_repo::create(
        pool,
        RoomCreate {
            hotel_id,
            number: number.into(),
            room_type: RoomType::Double,
            price,
            capacity: 2,
            description: "Test room".into(),
            amenities: vec![],
            images: vec![],
            is_available: true,
        },
    )
    .await
    .expect("room")
}

async fn seed_actor(pool: &SqlitePool, email: &str, role: UserRole) -> Actor {
    let user = user_repo::create(pool, email, "Test User", role, "not-a-real-hash")
        .await
        .expect("user");
    Actor {
        user_id: user.id,
        role,
    }
}

fn booking_payload(room_id: i64, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> BookingCreate {
    BookingCreate {
        room_id,
        check_in_date: check_in,
        check_out_date: check_out,
        guest_name: "Ada Lovelace".into(),
        guest_email: "ada@example.com".into(),
        guest_phone: "+44 20 7946 0000".into(),
    }
}

#[tokio::test]
async fn self_service_booking_runs_full_lifecycle() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 100.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;
    let admin = seed_actor(pool, "staff@example.com", UserRole::Admin).await;

    // Self-service bookings start pending; price is nights * rate
    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, 300.0);
    assert_eq!(booking.user_id, owner.user_id);

    // Only staff confirm
    let err = service.confirm(&owner, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let confirmed = service.confirm(&admin, booking.id).await.expect("confirm");
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    // Owner can cancel a confirmed booking
    let cancelled = service.cancel(&owner, booking.id).await.expect("cancel");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // Cancelled is terminal
    let err = service.confirm(&admin, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
    let err = service
        .update(&owner, booking.id, BookingUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn overlapping_dates_conflict_but_back_to_back_do_not() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("first booking");

    // [1, 4) overlaps [3, 5)
    let err = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 3), date(2026, 9, 5)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Check-out day equals next check-in: no conflict
    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 4), date(2026, 9, 6)),
        )
        .await
        .expect("back-to-back booking");
}

#[tokio::test]
async fn cancelled_bookings_release_the_room() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");
    service.cancel(&owner, booking.id).await.expect("cancel");

    // Same dates rebookable after cancellation
    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("rebook");
}

#[tokio::test]
async fn quick_booking_starts_confirmed_and_checks_hotel_membership() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let other_hotel = seed_hotel(pool, "Vienna").await;
    let room = seed_room(pool, hotel.id, "101", 120.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    let booking = service
        .create_for_hotel(
            &owner,
            hotel.id,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 3)),
        )
        .await
        .expect("quick booking");
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_price, 240.0);

    // The room must belong to the addressed hotel
    let err = service
        .create_for_hotel(
            &owner,
            other_hotel.id,
            booking_payload(room.id, date(2026, 10, 1), date(2026, 10, 3)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn zero_night_stays_are_rejected() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    let day = date(2026, 9, 1);
    let err = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, day, day),
        )
        .await
        .unwrap_err();
    // Equal dates fail payload validation before pricing runs
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn editing_dates_recomputes_price_and_ignores_self_conflict() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 100.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");
    assert_eq!(booking.total_price, 300.0);

    // Extending the stay by one night within its own window must not
    // conflict with itself
    let updated = service
        .update(
            &owner,
            booking.id,
            BookingUpdate {
                check_out_date: Some(date(2026, 9, 5)),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.total_price, 400.0);
    assert_eq!(updated.check_out_date, date(2026, 9, 5));
}

#[tokio::test]
async fn only_owner_or_admin_may_touch_a_booking() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;
    let stranger = seed_actor(pool, "other@example.com", UserRole::User).await;
    let admin = seed_actor(pool, "staff@example.com", UserRole::Admin).await;

    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");

    let err = service.get(&stranger, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = service.cancel(&stranger, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Delete is a staff action even for the owner
    let err = service.delete(&owner, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(service.delete(&admin, booking.id).await.expect("delete"));

    let err = service.get(&admin, booking.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn unavailable_rooms_reject_new_bookings() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    room_repo::update(
        pool,
        room.id,
        shared::models::RoomUpdate {
            is_available: Some(false),
            ..Default::default()
        },
    )
    .await
    .expect("flag room");

    let err = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The probe reports the same answer
    let available = service
        .check_availability(room.id, date(2026, 9, 1), date(2026, 9, 4), None)
        .await
        .expect("probe");
    assert!(!available);
}

#[tokio::test]
async fn availability_probe_sees_active_bookings() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");

    let available = service
        .check_availability(room.id, date(2026, 9, 3), date(2026, 9, 5), None)
        .await
        .expect("probe");
    assert!(!available);

    // Excluding the booking itself frees its window (edit flow)
    let available = service
        .check_availability(room.id, date(2026, 9, 3), date(2026, 9, 5), Some(booking.id))
        .await
        .expect("probe excluding self");
    assert!(available);
}

#[tokio::test]
async fn search_filters_by_city_and_check_in_window() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let budapest = seed_hotel(pool, "Budapest").await;
    let vienna = seed_hotel(pool, "Vienna").await;
    let room_bp = seed_room(pool, budapest.id, "101", 80.0).await;
    let room_vie = seed_room(pool, vienna.id, "201", 90.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;
    let admin = seed_actor(pool, "staff@example.com", UserRole::Admin).await;

    let in_window = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room_bp.id, date(2026, 9, 10), date(2026, 9, 12)),
        )
        .await
        .expect("budapest booking");
    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room_vie.id, date(2026, 9, 10), date(2026, 9, 12)),
        )
        .await
        .expect("vienna booking");
    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room_bp.id, date(2026, 10, 1), date(2026, 10, 3)),
        )
        .await
        .expect("out-of-window booking");

    let found = service
        .search_by_city_and_period(&admin, "budapest", date(2026, 9, 1), date(2026, 9, 30))
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, in_window.id);
}

#[tokio::test]
async fn cross_user_search_is_a_staff_action() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;
    let other = seed_actor(pool, "other@example.com", UserRole::User).await;

    service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 10), date(2026, 9, 12)),
        )
        .await
        .expect("booking");

    // The report exposes other users' guest details; regular users are
    // refused even for windows containing their own bookings
    let err = service
        .search_by_city_and_period(&other, "budapest", date(2026, 9, 1), date(2026, 9, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = service
        .search_by_city_and_period(&owner, "budapest", date(2026, 9, 1), date(2026, 9, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn room_create_requires_an_existing_hotel() {
    let db = setup().await;
    let pool = &db.pool;

    let err = room_repo::create(
        pool,
        RoomCreate {
            hotel_id: 9999,
            number: "101".into(),
            room_type: RoomType::Double,
            price: 80.0,
            capacity: 2,
            description: "Test room".into(),
            amenities: vec![],
            images: vec![],
            is_available: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        booking_server::db::repository::RepoError::NotFound(_)
    ));
}

#[tokio::test]
async fn room_numbers_stay_unique_within_a_hotel_on_rename() {
    let db = setup().await;
    let pool = &db.pool;

    let hotel = seed_hotel(pool, "Budapest").await;
    seed_room(pool, hotel.id, "101", 80.0).await;
    let second = seed_room(pool, hotel.id, "102", 80.0).await;

    // Renaming onto an occupied number conflicts, same as on create
    let err = room_repo::update(
        pool,
        second.id,
        shared::models::RoomUpdate {
            number: Some("101".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        booking_server::db::repository::RepoError::Duplicate(_)
    ));

    // Keeping the current number while changing other fields is fine
    let updated = room_repo::update(
        pool,
        second.id,
        shared::models::RoomUpdate {
            number: Some("102".into()),
            price: Some(95.0),
            ..Default::default()
        },
    )
    .await
    .expect("update");
    assert_eq!(updated.number, "102");
    assert_eq!(updated.price, 95.0);
}

#[tokio::test]
async fn deletes_are_restricted_while_referenced() {
    let db = setup().await;
    let pool = &db.pool;
    let service = BookingService::new(pool.clone());

    let hotel = seed_hotel(pool, "Budapest").await;
    let room = seed_room(pool, hotel.id, "101", 80.0).await;
    let owner = seed_actor(pool, "guest@example.com", UserRole::User).await;

    // Hotel with rooms cannot go
    let err = hotel_repo::delete(pool, hotel.id).await.unwrap_err();
    assert!(matches!(
        err,
        booking_server::db::repository::RepoError::Validation(_)
    ));

    // Room with an active booking cannot go
    let booking = service
        .create(
            &owner,
            BookingOrigin::SelfService,
            booking_payload(room.id, date(2026, 9, 1), date(2026, 9, 4)),
        )
        .await
        .expect("create");
    let err = room_repo::delete(pool, room.id).await.unwrap_err();
    assert!(matches!(
        err,
        booking_server::db::repository::RepoError::Validation(_)
    ));

    // Cancelling the booking unblocks the room, then the hotel
    service.cancel(&owner, booking.id).await.expect("cancel");
    assert!(room_repo::delete(pool, room.id).await.expect("room delete"));
    assert!(hotel_repo::delete(pool, hotel.id).await.expect("hotel delete"));
}
