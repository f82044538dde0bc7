use shareit_booking::application::booking::{
    BookingApplicationError, decide_booking, get_booking, has_completed_booking, item_bookings,
    list_owner_bookings, list_renter_bookings, request_booking,
};
use shareit_booking::domain::commands::*;
use shareit_booking::domain::*;
use shareit_booking::ports::BookingStore as _;

mod common;

use common::{BOOKER, ITEM, OWNER, STRANGER, fixture, hours, now, stored_booking};

fn request(booker_id: UserId, start_h: Option<i64>, end_h: Option<i64>) -> RequestBooking {
    RequestBooking {
        booker_id,
        item_id: ITEM,
        start: start_h.map(hours),
        end: end_h.map(hours),
        requested_at: now(),
    }
}

fn decision(booking_id: BookingId, acting_user_id: UserId, approve: bool) -> DecideBooking {
    DecideBooking {
        booking_id,
        acting_user_id,
        approve,
    }
}

fn listing(user_id: UserId, state: &str) -> ListBookings {
    ListBookings {
        user_id,
        state: state.to_string(),
        from: None,
        size: None,
        time: now(),
    }
}

fn ids(bookings: &[Booking]) -> Vec<i64> {
    bookings.iter().map(|b| b.id.value()).collect()
}

// ============================================================================
// 予約の申し込み
// ============================================================================

#[tokio::test]
async fn test_request_booking_valid_ranges_start_waiting() {
    let f = fixture();

    for (start, end) in [(0, 1), (1, 2), (3, 48), (100, 101)] {
        let booking = request_booking(&f.deps, request(BOOKER, Some(start), Some(end)))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.start, hours(start));
        assert_eq!(booking.end, hours(end));
        assert_eq!(booking.booker_id, BOOKER);
        assert_eq!(booking.item.id, ITEM);
    }
}

#[tokio::test]
async fn test_request_booking_assigns_increasing_ids() {
    let f = fixture();

    let first = request_booking(&f.deps, request(BOOKER, Some(1), Some(2)))
        .await
        .unwrap();
    let second = request_booking(&f.deps, request(BOOKER, Some(3), Some(4)))
        .await
        .unwrap();

    assert!(second.id > first.id);
    assert_eq!(
        find_stored(&f, first.id).await.map(|b| b.status),
        Some(BookingStatus::Waiting)
    );
}

#[tokio::test]
async fn test_request_booking_start_equals_end_fails() {
    let f = fixture();

    for h in [0, 1, 24] {
        let result = request_booking(&f.deps, request(BOOKER, Some(h), Some(h))).await;
        assert!(matches!(
            result,
            Err(BookingApplicationError::InvalidTimeRange(
                TimeRangeError::StartEqualsEnd
            ))
        ));
    }
}

#[tokio::test]
async fn test_request_booking_time_errors_are_differentiated() {
    let f = fixture();

    let cases = [
        (None, Some(2), TimeRangeError::MissingStart),
        (Some(1), None, TimeRangeError::MissingEnd),
        (Some(3), Some(2), TimeRangeError::EndBeforeStart),
        (Some(-1), Some(2), TimeRangeError::StartInPast),
    ];

    for (start, end, expected) in cases {
        let err = request_booking(&f.deps, request(BOOKER, start, end))
            .await
            .unwrap_err();
        match err {
            BookingApplicationError::InvalidTimeRange(kind) => assert_eq!(kind, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_request_booking_unknown_user_checked_before_item() {
    let f = fixture();
    let cmd = RequestBooking {
        item_id: ItemId::new(999),
        ..request(UserId::new(999), Some(1), Some(2))
    };

    let result = request_booking(&f.deps, cmd).await;

    assert!(matches!(result, Err(BookingApplicationError::UserNotFound(id)) if id == UserId::new(999)));
}

#[tokio::test]
async fn test_request_booking_unknown_item() {
    let f = fixture();
    let cmd = RequestBooking {
        item_id: ItemId::new(999),
        ..request(BOOKER, Some(1), Some(2))
    };

    let result = request_booking(&f.deps, cmd).await;

    assert!(matches!(result, Err(BookingApplicationError::ItemNotFound(id)) if id == ItemId::new(999)));
}

#[tokio::test]
async fn test_request_booking_time_checked_before_availability() {
    let f = fixture();
    f.items.set_available(ITEM, false);

    let result = request_booking(&f.deps, request(OWNER, Some(2), Some(2))).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::InvalidTimeRange(_))
    ));
}

#[tokio::test]
async fn test_request_booking_unavailable_item() {
    let f = fixture();
    f.items.set_available(ITEM, false);

    let result = request_booking(&f.deps, request(BOOKER, Some(1), Some(2))).await;

    assert!(matches!(result, Err(BookingApplicationError::ItemUnavailable(id)) if id == ITEM));
}

#[tokio::test]
async fn test_request_booking_own_item_forbidden() {
    let f = fixture();

    let result = request_booking(&f.deps, request(OWNER, Some(1), Some(2))).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::SelfBookingForbidden(id)) if id == OWNER
    ));
}

#[tokio::test]
async fn test_overlapping_bookings_are_not_prevented() {
    let f = fixture();

    let first = request_booking(&f.deps, request(BOOKER, Some(1), Some(5))).await;
    let second = request_booking(&f.deps, request(STRANGER, Some(2), Some(4))).await;

    assert!(first.is_ok());
    assert!(second.is_ok());
}

// ============================================================================
// 承認・却下
// ============================================================================

#[tokio::test]
async fn test_approve_twice_fails_already_approved() {
    let f = fixture();
    let booking = request_booking(&f.deps, request(BOOKER, Some(1), Some(2)))
        .await
        .unwrap();

    let approved = decide_booking(&f.deps, decision(booking.id, OWNER, true))
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let again = decide_booking(&f.deps, decision(booking.id, OWNER, true)).await;
    assert!(matches!(
        again,
        Err(BookingApplicationError::AlreadyApproved(id)) if id == booking.id
    ));
    assert_eq!(
        find_stored(&f, booking.id).await.map(|b| b.status),
        Some(BookingStatus::Approved)
    );
}

#[tokio::test]
async fn test_reject_always_succeeds() {
    let f = fixture();

    for status in [
        BookingStatus::Waiting,
        BookingStatus::Approved,
        BookingStatus::Rejected,
    ] {
        f.bookings.insert(stored_booking(1, 1, 2, status, BOOKER));

        let rejected = decide_booking(&f.deps, decision(BookingId::new(1), OWNER, false))
            .await
            .unwrap();

        assert_eq!(rejected.status, BookingStatus::Rejected);
    }
}

#[tokio::test]
async fn test_approved_booking_can_be_rejected_then_approved_again() {
    let f = fixture();
    f.bookings
        .insert(stored_booking(1, 1, 2, BookingStatus::Approved, BOOKER));
    let id = BookingId::new(1);

    let rejected = decide_booking(&f.deps, decision(id, OWNER, false))
        .await
        .unwrap();
    let approved = decide_booking(&f.deps, decision(id, OWNER, true))
        .await
        .unwrap();

    assert_eq!(rejected.status, BookingStatus::Rejected);
    assert_eq!(approved.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_decide_by_non_owner_forbidden() {
    let f = fixture();
    let booking = request_booking(&f.deps, request(BOOKER, Some(1), Some(2)))
        .await
        .unwrap();

    for user in [BOOKER, STRANGER] {
        let result = decide_booking(&f.deps, decision(booking.id, user, true)).await;
        assert!(matches!(
            result,
            Err(BookingApplicationError::Forbidden { user_id, booking_id })
                if user_id == user && booking_id == booking.id
        ));
    }
}

#[tokio::test]
async fn test_decide_unknown_booking() {
    let f = fixture();

    let result = decide_booking(&f.deps, decision(BookingId::new(42), OWNER, true)).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::BookingNotFound(id)) if id == BookingId::new(42)
    ));
}

// ============================================================================
// 1件取得
// ============================================================================

#[tokio::test]
async fn test_full_booking_scenario() {
    let f = fixture();

    let booking = request_booking(&f.deps, request(BOOKER, Some(1), Some(2)))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Waiting);

    let approved = decide_booking(&f.deps, decision(booking.id, OWNER, true))
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let seen_by_booker = get_booking(&f.deps, booking.id, BOOKER).await.unwrap();
    assert_eq!(seen_by_booker.status, BookingStatus::Approved);

    let seen_by_owner = get_booking(&f.deps, booking.id, OWNER).await.unwrap();
    assert_eq!(seen_by_owner.id, booking.id);

    let seen_by_stranger = get_booking(&f.deps, booking.id, STRANGER).await;
    assert!(matches!(
        seen_by_stranger,
        Err(BookingApplicationError::BookingNotFound(id)) if id == booking.id
    ));
}

#[tokio::test]
async fn test_get_booking_unknown_requester_checked_first() {
    let f = fixture();

    let result = get_booking(&f.deps, BookingId::new(42), UserId::new(999)).await;

    assert!(matches!(result, Err(BookingApplicationError::UserNotFound(_))));
}

#[tokio::test]
async fn test_get_booking_missing() {
    let f = fixture();

    let result = get_booking(&f.deps, BookingId::new(42), BOOKER).await;

    assert!(matches!(result, Err(BookingApplicationError::BookingNotFound(_))));
}

// ============================================================================
// 一覧
// ============================================================================

/// 予約者BOOKERと第三者STRANGERの予約を投入する
///
/// 時刻は now() からの時間:
/// 1: [-10, -8] APPROVED BOOKER   (PAST)
/// 2: [-6, -2]  REJECTED BOOKER   (PAST)
/// 3: [-1, 3]   APPROVED BOOKER   (CURRENT)
/// 4: [-2, 5]   APPROVED BOOKER   (CURRENT)
/// 5: [2, 6]    WAITING  BOOKER   (FUTURE)
/// 6: [4, 7]    REJECTED BOOKER   (FUTURE)
/// 7: [-5, -3]  APPROVED STRANGER (PAST)
/// 8: [1, 9]    WAITING  STRANGER (FUTURE)
fn seed(f: &common::Fixture) {
    let rows = [
        (1, -10, -8, BookingStatus::Approved, BOOKER),
        (2, -6, -2, BookingStatus::Rejected, BOOKER),
        (3, -1, 3, BookingStatus::Approved, BOOKER),
        (4, -2, 5, BookingStatus::Approved, BOOKER),
        (5, 2, 6, BookingStatus::Waiting, BOOKER),
        (6, 4, 7, BookingStatus::Rejected, BOOKER),
        (7, -5, -3, BookingStatus::Approved, STRANGER),
        (8, 1, 9, BookingStatus::Waiting, STRANGER),
    ];
    for (id, start, end, status, booker) in rows {
        f.bookings
            .insert(stored_booking(id, start, end, status, booker));
    }
}

#[tokio::test]
async fn test_renter_past_returns_own_ended_bookings_end_desc() {
    let f = fixture();
    seed(&f);

    let bookings = list_renter_bookings(&f.deps, listing(BOOKER, "PAST"))
        .await
        .unwrap();

    assert_eq!(ids(&bookings), vec![2, 1]);
    assert!(bookings.iter().all(|b| b.end < now() && b.booker_id == BOOKER));
}

#[tokio::test]
async fn test_renter_all_sorted_end_desc() {
    let f = fixture();
    seed(&f);

    let bookings = list_renter_bookings(&f.deps, listing(BOOKER, "ALL"))
        .await
        .unwrap();

    assert_eq!(ids(&bookings), vec![6, 5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_renter_current_sorted_end_asc() {
    let f = fixture();
    seed(&f);

    let bookings = list_renter_bookings(&f.deps, listing(BOOKER, "CURRENT"))
        .await
        .unwrap();

    assert_eq!(ids(&bookings), vec![3, 4]);
}

#[tokio::test]
async fn test_owner_current_sorted_end_desc() {
    let f = fixture();
    seed(&f);

    let bookings = list_owner_bookings(&f.deps, listing(OWNER, "CURRENT"))
        .await
        .unwrap();

    assert_eq!(ids(&bookings), vec![4, 3]);
}

#[tokio::test]
async fn test_renter_future_waiting_rejected() {
    let f = fixture();
    seed(&f);

    let future = list_renter_bookings(&f.deps, listing(BOOKER, "FUTURE"))
        .await
        .unwrap();
    let waiting = list_renter_bookings(&f.deps, listing(BOOKER, "WAITING"))
        .await
        .unwrap();
    let rejected = list_renter_bookings(&f.deps, listing(BOOKER, "REJECTED"))
        .await
        .unwrap();

    assert_eq!(ids(&future), vec![6, 5]);
    assert_eq!(ids(&waiting), vec![5]);
    assert_eq!(ids(&rejected), vec![6, 2]);
}

#[tokio::test]
async fn test_owner_sees_bookings_of_all_renters() {
    let f = fixture();
    seed(&f);

    let all = list_owner_bookings(&f.deps, listing(OWNER, "ALL"))
        .await
        .unwrap();
    let waiting = list_owner_bookings(&f.deps, listing(OWNER, "WAITING"))
        .await
        .unwrap();
    let past = list_owner_bookings(&f.deps, listing(OWNER, "PAST"))
        .await
        .unwrap();

    assert_eq!(ids(&all), vec![8, 6, 5, 4, 3, 2, 7, 1]);
    assert_eq!(ids(&waiting), vec![8, 5]);
    assert_eq!(ids(&past), vec![2, 7, 1]);
}

#[tokio::test]
async fn test_listing_keyword_is_case_insensitive() {
    let f = fixture();
    seed(&f);

    let renter = list_renter_bookings(&f.deps, listing(BOOKER, "past"))
        .await
        .unwrap();
    let owner = list_owner_bookings(&f.deps, listing(OWNER, "Waiting"))
        .await
        .unwrap();

    assert_eq!(ids(&renter), vec![2, 1]);
    assert_eq!(ids(&owner), vec![8, 5]);
}

#[tokio::test]
async fn test_listing_uses_given_time() {
    let f = fixture();
    seed(&f);
    let query = ListBookings {
        time: hours(-4),
        ..listing(BOOKER, "CURRENT")
    };

    let bookings = list_renter_bookings(&f.deps, query).await.unwrap();

    assert_eq!(ids(&bookings), vec![2]);
}

#[tokio::test]
async fn test_owner_unknown_state_message_is_uppercased() {
    let f = fixture();

    let err = list_owner_bookings(&f.deps, listing(OWNER, "unknown"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::UnsupportedState(_)));
    assert!(err.to_string().contains("UNKNOWN"));
}

#[tokio::test]
async fn test_owner_checks_state_before_user() {
    let f = fixture();

    let result = list_owner_bookings(&f.deps, listing(UserId::new(999), "UNKNOWN")).await;

    assert!(matches!(result, Err(BookingApplicationError::UnsupportedState(_))));
}

#[tokio::test]
async fn test_renter_checks_user_before_state() {
    let f = fixture();

    let unknown_user = list_renter_bookings(&f.deps, listing(UserId::new(999), "UNKNOWN")).await;
    let known_user = list_renter_bookings(&f.deps, listing(BOOKER, "UNKNOWN")).await;

    assert!(matches!(unknown_user, Err(BookingApplicationError::UserNotFound(_))));
    assert!(matches!(known_user, Err(BookingApplicationError::UnsupportedState(_))));
}

#[tokio::test]
async fn test_owner_unknown_user() {
    let f = fixture();

    let result = list_owner_bookings(&f.deps, listing(UserId::new(999), "ALL")).await;

    assert!(matches!(result, Err(BookingApplicationError::UserNotFound(_))));
}

#[tokio::test]
async fn test_listing_pagination() {
    let f = fixture();
    seed(&f);

    let paged = |from, size| ListBookings {
        from: Some(from),
        size: Some(size),
        ..listing(BOOKER, "ALL")
    };

    // 全件: 6, 5, 4, 3, 2, 1
    let first = list_renter_bookings(&f.deps, paged(0, 2)).await.unwrap();
    let second = list_renter_bookings(&f.deps, paged(2, 2)).await.unwrap();
    let offset_in_page = list_renter_bookings(&f.deps, paged(1, 2)).await.unwrap();
    let beyond = list_renter_bookings(&f.deps, paged(20, 2)).await.unwrap();

    assert_eq!(ids(&first), vec![6, 5]);
    assert_eq!(ids(&second), vec![4, 3]);
    assert_eq!(ids(&offset_in_page), vec![6, 5]);
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_listing_invalid_pagination() {
    let f = fixture();

    for (from, size) in [(0, 0), (-1, 5), (0, -1)] {
        let query = ListBookings {
            from: Some(from),
            size: Some(size),
            ..listing(BOOKER, "ALL")
        };
        let result = list_renter_bookings(&f.deps, query).await;
        assert!(matches!(
            result,
            Err(BookingApplicationError::InvalidPagination(_))
        ));
    }
}

// ============================================================================
// アイテムの直前・直後の予約
// ============================================================================

#[tokio::test]
async fn test_item_bookings_for_owner() {
    let f = fixture();
    seed(&f);

    let bookings = item_bookings(&f.deps, ITEM, OWNER, now()).await.unwrap();

    // 開始済みで end が最も遅いのは 4 [-2, 5]
    assert_eq!(bookings.last.map(|b| b.id.value()), Some(4));
    // 未開始で最も早いのは 8 [1, 9]
    assert_eq!(bookings.next.map(|b| b.id.value()), Some(8));
}

#[tokio::test]
async fn test_item_bookings_next_skips_rejected() {
    let f = fixture();
    f.bookings
        .insert(stored_booking(1, 1, 2, BookingStatus::Rejected, BOOKER));
    f.bookings
        .insert(stored_booking(2, 3, 4, BookingStatus::Waiting, BOOKER));

    let bookings = item_bookings(&f.deps, ITEM, OWNER, now()).await.unwrap();

    assert!(bookings.last.is_none());
    assert_eq!(bookings.next.map(|b| b.id.value()), Some(2));
}

#[tokio::test]
async fn test_item_bookings_hidden_from_non_owner() {
    let f = fixture();
    seed(&f);

    let bookings = item_bookings(&f.deps, ITEM, BOOKER, now()).await.unwrap();

    assert_eq!(bookings, ItemBookings::default());
}

#[tokio::test]
async fn test_item_bookings_unknown_item() {
    let f = fixture();

    let result = item_bookings(&f.deps, ItemId::new(999), OWNER, now()).await;

    assert!(matches!(result, Err(BookingApplicationError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_has_completed_booking() {
    let f = fixture();
    seed(&f);

    assert!(has_completed_booking(&f.deps, ITEM, BOOKER, now()).await.unwrap());
    assert!(!has_completed_booking(&f.deps, ITEM, BOOKER, hours(-9)).await.unwrap());
    assert!(!has_completed_booking(&f.deps, ITEM, OWNER, now()).await.unwrap());
}

// ============================================================================
// helpers
// ============================================================================

async fn find_stored(f: &common::Fixture, id: BookingId) -> Option<Booking> {
    f.bookings.find_by_id(id).await.unwrap()
}
