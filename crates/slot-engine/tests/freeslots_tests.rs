//! Tests for free-slot computation over calendar-day ranges.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::freeslots::{day_window, first_free_slot, free_slots, free_slots_in_window};
use slot_engine::interval::{Event, Interval};
use slot_engine::{parse_timezone, SlotError};

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, min, 0).unwrap()
}

fn busy(day: u32, start_hour: u32, end_hour: u32) -> Interval {
    Interval::new(at(day, start_hour, 0), at(day, end_hour, 0)).unwrap()
}

fn end_of(day: u32) -> DateTime<Utc> {
    at(day, 23, 59) + Duration::milliseconds(59_999)
}

fn slot(start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
    Interval { start, end }
}

#[test]
fn two_meetings_leave_three_gaps() {
    let events = vec![busy(1, 9, 10), busy(1, 11, 12)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![
            slot(at(1, 0, 0), at(1, 9, 0)),
            slot(at(1, 10, 0), at(1, 11, 0)),
            slot(at(1, 12, 0), end_of(1)),
        ]
    );
    assert_eq!(slots[2].end.to_rfc3339(), "2024-01-01T23:59:59.999+00:00");
}

#[test]
fn empty_busy_set_frees_whole_range() {
    let slots = free_slots::<Interval, _>(at(1, 0, 0), at(2, 0, 0), &[], &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 0, 0), end_of(2))]);
}

#[test]
fn range_bounds_are_rounded_to_whole_days() {
    let slots = free_slots::<Interval, _>(at(1, 15, 30), at(1, 8, 0), &[], &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 0, 0), end_of(1))]);
}

#[test]
fn nested_meeting_merges_into_outer_one() {
    let events = vec![busy(1, 9, 12), busy(1, 10, 11)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![slot(at(1, 0, 0), at(1, 9, 0)), slot(at(1, 12, 0), end_of(1))]
    );
}

#[test]
fn input_order_does_not_matter() {
    let events = vec![busy(1, 15, 16), busy(1, 10, 11), busy(1, 9, 12)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![
            slot(at(1, 0, 0), at(1, 9, 0)),
            slot(at(1, 12, 0), at(1, 15, 0)),
            slot(at(1, 16, 0), end_of(1)),
        ]
    );
}

#[test]
fn chained_overlaps_form_one_busy_region() {
    // 09:00-10:00 overlaps 09:30-11:00, which overlaps 10:30-13:00.
    let events = vec![
        Interval::new(at(1, 9, 0), at(1, 10, 0)).unwrap(),
        Interval::new(at(1, 9, 30), at(1, 11, 0)).unwrap(),
        Interval::new(at(1, 10, 30), at(1, 13, 0)).unwrap(),
    ];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![slot(at(1, 0, 0), at(1, 9, 0)), slot(at(1, 13, 0), end_of(1))]
    );
}

#[test]
fn back_to_back_meetings_leave_no_zero_length_gap() {
    let events = vec![busy(1, 9, 10), busy(1, 10, 11)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![slot(at(1, 0, 0), at(1, 9, 0)), slot(at(1, 11, 0), end_of(1))]
    );
}

#[test]
fn meeting_at_midnight_leaves_no_leading_slot() {
    let events = vec![busy(1, 0, 8)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 8, 0), end_of(1))]);
}

#[test]
fn fully_booked_day_has_no_free_slots() {
    let events = vec![Interval::new(at(1, 0, 0), end_of(1)).unwrap()];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert!(slots.is_empty());
}

#[test]
fn zero_length_busy_interval_blocks_nothing() {
    let events = vec![Interval::new(at(1, 9, 0), at(1, 9, 0)).unwrap()];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 0, 0), end_of(1))]);
}

#[test]
fn busy_interval_from_previous_day_is_clipped() {
    // 22:00 on Dec 31 to 02:00 on Jan 1.
    let overnight = Interval::new(
        Utc.with_ymd_and_hms(2023, 12, 31, 22, 0, 0).unwrap(),
        at(1, 2, 0),
    )
    .unwrap();

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &[overnight], &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 2, 0), end_of(1))]);
}

#[test]
fn busy_interval_past_range_end_is_clipped() {
    let late = Interval::new(at(1, 22, 0), at(2, 3, 0)).unwrap();

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &[late], &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 0, 0), at(1, 22, 0))]);
}

#[test]
fn busy_intervals_outside_range_are_ignored() {
    let events = vec![busy(3, 9, 10), busy(2, 9, 10)];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(slots, vec![slot(at(1, 0, 0), end_of(1))]);
}

#[test]
fn multi_day_range_with_multi_day_event() {
    let events = vec![Interval::new(at(1, 18, 0), at(2, 9, 0)).unwrap()];

    let slots = free_slots(at(1, 0, 0), at(2, 0, 0), &events, &Utc).unwrap();

    assert_eq!(
        slots,
        vec![slot(at(1, 0, 0), at(1, 18, 0)), slot(at(2, 9, 0), end_of(2))]
    );
}

#[test]
fn events_with_payload_are_accepted() {
    let events = vec![Event::new(at(1, 9, 0), at(1, 17, 0), "work day")];

    let slots = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].end, at(1, 9, 0));
    assert_eq!(slots[1].start, at(1, 17, 0));
}

#[test]
fn reversed_busy_interval_fails_fast() {
    let bad = Interval {
        start: at(1, 12, 0),
        end: at(1, 11, 0),
    };
    let events = vec![busy(1, 9, 10), bad];

    let err = free_slots(at(1, 0, 0), at(1, 0, 0), &events, &Utc).unwrap_err();

    assert_eq!(
        err,
        SlotError::InvalidInterval {
            start: at(1, 12, 0),
            end: at(1, 11, 0)
        }
    );
}

#[test]
fn reversed_busy_interval_outside_window_still_fails() {
    let bad = Interval {
        start: at(20, 12, 0),
        end: at(20, 11, 0),
    };

    assert!(free_slots(at(1, 0, 0), at(1, 0, 0), &[bad], &Utc).is_err());
}

#[test]
fn reversed_range_fails() {
    let err = free_slots::<Interval, _>(at(2, 0, 0), at(1, 0, 0), &[], &Utc).unwrap_err();

    assert!(matches!(err, SlotError::InvalidInterval { .. }));
}

#[test]
fn zoned_window_uses_local_midnight() {
    let tz = parse_timezone("America/New_York").unwrap();

    let window = day_window(at(1, 12, 0), at(1, 12, 0), &tz).unwrap();

    assert_eq!(window.start, at(1, 5, 0));
    assert_eq!(window.end, at(2, 5, 0) - Duration::milliseconds(1));
}

#[test]
fn zoned_free_slots_shift_with_timezone() {
    // 09:00-10:00 New York time.
    let tz = parse_timezone("America/New_York").unwrap();
    let events = vec![busy(1, 14, 15)];

    let slots = free_slots(at(1, 12, 0), at(1, 12, 0), &events, &tz).unwrap();

    assert_eq!(
        slots,
        vec![
            slot(at(1, 5, 0), at(1, 14, 0)),
            slot(at(1, 15, 0), at(2, 5, 0) - Duration::milliseconds(1)),
        ]
    );
}

#[test]
fn explicit_window_is_not_rounded() {
    let window = Interval::new(at(1, 8, 0), at(1, 17, 0)).unwrap();
    let events = vec![busy(1, 10, 11)];

    let slots = free_slots_in_window(window, &events).unwrap();

    assert_eq!(
        slots,
        vec![slot(at(1, 8, 0), at(1, 10, 0)), slot(at(1, 11, 0), at(1, 17, 0))]
    );
    assert_eq!(slots[0].duration_minutes(), 120);
    assert_eq!(slots[1].duration_minutes(), 360);
}

#[test]
fn first_free_slot_with_minimum_duration() {
    // Gaps: 08:30-09:00 (30 min) and 12:00 to end of day.
    let events = vec![
        Interval::new(at(1, 0, 0), at(1, 8, 30)).unwrap(),
        busy(1, 9, 12),
    ];

    let slot = first_free_slot(
        at(1, 0, 0),
        at(1, 0, 0),
        &events,
        Duration::minutes(60),
        &Utc,
    )
    .unwrap();

    assert_eq!(
        slot,
        Some(Interval {
            start: at(1, 12, 0),
            end: end_of(1),
        })
    );
}

#[test]
fn first_free_slot_none_when_no_gap_is_long_enough() {
    let events = vec![
        Interval::new(at(1, 0, 0), at(1, 10, 0)).unwrap(),
        Interval::new(at(1, 10, 15), end_of(1)).unwrap(),
    ];

    let slot = first_free_slot(
        at(1, 0, 0),
        at(1, 0, 0),
        &events,
        Duration::minutes(60),
        &Utc,
    )
    .unwrap();

    assert!(slot.is_none());
}
