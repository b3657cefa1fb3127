//! Triage ranking scenarios run through the public service API.
//!
//! These tests verify:
//! - Waiting time can outweigh severity
//! - Deterministic tie-break on equal rank
//! - Unknown ids leave the store unchanged
//! - Status filtering after resolution

use chrono::{Duration, TimeZone, Utc};

use triage_core::{
    StatusFilter, TicketError, TicketId, TicketStatus, TriageService,
};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_long_wait_beats_high_severity() {
    let service = TriageService::default();
    let now = fixed_now();

    let urgent = service
        .create_ticket("Gaming Laptop", 5, now - Duration::minutes(1))
        .unwrap();
    let stale = service
        .create_ticket("USB Cable", 1, now - Duration::minutes(600))
        .unwrap();

    let ranked = service.list_ranked(now, StatusFilter::All).unwrap();
    let order: Vec<TicketId> = ranked.iter().map(|v| v.id).collect();
    assert_eq!(order, vec![stale, urgent]);

    assert!((ranked[0].priority - -3.7).abs() < 1e-9);
    assert!((ranked[1].priority - -3.505).abs() < 1e-9);
    assert_eq!(ranked[0].waiting_minutes, 600);
    assert_eq!(ranked[1].waiting_minutes, 1);
}

#[test]
fn test_identical_tickets_rank_by_id() {
    let service = TriageService::default();
    let created = fixed_now() - Duration::minutes(20);

    for _ in 0..3 {
        service.create_ticket("Desk Lamp", 3, created).unwrap();
    }

    let ranked = service.list_ranked(fixed_now(), StatusFilter::All).unwrap();
    let ids: Vec<u64> = ranked.iter().map(|v| v.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_assign_unknown_leaves_store_unchanged() {
    let service = TriageService::default();
    let now = fixed_now();
    service.create_ticket("Router", 2, now).unwrap();
    let before = service.rank(now, StatusFilter::All).unwrap();

    let err = service.assign(TicketId(404), "Agent").unwrap_err();

    assert_eq!(err, TicketError::NotFound(TicketId(404)));
    assert_eq!(service.rank(now, StatusFilter::All).unwrap(), before);
}

#[test]
fn test_resolved_ticket_filtering() {
    let service = TriageService::default();
    let now = fixed_now();
    let id = service.create_ticket("Webcam", 4, now).unwrap();
    let other = service.create_ticket("Tripod", 2, now).unwrap();

    service.resolve(id).unwrap();

    let pending = service
        .list_ranked(now, Some(TicketStatus::Pending))
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, other);

    let actionable = service.list_ranked(now, StatusFilter::Actionable).unwrap();
    assert!(actionable.iter().all(|v| v.id != id));

    let all = service.list_ranked(now, None::<TicketStatus>).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|v| v.id == id && v.status == TicketStatus::Resolved));
}

#[test]
fn test_count_conservation_across_statuses() {
    let service = TriageService::default();
    let now = fixed_now();
    let ids: Vec<TicketId> = (1..=5)
        .map(|severity| {
            service
                .create_ticket("Item", severity, now - Duration::minutes(severity * 7))
                .unwrap()
        })
        .collect();
    service.assign(ids[0], "Arce").unwrap();
    service.resolve(ids[1]).unwrap();
    service.assign(ids[2], "Kath").unwrap();
    service.resolve(ids[2]).unwrap();

    let all = service.list_ranked(now, StatusFilter::All).unwrap();
    assert_eq!(all.len(), service.count(StatusFilter::All).unwrap());

    let split: usize = TicketStatus::ALL
        .iter()
        .map(|s| service.list_ranked(now, *s).unwrap().len())
        .sum();
    assert_eq!(split, all.len());
}

#[test]
fn test_ranking_is_stable_across_repeated_queries() {
    let service = TriageService::default();
    let now = fixed_now();
    for (severity, minutes) in [(2, 30), (4, 5), (2, 30), (1, 240), (5, 0)] {
        service
            .create_ticket("Item", severity, now - Duration::minutes(minutes))
            .unwrap();
    }

    let first = service.list_ranked(now, StatusFilter::All).unwrap();
    let second = service.list_ranked(now, StatusFilter::All).unwrap();
    assert_eq!(first, second);

    for pair in first.windows(2) {
        assert!(
            pair[0].priority < pair[1].priority
                || (pair[0].priority == pair[1].priority && pair[0].id < pair[1].id)
        );
    }
}
