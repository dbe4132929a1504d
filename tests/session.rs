use std::time::Duration;

use pretty_assertions::assert_eq;
use snake_draft::names::{parse_items, parse_names};
use snake_draft::{
    DraftConfig, DraftError, DraftEvent, DraftPhase, DraftSession, FinalRoster, SessionError,
    TimerError, TurnOutcome,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

fn drain(events: &mut UnboundedReceiver<DraftEvent>) -> Vec<DraftEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn kinds(events: &[DraftEvent]) -> Vec<&'static str> {
    events.iter().map(|e| e.as_str()).collect()
}

fn next(participant: &str, round: u32) -> TurnOutcome {
    TurnOutcome::Next {
        participant: participant.to_string(),
        round,
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_full_draft() {
    let (draft, mut events) = DraftSession::spawn(DraftConfig::new().with_fixed_order()).unwrap();

    draft
        .configure(parse_names("A, B"), parse_names("T1\nT2"))
        .await
        .unwrap();
    draft
        .load_items(parse_items("P1\nP2|g1\nP3|g1\nP4"))
        .await
        .unwrap();
    draft.assign_team("A", "T1").await.unwrap();
    draft.assign_team("B", "T2").await.unwrap();

    let snapshot = draft.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, DraftPhase::Picking);
    assert_eq!(snapshot.current_participant.as_deref(), Some("A"));
    assert_eq!(snapshot.remaining_seconds, 120);
    assert_eq!(kinds(&drain(&mut events)), vec!["state_changed"; 3]);

    // A's clock warns at 90s remaining
    sleep(Duration::from_millis(30_500)).await;
    assert_eq!(
        drain(&mut events),
        vec![DraftEvent::TimerWarning {
            generation: 1,
            remaining: 90
        }]
    );

    assert_eq!(draft.pick("P1").await.unwrap(), next("B", 1));

    // B runs out of time; nothing is picked on B's behalf
    sleep(Duration::from_millis(120_500)).await;
    let fired = drain(&mut events);
    assert_eq!(
        kinds(&fired),
        vec!["state_changed", "timer_warning", "timer_timeout"]
    );
    assert_eq!(fired[2], DraftEvent::TimerTimeout { generation: 2 });

    let snapshot = draft.snapshot().await.unwrap();
    assert_eq!(snapshot.current_participant.as_deref(), Some("B"));
    assert_eq!(snapshot.pool.len(), 3);

    // Grouped pick: B's boundary repeat is skipped
    assert_eq!(draft.pick("P3").await.unwrap(), next("A", 2));
    assert_eq!(
        draft.pick("P3").await,
        Err(SessionError::Draft(DraftError::NotAvailable("P3".to_string())))
    );

    assert_eq!(draft.pick("P4").await.unwrap(), TurnOutcome::Complete);
    assert_eq!(
        kinds(&drain(&mut events)),
        vec!["state_changed", "state_changed", "draft_complete"]
    );

    let rosters = draft.final_rosters().await.unwrap().unwrap();
    assert_eq!(
        rosters,
        vec![
            FinalRoster {
                participant: "A".to_string(),
                team: "T1".to_string(),
                items: vec!["P1".to_string(), "P4".to_string()],
            },
            FinalRoster {
                participant: "B".to_string(),
                team: "T2".to_string(),
                items: vec!["P2".to_string(), "P3".to_string()],
            },
        ]
    );

    // Clock is stopped for good
    sleep(Duration::from_secs(300)).await;
    assert!(drain(&mut events).is_empty());
    assert!(matches!(
        draft.pass().await,
        Err(SessionError::Draft(DraftError::WrongPhase { .. }))
    ));

    drop(draft);
    assert!(events.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_session_configuration_errors_repeat() {
    let (draft, mut events) = DraftSession::spawn(DraftConfig::new()).unwrap();

    for _ in 0..3 {
        let result = draft
            .configure(parse_names("A, B, C"), parse_names("T1\nT2"))
            .await;
        assert!(matches!(
            result,
            Err(SessionError::Draft(DraftError::Configuration(_)))
        ));
    }
    assert_eq!(draft.snapshot().await.unwrap().phase, DraftPhase::Setup);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_session_rejects_invalid_config() {
    let config = DraftConfig::new().with_pick_seconds(60, 90);
    assert!(matches!(
        DraftSession::spawn(config),
        Err(TimerError::InvalidConfig(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_session_stop_timer() {
    let (draft, mut events) = DraftSession::spawn(DraftConfig::new().with_fixed_order()).unwrap();
    draft
        .configure(vec!["A".to_string()], vec!["T1".to_string()])
        .await
        .unwrap();
    draft.load_items(parse_items("P1\nP2")).await.unwrap();
    draft.assign_team("A", "T1").await.unwrap();
    drain(&mut events);

    sleep(Duration::from_millis(5_500)).await;
    draft.stop_timer().await.unwrap();

    sleep(Duration::from_secs(300)).await;
    assert!(drain(&mut events).is_empty());
    assert_eq!(draft.snapshot().await.unwrap().remaining_seconds, 115);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_session_concurrent_picks_serialized() {
    let (draft, _events) = DraftSession::spawn(DraftConfig::new().with_fixed_order()).unwrap();
    draft
        .configure(parse_names("A,B"), parse_names("T1,T2"))
        .await
        .unwrap();
    draft.load_items(parse_items("P1\nP2\nP3")).await.unwrap();
    draft.assign_team("A", "T1").await.unwrap();
    draft.assign_team("B", "T2").await.unwrap();

    let racers: Vec<_> = (0..8)
        .map(|_| {
            let handle = draft.clone();
            tokio::spawn(async move { handle.pick("P1").await })
        })
        .collect();

    let mut won = 0;
    for racer in racers {
        match racer.await.unwrap() {
            Ok(_) => won += 1,
            Err(err) => assert_eq!(
                err,
                SessionError::Draft(DraftError::NotAvailable("P1".to_string()))
            ),
        }
    }
    assert_eq!(won, 1);

    let snapshot = draft.snapshot().await.unwrap();
    assert_eq!(snapshot.pool.len(), 2);
    assert_eq!(snapshot.current_participant.as_deref(), Some("B"));
    assert_eq!(snapshot.turn_generation, 2);
}
