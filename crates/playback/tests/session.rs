use std::time::Duration;

use fight_core::{
    BruteId, BruteRecord, FightTables, Fighter, FighterId, FighterSet, Step, StepLog,
    prepare_fighters, seed_from_fight_id, simulate,
};
use playback::{
    Animation, HeadlessRenderer, PlaybackEvent, PlaybackOutcome, PlaybackSpeed, StepPlayer, Topic,
};
use tokio::time::Instant;

fn brutes() -> (BruteRecord, BruteRecord) {
    let ares = BruteRecord::new(BruteId(1), "Ares", 8, 90, 12, 9, 7).with_skills([
        "tragicPotion",
        "hammer",
        "fistsOfFury",
    ]);
    let hera = BruteRecord::new(BruteId(2), "Hera", 8, 80, 9, 14, 10).with_skills([
        "vampirism",
        "venom",
        "bomb",
        "sixthSense",
    ]);
    (ares, hera)
}

fn fight(id: &str) -> (StepLog, Vec<Fighter>) {
    let tables = FightTables::default();
    let (ares, hera) = brutes();
    let log = simulate(&ares, &hera, seed_from_fight_id(id), &tables).unwrap();
    (log, prepare_fighters(&ares, &hera, &tables).into())
}

fn heal_then_end() -> StepLog {
    StepLog::new(vec![
        Step::Heal {
            brute: FighterId::LEFT,
            amount: 10,
            poison_heal: false,
        },
        Step::End {
            winner: FighterId::LEFT,
            loser: FighterId::RIGHT,
            forced: true,
        },
    ])
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn simulated_fight_replays_to_the_same_state() {
    let (log, fighters) = fight("arena-1");
    let json = log.to_json().unwrap();

    let mut expected = FighterSet::new(fighters.clone());
    for step in &log {
        expected.apply(step).unwrap();
    }

    let renderer = HeadlessRenderer::new();
    let player = StepPlayer::builder().renderer(renderer.clone()).build().unwrap();
    let outcome = player.play_json(&json, fighters).await.unwrap();

    let PlaybackOutcome::Completed {
        steps,
        winner,
        loser,
        forced,
        fighters,
    } = outcome
    else {
        panic!("fight was not completed");
    };
    assert_eq!(steps, log.len());
    assert_eq!((winner, loser, forced), log.outcome());
    assert_eq!(fighters, expected.into_inner());
    if !forced {
        assert!(fighters[loser.index()].dead);
        assert_eq!(fighters[loser.index()].hp, 0);
    }
}

#[tokio::test(start_paused = true)]
async fn step_order_does_not_depend_on_speed() {
    let (log, fighters) = fight("arena-2");

    let mut runs = Vec::new();
    for speed in [1.0, 4.0] {
        let renderer = HeadlessRenderer::new();
        let control = PlaybackSpeed::new(speed);
        let player = StepPlayer::builder()
            .renderer(renderer.clone())
            .speed(control.reader())
            .build()
            .unwrap();
        let mut settled = player.subscribe(Topic::Step);

        let started = Instant::now();
        let outcome = player.play(&log, fighters.clone()).await.unwrap();
        let elapsed = started.elapsed();
        assert!(!outcome.is_cancelled());

        let mut order = Vec::new();
        while let Ok(event) = settled.try_recv() {
            if let PlaybackEvent::StepSettled { index, kind } = event {
                order.push((index, kind));
            }
        }
        runs.push((order, renderer.animations(), elapsed));
    }

    let (slow_order, slow_animations, slow_elapsed) = &runs[0];
    let (fast_order, fast_animations, fast_elapsed) = &runs[1];
    assert_eq!(slow_order.len(), log.len());
    assert_eq!(slow_order, fast_order);
    assert_eq!(slow_animations, fast_animations);
    assert!(fast_elapsed < slow_elapsed);
}

#[tokio::test(start_paused = true)]
async fn lifecycle_events_bracket_every_step() {
    let renderer = HeadlessRenderer::new();
    let player = StepPlayer::builder().renderer(renderer).build().unwrap();
    let mut session = player.subscribe(Topic::Session);
    let mut steps = player.subscribe(Topic::Step);

    let log = heal_then_end();
    player.play(&log, fight("arena-3").1).await.unwrap();

    assert_eq!(
        session.try_recv().unwrap(),
        PlaybackEvent::SessionStarted { steps: 2 }
    );
    assert_eq!(
        session.try_recv().unwrap(),
        PlaybackEvent::SessionFinished {
            cursor: 2,
            cancelled: false
        }
    );

    let mut kinds = Vec::new();
    while let Ok(event) = steps.try_recv() {
        kinds.push(event);
    }
    assert_eq!(kinds.len(), 4);
    assert!(matches!(kinds[0], PlaybackEvent::StepStarted { index: 0, .. }));
    assert!(matches!(kinds[1], PlaybackEvent::StepSettled { index: 0, .. }));
    assert!(matches!(kinds[3], PlaybackEvent::StepSettled { index: 1, .. }));
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_at_the_pending_step_and_ignores_late_callbacks() {
    let renderer = HeadlessRenderer::builder().manual_animations().build();
    let player = StepPlayer::builder()
        .renderer(renderer.clone())
        .build()
        .unwrap();
    let handle = player.handle();
    let mut session_events = handle.subscribe(Topic::Session);

    let log = heal_then_end();
    let fighters = fight("arena-4").1;
    let task = tokio::spawn(async move { player.play(&log, fighters).await });

    let mut pending = Vec::new();
    while !pending.iter().any(|(_, a, _)| *a == Animation::Drink) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        pending.extend(renderer.take_pending_animations());
    }

    handle.cancel();
    let outcome = task.await.unwrap().unwrap();
    assert!(matches!(outcome, PlaybackOutcome::Cancelled { cursor: 0 }));

    for (_, animation, events) in pending {
        assert!(!events.complete(), "{animation:?} resolved after teardown");
        assert!(!events.event(&animation.end_event()));
    }

    assert!(matches!(
        session_events.try_recv().unwrap(),
        PlaybackEvent::SessionStarted { .. }
    ));
    assert_eq!(
        session_events.try_recv().unwrap(),
        PlaybackEvent::SessionFinished {
            cursor: 0,
            cancelled: true
        }
    );
}

#[tokio::test(start_paused = true)]
async fn dropping_playback_tears_the_session_down() {
    let renderer = HeadlessRenderer::builder().manual_animations().build();
    let player = StepPlayer::builder()
        .renderer(renderer.clone())
        .build()
        .unwrap();

    let log = heal_then_end();
    let fighters = fight("arena-6").1;
    let task = tokio::spawn(async move { player.play(&log, fighters).await });

    let mut pending = Vec::new();
    while !pending.iter().any(|(_, a, _)| *a == Animation::Drink) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        pending.extend(renderer.take_pending_animations());
    }
    assert_eq!(renderer.texts(), vec!["+10".to_string()]);
    let on_stage = renderer.live_nodes();

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(renderer.live_nodes(), on_stage - 1);
    for (_, animation, events) in pending {
        assert!(!events.complete(), "{animation:?} resolved after drop");
    }
}

#[tokio::test(start_paused = true)]
async fn cancel_only_affects_running_sessions() {
    let renderer = HeadlessRenderer::new();
    let player = StepPlayer::builder().renderer(renderer).build().unwrap();

    player.handle().cancel();
    let outcome = player
        .play(&heal_then_end(), fight("arena-5").1)
        .await
        .unwrap();

    assert!(!outcome.is_cancelled());
}

#[tokio::test]
async fn builder_requires_a_renderer() {
    let err = StepPlayer::builder().build().err().unwrap();
    assert!(matches!(err, playback::PlaybackError::RendererNotSet));
}
