use chrono::{Days, NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use overlap_libs::{
    aggregate, best_slots, enumerate, Granularity, ParticipantAvailability, PointerEvent,
    SelectionMachine, SelectionSet,
};

fn two_weeks() -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
    (0..14)
        .map(|d| start.checked_add_days(Days::new(d)).unwrap())
        .collect()
}

fn office_hours() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
    )
}

fn slots_and_heatmap(c: &mut Criterion) {
    let dates = two_weeks();
    let (start, end) = office_hours();

    c.bench_function("enumerate", |b| {
        b.iter(|| {
            black_box(enumerate(
                black_box(&dates),
                start,
                end,
                Granularity::default(),
            ))
        })
    });

    c.bench_function("enumerate_15_minutes", |b| {
        let granularity = Granularity::new(15).unwrap();
        b.iter(|| black_box(enumerate(black_box(&dates), start, end, granularity)))
    });

    let universe = enumerate(&dates, start, end, Granularity::default()).unwrap();

    // Every participant marks a different stride of the week
    let records: Vec<ParticipantAvailability> = (1..=50)
        .map(|p| {
            ParticipantAvailability::new(
                &format!("participant-{}", p),
                universe.iter().copied().step_by(1 + p % 7),
            )
        })
        .collect();

    c.bench_function("aggregate", |b| {
        b.iter(|| black_box(aggregate(black_box(&universe), black_box(&records))))
    });

    c.bench_function("best_slots", |b| {
        let heatmap = aggregate(&universe, &records);
        b.iter(|| black_box(best_slots(black_box(&heatmap), records.len())))
    });

    c.bench_function("drag_across_grid", |b| {
        b.iter(|| {
            let mut selection = SelectionSet::new();
            let mut machine = SelectionMachine::new();

            machine.handle(PointerEvent::Press(universe[0]), &mut selection);
            for slot in universe.iter().skip(1) {
                machine.handle(PointerEvent::Enter(Some(*slot)), &mut selection);
            }
            machine.handle(PointerEvent::Release, &mut selection);

            black_box(selection)
        })
    });
}

criterion_group!(benches, slots_and_heatmap);
criterion_main!(benches);
