#![no_main]
use libfuzzer_sys::fuzz_target;
use overlap_libs::{
    slot::{Enumerate, Granularity, Slot},
    time::{apply_offset, minute_of_day},
};

fuzz_target!(|data: (Vec<Slot>, Slot, Granularity, i32)| {
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let (days, end, granularity, delta) = data;
    let delta = delta % (1440 * 1000);
    let dates = days.iter().map(|s| s.date()).collect::<Vec<_>>();

    // Treat the first slot as the start of day, `end` as the close
    let start = days.first().map(|s| s.time()).unwrap_or(end.time());

    match dates.iter().slots(start, end.time(), granularity) {
        Ok(slots) => {
            let span = minute_of_day(end.time()) - minute_of_day(start);
            assert_eq!(
                slots.len(),
                dates.len() * (span / granularity.minutes()) as usize,
                "Every date should receive floor(span / granularity) slots"
            );
            assert!(
                slots
                    .iter()
                    .all(|s| minute_of_day(s.time()) + granularity.minutes() <= minute_of_day(end.time())),
                "No slot may run past the end of day"
            );
        }
        Err(_) => assert!(start >= end.time(), "Only inverted ranges may fail"),
    }

    let shifted = apply_offset(end.time(), delta);
    assert_eq!(
        apply_offset(shifted, delta.wrapping_neg()),
        end.time(),
        "Offsets should round trip modulo a day"
    );
});
