//! Local-time resolution around daylight-saving transitions.
//!
//! Kept in its own test binary because it pins the process time zone.

use std::time::SystemTime;

use chrono::{TimeZone, Utc};
use kodiak_model::SubmissionFilename;

fn system_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> SystemTime {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .into()
}

fn mtime(raw: &str) -> SystemTime {
    SubmissionFilename::parse(raw).unwrap().submission_system_time()
}

#[test]
fn submission_times_follow_us_eastern_transitions() {
    // POSIX rule for US Eastern; needs no zoneinfo files.
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0");
    }

    // Ordinary winter time.
    assert_eq!(
        mtime("1-1 - Lucy Pelt - Jan 10, 2023 930 AM - hw.txt"),
        system_time(2023, 1, 10, 14, 30)
    );

    // 2:30 AM on Mar 12 2023 does not exist; read it as EST.
    assert_eq!(
        mtime("1-2 - Lucy Pelt - Mar 12, 2023 230 AM - hw.txt"),
        system_time(2023, 3, 12, 7, 30)
    );

    // 1:30 AM on Nov 5 2023 happens twice; the EDT reading comes first.
    assert_eq!(
        mtime("1-3 - Lucy Pelt - Nov 5, 2023 130 AM - hw.txt"),
        system_time(2023, 11, 5, 5, 30)
    );
}
