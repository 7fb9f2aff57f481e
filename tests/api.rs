use schedule_distribution::*;

fn starts(instances: &[Instance]) -> Vec<&str> {
    instances.iter().map(|i| i.start_time.as_str()).collect()
}

// ============================================================
// Daily
// ============================================================

#[test]
fn test_daily_with_end_time() {
    let got = calc_daily(
        "2022-05-01",
        "2022-05-10",
        3,
        "Asia/Shanghai",
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        [
            "2022-05-01 20:30",
            "2022-05-04 20:30",
            "2022-05-07 20:30",
            "2022-05-10 20:30"
        ]
    );
    for inst in &got {
        let end = inst.end_time.as_deref().unwrap();
        assert_eq!(&end[..10], &inst.start_time[..10]);
        assert!(end.ends_with("23:00"));
    }
}

#[test]
fn test_daily_without_end_time() {
    let got = calc_daily(
        "2022-05-01",
        "2022-05-03",
        1,
        "Asia/Shanghai",
        "08:30 PM",
        None,
    )
    .unwrap();
    assert_eq!(got.len(), 3);
    assert!(got.iter().all(|i| i.end_time.is_none()));
}

#[test]
fn test_daily_crosses_midnight() {
    let got = calc_daily(
        "2022-05-01",
        "2022-05-02",
        1,
        "UTC",
        "10:00 PM",
        Some("02:00 AM"),
    )
    .unwrap();
    assert_eq!(
        got,
        vec![
            Instance {
                start_time: "2022-05-01 22:00".into(),
                end_time: Some("2022-05-02 02:00".into()),
            },
            Instance {
                start_time: "2022-05-02 22:00".into(),
                end_time: Some("2022-05-03 02:00".into()),
            },
        ]
    );
}

#[test]
fn test_daily_same_day_range() {
    let got = calc_daily("2022-05-01", "2022-05-01", 5, "UTC", "12:00 AM", None).unwrap();
    assert_eq!(starts(&got), ["2022-05-01 00:00"]);
}

#[test]
fn test_daily_step_longer_than_range() {
    let got = calc_daily("2022-05-01", "2022-05-10", 30, "UTC", "09:00 AM", None).unwrap();
    assert_eq!(starts(&got), ["2022-05-01 09:00"]);
}

// ============================================================
// Weekly
// ============================================================

#[test]
fn test_weekly_all_mondays() {
    let got = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        1,
        &["Monday"],
        "Asia/Shanghai",
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        [
            "2022-05-02 20:30",
            "2022-05-09 20:30",
            "2022-05-16 20:30",
            "2022-05-23 20:30",
            "2022-05-30 20:30"
        ]
    );
}

#[test]
fn test_weekly_every_other_week() {
    let got = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        2,
        &["Monday", "Saturday"],
        "Asia/Shanghai",
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        [
            "2022-05-02 20:30",
            "2022-05-07 20:30",
            "2022-05-16 20:30",
            "2022-05-21 20:30",
            "2022-05-30 20:30"
        ]
    );
}

#[test]
fn test_weekly_weekday_order_does_not_matter() {
    let forward = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        1,
        &["Monday", "Friday"],
        "UTC",
        "09:00 AM",
        None,
    )
    .unwrap();
    let backward = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        1,
        &["friday", "MON"],
        "UTC",
        "09:00 AM",
        None,
    )
    .unwrap();
    assert_eq!(forward, backward);
    let mut sorted = starts(&forward);
    sorted.sort_unstable();
    assert_eq!(sorted, starts(&forward));
}

#[test]
fn test_weekly_empty_weekdays() {
    let none: [&str; 0] = [];
    let got = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        1,
        &none,
        "UTC",
        "09:00 AM",
        None,
    )
    .unwrap();
    assert!(got.is_empty());
}

#[test]
fn test_weekly_unknown_weekday() {
    let err = calc_weekly(
        "2022-05-01",
        "2022-05-31",
        1,
        &["Funday"],
        "UTC",
        "09:00 AM",
        None,
    )
    .unwrap_err();
    assert_eq!(err, DistributionError::UnknownWeekday("Funday".into()));
}

// ============================================================
// Monthly
// ============================================================

#[test]
fn test_monthly_by_days() {
    let got = calc_monthly_by_days(
        "2022-05-01",
        "2022-08-31",
        "Asia/Shanghai",
        15,
        1,
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        [
            "2022-05-15 20:30",
            "2022-06-15 20:30",
            "2022-07-15 20:30",
            "2022-08-15 20:30"
        ]
    );
}

#[test]
fn test_monthly_by_days_clamps_short_months() {
    let got = calc_monthly_by_days(
        "2022-01-01",
        "2022-04-30",
        "UTC",
        31,
        1,
        "05:00 PM",
        None,
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        [
            "2022-01-31 17:00",
            "2022-02-28 17:00",
            "2022-03-31 17:00",
            "2022-04-30 17:00"
        ]
    );
}

#[test]
fn test_monthly_by_days_out_of_bounds() {
    let err = calc_monthly_by_days(
        "2022-01-01",
        "2022-04-30",
        "UTC",
        32,
        1,
        "05:00 PM",
        None,
    )
    .unwrap_err();
    assert_eq!(err, DistributionError::InvalidDayOfMonth(32));
}

#[test]
fn test_monthly_by_weeks() {
    let got = calc_monthly_by_weeks(
        "2022-05-01",
        "2022-09-30",
        "Asia/Shanghai",
        "Third",
        "Monday",
        2,
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        ["2022-05-16 20:30", "2022-07-18 20:30", "2022-09-19 20:30"]
    );
}

#[test]
fn test_monthly_by_weeks_last() {
    let got = calc_monthly_by_weeks(
        "2022-05-01",
        "2022-07-31",
        "UTC",
        "Last",
        "Friday",
        1,
        "04:00 PM",
        None,
    )
    .unwrap();
    assert_eq!(
        starts(&got),
        ["2022-05-27 16:00", "2022-06-24 16:00", "2022-07-29 16:00"]
    );
}

#[test]
fn test_monthly_by_weeks_unknown_ordinal() {
    let err = calc_monthly_by_weeks(
        "2022-05-01",
        "2022-07-31",
        "UTC",
        "Fifth",
        "Friday",
        1,
        "04:00 PM",
        None,
    )
    .unwrap_err();
    assert_eq!(err, DistributionError::UnknownOrdinal("Fifth".into()));
}

// ============================================================
// Errors and shared behavior
// ============================================================

#[test]
fn test_reversed_range() {
    let err = calc_daily("2022-05-10", "2022-05-01", 1, "UTC", "08:30 PM", None).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidRange { .. }));
    assert!(err.to_string().contains("2022-05-10"));
}

#[test]
fn test_reversed_range_reported_before_bad_time() {
    let err = calc_daily("2022-05-10", "2022-05-01", 1, "UTC", "nonsense", None).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidRange { .. }));
}

#[test]
fn test_invalid_timezone() {
    let err = calc_daily("2022-05-01", "2022-05-10", 1, "Not/AZone", "08:30 PM", None).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidTimezone { .. }));
}

#[test]
fn test_invalid_time_format() {
    for bad in ["20:30", "8:30PM", "13:00 PM", "08:60 AM", "08:30 XM"] {
        let err = calc_daily("2022-05-01", "2022-05-10", 1, "UTC", bad, None).unwrap_err();
        assert!(
            matches!(err, DistributionError::InvalidTimeFormat { .. }),
            "{bad}: {err:?}"
        );
    }
}

#[test]
fn test_zero_step() {
    let err = calc_daily("2022-05-01", "2022-05-10", 0, "UTC", "08:30 PM", None).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidStep { .. }));
}

#[test]
fn test_repeatable() {
    let a = calc_monthly_by_weeks(
        "2022-01-01",
        "2022-12-31",
        "Europe/Paris",
        "Second",
        "Tuesday",
        1,
        "09:00 AM",
        Some("10:00 AM"),
    )
    .unwrap();
    let b = calc_monthly_by_weeks(
        "2022-01-01",
        "2022-12-31",
        "Europe/Paris",
        "Second",
        "Tuesday",
        1,
        "09:00 AM",
        Some("10:00 AM"),
    )
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 12);
}

#[test]
fn test_spec_describe() {
    let spec = ScheduleSpec::from_strings(
        RecurrencePattern::Weekly {
            every_n_weeks: 2,
            weekdays: vec![Weekday::Monday, Weekday::Saturday],
        },
        "2022-05-01",
        "2022-05-31",
        "Asia/Shanghai",
        "08:30 PM",
        None,
    )
    .unwrap();
    assert_eq!(
        spec.to_string(),
        "every 2 weeks on Monday, Saturday at 08:30 PM between 2022-05-01 and 2022-05-31 in Asia/Shanghai"
    );
    assert_eq!(spec.distributions().unwrap().len(), 5);
}

// ============================================================
// Descriptors
// ============================================================

#[test]
fn test_calc_by_pattern_daily() {
    let json = r#"{
        "Pattern": "Daily",
        "DailyOptions": { "EveryDays": 1 },
        "StartTime": "04:00 PM",
        "EndTime": "05:00 PM",
        "TimeZone": { "Name": "Asia/Shanghai" },
        "Range": { "StartDateAt": "2022-05-18", "EndDateAt": "2022-05-21" }
    }"#;
    let got = calc_by_pattern_json(json).unwrap();
    assert_eq!(got.len(), 4);
    assert_eq!(got[0].start_time, "2022-05-18 16:00");
    assert_eq!(got[3].end_time.as_deref(), Some("2022-05-21 17:00"));
}

#[test]
fn test_calc_by_pattern_matches_direct_call() {
    let descriptor = ScheduleDescriptor::from_json(
        r#"{
            "Pattern": "Monthly",
            "MonthlyOptions": {
                "Type": "ByWeekDays",
                "ByWeekDays": { "Ordinal": "Third", "WeekDay": "Monday", "EveryMonths": 2 }
            },
            "StartTime": "08:30 PM",
            "EndTime": "11:00 PM",
            "TimeZone": { "Name": "Asia/Shanghai" },
            "Range": { "StartDateAt": "2022-05-01", "EndDateAt": "2022-09-30" }
        }"#,
    )
    .unwrap();
    let direct = calc_monthly_by_weeks(
        "2022-05-01",
        "2022-09-30",
        "Asia/Shanghai",
        "Third",
        "Monday",
        2,
        "08:30 PM",
        Some("11:00 PM"),
    )
    .unwrap();
    assert_eq!(calc_by_pattern(&descriptor).unwrap(), direct);
}

#[test]
fn test_calc_by_pattern_unknown() {
    let err = calc_by_pattern_json(r#"{ "Pattern": "Yearly" }"#).unwrap_err();
    assert_eq!(err, DistributionError::UnknownPattern("Yearly".into()));
}

#[test]
fn test_instances_serialize_without_missing_end() {
    let got = calc_daily("2022-05-01", "2022-05-01", 1, "UTC", "08:30 PM", None).unwrap();
    let json = serde_json::to_string(&got).unwrap();
    assert_eq!(json, r#"[{"start_time":"2022-05-01 20:30"}]"#);
}
